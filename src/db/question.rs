use color_eyre::Result;

use super::models::Question;
use super::Db;

impl Db {
    /// Every question, ordered by id so paging stays stable as rows are added.
    pub async fn all_questions(&self) -> Result<Vec<Question>> {
        let questions = sqlx::query_as::<_, Question>(
            "SELECT id, question, answer, difficulty, category FROM questions ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(questions)
    }

    pub async fn questions_in_category(&self, category: i64) -> Result<Vec<Question>> {
        let questions = sqlx::query_as::<_, Question>(
            "SELECT id, question, answer, difficulty, category FROM questions WHERE category = ? ORDER BY id",
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        Ok(questions)
    }

    pub async fn question_by_id(&self, question_id: i64) -> Result<Option<Question>> {
        let question = sqlx::query_as::<_, Question>(
            "SELECT id, question, answer, difficulty, category FROM questions WHERE id = ?",
        )
        .bind(question_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(question)
    }

    /// Row count, used by the integration tests to check inserts and cascades.
    pub async fn questions_count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM questions")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Inserts a question under the internal category key and returns its id.
    pub async fn create_question(
        &self,
        question: &str,
        answer: &str,
        difficulty: i64,
        category: i64,
    ) -> Result<i64> {
        let question_id = sqlx::query(
            "INSERT INTO questions (question, answer, difficulty, category) VALUES (?, ?, ?, ?)",
        )
        .bind(question)
        .bind(answer)
        .bind(difficulty)
        .bind(category)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        tracing::info!("created question {question_id} in category {category}");
        Ok(question_id)
    }

    /// Returns `false` when no question had that id.
    pub async fn remove_question(&self, question_id: i64) -> Result<bool> {
        let deleted = sqlx::query("DELETE FROM questions WHERE id = ?")
            .bind(question_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if deleted > 0 {
            tracing::info!("deleted question {question_id}");
        }
        Ok(deleted > 0)
    }
}
