use color_eyre::Result;

use super::models::{Category, Question};
use super::Db;
use crate::services::QuestionStore;

impl QuestionStore for Db {
    async fn list_questions(&self) -> Result<Vec<Question>> {
        self.all_questions().await
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        self.all_categories().await
    }

    async fn list_questions_by_category(&self, category: i64) -> Result<Vec<Question>> {
        self.questions_in_category(category).await
    }

    async fn get_question(&self, question_id: i64) -> Result<Option<Question>> {
        self.question_by_id(question_id).await
    }

    async fn get_category(&self, category_id: i64) -> Result<Option<Category>> {
        self.category_by_id(category_id).await
    }

    async fn insert_question(
        &self,
        question: &str,
        answer: &str,
        difficulty: i64,
        category: i64,
    ) -> Result<i64> {
        self.create_question(question, answer, difficulty, category)
            .await
    }

    async fn delete_question(&self, question_id: i64) -> Result<bool> {
        self.remove_question(question_id).await
    }
}
