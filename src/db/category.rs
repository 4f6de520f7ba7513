use color_eyre::Result;

use super::models::Category;
use super::Db;
use crate::names;

impl Db {
    pub async fn all_categories(&self) -> Result<Vec<Category>> {
        let categories =
            sqlx::query_as::<_, Category>("SELECT id, type FROM categories ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(categories)
    }

    pub async fn category_by_id(&self, category_id: i64) -> Result<Option<Category>> {
        let category =
            sqlx::query_as::<_, Category>("SELECT id, type FROM categories WHERE id = ?")
                .bind(category_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(category)
    }

    /// Inserts a category and returns its internal key.
    pub async fn create_category(&self, label: &str) -> Result<i64> {
        let category_id = sqlx::query("INSERT INTO categories (type) VALUES (?)")
            .bind(label)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();

        tracing::info!("created category {category_id} ({label})");
        Ok(category_id)
    }

    /// Inserts the standard trivia categories when the table is empty.
    /// Returns how many rows were added.
    pub async fn seed_default_categories(&self) -> Result<usize> {
        let mut tx = self.pool.begin().await?;

        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&mut *tx)
            .await?;
        if existing > 0 {
            return Ok(0);
        }

        for label in names::DEFAULT_CATEGORIES {
            sqlx::query("INSERT INTO categories (type) VALUES (?)")
                .bind(*label)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        tracing::info!("seeded {} default categories", names::DEFAULT_CATEGORIES.len());
        Ok(names::DEFAULT_CATEGORIES.len())
    }
}
