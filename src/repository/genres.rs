//! Genre domain methods on Repository

use super::Repository;
use crate::{error::AppResult, models::genre::Genre};

impl Repository {
    pub async fn genres_list(&self) -> AppResult<Vec<Genre>> {
        let rows = sqlx::query_as::<_, Genre>(
            r#"SELECT * FROM genres ORDER BY lower(name) COLLATE "C", id"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn genres_get_by_id(&self, id: i32) -> AppResult<Option<Genre>> {
        let row = sqlx::query_as::<_, Genre>("SELECT * FROM genres WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Case-insensitive lookup by name
    pub async fn genres_get_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        let row = sqlx::query_as::<_, Genre>(
            "SELECT * FROM genres WHERE lower(name) = lower($1) ORDER BY id LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn genres_create(&self, name: &str) -> AppResult<Genre> {
        let row = sqlx::query_as::<_, Genre>("INSERT INTO genres (name) VALUES ($1) RETURNING *")
            .bind(name)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn genres_update(&self, id: i32, name: &str) -> AppResult<Option<Genre>> {
        let row = sqlx::query_as::<_, Genre>(
            "UPDATE genres SET name = $1 WHERE id = $2 RETURNING *",
        )
        .bind(name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn genres_delete(&self, id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM genres WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn genres_count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*)::bigint FROM genres")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
