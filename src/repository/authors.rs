//! Author domain methods on Repository

use super::Repository;
use crate::{
    error::AppResult,
    models::author::{Author, AuthorData},
};

impl Repository {
    /// List all authors ordered by family name
    pub async fn authors_list(&self) -> AppResult<Vec<Author>> {
        let rows = sqlx::query_as::<_, Author>(
            r#"
            SELECT * FROM authors
            ORDER BY lower(family_name) COLLATE "C", lower(first_name) COLLATE "C", id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn authors_get_by_id(&self, id: i32) -> AppResult<Option<Author>> {
        let row = sqlx::query_as::<_, Author>("SELECT * FROM authors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn authors_create(&self, data: &AuthorData) -> AppResult<Author> {
        let row = sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO authors (first_name, family_name, date_of_birth, date_of_death)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&data.first_name)
        .bind(&data.family_name)
        .bind(data.date_of_birth)
        .bind(data.date_of_death)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Replace an author's fields; `None` when no author has this id
    pub async fn authors_update(&self, id: i32, data: &AuthorData) -> AppResult<Option<Author>> {
        let row = sqlx::query_as::<_, Author>(
            r#"
            UPDATE authors
            SET first_name = $1, family_name = $2, date_of_birth = $3, date_of_death = $4
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(&data.first_name)
        .bind(&data.family_name)
        .bind(data.date_of_birth)
        .bind(data.date_of_death)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn authors_delete(&self, id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn authors_count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*)::bigint FROM authors")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
