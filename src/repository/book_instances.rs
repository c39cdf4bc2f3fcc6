//! Book instance domain methods on Repository

use chrono::NaiveDate;
use sqlx::FromRow;

use super::Repository;
use crate::{
    error::AppResult,
    models::{
        book::BookOption,
        book_instance::{BookInstance, BookInstanceData, BookInstanceDetail, BookStatus},
    },
};

/// A copy joined with the id and title of its book
#[derive(Debug, FromRow)]
struct InstanceBookRow {
    id: i32,
    book_id: i32,
    imprint: String,
    status: BookStatus,
    due_back: Option<NaiveDate>,
    book_title: Option<String>,
}

impl From<InstanceBookRow> for BookInstanceDetail {
    fn from(row: InstanceBookRow) -> Self {
        let book = row.book_title.map(|title| BookOption {
            id: row.book_id,
            title,
        });
        BookInstanceDetail {
            instance: BookInstance {
                id: row.id,
                book_id: row.book_id,
                imprint: row.imprint,
                status: row.status,
                due_back: row.due_back,
            },
            book,
        }
    }
}

const INSTANCE_WITH_BOOK: &str = r#"
    SELECT bi.id, bi.book_id, bi.imprint, bi.status, bi.due_back, b.title AS book_title
    FROM book_instances bi
    LEFT JOIN books b ON b.id = bi.book_id
"#;

impl Repository {
    pub async fn book_instances_list(&self) -> AppResult<Vec<BookInstanceDetail>> {
        let rows = sqlx::query_as::<_, InstanceBookRow>(&format!("{} ORDER BY bi.id", INSTANCE_WITH_BOOK))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn book_instances_get_by_id(&self, id: i32) -> AppResult<Option<BookInstanceDetail>> {
        let row = sqlx::query_as::<_, InstanceBookRow>(&format!("{} WHERE bi.id = $1", INSTANCE_WITH_BOOK))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Into::into))
    }

    /// All copies of one book
    pub async fn book_instances_for_book(&self, book_id: i32) -> AppResult<Vec<BookInstance>> {
        let rows = sqlx::query_as::<_, BookInstance>(
            "SELECT * FROM book_instances WHERE book_id = $1 ORDER BY id",
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn book_instances_create(&self, data: &BookInstanceData) -> AppResult<BookInstance> {
        let row = sqlx::query_as::<_, BookInstance>(
            r#"
            INSERT INTO book_instances (book_id, imprint, status, due_back)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(data.book_id)
        .bind(&data.imprint)
        .bind(data.status)
        .bind(data.due_back)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn book_instances_update(
        &self,
        id: i32,
        data: &BookInstanceData,
    ) -> AppResult<Option<BookInstance>> {
        let row = sqlx::query_as::<_, BookInstance>(
            r#"
            UPDATE book_instances
            SET book_id = $1, imprint = $2, status = $3, due_back = $4
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(data.book_id)
        .bind(&data.imprint)
        .bind(data.status)
        .bind(data.due_back)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn book_instances_delete(&self, id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM book_instances WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Count copies, optionally only those in `status`
    pub async fn book_instances_count(&self, status: Option<BookStatus>) -> AppResult<i64> {
        let count: i64 = match status {
            Some(status) => {
                sqlx::query_scalar("SELECT COUNT(*)::bigint FROM book_instances WHERE status = $1")
                    .bind(status)
                    .fetch_one(&self.pool)
                    .await?
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*)::bigint FROM book_instances")
                    .fetch_one(&self.pool)
                    .await?
            }
        };
        Ok(count)
    }
}
