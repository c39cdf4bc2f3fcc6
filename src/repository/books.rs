//! Book domain methods on Repository

use chrono::NaiveDate;
use sqlx::FromRow;

use super::Repository;
use crate::{
    error::AppResult,
    models::{
        author::Author,
        book::{Book, BookData, BookDetail, BookListing, BookOption, BookOverview},
        genre::Genre,
    },
};

/// A book row joined with its (possibly missing) author
#[derive(Debug, FromRow)]
struct BookAuthorRow {
    id: i32,
    title: String,
    author_id: i32,
    summary: String,
    isbn: String,
    a_id: Option<i32>,
    a_first_name: Option<String>,
    a_family_name: Option<String>,
    a_date_of_birth: Option<NaiveDate>,
    a_date_of_death: Option<NaiveDate>,
}

impl BookAuthorRow {
    fn into_listing(self) -> BookListing {
        let author = match (self.a_id, self.a_first_name, self.a_family_name) {
            (Some(id), Some(first_name), Some(family_name)) => Some(Author {
                id,
                first_name,
                family_name,
                date_of_birth: self.a_date_of_birth,
                date_of_death: self.a_date_of_death,
            }),
            _ => None,
        };

        BookListing {
            book: Book {
                id: self.id,
                title: self.title,
                author_id: self.author_id,
                summary: self.summary,
                isbn: self.isbn,
            },
            author,
        }
    }
}

const BOOK_WITH_AUTHOR: &str = r#"
    SELECT b.id, b.title, b.author_id, b.summary, b.isbn,
           a.id AS a_id, a.first_name AS a_first_name, a.family_name AS a_family_name,
           a.date_of_birth AS a_date_of_birth, a.date_of_death AS a_date_of_death
    FROM books b
    LEFT JOIN authors a ON a.id = b.author_id
"#;

impl Repository {
    /// List all books with their author, ordered by title
    pub async fn books_list(&self) -> AppResult<Vec<BookListing>> {
        let rows = sqlx::query_as::<_, BookAuthorRow>(&format!(
            r#"{} ORDER BY lower(b.title) COLLATE "C", b.id"#,
            BOOK_WITH_AUTHOR
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(BookAuthorRow::into_listing).collect())
    }

    /// Id and title of every book, for selection lists
    pub async fn books_options(&self) -> AppResult<Vec<BookOption>> {
        let rows = sqlx::query_as::<_, BookOption>(
            r#"SELECT id, title FROM books ORDER BY lower(title) COLLATE "C", id"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get a book with author and genres populated
    pub async fn books_get_by_id(&self, id: i32) -> AppResult<Option<BookDetail>> {
        let book_query = format!("{} WHERE b.id = $1", BOOK_WITH_AUTHOR);
        let book = sqlx::query_as::<_, BookAuthorRow>(&book_query)
            .bind(id)
            .fetch_optional(&self.pool);
        let genres = sqlx::query_as::<_, Genre>(
            r#"
            SELECT g.* FROM genres g
            JOIN book_genres bg ON bg.genre_id = g.id
            WHERE bg.book_id = $1
            ORDER BY lower(g.name) COLLATE "C", g.id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool);

        let (book, genres) = tokio::try_join!(book, genres)?;

        Ok(book.map(|row| {
            let listing = row.into_listing();
            BookDetail {
                book: listing.book,
                author: listing.author,
                genres,
            }
        }))
    }

    pub async fn books_list_by_author(&self, author_id: i32) -> AppResult<Vec<BookOverview>> {
        let rows = sqlx::query_as::<_, BookOverview>(
            r#"
            SELECT id, title, summary FROM books
            WHERE author_id = $1
            ORDER BY lower(title) COLLATE "C", id
            "#,
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn books_list_by_genre(&self, genre_id: i32) -> AppResult<Vec<BookOverview>> {
        let rows = sqlx::query_as::<_, BookOverview>(
            r#"
            SELECT b.id, b.title, b.summary FROM books b
            JOIN book_genres bg ON bg.book_id = b.id
            WHERE bg.genre_id = $1
            ORDER BY lower(b.title) COLLATE "C", b.id
            "#,
        )
        .bind(genre_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Insert a book and its genre links as one write
    pub async fn books_create(&self, data: &BookData) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author_id, summary, isbn)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&data.title)
        .bind(data.author_id)
        .bind(&data.summary)
        .bind(&data.isbn)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO book_genres (book_id, genre_id) SELECT $1, UNNEST($2::int[]) ON CONFLICT DO NOTHING",
        )
        .bind(book.id)
        .bind(&data.genre_ids)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(book)
    }

    /// Replace a book's fields and genre links; `None` when no book has this id
    pub async fn books_update(&self, id: i32, data: &BookData) -> AppResult<Option<Book>> {
        let mut tx = self.pool.begin().await?;

        let book = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books SET title = $1, author_id = $2, summary = $3, isbn = $4
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(&data.title)
        .bind(data.author_id)
        .bind(&data.summary)
        .bind(&data.isbn)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(book) = book else {
            return Ok(None);
        };

        sqlx::query("DELETE FROM book_genres WHERE book_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query(
            "INSERT INTO book_genres (book_id, genre_id) SELECT $1, UNNEST($2::int[]) ON CONFLICT DO NOTHING",
        )
        .bind(id)
        .bind(&data.genre_ids)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(book))
    }

    pub async fn books_delete(&self, id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn books_count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*)::bigint FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
