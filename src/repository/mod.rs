//! Repository layer for catalog storage
//!
//! [`CatalogStore`] is the query interface the services are written against.
//! [`Repository`] implements it over PostgreSQL; [`memory::MemoryStore`] keeps
//! everything in process for development and tests.

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod memory;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{
        Author, AuthorData, Book, BookData, BookDetail, BookInstance, BookInstanceData,
        BookInstanceDetail, BookListing, BookOption, BookOverview, BookStatus, Genre,
    },
};

pub use memory::MemoryStore;

/// Ordering key for names and titles: lowercased, then compared bytewise.
/// Matches `ORDER BY lower(..) COLLATE "C"` on the Postgres side.
pub(crate) fn sort_key(text: &str) -> String {
    text.to_lowercase()
}

/// Catalog document store.
///
/// Lookups by id return `Ok(None)` for a missing document; only transport or
/// constraint failures are errors. Updates replace the stored fields and
/// return `Ok(None)` when nothing matched. Removals succeed silently when the
/// document is already gone. Listings sort names and titles by [`sort_key`]
/// on every backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Round trip to the backend, used by the readiness probe
    async fn ping(&self) -> AppResult<()>;

    // Authors
    async fn list_authors(&self) -> AppResult<Vec<Author>>;
    async fn find_author(&self, id: i32) -> AppResult<Option<Author>>;
    async fn insert_author(&self, data: &AuthorData) -> AppResult<Author>;
    async fn update_author(&self, id: i32, data: &AuthorData) -> AppResult<Option<Author>>;
    async fn remove_author(&self, id: i32) -> AppResult<()>;
    async fn count_authors(&self) -> AppResult<i64>;

    // Genres
    async fn list_genres(&self) -> AppResult<Vec<Genre>>;
    async fn find_genre(&self, id: i32) -> AppResult<Option<Genre>>;
    async fn find_genre_by_name(&self, name: &str) -> AppResult<Option<Genre>>;
    async fn insert_genre(&self, name: &str) -> AppResult<Genre>;
    async fn update_genre(&self, id: i32, name: &str) -> AppResult<Option<Genre>>;
    async fn remove_genre(&self, id: i32) -> AppResult<()>;
    async fn count_genres(&self) -> AppResult<i64>;

    // Books
    async fn list_books(&self) -> AppResult<Vec<BookListing>>;
    async fn book_options(&self) -> AppResult<Vec<BookOption>>;
    async fn find_book(&self, id: i32) -> AppResult<Option<BookDetail>>;
    async fn books_by_author(&self, author_id: i32) -> AppResult<Vec<BookOverview>>;
    async fn books_by_genre(&self, genre_id: i32) -> AppResult<Vec<BookOverview>>;
    async fn insert_book(&self, data: &BookData) -> AppResult<Book>;
    async fn update_book(&self, id: i32, data: &BookData) -> AppResult<Option<Book>>;
    async fn remove_book(&self, id: i32) -> AppResult<()>;
    async fn count_books(&self) -> AppResult<i64>;

    // Book instances
    async fn list_book_instances(&self) -> AppResult<Vec<BookInstanceDetail>>;
    async fn find_book_instance(&self, id: i32) -> AppResult<Option<BookInstanceDetail>>;
    async fn instances_of_book(&self, book_id: i32) -> AppResult<Vec<BookInstance>>;
    async fn insert_book_instance(&self, data: &BookInstanceData) -> AppResult<BookInstance>;
    async fn update_book_instance(
        &self,
        id: i32,
        data: &BookInstanceData,
    ) -> AppResult<Option<BookInstance>>;
    async fn remove_book_instance(&self, id: i32) -> AppResult<()>;
    async fn count_book_instances(&self, status: Option<BookStatus>) -> AppResult<i64>;
}

/// PostgreSQL-backed store holding the connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for Repository {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_authors(&self) -> AppResult<Vec<Author>> {
        self.authors_list().await
    }

    async fn find_author(&self, id: i32) -> AppResult<Option<Author>> {
        self.authors_get_by_id(id).await
    }

    async fn insert_author(&self, data: &AuthorData) -> AppResult<Author> {
        self.authors_create(data).await
    }

    async fn update_author(&self, id: i32, data: &AuthorData) -> AppResult<Option<Author>> {
        self.authors_update(id, data).await
    }

    async fn remove_author(&self, id: i32) -> AppResult<()> {
        self.authors_delete(id).await
    }

    async fn count_authors(&self) -> AppResult<i64> {
        self.authors_count().await
    }

    async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        self.genres_list().await
    }

    async fn find_genre(&self, id: i32) -> AppResult<Option<Genre>> {
        self.genres_get_by_id(id).await
    }

    async fn find_genre_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        self.genres_get_by_name(name).await
    }

    async fn insert_genre(&self, name: &str) -> AppResult<Genre> {
        self.genres_create(name).await
    }

    async fn update_genre(&self, id: i32, name: &str) -> AppResult<Option<Genre>> {
        self.genres_update(id, name).await
    }

    async fn remove_genre(&self, id: i32) -> AppResult<()> {
        self.genres_delete(id).await
    }

    async fn count_genres(&self) -> AppResult<i64> {
        self.genres_count().await
    }

    async fn list_books(&self) -> AppResult<Vec<BookListing>> {
        self.books_list().await
    }

    async fn book_options(&self) -> AppResult<Vec<BookOption>> {
        self.books_options().await
    }

    async fn find_book(&self, id: i32) -> AppResult<Option<BookDetail>> {
        self.books_get_by_id(id).await
    }

    async fn books_by_author(&self, author_id: i32) -> AppResult<Vec<BookOverview>> {
        self.books_list_by_author(author_id).await
    }

    async fn books_by_genre(&self, genre_id: i32) -> AppResult<Vec<BookOverview>> {
        self.books_list_by_genre(genre_id).await
    }

    async fn insert_book(&self, data: &BookData) -> AppResult<Book> {
        self.books_create(data).await
    }

    async fn update_book(&self, id: i32, data: &BookData) -> AppResult<Option<Book>> {
        self.books_update(id, data).await
    }

    async fn remove_book(&self, id: i32) -> AppResult<()> {
        self.books_delete(id).await
    }

    async fn count_books(&self) -> AppResult<i64> {
        self.books_count().await
    }

    async fn list_book_instances(&self) -> AppResult<Vec<BookInstanceDetail>> {
        self.book_instances_list().await
    }

    async fn find_book_instance(&self, id: i32) -> AppResult<Option<BookInstanceDetail>> {
        self.book_instances_get_by_id(id).await
    }

    async fn instances_of_book(&self, book_id: i32) -> AppResult<Vec<BookInstance>> {
        self.book_instances_for_book(book_id).await
    }

    async fn insert_book_instance(&self, data: &BookInstanceData) -> AppResult<BookInstance> {
        self.book_instances_create(data).await
    }

    async fn update_book_instance(
        &self,
        id: i32,
        data: &BookInstanceData,
    ) -> AppResult<Option<BookInstance>> {
        self.book_instances_update(id, data).await
    }

    async fn remove_book_instance(&self, id: i32) -> AppResult<()> {
        self.book_instances_delete(id).await
    }

    async fn count_book_instances(&self, status: Option<BookStatus>) -> AppResult<i64> {
        self.book_instances_count(status).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = include_str!("../../migrations/20240101000000_catalog.sql");

    #[test]
    fn test_sort_key_ignores_case() {
        let mut names = vec!["Bronte", "austen", "Carroll"];
        names.sort_by_key(|n| sort_key(n));
        assert_eq!(names, vec!["austen", "Bronte", "Carroll"]);
    }

    #[test]
    fn test_name_columns_hold_escaped_text() {
        // Validation bounds the submitted length; escaping can grow the stored value.
        for column in ["first_name", "family_name", "name"] {
            let line = SCHEMA
                .lines()
                .find(|l| l.trim_start().starts_with(&format!("{} ", column)))
                .unwrap();
            assert!(line.contains("TEXT"), "{} is not TEXT: {}", column, line);
        }
        assert!(!SCHEMA.contains("VARCHAR"));
    }
}
