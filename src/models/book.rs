//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{author::Author, genre::Genre};
use crate::{
    error::{AppError, AppResult},
    validation::Sanitized,
};

/// Full book record from the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author_id: i32,
    pub summary: String,
    pub isbn: String,
}

impl Book {
    pub fn url(&self) -> String {
        book_url(self.id)
    }
}

pub fn book_url(id: i32) -> String {
    format!("/catalog/book/{}", id)
}

/// Book projected to id and title, used in selection lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct BookOption {
    pub id: i32,
    pub title: String,
}

impl BookOption {
    pub fn url(&self) -> String {
        book_url(self.id)
    }
}

/// Book projected to title and summary, shown under an author or genre
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct BookOverview {
    pub id: i32,
    pub title: String,
    pub summary: String,
}

impl BookOverview {
    pub fn url(&self) -> String {
        book_url(self.id)
    }
}

/// Book with its author populated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookListing {
    pub book: Book,
    pub author: Option<Author>,
}

/// Book with its author and genres populated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDetail {
    pub book: Book,
    pub author: Option<Author>,
    pub genres: Vec<Genre>,
}

/// Book fields written to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookData {
    pub title: String,
    pub author_id: i32,
    pub summary: String,
    pub isbn: String,
    pub genre_ids: Vec<i32>,
}

/// Book form contents, echoed back on re-render
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookDraft {
    pub id: Option<i32>,
    pub title: String,
    pub author: String,
    pub summary: String,
    pub isbn: String,
    pub genre: Vec<String>,
}

impl BookDraft {
    pub fn from_submission(form: &Sanitized, id: Option<i32>) -> Self {
        Self {
            id,
            title: form.value("title"),
            author: form.value("author"),
            summary: form.value("summary"),
            isbn: form.value("isbn"),
            genre: form.values("genre"),
        }
    }

    pub fn author_id(&self) -> Option<i32> {
        self.author.parse().ok()
    }

    /// Genre identifiers ticked on the form; unparseable entries are dropped
    pub fn genre_ids(&self) -> Vec<i32> {
        self.genre.iter().filter_map(|g| g.parse().ok()).collect()
    }

    pub fn to_data(&self) -> AppResult<BookData> {
        let author_id = self
            .author_id()
            .ok_or_else(|| AppError::BadRequest(format!("Invalid author reference '{}'", self.author)))?;

        Ok(BookData {
            title: self.title.clone(),
            author_id,
            summary: self.summary.clone(),
            isbn: self.isbn.clone(),
            genre_ids: self.genre_ids(),
        })
    }
}

impl From<&BookDetail> for BookDraft {
    fn from(detail: &BookDetail) -> Self {
        Self {
            id: Some(detail.book.id),
            title: detail.book.title.clone(),
            author: detail.book.author_id.to_string(),
            summary: detail.book.summary.clone(),
            isbn: detail.book.isbn.clone(),
            genre: detail.genres.iter().map(|g| g.id.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_references() {
        let draft = BookDraft {
            author: "3".to_string(),
            genre: vec!["1".to_string(), "x".to_string(), "4".to_string()],
            ..Default::default()
        };
        assert_eq!(draft.author_id(), Some(3));
        assert_eq!(draft.genre_ids(), vec![1, 4]);

        let data = draft.to_data().unwrap();
        assert_eq!(data.author_id, 3);
    }

    #[test]
    fn test_draft_without_author_is_rejected() {
        let draft = BookDraft::default();
        assert!(matches!(draft.to_data(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_draft_from_detail() {
        let detail = BookDetail {
            book: Book {
                id: 5,
                title: "Emma".to_string(),
                author_id: 2,
                summary: "Matchmaking".to_string(),
                isbn: "9780141439587".to_string(),
            },
            author: None,
            genres: vec![Genre { id: 9, name: "Fiction".to_string() }],
        };
        let draft = BookDraft::from(&detail);
        assert_eq!(draft.id, Some(5));
        assert_eq!(draft.author, "2");
        assert_eq!(draft.genre, vec!["9".to_string()]);
        assert_eq!(detail.book.url(), "/catalog/book/5");
    }
}
