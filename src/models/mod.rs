//! Data models for the catalog

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;

use chrono::NaiveDate;

// Re-export commonly used types
pub use author::{Author, AuthorData, AuthorDraft};
pub use book::{Book, BookData, BookDetail, BookDraft, BookListing, BookOption, BookOverview};
pub use book_instance::{
    BookInstance, BookInstanceData, BookInstanceDetail, BookInstanceDraft, BookStatus,
};
pub use genre::{Genre, GenreDraft};

/// Medium date format used on pages, e.g. "Jan 5, 1990"
pub fn format_medium_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Catalog totals shown on the home page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogCounts {
    pub books: i64,
    pub book_instances: i64,
    pub book_instances_available: i64,
    pub authors: i64,
    pub genres: i64,
}
