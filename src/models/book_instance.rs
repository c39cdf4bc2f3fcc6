//! Book instance (physical copy) model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{book::BookOption, format_medium_date};
use crate::{
    error::{AppError, AppResult},
    validation::Sanitized,
};

/// Circulation status of a copy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "book_status")]
pub enum BookStatus {
    Available,
    #[default]
    Maintenance,
    Loaned,
    Reserved,
}

impl BookStatus {
    pub const ALL: [BookStatus; 4] = [
        BookStatus::Available,
        BookStatus::Maintenance,
        BookStatus::Loaned,
        BookStatus::Reserved,
    ];

    /// Names accepted on the form
    pub const NAMES: [&'static str; 4] = ["Available", "Maintenance", "Loaned", "Reserved"];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "Available",
            BookStatus::Maintenance => "Maintenance",
            BookStatus::Loaned => "Loaned",
            BookStatus::Reserved => "Reserved",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

impl std::fmt::Display for BookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full book instance record from the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct BookInstance {
    pub id: i32,
    pub book_id: i32,
    pub imprint: String,
    pub status: BookStatus,
    pub due_back: Option<NaiveDate>,
}

impl BookInstance {
    pub fn url(&self) -> String {
        book_instance_url(self.id)
    }

    pub fn due_back_formatted(&self) -> String {
        self.due_back.map(format_medium_date).unwrap_or_default()
    }

    pub fn due_back_yyyy_mm_dd(&self) -> String {
        self.due_back
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}

pub fn book_instance_url(id: i32) -> String {
    format!("/catalog/bookinstance/{}", id)
}

/// Book instance with the referenced book populated (id and title)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookInstanceDetail {
    pub instance: BookInstance,
    pub book: Option<BookOption>,
}

/// Book instance fields written to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookInstanceData {
    pub book_id: i32,
    pub imprint: String,
    pub status: BookStatus,
    pub due_back: Option<NaiveDate>,
}

/// Book instance form contents, echoed back on re-render
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookInstanceDraft {
    pub id: Option<i32>,
    pub book: String,
    pub imprint: String,
    pub status: String,
    pub due_back: String,
    due: Option<NaiveDate>,
}

impl BookInstanceDraft {
    pub fn from_submission(form: &Sanitized, id: Option<i32>) -> Self {
        Self {
            id,
            book: form.value("book"),
            imprint: form.value("imprint"),
            status: form.value("status"),
            due_back: form.value("due_back"),
            due: form.date("due_back"),
        }
    }

    pub fn book_id(&self) -> Option<i32> {
        self.book.parse().ok()
    }

    /// Status chosen on the form, falling back to the default when none was sent
    pub fn status(&self) -> BookStatus {
        BookStatus::parse(&self.status).unwrap_or_default()
    }

    pub fn to_data(&self) -> AppResult<BookInstanceData> {
        let book_id = self
            .book_id()
            .ok_or_else(|| AppError::BadRequest(format!("Invalid book reference '{}'", self.book)))?;

        Ok(BookInstanceData {
            book_id,
            imprint: self.imprint.clone(),
            status: self.status(),
            due_back: self.due,
        })
    }
}

impl From<&BookInstance> for BookInstanceDraft {
    fn from(instance: &BookInstance) -> Self {
        Self {
            id: Some(instance.id),
            book: instance.book_id.to_string(),
            imprint: instance.imprint.clone(),
            status: instance.status.as_str().to_string(),
            due_back: instance.due_back_yyyy_mm_dd(),
            due: instance.due_back,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!(BookStatus::parse("Loaned"), Some(BookStatus::Loaned));
        assert_eq!(BookStatus::parse("loaned"), None);
        assert_eq!(BookStatus::default(), BookStatus::Maintenance);
        assert_eq!(BookStatus::NAMES.len(), BookStatus::ALL.len());
    }

    #[test]
    fn test_due_back_formats() {
        let instance = BookInstance {
            id: 11,
            book_id: 3,
            imprint: "Penguin".to_string(),
            status: BookStatus::Loaned,
            due_back: NaiveDate::from_ymd_opt(2024, 3, 9),
        };
        assert_eq!(instance.url(), "/catalog/bookinstance/11");
        assert_eq!(instance.due_back_formatted(), "Mar 9, 2024");
        assert_eq!(instance.due_back_yyyy_mm_dd(), "2024-03-09");

        let draft = BookInstanceDraft::from(&instance);
        let data = draft.to_data().unwrap();
        assert_eq!(data.book_id, 3);
        assert_eq!(data.status, BookStatus::Loaned);
        assert_eq!(data.due_back, instance.due_back);
    }

    #[test]
    fn test_draft_defaults_status() {
        let draft = BookInstanceDraft {
            book: "4".to_string(),
            imprint: "Penguin".to_string(),
            ..Default::default()
        };
        assert_eq!(draft.status(), BookStatus::Maintenance);
        assert_eq!(draft.to_data().unwrap().due_back, None);
    }
}
