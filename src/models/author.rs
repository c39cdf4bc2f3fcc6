//! Author model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::format_medium_date;
use crate::{
    error::{AppError, AppResult},
    validation::Sanitized,
};

/// Full author model from the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// Display name, "family, first"
    pub fn name(&self) -> String {
        format!("{}, {}", self.family_name, self.first_name)
    }

    pub fn lifespan(&self) -> String {
        let Some(born) = self.date_of_birth else {
            return "No birth details available.".to_string();
        };

        match self.date_of_death {
            Some(died) => format!("{} - {}", format_medium_date(born), format_medium_date(died)),
            None => format!("{} - present", format_medium_date(born)),
        }
    }

    pub fn url(&self) -> String {
        author_url(self.id)
    }

    pub fn date_of_birth_yyyy_mm_dd(&self) -> String {
        iso_date(self.date_of_birth)
    }

    pub fn date_of_death_yyyy_mm_dd(&self) -> String {
        iso_date(self.date_of_death)
    }
}

pub fn author_url(id: i32) -> String {
    format!("/catalog/author/{}", id)
}

fn iso_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Author fields written to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorData {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

/// Author form contents, echoed back on re-render
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorDraft {
    pub id: Option<i32>,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: String,
    pub date_of_death: String,
    born: Option<NaiveDate>,
    died: Option<NaiveDate>,
}

impl AuthorDraft {
    pub fn from_submission(form: &Sanitized, id: Option<i32>) -> Self {
        Self {
            id,
            first_name: form.value("first_name"),
            family_name: form.value("family_name"),
            date_of_birth: form.value("date_of_birth"),
            date_of_death: form.value("date_of_death"),
            born: form.date("date_of_birth"),
            died: form.date("date_of_death"),
        }
    }

    /// Payload for the store; only meaningful once validation passed
    pub fn to_data(&self) -> AppResult<AuthorData> {
        if self.first_name.is_empty() || self.family_name.is_empty() {
            return Err(AppError::BadRequest("Author names are required".to_string()));
        }

        Ok(AuthorData {
            first_name: self.first_name.clone(),
            family_name: self.family_name.clone(),
            date_of_birth: self.born,
            date_of_death: self.died,
        })
    }
}

impl From<&Author> for AuthorDraft {
    fn from(author: &Author) -> Self {
        Self {
            id: Some(author.id),
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            date_of_birth: author.date_of_birth_yyyy_mm_dd(),
            date_of_death: author.date_of_death_yyyy_mm_dd(),
            born: author.date_of_birth,
            died: author.date_of_death,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author(born: Option<NaiveDate>, died: Option<NaiveDate>) -> Author {
        Author {
            id: 7,
            first_name: "Jane".to_string(),
            family_name: "Austen".to_string(),
            date_of_birth: born,
            date_of_death: died,
        }
    }

    #[test]
    fn test_name_and_url() {
        let a = author(None, None);
        assert_eq!(a.name(), "Austen, Jane");
        assert_eq!(a.url(), "/catalog/author/7");
    }

    #[test]
    fn test_lifespan_without_birth() {
        let died = NaiveDate::from_ymd_opt(1817, 7, 18);
        assert_eq!(author(None, died).lifespan(), "No birth details available.");
    }

    #[test]
    fn test_lifespan_full_and_open() {
        let born = NaiveDate::from_ymd_opt(1775, 12, 16);
        let died = NaiveDate::from_ymd_opt(1817, 7, 18);
        assert_eq!(author(born, died).lifespan(), "Dec 16, 1775 - Jul 18, 1817");
        assert_eq!(author(born, None).lifespan(), "Dec 16, 1775 - present");
    }

    #[test]
    fn test_iso_dates_for_forms() {
        let a = author(NaiveDate::from_ymd_opt(1775, 12, 16), None);
        assert_eq!(a.date_of_birth_yyyy_mm_dd(), "1775-12-16");
        assert_eq!(a.date_of_death_yyyy_mm_dd(), "");

        let draft = AuthorDraft::from(&a);
        assert_eq!(draft.id, Some(7));
        assert_eq!(draft.date_of_birth, "1775-12-16");
        assert_eq!(draft.to_data().unwrap().date_of_birth, a.date_of_birth);
    }
}
