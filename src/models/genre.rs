//! Genre model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{
    error::{AppError, AppResult},
    validation::Sanitized,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

impl Genre {
    pub fn url(&self) -> String {
        genre_url(self.id)
    }
}

pub fn genre_url(id: i32) -> String {
    format!("/catalog/genre/{}", id)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreDraft {
    pub id: Option<i32>,
    pub name: String,
}

impl GenreDraft {
    pub fn from_submission(form: &Sanitized, id: Option<i32>) -> Self {
        Self {
            id,
            name: form.value("name"),
        }
    }

    pub fn to_name(&self) -> AppResult<&str> {
        if self.name.is_empty() {
            return Err(AppError::BadRequest("Genre name is required".to_string()));
        }
        Ok(&self.name)
    }
}

impl From<&Genre> for GenreDraft {
    fn from(genre: &Genre) -> Self {
        Self {
            id: Some(genre.id),
            name: genre.name.clone(),
        }
    }
}
