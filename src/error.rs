//! Error types for the catalog server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::views::{layout::ErrorPage, View};

/// Failure classes surfaced at the error boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    StoreFailure,
    BadRequest,
    Internal,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::Database(_) | AppError::Store(_) => ErrorKind::StoreFailure,
            AppError::BadRequest(_) => ErrorKind::BadRequest,
            AppError::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::StoreFailure | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Only the status and a generic message reach the page; details stay in the logs.
        let message = match self.kind() {
            ErrorKind::NotFound => {
                tracing::warn!("{}", self);
                "The requested record does not exist."
            }
            ErrorKind::BadRequest => {
                tracing::warn!("{}", self);
                "The submitted data could not be processed."
            }
            ErrorKind::StoreFailure => {
                tracing::error!("Store failure: {:?}", self);
                "The catalog is temporarily unavailable."
            }
            ErrorKind::Internal => {
                tracing::error!("Internal error: {}", self);
                "Internal server error"
            }
        };

        let page = View::Error(ErrorPage {
            status,
            message: message.to_string(),
        });

        (status, page).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
