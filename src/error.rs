use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

use crate::views;

#[derive(Debug, ThisError)]
pub enum TrackerError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Invalid salary {0:?}")]
    InvalidSalary(String),

    #[error("Invalid application date {0:?}")]
    InvalidDate(String),

    #[error("Missing form field {0:?}")]
    MissingField(&'static str),

    #[error("Not found")]
    NotFound,
}

impl IntoResponse for TrackerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            TrackerError::NotFound => (
                StatusCode::NOT_FOUND,
                "The requested page could not be found.",
            ),
            TrackerError::InvalidSalary(_)
            | TrackerError::InvalidDate(_)
            | TrackerError::MissingField(_) => {
                error!(error = %self, "rejected malformed application form");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "The submitted application could not be processed.",
                )
            }
            TrackerError::DatabaseError(_)
            | TrackerError::PasswordHash(_)
            | TrackerError::UsernameTaken(_) => {
                error!(error = %self, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.",
                )
            }
        };
        (status, views::error_page(status, message)).into_response()
    }
}
