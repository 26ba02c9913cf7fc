//! Error types for the admin web interface.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use database::DatabaseError;
use inquiry::{InquiryError, Notice};
use thiserror::Error;

/// Errors that can occur in the admin web interface.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Inquiry workflow error.
    #[error(transparent)]
    Inquiry(#[from] InquiryError),

    /// Database error outside the inquiry workflow.
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Malformed request.
    #[error("{0}")]
    BadRequest(String),

    /// Page template failed to render.
    #[error("Template error: {0}")]
    Render(#[from] askama::Error),
}

impl From<JsonRejection> for AdminError {
    fn from(rejection: JsonRejection) -> Self {
        AdminError::BadRequest(rejection.body_text())
    }
}

impl AdminError {
    fn status(&self) -> StatusCode {
        match self {
            AdminError::BadRequest(_)
            | AdminError::Inquiry(InquiryError::Validation(_))
            | AdminError::Inquiry(InquiryError::InvalidTransition { .. })
            | AdminError::Database(DatabaseError::Validation(_)) => StatusCode::BAD_REQUEST,
            AdminError::Inquiry(InquiryError::NotFound { .. })
            | AdminError::Database(DatabaseError::NotFound { .. }) => StatusCode::NOT_FOUND,
            AdminError::Database(DatabaseError::AlreadyExists { .. }) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
            "Something went wrong. Please try again.".to_string()
        } else {
            tracing::warn!(error = %self, "Request rejected");
            self.to_string()
        };

        (status, Json(Notice::error(message))).into_response()
    }
}

/// Result type for admin operations.
pub type Result<T> = std::result::Result<T, AdminError>;
