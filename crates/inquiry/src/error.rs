//! Workflow error types.

use database::{ContactStatus, DatabaseError, ValidationError};
use thiserror::Error;

/// Errors that stop an inquiry action before or during its first write.
#[derive(Debug, Error)]
pub enum InquiryError {
    /// Input rejected before any side effect.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The status change is not allowed from the contact's current status.
    #[error("cannot move contact {id} from {from} to {to}")]
    InvalidTransition {
        id: i64,
        from: ContactStatus,
        to: ContactStatus,
    },

    /// Record not found.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Stored email content could not be encoded.
    #[error("invalid email content: {0}")]
    Content(#[from] serde_json::Error),

    /// Any other database failure.
    #[error(transparent)]
    Database(DatabaseError),
}

impl From<DatabaseError> for InquiryError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Validation(v) => InquiryError::Validation(v),
            DatabaseError::NotFound { entity, id } => InquiryError::NotFound { entity, id },
            other => InquiryError::Database(other),
        }
    }
}

/// Result type for inquiry operations.
pub type Result<T> = std::result::Result<T, InquiryError>;
