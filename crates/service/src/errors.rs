use thiserror::Error;

use models::errors::ModelError;

pub const MSG_BOOK_NOT_FOUND: &str = "book not found";
pub const MSG_BOOK_EXISTS: &str = "Book already exist";

/// Failure taxonomy surfaced to handlers. `Display` is the client-facing message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
}

impl ServiceError {
    pub fn invalid(msg: impl Into<String>) -> Self { Self::InvalidArgument(msg.into()) }
    pub fn book_not_found() -> Self { Self::NotFound(MSG_BOOK_NOT_FOUND.into()) }
    pub fn book_exists() -> Self { Self::Conflict(MSG_BOOK_EXISTS.into()) }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => Self::InvalidArgument(msg),
        }
    }
}
