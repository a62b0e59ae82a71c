use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use service::ServiceError;
use thiserror::Error;

use crate::response::PrettyJson;

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

/// Error response rendered as `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: String,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Mapping for PUT and DELETE, where a missing book is reported as 400.
    pub fn not_found_as_bad_request(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(msg) => Self::bad_request(msg),
            other => other.into(),
        }
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        let status = match &e {
            ServiceError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
        };
        Self::new(status, e.to_string())
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, PrettyJson(ErrorBody { error: &self.message })).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}
