//! Error types for the clipboard server
//!
//! Maps internal failures onto HTTP status codes. Dependency failures are
//! logged here and reach the client only as a generic message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::keygen::KeygenError;
use crate::models::ErrorResponse;
use crate::store::StoreError;

// == Api Error Enum ==
/// Unified error type for the request handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed body, empty value or empty key
    #[error("{0}")]
    InvalidRequest(String),

    /// Key absent or expired
    #[error("Invalid Key")]
    NotFound,

    /// Random source or existence check failed while generating a key
    #[error("Failed to generate key")]
    KeyGeneration(#[source] KeygenError),

    /// Store write failed during a save
    #[error("Failed to save data")]
    SaveFailed(#[source] StoreError),

    /// Store read failed during a retrieve
    #[error("Server error")]
    Store(#[source] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::KeyGeneration(_) | ApiError::SaveFailed(_) | ApiError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            if let Some(source) = std::error::Error::source(&self) {
                error!(error = %source, "{}", self);
            }
        }

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the request handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
