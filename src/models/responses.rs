//! Response DTOs for the clipboard API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

/// Message returned with every successful save
pub const SAVED_MESSAGE: &str = "Saved successfully";

/// Response body for the save operation (POST /save)
#[derive(Debug, Clone, Serialize)]
pub struct SaveResponse {
    /// Success message
    pub message: String,
    /// The generated key
    pub key: String,
}

impl SaveResponse {
    /// Creates a new SaveResponse
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            message: SAVED_MESSAGE.to_string(),
            key: key.into(),
        }
    }
}

/// Response body for the retrieve operation (GET /get/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The stored value
    pub data: String,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(data: impl Into<String>) -> Self {
        Self { data: data.into() }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
