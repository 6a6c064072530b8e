//! CoderForge.org API error types

use thiserror::Error;

/// Errors returned by [`ApiClient`](crate::ApiClient) operations.
///
/// None of these are retried; the caller surfaces them and the operator
/// re-runs the operation.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a complete response (connect, timeout,
    /// or a failure while reading the body).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("status: {status}, body: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("API response did not contain a resource item")]
    EmptyResponse,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ApiError {
    /// HTTP status code, when the server answered with a non-2xx status.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
