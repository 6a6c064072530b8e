//! Resource operation error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResourceError {
    #[error(transparent)]
    Api(#[from] coderforge_cloud::ApiError),

    #[error("invalid resource state: {0}")]
    State(#[from] serde_json::Error),

    #[error("resource state has no id")]
    MissingId,
}

pub type Result<T> = std::result::Result<T, ResourceError>;
