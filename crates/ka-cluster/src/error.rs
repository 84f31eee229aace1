//! Cluster access error types.

use thiserror::Error;

/// Errors returned by a `ClusterClient`.
#[derive(Debug, Error)]
pub enum ClusterError {
    /// The named object does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The API server answered with a non-success status.
    #[error("api server returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("http error: {0}")]
    Http(String),

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("invalid cluster configuration: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl ClusterError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Convenience alias for cluster results.
pub type ClusterResult<T> = Result<T, ClusterError>;
