//! Intent classifier seam.
//!
//! A classifier turns the raw question into a short analysis text that the
//! router scans for key phrases. Network-backed implementations live in the
//! API crate; `EchoClassifier` is the zero-cost local fallback.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("http error: {0}")]
    Http(String),

    #[error("classifier returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("classifier timed out after {0}s")]
    Timeout(u64),

    #[error("classifier returned no text")]
    EmptyResponse,

    #[error("failed to decode classifier response: {0}")]
    Decode(String),

    #[error("classifier misconfigured: {0}")]
    Config(String),
}

/// Produces the analysis text the router matches against.
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    async fn classify(&self, query: &str) -> Result<String, ClassifyError>;

    /// Name of the backend (for logging and the health endpoint).
    fn name(&self) -> &str;
}

/// Uses the question itself as the analysis text.
///
/// Works when operators phrase questions with the router's key phrases
/// ("what is the status of the pod named web-1?").
pub struct EchoClassifier;

impl EchoClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EchoClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IntentClassifier for EchoClassifier {
    async fn classify(&self, query: &str) -> Result<String, ClassifyError> {
        Ok(query.trim().to_string())
    }

    fn name(&self) -> &str {
        "echo"
    }
}
