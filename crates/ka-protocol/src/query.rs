use serde::{Deserialize, Serialize};

/// Inbound body of `POST /query`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Free-text question about the cluster. Absent means empty.
    #[serde(default)]
    pub query: String,
}

/// Successful answer to a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResponse {
    /// The question exactly as received.
    pub query: String,
    /// Natural-language answer.
    pub answer: String,
}

/// Machine-checkable failure category returned to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The cluster client failed to initialize at startup.
    ClusterUnavailable,
    /// The intent classifier call failed.
    ClassifierFailure,
    /// Anything else; details stay in the server log.
    InternalError,
    /// The request body could not be read.
    BadRequest,
}

/// Body of every failed response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: ErrorCode,
    pub status: u16,
}
