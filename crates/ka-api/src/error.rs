//! Unified API error type with Axum `IntoResponse` support.
//!
//! Callers only ever see a short fixed message and an `ErrorCode`; the
//! underlying detail goes to the log.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ka_dispatch::PipelineError;
use ka_protocol::{ErrorCode, ErrorResponse};

/// API error type that converts to proper HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("cluster client not initialized")]
    ClusterUnavailable,

    #[error("classifier failure: {0}")]
    Classifier(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::ClusterUnavailable => Self::ClusterUnavailable,
            PipelineError::Classifier(e) => Self::Classifier(e.to_string()),
            PipelineError::Cluster(e) => Self::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::ClusterUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorCode::ClusterUnavailable,
                "Kubernetes client not initialized".to_string(),
            ),
            ApiError::Classifier(_) => (
                StatusCode::BAD_GATEWAY,
                ErrorCode::ClassifierFailure,
                "Intent classifier error occurred".to_string(),
            ),
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadRequest, msg.clone())
            }
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "unexpected error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::InternalError,
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            error: message,
            code,
            status: status.as_u16(),
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Convenience alias.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use ka_cluster::ClusterError;
    use ka_dispatch::ClassifyError;

    async fn body_json(response: Response) -> serde_json::Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn cluster_unavailable_response() {
        let response = ApiError::ClusterUnavailable.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let json = body_json(response).await;
        assert_eq!(json["code"], "cluster_unavailable");
        assert_eq!(json["status"], 503);
        assert_eq!(json["error"], "Kubernetes client not initialized");
    }

    #[tokio::test]
    async fn classifier_response_hides_detail() {
        let err: ApiError =
            PipelineError::Classifier(ClassifyError::Http("dns error: api.openai.com".into()))
                .into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json = body_json(response).await;
        assert_eq!(json["code"], "classifier_failure");
        assert!(!json["error"].as_str().unwrap().contains("openai.com"));
    }

    #[tokio::test]
    async fn cluster_error_is_internal_and_generic() {
        let err: ApiError = PipelineError::Cluster(ClusterError::Api {
            status: 403,
            message: "secrets is forbidden".into(),
        })
        .into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["code"], "internal_error");
        assert_eq!(json["error"], "An unexpected error occurred");
    }

    #[tokio::test]
    async fn bad_request_response() {
        let response = ApiError::BadRequest("missing body".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "bad_request");
    }
}
