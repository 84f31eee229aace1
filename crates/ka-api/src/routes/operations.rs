//! Operation catalog endpoint.

use axum::Json;
use ka_protocol::{OperationId, ParameterKind};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct OperationInfo {
    pub id: OperationId,
    pub description: &'static str,
    pub parameter: Option<ParameterKind>,
    /// Phrase the entity must follow in the question.
    pub marker: Option<&'static str>,
}

/// GET /operations: the recognized operations in routing precedence order.
pub async fn list_operations() -> Json<Vec<OperationInfo>> {
    Json(
        OperationId::RECOGNIZED
            .iter()
            .map(|&id| OperationInfo {
                id,
                description: id.description(),
                parameter: id.parameter(),
                marker: id.parameter().map(|kind| kind.marker()),
            })
            .collect(),
    )
}
