//! Health check endpoint.

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::state::AppState;

/// GET /health: liveness plus backend availability.
///
/// Always 200: a server without a cluster client is alive but degraded.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let cluster = if state.pipeline.cluster_available() {
        "available"
    } else {
        "unavailable"
    };
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "cluster": cluster,
        "classifier": state.pipeline.classifier_name(),
    }))
}
