//! The question endpoint.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use ka_protocol::{QueryRequest, QueryResponse};
use tracing::Instrument;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// POST /query: answer one natural-language cluster question.
pub async fn answer_query(
    State(state): State<AppState>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> ApiResult<Json<QueryResponse>> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let span = tracing::info_span!("query", request_id = %Uuid::now_v7());
    async move {
        tracing::info!(query = %request.query, "received query");
        let response = state.pipeline.answer(&request.query).await?;
        Ok::<_, ApiError>(Json(response))
    }
    .instrument(span)
    .await
}
