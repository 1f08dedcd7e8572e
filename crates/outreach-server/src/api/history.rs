use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use serde::Deserialize;

use outreach_core::{AppState, ServerError};

pub fn router() -> Router<AppState> {
    Router::new().route("/{id}/response", post(record_response))
}

#[derive(Debug, Deserialize)]
struct ResponseBody {
    response: String,
}

/// POST /api/history/{id}/response — record the prospect's reply
async fn record_response(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ResponseBody>,
) -> Result<Json<serde_json::Value>, ServerError> {
    match state.history_store.record_response(&id, body.response).await? {
        Some(h) => Ok(Json(serde_json::json!(h))),
        None => Err(ServerError::NotFound("History not found".to_string())),
    }
}
