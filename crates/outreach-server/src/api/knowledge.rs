use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use outreach_core::knowledge::Metadata;
use outreach_core::models::IndustryType;
use outreach_core::{AppState, ServerError};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(query_knowledge).post(add_knowledge))
}

#[derive(Debug, Deserialize)]
struct KnowledgeQuery {
    query: String,
    industry: IndustryType,
    top_k: Option<usize>,
}

async fn query_knowledge(
    State(state): State<AppState>,
    Query(q): Query<KnowledgeQuery>,
) -> Json<serde_json::Value> {
    let top_k = q.top_k.unwrap_or_else(|| state.knowledge.default_top_k());
    let context = state
        .knowledge
        .query(&q.query, q.industry.as_str(), top_k)
        .await;
    Json(serde_json::json!({ "context": context }))
}

#[derive(Debug, Deserialize)]
struct AddKnowledgeBody {
    text: String,
    industry: IndustryType,
    metadata: Option<Metadata>,
}

/// POST /api/knowledge — index a new fact; `id` is null without a vector index
async fn add_knowledge(
    State(state): State<AppState>,
    Json(body): Json<AddKnowledgeBody>,
) -> Result<Json<serde_json::Value>, ServerError> {
    if body.text.trim().is_empty() {
        return Err(ServerError::BadRequest("text must not be empty".to_string()));
    }
    let id = state
        .knowledge
        .add_knowledge(&body.text, body.industry.as_str(), body.metadata)
        .await;
    Ok(Json(serde_json::json!({ "id": id })))
}
