use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use outreach_core::models::{CreateProspectInput, OutreachChannel, ProspectFilter};
use outreach_core::{AppState, ServerError};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_prospects).post(create_prospect))
        .route("/{id}", get(get_prospect))
        .route("/{id}/history", get(get_prospect_history))
        .route("/{id}/outreach", post(run_outreach))
}

async fn list_prospects(
    State(state): State<AppState>,
    Query(filter): Query<ProspectFilter>,
) -> Result<Json<serde_json::Value>, ServerError> {
    let prospects = state.prospect_store.list(&filter).await?;
    Ok(Json(serde_json::json!(prospects)))
}

/// POST /api/prospects — store the prospect and start outreach in the background
async fn create_prospect(
    State(state): State<AppState>,
    Json(body): Json<CreateProspectInput>,
) -> Result<Json<serde_json::Value>, ServerError> {
    let prospect = state.prospect_store.create(body).await?;
    let prospect_id = prospect.id.clone();

    let workflow = state.workflow.clone();
    tokio::spawn(async move {
        let advice = workflow.process_prospect(&prospect, None).await;
        tracing::info!("Engagement advice for {}:\n{}", prospect.company_name, advice);
    });

    Ok(Json(serde_json::json!({
        "message": "Prospect added and processing started",
        "prospect_id": prospect_id,
    })))
}

async fn get_prospect(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServerError> {
    match state.prospect_store.get(&id).await? {
        Some(p) => Ok(Json(serde_json::json!(p))),
        None => Err(ServerError::NotFound("Prospect not found".to_string())),
    }
}

/// GET /api/prospects/{id}/history — oldest first; empty for unknown ids
async fn get_prospect_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServerError> {
    let history = state.history_store.list_by_prospect(&id).await?;
    Ok(Json(serde_json::json!(history)))
}

#[derive(Debug, Default, Deserialize)]
struct OutreachRequest {
    channel: Option<OutreachChannel>,
}

/// POST /api/prospects/{id}/outreach — run the workflow now and return the advice
async fn run_outreach(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Option<Json<OutreachRequest>>,
) -> Result<Json<serde_json::Value>, ServerError> {
    let channel = body.and_then(|Json(b)| b.channel);
    let advice = state
        .workflow
        .process_prospect_by_id(&id, channel)
        .await
        .map_err(|e| match e {
            ServerError::NotFound(_) => ServerError::NotFound("Prospect not found".to_string()),
            other => other,
        })?;
    Ok(Json(serde_json::json!({
        "prospect_id": id,
        "advice": advice,
    })))
}
