use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::Deserialize;

use outreach_core::generator::CallScript;
use outreach_core::models::Prospect;
use outreach_core::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(schedule_call))
}

#[derive(Debug, Deserialize)]
struct ScheduleCallBody {
    prospect: Prospect,
    script: CallScript,
    history_id: String,
}

/// POST /api/schedule_call — hand a script straight to the call provider
async fn schedule_call(
    State(state): State<AppState>,
    Json(body): Json<ScheduleCallBody>,
) -> (StatusCode, Json<serde_json::Value>) {
    let ok = state
        .call_scheduler
        .schedule_call(&body.prospect, &body.script, &body.history_id)
        .await;

    if ok {
        (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": "Call scheduled successfully",
                "history_id": body.history_id,
            })),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": "Call scheduling failed" })),
        )
    }
}
