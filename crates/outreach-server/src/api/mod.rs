pub mod calls;
pub mod history;
pub mod knowledge;
pub mod prospects;

use axum::Router;

use outreach_core::AppState;

/// Build the complete API router with all sub-routes.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .nest("/api/prospects", prospects::router())
        .nest("/api/history", history::router())
        .nest("/api/schedule_call", calls::router())
        .nest("/api/knowledge", knowledge::router())
}
