//! Core error types for the outreach backend.
//!
//! `ServerError` is used by the stores and the workflow entry points. When
//! the `axum` feature is enabled it also implements `IntoResponse` so it can
//! be returned directly from axum handlers.

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failures from the text-generation and embedding backends.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Misconfiguration: {0}")]
    Misconfiguration(String),
}

/// Failures from the semantic lookup backend.
#[derive(Debug, thiserror::Error)]
pub enum KnowledgeError {
    #[error("Vector index not initialized")]
    NotInitialized,

    #[error("Vector index request failed: {0}")]
    Request(String),

    #[error("Vector index returned {status}: {body}")]
    Api { status: u16, body: String },
}

// ---------------------------------------------------------------------------
// axum integration (opt-in via feature flag)
// ---------------------------------------------------------------------------

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let (status, message) = match &self {
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ServerError::Storage(msg) | ServerError::Internal(msg) => {
                tracing::error!("Request failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}
