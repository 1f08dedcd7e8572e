//! Outreach Core — transport-agnostic domain logic for the insurance outreach backend.
//!
//! This crate holds the prospect and history models, the JSON document store,
//! LLM-backed content generation, knowledge lookup, delivery channels and the
//! outreach workflow. It has **no HTTP framework dependency** by default, so
//! it is shared by:
//!
//! - the HTTP server (via `outreach-server`)
//! - the command-line tool (via `outreach-cli`)
//!
//! # Feature Flags
//!
//! - `axum` — Enables `IntoResponse` impl on `ServerError` for use in axum handlers.

pub mod config;
pub mod db;
pub mod error;
pub mod generator;
pub mod knowledge;
pub mod llm;
pub mod models;
pub mod senders;
pub mod state;
pub mod store;
pub mod workflow;

// Convenience re-exports
pub use config::OutreachConfig;
pub use db::Database;
pub use error::ServerError;
pub use state::{AppState, AppStateInner};
pub use workflow::OutreachWorkflow;
