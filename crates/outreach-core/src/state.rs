//! Shared application state for the server and the CLI.

use std::sync::Arc;

use crate::config::OutreachConfig;
use crate::db::Database;
use crate::error::ServerError;
use crate::generator::OutreachGenerator;
use crate::knowledge::KnowledgeBase;
use crate::llm::{ChatCompletionsClient, HttpEmbedder, LlmClient};
use crate::senders::{CallScheduler, EmailSender, HttpCallScheduler, SmtpEmailSender};
use crate::store::{HistoryStore, ProspectStore};
use crate::workflow::OutreachWorkflow;

/// Shared state accessible by all API handlers.
pub struct AppStateInner {
    pub db: Database,
    pub prospect_store: ProspectStore,
    pub history_store: HistoryStore,
    pub knowledge: KnowledgeBase,
    pub call_scheduler: Arc<dyn CallScheduler>,
    pub workflow: Arc<OutreachWorkflow>,
}

pub type AppState = Arc<AppStateInner>;

impl AppStateInner {
    /// Wire the stores and workflow around already-built backends.
    pub fn new(
        db: Database,
        llm: LlmClient,
        knowledge: KnowledgeBase,
        email_sender: Arc<dyn EmailSender>,
        call_scheduler: Arc<dyn CallScheduler>,
    ) -> Self {
        let prospect_store = ProspectStore::new(db.clone());
        let history_store = HistoryStore::new(db.clone());
        let generator = OutreachGenerator::new(llm, knowledge.clone());
        let workflow = OutreachWorkflow::new(
            prospect_store.clone(),
            history_store.clone(),
            generator,
            email_sender,
            call_scheduler.clone(),
        );
        Self {
            db,
            prospect_store,
            history_store,
            knowledge,
            call_scheduler,
            workflow: Arc::new(workflow),
        }
    }

    /// Open the data file and build the HTTP/SMTP backends from `config`.
    pub fn from_config(config: &OutreachConfig) -> Result<Self, ServerError> {
        let db = Database::open(&config.data_file)?;

        let generator = ChatCompletionsClient::new(&config.llm)
            .map_err(|e| ServerError::Internal(e.to_string()))?;
        if config.llm.api_key.is_empty() {
            tracing::warn!("LLM API key not set; generated content will use the fallback text");
        }
        let mut llm = LlmClient::new(Arc::new(generator), config.llm.clone());
        if let Some(embedder) = HttpEmbedder::from_config(&config.embedding) {
            llm = llm.with_embedder(Arc::new(embedder), config.embedding.dimension);
        }

        let knowledge = KnowledgeBase::from_config(&config.knowledge, llm.clone());
        tracing::info!(
            "Knowledge lookup: {}",
            if knowledge.is_semantic() { "semantic" } else { "static" }
        );

        let email_sender = SmtpEmailSender::new(config.smtp.clone());
        if email_sender.is_dry_run() {
            tracing::warn!("SMTP credentials not set; emails will be logged, not sent");
        }
        let call_scheduler = HttpCallScheduler::new(config.call.clone());
        if call_scheduler.is_dry_run() {
            tracing::warn!("Call API key not set; calls will be logged, not placed");
        }

        Ok(Self::new(
            db,
            llm,
            knowledge,
            Arc::new(email_sender),
            Arc::new(call_scheduler),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn from_config_opens_data_file_with_dry_run_backends() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = OutreachConfig {
            data_file: dir.path().join("nested").join("prospects.json"),
            ..OutreachConfig::default()
        };
        config.llm.retry_delay = Duration::ZERO;

        let state = AppStateInner::from_config(&config).unwrap();
        assert!(config.data_file.exists());
        assert!(!state.knowledge.is_semantic());
        assert!(state.prospect_store.list(&Default::default()).await.unwrap().is_empty());
    }
}
