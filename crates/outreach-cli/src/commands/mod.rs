//! CLI command implementations.
//!
//! Each submodule corresponds to a top-level CLI command and reuses
//! the outreach-core domain logic through `AppState`.

pub mod knowledge;
pub mod process;
pub mod prospect;
pub mod server;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use outreach_core::config::{
    CallConfig, EmbeddingConfig, KnowledgeConfig, LlmConfig, OutreachConfig, SmtpConfig,
};
use outreach_core::models::{EngagementLevel, IndustryType, OutreachChannel};
use outreach_core::state::{AppState, AppStateInner};

/// Backend settings, resolved from flags or the environment.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Path to the JSON data file
    #[arg(long, env = "OUTREACH_DATA_FILE", default_value = "data/prospects.json")]
    pub data_file: PathBuf,

    /// API key for the chat-completions endpoint
    #[arg(long, env = "GROQ_API_KEY", default_value = "", hide_env_values = true)]
    pub llm_api_key: String,
    #[arg(long, env = "LLM_BASE_URL", default_value = "https://api.groq.com/openai/v1")]
    pub llm_base_url: String,
    #[arg(long, env = "LLM_MODEL", default_value = "llama3-70b-8192")]
    pub llm_model: String,

    /// OpenAI-compatible embeddings endpoint; semantic lookup is off without it
    #[arg(long, env = "EMBEDDING_BASE_URL")]
    pub embedding_base_url: Option<String>,
    #[arg(long, env = "EMBEDDING_API_KEY", default_value = "", hide_env_values = true)]
    pub embedding_api_key: String,

    #[arg(long, env = "PINECONE_API_KEY", default_value = "", hide_env_values = true)]
    pub pinecone_api_key: String,
    /// Data-plane host of the knowledge index
    #[arg(long, env = "PINECONE_INDEX_HOST")]
    pub pinecone_index_host: Option<String>,

    #[arg(long, env = "SMTP_SERVER", default_value = "smtp.gmail.com")]
    pub smtp_server: String,
    #[arg(long, env = "SMTP_PORT", default_value_t = 587)]
    pub smtp_port: u16,
    #[arg(long, env = "SMTP_USERNAME", default_value = "")]
    pub smtp_username: String,
    #[arg(long, env = "SMTP_PASSWORD", default_value = "", hide_env_values = true)]
    pub smtp_password: String,
    #[arg(long, env = "SENDER_EMAIL", default_value = "")]
    pub sender_email: String,
    #[arg(long, env = "SENDER_NAME", default_value = "Insurance Solutions")]
    pub sender_name: String,
    #[arg(long, env = "TRACKING_DOMAIN", default_value = "track.insuranceco.com")]
    pub tracking_domain: String,

    #[arg(long, env = "CALL_API_KEY", default_value = "", hide_env_values = true)]
    pub call_api_key: String,
    #[arg(long, env = "CALL_API_URL", default_value = "https://api.callservice.com")]
    pub call_api_url: String,
    #[arg(long, env = "CALLER_ID", default_value = "")]
    pub caller_id: String,
    /// Base URL the call provider reports status back to
    #[arg(long, env = "CALLBACK_BASE_URL", default_value = "https://api.yourapp.com")]
    pub callback_base_url: String,
}

impl ConfigArgs {
    pub fn to_config(&self) -> OutreachConfig {
        OutreachConfig {
            data_file: self.data_file.clone(),
            llm: LlmConfig {
                base_url: self.llm_base_url.clone(),
                api_key: self.llm_api_key.clone(),
                model: self.llm_model.clone(),
                ..LlmConfig::default()
            },
            embedding: EmbeddingConfig {
                base_url: self.embedding_base_url.clone(),
                api_key: self.embedding_api_key.clone(),
                ..EmbeddingConfig::default()
            },
            knowledge: KnowledgeConfig {
                index_host: self.pinecone_index_host.clone(),
                api_key: self.pinecone_api_key.clone(),
                ..KnowledgeConfig::default()
            },
            smtp: SmtpConfig {
                server: self.smtp_server.clone(),
                port: self.smtp_port,
                username: self.smtp_username.clone(),
                password: self.smtp_password.clone(),
                sender_email: self.sender_email.clone(),
                sender_name: self.sender_name.clone(),
                tracking_domain: self.tracking_domain.clone(),
            },
            call: CallConfig {
                api_url: self.call_api_url.clone(),
                api_key: self.call_api_key.clone(),
                caller_id: self.caller_id.clone(),
                callback_base_url: self.callback_base_url.clone(),
            },
        }
    }
}

/// Build the shared `AppState`, exiting on failure.
pub fn init_state(config: &OutreachConfig) -> AppState {
    match AppStateInner::from_config(config) {
        Ok(inner) => Arc::new(inner),
        Err(e) => {
            eprintln!(
                "Failed to open data file '{}': {}",
                config.data_file.display(),
                e
            );
            std::process::exit(1);
        }
    }
}

/// Pretty-print a JSON value to stdout.
pub fn print_json(value: &serde_json::Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
    );
}

pub fn parse_industry(s: &str) -> Result<IndustryType, String> {
    IndustryType::parse(&s.to_lowercase()).ok_or_else(|| {
        let known: Vec<_> = IndustryType::ALL.iter().map(|i| i.as_str()).collect();
        format!("Unknown industry '{}' (expected one of: {})", s, known.join(", "))
    })
}

pub fn parse_channel(s: &str) -> Result<OutreachChannel, String> {
    OutreachChannel::parse(&s.to_lowercase())
        .ok_or_else(|| format!("Unknown channel '{}' (expected email, call or both)", s))
}

pub fn parse_engagement(s: &str) -> Result<EngagementLevel, String> {
    EngagementLevel::parse(&s.to_lowercase())
        .ok_or_else(|| format!("Unknown engagement level '{}' (expected none, low, medium or high)", s))
}
