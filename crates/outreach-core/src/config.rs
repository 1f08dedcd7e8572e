//! Explicit configuration for every external collaborator.
//!
//! Nothing in `outreach-core` reads the process environment. Entry points
//! (the CLI, tests) build these structs and pass them to constructors.

use std::path::PathBuf;
use std::time::Duration;

/// Top-level configuration for the outreach backend.
#[derive(Debug, Clone)]
pub struct OutreachConfig {
    /// JSON document holding prospects and history.
    pub data_file: PathBuf,
    pub llm: LlmConfig,
    pub embedding: EmbeddingConfig,
    pub knowledge: KnowledgeConfig,
    pub smtp: SmtpConfig,
    pub call: CallConfig,
}

impl Default for OutreachConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("data/prospects.json"),
            llm: LlmConfig::default(),
            embedding: EmbeddingConfig::default(),
            knowledge: KnowledgeConfig::default(),
            smtp: SmtpConfig::default(),
            call: CallConfig::default(),
        }
    }
}

/// Chat-completions backend and its retry policy.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// OpenAI-compatible API base URL (Groq by default)
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Total attempts per generation call
    pub retry_attempts: u32,
    /// Fixed delay between attempts
    pub retry_delay: Duration,
    /// Per-request HTTP timeout
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.groq.com/openai/v1".to_string(),
            api_key: String::new(),
            model: "llama3-70b-8192".to_string(),
            temperature: 0.7,
            max_tokens: 1024,
            retry_attempts: 3,
            retry_delay: Duration::from_secs(2),
            timeout: Duration::from_secs(120),
        }
    }
}

/// Embedding endpoint used for semantic knowledge lookup.
#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    /// OpenAI-compatible base URL exposing `/embeddings`. `None` disables embeddings.
    pub base_url: Option<String>,
    pub api_key: String,
    pub model: String,
    /// Dimension of the zero-vector fallback
    pub dimension: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: String::new(),
            model: "sentence-transformers/all-MiniLM-L6-v2".to_string(),
            dimension: 384,
        }
    }
}

/// Vector index holding industry facts.
#[derive(Debug, Clone)]
pub struct KnowledgeConfig {
    /// Data-plane host of the index, e.g. `https://insurance-knowledge-xxxx.svc.pinecone.io`
    pub index_host: Option<String>,
    pub api_key: String,
    pub top_k: usize,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            index_host: None,
            api_key: String::new(),
            top_k: 5,
        }
    }
}

impl KnowledgeConfig {
    pub fn is_configured(&self) -> bool {
        self.index_host.as_deref().is_some_and(|h| !h.is_empty()) && !self.api_key.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub server: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Falls back to `username` when empty
    pub sender_email: String,
    pub sender_name: String,
    /// Host serving the open-tracking pixel
    pub tracking_domain: String,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            server: "smtp.gmail.com".to_string(),
            port: 587,
            username: String::new(),
            password: String::new(),
            sender_email: String::new(),
            sender_name: "Insurance Solutions".to_string(),
            tracking_domain: "track.insuranceco.com".to_string(),
        }
    }
}

impl SmtpConfig {
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }

    /// Address used in `From:`.
    pub fn sender(&self) -> &str {
        if self.sender_email.is_empty() {
            &self.username
        } else {
            &self.sender_email
        }
    }
}

#[derive(Debug, Clone)]
pub struct CallConfig {
    pub api_url: String,
    pub api_key: String,
    pub caller_id: String,
    /// Base URL the provider reports call status to
    pub callback_base_url: String,
}

impl Default for CallConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.callservice.com".to_string(),
            api_key: String::new(),
            caller_id: String::new(),
            callback_base_url: "https://api.yourapp.com".to_string(),
        }
    }
}

impl CallConfig {
    pub fn has_credentials(&self) -> bool {
        !self.api_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smtp_sender_falls_back_to_username() {
        let config = SmtpConfig {
            username: "sales@insuranceco.com".into(),
            password: "pw".into(),
            ..SmtpConfig::default()
        };
        assert!(config.has_credentials());
        assert_eq!(config.sender(), "sales@insuranceco.com");

        let config = SmtpConfig { sender_email: "team@insuranceco.com".into(), ..config };
        assert_eq!(config.sender(), "team@insuranceco.com");

        assert!(!SmtpConfig { password: String::new(), ..config }.has_credentials());
    }
}
