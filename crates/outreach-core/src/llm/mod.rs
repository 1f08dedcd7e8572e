//! Text generation and embeddings.
//!
//! ```text
//! OutreachGenerator ──► LlmClient (3 attempts, fixed delay, canned fallback)
//!                           │
//!                      dyn TextGenerator ──► ChatCompletionsClient (HTTP)
//!                      dyn Embedder      ──► HttpEmbedder (HTTP)
//! ```

pub mod http;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;
use crate::error::LlmError;

pub use http::{ChatCompletionsClient, HttpEmbedder};

/// Returned after every generation attempt has failed.
pub const GENERATION_FALLBACK: &str =
    "I was unable to generate a response at this time. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// One text-generation call: optional system instruction plus one user message.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub messages: Vec<Message>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl GenerationRequest {
    /// The user message is `Context: {context}\n\n{prompt}`.
    pub fn new(config: &LlmConfig, prompt: &str, context: &str, system_prompt: Option<&str>) -> Self {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system_prompt.filter(|s| !s.is_empty()) {
            messages.push(Message::new(Role::System, system));
        }
        messages.push(Message::new(
            Role::User,
            format!("Context: {}\n\n{}", context, prompt),
        ));
        Self {
            messages,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    pub fn user_message(&self) -> &str {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .unwrap_or("")
    }

    pub fn system_message(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == Role::System)
            .map(|m| m.content.as_str())
    }
}

/// A text-generation backend.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError>;
}

/// An embedding backend.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError>;
}

/// Wraps the backends with the fixed retry policy.
#[derive(Clone)]
pub struct LlmClient {
    generator: Arc<dyn TextGenerator>,
    embedder: Option<Arc<dyn Embedder>>,
    config: LlmConfig,
    embedding_dimension: usize,
}

impl LlmClient {
    pub fn new(generator: Arc<dyn TextGenerator>, config: LlmConfig) -> Self {
        Self {
            generator,
            embedder: None,
            config,
            embedding_dimension: 384,
        }
    }

    pub fn with_embedder(mut self, embedder: Arc<dyn Embedder>, dimension: usize) -> Self {
        self.embedder = Some(embedder);
        self.embedding_dimension = dimension;
        self
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    pub fn has_embedder(&self) -> bool {
        self.embedder.is_some()
    }

    /// Generate text; never fails. After the last failed attempt the canned
    /// [`GENERATION_FALLBACK`] string is returned.
    pub async fn generate(&self, prompt: &str, context: &str, system_prompt: Option<&str>) -> String {
        let request = GenerationRequest::new(&self.config, prompt, context, system_prompt);
        let attempts = self.config.retry_attempts.max(1);

        for attempt in 1..=attempts {
            match self.generator.generate(&request).await {
                Ok(text) => return text,
                Err(e) => {
                    tracing::error!("LLM API error (attempt {}): {}", attempt, e);
                    if attempt < attempts {
                        sleep(self.config.retry_delay).await;
                    }
                }
            }
        }
        GENERATION_FALLBACK.to_string()
    }

    /// Embed text with the same retry policy, falling back to a zero vector.
    pub async fn embed_text(&self, text: &str) -> Vec<f32> {
        let Some(ref embedder) = self.embedder else {
            return vec![0.0; self.embedding_dimension];
        };
        let attempts = self.config.retry_attempts.max(1);

        for attempt in 1..=attempts {
            match embedder.embed(text).await {
                Ok(vector) => return vector,
                Err(e) => {
                    tracing::error!("Embedding error (attempt {}): {}", attempt, e);
                    if attempt < attempts {
                        sleep(self.config.retry_delay).await;
                    }
                }
            }
        }
        vec![0.0; self.embedding_dimension]
    }
}

async fn sleep(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
