//! HTTP backends for OpenAI-compatible APIs (Groq, OpenRouter, local servers).

use async_trait::async_trait;

use super::{Embedder, GenerationRequest, TextGenerator};
use crate::config::{EmbeddingConfig, LlmConfig};
use crate::error::LlmError;

/// Calls `POST {base_url}/chat/completions` with bearer auth.
pub struct ChatCompletionsClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ChatCompletionsClient {
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Misconfiguration(format!("HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl TextGenerator for ChatCompletionsClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError> {
        if self.api_key.is_empty() {
            return Err(LlmError::Misconfiguration("LLM API key is not set".to_string()));
        }

        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let body = serde_json::json!({
            "model": request.model,
            "messages": request.messages,
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
        });

        tracing::debug!("[LLM] Calling {} (model: {})", url, request.model);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Http(e.to_string()))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| LlmError::Http(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            return Err(LlmError::Api {
                status: status.as_u16(),
                body: response_text,
            });
        }

        let json: serde_json::Value =
            serde_json::from_str(&response_text).map_err(|e| LlmError::Parse(e.to_string()))?;

        json.get("choices")
            .and_then(|c| c.as_array())
            .and_then(|arr| arr.first())
            .and_then(|choice| choice.get("message"))
            .and_then(|msg| msg.get("content"))
            .and_then(|c| c.as_str())
            .map(str::to_string)
            .ok_or_else(|| LlmError::Parse("response has no choices[0].message.content".to_string()))
    }
}

/// Calls `POST {base_url}/embeddings`.
pub struct HttpEmbedder {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl HttpEmbedder {
    /// `None` when no embedding endpoint is configured.
    pub fn from_config(config: &EmbeddingConfig) -> Option<Self> {
        let base_url = config.base_url.clone().filter(|u| !u.is_empty())?;
        Some(Self {
            client: reqwest::Client::new(),
            base_url,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        let url = format!("{}/embeddings", self.base_url.trim_end_matches('/'));
        let mut req = self.client.post(&url).json(&serde_json::json!({
            "model": self.model,
            "input": text,
        }));
        if !self.api_key.is_empty() {
            req = req.header("Authorization", format!("Bearer {}", self.api_key));
        }

        let response = req.send().await.map_err(|e| LlmError::Http(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))?;

        json.get("data")
            .and_then(|d| d.as_array())
            .and_then(|arr| arr.first())
            .and_then(|item| item.get("embedding"))
            .and_then(|e| e.as_array())
            .map(|values| {
                values
                    .iter()
                    .filter_map(|v| v.as_f64())
                    .map(|v| v as f32)
                    .collect::<Vec<f32>>()
            })
            .filter(|v| !v.is_empty())
            .ok_or_else(|| LlmError::Parse("response has no data[0].embedding".to_string()))
    }
}
