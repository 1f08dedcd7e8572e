//! Semantic lookup backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::KnowledgeConfig;
use crate::error::KnowledgeError;

pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// A ranked match from the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorMatch {
    pub id: String,
    #[serde(default)]
    pub score: f32,
    #[serde(default)]
    pub metadata: Metadata,
}

impl VectorMatch {
    pub fn industry(&self) -> Option<&str> {
        self.metadata.get("industry").and_then(|v| v.as_str())
    }

    pub fn text(&self) -> Option<&str> {
        self.metadata.get("text").and_then(|v| v.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorRecord {
    pub id: String,
    pub values: Vec<f32>,
    pub metadata: Metadata,
}

/// A similarity index over embedded facts.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Matches in descending similarity order.
    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<VectorMatch>, KnowledgeError>;

    async fn upsert(&self, records: Vec<VectorRecord>) -> Result<(), KnowledgeError>;
}

/// Pinecone data-plane REST client.
pub struct PineconeIndex {
    client: reqwest::Client,
    host: String,
    api_key: String,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<VectorMatch>,
}

impl PineconeIndex {
    pub fn from_config(config: &KnowledgeConfig) -> Result<Self, KnowledgeError> {
        if !config.is_configured() {
            return Err(KnowledgeError::NotInitialized);
        }
        let host = config.index_host.clone().unwrap_or_default();
        let host = if host.starts_with("http://") || host.starts_with("https://") {
            host
        } else {
            format!("https://{}", host)
        };
        Ok(Self {
            client: reqwest::Client::new(),
            host: host.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    async fn post(&self, path: &str, body: serde_json::Value) -> Result<reqwest::Response, KnowledgeError> {
        let response = self
            .client
            .post(format!("{}{}", self.host, path))
            .header("Api-Key", &self.api_key)
            .header("X-Pinecone-API-Version", "2024-07")
            .json(&body)
            .send()
            .await
            .map_err(|e| KnowledgeError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(KnowledgeError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl VectorIndex for PineconeIndex {
    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<VectorMatch>, KnowledgeError> {
        let response = self
            .post(
                "/query",
                serde_json::json!({
                    "vector": vector,
                    "topK": top_k,
                    "includeMetadata": true,
                }),
            )
            .await?;
        let parsed: QueryResponse = response
            .json()
            .await
            .map_err(|e| KnowledgeError::Request(format!("Invalid query response: {}", e)))?;
        Ok(parsed.matches)
    }

    async fn upsert(&self, records: Vec<VectorRecord>) -> Result<(), KnowledgeError> {
        self.post("/vectors/upsert", serde_json::json!({ "vectors": records }))
            .await?;
        Ok(())
    }
}
