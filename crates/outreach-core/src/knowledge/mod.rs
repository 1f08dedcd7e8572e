//! Industry knowledge lookup.
//!
//! Two tiers, chosen once at construction:
//! - `Semantic`: embed the query, search the vector index, industry matches first.
//! - `Static`: curated per-industry fact lists.
//!
//! A semantic lookup that fails at request time degrades to the static tier.

pub mod facts;
pub mod index;

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::config::KnowledgeConfig;
use crate::error::KnowledgeError;
use crate::llm::LlmClient;

pub use facts::static_knowledge;
pub use index::{Metadata, PineconeIndex, VectorIndex, VectorMatch, VectorRecord};

pub const DEFAULT_TOP_K: usize = 5;

#[derive(Clone)]
struct SemanticTier {
    llm: LlmClient,
    index: Arc<dyn VectorIndex>,
}

#[derive(Clone)]
pub struct KnowledgeBase {
    semantic: Option<SemanticTier>,
    top_k: usize,
}

impl KnowledgeBase {
    /// Static facts only.
    pub fn static_only() -> Self {
        Self {
            semantic: None,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn semantic(llm: LlmClient, index: Arc<dyn VectorIndex>) -> Self {
        Self {
            semantic: Some(SemanticTier { llm, index }),
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Semantic tier when both the index and an embedding endpoint are configured.
    pub fn from_config(config: &KnowledgeConfig, llm: LlmClient) -> Self {
        let kb = if !llm.has_embedder() {
            if config.is_configured() {
                tracing::warn!("Vector index configured but no embedding endpoint; using static knowledge");
            }
            Self::static_only()
        } else {
            match PineconeIndex::from_config(config) {
                Ok(index) => Self::semantic(llm, Arc::new(index)),
                Err(KnowledgeError::NotInitialized) => {
                    tracing::warn!("Vector index API key or host not set; using static knowledge");
                    Self::static_only()
                }
                Err(e) => {
                    tracing::error!("Vector index initialization error: {}", e);
                    Self::static_only()
                }
            }
        };
        kb.with_top_k(config.top_k)
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.max(1);
        self
    }

    pub fn default_top_k(&self) -> usize {
        self.top_k
    }

    pub fn is_semantic(&self) -> bool {
        self.semantic.is_some()
    }

    /// Context for a prompt as `- {fact}` lines. Never fails.
    pub async fn query(&self, query: &str, industry: &str, top_k: usize) -> String {
        let Some(ref tier) = self.semantic else {
            return static_knowledge(industry);
        };

        match semantic_query(tier, query, industry, top_k).await {
            Ok(context) => context,
            Err(e) => {
                tracing::error!("Knowledge query error: {}", e);
                static_knowledge(industry)
            }
        }
    }

    /// Add a fact to the index. Returns its id, or `None` in the static tier
    /// or on failure.
    pub async fn add_knowledge(
        &self,
        text: &str,
        industry: &str,
        metadata: Option<Metadata>,
    ) -> Option<String> {
        let Some(ref tier) = self.semantic else {
            tracing::warn!("Cannot add knowledge - vector index not initialized");
            return None;
        };

        let id = format!("{}-{}", industry, Uuid::new_v4());
        let values = tier.llm.embed_text(&format!("{} {}", industry, text)).await;

        let mut meta = Metadata::new();
        meta.insert("industry".into(), industry.into());
        meta.insert("text".into(), text.into());
        meta.insert("timestamp".into(), Utc::now().to_rfc3339().into());
        if let Some(extra) = metadata {
            meta.extend(extra);
        }

        match tier
            .index
            .upsert(vec![VectorRecord { id: id.clone(), values, metadata: meta }])
            .await
        {
            Ok(()) => Some(id),
            Err(e) => {
                tracing::error!("Error adding knowledge: {}", e);
                None
            }
        }
    }

    /// Upsert every curated fact as `{industry}-{i}`.
    pub async fn seed_index(&self) -> Result<usize, KnowledgeError> {
        let tier = self.semantic.as_ref().ok_or(KnowledgeError::NotInitialized)?;

        let mut records = Vec::new();
        for industry in facts::CURATED_INDUSTRIES {
            for (i, fact) in facts::facts_for(industry).iter().enumerate() {
                let values = tier.llm.embed_text(&format!("{} {}", industry, fact)).await;
                let mut metadata = Metadata::new();
                metadata.insert("industry".into(), industry.into());
                metadata.insert("text".into(), (*fact).into());
                records.push(VectorRecord {
                    id: format!("{}-{}", industry, i),
                    values,
                    metadata,
                });
            }
        }

        let count = records.len();
        tier.index.upsert(records).await?;
        tracing::info!("Initialized knowledge base with {} vectors", count);
        Ok(count)
    }
}

async fn semantic_query(
    tier: &SemanticTier,
    query: &str,
    industry: &str,
    top_k: usize,
) -> Result<String, KnowledgeError> {
    let vector = tier.llm.embed_text(&format!("{} {}", industry, query)).await;
    let matches = tier.index.query(&vector, top_k).await?;
    Ok(format_matches(matches, industry))
}

/// Industry matches first, then the rest; backend ranking within each group.
fn format_matches(matches: Vec<VectorMatch>, industry: &str) -> String {
    let (same, other): (Vec<_>, Vec<_>) = matches
        .into_iter()
        .partition(|m| m.industry() == Some(industry));

    same.iter()
        .chain(other.iter())
        .filter_map(|m| m.text())
        .map(|text| format!("- {}", text))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LlmConfig;
    use crate::error::LlmError;
    use crate::llm::{Embedder, GenerationRequest, TextGenerator};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct NoText;

    #[async_trait]
    impl TextGenerator for NoText {
        async fn generate(&self, _: &GenerationRequest) -> Result<String, LlmError> {
            Err(LlmError::Misconfiguration("unused".into()))
        }
    }

    struct UnitEmbedder;

    #[async_trait]
    impl Embedder for UnitEmbedder {
        async fn embed(&self, _: &str) -> Result<Vec<f32>, LlmError> {
            Ok(vec![1.0, 0.0, 0.0])
        }
    }

    #[derive(Default)]
    struct FakeIndex {
        matches: Vec<VectorMatch>,
        fail: bool,
        upserted: Mutex<Vec<VectorRecord>>,
    }

    #[async_trait]
    impl VectorIndex for FakeIndex {
        async fn query(&self, _: &[f32], top_k: usize) -> Result<Vec<VectorMatch>, KnowledgeError> {
            if self.fail {
                return Err(KnowledgeError::Request("index unavailable".into()));
            }
            Ok(self.matches.iter().take(top_k).cloned().collect())
        }

        async fn upsert(&self, records: Vec<VectorRecord>) -> Result<(), KnowledgeError> {
            self.upserted.lock().unwrap().extend(records);
            Ok(())
        }
    }

    fn hit(id: &str, industry: &str, text: &str) -> VectorMatch {
        let mut metadata = Metadata::new();
        metadata.insert("industry".into(), industry.into());
        metadata.insert("text".into(), text.into());
        VectorMatch { id: id.into(), score: 0.9, metadata }
    }

    fn llm() -> LlmClient {
        let config = LlmConfig { retry_delay: std::time::Duration::ZERO, ..LlmConfig::default() };
        LlmClient::new(Arc::new(NoText), config).with_embedder(Arc::new(UnitEmbedder), 3)
    }

    #[tokio::test]
    async fn static_tier_returns_curated_facts() {
        let kb = KnowledgeBase::static_only();
        assert!(!kb.is_semantic());
        assert_eq!(kb.query("anything", "finance", 5).await, static_knowledge("finance"));
    }

    #[tokio::test]
    async fn semantic_tier_orders_industry_matches_first() {
        let index = FakeIndex {
            matches: vec![
                hit("tech-0", "tech", "A"),
                hit("finance-1", "finance", "B"),
                hit("retail-0", "retail", "C"),
                hit("finance-0", "finance", "D"),
            ],
            ..Default::default()
        };
        let kb = KnowledgeBase::semantic(llm(), Arc::new(index));
        let out = kb.query("fraud", "finance", 5).await;
        assert_eq!(out, "- B\n- D\n- A\n- C");
    }

    #[tokio::test]
    async fn semantic_failure_falls_back_to_static() {
        let index = FakeIndex { fail: true, ..Default::default() };
        let kb = KnowledgeBase::semantic(llm(), Arc::new(index));
        assert_eq!(kb.query("x", "healthcare", 5).await, static_knowledge("healthcare"));
    }

    #[tokio::test]
    async fn add_knowledge_and_seed() {
        let index = Arc::new(FakeIndex::default());
        let kb = KnowledgeBase::semantic(llm(), index.clone());

        let id = kb.add_knowledge("Cyber cover matters", "tech", None).await.unwrap();
        assert!(id.starts_with("tech-"));
        assert_eq!(kb.seed_index().await.unwrap(), 20);

        let upserted = index.upserted.lock().unwrap();
        assert_eq!(upserted.len(), 21);
        assert_eq!(upserted[0].metadata["text"], "Cyber cover matters");
        assert!(upserted.iter().any(|r| r.id == "manufacturing-3"));

        assert!(KnowledgeBase::static_only().add_knowledge("x", "tech", None).await.is_none());
    }
}
