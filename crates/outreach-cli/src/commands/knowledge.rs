//! `outreach knowledge` — Query or extend the industry knowledge base.

use outreach_core::state::AppState;

use super::parse_industry;

pub async fn query(
    state: &AppState,
    text: &str,
    industry: &str,
    top_k: Option<usize>,
) -> Result<(), String> {
    let industry = parse_industry(industry)?;
    let top_k = top_k.unwrap_or_else(|| state.knowledge.default_top_k());
    let context = state.knowledge.query(text, industry.as_str(), top_k).await;
    println!("{}", context);
    Ok(())
}

pub async fn add(state: &AppState, text: &str, industry: &str) -> Result<(), String> {
    let industry = parse_industry(industry)?;
    if !state.knowledge.is_semantic() {
        return Err("No vector index configured; set PINECONE_API_KEY, PINECONE_INDEX_HOST and EMBEDDING_BASE_URL".to_string());
    }
    match state.knowledge.add_knowledge(text, industry.as_str(), None).await {
        Some(id) => {
            println!("Added knowledge {}", id);
            Ok(())
        }
        None => Err("Failed to add knowledge".to_string()),
    }
}

pub async fn seed(state: &AppState) -> Result<(), String> {
    let count = state.knowledge.seed_index().await.map_err(|e| e.to_string())?;
    println!("Seeded {} facts", count);
    Ok(())
}
