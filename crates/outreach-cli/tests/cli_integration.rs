//! Integration tests for the outreach-cli commands.
//!
//! These tests exercise the same code paths as the binary: state bootstrap
//! from an `OutreachConfig`, the prospect store and the workflow, against a
//! temporary data file with every external backend unconfigured.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use outreach_core::llm::GENERATION_FALLBACK;
use outreach_core::models::{
    CreateProspectInput, EngagementLevel, IndustryType, OutreachChannel, OutreachStatus,
    ProspectFilter,
};
use outreach_core::state::{AppState, AppStateInner};
use outreach_core::{Database, OutreachConfig, ServerError};

/// Build the state the binary would build, minus retry delays.
fn test_state(data_file: &Path) -> AppState {
    let mut config = OutreachConfig {
        data_file: data_file.to_path_buf(),
        ..OutreachConfig::default()
    };
    config.llm.retry_delay = Duration::ZERO;
    Arc::new(AppStateInner::from_config(&config).expect("Failed to build state"))
}

fn input(company: &str, industry: IndustryType, phone: Option<&str>, channel: OutreachChannel) -> CreateProspectInput {
    CreateProspectInput {
        company_name: company.to_string(),
        industry,
        contact_name: "Sarah Johnson".to_string(),
        email: "s.johnson@example.com".to_string(),
        phone: phone.map(String::from),
        engagement_level: EngagementLevel::None,
        notes: "Startup specializing in blockchain security solutions".to_string(),
        preferred_channel: channel,
        objections: vec!["budget".to_string()],
    }
}

#[tokio::test]
async fn test_add_and_process_prospect() {
    let dir = tempfile::tempdir().unwrap();
    let data_file = dir.path().join("prospects.json");
    let state = test_state(&data_file);

    let prospect = state
        .prospect_store
        .create(input("TechSecure Inc", IndustryType::Tech, Some("+1234567890"), OutreachChannel::Both))
        .await
        .unwrap();

    let advice = state
        .workflow
        .process_prospect_by_id(&prospect.id, None)
        .await
        .unwrap();
    assert_eq!(advice, GENERATION_FALLBACK);

    let history = state.history_store.list_by_prospect(&prospect.id).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].channel, OutreachChannel::Email);
    assert_eq!(history[1].channel, OutreachChannel::Call);
    assert!(history.iter().all(|h| h.status == OutreachStatus::Sent));
    assert_eq!(history[1].content["full_script"], GENERATION_FALLBACK);

    let stored = state.prospect_store.get(&prospect.id).await.unwrap().unwrap();
    assert_eq!(stored.engagement_level, EngagementLevel::Medium);
    assert!(stored.last_contact.is_some());
}

#[tokio::test]
async fn test_data_file_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let data_file = dir.path().join("data").join("prospects.json");

    let id = {
        let state = test_state(&data_file);
        let p = state
            .prospect_store
            .create(input("LedgerLine", IndustryType::Finance, None, OutreachChannel::Email))
            .await
            .unwrap();
        state.workflow.process_prospect(&p, None).await;
        p.id
    };

    let state = test_state(&data_file);
    let p = state.prospect_store.get(&id).await.unwrap().unwrap();
    assert_eq!(p.company_name, "LedgerLine");
    assert_eq!(p.industry, IndustryType::Finance);
    assert_eq!(p.engagement_level, EngagementLevel::Low);
    assert_eq!(p.objections, vec!["budget".to_string()]);

    let history = state.history_store.list_by_prospect(&id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].status, OutreachStatus::Sent);

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&data_file).unwrap()).unwrap();
    assert_eq!(raw["prospects"][&id]["industry"], "finance");
    assert_eq!(raw["prospects"][&id]["engagement_level"], "low");
}

#[tokio::test]
async fn test_list_filters() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(&dir.path().join("prospects.json"));

    for (company, industry, channel) in [
        ("Acme Retail", IndustryType::Retail, OutreachChannel::Email),
        ("Bolt Works", IndustryType::Manufacturing, OutreachChannel::Call),
        ("Corner Shop", IndustryType::Retail, OutreachChannel::Call),
    ] {
        state.prospect_store.create(input(company, industry, None, channel)).await.unwrap();
    }

    let all = state.prospect_store.list(&ProspectFilter::default()).await.unwrap();
    let names: Vec<_> = all.iter().map(|p| p.company_name.as_str()).collect();
    assert_eq!(names, vec!["Acme Retail", "Bolt Works", "Corner Shop"]);

    let retail_calls = state
        .prospect_store
        .list(&ProspectFilter {
            industry: Some(IndustryType::Retail),
            preferred_channel: Some(OutreachChannel::Call),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(retail_calls.len(), 1);
    assert_eq!(retail_calls[0].company_name, "Corner Shop");
}

#[tokio::test]
async fn test_process_unknown_prospect() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(&dir.path().join("prospects.json"));
    let err = state
        .workflow
        .process_prospect_by_id("missing", Some(OutreachChannel::Email))
        .await
        .unwrap_err();
    assert!(matches!(err, ServerError::NotFound(_)));
}

#[tokio::test]
async fn test_static_knowledge_query() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(&dir.path().join("prospects.json"));
    assert!(!state.knowledge.is_semantic());

    let context = state.knowledge.query("cyber", "healthcare", 5).await;
    assert_eq!(context.lines().count(), 4);
    assert!(context.lines().all(|l| l.starts_with("- ")));

    assert!(state.knowledge.seed_index().await.is_err());
}

#[test]
fn test_corrupt_data_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let data_file = dir.path().join("prospects.json");
    std::fs::write(&data_file, "{ not json").unwrap();

    let db = Database::open(&data_file).unwrap();
    let doc = db.snapshot().unwrap();
    assert!(doc.prospects.is_empty());
    assert!(doc.history.is_empty());
}
