//! `outreach prospect` — Manage prospects.

use outreach_core::models::{CreateProspectInput, EngagementLevel, ProspectFilter};
use outreach_core::state::AppState;

use super::{parse_channel, parse_engagement, parse_industry, print_json};

pub struct AddArgs {
    pub company: String,
    pub industry: String,
    pub contact: String,
    pub email: String,
    pub phone: Option<String>,
    pub notes: String,
    pub channel: String,
    pub objections: Vec<String>,
    /// Run the outreach workflow right after storing
    pub process: bool,
}

pub async fn add(state: &AppState, args: AddArgs) -> Result<(), String> {
    let input = CreateProspectInput {
        company_name: args.company,
        industry: parse_industry(&args.industry)?,
        contact_name: args.contact,
        email: args.email,
        phone: args.phone,
        engagement_level: EngagementLevel::None,
        notes: args.notes,
        preferred_channel: parse_channel(&args.channel)?,
        objections: args.objections,
    };

    let prospect = state
        .prospect_store
        .create(input)
        .await
        .map_err(|e| e.to_string())?;
    println!("Added prospect {} ({})", prospect.company_name, prospect.id);

    if !args.process {
        return Ok(());
    }

    let advice = state.workflow.process_prospect(&prospect, None).await;
    println!("\nEngagement advice:\n{}", advice);
    Ok(())
}

pub async fn list(
    state: &AppState,
    industry: Option<&str>,
    engagement: Option<&str>,
    channel: Option<&str>,
) -> Result<(), String> {
    let filter = ProspectFilter {
        industry: industry.map(parse_industry).transpose()?,
        engagement_level: engagement.map(parse_engagement).transpose()?,
        preferred_channel: channel.map(parse_channel).transpose()?,
    };
    let prospects = state
        .prospect_store
        .list(&filter)
        .await
        .map_err(|e| e.to_string())?;
    print_json(&serde_json::json!(prospects));
    Ok(())
}

pub async fn get(state: &AppState, id: &str) -> Result<(), String> {
    match state.prospect_store.get(id).await.map_err(|e| e.to_string())? {
        Some(p) => {
            print_json(&serde_json::json!(p));
            Ok(())
        }
        None => Err(format!("Prospect {} not found", id)),
    }
}

pub async fn history(state: &AppState, id: &str) -> Result<(), String> {
    let history = state
        .history_store
        .list_by_prospect(id)
        .await
        .map_err(|e| e.to_string())?;
    print_json(&serde_json::json!(history));
    Ok(())
}
