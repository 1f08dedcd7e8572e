//! `outreach process` — Run the outreach workflow for a stored prospect.

use outreach_core::state::AppState;

use super::parse_channel;

pub async fn run(state: &AppState, id: &str, channel: Option<&str>) -> Result<(), String> {
    let channel = channel.map(parse_channel).transpose()?;
    let advice = state
        .workflow
        .process_prospect_by_id(id, channel)
        .await
        .map_err(|e| e.to_string())?;

    println!("Engagement advice:\n{}", advice);
    Ok(())
}
