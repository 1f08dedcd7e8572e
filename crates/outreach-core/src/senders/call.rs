use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use super::CallScheduler;
use crate::config::CallConfig;
use crate::generator::CallScript;
use crate::models::Prospect;

/// Schedules calls through a REST call provider.
///
/// Without an API key the scheduler runs dry and reports success.
pub struct HttpCallScheduler {
    client: reqwest::Client,
    config: CallConfig,
}

impl HttpCallScheduler {
    pub fn new(config: CallConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { client, config }
    }

    pub fn is_dry_run(&self) -> bool {
        !self.config.has_credentials()
    }

    pub fn callback_url(&self, history_id: &str) -> String {
        format!(
            "{}/calls/{}/status",
            self.config.callback_base_url.trim_end_matches('/'),
            history_id
        )
    }

    pub fn request_body(&self, prospect: &Prospect, script: &CallScript, history_id: &str) -> serde_json::Value {
        json!({
            "to": prospect.phone,
            "caller_id": self.config.caller_id,
            "contact_name": prospect.contact_name,
            "company_name": prospect.company_name,
            "script": script,
            "callback_url": self.callback_url(history_id),
        })
    }
}

#[async_trait]
impl CallScheduler for HttpCallScheduler {
    async fn schedule_call(&self, prospect: &Prospect, script: &CallScript, history_id: &str) -> bool {
        if self.is_dry_run() {
            tracing::warn!("Call API key not configured, call not placed");
            tracing::info!("Call scheduled to {}", prospect.phone.as_deref().unwrap_or(""));
            tracing::info!(
                "Script:\n{}",
                serde_json::to_string_pretty(script).unwrap_or_default()
            );
            return true;
        }

        let url = format!("{}/schedule", self.config.api_url.trim_end_matches('/'));
        let body = self.request_body(prospect, script, history_id);
        tracing::debug!("POST {} {}", url, body);

        let response = match self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                tracing::error!("Call scheduling error: {}", e);
                return false;
            }
        };

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::error!("Call scheduling error: {} {}", status, text);
            return false;
        }

        tracing::info!("Call scheduled to {}", prospect.phone.as_deref().unwrap_or(""));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreateProspectInput, EngagementLevel, IndustryType, OutreachChannel};

    fn prospect() -> Prospect {
        Prospect::new(CreateProspectInput {
            company_name: "Acme".into(),
            industry: IndustryType::Tech,
            contact_name: "Alice".into(),
            email: "alice@acme.io".into(),
            phone: Some("+15550100".into()),
            engagement_level: EngagementLevel::None,
            notes: String::new(),
            preferred_channel: OutreachChannel::Call,
            objections: vec![],
        })
    }

    fn script() -> CallScript {
        CallScript {
            introduction: "Hi Alice".into(),
            ..CallScript::default()
        }
    }

    #[test]
    fn request_body_shape() {
        let scheduler = HttpCallScheduler::new(CallConfig {
            caller_id: "+15550000".into(),
            ..CallConfig::default()
        });
        let body = scheduler.request_body(&prospect(), &script(), "h-9");
        assert_eq!(body["to"], "+15550100");
        assert_eq!(body["caller_id"], "+15550000");
        assert_eq!(body["company_name"], "Acme");
        assert_eq!(body["script"]["introduction"], "Hi Alice");
        assert_eq!(body["callback_url"], "https://api.yourapp.com/calls/h-9/status");
    }

    #[tokio::test]
    async fn dry_run_without_api_key_succeeds() {
        let scheduler = HttpCallScheduler::new(CallConfig::default());
        assert!(scheduler.is_dry_run());
        assert!(scheduler.schedule_call(&prospect(), &script(), "h-1").await);
    }

    #[tokio::test]
    async fn unreachable_provider_reports_failure() {
        let scheduler = HttpCallScheduler::new(CallConfig {
            api_url: "http://127.0.0.1:9".into(),
            api_key: "key".into(),
            ..CallConfig::default()
        });
        assert!(!scheduler.schedule_call(&prospect(), &script(), "h-1").await);
    }
}
