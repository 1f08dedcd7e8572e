use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Free-form content payload of a history record (subject/body or script sections).
pub type OutreachContent = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutreachChannel {
    #[default]
    Email,
    Call,
    Both,
}

impl OutreachChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Call => "call",
            Self::Both => "both",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "email" => Some(Self::Email),
            "call" => Some(Self::Call),
            "both" => Some(Self::Both),
            _ => None,
        }
    }

    pub fn includes_email(&self) -> bool {
        matches!(self, Self::Email | Self::Both)
    }

    pub fn includes_call(&self) -> bool {
        matches!(self, Self::Call | Self::Both)
    }
}

impl std::fmt::Display for OutreachChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutreachStatus {
    #[default]
    Pending,
    Sent,
    Opened,
    Clicked,
    Responded,
    Failed,
}

impl OutreachStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Sent => "sent",
            Self::Opened => "opened",
            Self::Clicked => "clicked",
            Self::Responded => "responded",
            Self::Failed => "failed",
        }
    }

    /// Whether a record in this status may move to `next`.
    ///
    /// Nothing ever returns to `Pending`.
    pub fn can_transition_to(&self, next: OutreachStatus) -> bool {
        use OutreachStatus::*;
        match (self, next) {
            (_, Pending) => false,
            (Pending, Sent | Failed) => true,
            (Sent, Failed | Opened | Clicked | Responded) => true,
            (Opened, Clicked | Responded) => true,
            (Clicked, Responded) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for OutreachStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One attempted contact event and its outcome.
///
/// `prospect_id` and `timestamp` are fixed at creation; only `content`,
/// `status` and `response` change afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutreachHistory {
    pub id: String,
    pub prospect_id: String,
    pub timestamp: DateTime<Utc>,
    pub channel: OutreachChannel,
    #[serde(default)]
    pub content: OutreachContent,
    #[serde(default)]
    pub status: OutreachStatus,
    #[serde(default)]
    pub response: Option<String>,
}

impl OutreachHistory {
    /// A fresh `pending` record with empty content.
    pub fn pending(prospect_id: &str, channel: OutreachChannel) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            prospect_id: prospect_id.to_string(),
            timestamp: Utc::now(),
            channel,
            content: OutreachContent::new(),
            status: OutreachStatus::Pending,
            response: None,
        }
    }

    /// `- YYYY-MM-DD: CHANNEL - Status: status[ - Response: text]`
    pub fn interaction_line(&self) -> String {
        let mut line = format!(
            "- {}: {} - Status: {}",
            self.timestamp.format("%Y-%m-%d"),
            self.channel.as_str().to_uppercase(),
            self.status
        );
        if let Some(ref response) = self.response {
            if !response.is_empty() {
                line.push_str(&format!(" - Response: {}", response));
            }
        }
        line
    }
}

/// Patch for the mutable fields of a history record.
#[derive(Debug, Clone, Default)]
pub struct UpdateHistoryInput {
    pub content: Option<OutreachContent>,
    pub status: Option<OutreachStatus>,
    pub response: Option<String>,
}

impl UpdateHistoryInput {
    pub fn status(status: OutreachStatus) -> Self {
        Self { status: Some(status), ..Default::default() }
    }

    pub fn content_with_status(content: OutreachContent, status: OutreachStatus) -> Self {
        Self { content: Some(content), status: Some(status), response: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn nothing_returns_to_pending() {
        use OutreachStatus::*;
        for s in [Pending, Sent, Opened, Clicked, Responded, Failed] {
            assert!(!s.can_transition_to(Pending), "{s} -> pending must be rejected");
        }
        assert!(Pending.can_transition_to(Sent));
        assert!(Pending.can_transition_to(Failed));
        assert!(Sent.can_transition_to(Failed));
        assert!(Sent.can_transition_to(Responded));
        assert!(!Failed.can_transition_to(Sent));
        assert!(!Responded.can_transition_to(Sent));
    }

    #[test]
    fn channel_membership() {
        assert!(OutreachChannel::Both.includes_email());
        assert!(OutreachChannel::Both.includes_call());
        assert!(!OutreachChannel::Email.includes_call());
        assert!(!OutreachChannel::Call.includes_email());
    }

    #[test]
    fn interaction_line_format() {
        let mut h = OutreachHistory::pending("p1", OutreachChannel::Email);
        h.timestamp = Utc.with_ymd_and_hms(2024, 3, 9, 10, 30, 0).unwrap();
        h.status = OutreachStatus::Responded;
        assert_eq!(h.interaction_line(), "- 2024-03-09: EMAIL - Status: responded");
        h.response = Some("Send me a quote".into());
        assert_eq!(
            h.interaction_line(),
            "- 2024-03-09: EMAIL - Status: responded - Response: Send me a quote"
        );
    }

    #[test]
    fn timestamp_serializes_as_iso8601() {
        let mut h = OutreachHistory::pending("p1", OutreachChannel::Call);
        h.timestamp = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let v = serde_json::to_value(&h).unwrap();
        assert_eq!(v["timestamp"], "2024-01-02T03:04:05Z");
        assert_eq!(v["channel"], "call");
        assert_eq!(v["status"], "pending");
    }
}
