use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::OutreachChannel;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum IndustryType {
    Tech,
    Finance,
    Healthcare,
    Retail,
    Manufacturing,
    Education,
    Construction,
    Energy,
    Hospitality,
    Transportation,
}

impl IndustryType {
    pub const ALL: [IndustryType; 10] = [
        Self::Tech,
        Self::Finance,
        Self::Healthcare,
        Self::Retail,
        Self::Manufacturing,
        Self::Education,
        Self::Construction,
        Self::Energy,
        Self::Hospitality,
        Self::Transportation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tech => "tech",
            Self::Finance => "finance",
            Self::Healthcare => "healthcare",
            Self::Retail => "retail",
            Self::Manufacturing => "manufacturing",
            Self::Education => "education",
            Self::Construction => "construction",
            Self::Energy => "energy",
            Self::Hospitality => "hospitality",
            Self::Transportation => "transportation",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|i| i.as_str() == s)
    }
}

impl std::fmt::Display for IndustryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How responsive a prospect has been. Ordered: `None < Low < Medium < High`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum EngagementLevel {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl EngagementLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "none" => Some(Self::None),
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    /// One ordinal step up, saturating at `High`.
    pub fn advance(self) -> Self {
        match self {
            Self::None => Self::Low,
            Self::Low => Self::Medium,
            Self::Medium | Self::High => Self::High,
        }
    }
}

impl std::fmt::Display for EngagementLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sales target and its current engagement state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Prospect {
    pub id: String,
    pub company_name: String,
    pub industry: IndustryType,
    pub contact_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub engagement_level: EngagementLevel,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub last_contact: Option<DateTime<Utc>>,
    #[serde(default)]
    pub preferred_channel: OutreachChannel,
    #[serde(default)]
    pub objections: Vec<String>,
}

impl Prospect {
    pub fn new(input: CreateProspectInput) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            company_name: input.company_name,
            industry: input.industry,
            contact_name: input.contact_name,
            email: input.email,
            phone: input.phone,
            engagement_level: input.engagement_level,
            notes: input.notes,
            last_contact: None,
            preferred_channel: input.preferred_channel,
            objections: input.objections,
        }
    }

    /// The phone number, if one is present and not blank.
    pub fn reachable_phone(&self) -> Option<&str> {
        self.phone.as_deref().map(str::trim).filter(|p| !p.is_empty())
    }
}

/// Input for creating a new prospect. `id` and `last_contact` are assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProspectInput {
    pub company_name: String,
    pub industry: IndustryType,
    pub contact_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub engagement_level: EngagementLevel,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub preferred_channel: OutreachChannel,
    #[serde(default)]
    pub objections: Vec<String>,
}

impl CreateProspectInput {
    pub fn validate(&self) -> Result<(), String> {
        if self.company_name.trim().is_empty() {
            return Err("company_name must not be empty".to_string());
        }
        if self.contact_name.trim().is_empty() {
            return Err("contact_name must not be empty".to_string());
        }
        if !is_valid_email(&self.email) {
            return Err(format!("invalid email address: '{}'", self.email));
        }
        Ok(())
    }
}

fn is_valid_email(email: &str) -> bool {
    let mut parts = email.trim().split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty() && !domain.is_empty() && !domain.starts_with('.') && !domain.ends_with('.')
        }
        _ => false,
    }
}

/// Partial update for a stored prospect. `id` and `last_contact` are not patchable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProspectInput {
    pub company_name: Option<String>,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub engagement_level: Option<EngagementLevel>,
    pub notes: Option<String>,
    pub preferred_channel: Option<OutreachChannel>,
    pub objections: Option<Vec<String>>,
}

/// AND-ed filters for listing prospects.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProspectFilter {
    pub industry: Option<IndustryType>,
    pub engagement_level: Option<EngagementLevel>,
    pub preferred_channel: Option<OutreachChannel>,
}

impl ProspectFilter {
    pub fn matches(&self, prospect: &Prospect) -> bool {
        self.industry.map_or(true, |i| prospect.industry == i)
            && self.engagement_level.map_or(true, |l| prospect.engagement_level == l)
            && self.preferred_channel.map_or(true, |c| prospect.preferred_channel == c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engagement_advance_saturates_at_high() {
        assert_eq!(EngagementLevel::None.advance(), EngagementLevel::Low);
        assert_eq!(EngagementLevel::Low.advance(), EngagementLevel::Medium);
        assert_eq!(EngagementLevel::Medium.advance(), EngagementLevel::High);
        assert_eq!(EngagementLevel::High.advance(), EngagementLevel::High);
        assert!(EngagementLevel::None < EngagementLevel::High);
    }

    #[test]
    fn enums_serialize_as_lowercase_strings() {
        assert_eq!(serde_json::to_string(&IndustryType::Healthcare).unwrap(), "\"healthcare\"");
        assert_eq!(serde_json::to_string(&EngagementLevel::Medium).unwrap(), "\"medium\"");
        let parsed: IndustryType = serde_json::from_str("\"transportation\"").unwrap();
        assert_eq!(parsed, IndustryType::Transportation);
        assert_eq!(IndustryType::parse("energy"), Some(IndustryType::Energy));
        assert_eq!(IndustryType::parse("mining"), None);
    }

    #[test]
    fn create_input_defaults_and_validation() {
        let input: CreateProspectInput = serde_json::from_value(serde_json::json!({
            "company_name": "Acme Corp",
            "industry": "tech",
            "contact_name": "Alice",
            "email": "alice@example.com"
        }))
        .unwrap();
        assert_eq!(input.engagement_level, EngagementLevel::None);
        assert_eq!(input.preferred_channel, OutreachChannel::Email);
        assert!(input.validate().is_ok());

        let bad = CreateProspectInput { email: "not-an-email".into(), ..input.clone() };
        assert!(bad.validate().is_err());
        let bad = CreateProspectInput { email: "a@b@c".into(), ..input };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn blank_phone_is_not_reachable() {
        let mut p = Prospect::new(CreateProspectInput {
            company_name: "Acme".into(),
            industry: IndustryType::Retail,
            contact_name: "Bob".into(),
            email: "bob@acme.io".into(),
            phone: Some("   ".into()),
            engagement_level: EngagementLevel::None,
            notes: String::new(),
            preferred_channel: OutreachChannel::Call,
            objections: vec![],
        });
        assert_eq!(p.reachable_phone(), None);
        p.phone = Some(" +1555 ".into());
        assert_eq!(p.reachable_phone(), Some("+1555"));
    }

    #[test]
    fn filter_matches_all_given_fields() {
        let p = Prospect::new(CreateProspectInput {
            company_name: "Acme".into(),
            industry: IndustryType::Finance,
            contact_name: "Bob".into(),
            email: "bob@acme.io".into(),
            phone: None,
            engagement_level: EngagementLevel::Low,
            notes: String::new(),
            preferred_channel: OutreachChannel::Both,
            objections: vec![],
        });
        assert!(ProspectFilter::default().matches(&p));
        let f = ProspectFilter { industry: Some(IndustryType::Finance), engagement_level: Some(EngagementLevel::Low), ..Default::default() };
        assert!(f.matches(&p));
        let f = ProspectFilter { industry: Some(IndustryType::Finance), preferred_channel: Some(OutreachChannel::Email), ..Default::default() };
        assert!(!f.matches(&p));
    }
}
