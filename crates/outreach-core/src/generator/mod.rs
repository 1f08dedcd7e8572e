//! Personalized email and call-script generation.

pub mod parse;
pub mod prompts;

use crate::knowledge::KnowledgeBase;
use crate::llm::LlmClient;
use crate::models::{OutreachHistory, Prospect};

pub use parse::{parse_call_script, parse_email_reply, CallScript, EmailContent, DEFAULT_SUBJECT};

/// Builds prompts from a prospect profile plus retrieved context and parses
/// the replies.
#[derive(Clone)]
pub struct OutreachGenerator {
    llm: LlmClient,
    knowledge: KnowledgeBase,
}

impl OutreachGenerator {
    pub fn new(llm: LlmClient, knowledge: KnowledgeBase) -> Self {
        Self { llm, knowledge }
    }

    async fn context(&self, prospect: &Prospect, suffix: Option<&str>) -> String {
        let mut query = format!("{} {}", prospect.company_name, prospect.notes);
        if let Some(suffix) = suffix {
            query.push(' ');
            query.push_str(suffix);
        }
        self.knowledge
            .query(&query, prospect.industry.as_str(), self.knowledge.default_top_k())
            .await
    }

    pub async fn generate_email(&self, prospect: &Prospect) -> EmailContent {
        let context = self.context(prospect, None).await;
        let system = prompts::industry_system_prompt(prospect.industry);
        let reply = self
            .llm
            .generate(&prompts::email_prompt(prospect), &context, Some(system))
            .await;
        parse_email_reply(&reply)
    }

    pub async fn generate_call_script(&self, prospect: &Prospect) -> CallScript {
        let context = self.context(prospect, None).await;
        let system = prompts::industry_system_prompt(prospect.industry);
        let reply = self
            .llm
            .generate(&prompts::call_script_prompt(prospect), &context, Some(system))
            .await;
        parse_call_script(&reply)
    }

    pub async fn generate_follow_up(
        &self,
        prospect: &Prospect,
        history: &[OutreachHistory],
    ) -> EmailContent {
        let context = self.context(prospect, Some("follow up")).await;
        let system = prompts::industry_system_prompt(prospect.industry);
        let reply = self
            .llm
            .generate(&prompts::follow_up_prompt(prospect, history), &context, Some(system))
            .await;
        parse_email_reply(&reply)
    }

    /// Free-text advice for the sales team, returned as generated.
    pub async fn generate_engagement_advice(
        &self,
        prospect: &Prospect,
        history: &[OutreachHistory],
    ) -> String {
        let context = self.context(prospect, Some("sales strategy")).await;
        self.llm
            .generate(&prompts::engagement_advice_prompt(prospect, history), &context, None)
            .await
    }
}
