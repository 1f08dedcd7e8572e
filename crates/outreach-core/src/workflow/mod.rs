//! Outreach workflow — drives a prospect through email and/or call outreach.
//!
//! Each sub-flow:
//! 1. Persists a `pending` history record
//! 2. Generates content (email, follow-up or call script)
//! 3. Marks the record `sent` and hands it to the sender
//! 4. Flips the record to `failed` if delivery or any earlier step fails
//! 5. Updates the prospect's engagement level
//!
//! Failures never escape `process_prospect`; they only show up in history
//! status and in the logs.

use std::sync::Arc;

use crate::error::ServerError;
use crate::generator::OutreachGenerator;
use crate::models::{
    EngagementLevel, OutreachChannel, OutreachHistory, OutreachStatus, Prospect,
    UpdateHistoryInput,
};
use crate::senders::{CallScheduler, EmailSender};
use crate::store::{HistoryStore, ProspectStore};

pub struct OutreachWorkflow {
    prospects: ProspectStore,
    history: HistoryStore,
    generator: OutreachGenerator,
    email_sender: Arc<dyn EmailSender>,
    call_scheduler: Arc<dyn CallScheduler>,
}

impl OutreachWorkflow {
    pub fn new(
        prospects: ProspectStore,
        history: HistoryStore,
        generator: OutreachGenerator,
        email_sender: Arc<dyn EmailSender>,
        call_scheduler: Arc<dyn CallScheduler>,
    ) -> Self {
        Self {
            prospects,
            history,
            generator,
            email_sender,
            call_scheduler,
        }
    }

    /// Run outreach over `channel` (or the prospect's preferred channel) and
    /// return engagement advice for the sales team.
    pub async fn process_prospect(
        &self,
        prospect: &Prospect,
        channel: Option<OutreachChannel>,
    ) -> String {
        let channel = channel.unwrap_or(prospect.preferred_channel);
        tracing::info!("Processing prospect: {} via {}", prospect.company_name, channel);

        let history = match self.history.list_by_prospect(&prospect.id).await {
            Ok(h) => h,
            Err(e) => {
                tracing::error!("Failed to load history for {}: {}", prospect.id, e);
                Vec::new()
            }
        };

        if channel.includes_email() {
            self.email_flow(prospect, &history).await;
        }
        if channel.includes_call() {
            self.call_flow(prospect).await;
        }

        self.generator
            .generate_engagement_advice(prospect, &history)
            .await
    }

    /// Resolve a stored prospect and run [`Self::process_prospect`].
    pub async fn process_prospect_by_id(
        &self,
        id: &str,
        channel: Option<OutreachChannel>,
    ) -> Result<String, ServerError> {
        let prospect = self
            .prospects
            .get(id)
            .await?
            .ok_or_else(|| ServerError::NotFound(format!("Prospect {} not found", id)))?;
        Ok(self.process_prospect(&prospect, channel).await)
    }

    async fn email_flow(&self, prospect: &Prospect, history: &[OutreachHistory]) {
        let record = OutreachHistory::pending(&prospect.id, OutreachChannel::Email);
        let history_id = match self.history.add(record).await {
            Ok(id) => id,
            Err(e) => {
                tracing::error!("Failed to record email outreach for {}: {}", prospect.id, e);
                return;
            }
        };

        if let Err(e) = self.send_email(prospect, history, &history_id).await {
            tracing::error!("Error processing email for {}: {}", prospect.company_name, e);
            self.mark_failed(&history_id).await;
        }
    }

    async fn send_email(
        &self,
        prospect: &Prospect,
        history: &[OutreachHistory],
        history_id: &str,
    ) -> Result<(), ServerError> {
        let has_response = history.iter().any(|h| h.status == OutreachStatus::Responded);
        let email = if has_response {
            self.generator.generate_follow_up(prospect, history).await
        } else {
            self.generator.generate_email(prospect).await
        };

        self.history
            .update(
                history_id,
                UpdateHistoryInput::content_with_status(email.to_content(), OutreachStatus::Sent),
            )
            .await?;

        if !self.email_sender.send_email(prospect, &email, history_id).await {
            tracing::warn!("Email delivery failed for {}", prospect.email);
            self.history
                .update(history_id, UpdateHistoryInput::status(OutreachStatus::Failed))
                .await?;
        }

        let current = self.current_level(prospect).await?;
        if current == EngagementLevel::None {
            self.prospects
                .set_engagement_level(&prospect.id, EngagementLevel::Low)
                .await?;
        }
        Ok(())
    }

    async fn call_flow(&self, prospect: &Prospect) {
        if prospect.reachable_phone().is_none() {
            tracing::debug!("No phone number for {}, skipping call", prospect.company_name);
            return;
        }

        let record = OutreachHistory::pending(&prospect.id, OutreachChannel::Call);
        let history_id = match self.history.add(record).await {
            Ok(id) => id,
            Err(e) => {
                tracing::error!("Failed to record call outreach for {}: {}", prospect.id, e);
                return;
            }
        };

        if let Err(e) = self.schedule_call(prospect, &history_id).await {
            tracing::error!("Error processing call for {}: {}", prospect.company_name, e);
            self.mark_failed(&history_id).await;
        }
    }

    async fn schedule_call(&self, prospect: &Prospect, history_id: &str) -> Result<(), ServerError> {
        let script = self.generator.generate_call_script(prospect).await;

        self.history
            .update(
                history_id,
                UpdateHistoryInput::content_with_status(script.to_content(), OutreachStatus::Sent),
            )
            .await?;

        if !self.call_scheduler.schedule_call(prospect, &script, history_id).await {
            tracing::warn!("Call scheduling failed for {}", prospect.company_name);
            self.history
                .update(history_id, UpdateHistoryInput::status(OutreachStatus::Failed))
                .await?;
        }

        // Advances even when scheduling failed.
        let current = self.current_level(prospect).await?;
        self.prospects
            .set_engagement_level(&prospect.id, current.advance())
            .await?;
        Ok(())
    }

    /// Stored level, or the snapshot's when the prospect is not in the store.
    async fn current_level(&self, prospect: &Prospect) -> Result<EngagementLevel, ServerError> {
        Ok(self
            .prospects
            .get(&prospect.id)
            .await?
            .map(|p| p.engagement_level)
            .unwrap_or(prospect.engagement_level))
    }

    async fn mark_failed(&self, history_id: &str) {
        if let Err(e) = self
            .history
            .update(history_id, UpdateHistoryInput::status(OutreachStatus::Failed))
            .await
        {
            tracing::error!("Failed to mark history {} as failed: {}", history_id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LlmConfig;
    use crate::db::Database;
    use crate::error::LlmError;
    use crate::generator::{CallScript, EmailContent};
    use crate::knowledge::KnowledgeBase;
    use crate::llm::{GenerationRequest, LlmClient, TextGenerator};
    use crate::models::{CreateProspectInput, IndustryType};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct Scripted {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TextGenerator for Scripted {
        async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(request.user_message().to_string());
            Ok("Subject: Coverage for you\nBody: Hello there".to_string())
        }
    }

    struct Sender {
        ok: bool,
        calls: AtomicUsize,
    }

    impl Sender {
        fn new(ok: bool) -> Arc<Self> {
            Arc::new(Self { ok, calls: AtomicUsize::new(0) })
        }
    }

    #[async_trait]
    impl EmailSender for Sender {
        async fn send_email(&self, _: &Prospect, _: &EmailContent, _: &str) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.ok
        }
    }

    #[async_trait]
    impl CallScheduler for Sender {
        async fn schedule_call(&self, _: &Prospect, _: &CallScript, _: &str) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.ok
        }
    }

    struct Harness {
        workflow: OutreachWorkflow,
        prospects: ProspectStore,
        history: HistoryStore,
        llm: Arc<Scripted>,
    }

    fn harness(email_ok: bool, call_ok: bool) -> Harness {
        harness_on(Database::open_in_memory(), email_ok, call_ok)
    }

    fn harness_on(db: Database, email_ok: bool, call_ok: bool) -> Harness {
        let prospects = ProspectStore::new(db.clone());
        let history = HistoryStore::new(db);
        let llm = Arc::new(Scripted { prompts: Mutex::new(vec![]) });
        let client = LlmClient::new(llm.clone(), LlmConfig::default());
        let generator = OutreachGenerator::new(client, KnowledgeBase::static_only());
        let workflow = OutreachWorkflow::new(
            prospects.clone(),
            history.clone(),
            generator,
            Sender::new(email_ok),
            Sender::new(call_ok),
        );
        Harness { workflow, prospects, history, llm }
    }

    async fn stored(h: &Harness, phone: Option<&str>, channel: OutreachChannel) -> Prospect {
        h.prospects
            .create(CreateProspectInput {
                company_name: "TechSecure Inc".into(),
                industry: IndustryType::Tech,
                contact_name: "John Smith".into(),
                email: "john@techsecure.com".into(),
                phone: phone.map(String::from),
                engagement_level: EngagementLevel::None,
                notes: "Growing startup".into(),
                preferred_channel: channel,
                objections: vec![],
            })
            .await
            .unwrap()
    }

    async fn level(h: &Harness, id: &str) -> EngagementLevel {
        h.prospects.get(id).await.unwrap().unwrap().engagement_level
    }

    #[tokio::test]
    async fn email_promotes_none_to_low_only_once() {
        let h = harness(true, true);
        let p = stored(&h, None, OutreachChannel::Email).await;

        let advice = h.workflow.process_prospect(&p, None).await;
        assert!(!advice.is_empty());
        assert_eq!(level(&h, &p.id).await, EngagementLevel::Low);

        let p = h.prospects.get(&p.id).await.unwrap().unwrap();
        h.workflow.process_prospect(&p, None).await;
        assert_eq!(level(&h, &p.id).await, EngagementLevel::Low);

        let records = h.history.list_by_prospect(&p.id).await.unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.status == OutreachStatus::Sent));
        assert_eq!(records[0].content["subject"], "Coverage for you");
        assert_eq!(records[0].content["body"], "Hello there");
        assert!(h.prospects.get(&p.id).await.unwrap().unwrap().last_contact.is_some());
    }

    #[tokio::test]
    async fn call_advances_each_time_and_saturates() {
        let h = harness(true, true);
        let p = stored(&h, Some("+15550100"), OutreachChannel::Call).await;

        let expected = [
            EngagementLevel::Low,
            EngagementLevel::Medium,
            EngagementLevel::High,
            EngagementLevel::High,
        ];
        for want in expected {
            h.workflow.process_prospect(&p, None).await;
            assert_eq!(level(&h, &p.id).await, want);
        }
        let records = h.history.list_by_prospect(&p.id).await.unwrap();
        assert_eq!(records.len(), 4);
        assert!(records.iter().all(|r| r.channel == OutreachChannel::Call));
    }

    #[tokio::test]
    async fn call_without_phone_creates_no_record() {
        let h = harness(true, true);
        let p = stored(&h, Some("  "), OutreachChannel::Call).await;

        h.workflow.process_prospect(&p, None).await;
        assert!(h.history.list_by_prospect(&p.id).await.unwrap().is_empty());
        assert_eq!(level(&h, &p.id).await, EngagementLevel::None);
    }

    #[tokio::test]
    async fn both_channels_run_email_then_call() {
        let h = harness(true, true);
        let p = stored(&h, Some("+15550100"), OutreachChannel::Email).await;

        h.workflow.process_prospect(&p, Some(OutreachChannel::Both)).await;

        let records = h.history.list_by_prospect(&p.id).await.unwrap();
        let channels: Vec<_> = records.iter().map(|r| r.channel).collect();
        assert_eq!(channels, vec![OutreachChannel::Email, OutreachChannel::Call]);
        assert_eq!(level(&h, &p.id).await, EngagementLevel::Medium);
    }

    #[tokio::test]
    async fn delivery_failure_marks_failed_but_keeps_content() {
        let h = harness(false, false);
        let p = stored(&h, Some("+15550100"), OutreachChannel::Both).await;

        h.workflow.process_prospect(&p, None).await;

        let records = h.history.list_by_prospect(&p.id).await.unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.status == OutreachStatus::Failed));
        assert_eq!(records[0].content["subject"], "Coverage for you");
        // email promotes none -> low, the failed call still advances low -> medium
        assert_eq!(level(&h, &p.id).await, EngagementLevel::Medium);
    }

    #[tokio::test]
    async fn responded_history_triggers_follow_up() {
        let h = harness(true, true);
        let p = stored(&h, None, OutreachChannel::Email).await;

        h.workflow.process_prospect(&p, None).await;
        let first = h.history.list_by_prospect(&p.id).await.unwrap().remove(0);
        h.history
            .record_response(&first.id, "Interested, send details".into())
            .await
            .unwrap();

        h.llm.prompts.lock().unwrap().clear();
        h.workflow.process_prospect(&p, None).await;

        let prompts = h.llm.prompts.lock().unwrap();
        assert!(prompts[0].contains("Generate a personalized follow-up email"));
        assert!(prompts[0].contains("Response: Interested, send details"));
    }

    #[tokio::test]
    async fn unwritable_data_file_leaves_no_pending_record() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        let h = harness_on(Database::open(sub.join("p.json")).unwrap(), true, true);
        let p = stored(&h, Some("+15550100"), OutreachChannel::Both).await;

        std::fs::remove_dir_all(&sub).unwrap();
        std::fs::write(&sub, "blocker").unwrap();

        let advice = h.workflow.process_prospect(&p, None).await;
        assert!(!advice.is_empty());

        let records = h.history.list_by_prospect(&p.id).await.unwrap();
        assert!(records.iter().all(|r| r.status != OutreachStatus::Pending));
        assert!(records.is_empty());
        assert_eq!(level(&h, &p.id).await, EngagementLevel::None);
    }

    #[tokio::test]
    async fn unknown_prospect_id_is_not_found() {
        let h = harness(true, true);
        let err = h.workflow.process_prospect_by_id("missing", None).await.unwrap_err();
        assert!(matches!(err, ServerError::NotFound(_)));
    }

    #[tokio::test]
    async fn unstored_prospect_still_records_history() {
        let h = harness(true, true);
        let p = Prospect::new(CreateProspectInput {
            company_name: "Ghost Ltd".into(),
            industry: IndustryType::Energy,
            contact_name: "Casper".into(),
            email: "casper@ghost.io".into(),
            phone: None,
            engagement_level: EngagementLevel::None,
            notes: String::new(),
            preferred_channel: OutreachChannel::Email,
            objections: vec![],
        });

        h.workflow.process_prospect(&p, None).await;
        let records = h.history.list_by_prospect(&p.id).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, OutreachStatus::Sent);
    }
}
