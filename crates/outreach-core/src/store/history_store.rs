use crate::db::Database;
use crate::error::ServerError;
use crate::models::{OutreachHistory, OutreachStatus, UpdateHistoryInput};

/// Append-only outreach history.
#[derive(Clone)]
pub struct HistoryStore {
    db: Database,
}

impl HistoryStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Append a record and stamp the owning prospect's `last_contact`.
    pub async fn add(&self, history: OutreachHistory) -> Result<String, ServerError> {
        let id = history.id.clone();
        self.db
            .write_async(move |doc| {
                if let Some(p) = doc.prospects.get_mut(&history.prospect_id) {
                    p.last_contact = Some(history.timestamp);
                }
                doc.history.insert(history.id.clone(), history);
            })
            .await?;
        Ok(id)
    }

    /// Patch `content`, `status` and/or `response` of an existing record.
    ///
    /// Returns `Ok(false)` for an unknown id. A status change that the
    /// record's current status does not allow is rejected.
    pub async fn update(&self, id: &str, input: UpdateHistoryInput) -> Result<bool, ServerError> {
        let id = id.to_string();
        self.db
            .write_async(move |doc| {
                let Some(h) = doc.history.get_mut(&id) else {
                    return Ok(false);
                };
                if let Some(next) = input.status {
                    if next != h.status && !h.status.can_transition_to(next) {
                        return Err(ServerError::BadRequest(format!(
                            "History {} cannot move from {} to {}",
                            id, h.status, next
                        )));
                    }
                }
                if let Some(v) = input.content { h.content = v; }
                if let Some(v) = input.status { h.status = v; }
                if let Some(v) = input.response { h.response = Some(v); }
                Ok(true)
            })
            .await?
    }

    pub async fn get(&self, id: &str) -> Result<Option<OutreachHistory>, ServerError> {
        self.db.read(|doc| doc.history.get(id).cloned())
    }

    /// All records for a prospect, in insertion order.
    pub async fn list_by_prospect(&self, prospect_id: &str) -> Result<Vec<OutreachHistory>, ServerError> {
        self.db.read(|doc| {
            doc.history
                .values()
                .filter(|h| h.prospect_id == prospect_id)
                .cloned()
                .collect()
        })
    }

    /// Record a reply from the prospect, moving the record to `responded`.
    pub async fn record_response(
        &self,
        id: &str,
        response: String,
    ) -> Result<Option<OutreachHistory>, ServerError> {
        let patch = UpdateHistoryInput {
            status: Some(OutreachStatus::Responded),
            response: Some(response),
            content: None,
        };
        if !self.update(id, patch).await? {
            return Ok(None);
        }
        self.get(id).await
    }
}
