use crate::db::Database;
use crate::error::ServerError;
use crate::models::{
    CreateProspectInput, EngagementLevel, Prospect, ProspectFilter, UpdateProspectInput,
};

#[derive(Clone)]
pub struct ProspectStore {
    db: Database,
}

impl ProspectStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Validate the input, assign an id and persist.
    pub async fn create(&self, input: CreateProspectInput) -> Result<Prospect, ServerError> {
        input.validate().map_err(ServerError::BadRequest)?;
        let prospect = Prospect::new(input);
        self.add(prospect.clone()).await?;
        Ok(prospect)
    }

    /// Insert (or replace) a prospect under its own id.
    pub async fn add(&self, prospect: Prospect) -> Result<String, ServerError> {
        let id = prospect.id.clone();
        self.db
            .write_async(move |doc| {
                doc.prospects.insert(prospect.id.clone(), prospect);
            })
            .await?;
        Ok(id)
    }

    pub async fn get(&self, id: &str) -> Result<Option<Prospect>, ServerError> {
        self.db.read(|doc| doc.prospects.get(id).cloned())
    }

    pub async fn list(&self, filter: &ProspectFilter) -> Result<Vec<Prospect>, ServerError> {
        self.db.read(|doc| {
            doc.prospects
                .values()
                .filter(|p| filter.matches(p))
                .cloned()
                .collect()
        })
    }

    pub async fn update(
        &self,
        id: &str,
        input: UpdateProspectInput,
    ) -> Result<Option<Prospect>, ServerError> {
        let id = id.to_string();
        self.db
            .write_async(move |doc| {
                let p = doc.prospects.get_mut(&id)?;
                if let Some(v) = input.company_name { p.company_name = v; }
                if let Some(v) = input.contact_name { p.contact_name = v; }
                if let Some(v) = input.email { p.email = v; }
                if let Some(v) = input.phone { p.phone = Some(v); }
                if let Some(v) = input.engagement_level { p.engagement_level = v; }
                if let Some(v) = input.notes { p.notes = v; }
                if let Some(v) = input.preferred_channel { p.preferred_channel = v; }
                if let Some(v) = input.objections { p.objections = v; }
                Some(p.clone())
            })
            .await
    }

    pub async fn set_engagement_level(
        &self,
        id: &str,
        level: EngagementLevel,
    ) -> Result<bool, ServerError> {
        let patch = UpdateProspectInput {
            engagement_level: Some(level),
            ..Default::default()
        };
        Ok(self.update(id, patch).await?.is_some())
    }
}
