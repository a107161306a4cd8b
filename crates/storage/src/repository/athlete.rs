use uuid::Uuid;

use crate::dto::athlete::{CreateAthleteRequest, UpdateAthleteRequest};
use crate::error::Result;
use crate::models::{Athlete, AthleteFields};
use crate::store::{Body, DocumentStore, into_body};

/// Collection holding athlete documents
pub const ATHLETES: &str = "athletes";

pub struct AthleteRepository<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> AthleteRepository<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// List all athletes
    pub async fn list(&self) -> Result<Vec<Athlete>> {
        self.store
            .find_all(ATHLETES)
            .await?
            .into_iter()
            .map(Athlete::try_from)
            .collect()
    }

    /// Find athlete by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Athlete> {
        self.store.find_by_id(ATHLETES, id).await?.try_into()
    }

    /// Create a new athlete
    pub async fn create(&self, req: &CreateAthleteRequest) -> Result<Athlete> {
        let body = fields_body(&AthleteFields::from(req))?;
        self.store.insert(ATHLETES, body).await?.try_into()
    }

    /// Merge the fields present in `req` into an existing athlete
    pub async fn update(&self, id: Uuid, req: &UpdateAthleteRequest) -> Result<Athlete> {
        if req.is_empty() {
            return self.find_by_id(id).await;
        }

        let patch = into_body(serde_json::to_value(req)?)?;
        self.store.merge(ATHLETES, id, patch).await?.try_into()
    }

    /// Delete an athlete by ID
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.store.delete(ATHLETES, id).await
    }

    /// Remove every athlete, then insert `athletes`
    pub async fn replace_all(&self, athletes: &[CreateAthleteRequest]) -> Result<Vec<Athlete>> {
        self.store.delete_all(ATHLETES).await?;

        let bodies = athletes
            .iter()
            .map(|req| fields_body(&AthleteFields::from(req)))
            .collect::<Result<Vec<Body>>>()?;

        self.store
            .insert_many(ATHLETES, bodies)
            .await?
            .into_iter()
            .map(Athlete::try_from)
            .collect()
    }
}

fn fields_body(fields: &AthleteFields) -> Result<Body> {
    into_body(serde_json::to_value(fields)?)
}
