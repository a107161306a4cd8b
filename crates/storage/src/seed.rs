//! Fixed sample data for local development.

use crate::dto::athlete::CreateAthleteRequest;
use crate::error::Result;
use crate::models::Athlete;
use crate::repository::athlete::AthleteRepository;
use crate::store::DocumentStore;

pub fn sample_athletes() -> Vec<CreateAthleteRequest> {
    vec![
        CreateAthleteRequest::new("Alex Johnson", Some(15), Some("alex.johnson@example.com")),
        CreateAthleteRequest::new("Samantha Lee", Some(19), Some("sam.lee@example.com")),
        CreateAthleteRequest::new("Marcus Wright", Some(22), Some("marcus.wright@example.com")),
    ]
}

/// Wipes the athlete collection and inserts the sample set.
///
/// Running it repeatedly always leaves exactly the sample athletes behind.
pub async fn seed_athletes(store: &dyn DocumentStore) -> Result<Vec<Athlete>> {
    AthleteRepository::new(store)
        .replace_all(&sample_athletes())
        .await
}
