use storage::{
    dto::athlete::{CreateAthleteRequest, UpdateAthleteRequest},
    error::Result,
    models::Athlete,
    repository::athlete::AthleteRepository,
    store::DocumentStore,
};
use uuid::Uuid;

/// List all athletes
pub async fn list_athletes(store: &dyn DocumentStore) -> Result<Vec<Athlete>> {
    let repo = AthleteRepository::new(store);
    repo.list().await
}

/// Get athlete by id
pub async fn get_athlete(store: &dyn DocumentStore, id: Uuid) -> Result<Athlete> {
    let repo = AthleteRepository::new(store);
    repo.find_by_id(id).await
}

/// Create a new athlete
pub async fn create_athlete(
    store: &dyn DocumentStore,
    request: &CreateAthleteRequest,
) -> Result<Athlete> {
    let repo = AthleteRepository::new(store);
    let athlete = repo.create(request).await?;
    tracing::info!(athlete_id = %athlete.id, "Athlete created");
    Ok(athlete)
}

/// Update an athlete
pub async fn update_athlete(
    store: &dyn DocumentStore,
    id: Uuid,
    request: &UpdateAthleteRequest,
) -> Result<Athlete> {
    let repo = AthleteRepository::new(store);
    repo.update(id, request).await
}

/// Delete an athlete
pub async fn delete_athlete(store: &dyn DocumentStore, id: Uuid) -> Result<()> {
    let repo = AthleteRepository::new(store);
    repo.delete(id).await?;
    tracing::info!(athlete_id = %id, "Athlete deleted");
    Ok(())
}
