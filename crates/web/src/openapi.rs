use utoipa::OpenApi;

use crate::features::athletes::handlers;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_athletes,
        handlers::get_athlete,
        handlers::create_athlete,
        handlers::update_athlete,
        handlers::delete_athlete,
    ),
    components(
        schemas(
            storage::dto::athlete::CreateAthleteRequest,
            storage::dto::athlete::UpdateAthleteRequest,
            storage::dto::athlete::AthleteResponse,
            storage::dto::common::MessageResponse,
            storage::dto::common::ErrorResponse,
            storage::models::Athlete,
        )
    ),
    tags(
        (name = "athletes", description = "Athlete records"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}
