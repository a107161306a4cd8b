use axum::Router;
use storage::Database;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::features::athletes;
use crate::middleware::auth::ApiKeys;
use crate::openapi::ApiDoc;

/// Builds the full application router around an injected store handle.
pub fn router(db: Database, api_keys: ApiKeys) -> Router {
    Router::new()
        .nest("/api/athletes", athletes::routes::routes(api_keys))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(db)
}
