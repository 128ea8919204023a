pub mod config;
pub mod error;
pub mod features;
pub mod middleware;
pub mod state;

use axum::{Json, Router, routing::get};
use chrono::Utc;
use serde_json::{Value, json};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use features::{hackathons, trash};
use middleware::auth::ApiKeys;
pub use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        hackathons::handlers::list_hackathons,
        hackathons::handlers::list_featured,
        hackathons::handlers::list_upcoming,
        hackathons::handlers::get_stats,
        hackathons::handlers::get_hackathon,
        hackathons::handlers::create_hackathon,
        hackathons::handlers::update_hackathon,
        hackathons::handlers::delete_hackathon,
        hackathons::handlers::trash_hackathon,
        hackathons::handlers::refresh_status,
        trash::handlers::list_trash,
        trash::handlers::purge_expired,
    ),
    components(
        schemas(
            storage::dto::common::PaginationMeta,
            storage::dto::hackathon::HackathonStats,
            storage::dto::hackathon::StatusCount,
            storage::dto::hackathon::CategoryCount,
            storage::dto::hackathon::StatusResponse,
            storage::dto::hackathon::PurgeResponse,
            storage::dto::hackathon::CreateHackathonRequest,
            storage::dto::hackathon::UpdateHackathonRequest,
            storage::store::SortField,
            storage::store::SortOrder,
            storage::models::Hackathon,
            storage::models::TrashedHackathon,
            storage::models::Category,
            storage::models::Difficulty,
            storage::models::HackathonStatus,
            storage::models::Location,
            storage::models::LocationKind,
            storage::models::Address,
            storage::models::Prize,
            storage::models::Links,
            storage::models::TeamSize,
            storage::models::Source,
        )
    ),
    tags(
        (name = "hackathons", description = "Hackathon listing endpoints"),
        (name = "trash", description = "Soft-deleted hackathons"),
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

/// Full API router: hackathon and trash endpoints, health check, Swagger UI.
pub fn app(state: AppState, api_keys: ApiKeys) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .route("/api/health", get(health))
        .nest("/api/hackathons", hackathons::routes::routes(api_keys.clone()))
        .nest("/api/trash", trash::routes::routes(api_keys))
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now(),
    }))
}
