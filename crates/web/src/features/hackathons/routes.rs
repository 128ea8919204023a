use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use super::handlers::{
    create_hackathon, delete_hackathon, get_hackathon, get_stats, list_featured,
    list_hackathons, list_upcoming, refresh_status, trash_hackathon, update_hackathon,
};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_hackathon))
        .route("/:id", put(update_hackathon))
        .route("/:id", delete(delete_hackathon))
        .route("/:id/trash", post(trash_hackathon))
        .route("/:id/status", post(refresh_status))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_hackathons))
        .route("/featured", get(list_featured))
        .route("/upcoming", get(list_upcoming))
        .route("/stats", get(get_stats))
        .route("/:id", get(get_hackathon))
        .merge(protected)
}
