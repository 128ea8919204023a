use axum::{
    Router, middleware,
    routing::{delete, get},
};

use super::handlers::{list_trash, purge_expired};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    Router::new()
        .route("/", get(list_trash))
        .route("/expired", delete(purge_expired))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth))
}
