use std::sync::Arc;
use storage::HackathonStore;
use storage::services::TrashPolicy;

/// Shared by every handler. The store is a trait object so the router runs
/// against Postgres in production and the in-memory store in tests.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn HackathonStore>,
    pub trash: TrashPolicy,
}

impl AppState {
    pub fn new(store: Arc<dyn HackathonStore>, trash: TrashPolicy) -> Self {
        Self { store, trash }
    }
}
