// API layer module (adapters for controllers)
// Follows Hexagonal Architecture - API is an adapter

pub mod errors;
pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::domain::repositories::AssignmentStore;
use handlers::{agents, tasks};

/// Store handle shared by every handler
pub type SharedStore = Arc<dyn AssignmentStore>;

/// Builds the application routes over a store
pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/", get(agents::list_agents))
        .route("/health", get(agents::health_check))
        .route("/tasks/new", post(tasks::create_task))
        .route("/tasks/complete", post(tasks::complete_task))
        .with_state(store)
}
