use axum::{extract::State, Json};

use crate::api::errors::ApiError;
use crate::api::SharedStore;
use crate::domain::agent::Agent;

/// List all agents with their queued tasks
///
/// GET /
pub async fn list_agents(State(store): State<SharedStore>) -> Result<Json<Vec<Agent>>, ApiError> {
    let agents = store.list_agents().await.map_err(|e| {
        tracing::error!("list_agents: {}", e);
        ApiError::internal_server_error("Error retrieving agents list from data store")
    })?;

    Ok(Json(agents))
}

/// Health check endpoint
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}
