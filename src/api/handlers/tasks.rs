use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::api::errors::ApiError;
use crate::api::SharedStore;
use crate::domain::errors::DispatchError;
use crate::domain::task::{AssignedTask, TaskSubmission};

/// Request body for completing a task
#[derive(Debug, Deserialize)]
pub struct CompleteTaskRequest {
    #[serde(default)]
    pub id: u64,
}

/// Assign a new task to the most suitable agent
///
/// POST /tasks/new
pub async fn create_task(
    State(store): State<SharedStore>,
    payload: Result<Json<TaskSubmission>, JsonRejection>,
) -> Result<(StatusCode, Json<AssignedTask>), ApiError> {
    let Json(submission) = payload.map_err(|rejection| {
        tracing::warn!("create_task: body rejected: {}", rejection.body_text());
        ApiError::from(rejection)
    })?;

    let assignment = store.assign(submission.clone()).await.map_err(|e| {
        tracing::warn!(?submission, "create_task: assignment failed: {}", e);
        assignment_error(e)
    })?;

    // Re-fetch so the response carries the owner summary
    let assigned = store
        .find_task_with_owner(assignment.task_id)
        .await
        .map_err(|e| {
            tracing::error!(task_id = assignment.task_id, "create_task: re-fetch failed: {}", e);
            ApiError::internal_server_error(format!(
                "Could not find saved task ({}) in data store: {}",
                assignment.task_id, e
            ))
        })?;

    Ok((StatusCode::CREATED, Json(assigned)))
}

/// Maps an `assign` failure onto its HTTP status
///
/// Value errors reach this point already wrapped as `InvalidTask`; anything
/// else outside the two conflict kinds is a store fault.
fn assignment_error(e: DispatchError) -> ApiError {
    match e {
        DispatchError::InvalidTask(_) => {
            ApiError::bad_request(format!("New Task is invalid: {}", e))
        }
        DispatchError::NoCapableAgents | DispatchError::NoAvailableAgents => {
            ApiError::conflict(format!("Could not assign task: {}", e))
        }
        other => ApiError::internal_server_error(format!("Could not assign task: {}", other)),
    }
}

/// Mark a task as complete by ID
///
/// POST /tasks/complete
pub async fn complete_task(
    State(store): State<SharedStore>,
    payload: Result<Json<CompleteTaskRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(req) = payload.map_err(|rejection| {
        tracing::warn!("complete_task: body rejected: {}", rejection.body_text());
        ApiError::from(rejection)
    })?;

    store.complete(req.id).await.map_err(|e| {
        tracing::warn!(task_id = req.id, "complete_task: {}", e);
        ApiError::bad_request(format!("Error occurred marking task as completed: {}", e))
    })?;

    Ok(StatusCode::OK)
}
