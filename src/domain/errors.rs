use thiserror::Error;

/// Errors that can occur while validating, assigning or completing tasks
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// A priority or skill value is missing or outside its closed set
    #[error("{0}")]
    InvalidValue(String),

    /// A submitted task failed validation
    #[error("{0}")]
    InvalidTask(String),

    #[error("No existing agents possess the required skills for this task")]
    NoCapableAgents,

    #[error("No agents are currently available for this task priority")]
    NoAvailableAgents,

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: u64 },

    /// Internal invariant violation; never a caller mistake
    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),
}

impl DispatchError {
    pub fn agent_not_found(id: u64) -> Self {
        DispatchError::NotFound { entity: "Agent", id }
    }

    pub fn task_not_found(id: u64) -> Self {
        DispatchError::NotFound { entity: "Task", id }
    }
}

pub type DispatchResult<T> = Result<T, DispatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_failures_carry_client_messages() {
        assert_eq!(
            DispatchError::NoCapableAgents.to_string(),
            "No existing agents possess the required skills for this task"
        );
        assert_eq!(
            DispatchError::NoAvailableAgents.to_string(),
            "No agents are currently available for this task priority"
        );
    }

    #[test]
    fn not_found_names_entity_and_id() {
        assert_eq!(DispatchError::task_not_found(7).to_string(), "Task not found: 7");
        assert_eq!(DispatchError::agent_not_found(2).to_string(), "Agent not found: 2");
    }
}
