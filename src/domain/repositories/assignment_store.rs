use async_trait::async_trait;

use crate::domain::agent::Agent;
use crate::domain::errors::DispatchResult;
use crate::domain::task::{AssignedTask, Task, TaskSubmission};

/// Outcome of a successful assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    pub agent_id: u64,
    pub task_id: u64,
}

/// Store trait for the agent roster and the completed-task archive
///
/// Defines the contract for assigning and completing tasks.
/// Implementations own all queue mutation.
#[async_trait]
pub trait AssignmentStore: Send + Sync {
    /// Register agents, giving each the next unused agent id
    async fn register_agents(&self, agents: Vec<Agent>) -> DispatchResult<Vec<u64>>;

    /// Snapshot of the current roster
    async fn list_agents(&self) -> DispatchResult<Vec<Agent>>;

    /// Find an agent by its ID
    async fn find_agent(&self, id: u64) -> DispatchResult<Agent>;

    /// Find a live task in any agent's queue
    async fn find_task(&self, id: u64) -> DispatchResult<Task>;

    /// Find a live task along with a summary of the agent holding it
    async fn find_task_with_owner(&self, id: u64) -> DispatchResult<AssignedTask>;

    /// Validate a submission and place it on the best available agent's queue
    async fn assign(&self, submission: TaskSubmission) -> DispatchResult<Assignment>;

    /// Archive a live task as complete and remove it from its agent's queue
    async fn complete(&self, task_id: u64) -> DispatchResult<()>;

    /// Snapshot of the completed-task archive, oldest first
    async fn completed_tasks(&self) -> DispatchResult<Vec<AssignedTask>>;
}
