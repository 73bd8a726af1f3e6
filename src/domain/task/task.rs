use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::value_objects::{Priority, SkillCatalog, SkillSet, TaskState};
use crate::domain::agent::AgentSummary;
use crate::domain::errors::{DispatchError, DispatchResult};

/// A task as submitted by a caller, before validation
///
/// Fields stay raw so that an unknown, missing or null priority or skill
/// list surfaces as a validation failure rather than a decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskSubmission {
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub required_skills: Option<Vec<String>>,
}

impl TaskSubmission {
    pub fn new(priority: impl Into<String>, required_skills: &[&str]) -> Self {
        Self {
            priority: Some(priority.into()),
            required_skills: Some(required_skills.iter().map(|s| s.to_string()).collect()),
        }
    }

    /// Validates the submission against the skill catalog
    ///
    /// Priority is checked before skills.
    ///
    /// # Returns
    /// * `Ok(TaskSpec)` - Parsed priority and skills
    /// * `Err(DispatchError::InvalidTask)` - Wrapping the first invalid value
    pub fn validate(&self, catalog: &SkillCatalog) -> DispatchResult<TaskSpec> {
        let to_invalid_task = |err: DispatchError| DispatchError::InvalidTask(err.to_string());

        let priority = Priority::parse(self.priority.as_deref().unwrap_or_default())
            .map_err(to_invalid_task)?;
        let required_skills = SkillSet::from_tags(self.required_skills.iter().flatten().cloned());
        required_skills.validate(catalog).map_err(to_invalid_task)?;

        Ok(TaskSpec {
            priority,
            required_skills,
        })
    }
}

/// A validated submission, ready to be placed on an agent's queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSpec {
    pub priority: Priority,
    pub required_skills: SkillSet,
}

/// A unit of work held in an agent's queue or in the completed archive
///
/// # Invariants
/// - `id` is assigned by the store, never by callers
/// - A task is never created in the `Complete` state
/// - State only moves `InProgress -> Complete`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    id: u64,
    priority: Priority,
    required_skills: SkillSet,
    assignment_time: DateTime<Utc>,
    #[serde(rename = "task_state")]
    state: TaskState,
}

impl Task {
    /// Creates an in-progress task from a validated spec at assignment time
    pub(crate) fn assign(id: u64, spec: TaskSpec, assignment_time: DateTime<Utc>) -> Self {
        Self {
            id,
            priority: spec.priority,
            required_skills: spec.required_skills,
            assignment_time,
            state: TaskState::InProgress,
        }
    }

    /// Reconstructs an in-progress task that was assigned earlier
    ///
    /// Used when seeding a store with pre-existing queues.
    pub fn restore(
        id: u64,
        priority: Priority,
        required_skills: SkillSet,
        assignment_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            priority,
            required_skills,
            assignment_time,
            state: TaskState::InProgress,
        }
    }

    /// Transitions the task to `Complete`, consuming the live task
    pub fn complete(mut self) -> DispatchResult<Task> {
        if !self.state.can_transition_to(TaskState::Complete) {
            return Err(DispatchError::PreconditionFailed(format!(
                "Cannot complete task {} in {} state",
                self.id, self.state
            )));
        }
        self.state = TaskState::Complete;
        Ok(self)
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn required_skills(&self) -> &SkillSet {
        &self.required_skills
    }

    pub fn assignment_time(&self) -> DateTime<Utc> {
        self.assignment_time
    }

    pub fn state(&self) -> TaskState {
        self.state
    }
}

/// A task together with a slim view of the agent holding it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignedTask {
    #[serde(flatten)]
    pub task: Task,
    pub assigned_agent: AgentSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_submission_parses() {
        let spec = TaskSubmission::new("low", &["skill1", "skill3"])
            .validate(&SkillCatalog::default())
            .unwrap();
        assert_eq!(spec.priority, Priority::Low);
        assert_eq!(spec.required_skills, SkillSet::from_tags(["skill1", "skill3"]));
    }

    #[test]
    fn missing_priority_is_reported_before_skills() {
        let err = TaskSubmission::new("", &[])
            .validate(&SkillCatalog::default())
            .unwrap_err();
        assert_eq!(err, DispatchError::InvalidTask("Priority is required".to_string()));
    }

    #[test]
    fn missing_skills_is_invalid_task() {
        let err = TaskSubmission::new("high", &[])
            .validate(&SkillCatalog::default())
            .unwrap_err();
        assert!(matches!(err, DispatchError::InvalidTask(_)));
        assert!(err.to_string().contains("At least one Required Skill"));
    }

    #[test]
    fn null_fields_are_validation_failures() {
        let submission: TaskSubmission =
            serde_json::from_str(r#"{"priority": null, "required_skills": ["skill1"]}"#).unwrap();
        assert_eq!(
            submission.validate(&SkillCatalog::default()).unwrap_err(),
            DispatchError::InvalidTask("Priority is required".to_string())
        );

        let submission: TaskSubmission =
            serde_json::from_str(r#"{"priority": "low", "required_skills": null}"#).unwrap();
        assert_eq!(
            submission.validate(&SkillCatalog::default()).unwrap_err(),
            DispatchError::InvalidTask("At least one Required Skill is required".to_string())
        );
    }

    #[test]
    fn assigned_task_starts_in_progress() {
        let spec = TaskSubmission::new("high", &["skill1"])
            .validate(&SkillCatalog::default())
            .unwrap();
        let task = Task::assign(4, spec, Utc::now());
        assert_eq!(task.id(), 4);
        assert_eq!(task.state(), TaskState::InProgress);
    }

    #[test]
    fn complete_is_one_way() {
        let task = Task::restore(1, Priority::Low, SkillSet::from_tags(["skill2"]), Utc::now());
        let done = task.complete().unwrap();
        assert_eq!(done.state(), TaskState::Complete);
        assert!(matches!(
            done.complete(),
            Err(DispatchError::PreconditionFailed(_))
        ));
    }

    #[test]
    fn task_wire_shape() {
        let task = Task::restore(9, Priority::High, SkillSet::from_tags(["skill1"]), Utc::now());
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["id"], 9);
        assert_eq!(json["priority"], "high");
        assert_eq!(json["required_skills"], serde_json::json!(["skill1"]));
        assert_eq!(json["task_state"], 0);
        assert!(json["assignment_time"].is_string());
        assert!(json.get("assigned_agent").is_none());
    }
}
