use serde::Serialize;

use crate::domain::task::{Priority, SkillSet, Task};

/// A worker that receives tasks
///
/// # Invariants
/// - `id` is assigned by the store on registration and is never reused
/// - `skills` never change after creation
/// - Queue position 0 is the agent's current task
///
/// # Example
/// ```
/// use agent_dispatch_api::domain::agent::Agent;
/// use agent_dispatch_api::domain::task::{Priority, SkillSet};
///
/// let agent = Agent::new("Adam", SkillSet::from_tags(["skill1", "skill2"]));
///
/// assert!(agent.is_idle());
/// assert!(agent.available_for(Priority::Low));
/// assert!(agent.has_skills(&SkillSet::from_tags(["skill2"])));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Agent {
    id: u64,
    name: String,
    skills: SkillSet,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tasks: Vec<Task>,
}

impl Agent {
    /// Creates an unregistered agent with an empty queue
    pub fn new(name: impl Into<String>, skills: SkillSet) -> Self {
        Self {
            id: 0,
            name: name.into(),
            skills,
            tasks: Vec::new(),
        }
    }

    /// Preloads the queue, head first
    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self
    }

    pub fn has_skills(&self, required: &SkillSet) -> bool {
        self.skills.covers(required)
    }

    /// Whether this agent may take on a new task of the given priority
    ///
    /// # Rules
    /// - Holding any `High` task blocks every new assignment
    /// - Holding a `Low` task blocks new `Low` work only
    pub fn available_for(&self, priority: Priority) -> bool {
        self.tasks.iter().all(|task| match task.priority() {
            Priority::High => false,
            Priority::Low => priority != Priority::Low,
        })
    }

    pub fn is_idle(&self) -> bool {
        self.tasks.is_empty()
    }

    /// The task at the head of the queue
    pub fn current_task(&self) -> Option<&Task> {
        self.tasks.first()
    }

    pub fn find_task(&self, task_id: u64) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == task_id)
    }

    pub fn summary(&self) -> AgentSummary {
        AgentSummary {
            id: self.id,
            name: self.name.clone(),
            skills: self.skills.clone(),
        }
    }

    pub(crate) fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    /// Appends to the back of the queue
    pub(crate) fn push_task(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Inserts at the front of the queue, making it the current task
    pub(crate) fn unshift_task(&mut self, task: Task) {
        self.tasks.insert(0, task);
    }

    /// Removes the first queued task with the given id
    pub(crate) fn remove_task(&mut self, task_id: u64) -> Option<Task> {
        let position = self.tasks.iter().position(|task| task.id() == task_id)?;
        Some(self.tasks.remove(position))
    }

    // ===== Getters =====

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn skills(&self) -> &SkillSet {
        &self.skills
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }
}

/// Slim projection of an agent, without its queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentSummary {
    pub id: u64,
    pub name: String,
    pub skills: SkillSet,
}
