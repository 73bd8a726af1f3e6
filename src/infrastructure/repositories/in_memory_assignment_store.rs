use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::agent::{selection, Agent, IdleSelection};
use crate::domain::errors::{DispatchError, DispatchResult};
use crate::domain::repositories::{Assignment, AssignmentStore};
use crate::domain::task::{AssignedTask, SkillCatalog, Task, TaskSpec, TaskSubmission};

/// In-memory implementation of AssignmentStore
///
/// Holds the roster and the completed archive behind a single
/// reader/writer lock. Every mutation, including candidate selection
/// and id generation, runs inside one write scope.
pub struct InMemoryAssignmentStore {
    catalog: SkillCatalog,
    idle_selection: IdleSelection,
    state: RwLock<StoreState>,
}

#[derive(Debug, Default)]
struct StoreState {
    agents: Vec<Agent>,
    completed: Vec<AssignedTask>,
    last_stamp: Option<DateTime<Utc>>,
}

/// Where a new task lands in the chosen agent's queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Push,
    Unshift,
}

impl InMemoryAssignmentStore {
    /// Creates an empty store
    ///
    /// # Arguments
    /// * `catalog` - Closed set of skills submissions are validated against
    /// * `idle_selection` - How to choose among several idle candidates
    pub fn new(catalog: SkillCatalog, idle_selection: IdleSelection) -> Self {
        Self {
            catalog,
            idle_selection,
            state: RwLock::new(StoreState::default()),
        }
    }

    /// Creates a store pre-populated with agents, which may carry queued tasks
    ///
    /// Agents receive ids 1..=n in the given order.
    pub fn with_agents(
        agents: Vec<Agent>,
        catalog: SkillCatalog,
        idle_selection: IdleSelection,
    ) -> Self {
        let mut state = StoreState::default();
        for agent in agents {
            state.register(agent);
        }

        Self {
            catalog,
            idle_selection,
            state: RwLock::new(state),
        }
    }
}

impl Default for InMemoryAssignmentStore {
    fn default() -> Self {
        Self::new(SkillCatalog::default(), IdleSelection::default())
    }
}

impl StoreState {
    fn register(&mut self, mut agent: Agent) -> u64 {
        let id = self.next_agent_id();
        agent.set_id(id);
        self.agents.push(agent);
        id
    }

    fn next_agent_id(&self) -> u64 {
        self.agents.iter().map(Agent::id).max().unwrap_or(0) + 1
    }

    /// Next id above every task ever handed out, live or archived
    fn next_task_id(&self) -> u64 {
        let live = self
            .agents
            .iter()
            .flat_map(|agent| agent.tasks())
            .map(Task::id);
        let archived = self.completed.iter().map(|entry| entry.task.id());

        live.chain(archived).max().unwrap_or(0) + 1
    }

    /// Current time, clamped so stamps never go backwards
    fn next_stamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let stamp = match self.last_stamp {
            Some(last) if last > now => last,
            _ => now,
        };
        self.last_stamp = Some(stamp);
        stamp
    }

    fn select_agent(
        &self,
        spec: &TaskSpec,
        idle_selection: IdleSelection,
    ) -> DispatchResult<(u64, Placement)> {
        let roster: Vec<&Agent> = self.agents.iter().collect();
        let skilled = selection::filter_by_skills(&roster, &spec.required_skills)?;
        let mut available = selection::filter_by_priority_availability(&skilled, spec.priority)?;

        let idle = selection::filter_idle(&available);
        if let Some(agent) = idle_selection.pick(&idle) {
            return Ok((agent.id(), Placement::Push));
        }

        selection::order_by_queue_head_recency(&mut available)?;
        let agent = available
            .first()
            .ok_or(DispatchError::NoAvailableAgents)?;
        Ok((agent.id(), Placement::Unshift))
    }

    fn agent_mut(&mut self, id: u64) -> DispatchResult<&mut Agent> {
        self.agents
            .iter_mut()
            .find(|agent| agent.id() == id)
            .ok_or_else(|| DispatchError::agent_not_found(id))
    }
}

#[async_trait]
impl AssignmentStore for InMemoryAssignmentStore {
    async fn register_agents(&self, agents: Vec<Agent>) -> DispatchResult<Vec<u64>> {
        let mut state = self.state.write().await;
        let ids = agents
            .into_iter()
            .map(|agent| state.register(agent))
            .collect::<Vec<_>>();

        tracing::debug!(?ids, "registered agents");
        Ok(ids)
    }

    async fn list_agents(&self) -> DispatchResult<Vec<Agent>> {
        let state = self.state.read().await;
        Ok(state.agents.clone())
    }

    async fn find_agent(&self, id: u64) -> DispatchResult<Agent> {
        let state = self.state.read().await;
        state
            .agents
            .iter()
            .find(|agent| agent.id() == id)
            .cloned()
            .ok_or_else(|| DispatchError::agent_not_found(id))
    }

    async fn find_task(&self, id: u64) -> DispatchResult<Task> {
        let state = self.state.read().await;
        state
            .agents
            .iter()
            .find_map(|agent| agent.find_task(id))
            .cloned()
            .ok_or_else(|| DispatchError::task_not_found(id))
    }

    async fn find_task_with_owner(&self, id: u64) -> DispatchResult<AssignedTask> {
        let state = self.state.read().await;
        state
            .agents
            .iter()
            .find_map(|agent| {
                agent.find_task(id).map(|task| AssignedTask {
                    task: task.clone(),
                    assigned_agent: agent.summary(),
                })
            })
            .ok_or_else(|| DispatchError::task_not_found(id))
    }

    async fn assign(&self, submission: TaskSubmission) -> DispatchResult<Assignment> {
        let spec = submission.validate(&self.catalog)?;

        let mut state = self.state.write().await;
        let (agent_id, placement) = state.select_agent(&spec, self.idle_selection)?;

        let task_id = state.next_task_id();
        let stamp = state.next_stamp();
        let task = Task::assign(task_id, spec, stamp);

        let agent = state.agent_mut(agent_id)?;
        match placement {
            Placement::Push => agent.push_task(task),
            Placement::Unshift => agent.unshift_task(task),
        }

        tracing::debug!(agent_id, task_id, ?placement, "task assigned");
        Ok(Assignment { agent_id, task_id })
    }

    async fn complete(&self, task_id: u64) -> DispatchResult<()> {
        let mut guard = self.state.write().await;
        let state = &mut *guard;

        let owner = state
            .agents
            .iter_mut()
            .find(|agent| agent.find_task(task_id).is_some())
            .ok_or_else(|| DispatchError::task_not_found(task_id))?;

        // Build the archive entry before touching the queue so a failed
        // transition leaves everything as it was.
        let live = owner
            .find_task(task_id)
            .cloned()
            .ok_or_else(|| DispatchError::task_not_found(task_id))?;
        let archived = AssignedTask {
            task: live.complete()?,
            assigned_agent: owner.summary(),
        };

        owner.remove_task(task_id);
        let agent_id = owner.id();
        state.completed.push(archived);

        tracing::info!(task_id, agent_id, "task completed");
        Ok(())
    }

    async fn completed_tasks(&self) -> DispatchResult<Vec<AssignedTask>> {
        let state = self.state.read().await;
        Ok(state.completed.clone())
    }
}
