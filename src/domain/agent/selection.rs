// Candidate selection over roster snapshots
//
// Every function here is pure: it borrows agents and returns a narrowed
// or reordered view without touching any queue.

use rand::seq::SliceRandom;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::agent::Agent;
use crate::domain::errors::{DispatchError, DispatchResult};
use crate::domain::task::{Priority, SkillSet};

/// Keeps agents whose skills cover every required skill
pub fn filter_by_skills<'a>(
    roster: &[&'a Agent],
    required: &SkillSet,
) -> DispatchResult<Vec<&'a Agent>> {
    let matches: Vec<&Agent> = roster
        .iter()
        .copied()
        .filter(|agent| agent.has_skills(required))
        .collect();

    if matches.is_empty() {
        return Err(DispatchError::NoCapableAgents);
    }
    Ok(matches)
}

/// Keeps agents that may take on new work of the given priority
pub fn filter_by_priority_availability<'a>(
    roster: &[&'a Agent],
    priority: Priority,
) -> DispatchResult<Vec<&'a Agent>> {
    let matches: Vec<&Agent> = roster
        .iter()
        .copied()
        .filter(|agent| agent.available_for(priority))
        .collect();

    if matches.is_empty() {
        return Err(DispatchError::NoAvailableAgents);
    }
    Ok(matches)
}

/// Keeps agents with an empty queue
pub fn filter_idle<'a>(roster: &[&'a Agent]) -> Vec<&'a Agent> {
    roster.iter().copied().filter(|agent| agent.is_idle()).collect()
}

/// Sorts busy agents so the one with the most recently assigned head task
/// comes first; equal stamps fall back to ascending agent id
///
/// # Errors
/// * `PreconditionFailed` - If any agent in `roster` is idle
pub fn order_by_queue_head_recency(roster: &mut [&Agent]) -> DispatchResult<()> {
    if let Some(idle) = roster.iter().find(|agent| agent.is_idle()) {
        return Err(DispatchError::PreconditionFailed(format!(
            "Agent {} is idle, cannot order by current task assignment time",
            idle.id()
        )));
    }

    roster.sort_by(|a, b| {
        let a_time = a.current_task().map(|task| task.assignment_time());
        let b_time = b.current_task().map(|task| task.assignment_time());
        match b_time.cmp(&a_time) {
            Ordering::Equal => a.id().cmp(&b.id()),
            other => other,
        }
    });
    Ok(())
}

/// Policy for choosing among several idle candidates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdleSelection {
    /// Roster order; the first idle candidate wins
    #[default]
    First,
    /// Uniformly random among idle candidates
    Random,
}

impl IdleSelection {
    /// Picks one agent, or `None` when `candidates` is empty
    pub fn pick<'a>(&self, candidates: &[&'a Agent]) -> Option<&'a Agent> {
        match self {
            IdleSelection::First => candidates.first().copied(),
            IdleSelection::Random => candidates.choose(&mut rand::thread_rng()).copied(),
        }
    }
}

impl FromStr for IdleSelection {
    type Err = DispatchError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "first" => Ok(IdleSelection::First),
            "random" => Ok(IdleSelection::Random),
            other => Err(DispatchError::InvalidValue(format!(
                "Invalid idle selection policy: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for IdleSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdleSelection::First => write!(f, "first"),
            IdleSelection::Random => write!(f, "random"),
        }
    }
}
