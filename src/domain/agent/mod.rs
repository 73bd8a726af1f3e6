// Agent domain module
// Contains the agent entity, its slim projection, and candidate selection

#![allow(clippy::module_inception)]

pub mod agent;
pub mod selection;

// Re-export main types for convenience
pub use agent::{Agent, AgentSummary};
pub use selection::IdleSelection;
