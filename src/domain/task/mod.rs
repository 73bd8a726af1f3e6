// Task domain module
// Contains the task entity, its submission form, and capability/priority value objects

#![allow(clippy::module_inception)]

pub mod task;
pub mod value_objects;

// Re-export main types for convenience
pub use task::{AssignedTask, Task, TaskSpec, TaskSubmission};
pub use value_objects::{Priority, Skill, SkillCatalog, SkillSet, TaskState};
