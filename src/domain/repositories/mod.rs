// Store interfaces (ports)
// Implemented by adapters in the infrastructure layer

pub mod assignment_store;

pub use assignment_store::{Assignment, AssignmentStore};
