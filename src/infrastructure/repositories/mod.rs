// Store implementations (data access layer)
// Adapters that implement domain store interfaces

pub mod in_memory_assignment_store;

pub use in_memory_assignment_store::InMemoryAssignmentStore;
