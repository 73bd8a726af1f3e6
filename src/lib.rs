//! Agent Dispatch API Library
//!
//! This library provides the core functionality for the Agent Dispatch API:
//! the task/agent domain, candidate selection, the in-memory assignment
//! store, and the HTTP adapters over it.

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
