// Infrastructure layer module
// Contains the in-memory store adapter and startup seeding
// Follows Hexagonal Architecture

pub mod repositories;
pub mod seed;
