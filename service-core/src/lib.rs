//! service-core: Shared infrastructure for the instance service workspace.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
