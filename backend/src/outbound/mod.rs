//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL repositories using Diesel ORM
//! - **memory**: process-local repositories for database-less runs and tests
//! - **token**: HS256 bearer token codec
//! - **stat_http**: reqwest client posting synthetic telemetry
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod memory;
pub mod persistence;
pub mod stat_http;
pub mod token;
