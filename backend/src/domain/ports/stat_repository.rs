//! Driven port for telemetry record storage.
//!
//! One repository instance serves one telemetry family. Records are append
//! only; `list` returns them in insertion order.

use async_trait::async_trait;

use crate::domain::{StatFields, StatRecord};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by telemetry repositories.
    pub enum StatRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "stat repository connection failed: {message}",
        /// Query or insert failed during execution.
        Query { message: String } => "stat repository query failed: {message}",
    }
}

/// Append-only store for one telemetry family.
#[async_trait]
pub trait StatRepository<F: StatFields>: Send + Sync {
    /// Persist a new record.
    async fn insert(&self, record: &StatRecord<F>) -> Result<(), StatRepositoryError>;

    /// Return every stored record in insertion order.
    async fn list(&self) -> Result<Vec<StatRecord<F>>, StatRepositoryError>;
}
