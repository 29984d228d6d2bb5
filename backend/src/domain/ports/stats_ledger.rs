//! Driving port for telemetry use-cases.
//!
//! Inbound adapters record and list telemetry through this port without
//! knowing how records are stamped or stored.

use async_trait::async_trait;

use crate::domain::{DomainError, StatDraft, StatFields, StatView};

/// Record and list one telemetry family.
#[async_trait]
pub trait StatsLedger<F: StatFields>: Send + Sync {
    /// Persist `draft` with server timestamps and return its public view.
    async fn record(&self, draft: StatDraft<F>) -> Result<StatView<F>, DomainError>;

    /// Every record of the family, oldest first.
    async fn list(&self) -> Result<Vec<StatView<F>>, DomainError>;
}
