//! Telemetry use-cases backed by a [`StatRepository`].

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::SubsecRound;
use mockable::Clock;
use tracing::error;
use uuid::Uuid;

use crate::domain::ports::{StatRepository, StatRepositoryError, StatsLedger};
use crate::domain::{DomainError, StatDraft, StatFields, StatRecord, StatView};

/// Records and lists one telemetry family.
pub struct StatsService<F> {
    repo: Arc<dyn StatRepository<F>>,
    clock: Arc<dyn Clock>,
    _family: PhantomData<fn() -> F>,
}

impl<F: StatFields> StatsService<F> {
    /// Create a service over `repo`, stamping records with `clock`.
    pub fn new(repo: Arc<dyn StatRepository<F>>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repo,
            clock,
            _family: PhantomData,
        }
    }
}

fn map_repository_error(kind: &str, err: &StatRepositoryError) -> DomainError {
    error!(error = %err, kind, "stat repository failure");
    match err {
        StatRepositoryError::Connection { .. } => {
            DomainError::internal(format!("{kind} store unavailable"))
        }
        StatRepositoryError::Query { .. } => DomainError::internal(format!("{kind} store query failed")),
    }
}

#[async_trait]
impl<F: StatFields> StatsLedger<F> for StatsService<F> {
    async fn record(&self, draft: StatDraft<F>) -> Result<StatView<F>, DomainError> {
        // Stored timestamps keep microseconds.
        let now = self.clock.utc().trunc_subsecs(6);
        let record = StatRecord::from_draft(draft, Uuid::new_v4(), now);
        self.repo
            .insert(&record)
            .await
            .map_err(|err| map_repository_error(F::KIND.label(), &err))?;
        Ok(record.to_view())
    }

    async fn list(&self) -> Result<Vec<StatView<F>>, DomainError> {
        let records = self
            .repo
            .list()
            .await
            .map_err(|err| map_repository_error(F::KIND.label(), &err))?;
        Ok(records.iter().map(StatRecord::to_view).collect())
    }
}
