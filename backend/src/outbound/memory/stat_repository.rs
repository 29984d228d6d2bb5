//! Vector-backed telemetry store.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{StatRepository, StatRepositoryError};
use crate::domain::{StatFields, StatRecord};

/// Append-only in-memory [`StatRepository`].
#[derive(Debug)]
pub struct InMemoryStatRepository<F> {
    records: Mutex<Vec<StatRecord<F>>>,
}

impl<F> Default for InMemoryStatRepository<F> {
    fn default() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl<F: StatFields> StatRepository<F> for InMemoryStatRepository<F> {
    async fn insert(&self, record: &StatRecord<F>) -> Result<(), StatRepositoryError> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<StatRecord<F>>, StatRepositoryError> {
        Ok(self
            .records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }
}
