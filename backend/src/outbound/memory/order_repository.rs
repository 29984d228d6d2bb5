//! Vector-backed order store.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{OrderRepository, OrderRepositoryError};
use crate::domain::{AccountId, Order};

/// In-memory [`OrderRepository`].
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    orders: Mutex<Vec<Order>>,
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn insert(&self, order: &Order) -> Result<(), OrderRepositoryError> {
        self.orders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(order.clone());
        Ok(())
    }

    async fn list_for_owner(&self, owner: &AccountId) -> Result<Vec<Order>, OrderRepositoryError> {
        Ok(self
            .orders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|order| &order.owner == owner)
            .cloned()
            .collect())
    }
}
