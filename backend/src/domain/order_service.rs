//! Order submission and listing, scoped to the authenticated identity.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::SubsecRound;
use mockable::Clock;
use tracing::error;

use crate::domain::ports::{OrderCommand, OrderQuery, OrderRepository, OrderRepositoryError};
use crate::domain::{DomainError, Identity, Order, OrderDraft, OrderView};

/// Order use-cases.
#[derive(Clone)]
pub struct OrderService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> OrderService<R> {
    /// Create the service.
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

fn map_repository_error(err: &OrderRepositoryError) -> DomainError {
    error!(error = %err, "order repository failure");
    DomainError::internal("order store failure")
}

#[async_trait]
impl<R: OrderRepository + 'static> OrderCommand for OrderService<R> {
    async fn place(&self, owner: &Identity, draft: OrderDraft) -> Result<OrderView, DomainError> {
        let order = Order::from_draft(draft, owner.id, self.clock.utc().trunc_subsecs(6));
        self.repo
            .insert(&order)
            .await
            .map_err(|err| map_repository_error(&err))?;
        Ok(order.to_view())
    }
}

#[async_trait]
impl<R: OrderRepository + 'static> OrderQuery for OrderService<R> {
    async fn list_for(&self, owner: &Identity) -> Result<Vec<OrderView>, DomainError> {
        let orders = self
            .repo
            .list_for_owner(&owner.id)
            .await
            .map_err(|err| map_repository_error(&err))?;
        Ok(orders.iter().map(Order::to_view).collect())
    }
}
