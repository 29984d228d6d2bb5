//! Driving ports for order use-cases. Both are scoped to the caller.

use async_trait::async_trait;

use crate::domain::{DomainError, Identity, OrderDraft, OrderView};

/// Order submission.
#[async_trait]
pub trait OrderCommand: Send + Sync {
    /// Store `draft` as an order owned by `owner`.
    async fn place(&self, owner: &Identity, draft: OrderDraft) -> Result<OrderView, DomainError>;
}

/// Order listing.
#[async_trait]
pub trait OrderQuery: Send + Sync {
    /// Orders owned by `owner`, oldest first.
    async fn list_for(&self, owner: &Identity) -> Result<Vec<OrderView>, DomainError>;
}
