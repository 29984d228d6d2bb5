//! Driven port for order persistence.

use async_trait::async_trait;

use crate::domain::{AccountId, Order};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by order repositories.
    pub enum OrderRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "order repository connection failed: {message}",
        /// Query or insert failed during execution.
        Query { message: String } => "order repository query failed: {message}",
    }
}

/// Order storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist a new order.
    async fn insert(&self, order: &Order) -> Result<(), OrderRepositoryError>;

    /// Orders owned by `owner`, oldest first.
    async fn list_for_owner(&self, owner: &AccountId) -> Result<Vec<Order>, OrderRepositoryError>;
}
