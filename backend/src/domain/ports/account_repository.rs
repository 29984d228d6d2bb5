//! Driven port for account persistence.

use async_trait::async_trait;

use crate::domain::{Account, AccountFilter, AccountName};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by account repositories.
    pub enum AccountRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "account repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "account repository query failed: {message}",
    }
}

/// Outcome of an atomic insert-if-absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountInsertOutcome {
    /// The account was stored.
    Inserted,
    /// An account with the same name already existed; nothing was written.
    AlreadyExists,
}

/// Account storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Store `account` unless one with the same name exists.
    ///
    /// The existence check and the write must be a single atomic step.
    async fn insert_if_absent(
        &self,
        account: &Account,
    ) -> Result<AccountInsertOutcome, AccountRepositoryError>;

    /// Exact lookup by account name.
    async fn find_by_name(
        &self,
        name: &AccountName,
    ) -> Result<Option<Account>, AccountRepositoryError>;

    /// Accounts matching `filter`, in creation order.
    async fn list(&self, filter: &AccountFilter) -> Result<Vec<Account>, AccountRepositoryError>;
}
