//! Driving ports for account and login use-cases.
//!
//! HTTP handlers depend on these traits so tests can substitute doubles
//! instead of wiring storage and hashing.

use async_trait::async_trait;

use crate::domain::{
    AccountFilter, AccountProfile, BearerToken, DomainError, LoginCredentials, NewAccount,
};

/// Account creation.
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Create an account; a taken name yields [`crate::domain::ErrorCode::Conflict`].
    async fn create(&self, input: NewAccount) -> Result<AccountProfile, DomainError>;
}

/// Account lookup.
#[async_trait]
pub trait AccountQuery: Send + Sync {
    /// Profiles whose names satisfy `filter`.
    async fn lookup(&self, filter: &AccountFilter) -> Result<Vec<AccountProfile>, DomainError>;
}

/// Credential check and token issuance.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Authenticate `credentials` and issue a bearer token.
    ///
    /// Unknown accounts and wrong passwords fail identically with
    /// [`crate::domain::ErrorCode::Unauthorized`].
    async fn login(&self, credentials: &LoginCredentials) -> Result<BearerToken, DomainError>;
}
