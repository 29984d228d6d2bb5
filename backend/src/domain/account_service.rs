//! Account creation, lookup, and login.
//!
//! Password hashing runs on the blocking pool; everything else is a thin
//! wrapper around the repository and token ports.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{error, warn};

use crate::domain::password::{PasswordError, hash_password, verify_password};
use crate::domain::ports::{
    AccountCommand, AccountInsertOutcome, AccountQuery, AccountRepository,
    AccountRepositoryError, LoginService, TokenCodec,
};
use crate::domain::{
    Account, AccountFilter, AccountId, AccountProfile, BearerToken, DomainError, Identity,
    LoginCredentials, NewAccount,
};

/// Message shared by every failed login so callers cannot probe for names.
pub const LOGIN_FAILED_MESSAGE: &str = "account or password incorrect";

/// Account use-cases.
#[derive(Clone)]
pub struct AccountService<R> {
    repo: Arc<R>,
    tokens: Arc<dyn TokenCodec>,
    clock: Arc<dyn Clock>,
}

impl<R> AccountService<R> {
    /// Create the service.
    pub fn new(repo: Arc<R>, tokens: Arc<dyn TokenCodec>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repo,
            tokens,
            clock,
        }
    }
}

fn map_repository_error(err: &AccountRepositoryError) -> DomainError {
    error!(error = %err, "account repository failure");
    DomainError::internal("account store failure")
}

fn map_password_error(err: &PasswordError) -> DomainError {
    error!(error = %err, "password hashing failure");
    DomainError::internal("credential processing failed")
}

async fn run_blocking<T, F>(task: F) -> Result<T, DomainError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, PasswordError> + Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|err| DomainError::internal(format!("password task failed: {err}")))?
        .map_err(|err| map_password_error(&err))
}

#[async_trait]
impl<R: AccountRepository + 'static> AccountCommand for AccountService<R> {
    async fn create(&self, input: NewAccount) -> Result<AccountProfile, DomainError> {
        let password = input.password().to_owned();
        let password_hash = run_blocking(move || {
            let password = zeroize::Zeroizing::new(password);
            hash_password(password.as_str())
        })
        .await?;

        let account = Account {
            id: AccountId::random(),
            account: input.account().clone(),
            password_hash,
            details: input.details().clone(),
        };
        match self
            .repo
            .insert_if_absent(&account)
            .await
            .map_err(|err| map_repository_error(&err))?
        {
            AccountInsertOutcome::Inserted => Ok(account.to_profile()),
            AccountInsertOutcome::AlreadyExists => Err(DomainError::conflict("account already exists")),
        }
    }
}

#[async_trait]
impl<R: AccountRepository + 'static> AccountQuery for AccountService<R> {
    async fn lookup(&self, filter: &AccountFilter) -> Result<Vec<AccountProfile>, DomainError> {
        let accounts = self
            .repo
            .list(filter)
            .await
            .map_err(|err| map_repository_error(&err))?;
        Ok(accounts.iter().map(Account::to_profile).collect())
    }
}

#[async_trait]
impl<R: AccountRepository + 'static> LoginService for AccountService<R> {
    async fn login(&self, credentials: &LoginCredentials) -> Result<BearerToken, DomainError> {
        let Some(account) = self
            .repo
            .find_by_name(credentials.account())
            .await
            .map_err(|err| map_repository_error(&err))?
        else {
            return Err(DomainError::unauthorized(LOGIN_FAILED_MESSAGE));
        };

        let candidate = zeroize::Zeroizing::new(credentials.password().to_owned());
        let stored = account.password_hash.clone();
        let matches = run_blocking(move || verify_password(candidate.as_str(), &stored)).await?;
        if !matches {
            warn!(account = %account.account, "login rejected");
            return Err(DomainError::unauthorized(LOGIN_FAILED_MESSAGE));
        }

        let identity = Identity {
            id: account.id,
            account: account.account,
        };
        self.tokens
            .issue(&identity, self.clock.utc())
            .map_err(|err| {
                error!(error = %err, "token issuance failed");
                DomainError::internal("token issuance failed")
            })
    }
}
