//! PostgreSQL-backed `AccountRepository` implementation using Diesel ORM.
//!
//! Uniqueness of the account name is enforced by the table's unique
//! constraint; `insert_if_absent` relies on `ON CONFLICT DO NOTHING` so the
//! check and the write happen in one statement.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{AccountInsertOutcome, AccountRepository, AccountRepositoryError};
use crate::domain::{Account, AccountFilter, AccountName};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{AccountRow, NewAccountRow};
use super::pool::{DbPool, PoolError};
use super::schema::accounts;

/// Diesel-backed implementation of the account repository port.
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AccountRepositoryError {
    map_basic_pool_error(error, AccountRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> AccountRepositoryError {
    map_basic_diesel_error(
        error,
        AccountRepositoryError::query,
        AccountRepositoryError::connection,
    )
}

fn row_to_account(row: AccountRow) -> Result<Account, AccountRepositoryError> {
    Account::try_from(row).map_err(|err| {
        warn!(error = %err, "invalid stored account row");
        AccountRepositoryError::query(format!("invalid stored account: {err}"))
    })
}

/// Escape `LIKE` metacharacters so the needle matches literally.
fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn insert_if_absent(
        &self,
        account: &Account,
    ) -> Result<AccountInsertOutcome, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let inserted = diesel::insert_into(accounts::table)
            .values(NewAccountRow::from(account))
            .on_conflict(accounts::account)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(if inserted == 0 {
            AccountInsertOutcome::AlreadyExists
        } else {
            AccountInsertOutcome::Inserted
        })
    }

    async fn find_by_name(
        &self,
        name: &AccountName,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<AccountRow> = accounts::table
            .filter(accounts::account.eq(name.as_ref()))
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_account).transpose()
    }

    async fn list(&self, filter: &AccountFilter) -> Result<Vec<Account>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = accounts::table
            .select(AccountRow::as_select())
            .order(accounts::seq.asc())
            .into_boxed();
        if let Some(needle) = filter.needle() {
            query = query.filter(accounts::account.ilike(escape_like(needle)));
        }

        let rows: Vec<AccountRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_account).collect()
    }
}
