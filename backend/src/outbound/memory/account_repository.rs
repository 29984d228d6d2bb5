//! Vector-backed account store.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{AccountInsertOutcome, AccountRepository, AccountRepositoryError};
use crate::domain::{Account, AccountFilter, AccountName};

/// In-memory [`AccountRepository`].
///
/// The existence check and the push happen under one lock, so concurrent
/// creates of the same name store exactly one account.
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    accounts: Mutex<Vec<Account>>,
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn insert_if_absent(
        &self,
        account: &Account,
    ) -> Result<AccountInsertOutcome, AccountRepositoryError> {
        let mut accounts = self.accounts.lock().unwrap_or_else(PoisonError::into_inner);
        if accounts.iter().any(|stored| stored.account == account.account) {
            return Ok(AccountInsertOutcome::AlreadyExists);
        }
        accounts.push(account.clone());
        Ok(AccountInsertOutcome::Inserted)
    }

    async fn find_by_name(
        &self,
        name: &AccountName,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        Ok(self
            .accounts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|stored| &stored.account == name)
            .cloned())
    }

    async fn list(&self, filter: &AccountFilter) -> Result<Vec<Account>, AccountRepositoryError> {
        Ok(self
            .accounts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|stored| filter.matches(&stored.account))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rstest::rstest;

    use super::*;
    use crate::domain::{AccountDetails, AccountId};

    fn account(name: &str) -> Account {
        Account {
            id: AccountId::random(),
            account: AccountName::new(name).expect("name"),
            password_hash: "$argon2id$stub".to_owned(),
            details: AccountDetails::default(),
        }
    }

    #[tokio::test]
    async fn second_insert_of_a_name_is_rejected() {
        let repo = InMemoryAccountRepository::default();
        assert_eq!(
            repo.insert_if_absent(&account("alice")).await.expect("insert"),
            AccountInsertOutcome::Inserted
        );
        assert_eq!(
            repo.insert_if_absent(&account("alice")).await.expect("insert"),
            AccountInsertOutcome::AlreadyExists
        );
        assert_eq!(repo.list(&AccountFilter::new(None)).await.expect("list").len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_store_one_account() {
        let repo = Arc::new(InMemoryAccountRepository::default());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move { repo.insert_if_absent(&account("dup")).await })
            })
            .collect();

        let mut inserted = 0;
        for handle in handles {
            if handle.await.expect("join").expect("insert") == AccountInsertOutcome::Inserted {
                inserted += 1;
            }
        }
        assert_eq!(inserted, 1);
    }

    #[rstest]
    #[case(Some("LI"), vec!["alice", "Charlie"])]
    #[case(Some(""), vec!["alice", "bob", "Charlie"])]
    #[case(None, vec!["alice", "bob", "Charlie"])]
    #[case(Some("zed"), vec![])]
    #[tokio::test]
    async fn list_filters_case_insensitively(
        #[case] needle: Option<&str>,
        #[case] expected: Vec<&str>,
    ) {
        let repo = InMemoryAccountRepository::default();
        for name in ["alice", "bob", "Charlie"] {
            repo.insert_if_absent(&account(name)).await.expect("insert");
        }

        let names: Vec<String> = repo
            .list(&AccountFilter::new(needle))
            .await
            .expect("list")
            .into_iter()
            .map(|stored| stored.account.to_string())
            .collect();
        assert_eq!(names, expected);
    }

    #[tokio::test]
    async fn find_by_name_is_exact() {
        let repo = InMemoryAccountRepository::default();
        repo.insert_if_absent(&account("alice")).await.expect("insert");

        let missing = AccountName::new("ALICE").expect("name");
        assert!(repo.find_by_name(&missing).await.expect("find").is_none());
        let present = AccountName::new("alice").expect("name");
        assert!(repo.find_by_name(&present).await.expect("find").is_some());
    }
}
