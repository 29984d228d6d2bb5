//! `DieselOrderRepository` against embedded PostgreSQL.

use chrono::{DateTime, Duration, TimeZone, Utc};
use factory_backend::domain::ports::{AccountRepository, OrderRepository};
use factory_backend::domain::{Account, AccountDetails, AccountId, AccountName, Order, OrderDraft};
use factory_backend::outbound::persistence::{DieselAccountRepository, DieselOrderRepository};
use pg_embedded_setup_unpriv::TestCluster;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

#[path = "support/pg_embed.rs"]
mod pg_embed;

mod support;

use pg_embed::test_cluster;
use support::{create_database, handle_cluster_setup_failure, migrated_pool};

struct TestContext {
    runtime: Runtime,
    _cluster: TestCluster,
    accounts: DieselAccountRepository,
    repository: DieselOrderRepository,
}

impl TestContext {
    fn seed_account(&self, name: &str) -> AccountId {
        let account = Account {
            id: AccountId::random(),
            account: AccountName::new(name).expect("valid name"),
            password_hash: format!("$argon2id$v=19$m=19456,t=2,p=1${name}"),
            details: AccountDetails::default(),
        };
        self.runtime
            .block_on(self.accounts.insert_if_absent(&account))
            .expect("seed account");
        account.id
    }

    fn place(&self, owner: AccountId, product: &str, at: DateTime<Utc>) -> Order {
        let draft = OrderDraft::try_from_parts(Some(product), Some(2), Some(12.5))
            .expect("valid draft");
        let order = Order::from_draft(draft, owner, at);
        self.runtime
            .block_on(self.repository.insert(&order))
            .expect("insert order");
        order
    }

    fn list(&self, owner: &AccountId) -> Vec<Order> {
        self.runtime
            .block_on(self.repository.list_for_owner(owner))
            .expect("list orders")
    }
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = test_cluster()?;
    let database_url = create_database(&cluster)?;
    let pool = migrated_pool(&runtime, &database_url)?;
    Ok(TestContext {
        runtime,
        _cluster: cluster,
        accounts: DieselAccountRepository::new(pool.clone()),
        repository: DieselOrderRepository::new(pool),
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
        .single()
        .expect("valid instant")
}

#[rstest]
fn orders_are_scoped_to_their_owner(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: orders_are_scoped_to_their_owner skipped");
        return;
    };
    let alice = context.seed_account("alice");
    let bob = context.seed_account("bob");

    let first = context.place(alice, "PE膜", noon());
    context.place(bob, "PP膜", noon());
    let second = context.place(alice, "隔膜", noon() + Duration::microseconds(654_321));

    assert_eq!(context.list(&alice), vec![first, second]);
    assert_eq!(
        context
            .list(&bob)
            .into_iter()
            .map(|order| order.product)
            .collect::<Vec<_>>(),
        vec!["PP膜"]
    );
    assert!(context.list(&AccountId::random()).is_empty());
}

#[rstest]
fn orders_for_unknown_accounts_are_rejected(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: orders_for_unknown_accounts_are_rejected skipped");
        return;
    };
    let draft =
        OrderDraft::try_from_parts(Some("PE膜"), Some(1), Some(1.0)).expect("valid draft");
    let orphan = Order::from_draft(draft, AccountId::random(), noon());

    let result = context.runtime.block_on(context.repository.insert(&orphan));

    assert!(result.is_err());
}
