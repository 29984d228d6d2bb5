//! Builders wiring repositories into services and services into
//! [`HttpState`].
//!
//! With a database pool every port is backed by Diesel; without one the
//! in-memory adapters are used and data lives as long as the process.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    AccountCommand, AccountQuery, AccountRepository, LoadControl, LoginService, OrderCommand,
    OrderQuery, OrderRepository, StatRepository, StatsLedger, TokenCodec,
};
use crate::domain::{
    AccountService, DailyProductionFields, EnergyFields, EquipmentFields, MaterialUsageFields,
    OrderService, QualityFields, StatFields, StatsService,
};
use crate::inbound::http::state::{HttpState, StatsPorts};
use crate::outbound::memory::{
    InMemoryAccountRepository, InMemoryOrderRepository, InMemoryStatRepository,
};
use crate::outbound::persistence::{
    DbPool, DieselAccountRepository, DieselOrderRepository, DieselStatRepository,
};

/// Ports shared by both compositions.
#[derive(Clone)]
pub struct SharedPorts {
    pub tokens: Arc<dyn TokenCodec>,
    pub clock: Arc<dyn Clock>,
    pub load: Arc<dyn LoadControl>,
}

fn ledger<F: StatFields>(
    repo: Arc<dyn StatRepository<F>>,
    clock: &Arc<dyn Clock>,
) -> Arc<dyn StatsLedger<F>> {
    Arc::new(StatsService::new(repo, Arc::clone(clock)))
}

fn assemble<A, O>(stats: StatsPorts, accounts: Arc<A>, orders: Arc<O>, shared: SharedPorts) -> HttpState
where
    A: AccountRepository + 'static,
    O: OrderRepository + 'static,
{
    let SharedPorts {
        tokens,
        clock,
        load,
    } = shared;
    let account_service = Arc::new(AccountService::new(
        accounts,
        Arc::clone(&tokens),
        Arc::clone(&clock),
    ));
    let order_service = Arc::new(OrderService::new(orders, clock));

    HttpState {
        stats,
        accounts: account_service.clone() as Arc<dyn AccountCommand>,
        accounts_query: account_service.clone() as Arc<dyn AccountQuery>,
        login: account_service as Arc<dyn LoginService>,
        orders: order_service.clone() as Arc<dyn OrderCommand>,
        orders_query: order_service as Arc<dyn OrderQuery>,
        tokens,
        load,
    }
}

/// State backed by process-local stores.
pub fn in_memory_http_state(shared: SharedPorts) -> HttpState {
    let clock = &shared.clock;
    let stats = StatsPorts {
        daily_production: ledger(
            Arc::new(InMemoryStatRepository::<DailyProductionFields>::default()),
            clock,
        ),
        energy: ledger(
            Arc::new(InMemoryStatRepository::<EnergyFields>::default()),
            clock,
        ),
        equipment: ledger(
            Arc::new(InMemoryStatRepository::<EquipmentFields>::default()),
            clock,
        ),
        material_usage: ledger(
            Arc::new(InMemoryStatRepository::<MaterialUsageFields>::default()),
            clock,
        ),
        quality: ledger(
            Arc::new(InMemoryStatRepository::<QualityFields>::default()),
            clock,
        ),
    };
    assemble(
        stats,
        Arc::new(InMemoryAccountRepository::default()),
        Arc::new(InMemoryOrderRepository::default()),
        shared,
    )
}

/// State backed by PostgreSQL through `pool`.
pub fn diesel_http_state(pool: &DbPool, shared: SharedPorts) -> HttpState {
    let clock = &shared.clock;
    let stats = StatsPorts {
        daily_production: ledger(
            Arc::new(DieselStatRepository::<DailyProductionFields>::new(pool.clone())),
            clock,
        ),
        energy: ledger(
            Arc::new(DieselStatRepository::<EnergyFields>::new(pool.clone())),
            clock,
        ),
        equipment: ledger(
            Arc::new(DieselStatRepository::<EquipmentFields>::new(pool.clone())),
            clock,
        ),
        material_usage: ledger(
            Arc::new(DieselStatRepository::<MaterialUsageFields>::new(pool.clone())),
            clock,
        ),
        quality: ledger(
            Arc::new(DieselStatRepository::<QualityFields>::new(pool.clone())),
            clock,
        ),
    };
    assemble(
        stats,
        Arc::new(DieselAccountRepository::new(pool.clone())),
        Arc::new(DieselOrderRepository::new(pool.clone())),
        shared,
    )
}

/// Pick the composition for an optional pool.
pub fn build_http_state(pool: Option<&DbPool>, shared: SharedPorts) -> HttpState {
    match pool {
        Some(pool) => diesel_http_state(pool, shared),
        None => in_memory_http_state(shared),
    }
}
