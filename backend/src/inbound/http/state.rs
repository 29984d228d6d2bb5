//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on domain ports,
//! so they can be exercised without storage or network I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountCommand, AccountQuery, LoadControl, LoginService, OrderCommand, OrderQuery,
    StatsLedger, TokenCodec,
};
use crate::domain::{
    DailyProductionFields, EnergyFields, EquipmentFields, MaterialUsageFields, QualityFields,
};

/// One ledger per telemetry family.
#[derive(Clone)]
pub struct StatsPorts {
    pub daily_production: Arc<dyn StatsLedger<DailyProductionFields>>,
    pub energy: Arc<dyn StatsLedger<EnergyFields>>,
    pub equipment: Arc<dyn StatsLedger<EquipmentFields>>,
    pub material_usage: Arc<dyn StatsLedger<MaterialUsageFields>>,
    pub quality: Arc<dyn StatsLedger<QualityFields>>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub stats: StatsPorts,
    pub accounts: Arc<dyn AccountCommand>,
    pub accounts_query: Arc<dyn AccountQuery>,
    pub login: Arc<dyn LoginService>,
    pub orders: Arc<dyn OrderCommand>,
    pub orders_query: Arc<dyn OrderQuery>,
    /// Verifies bearer tokens on order routes.
    pub tokens: Arc<dyn TokenCodec>,
    pub load: Arc<dyn LoadControl>,
}
