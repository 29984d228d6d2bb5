//! PostgreSQL-backed telemetry repositories.
//!
//! One generic adapter type serves all five telemetry tables; the
//! `impl_stat_repository!` macro wires each field set to its table and rows.

use std::marker::PhantomData;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{StatRepository, StatRepositoryError};
use crate::domain::{
    DailyProductionFields, EnergyFields, EquipmentFields, MaterialUsageFields, QualityFields,
    StatRecord,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{
    DailyProductionRow, EnergyRow, EquipmentRow, MaterialUsageRow, NewDailyProductionRow,
    NewEnergyRow, NewEquipmentRow, NewMaterialUsageRow, NewQualityRow, QualityRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{
    daily_production_stats, energy_stats, equipment_stats, material_usage_stats, quality_stats,
};

/// Diesel-backed [`StatRepository`] for the telemetry family `F`.
pub struct DieselStatRepository<F> {
    pool: DbPool,
    _family: PhantomData<fn() -> F>,
}

impl<F> DieselStatRepository<F> {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            _family: PhantomData,
        }
    }
}

impl<F> Clone for DieselStatRepository<F> {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}

fn map_pool_error(error: PoolError) -> StatRepositoryError {
    map_basic_pool_error(error, StatRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> StatRepositoryError {
    map_basic_diesel_error(
        error,
        StatRepositoryError::query,
        StatRepositoryError::connection,
    )
}

macro_rules! impl_stat_repository {
    ($fields:ty, $table:ident, $row:ty, $new_row:ty) => {
        #[async_trait]
        impl StatRepository<$fields> for DieselStatRepository<$fields> {
            async fn insert(
                &self,
                record: &StatRecord<$fields>,
            ) -> Result<(), StatRepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                diesel::insert_into($table::table)
                    .values(<$new_row>::from(record))
                    .execute(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;
                Ok(())
            }

            async fn list(&self) -> Result<Vec<StatRecord<$fields>>, StatRepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let rows: Vec<$row> = $table::table
                    .order($table::seq.asc())
                    .select(<$row>::as_select())
                    .load(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;
                rows.into_iter()
                    .map(|row| {
                        StatRecord::try_from(row).map_err(|err| {
                            warn!(error = %err, table = stringify!($table), "invalid stored row");
                            StatRepositoryError::query(format!("invalid stored row: {err}"))
                        })
                    })
                    .collect()
            }
        }
    };
}

impl_stat_repository!(
    DailyProductionFields,
    daily_production_stats,
    DailyProductionRow,
    NewDailyProductionRow<'_>
);
impl_stat_repository!(EnergyFields, energy_stats, EnergyRow, NewEnergyRow<'_>);
impl_stat_repository!(EquipmentFields, equipment_stats, EquipmentRow, NewEquipmentRow<'_>);
impl_stat_repository!(
    MaterialUsageFields,
    material_usage_stats,
    MaterialUsageRow,
    NewMaterialUsageRow<'_>
);
impl_stat_repository!(QualityFields, quality_stats, QualityRow, NewQualityRow<'_>);
