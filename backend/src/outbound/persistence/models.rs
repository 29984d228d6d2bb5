//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer. Each telemetry table has a
//! read row and an insert row; `seq` is assigned by the database and only
//! used for ordering.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Account, AccountDetails, AccountId, AccountName, AccountValidationError,
    DailyProductionFields, EnergyFields, EquipmentFields, MaterialUsageFields, Order,
    QualityFields, StatDate, StatRecord, StatValidationError,
};

use super::schema::{
    accounts, daily_production_stats, energy_stats, equipment_stats, material_usage_stats, orders,
    quality_stats,
};

/// Generate the read row, insert row, and record conversions for one
/// telemetry table.
macro_rules! stat_rows {
    (
        $table:ident, $fields:ident, $row:ident, $new_row:ident,
        { $($column:ident : $ty:ty),+ $(,)? }
    ) => {
        #[derive(Debug, Clone, Queryable, Selectable)]
        #[diesel(table_name = $table)]
        #[diesel(check_for_backend(diesel::pg::Pg))]
        pub(crate) struct $row {
            pub id: Uuid,
            pub date: String,
            $(pub $column: Option<$ty>,)+
            pub created_at: DateTime<Utc>,
            pub updated_at: DateTime<Utc>,
        }

        #[derive(Debug, Clone, Insertable)]
        #[diesel(table_name = $table)]
        pub(crate) struct $new_row<'a> {
            pub id: Uuid,
            pub date: &'a str,
            $(pub $column: Option<$ty>,)+
            pub created_at: DateTime<Utc>,
            pub updated_at: DateTime<Utc>,
        }

        impl<'a> From<&'a StatRecord<$fields>> for $new_row<'a> {
            fn from(record: &'a StatRecord<$fields>) -> Self {
                Self {
                    id: record.id,
                    date: record.date.as_ref(),
                    $($column: record.fields.$column.clone(),)+
                    created_at: record.created_at,
                    updated_at: record.updated_at,
                }
            }
        }

        impl TryFrom<$row> for StatRecord<$fields> {
            type Error = StatValidationError;

            fn try_from(row: $row) -> Result<Self, Self::Error> {
                Ok(Self {
                    id: row.id,
                    date: StatDate::new(row.date)?,
                    fields: $fields {
                        $($column: row.$column,)+
                    },
                    created_at: row.created_at,
                    updated_at: row.updated_at,
                })
            }
        }
    };
}

stat_rows!(
    daily_production_stats, DailyProductionFields, DailyProductionRow, NewDailyProductionRow,
    {
        product_type: String,
        total_output: i64,
        defective_rate: f64,
        machine_count: i64,
        shift: String,
    }
);

stat_rows!(
    energy_stats, EnergyFields, EnergyRow, NewEnergyRow,
    {
        electricity: f64,
        water: f64,
        gas: f64,
        area_output: f64,
    }
);

stat_rows!(
    equipment_stats, EquipmentFields, EquipmentRow, NewEquipmentRow,
    {
        equipment_code: String,
        run_time: f64,
        downtime: f64,
        fault_count: i64,
        utilization_rate: f64,
    }
);

stat_rows!(
    material_usage_stats, MaterialUsageFields, MaterialUsageRow, NewMaterialUsageRow,
    {
        material_name: String,
        used_amount: f64,
        stock_remaining: f64,
    }
);

stat_rows!(
    quality_stats, QualityFields, QualityRow, NewQualityRow,
    {
        product_type: String,
        sample_count: i64,
        qualified_count: i64,
        avg_thickness: f64,
        avg_porosity: f64,
        avg_strength: f64,
    }
);

/// Row struct for reading accounts.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccountRow {
    pub id: Uuid,
    pub account: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub age: Option<i32>,
}

impl TryFrom<AccountRow> for Account {
    type Error = AccountValidationError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: AccountId::from(row.id),
            account: AccountName::new(row.account)?,
            password_hash: row.password_hash,
            details: AccountDetails {
                phone: row.phone,
                gender: row.gender,
                age: row.age,
            },
        })
    }
}

/// Insertable account row. `created_at` defaults in the database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = accounts)]
pub(crate) struct NewAccountRow<'a> {
    pub id: Uuid,
    pub account: &'a str,
    pub password_hash: &'a str,
    pub phone: Option<&'a str>,
    pub gender: Option<&'a str>,
    pub age: Option<i32>,
}

impl<'a> From<&'a Account> for NewAccountRow<'a> {
    fn from(account: &'a Account) -> Self {
        Self {
            id: *account.id.as_uuid(),
            account: account.account.as_ref(),
            password_hash: account.password_hash.as_str(),
            phone: account.details.phone.as_deref(),
            gender: account.details.gender.as_deref(),
            age: account.details.age,
        }
    }
}

/// Row struct for reading and inserting orders.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OrderRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product: String,
    pub quantity: i64,
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

impl From<&Order> for OrderRow {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            user_id: *order.owner.as_uuid(),
            product: order.product.clone(),
            quantity: order.quantity,
            price: order.price,
            created_at: order.created_at,
        }
    }
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: row.id,
            owner: AccountId::from(row.user_id),
            product: row.product,
            quantity: row.quantity,
            price: row.price,
            created_at: row.created_at,
        }
    }
}
