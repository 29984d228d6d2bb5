//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations translate between Diesel rows and domain
//! types and nothing else. Row structs (`models.rs`) and table definitions
//! (`schema.rs`) stay private to this module. Connections come from a shared
//! `bb8` pool through `diesel-async`, and every database failure is mapped
//! to the owning port's error type.
//!
//! ```ignore
//! use factory_backend::outbound::persistence::{DbPool, DieselOrderRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/factory")).await?;
//! let orders = DieselOrderRepository::new(pool);
//! ```

mod diesel_account_repository;
mod diesel_basic_error_mapping;
mod diesel_order_repository;
mod diesel_stat_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_account_repository::DieselAccountRepository;
pub use diesel_order_repository::DieselOrderRepository;
pub use diesel_stat_repository::DieselStatRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
