//! Domain types, services, and ports.
//!
//! Purpose: define strongly typed telemetry, account, and order entities and
//! the use-cases that operate on them, independent of HTTP and storage.
//!
//! Public surface:
//! - DomainError / ErrorCode: transport-agnostic failure payload.
//! - Telemetry (`StatDate`, `StatKind`, `StatFields` and the five field sets,
//!   `StatDraft`, `StatRecord`, `StatView`).
//! - Accounts and auth (`Account`, `AccountName`, `NewAccount`,
//!   `LoginCredentials`, `BearerToken`, `Identity`).
//! - Orders (`OrderDraft`, `Order`, `OrderView`).
//! - Services (`StatsService`, `AccountService`, `OrderService`) and the
//!   `LoadGenerator`.

pub mod account;
pub mod account_service;
pub mod auth;
pub mod error;
pub mod load_generator;
pub mod order;
pub mod order_service;
pub mod password;
pub mod ports;
pub mod stats_service;
pub mod telemetry;
pub mod trace_id;

pub use self::account::{
    Account, AccountDetails, AccountFilter, AccountId, AccountName, AccountProfile,
    AccountValidationError, NewAccount,
};
pub use self::account_service::{AccountService, LOGIN_FAILED_MESSAGE};
pub use self::auth::{BearerToken, Identity, LoginCredentials, LoginValidationError};
pub use self::error::{DomainError, DomainErrorValidationError, ErrorCode, TRACE_ID_HEADER};
pub use self::load_generator::{DEFAULT_TICK_PERIOD, LoadGenerator, SyntheticBatch};
pub use self::order::{Order, OrderDraft, OrderValidationError, OrderView};
pub use self::order_service::OrderService;
pub use self::stats_service::StatsService;
pub use self::telemetry::{
    DailyProductionFields, EnergyFields, EquipmentFields, MaterialUsageFields, QualityFields,
    StatDate, StatDraft, StatFields, StatKind, StatRecord, StatValidationError, StatView,
};
pub use self::trace_id::TraceId;
