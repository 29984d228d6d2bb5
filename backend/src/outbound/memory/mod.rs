//! In-memory repository adapters.
//!
//! Used when no database URL is configured and as test doubles. Contents
//! live for the lifetime of the process.

mod account_repository;
mod order_repository;
mod stat_repository;

pub use account_repository::InMemoryAccountRepository;
pub use order_repository::InMemoryOrderRepository;
pub use stat_repository::InMemoryStatRepository;
