//! Domain ports for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`, [`StatsLedger`], [`LoginService`],
//! [`LoadControl`]) are called by inbound adapters. Driven ports
//! (repositories, [`TokenCodec`], [`StatSubmitter`]) are implemented by
//! outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_ports;
mod account_repository;
mod load_control;
mod order_ports;
mod order_repository;
mod stat_repository;
mod stat_submitter;
mod stats_ledger;
mod token_codec;

#[cfg(test)]
pub use account_ports::MockLoginService;
pub use account_ports::{AccountCommand, AccountQuery, LoginService};
#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{AccountInsertOutcome, AccountRepository, AccountRepositoryError};
#[cfg(test)]
pub use load_control::MockLoadControl;
pub use load_control::{LoadControl, LoadSnapshot, LoadStatus};
pub use order_ports::{OrderCommand, OrderQuery};
#[cfg(test)]
pub use order_repository::MockOrderRepository;
pub use order_repository::{OrderRepository, OrderRepositoryError};
pub use stat_repository::{StatRepository, StatRepositoryError};
#[cfg(test)]
pub use stat_submitter::MockStatSubmitter;
pub use stat_submitter::{StatSubmission, StatSubmitError, StatSubmitter};
pub use stats_ledger::StatsLedger;
#[cfg(test)]
pub use token_codec::MockTokenCodec;
pub use token_codec::{TokenCodec, TokenError};
