//! minibank - Mini Banking Ledger
//!
//! A small banking core: invariant-checked accounts, atomic two-party
//! transfers and a durable audit trail that survives rollbacks.
//!
//! # Modules
//!
//! - [`account`] - Account model, balance invariants and storage
//! - [`transfer`] - Transfer engine, failure auditor, balance/history reads
//! - [`auth`] - User sessions (JWT) and the account ownership guard
//! - [`gateway`] - Axum HTTP surface with Swagger UI
//! - [`db`] - PostgreSQL pool and schema bootstrap
//! - [`config`] - YAML configuration
//! - [`logging`] - tracing setup (rolling file + stdout)

pub mod account;
pub mod auth;
pub mod config;
pub mod db;
pub mod gateway;
pub mod logging;
pub mod transfer;

// Convenient re-exports at crate root
pub use account::{Account, AccountError, AccountService, CurrencyClass};
pub use config::AppConfig;
pub use db::Database;
pub use transfer::{
    Direction, FailureAuditor, HistoryEntry, TransactionRecord, TransactionStatus, TransferError,
    TransferService,
};
