//! Money transfer engine
//!
//! Moves value between two accounts of the same currency class as one
//! atomic unit and keeps a durable audit record of every attempt.
//!
//! # Flow
//!
//! ```text
//! execute() ── preconditions ──▶ run_transfer()
//!                                  │  lock rows (ascending id, FOR UPDATE)
//!                                  │  currency guard
//!                                  │  withdraw / deposit (in memory)
//!                                  │  save balances + SUCCESS record
//!                                  ▼  commit
//!                               on error: rollback ──▶ FailureAuditor
//!                                                      (own scope, best-effort)
//! ```
//!
//! # Safety invariants
//!
//! 1. **All-or-nothing**: both balances and the SUCCESS record commit
//!    together or not at all
//! 2. **Ordered locking**: rows are locked in ascending `account_id` order
//!    regardless of direction, so opposed transfers cannot deadlock
//! 3. **Independent audit scope**: the FAILED record is written after the
//!    transfer transaction rolled back, never inside it

pub mod audit;
pub mod error;
pub mod models;
pub mod repository;
pub mod service;

#[cfg(test)]
mod integration_tests;

// Re-exports for convenience
pub use audit::FailureAuditor;
pub use error::{NotFoundSide, TransferError};
pub use models::{Direction, HistoryEntry, TransactionRecord, TransactionStatus};
pub use repository::TransactionRepository;
pub use service::TransferService;
