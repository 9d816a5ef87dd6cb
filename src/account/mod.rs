//! Account management module
//!
//! PostgreSQL-based storage for accounts plus the in-memory balance
//! invariants the transfer engine relies on.

pub mod models;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use models::{Account, AccountError, CurrencyClass};
pub use repository::AccountRepository;
pub use service::{AccountService, AccountServiceError};

// Re-export Database from top-level db module
pub use crate::db::Database;
