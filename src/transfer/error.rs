//! Transfer error taxonomy.
//!
//! Every kind maps to a distinct, stable outward signal so callers can tell
//! "retry is pointless" (business-rule failures) from "retry may help"
//! (timeouts, transient store trouble).

use crate::account::{AccountError, CurrencyClass};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Which lookup failed when an account id did not resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundSide {
    Source,
    Target,
    Queried,
}

impl fmt::Display for NotFoundSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotFoundSide::Source => f.write_str("Source account"),
            NotFoundSide::Target => f.write_str("Target account"),
            NotFoundSide::Queried => f.write_str("Account"),
        }
    }
}

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("Transfer amount must be positive")]
    InvalidAmount,

    #[error("Cannot transfer to the same account")]
    SameAccount,

    #[error("{side} not found: {account_id}")]
    AccountNotFound {
        side: NotFoundSide,
        account_id: Uuid,
    },

    #[error("Cannot transfer between different currency classes. Source: {from}, Target: {to}")]
    CurrencyMismatch {
        from: CurrencyClass,
        to: CurrencyClass,
    },

    #[error("Insufficient balance")]
    InsufficientFunds,

    #[error("Timed out waiting for an account lock")]
    OperationTimeout,

    #[error("Database error: {0}")]
    Store(sqlx::Error),
}

impl TransferError {
    /// Classify a store error, pulling lock/pool waits out as timeouts.
    ///
    /// Postgres reports an exceeded `lock_timeout` as SQLSTATE 55P03.
    pub fn from_store(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::PoolTimedOut => TransferError::OperationTimeout,
            sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
                Some("55P03") => TransferError::OperationTimeout,
                _ => TransferError::Store(e),
            },
            _ => TransferError::Store(e),
        }
    }

    /// True when the caller may reasonably try the same request again
    pub fn retryable(&self) -> bool {
        matches!(
            self,
            TransferError::OperationTimeout | TransferError::Store(_)
        )
    }

    /// True when the failed attempt belongs in the audit trail.
    ///
    /// Preconditions and missing accounts are rejected before the audited
    /// region of the orchestration begins.
    pub fn auditable(&self) -> bool {
        !matches!(
            self,
            TransferError::InvalidAmount
                | TransferError::SameAccount
                | TransferError::AccountNotFound { .. }
        )
    }
}

impl From<AccountError> for TransferError {
    fn from(e: AccountError) -> Self {
        match e {
            AccountError::InsufficientFunds { .. } => TransferError::InsufficientFunds,
            AccountError::InvalidAmount | AccountError::InvalidName => TransferError::InvalidAmount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(TransferError::OperationTimeout.retryable());
        assert!(TransferError::Store(sqlx::Error::RowNotFound).retryable());

        assert!(!TransferError::InvalidAmount.retryable());
        assert!(!TransferError::SameAccount.retryable());
        assert!(!TransferError::InsufficientFunds.retryable());
        assert!(
            !TransferError::CurrencyMismatch {
                from: CurrencyClass::Local,
                to: CurrencyClass::Commodity,
            }
            .retryable()
        );
    }

    #[test]
    fn test_auditable_excludes_preconditions_and_missing_accounts() {
        assert!(!TransferError::InvalidAmount.auditable());
        assert!(!TransferError::SameAccount.auditable());
        assert!(
            !TransferError::AccountNotFound {
                side: NotFoundSide::Source,
                account_id: Uuid::new_v4(),
            }
            .auditable()
        );

        assert!(TransferError::InsufficientFunds.auditable());
        assert!(
            TransferError::CurrencyMismatch {
                from: CurrencyClass::Local,
                to: CurrencyClass::Foreign,
            }
            .auditable()
        );
        assert!(TransferError::OperationTimeout.auditable());
    }

    #[test]
    fn test_pool_timeout_maps_to_operation_timeout() {
        let e = TransferError::from_store(sqlx::Error::PoolTimedOut);
        assert!(matches!(e, TransferError::OperationTimeout));
    }

    #[test]
    fn test_not_found_names_the_side() {
        let id = Uuid::nil();
        let source = TransferError::AccountNotFound {
            side: NotFoundSide::Source,
            account_id: id,
        };
        assert!(source.to_string().starts_with("Source account not found"));

        let target = TransferError::AccountNotFound {
            side: NotFoundSide::Target,
            account_id: id,
        };
        assert!(target.to_string().starts_with("Target account not found"));
    }
}
