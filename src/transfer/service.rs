//! Transfer orchestration.
//!
//! One transfer is one database transaction: lock both rows, check the
//! currency guard, debit, credit, write the SUCCESS record, commit. Any
//! failure past the row loads rolls the whole unit back and hands off to
//! the failure auditor, which writes in its own scope (see `audit.rs`),
//! before the original error is returned unchanged.
//!
//! Lock discipline: rows are always acquired in ascending `account_id`
//! order, whichever side is the source. Two concurrent transfers over the
//! same pair in opposite directions therefore queue on the same first lock
//! instead of deadlocking.

use super::audit::FailureAuditor;
use super::error::{NotFoundSide, TransferError};
use super::models::{HistoryEntry, TransactionRecord, TransactionStatus};
use super::repository::TransactionRepository;
use crate::account::{AccountRepository, Database};
use crate::config::TransferConfig;
use rust_decimal::Decimal;
use uuid::Uuid;

pub struct TransferService;

impl TransferService {
    /// Execute a transfer between two accounts of the same currency class.
    pub async fn execute(
        db: &Database,
        config: &TransferConfig,
        from_account_id: Uuid,
        to_account_id: Uuid,
        amount: Decimal,
    ) -> Result<TransactionRecord, TransferError> {
        // Preconditions fail fast, before any store access
        if from_account_id == to_account_id {
            return Err(TransferError::SameAccount);
        }
        if amount <= Decimal::ZERO || amount.scale() > 2 {
            return Err(TransferError::InvalidAmount);
        }
        let mut amount = amount;
        amount.rescale(2);

        match Self::run_transfer(db, config, from_account_id, to_account_id, amount).await {
            Ok(record) => {
                tracing::info!(
                    transaction_id = record.transaction_id,
                    from = %from_account_id,
                    to = %to_account_id,
                    %amount,
                    "Transfer completed"
                );
                Ok(record)
            }
            Err(e) => {
                // The transaction inside run_transfer is already rolled
                // back; the audit write gets its own scope.
                if e.auditable() {
                    FailureAuditor::record_failure(
                        db.pool(),
                        from_account_id,
                        to_account_id,
                        amount,
                        &e,
                    )
                    .await;
                }

                tracing::warn!(
                    from = %from_account_id,
                    to = %to_account_id,
                    %amount,
                    error = %e,
                    "Transfer failed"
                );
                Err(e)
            }
        }
    }

    async fn run_transfer(
        db: &Database,
        config: &TransferConfig,
        from_account_id: Uuid,
        to_account_id: Uuid,
        amount: Decimal,
    ) -> Result<TransactionRecord, TransferError> {
        let mut tx = db.pool().begin().await.map_err(TransferError::from_store)?;

        // Bound the row-lock wait; exceeding it surfaces as SQLSTATE 55P03
        sqlx::query(&format!(
            "SET LOCAL lock_timeout = '{}ms'",
            config.lock_timeout_ms
        ))
        .execute(&mut *tx)
        .await
        .map_err(TransferError::from_store)?;

        // Ascending-id lock order, independent of transfer direction
        let (first_id, second_id) = if from_account_id < to_account_id {
            (from_account_id, to_account_id)
        } else {
            (to_account_id, from_account_id)
        };

        let first = AccountRepository::lock_for_update(&mut tx, first_id)
            .await
            .map_err(TransferError::from_store)?;
        let second = AccountRepository::lock_for_update(&mut tx, second_id)
            .await
            .map_err(TransferError::from_store)?;

        let (from_row, to_row) = if from_account_id == first_id {
            (first, second)
        } else {
            (second, first)
        };

        let mut from_account = from_row.ok_or(TransferError::AccountNotFound {
            side: NotFoundSide::Source,
            account_id: from_account_id,
        })?;
        let mut to_account = to_row.ok_or(TransferError::AccountNotFound {
            side: NotFoundSide::Target,
            account_id: to_account_id,
        })?;

        // Currency guard runs before any mutation
        if from_account.currency != to_account.currency {
            return Err(TransferError::CurrencyMismatch {
                from: from_account.currency,
                to: to_account.currency,
            });
        }

        // Balance checks happen inside withdraw; nothing mutates on failure
        from_account.withdraw(amount)?;
        to_account.deposit(amount)?;

        // Both balances and the SUCCESS record land atomically
        AccountRepository::save_balance(&mut tx, &from_account)
            .await
            .map_err(TransferError::from_store)?;
        AccountRepository::save_balance(&mut tx, &to_account)
            .await
            .map_err(TransferError::from_store)?;

        let record = TransactionRepository::insert(
            &mut *tx,
            from_account_id,
            to_account_id,
            amount,
            TransactionStatus::Success,
        )
        .await
        .map_err(TransferError::from_store)?;

        tx.commit().await.map_err(TransferError::from_store)?;

        Ok(record)
    }

    /// Current balance of an account via the single-column projection read
    pub async fn get_balance(db: &Database, account_id: Uuid) -> Result<Decimal, TransferError> {
        AccountRepository::get_balance(db.pool(), account_id)
            .await
            .map_err(TransferError::from_store)?
            .ok_or(TransferError::AccountNotFound {
                side: NotFoundSide::Queried,
                account_id,
            })
    }

    /// Transaction history from one account's perspective, newest first
    pub async fn get_history(
        db: &Database,
        account_id: Uuid,
    ) -> Result<Vec<HistoryEntry>, TransferError> {
        let exists = AccountRepository::get_by_id(db.pool(), account_id)
            .await
            .map_err(TransferError::from_store)?
            .is_some();
        if !exists {
            return Err(TransferError::AccountNotFound {
                side: NotFoundSide::Queried,
                account_id,
            });
        }

        let records = TransactionRepository::find_by_account(db.pool(), account_id)
            .await
            .map_err(TransferError::from_store)?;

        Ok(records
            .iter()
            .map(|r| HistoryEntry::from_record(r, account_id))
            .collect())
    }
}
