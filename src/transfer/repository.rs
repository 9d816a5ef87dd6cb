//! Repository layer for transaction records

use super::models::{TransactionRecord, TransactionStatus};
use rust_decimal::Decimal;
use sqlx::PgExecutor;
use uuid::Uuid;

/// Transaction record repository
pub struct TransactionRepository;

impl TransactionRepository {
    /// Insert one record and return the stored row.
    ///
    /// Takes any executor: the orchestrator passes its open transaction,
    /// the failure auditor passes the pool so its write commits on its own.
    pub async fn insert(
        executor: impl PgExecutor<'_>,
        from_account_id: Uuid,
        to_account_id: Uuid,
        amount: Decimal,
        status: TransactionStatus,
    ) -> Result<TransactionRecord, sqlx::Error> {
        let record: TransactionRecord = sqlx::query_as(
            r#"INSERT INTO transactions_tb (from_account_id, to_account_id, amount, status)
               VALUES ($1, $2, $3, $4)
               RETURNING transaction_id, from_account_id, to_account_id, amount, status, created_at"#,
        )
        .bind(from_account_id)
        .bind(to_account_id)
        .bind(amount)
        .bind(status as i16)
        .fetch_one(executor)
        .await?;

        Ok(record)
    }

    /// All records touching an account, newest first
    pub async fn find_by_account(
        executor: impl PgExecutor<'_>,
        account_id: Uuid,
    ) -> Result<Vec<TransactionRecord>, sqlx::Error> {
        let records: Vec<TransactionRecord> = sqlx::query_as(
            r#"SELECT transaction_id, from_account_id, to_account_id, amount, status, created_at
               FROM transactions_tb
               WHERE from_account_id = $1 OR to_account_id = $1
               ORDER BY created_at DESC, transaction_id DESC"#,
        )
        .bind(account_id)
        .fetch_all(executor)
        .await?;

        Ok(records)
    }
}
