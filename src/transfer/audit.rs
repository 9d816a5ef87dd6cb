//! Failure audit path.
//!
//! Runs against the pool directly, never inside the orchestrator's
//! transaction: by the time this is called that transaction has already
//! rolled back, and this write must survive it. A failed record saved in
//! the same scope would vanish with the rollback.

use super::error::TransferError;
use super::models::TransactionStatus;
use super::repository::TransactionRepository;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

pub struct FailureAuditor;

impl FailureAuditor {
    /// Record a FAILED attempt with the originally requested amount.
    ///
    /// Best-effort: errors are logged and swallowed so they can never mask
    /// the transfer error the caller is about to receive.
    pub async fn record_failure(
        pool: &PgPool,
        from_account_id: Uuid,
        to_account_id: Uuid,
        amount: Decimal,
        reason: &TransferError,
    ) {
        match TransactionRepository::insert(
            pool,
            from_account_id,
            to_account_id,
            amount,
            TransactionStatus::Failed,
        )
        .await
        {
            Ok(record) => {
                tracing::debug!(
                    transaction_id = record.transaction_id,
                    from = %from_account_id,
                    to = %to_account_id,
                    %amount,
                    reason = %reason,
                    "Failed transfer recorded"
                );
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    from = %from_account_id,
                    to = %to_account_id,
                    %amount,
                    "Failed to record failed transfer"
                );
            }
        }
    }
}
