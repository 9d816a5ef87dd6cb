//! Explicit account-ownership guard.
//!
//! Called by handlers before the transfer or account operation runs, never
//! inside the engine's transaction. A missing account and a foreign account
//! are deliberately indistinguishable to the caller.

use crate::account::AccountRepository;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum OwnershipError {
    #[error("Account not found or access denied")]
    Denied,

    #[error("Database error: {0}")]
    Store(#[from] sqlx::Error),
}

/// Verify that `user_id` owns `account_id`
pub async fn ensure_owner(
    pool: &PgPool,
    user_id: i64,
    account_id: Uuid,
) -> Result<(), OwnershipError> {
    AccountRepository::get_by_id_and_owner(pool, account_id, user_id)
        .await?
        .map(|_| ())
        .ok_or(OwnershipError::Denied)
}
