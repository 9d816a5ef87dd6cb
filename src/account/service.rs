//! Account lifecycle operations, scoped to the authenticated owner.
//!
//! Everything here runs outside the transfer engine: opening, renaming and
//! closing never hold the locks the transfer path takes.

use super::models::{Account, AccountError, CurrencyClass};
use super::repository::AccountRepository;
use crate::db::Database;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AccountServiceError {
    #[error("Account not found or access denied")]
    NotFound,

    #[error("Invalid currency class: {0}")]
    InvalidCurrency(String),

    #[error("Initial balance cannot be negative")]
    NegativeInitialBalance,

    #[error("Account name cannot be empty")]
    InvalidName,

    #[error("Cannot close account with non-zero balance")]
    NonZeroBalance,

    #[error("Database error: {0}")]
    Store(#[from] sqlx::Error),
}

impl From<AccountError> for AccountServiceError {
    fn from(e: AccountError) -> Self {
        match e {
            AccountError::InvalidName => AccountServiceError::InvalidName,
            // deposit/withdraw never run through this service
            AccountError::InvalidAmount | AccountError::InsufficientFunds { .. } => {
                AccountServiceError::NegativeInitialBalance
            }
        }
    }
}

pub struct AccountService;

impl AccountService {
    /// Open a new account with an optional starting balance (default 0.00)
    pub async fn open(
        db: &Database,
        owner_id: i64,
        currency: &str,
        name: &str,
        initial_balance: Option<Decimal>,
    ) -> Result<Account, AccountServiceError> {
        let currency: CurrencyClass = currency
            .parse()
            .map_err(AccountServiceError::InvalidCurrency)?;

        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(AccountServiceError::InvalidName);
        }

        let initial = initial_balance.unwrap_or(Decimal::ZERO);
        if initial < Decimal::ZERO {
            return Err(AccountServiceError::NegativeInitialBalance);
        }

        let number = Self::generate_account_number();
        let account =
            AccountRepository::create(db.pool(), owner_id, &number, currency, trimmed, initial)
                .await?;

        tracing::info!(
            account_id = %account.account_id,
            owner_id,
            currency = %account.currency,
            "Account opened"
        );

        Ok(account)
    }

    /// Account details, owner-scoped
    pub async fn get(
        db: &Database,
        owner_id: i64,
        account_id: Uuid,
    ) -> Result<Account, AccountServiceError> {
        AccountRepository::get_by_id_and_owner(db.pool(), account_id, owner_id)
            .await?
            .ok_or(AccountServiceError::NotFound)
    }

    /// Search the owner's accounts with optional number/name filters
    pub async fn search(
        db: &Database,
        owner_id: i64,
        number: Option<&str>,
        name: Option<&str>,
    ) -> Result<Vec<Account>, AccountServiceError> {
        Ok(AccountRepository::search(db.pool(), owner_id, number, name).await?)
    }

    /// Rename an account; the name invariant lives on the model
    pub async fn rename(
        db: &Database,
        owner_id: i64,
        account_id: Uuid,
        new_name: &str,
    ) -> Result<Account, AccountServiceError> {
        let mut account = Self::get(db, owner_id, account_id).await?;
        account.rename(new_name)?;
        AccountRepository::update_name(db.pool(), &account).await?;
        Ok(account)
    }

    /// Close an account. Only permitted once the balance is exactly zero.
    pub async fn close(
        db: &Database,
        owner_id: i64,
        account_id: Uuid,
    ) -> Result<(), AccountServiceError> {
        let account = Self::get(db, owner_id, account_id).await?;

        if account.balance != Decimal::ZERO {
            return Err(AccountServiceError::NonZeroBalance);
        }

        AccountRepository::delete(db.pool(), account_id).await?;
        tracing::info!(account_id = %account_id, owner_id, "Account closed");
        Ok(())
    }

    fn generate_account_number() -> String {
        format!("ACC{}", chrono::Utc::now().timestamp_micros())
    }
}
