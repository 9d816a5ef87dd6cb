//! Account data model and balance invariants
//!
//! `Account` is a pure in-memory value: `deposit`/`withdraw`/`rename` check
//! their invariants and mutate local state only. Persistence is the
//! repository's job; an `Account` never touches the store or another account.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Closed set of currency classes an account can hold.
///
/// The two sides of a transfer must agree on this tag; there is no
/// conversion between classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i16)]
pub enum CurrencyClass {
    /// Local fiat currency
    Local = 1,
    /// Foreign fiat currency
    Foreign = 2,
    /// Commodity-backed holdings (e.g. gold)
    Commodity = 3,
}

impl CurrencyClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            CurrencyClass::Local => "LOCAL",
            CurrencyClass::Foreign => "FOREIGN",
            CurrencyClass::Commodity => "COMMODITY",
        }
    }
}

impl fmt::Display for CurrencyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<i16> for CurrencyClass {
    type Error = String;

    fn try_from(v: i16) -> Result<Self, Self::Error> {
        match v {
            1 => Ok(CurrencyClass::Local),
            2 => Ok(CurrencyClass::Foreign),
            3 => Ok(CurrencyClass::Commodity),
            other => Err(format!("invalid currency class: {}", other)),
        }
    }
}

impl FromStr for CurrencyClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "LOCAL" => Ok(CurrencyClass::Local),
            "FOREIGN" => Ok(CurrencyClass::Foreign),
            "COMMODITY" => Ok(CurrencyClass::Commodity),
            other => Err(format!("invalid currency class: {}", other)),
        }
    }
}

/// Violations of the account invariants
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Amount must be positive")]
    InvalidAmount,

    #[error("Insufficient balance. Current balance: {balance}")]
    InsufficientFunds { balance: Decimal },

    #[error("Account name cannot be empty")]
    InvalidName,
}

/// A single money holding: one owner, one currency class, balance >= 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub account_id: Uuid,
    pub owner_id: i64,
    pub account_number: String,
    pub currency: CurrencyClass,
    pub name: String,
    pub balance: Decimal,
    pub version: i64,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Increase the balance. No upper bound.
    pub fn deposit(&mut self, amount: Decimal) -> Result<(), AccountError> {
        if amount <= Decimal::ZERO {
            return Err(AccountError::InvalidAmount);
        }
        self.balance += amount;
        Ok(())
    }

    /// Decrease the balance. Both checks run before any mutation.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), AccountError> {
        if amount <= Decimal::ZERO {
            return Err(AccountError::InvalidAmount);
        }
        if self.balance < amount {
            return Err(AccountError::InsufficientFunds {
                balance: self.balance,
            });
        }
        self.balance -= amount;
        Ok(())
    }

    /// Replace the display name with the trimmed input.
    pub fn rename(&mut self, new_name: &str) -> Result<(), AccountError> {
        let trimmed = new_name.trim();
        if trimmed.is_empty() {
            return Err(AccountError::InvalidName);
        }
        self.name = trimmed.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account_with_balance(balance: &str) -> Account {
        Account {
            account_id: Uuid::new_v4(),
            owner_id: 1,
            account_number: "ACC1000".to_string(),
            currency: CurrencyClass::Local,
            name: "checking".to_string(),
            balance: Decimal::from_str(balance).unwrap(),
            version: 1,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_deposit_increases_balance() {
        let mut acc = account_with_balance("200.00");
        acc.deposit(Decimal::from_str("100.50").unwrap()).unwrap();
        assert_eq!(acc.balance, Decimal::from_str("300.50").unwrap());
    }

    #[test]
    fn test_deposit_rejects_zero_and_negative() {
        let mut acc = account_with_balance("200.00");
        assert_eq!(acc.deposit(Decimal::ZERO), Err(AccountError::InvalidAmount));
        assert_eq!(
            acc.deposit(Decimal::from_str("-1.00").unwrap()),
            Err(AccountError::InvalidAmount)
        );
        assert_eq!(acc.balance, Decimal::from_str("200.00").unwrap());
    }

    #[test]
    fn test_withdraw_decreases_balance() {
        let mut acc = account_with_balance("500.00");
        acc.withdraw(Decimal::from_str("100.50").unwrap()).unwrap();
        assert_eq!(acc.balance, Decimal::from_str("399.50").unwrap());
    }

    #[test]
    fn test_withdraw_rejects_overdraft_without_mutation() {
        let mut acc = account_with_balance("30.00");
        let err = acc.withdraw(Decimal::from_str("50.00").unwrap());
        assert_eq!(
            err,
            Err(AccountError::InsufficientFunds {
                balance: Decimal::from_str("30.00").unwrap()
            })
        );
        assert_eq!(acc.balance, Decimal::from_str("30.00").unwrap());
    }

    #[test]
    fn test_withdraw_exact_balance_reaches_zero() {
        let mut acc = account_with_balance("50.00");
        acc.withdraw(Decimal::from_str("50.00").unwrap()).unwrap();
        assert_eq!(acc.balance, Decimal::ZERO);
    }

    #[test]
    fn test_withdraw_rejects_zero_and_negative() {
        let mut acc = account_with_balance("100.00");
        assert_eq!(
            acc.withdraw(Decimal::ZERO),
            Err(AccountError::InvalidAmount)
        );
        assert_eq!(
            acc.withdraw(Decimal::from_str("-0.01").unwrap()),
            Err(AccountError::InvalidAmount)
        );
        assert_eq!(acc.balance, Decimal::from_str("100.00").unwrap());
    }

    #[test]
    fn test_rename_trims_input() {
        let mut acc = account_with_balance("0.00");
        acc.rename("  savings  ").unwrap();
        assert_eq!(acc.name, "savings");
    }

    #[test]
    fn test_rename_rejects_blank() {
        let mut acc = account_with_balance("0.00");
        assert_eq!(acc.rename("   "), Err(AccountError::InvalidName));
        assert_eq!(acc.name, "checking");
    }

    #[test]
    fn test_currency_class_round_trip() {
        for c in [
            CurrencyClass::Local,
            CurrencyClass::Foreign,
            CurrencyClass::Commodity,
        ] {
            assert_eq!(CurrencyClass::try_from(c as i16), Ok(c));
            assert_eq!(c.as_str().parse::<CurrencyClass>(), Ok(c));
        }
        assert!(CurrencyClass::try_from(0).is_err());
        assert!("DOGE".parse::<CurrencyClass>().is_err());
    }
}
