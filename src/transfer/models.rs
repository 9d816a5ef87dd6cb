//! Transaction records and history projections

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Outcome of a transfer attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i16)]
pub enum TransactionStatus {
    Success = 1,
    Failed = 2,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Success => "SUCCESS",
            TransactionStatus::Failed => "FAILED",
        }
    }
}

impl TryFrom<i16> for TransactionStatus {
    type Error = String;

    fn try_from(v: i16) -> Result<Self, Self::Error> {
        match v {
            1 => Ok(TransactionStatus::Success),
            2 => Ok(TransactionStatus::Failed),
            other => Err(format!("invalid transaction status: {}", other)),
        }
    }
}

/// Audit record of one transfer attempt.
///
/// Immutable after creation except for the explicit status flips below,
/// which the transfer path itself never invokes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TransactionRecord {
    pub transaction_id: i64,
    pub from_account_id: Uuid,
    pub to_account_id: Uuid,
    pub amount: Decimal,
    #[sqlx(try_from = "i16")]
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
}

impl TransactionRecord {
    pub fn mark_as_failed(&mut self) {
        self.status = TransactionStatus::Failed;
    }

    pub fn mark_as_success(&mut self) {
        self.status = TransactionStatus::Success;
    }

    pub fn is_successful(&self) -> bool {
        self.status == TransactionStatus::Success
    }

    pub fn is_failed(&self) -> bool {
        self.status == TransactionStatus::Failed
    }
}

/// Direction of a transaction as seen from one account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Incoming,
    Outgoing,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Incoming => "INCOMING",
            Direction::Outgoing => "OUTGOING",
        }
    }
}

/// A transaction record annotated with the queried account's perspective
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub transaction_id: i64,
    pub from_account_id: Uuid,
    pub to_account_id: Uuid,
    pub amount: Decimal,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
    pub direction: Direction,
    pub counterparty_account_id: Uuid,
}

impl HistoryEntry {
    /// Annotate a record with direction and counterparty relative to
    /// `account_id` (which must appear on one side of the record).
    pub fn from_record(record: &TransactionRecord, account_id: Uuid) -> Self {
        let (direction, counterparty_account_id) = if record.from_account_id == account_id {
            (Direction::Outgoing, record.to_account_id)
        } else {
            (Direction::Incoming, record.from_account_id)
        };

        Self {
            transaction_id: record.transaction_id,
            from_account_id: record.from_account_id,
            to_account_id: record.to_account_id,
            amount: record.amount,
            status: record.status,
            created_at: record.created_at,
            direction,
            counterparty_account_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn record(from: Uuid, to: Uuid) -> TransactionRecord {
        TransactionRecord {
            transaction_id: 1,
            from_account_id: from,
            to_account_id: to,
            amount: Decimal::from_str("100.50").unwrap(),
            status: TransactionStatus::Success,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_history_entry_outgoing_from_source_perspective() {
        let from = Uuid::new_v4();
        let to = Uuid::new_v4();
        let entry = HistoryEntry::from_record(&record(from, to), from);

        assert_eq!(entry.direction, Direction::Outgoing);
        assert_eq!(entry.counterparty_account_id, to);
    }

    #[test]
    fn test_history_entry_incoming_from_target_perspective() {
        let from = Uuid::new_v4();
        let to = Uuid::new_v4();
        let entry = HistoryEntry::from_record(&record(from, to), to);

        assert_eq!(entry.direction, Direction::Incoming);
        assert_eq!(entry.counterparty_account_id, from);
    }

    #[test]
    fn test_status_flips() {
        let mut rec = record(Uuid::new_v4(), Uuid::new_v4());
        assert!(rec.is_successful());

        rec.mark_as_failed();
        assert!(rec.is_failed());
        assert!(!rec.is_successful());

        rec.mark_as_success();
        assert!(rec.is_successful());
    }

    #[test]
    fn test_status_from_i16() {
        assert_eq!(TransactionStatus::try_from(1), Ok(TransactionStatus::Success));
        assert_eq!(TransactionStatus::try_from(2), Ok(TransactionStatus::Failed));
        assert!(TransactionStatus::try_from(0).is_err());
    }
}
