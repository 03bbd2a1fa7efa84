use chrono::{DateTime, FixedOffset, Local};
use serde::{Deserialize, Serialize};

use super::{Account, Amount};

pub type OperationId = i64;

/// Point in time with the local timezone offset attached.
pub type Timestamp = DateTime<FixedOffset>;

/// The current local time, with its offset.
pub fn now() -> Timestamp {
    Local::now().fixed_offset()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OperationKind {
    /// Money coming in (deposit)
    Credit,
    /// Money going out (withdrawal)
    Debit,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Credit => "CREDIT",
            OperationKind::Debit => "DEBIT",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "CREDIT" => Some(OperationKind::Credit),
            "DEBIT" => Some(OperationKind::Debit),
            _ => None,
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An operation is an append-only ledger entry.
/// Operations are never updated or deleted; the balance of an account is the
/// `balance` field of its most recent operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    /// Ordinal assigned by the operation store
    pub id: OperationId,
    pub kind: OperationKind,
    /// Always strictly positive
    pub amount: Amount,
    /// Account balance right after this operation was applied
    pub balance: Amount,
    pub date: Timestamp,
    pub account: Account,
}

impl Operation {
    /// Create a new operation. The id must be assigned by the store on save.
    pub fn new(
        account: Account,
        kind: OperationKind,
        amount: Amount,
        balance: Amount,
        date: Timestamp,
    ) -> Self {
        assert!(amount > Amount::ZERO, "Operation amount must be positive");
        Self {
            id: 0, // Will be set by the store
            kind,
            amount,
            balance,
            date,
            account,
        }
    }

    pub fn with_id(mut self, id: OperationId) -> Self {
        self.id = id;
        self
    }
}

// Two operations are the same ledger entry regardless of when they were stamped.
impl PartialEq for Operation {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.kind == other.kind
            && self.amount == other.amount
            && self.balance == other.balance
            && self.account == other.account
    }
}

impl Eq for Operation {}
