use serde::{Deserialize, Serialize};

use super::{now, Amount, Operation, Timestamp};

/// A derived view of an account's funds at a point in time. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub date: Timestamp,
    pub amount: Amount,
}

impl Balance {
    pub fn new(date: Timestamp, amount: Amount) -> Self {
        Self { date, amount }
    }

    /// Balance of an account that has no operations yet.
    pub fn empty() -> Self {
        Self::new(now(), Amount::ZERO)
    }

    /// Balance as recorded by the most recent operation, or zero if none.
    pub fn from_last_operation(last: Option<&Operation>) -> Self {
        match last {
            Some(operation) => Self::new(operation.date, operation.balance),
            None => Self::empty(),
        }
    }
}
