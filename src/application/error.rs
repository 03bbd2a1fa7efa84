use thiserror::Error;

use crate::domain::{AccountId, Amount};

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Account already exists: {0}")]
    AccountAlreadyExists(AccountId),

    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    #[error("Operation with null or zero amount not allowed")]
    NullOrZeroAmount,

    #[error("Operation with negative amount not allowed: {0}")]
    NegativeAmount(Amount),

    #[error("Insufficient balance: balance {balance}, requested {requested}")]
    InsufficientBalance { balance: Amount, requested: Amount },

    #[error("Balance overflow: cannot apply {amount} to balance {balance}")]
    BalanceOverflow { balance: Amount, amount: Amount },

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl LedgerError {
    /// True for the rejections the ledger itself decides on, as opposed to
    /// failures of the underlying stores.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, LedgerError::Storage(_))
    }
}
