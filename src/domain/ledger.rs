use super::{Amount, Operation, OperationKind};

/// Current balance of an account given its most recent operation.
/// An account with no operations has a balance of zero.
pub fn current_balance(last: Option<&Operation>) -> Amount {
    last.map(|operation| operation.balance).unwrap_or(Amount::ZERO)
}

/// Compute the balance that results from applying an operation of `kind`
/// and `amount` to `balance`. A debit may never take the balance below zero,
/// and a credit may never push it past the largest representable amount.
pub fn apply_operation(
    balance: Amount,
    kind: OperationKind,
    amount: Amount,
) -> Result<Amount, BalanceError> {
    match kind {
        OperationKind::Credit => balance
            .checked_add(amount)
            .ok_or(BalanceError::Overflow { balance, amount }),
        OperationKind::Debit => {
            if amount > balance {
                return Err(BalanceError::Overdraft {
                    balance,
                    requested: amount,
                });
            }
            balance
                .checked_sub(amount)
                .ok_or(BalanceError::Overflow { balance, amount })
        }
    }
}

/// Replay a sequence of operations from a zero balance.
/// Returns the final balance, or the first rule violation encountered.
pub fn replay_balance(operations: &[Operation]) -> Result<Amount, BalanceError> {
    operations.iter().try_fold(Amount::ZERO, |balance, operation| {
        apply_operation(balance, operation.kind, operation.amount)
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BalanceError {
    Overdraft { balance: Amount, requested: Amount },
    Overflow { balance: Amount, amount: Amount },
}

impl std::fmt::Display for BalanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BalanceError::Overdraft { balance, requested } => {
                write!(f, "Debit of {} would exceed balance of {}", requested, balance)
            }
            BalanceError::Overflow { balance, amount } => {
                write!(f, "Applying {} to balance {} overflows", amount, balance)
            }
        }
    }
}

impl std::error::Error for BalanceError {}
