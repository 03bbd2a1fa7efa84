use tracing::{debug, info, warn};

use crate::domain::{
    apply_operation, current_balance, now, replay_balance, Account, Amount, Balance,
    BalanceError, Operation, OperationKind,
};
use crate::storage::{AccountStore, OperationStore, Repository};

use super::LedgerError;

/// Application service providing the ledger's operations.
/// This is the primary interface for any client (CLI, tests, embedders).
///
/// There is no locking between reading an account's current balance and
/// appending the next operation. Concurrent calls on the same account can
/// both compute from the same prior balance: the later append wins and a
/// debit may be validated against a stale balance. Callers that need
/// stronger guarantees must serialize calls per account themselves.
pub struct LedgerService<A, O> {
    accounts: A,
    operations: O,
}

/// Ledger service backed by a SQLite database.
pub type SqliteLedgerService = LedgerService<Repository, Repository>;

/// Result of replaying an account's operations
pub struct LedgerCheck {
    pub operation_count: usize,
    /// Balance recorded on the most recent operation
    pub recorded: Amount,
    /// Balance obtained by replaying every operation from zero,
    /// or `None` if the replay overdraws or overflows
    pub replayed: Option<Amount>,
}

impl LedgerCheck {
    pub fn is_consistent(&self) -> bool {
        self.replayed == Some(self.recorded)
    }
}

impl SqliteLedgerService {
    /// Initialize a new database at the given path.
    pub async fn init(database_path: &str) -> Result<Self, LedgerError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        Ok(Self::new(repo.clone(), repo))
    }

    /// Connect to an existing database.
    pub async fn connect(database_path: &str) -> Result<Self, LedgerError> {
        let db_url = format!("sqlite:{}", database_path);
        let repo = Repository::connect(&db_url).await?;
        Ok(Self::new(repo.clone(), repo))
    }
}

impl<A, O> LedgerService<A, O>
where
    A: AccountStore,
    O: OperationStore,
{
    /// Create a new ledger service over the given stores.
    pub fn new(accounts: A, operations: O) -> Self {
        Self {
            accounts,
            operations,
        }
    }

    // ========================
    // Account operations
    // ========================

    /// Create a new account with a caller-supplied id.
    pub async fn create_account(&self, account_id: &str) -> Result<Account, LedgerError> {
        if self.accounts.exists_by_id(account_id).await? {
            warn!(account = account_id, "account already exists");
            return Err(LedgerError::AccountAlreadyExists(account_id.to_string()));
        }

        let account = self.accounts.save(Account::new(account_id)).await?;
        info!(account = %account.id, "account created");
        Ok(account)
    }

    /// List every operation of an account, in the order they were recorded.
    pub async fn list_operations(&self, account_id: &str) -> Result<Vec<Operation>, LedgerError> {
        self.ensure_exists(account_id).await?;

        let operations = self.operations.find_all_by_account_id(account_id).await?;
        debug!(account = account_id, count = operations.len(), "listed operations");
        Ok(operations)
    }

    /// Get the current balance of an account.
    pub async fn get_balance(&self, account_id: &str) -> Result<Balance, LedgerError> {
        self.ensure_exists(account_id).await?;

        let last = self.operations.find_last_by_account_id(account_id).await?;
        let balance = Balance::from_last_operation(last.as_ref());
        debug!(account = account_id, balance = %balance.amount, "read balance");
        Ok(balance)
    }

    /// Replay an account's operations and compare the result with the
    /// balance recorded on its latest operation.
    pub async fn check_ledger(&self, account_id: &str) -> Result<LedgerCheck, LedgerError> {
        let operations = self.list_operations(account_id).await?;

        Ok(LedgerCheck {
            operation_count: operations.len(),
            recorded: current_balance(operations.last()),
            replayed: replay_balance(&operations).ok(),
        })
    }

    // ========================
    // Money movements
    // ========================

    /// Credit an account. `None` means no amount was supplied.
    pub async fn deposit(
        &self,
        account_id: &str,
        amount: Option<Amount>,
    ) -> Result<Balance, LedgerError> {
        self.execute_operation(account_id, amount, OperationKind::Credit).await
    }

    /// Debit an account. `None` means no amount was supplied.
    pub async fn withdraw(
        &self,
        account_id: &str,
        amount: Option<Amount>,
    ) -> Result<Balance, LedgerError> {
        self.execute_operation(account_id, amount, OperationKind::Debit).await
    }

    /// Debit the entire current balance of an account.
    ///
    /// An account whose balance is already zero is rejected with
    /// `NullOrZeroAmount` rather than treated as a no-op.
    pub async fn withdraw_all(&self, account_id: &str) -> Result<Balance, LedgerError> {
        let amount = self.balance_amount(account_id).await?;
        self.execute_operation(account_id, Some(amount), OperationKind::Debit).await
    }

    /// Validate, compute the new balance and append one operation.
    /// Nothing is written unless every check passes.
    async fn execute_operation(
        &self,
        account_id: &str,
        amount: Option<Amount>,
        kind: OperationKind,
    ) -> Result<Balance, LedgerError> {
        let amount = match amount {
            Some(amount) if !amount.is_zero() => amount,
            _ => {
                warn!(account = account_id, %kind, "rejected missing or zero amount");
                return Err(LedgerError::NullOrZeroAmount);
            }
        };
        if amount.is_sign_negative() {
            warn!(account = account_id, %kind, %amount, "rejected negative amount");
            return Err(LedgerError::NegativeAmount(amount));
        }

        let account = self
            .accounts
            .get_by_id(account_id)
            .await?
            .ok_or_else(|| LedgerError::AccountNotFound(account_id.to_string()))?;

        let balance = self.balance_amount(account_id).await?;
        let new_balance = apply_operation(balance, kind, amount).map_err(|error| {
            warn!(account = account_id, %kind, %amount, %balance, "rejected: {}", error);
            match error {
                BalanceError::Overdraft { balance, requested } => {
                    LedgerError::InsufficientBalance { balance, requested }
                }
                BalanceError::Overflow { balance, amount } => {
                    LedgerError::BalanceOverflow { balance, amount }
                }
            }
        })?;

        let date = now();
        let operation = self
            .operations
            .save(Operation::new(account, kind, amount, new_balance, date))
            .await?;

        info!(
            account = account_id,
            operation = operation.id,
            %kind,
            %amount,
            balance = %new_balance,
            "operation recorded"
        );

        Ok(Balance::new(date, new_balance))
    }

    /// Current balance amount, failing if the account does not exist.
    async fn balance_amount(&self, account_id: &str) -> Result<Amount, LedgerError> {
        self.ensure_exists(account_id).await?;
        let last = self.operations.find_last_by_account_id(account_id).await?;
        Ok(current_balance(last.as_ref()))
    }

    async fn ensure_exists(&self, account_id: &str) -> Result<(), LedgerError> {
        if !self.accounts.exists_by_id(account_id).await? {
            debug!(account = account_id, "account not found");
            return Err(LedgerError::AccountNotFound(account_id.to_string()));
        }
        Ok(())
    }
}
