use anyhow::Result;
use async_trait::async_trait;

use crate::domain::{Account, Operation};

/// Persistence for accounts. Accounts are created once and never updated.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Persist a new account and return it.
    /// Duplicate ids are not handled here; callers check `exists_by_id` first.
    async fn save(&self, account: Account) -> Result<Account>;

    async fn exists_by_id(&self, id: &str) -> Result<bool>;

    async fn get_by_id(&self, id: &str) -> Result<Option<Account>>;
}

/// Persistence for the append-only operation ledger.
#[async_trait]
pub trait OperationStore: Send + Sync {
    /// Append an operation. The returned copy carries the id assigned by the store.
    async fn save(&self, operation: Operation) -> Result<Operation>;

    /// All operations of an account, in the order they were appended.
    async fn find_all_by_account_id(&self, account_id: &str) -> Result<Vec<Operation>>;

    /// The most recently appended operation of an account, if any.
    async fn find_last_by_account_id(&self, account_id: &str) -> Result<Option<Operation>>;
}
