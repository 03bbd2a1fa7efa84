use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::domain::{Account, Operation, OperationId};

#[derive(Default)]
struct Tables {
    accounts: Vec<Account>,
    operations: Vec<Operation>,
    last_operation_id: OperationId,
}

/// In-memory store for accounts and operations, kept in insertion order.
///
/// Clones share the same data, so a test can hand one clone to the service
/// and inspect the ledger through another.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of operations across all accounts.
    pub fn operation_count(&self) -> Result<usize> {
        Ok(self.lock()?.operations.len())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| anyhow!("In-memory store lock poisoned"))
    }
}

#[async_trait]
impl super::AccountStore for InMemoryStore {
    async fn save(&self, account: Account) -> Result<Account> {
        self.lock()?.accounts.push(account.clone());
        Ok(account)
    }

    async fn exists_by_id(&self, id: &str) -> Result<bool> {
        Ok(self.lock()?.accounts.iter().any(|account| account.id == id))
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Account>> {
        Ok(self
            .lock()?
            .accounts
            .iter()
            .find(|account| account.id == id)
            .cloned())
    }
}

#[async_trait]
impl super::OperationStore for InMemoryStore {
    async fn save(&self, operation: Operation) -> Result<Operation> {
        let mut tables = self.lock()?;
        tables.last_operation_id += 1;
        let operation = operation.with_id(tables.last_operation_id);
        tables.operations.push(operation.clone());
        Ok(operation)
    }

    async fn find_all_by_account_id(&self, account_id: &str) -> Result<Vec<Operation>> {
        Ok(self
            .lock()?
            .operations
            .iter()
            .filter(|operation| operation.account.id == account_id)
            .cloned()
            .collect())
    }

    async fn find_last_by_account_id(&self, account_id: &str) -> Result<Option<Operation>> {
        Ok(self
            .lock()?
            .operations
            .iter()
            .rev()
            .find(|operation| operation.account.id == account_id)
            .cloned())
    }
}
