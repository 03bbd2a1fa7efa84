// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use bankbook::application::{LedgerService, SqliteLedgerService};
use bankbook::storage::InMemoryStore;
use bankbook::{AccountStore, OperationStore};
use tempfile::TempDir;

pub type MemoryLedger = LedgerService<InMemoryStore, InMemoryStore>;

/// Helper to create a service over an in-memory store.
/// The returned store shares its data with the service.
pub fn memory_service() -> (MemoryLedger, InMemoryStore) {
    let store = InMemoryStore::new();
    (LedgerService::new(store.clone(), store.clone()), store)
}

/// Helper to create a test service with a temporary database
pub async fn sqlite_service() -> Result<(SqliteLedgerService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = SqliteLedgerService::init(db_path.to_str().unwrap()).await?;
    Ok((service, temp_dir))
}

/// Create an account and fund it with a single deposit.
pub async fn funded_account<A, O>(
    service: &LedgerService<A, O>,
    account_id: &str,
    amount: rust_decimal::Decimal,
) -> Result<()>
where
    A: AccountStore,
    O: OperationStore,
{
    service.create_account(account_id).await?;
    service.deposit(account_id, Some(amount)).await?;
    Ok(())
}
