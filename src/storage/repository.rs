use std::str::FromStr;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Row, SqlitePool};

use crate::domain::{Account, Operation, OperationKind};

use super::{AccountStore, OperationStore, MIGRATION_001_INITIAL};

/// SQLite-backed store for accounts and their operations.
/// Cloning is cheap: clones share the same connection pool.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given URL.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;
        Ok(())
    }

    /// Initialize a new database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    fn row_to_operation(row: &sqlx::sqlite::SqliteRow) -> Result<Operation> {
        let kind_str: String = row.get("kind");
        let amount_str: String = row.get("amount");
        let balance_str: String = row.get("balance");
        let date_str: String = row.get("date");

        Ok(Operation {
            id: row.get("id"),
            kind: OperationKind::from_str(&kind_str)
                .ok_or_else(|| anyhow::anyhow!("Invalid operation kind: {}", kind_str))?,
            amount: Decimal::from_str(&amount_str).context("Invalid operation amount")?,
            balance: Decimal::from_str(&balance_str).context("Invalid operation balance")?,
            date: DateTime::parse_from_rfc3339(&date_str).context("Invalid operation date")?,
            account: Account::new(row.get::<String, _>("account_id")),
        })
    }
}

#[async_trait]
impl AccountStore for Repository {
    async fn save(&self, account: Account) -> Result<Account> {
        sqlx::query("INSERT INTO accounts (id, created_at) VALUES (?, ?)")
            .bind(&account.id)
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await
            .context("Failed to save account")?;
        Ok(account)
    }

    async fn exists_by_id(&self, id: &str) -> Result<bool> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM accounts WHERE id = ?) AS found")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .context("Failed to check account existence")?;

        Ok(row.get::<i64, _>("found") != 0)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Account>> {
        let row = sqlx::query("SELECT id FROM accounts WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch account")?;

        Ok(row.map(|row| Account::new(row.get::<String, _>("id"))))
    }
}

#[async_trait]
impl OperationStore for Repository {
    async fn save(&self, operation: Operation) -> Result<Operation> {
        let row = sqlx::query(
            r#"
            INSERT INTO operations (account_id, kind, amount, balance, date)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&operation.account.id)
        .bind(operation.kind.as_str())
        .bind(operation.amount.to_string())
        .bind(operation.balance.to_string())
        .bind(operation.date.to_rfc3339())
        .fetch_one(&self.pool)
        .await
        .context("Failed to save operation")?;

        Ok(operation.with_id(row.get("id")))
    }

    async fn find_all_by_account_id(&self, account_id: &str) -> Result<Vec<Operation>> {
        let rows = sqlx::query(
            r#"
            SELECT id, account_id, kind, amount, balance, date
            FROM operations
            WHERE account_id = ?
            ORDER BY id
            "#,
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list operations for account")?;

        rows.iter().map(Self::row_to_operation).collect()
    }

    async fn find_last_by_account_id(&self, account_id: &str) -> Result<Option<Operation>> {
        let row = sqlx::query(
            r#"
            SELECT id, account_id, kind, amount, balance, date
            FROM operations
            WHERE account_id = ?
            ORDER BY id DESC
            LIMIT 1
            "#,
        )
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch last operation")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_operation(&row)?)),
            None => Ok(None),
        }
    }
}
