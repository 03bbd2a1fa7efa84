use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use uuid::Uuid;

use crate::application::SqliteLedgerService;
use crate::domain::{format_amount, parse_amount, Amount, Balance};

/// Bankbook - Bank Account Ledger
#[derive(Parser)]
#[command(name = "bankbook")]
#[command(about = "A minimal bank account ledger: deposits, withdrawals and balances")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, env = "BANKBOOK_DB", default_value = "bankbook.db")]
    pub database: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// Create a new account
    Create {
        /// Account identifier (a random UUID is generated if omitted)
        id: Option<String>,
    },

    /// Deposit money into an account
    Deposit {
        /// Account identifier
        account: String,

        /// Amount to deposit (e.g., "50.00" or "50")
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Withdraw money from an account
    Withdraw {
        /// Account identifier
        account: String,

        /// Amount to withdraw (e.g., "50.00" or "50")
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Withdraw the entire balance of an account
    WithdrawAll {
        /// Account identifier
        account: String,
    },

    /// List the operations of an account
    Operations {
        /// Account identifier
        account: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the current balance of an account
    Balance {
        /// Account identifier
        account: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Verify that an account's recorded balance matches its operations
    Check {
        /// Account identifier
        account: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Init => {
                SqliteLedgerService::init(&self.database).await?;
                println!("Database initialized: {}", self.database);
            }

            Commands::Create { id } => {
                let service = SqliteLedgerService::connect(&self.database).await?;
                let id = id.unwrap_or_else(|| Uuid::new_v4().to_string());
                let account = service.create_account(&id).await?;
                println!("Created account: {}", account.id);
            }

            Commands::Deposit { account, amount } => {
                let service = SqliteLedgerService::connect(&self.database).await?;
                let amount = parse_amount_arg(&amount)?;
                let balance = service.deposit(&account, Some(amount)).await?;
                println!(
                    "Deposited {} into {}. Balance: {}",
                    format_amount(amount),
                    account,
                    format_amount(balance.amount)
                );
            }

            Commands::Withdraw { account, amount } => {
                let service = SqliteLedgerService::connect(&self.database).await?;
                let amount = parse_amount_arg(&amount)?;
                let balance = service.withdraw(&account, Some(amount)).await?;
                println!(
                    "Withdrew {} from {}. Balance: {}",
                    format_amount(amount),
                    account,
                    format_amount(balance.amount)
                );
            }

            Commands::WithdrawAll { account } => {
                let service = SqliteLedgerService::connect(&self.database).await?;
                let balance = service.withdraw_all(&account).await?;
                println!(
                    "Withdrew everything from {}. Balance: {}",
                    account,
                    format_amount(balance.amount)
                );
            }

            Commands::Operations { account, json } => {
                let service = SqliteLedgerService::connect(&self.database).await?;
                run_operations_command(&service, &account, json).await?;
            }

            Commands::Balance { account, json } => {
                let service = SqliteLedgerService::connect(&self.database).await?;
                let balance = service.get_balance(&account).await?;
                print_balance(&account, &balance, json)?;
            }

            Commands::Check { account } => {
                let service = SqliteLedgerService::connect(&self.database).await?;
                run_check_command(&service, &account).await?;
            }
        }

        Ok(())
    }
}

async fn run_operations_command(
    service: &SqliteLedgerService,
    account: &str,
    json: bool,
) -> Result<()> {
    let operations = service.list_operations(account).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&operations)?);
        return Ok(());
    }

    if operations.is_empty() {
        println!("No operations found.");
    } else {
        println!(
            "{:>6} {:<26} {:<7} {:>12} {:>12}",
            "ID", "DATE", "KIND", "AMOUNT", "BALANCE"
        );
        println!("{}", "-".repeat(67));
        for operation in &operations {
            println!(
                "{:>6} {:<26} {:<7} {:>12} {:>12}",
                operation.id,
                operation.date.format("%Y-%m-%d %H:%M:%S %:z"),
                operation.kind,
                format_amount(operation.amount),
                format_amount(operation.balance)
            );
        }
    }
    Ok(())
}

fn print_balance(account: &str, balance: &Balance, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(balance)?);
    } else {
        println!(
            "{}: {} (as of {})",
            account,
            format_amount(balance.amount),
            balance.date.format("%Y-%m-%d %H:%M:%S %:z")
        );
    }
    Ok(())
}

async fn run_check_command(service: &SqliteLedgerService, account: &str) -> Result<()> {
    let check = service.check_ledger(account).await?;

    println!("Operations: {}", check.operation_count);
    println!("Recorded balance: {}", format_amount(check.recorded));
    match check.replayed {
        Some(replayed) => println!("Replayed balance: {}", format_amount(replayed)),
        None => println!("Replayed balance: overdraft during replay"),
    }

    if check.is_consistent() {
        println!("Ledger OK");
        Ok(())
    } else {
        anyhow::bail!("Ledger for account {} is inconsistent", account)
    }
}

fn parse_amount_arg(input: &str) -> Result<Amount> {
    parse_amount(input).context("Invalid amount format. Use '50.00' or '50'")
}
