mod common;

use anyhow::Result;
use bankbook::application::LedgerError;
use bankbook::domain::{Account, Amount, OperationKind};
use bankbook::{AccountStore, OperationStore};
use rust_decimal::dec;

use common::{funded_account, memory_service};

#[tokio::test]
async fn test_create_account() -> Result<()> {
    let (service, store) = memory_service();

    let account = service.create_account("acc-1").await?;

    assert_eq!(account, Account::new("acc-1"));
    assert!(store.exists_by_id("acc-1").await?);
    Ok(())
}

#[tokio::test]
async fn test_create_existing_account_fails() -> Result<()> {
    let (service, store) = memory_service();
    service.create_account("acc-1").await?;

    let result = service.create_account("acc-1").await;

    assert!(matches!(result, Err(LedgerError::AccountAlreadyExists(id)) if id == "acc-1"));
    assert_eq!(store.get_by_id("acc-1").await?, Some(Account::new("acc-1")));
    Ok(())
}

#[tokio::test]
async fn test_operations_on_unknown_account_fail() -> Result<()> {
    let (service, store) = memory_service();

    assert!(!store.exists_by_id("ghost").await?);
    assert!(matches!(
        service.deposit("ghost", Some(dec!(100))).await,
        Err(LedgerError::AccountNotFound(_))
    ));
    assert!(matches!(
        service.withdraw("ghost", Some(dec!(100))).await,
        Err(LedgerError::AccountNotFound(_))
    ));
    assert!(matches!(
        service.withdraw_all("ghost").await,
        Err(LedgerError::AccountNotFound(_))
    ));
    assert!(matches!(
        service.list_operations("ghost").await,
        Err(LedgerError::AccountNotFound(_))
    ));
    assert!(matches!(
        service.get_balance("ghost").await,
        Err(LedgerError::AccountNotFound(_))
    ));
    assert_eq!(store.operation_count()?, 0);
    Ok(())
}

#[tokio::test]
async fn test_zero_or_missing_amount_is_rejected() -> Result<()> {
    let (service, store) = memory_service();
    service.create_account("acc-1").await?;

    assert!(matches!(
        service.deposit("acc-1", Some(Amount::ZERO)).await,
        Err(LedgerError::NullOrZeroAmount)
    ));
    assert!(matches!(
        service.deposit("acc-1", None).await,
        Err(LedgerError::NullOrZeroAmount)
    ));
    assert!(matches!(
        service.withdraw("acc-1", Some(Amount::ZERO)).await,
        Err(LedgerError::NullOrZeroAmount)
    ));

    assert_eq!(store.operation_count()?, 0);
    Ok(())
}

#[tokio::test]
async fn test_negative_amount_is_rejected() -> Result<()> {
    let (service, store) = memory_service();
    service.create_account("acc-1").await?;

    let result = service.deposit("acc-1", Some(dec!(-5))).await;

    assert!(matches!(result, Err(LedgerError::NegativeAmount(amount)) if amount == dec!(-5)));
    assert_eq!(store.operation_count()?, 0);
    Ok(())
}

#[tokio::test]
async fn test_fresh_account_has_zero_balance() -> Result<()> {
    let (service, _store) = memory_service();
    service.create_account("acc-1").await?;

    let balance = service.get_balance("acc-1").await?;

    assert_eq!(balance.amount, Amount::ZERO);
    assert!(service.list_operations("acc-1").await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_deposit_then_withdraw() -> Result<()> {
    let (service, _store) = memory_service();
    service.create_account("acc-1").await?;

    let after_deposit = service.deposit("acc-1", Some(dec!(100))).await?;
    assert_eq!(after_deposit.amount, dec!(100));

    let after_withdraw = service.withdraw("acc-1", Some(dec!(30))).await?;
    assert_eq!(after_withdraw.amount, dec!(70));

    let operations = service.list_operations("acc-1").await?;
    assert_eq!(operations.len(), 2);

    assert_eq!(operations[0].kind, OperationKind::Credit);
    assert_eq!(operations[0].amount, dec!(100));
    assert_eq!(operations[0].balance, dec!(100));

    assert_eq!(operations[1].kind, OperationKind::Debit);
    assert_eq!(operations[1].amount, dec!(30));
    assert_eq!(operations[1].balance, dec!(70));

    assert_eq!(service.get_balance("acc-1").await?.amount, dec!(70));
    Ok(())
}

#[tokio::test]
async fn test_withdraw_more_than_balance_fails() -> Result<()> {
    let (service, store) = memory_service();
    funded_account(&service, "acc-1", dec!(1000)).await?;

    let result = service.withdraw("acc-1", Some(dec!(1100))).await;

    assert!(matches!(result, Err(LedgerError::InsufficientBalance { .. })));
    assert_eq!(store.operation_count()?, 1);
    assert_eq!(service.get_balance("acc-1").await?.amount, dec!(1000));
    Ok(())
}

#[tokio::test]
async fn test_withdraw_all() -> Result<()> {
    let (service, _store) = memory_service();
    funded_account(&service, "acc-1", dec!(1000)).await?;

    let balance = service.withdraw_all("acc-1").await?;
    assert_eq!(balance.amount, Amount::ZERO);

    let operations = service.list_operations("acc-1").await?;
    assert_eq!(operations.len(), 2);

    let last = &operations[1];
    assert_eq!(last.kind, OperationKind::Debit);
    assert_eq!(last.amount, dec!(1000));
    assert_eq!(last.balance, Amount::ZERO);
    Ok(())
}

#[tokio::test]
async fn test_withdraw_all_on_zero_balance_is_rejected() -> Result<()> {
    let (service, store) = memory_service();
    funded_account(&service, "acc-1", dec!(50)).await?;
    service.withdraw_all("acc-1").await?;

    let result = service.withdraw_all("acc-1").await;

    assert!(matches!(result, Err(LedgerError::NullOrZeroAmount)));
    assert_eq!(store.operation_count()?, 2);
    Ok(())
}

#[tokio::test]
async fn test_list_operations_returns_stored_records() -> Result<()> {
    let (service, store) = memory_service();
    funded_account(&service, "acc-1", dec!(200)).await?;
    service.withdraw("acc-1", Some(dec!(20))).await?;
    service.deposit("acc-1", Some(dec!(0.5))).await?;

    let listed = service.list_operations("acc-1").await?;
    let stored = store.find_all_by_account_id("acc-1").await?;

    assert_eq!(listed.len(), 3);
    assert_eq!(listed, stored);
    Ok(())
}

#[tokio::test]
async fn test_accounts_have_independent_ledgers() -> Result<()> {
    let (service, _store) = memory_service();
    funded_account(&service, "alice", dec!(100)).await?;
    funded_account(&service, "bob", dec!(5)).await?;

    service.withdraw("alice", Some(dec!(60))).await?;

    assert_eq!(service.get_balance("alice").await?.amount, dec!(40));
    assert_eq!(service.get_balance("bob").await?.amount, dec!(5));
    assert_eq!(service.list_operations("bob").await?.len(), 1);

    let result = service.withdraw("bob", Some(dec!(6))).await;
    assert!(matches!(result, Err(LedgerError::InsufficientBalance { .. })));
    Ok(())
}

#[tokio::test]
async fn test_get_balance_is_idempotent() -> Result<()> {
    let (service, _store) = memory_service();
    funded_account(&service, "acc-1", dec!(12.34)).await?;

    let first = service.get_balance("acc-1").await?;
    let second = service.get_balance("acc-1").await?;

    assert_eq!(first, second);
    assert_eq!(first.amount, dec!(12.34));
    Ok(())
}

#[tokio::test]
async fn test_balance_carries_last_operation_date() -> Result<()> {
    let (service, store) = memory_service();
    funded_account(&service, "acc-1", dec!(10)).await?;

    let balance = service.get_balance("acc-1").await?;
    let last = store.find_last_by_account_id("acc-1").await?.unwrap();

    assert_eq!(balance.date, last.date);
    Ok(())
}

#[tokio::test]
async fn test_rejections_are_not_storage_errors() -> Result<()> {
    let (service, _store) = memory_service();

    let error = service.get_balance("ghost").await.unwrap_err();

    assert!(error.is_rejection());
    assert_eq!(error.to_string(), "Account not found: ghost");
    Ok(())
}
