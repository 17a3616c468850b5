//! Database operations for balance accounts.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QuerySelect, Set,
    TransactionTrait,
};
use tracing::info;

use crate::entity::account;
use crate::error::{AppError, AppResult};

/// Balance assigned to the account seeded at first startup.
pub const DEFAULT_BALANCE: i64 = 10_000;

/// Seed a single account with the default balance if the table is empty.
///
/// Returns the seeded account, or `None` if one already existed. Called once
/// during startup, after migrations have run.
pub async fn seed_default_account(db: &DatabaseConnection) -> AppResult<Option<account::Model>> {
    let count = account::Entity::find().count(db).await?;
    if count > 0 {
        return Ok(None);
    }

    let now = Utc::now();
    let seeded = account::ActiveModel {
        balance: Set(DEFAULT_BALANCE),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(
        "Seeded account {} with balance {}",
        seeded.id, seeded.balance
    );
    Ok(Some(seeded))
}

/// Find an account by id without locking.
pub async fn find_by_id(
    db: &DatabaseConnection,
    account_id: i64,
) -> AppResult<Option<account::Model>> {
    Ok(account::Entity::find_by_id(account_id).one(db).await?)
}

/// Apply a signed delta to an account's balance inside a transaction.
///
/// The account row is read with `SELECT ... FOR UPDATE`, so concurrent
/// mutations of the same account serialize on the row lock: a second
/// transaction blocks until the first commits or rolls back, then observes
/// the post-transaction balance. The transaction rolls back without touching
/// the row when the account is missing or the resulting balance would be
/// negative.
pub async fn apply_delta(db: &DatabaseConnection, account_id: i64, amount: i64) -> AppResult<i64> {
    let txn = db.begin().await?;

    let found = account::Entity::find_by_id(account_id)
        .lock_exclusive()
        .one(&txn)
        .await?;

    let Some(current) = found else {
        txn.rollback().await?;
        return Err(AppError::Transaction("User not found".to_string()));
    };

    let Some(new_balance) = current.balance.checked_add(amount) else {
        txn.rollback().await?;
        return Err(AppError::Transaction("balance out of range".to_string()));
    };

    if new_balance < 0 {
        txn.rollback().await?;
        return Err(AppError::InsufficientFunds);
    }

    let mut active: account::ActiveModel = current.into();
    active.balance = Set(new_balance);
    active.updated_at = Set(Utc::now());
    let updated = active.update(&txn).await?;

    txn.commit().await?;
    Ok(updated.balance)
}
