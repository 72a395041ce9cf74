//! Bank balance business logic.
//!
//! One balance row per calendar month, created lazily at zero the first time
//! a month is read. Reads therefore never come back empty.

use crate::{
    entities::{BankBalance, bank_balance},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{Set, prelude::*};
use tracing::warn;
use uuid::Uuid;

async fn find_balance(
    db: &DatabaseConnection,
    month: i32,
    year: i32,
) -> Result<Option<bank_balance::Model>> {
    BankBalance::find()
        .filter(bank_balance::Column::Month.eq(month))
        .filter(bank_balance::Column::Year.eq(year))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Reads the balance for (month, year), creating a zero row on first access.
///
/// If the insert loses a race against a concurrent first read (the unique
/// index rejects the second row), the row is re-read once; as a last resort
/// an unpersisted zero-valued balance is returned rather than failing the
/// caller.
pub async fn get_bank_balance(
    db: &DatabaseConnection,
    month: i32,
    year: i32,
) -> Result<bank_balance::Model> {
    if !(1..=12).contains(&month) {
        return Err(Error::InvalidMonth { month });
    }

    if let Some(balance) = find_balance(db, month, year).await? {
        return Ok(balance);
    }

    let now = Utc::now().naive_utc();
    let fresh = bank_balance::ActiveModel {
        id: Set(Uuid::new_v4()),
        month: Set(month),
        year: Set(year),
        current_balance: Set(0.0),
        last_updated: Set(now),
    };

    match fresh.insert(db).await {
        Ok(balance) => Ok(balance),
        Err(insert_err) => {
            warn!(month, year, error = %insert_err, "bank balance insert raced, re-reading");
            if let Some(balance) = find_balance(db, month, year).await? {
                return Ok(balance);
            }
            Ok(bank_balance::Model {
                id: Uuid::new_v4(),
                month,
                year,
                current_balance: 0.0,
                last_updated: now,
            })
        }
    }
}

/// Sets the balance for (month, year), creating the row if needed.
pub async fn update_bank_balance(
    db: &DatabaseConnection,
    month: i32,
    year: i32,
    new_balance: f64,
) -> Result<bank_balance::Model> {
    let balance = get_bank_balance(db, month, year).await?;

    let mut active: bank_balance::ActiveModel = balance.into();
    active.current_balance = Set(new_balance);
    active.last_updated = Set(Utc::now().naive_utc());

    let result = active.update(db).await?;
    Ok(result)
}
