//! Payment and receipt ledger.
//!
//! Tracks a paid/received boolean per (entity, month, year). Exactly one
//! record exists per key: every write is a conditional upsert on the natural
//! key, backed by a unique index. An absent record reads as unpaid or
//! not-received.
//!
//! Two write paths exist on purpose. The `mark_*` functions are user actions
//! and overwrite the flag; the `ensure_*` functions are called by month
//! initialization and only create missing records, so regenerating a month
//! with preserved user data never resets flags the user has already set.

use crate::{
    entities::{IncomeRecord, PaymentRecord, income_record, payment_record},
    errors::Result,
};
use chrono::Utc;
use sea_orm::{Set, prelude::*};
use uuid::Uuid;

async fn find_payment_record(
    db: &DatabaseConnection,
    expense_id: Uuid,
    month: i32,
    year: i32,
) -> Result<Option<payment_record::Model>> {
    PaymentRecord::find()
        .filter(payment_record::Column::ExpenseId.eq(expense_id))
        .filter(payment_record::Column::Month.eq(month))
        .filter(payment_record::Column::Year.eq(year))
        .one(db)
        .await
        .map_err(Into::into)
}

async fn find_income_record(
    db: &DatabaseConnection,
    income_id: Uuid,
    month: i32,
    year: i32,
) -> Result<Option<income_record::Model>> {
    IncomeRecord::find()
        .filter(income_record::Column::IncomeId.eq(income_id))
        .filter(income_record::Column::Month.eq(month))
        .filter(income_record::Column::Year.eq(year))
        .one(db)
        .await
        .map_err(Into::into)
}

async fn upsert_payment(
    db: &DatabaseConnection,
    expense_id: Uuid,
    month: i32,
    year: i32,
    is_paid: bool,
) -> Result<payment_record::Model> {
    let now = Utc::now().naive_utc();
    let paid_date = is_paid.then_some(now);

    let result = if let Some(record) = find_payment_record(db, expense_id, month, year).await? {
        let mut active: payment_record::ActiveModel = record.into();
        active.is_paid = Set(is_paid);
        active.paid_date = Set(paid_date);
        active.modified_at = Set(Some(now));
        active.update(db).await?
    } else {
        let active = payment_record::ActiveModel {
            id: Set(Uuid::new_v4()),
            expense_id: Set(expense_id),
            month: Set(month),
            year: Set(year),
            is_paid: Set(is_paid),
            paid_date: Set(paid_date),
            created_at: Set(now),
            modified_at: Set(None),
        };
        active.insert(db).await?
    };

    Ok(result)
}

async fn upsert_income(
    db: &DatabaseConnection,
    income_id: Uuid,
    month: i32,
    year: i32,
    is_received: bool,
) -> Result<income_record::Model> {
    let now = Utc::now().naive_utc();
    let received_date = is_received.then_some(now);

    let result = if let Some(record) = find_income_record(db, income_id, month, year).await? {
        let mut active: income_record::ActiveModel = record.into();
        active.is_received = Set(is_received);
        active.received_date = Set(received_date);
        active.modified_at = Set(Some(now));
        active.update(db).await?
    } else {
        let active = income_record::ActiveModel {
            id: Set(Uuid::new_v4()),
            income_id: Set(income_id),
            month: Set(month),
            year: Set(year),
            is_received: Set(is_received),
            received_date: Set(received_date),
            created_at: Set(now),
            modified_at: Set(None),
        };
        active.insert(db).await?
    };

    Ok(result)
}

/// Marks a recurring expense paid for (month, year). Idempotent.
pub async fn mark_paid(
    db: &DatabaseConnection,
    expense_id: Uuid,
    month: i32,
    year: i32,
) -> Result<payment_record::Model> {
    upsert_payment(db, expense_id, month, year, true).await
}

/// Marks a recurring expense unpaid for (month, year). Idempotent.
pub async fn mark_unpaid(
    db: &DatabaseConnection,
    expense_id: Uuid,
    month: i32,
    year: i32,
) -> Result<payment_record::Model> {
    upsert_payment(db, expense_id, month, year, false).await
}

/// Whether a recurring expense is paid for (month, year); absent means unpaid.
pub async fn is_paid(
    db: &DatabaseConnection,
    expense_id: Uuid,
    month: i32,
    year: i32,
) -> Result<bool> {
    let record = find_payment_record(db, expense_id, month, year).await?;
    Ok(record.is_some_and(|r| r.is_paid))
}

/// Marks an income received for (month, year). Idempotent.
pub async fn mark_received(
    db: &DatabaseConnection,
    income_id: Uuid,
    month: i32,
    year: i32,
) -> Result<income_record::Model> {
    upsert_income(db, income_id, month, year, true).await
}

/// Marks an income not received for (month, year). Idempotent.
pub async fn mark_not_received(
    db: &DatabaseConnection,
    income_id: Uuid,
    month: i32,
    year: i32,
) -> Result<income_record::Model> {
    upsert_income(db, income_id, month, year, false).await
}

/// Whether an income has arrived for (month, year); absent means not received.
pub async fn is_received(
    db: &DatabaseConnection,
    income_id: Uuid,
    month: i32,
    year: i32,
) -> Result<bool> {
    let record = find_income_record(db, income_id, month, year).await?;
    Ok(record.is_some_and(|r| r.is_received))
}

/// Creates the initial unpaid record for (expense, month, year) if none
/// exists. An existing record is returned untouched, whatever its flag.
pub async fn ensure_payment_record(
    db: &DatabaseConnection,
    expense_id: Uuid,
    month: i32,
    year: i32,
) -> Result<payment_record::Model> {
    if let Some(record) = find_payment_record(db, expense_id, month, year).await? {
        return Ok(record);
    }
    upsert_payment(db, expense_id, month, year, false).await
}

/// Creates the initial not-received record for (income, month, year) if none
/// exists. An existing record is returned untouched, whatever its flag.
pub async fn ensure_income_record(
    db: &DatabaseConnection,
    income_id: Uuid,
    month: i32,
    year: i32,
) -> Result<income_record::Model> {
    if let Some(record) = find_income_record(db, income_id, month, year).await? {
        return Ok(record);
    }
    upsert_income(db, income_id, month, year, false).await
}

/// All payment records for one month.
pub async fn get_payment_records_for_month(
    db: &DatabaseConnection,
    month: i32,
    year: i32,
) -> Result<Vec<payment_record::Model>> {
    PaymentRecord::find()
        .filter(payment_record::Column::Month.eq(month))
        .filter(payment_record::Column::Year.eq(year))
        .all(db)
        .await
        .map_err(Into::into)
}

/// All income records for one month.
pub async fn get_income_records_for_month(
    db: &DatabaseConnection,
    month: i32,
    year: i32,
) -> Result<Vec<income_record::Model>> {
    IncomeRecord::find()
        .filter(income_record::Column::Month.eq(month))
        .filter(income_record::Column::Year.eq(year))
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes every payment record for one month; returns rows removed.
pub async fn delete_payment_records_for_month(
    db: &DatabaseConnection,
    month: i32,
    year: i32,
) -> Result<u64> {
    let result = PaymentRecord::delete_many()
        .filter(payment_record::Column::Month.eq(month))
        .filter(payment_record::Column::Year.eq(year))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Deletes every income record for one month; returns rows removed.
pub async fn delete_income_records_for_month(
    db: &DatabaseConnection,
    month: i32,
    year: i32,
) -> Result<u64> {
    let result = IncomeRecord::delete_many()
        .filter(income_record::Column::Month.eq(month))
        .filter(income_record::Column::Year.eq(year))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Sum of active recurring expenses that have no paid record for the month.
pub async fn total_unpaid_amount(db: &DatabaseConnection, month: i32, year: i32) -> Result<f64> {
    let expenses = crate::core::recurring::get_active_recurring_expenses(db).await?;
    let records = get_payment_records_for_month(db, month, year).await?;

    let total = expenses
        .iter()
        .filter(|e| {
            !records
                .iter()
                .any(|r| r.expense_id == e.id && r.is_paid)
        })
        .map(|e| e.amount)
        .sum();

    Ok(total)
}

/// Number of active recurring expenses not yet paid for the month.
pub async fn unpaid_count(db: &DatabaseConnection, month: i32, year: i32) -> Result<usize> {
    let expenses = crate::core::recurring::get_active_recurring_expenses(db).await?;
    let records = get_payment_records_for_month(db, month, year).await?;

    let count = expenses
        .iter()
        .filter(|e| {
            !records
                .iter()
                .any(|r| r.expense_id == e.id && r.is_paid)
        })
        .count();

    Ok(count)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::PaginatorTrait;

    #[tokio::test]
    async fn test_mark_paid_then_unpaid() -> Result<()> {
        let db = setup_test_db().await?;
        let expense_id = Uuid::new_v4();

        assert!(!is_paid(&db, expense_id, 2, 2025).await?);

        mark_paid(&db, expense_id, 2, 2025).await?;
        assert!(is_paid(&db, expense_id, 2, 2025).await?);

        mark_unpaid(&db, expense_id, 2, 2025).await?;
        assert!(!is_paid(&db, expense_id, 2, 2025).await?);

        Ok(())
    }

    #[tokio::test]
    async fn test_repeated_mark_paid_keeps_single_record() -> Result<()> {
        let db = setup_test_db().await?;
        let expense_id = Uuid::new_v4();

        mark_paid(&db, expense_id, 2, 2025).await?;
        mark_paid(&db, expense_id, 2, 2025).await?;
        mark_paid(&db, expense_id, 2, 2025).await?;

        let count = PaymentRecord::find().count(&db).await?;
        assert_eq!(count, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_ensure_does_not_reset_existing_flag() -> Result<()> {
        let db = setup_test_db().await?;
        let expense_id = Uuid::new_v4();
        let income_id = Uuid::new_v4();

        mark_paid(&db, expense_id, 2, 2025).await?;
        mark_received(&db, income_id, 2, 2025).await?;

        let payment = ensure_payment_record(&db, expense_id, 2, 2025).await?;
        assert!(payment.is_paid);
        let income = ensure_income_record(&db, income_id, 2, 2025).await?;
        assert!(income.is_received);

        // And it creates when absent, with the flag down
        let other = Uuid::new_v4();
        let fresh = ensure_payment_record(&db, other, 2, 2025).await?;
        assert!(!fresh.is_paid);
        assert!(fresh.paid_date.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_mark_paid_accepts_one_time_expense_id() -> Result<()> {
        let db = setup_test_db().await?;

        // One-time expenses live in the expenses table, not the recurring
        // masters; the ledger keys on the bare id either way
        let date = chrono::NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_time(chrono::NaiveTime::MIN);
        let concert = crate::core::transaction::add_expense(
            &db,
            "Concert".to_string(),
            45.0,
            date,
            None,
            None,
        )
        .await?;

        mark_paid(&db, concert.id, 3, 2025).await?;
        assert!(is_paid(&db, concert.id, 3, 2025).await?);

        Ok(())
    }

    #[tokio::test]
    async fn test_received_tracking_is_symmetric() -> Result<()> {
        let db = setup_test_db().await?;
        let income_id = Uuid::new_v4();

        assert!(!is_received(&db, income_id, 7, 2025).await?);
        mark_received(&db, income_id, 7, 2025).await?;
        assert!(is_received(&db, income_id, 7, 2025).await?);
        mark_not_received(&db, income_id, 7, 2025).await?;
        assert!(!is_received(&db, income_id, 7, 2025).await?);

        Ok(())
    }

    #[tokio::test]
    async fn test_unpaid_totals_track_active_expenses() -> Result<()> {
        let db = setup_test_db().await?;
        let category = any_category(&db).await?;

        let rent = create_custom_recurring_expense(&db, "Rent", 800.0, 1, category.id).await?;
        let power = create_custom_recurring_expense(&db, "Power", 120.0, 5, category.id).await?;

        assert_eq!(total_unpaid_amount(&db, 9, 2025).await?, 920.0);
        assert_eq!(unpaid_count(&db, 9, 2025).await?, 2);

        mark_paid(&db, rent.id, 9, 2025).await?;
        assert_eq!(total_unpaid_amount(&db, 9, 2025).await?, 120.0);
        assert_eq!(unpaid_count(&db, 9, 2025).await?, 1);

        mark_paid(&db, power.id, 9, 2025).await?;
        assert_eq!(unpaid_count(&db, 9, 2025).await?, 0);

        // Payment state is per month
        assert_eq!(unpaid_count(&db, 10, 2025).await?, 2);

        Ok(())
    }
}
