//! Expense transaction business logic.
//!
//! Transactions are user-entered purchases. They are month-scoped through
//! their date, never snapshotted, and never touched by month regeneration.
//! Deletion is soft so accidental removals are recoverable in the store.

use crate::{
    entities::{Expense, expense},
    errors::{Error, Result},
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use sea_orm::{QueryOrder, Set, Unchanged, prelude::*};
use uuid::Uuid;

/// Half-open datetime range covering one calendar month.
fn month_range(month: i32, year: i32) -> Result<(NaiveDateTime, NaiveDateTime)> {
    let start = u32::try_from(month)
        .ok()
        .and_then(|m| NaiveDate::from_ymd_opt(year, m, 1))
        .ok_or(Error::InvalidMonth { month })?;

    let end = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, (month + 1).unsigned_abs(), 1)
    }
    .ok_or(Error::InvalidMonth { month })?;

    Ok((start.and_time(NaiveTime::MIN), end.and_time(NaiveTime::MIN)))
}

/// Records a new expense transaction.
///
/// A `budget_id` of `None` creates a one-time expense; otherwise the amount
/// counts against the referenced budget for the month of `date`.
pub async fn add_expense(
    db: &DatabaseConnection,
    name: String,
    amount: f64,
    date: NaiveDateTime,
    budget_id: Option<Uuid>,
    description: Option<String>,
) -> Result<expense::Model> {
    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Expense name cannot be empty".to_string(),
        });
    }
    if amount <= 0.0 {
        return Err(Error::InvalidAmount { amount });
    }

    let expense = expense::ActiveModel {
        id: Set(Uuid::new_v4()),
        budget_id: Set(budget_id),
        name: Set(name.trim().to_string()),
        description: Set(description),
        amount: Set(amount),
        date: Set(date),
        created_at: Set(Utc::now().naive_utc()),
        modified_at: Set(None),
        is_deleted: Set(false),
    };

    let result = expense.insert(db).await?;
    Ok(result)
}

/// Writes an edited expense back, stamping `modified_at`.
pub async fn update_expense(
    db: &DatabaseConnection,
    expense: expense::Model,
) -> Result<expense::Model> {
    if expense.amount <= 0.0 {
        return Err(Error::InvalidAmount {
            amount: expense.amount,
        });
    }

    let active = expense::ActiveModel {
        id: Unchanged(expense.id),
        budget_id: Set(expense.budget_id),
        name: Set(expense.name),
        description: Set(expense.description),
        amount: Set(expense.amount),
        date: Set(expense.date),
        created_at: Unchanged(expense.created_at),
        modified_at: Set(Some(Utc::now().naive_utc())),
        is_deleted: Set(expense.is_deleted),
    };

    let result = active.update(db).await?;
    Ok(result)
}

/// Soft-deletes an expense; returns whether a live row was flagged.
pub async fn delete_expense(db: &DatabaseConnection, id: Uuid) -> Result<bool> {
    let Some(expense) = get_expense_by_id(db, id).await? else {
        return Ok(false);
    };

    let mut active: expense::ActiveModel = expense.into();
    active.is_deleted = Set(true);
    active.modified_at = Set(Some(Utc::now().naive_utc()));
    active.update(db).await?;

    Ok(true)
}

/// Finds a live (non-deleted) expense by id.
pub async fn get_expense_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<expense::Model>> {
    Expense::find_by_id(id)
        .filter(expense::Column::IsDeleted.eq(false))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Expenses tied to one budget within a calendar month, newest first.
pub async fn get_expenses_for_budget(
    db: &DatabaseConnection,
    budget_id: Uuid,
    month: i32,
    year: i32,
) -> Result<Vec<expense::Model>> {
    let (start, end) = month_range(month, year)?;

    Expense::find()
        .filter(expense::Column::BudgetId.eq(budget_id))
        .filter(expense::Column::Date.gte(start))
        .filter(expense::Column::Date.lt(end))
        .filter(expense::Column::IsDeleted.eq(false))
        .order_by_desc(expense::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// All live expenses within a calendar month, newest first.
pub async fn get_all_expenses_for_month(
    db: &DatabaseConnection,
    month: i32,
    year: i32,
) -> Result<Vec<expense::Model>> {
    let (start, end) = month_range(month, year)?;

    Expense::find()
        .filter(expense::Column::Date.gte(start))
        .filter(expense::Column::Date.lt(end))
        .filter(expense::Column::IsDeleted.eq(false))
        .order_by_desc(expense::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// One-time expenses (no budget reference) within a calendar month.
pub async fn get_one_time_expenses_for_month(
    db: &DatabaseConnection,
    month: i32,
    year: i32,
) -> Result<Vec<expense::Model>> {
    let (start, end) = month_range(month, year)?;

    Expense::find()
        .filter(expense::Column::BudgetId.is_null())
        .filter(expense::Column::Date.gte(start))
        .filter(expense::Column::Date.lt(end))
        .filter(expense::Column::IsDeleted.eq(false))
        .order_by_desc(expense::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Total spent against one budget in a calendar month.
pub async fn total_for_budget(
    db: &DatabaseConnection,
    budget_id: Uuid,
    month: i32,
    year: i32,
) -> Result<f64> {
    let expenses = get_expenses_for_budget(db, budget_id, month, year).await?;
    Ok(expenses.iter().map(|e| e.amount).sum())
}

/// Total of one-time expenses in a calendar month.
pub async fn total_one_time_for_month(
    db: &DatabaseConnection,
    month: i32,
    year: i32,
) -> Result<f64> {
    let expenses = get_one_time_expenses_for_month(db, month, year).await?;
    Ok(expenses.iter().map(|e| e.amount).sum())
}
