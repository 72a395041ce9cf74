//! Recurring expense business logic - master-record CRUD.

use crate::{
    entities::{RecurringExpense, recurring_expense},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, Unchanged, prelude::*};
use uuid::Uuid;

fn validate(name: &str, amount: f64, day_of_month: i32) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Recurring expense name cannot be empty".to_string(),
        });
    }
    if amount <= 0.0 {
        return Err(Error::InvalidAmount { amount });
    }
    if !(1..=31).contains(&day_of_month) {
        return Err(Error::InvalidDayOfMonth { day: day_of_month });
    }
    Ok(())
}

/// Creates a new recurring expense, validating name, amount, and due day.
pub async fn create_recurring_expense(
    db: &DatabaseConnection,
    name: String,
    amount: f64,
    day_of_month: i32,
    category_id: Uuid,
    description: Option<String>,
) -> Result<recurring_expense::Model> {
    validate(&name, amount, day_of_month)?;

    let expense = recurring_expense::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.trim().to_string()),
        amount: Set(amount),
        day_of_month: Set(day_of_month),
        category_id: Set(category_id),
        description: Set(description),
        is_active: Set(true),
        created_at: Set(Utc::now().naive_utc()),
        modified_at: Set(None),
    };

    let result = expense.insert(db).await?;
    Ok(result)
}

/// Writes an edited recurring expense back, stamping `modified_at`.
pub async fn update_recurring_expense(
    db: &DatabaseConnection,
    expense: recurring_expense::Model,
) -> Result<recurring_expense::Model> {
    validate(&expense.name, expense.amount, expense.day_of_month)?;

    let active = recurring_expense::ActiveModel {
        id: Unchanged(expense.id),
        name: Set(expense.name),
        amount: Set(expense.amount),
        day_of_month: Set(expense.day_of_month),
        category_id: Set(expense.category_id),
        description: Set(expense.description),
        is_active: Set(expense.is_active),
        created_at: Unchanged(expense.created_at),
        modified_at: Set(Some(Utc::now().naive_utc())),
    };

    let result = active.update(db).await?;
    Ok(result)
}

/// Deletes a recurring expense outright; returns whether a row was removed.
pub async fn delete_recurring_expense(db: &DatabaseConnection, id: Uuid) -> Result<bool> {
    let result = RecurringExpense::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}

/// Finds a recurring expense by id, returning None if it does not exist.
pub async fn get_recurring_expense_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<recurring_expense::Model>> {
    RecurringExpense::find_by_id(id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all recurring expenses ordered by due day.
pub async fn get_all_recurring_expenses(
    db: &DatabaseConnection,
) -> Result<Vec<recurring_expense::Model>> {
    RecurringExpense::find()
        .order_by_asc(recurring_expense::Column::DayOfMonth)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the active recurring expenses, the set the month lifecycle
/// snapshots and pre-populates payment records for.
pub async fn get_active_recurring_expenses(
    db: &DatabaseConnection,
) -> Result<Vec<recurring_expense::Model>> {
    RecurringExpense::find()
        .filter(recurring_expense::Column::IsActive.eq(true))
        .order_by_asc(recurring_expense::Column::DayOfMonth)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Sums the amounts of all active recurring expenses.
pub async fn total_monthly_amount(db: &DatabaseConnection) -> Result<f64> {
    let expenses = get_active_recurring_expenses(db).await?;
    Ok(expenses.iter().map(|e| e.amount).sum())
}
