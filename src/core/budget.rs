//! Budget business logic - master-record CRUD and per-month spending figures.
//!
//! Budgets are live records the user can edit at any time; the month
//! lifecycle copies them into immutable snapshots, so edits here never affect
//! an already-initialized month.

use crate::{
    entities::{Budget, BudgetSpending, budget, budget_spending},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, Unchanged, prelude::*};
use uuid::Uuid;

/// Creates a new budget with the specified parameters, performing input validation.
pub async fn create_budget(
    db: &DatabaseConnection,
    name: String,
    amount: f64,
    category_id: Option<Uuid>,
    description: Option<String>,
    count_as_fixed_expense: bool,
) -> Result<budget::Model> {
    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Budget name cannot be empty".to_string(),
        });
    }

    if amount <= 0.0 {
        return Err(Error::InvalidAmount { amount });
    }

    let budget = budget::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.trim().to_string()),
        amount: Set(amount),
        category_id: Set(category_id),
        description: Set(description),
        count_as_fixed_expense: Set(count_as_fixed_expense),
        is_active: Set(true),
        created_at: Set(Utc::now().naive_utc()),
        modified_at: Set(None),
    };

    let result = budget.insert(db).await?;
    Ok(result)
}

/// Writes an edited budget back, stamping `modified_at`.
///
/// Only the live master record changes; snapshots taken for initialized
/// months keep the old values.
pub async fn update_budget(db: &DatabaseConnection, budget: budget::Model) -> Result<budget::Model> {
    if budget.amount <= 0.0 {
        return Err(Error::InvalidAmount {
            amount: budget.amount,
        });
    }

    let active = budget::ActiveModel {
        id: Unchanged(budget.id),
        name: Set(budget.name),
        amount: Set(budget.amount),
        category_id: Set(budget.category_id),
        description: Set(budget.description),
        count_as_fixed_expense: Set(budget.count_as_fixed_expense),
        is_active: Set(budget.is_active),
        created_at: Unchanged(budget.created_at),
        modified_at: Set(Some(Utc::now().naive_utc())),
    };

    let result = active.update(db).await?;
    Ok(result)
}

/// Deletes a budget outright; returns whether a row was removed.
pub async fn delete_budget(db: &DatabaseConnection, id: Uuid) -> Result<bool> {
    let result = Budget::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}

/// Finds a budget by id, returning None if it does not exist.
pub async fn get_budget_by_id(db: &DatabaseConnection, id: Uuid) -> Result<Option<budget::Model>> {
    Budget::find_by_id(id).one(db).await.map_err(Into::into)
}

/// Retrieves all budgets ordered alphabetically by name.
pub async fn get_all_budgets(db: &DatabaseConnection) -> Result<Vec<budget::Model>> {
    Budget::find()
        .order_by_asc(budget::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the active budgets, the set the month lifecycle snapshots.
pub async fn get_active_budgets(db: &DatabaseConnection) -> Result<Vec<budget::Model>> {
    Budget::find()
        .filter(budget::Column::IsActive.eq(true))
        .order_by_asc(budget::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Sums the amounts of all active budgets.
pub async fn total_budget_amount(db: &DatabaseConnection) -> Result<f64> {
    let budgets = get_active_budgets(db).await?;
    Ok(budgets.iter().map(|b| b.amount).sum())
}

/// Writes the cached spend figure for (budget, month, year).
///
/// Single conditional write on the natural key: updates the existing row or
/// inserts a fresh one, never creating duplicates.
pub async fn upsert_budget_spending(
    db: &DatabaseConnection,
    budget_id: Uuid,
    month: i32,
    year: i32,
    amount_spent: f64,
) -> Result<budget_spending::Model> {
    let existing = BudgetSpending::find()
        .filter(budget_spending::Column::BudgetId.eq(budget_id))
        .filter(budget_spending::Column::Month.eq(month))
        .filter(budget_spending::Column::Year.eq(year))
        .one(db)
        .await?;

    let now = Utc::now().naive_utc();

    let result = if let Some(spending) = existing {
        let mut active: budget_spending::ActiveModel = spending.into();
        active.amount_spent = Set(amount_spent);
        active.modified_at = Set(Some(now));
        active.update(db).await?
    } else {
        let active = budget_spending::ActiveModel {
            id: Set(Uuid::new_v4()),
            budget_id: Set(budget_id),
            month: Set(month),
            year: Set(year),
            amount_spent: Set(amount_spent),
            created_at: Set(now),
            modified_at: Set(None),
        };
        active.insert(db).await?
    };

    Ok(result)
}

/// Reads the cached spend figure for (budget, month, year); absent rows read
/// as zero.
pub async fn get_budget_spent(
    db: &DatabaseConnection,
    budget_id: Uuid,
    month: i32,
    year: i32,
) -> Result<f64> {
    let spending = BudgetSpending::find()
        .filter(budget_spending::Column::BudgetId.eq(budget_id))
        .filter(budget_spending::Column::Month.eq(month))
        .filter(budget_spending::Column::Year.eq(year))
        .one(db)
        .await?;

    Ok(spending.map_or(0.0, |s| s.amount_spent))
}

/// All spend figures for one month.
pub async fn get_budget_spendings_for_month(
    db: &DatabaseConnection,
    month: i32,
    year: i32,
) -> Result<Vec<budget_spending::Model>> {
    BudgetSpending::find()
        .filter(budget_spending::Column::Month.eq(month))
        .filter(budget_spending::Column::Year.eq(year))
        .all(db)
        .await
        .map_err(Into::into)
}
