//! Income business logic - master-record CRUD.
//!
//! Income categories are labels from a fixed set, not foreign keys; the set
//! mirrors what the settings form offers.

use crate::{
    entities::{Income, income},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, Unchanged, prelude::*};
use uuid::Uuid;

/// The fixed set of income category labels.
pub const INCOME_CATEGORIES: [&str; 4] = ["salary", "benefit", "refund", "other"];

fn validate(name: &str, amount: f64, day_of_month: i32, category: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Income name cannot be empty".to_string(),
        });
    }
    if amount <= 0.0 {
        return Err(Error::InvalidAmount { amount });
    }
    if !(1..=31).contains(&day_of_month) {
        return Err(Error::InvalidDayOfMonth { day: day_of_month });
    }
    if !INCOME_CATEGORIES.contains(&category) {
        return Err(Error::Validation {
            message: format!("Unknown income category: {category}"),
        });
    }
    Ok(())
}

/// Creates a new income source, validating name, amount, day, and category label.
pub async fn create_income(
    db: &DatabaseConnection,
    name: String,
    amount: f64,
    day_of_month: i32,
    category: String,
    description: Option<String>,
) -> Result<income::Model> {
    validate(&name, amount, day_of_month, &category)?;

    let income = income::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.trim().to_string()),
        amount: Set(amount),
        day_of_month: Set(day_of_month),
        category: Set(category),
        description: Set(description),
        is_active: Set(true),
        created_at: Set(Utc::now().naive_utc()),
        modified_at: Set(None),
    };

    let result = income.insert(db).await?;
    Ok(result)
}

/// Writes an edited income source back, stamping `modified_at`.
pub async fn update_income(db: &DatabaseConnection, income: income::Model) -> Result<income::Model> {
    validate(
        &income.name,
        income.amount,
        income.day_of_month,
        &income.category,
    )?;

    let active = income::ActiveModel {
        id: Unchanged(income.id),
        name: Set(income.name),
        amount: Set(income.amount),
        day_of_month: Set(income.day_of_month),
        category: Set(income.category),
        description: Set(income.description),
        is_active: Set(income.is_active),
        created_at: Unchanged(income.created_at),
        modified_at: Set(Some(Utc::now().naive_utc())),
    };

    let result = active.update(db).await?;
    Ok(result)
}

/// Deletes an income source outright; returns whether a row was removed.
pub async fn delete_income(db: &DatabaseConnection, id: Uuid) -> Result<bool> {
    let result = Income::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}

/// Finds an income source by id, returning None if it does not exist.
pub async fn get_income_by_id(db: &DatabaseConnection, id: Uuid) -> Result<Option<income::Model>> {
    Income::find_by_id(id).one(db).await.map_err(Into::into)
}

/// Retrieves all income sources ordered by arrival day.
pub async fn get_all_incomes(db: &DatabaseConnection) -> Result<Vec<income::Model>> {
    Income::find()
        .order_by_asc(income::Column::DayOfMonth)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the active income sources, the set the month lifecycle snapshots.
pub async fn get_active_incomes(db: &DatabaseConnection) -> Result<Vec<income::Model>> {
    Income::find()
        .filter(income::Column::IsActive.eq(true))
        .order_by_asc(income::Column::DayOfMonth)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Sums the amounts of all active income sources.
pub async fn total_monthly_amount(db: &DatabaseConnection) -> Result<f64> {
    let incomes = get_active_incomes(db).await?;
    Ok(incomes.iter().map(|i| i.amount).sum())
}
