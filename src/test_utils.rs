//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test databases
//! and creating master records with sensible defaults.

use crate::{
    core::{budget, category, income, recurring},
    entities,
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with tables, indexes, and default
/// categories initialized. This is the standard setup for all tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::init_store(&db).await?;
    Ok(db)
}

/// Returns one of the seeded default categories, for records that need a
/// category reference.
pub async fn any_category(db: &DatabaseConnection) -> Result<entities::category::Model> {
    let categories = category::get_all_categories(db).await?;
    categories.into_iter().next().ok_or_else(|| Error::Config {
        message: "no default categories seeded".to_string(),
    })
}

/// Creates a test budget with sensible defaults.
///
/// # Defaults
/// * `amount`: 100.0
/// * `category_id`: None
/// * `count_as_fixed_expense`: false
pub async fn create_test_budget(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::budget::Model> {
    budget::create_budget(db, name.to_string(), 100.0, None, None, false).await
}

/// Creates a test budget with custom amount and active flag.
/// Use this when a test cares about which budgets the month lifecycle picks up.
pub async fn create_custom_budget(
    db: &DatabaseConnection,
    name: &str,
    amount: f64,
    is_active: bool,
) -> Result<entities::budget::Model> {
    let created = budget::create_budget(db, name.to_string(), amount, None, None, false).await?;
    if is_active {
        return Ok(created);
    }

    let mut deactivated = created;
    deactivated.is_active = false;
    budget::update_budget(db, deactivated).await
}

/// Creates a test recurring expense with sensible defaults.
///
/// # Defaults
/// * `amount`: 50.0
/// * `day_of_month`: 1
pub async fn create_test_recurring_expense(
    db: &DatabaseConnection,
    name: &str,
    category_id: uuid::Uuid,
) -> Result<entities::recurring_expense::Model> {
    recurring::create_recurring_expense(db, name.to_string(), 50.0, 1, category_id, None).await
}

/// Creates a test recurring expense with custom amount and due day.
pub async fn create_custom_recurring_expense(
    db: &DatabaseConnection,
    name: &str,
    amount: f64,
    day_of_month: i32,
    category_id: uuid::Uuid,
) -> Result<entities::recurring_expense::Model> {
    recurring::create_recurring_expense(db, name.to_string(), amount, day_of_month, category_id, None)
        .await
}

/// Creates a test income source with sensible defaults.
///
/// # Defaults
/// * `amount`: 1000.0
/// * `day_of_month`: 25
/// * `category`: "salary"
pub async fn create_test_income(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::income::Model> {
    income::create_income(db, name.to_string(), 1000.0, 25, "salary".to_string(), None).await
}
