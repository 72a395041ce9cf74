//! Snapshot store - per-month frozen copies of the master records.
//!
//! Snapshot rows are written exclusively by the month lifecycle in
//! [`crate::core::month`], which clears and rebuilds a month's rows whenever
//! it runs; the only other deletion path is the full data wipe. Snapshots
//! copy the master record's fields at initialization time and are never
//! edited afterwards; drift between a snapshot and its master record is
//! deliberate, and a snapshot outlives a deleted master.

use crate::{
    entities::{
        BankBalance, Budget, BudgetSnapshot, BudgetSpending, Category, Expense, Income,
        IncomeRecord, IncomeSnapshot, MonthStatus, PaymentRecord, Preference, RecurringExpense,
        RecurringExpenseSnapshot, budget, budget_snapshot, income, income_snapshot,
        recurring_expense, recurring_expense_snapshot,
    },
    errors::Result,
};
use chrono::Utc;
use sea_orm::{Set, TransactionTrait, prelude::*};
use tracing::info;
use uuid::Uuid;

/// Freezes a budget's current fields into a snapshot for (month, year).
pub async fn insert_budget_snapshot(
    db: &DatabaseConnection,
    budget: &budget::Model,
    month: i32,
    year: i32,
) -> Result<budget_snapshot::Model> {
    let snapshot = budget_snapshot::ActiveModel {
        id: Set(Uuid::new_v4()),
        month: Set(month),
        year: Set(year),
        original_budget_id: Set(budget.id),
        name: Set(budget.name.clone()),
        amount: Set(budget.amount),
        category_id: Set(budget.category_id),
        description: Set(budget.description.clone()),
        count_as_fixed_expense: Set(budget.count_as_fixed_expense),
        created_at: Set(Utc::now().naive_utc()),
    };

    let result = snapshot.insert(db).await?;
    Ok(result)
}

/// Freezes a recurring expense's current fields into a snapshot for (month, year).
pub async fn insert_recurring_expense_snapshot(
    db: &DatabaseConnection,
    expense: &recurring_expense::Model,
    month: i32,
    year: i32,
) -> Result<recurring_expense_snapshot::Model> {
    let snapshot = recurring_expense_snapshot::ActiveModel {
        id: Set(Uuid::new_v4()),
        month: Set(month),
        year: Set(year),
        original_expense_id: Set(expense.id),
        name: Set(expense.name.clone()),
        amount: Set(expense.amount),
        day_of_month: Set(expense.day_of_month),
        category_id: Set(expense.category_id),
        description: Set(expense.description.clone()),
        created_at: Set(Utc::now().naive_utc()),
    };

    let result = snapshot.insert(db).await?;
    Ok(result)
}

/// Freezes an income source's current fields into a snapshot for (month, year).
pub async fn insert_income_snapshot(
    db: &DatabaseConnection,
    income: &income::Model,
    month: i32,
    year: i32,
) -> Result<income_snapshot::Model> {
    let snapshot = income_snapshot::ActiveModel {
        id: Set(Uuid::new_v4()),
        month: Set(month),
        year: Set(year),
        original_income_id: Set(income.id),
        name: Set(income.name.clone()),
        amount: Set(income.amount),
        day_of_month: Set(income.day_of_month),
        category: Set(income.category.clone()),
        description: Set(income.description.clone()),
        created_at: Set(Utc::now().naive_utc()),
    };

    let result = snapshot.insert(db).await?;
    Ok(result)
}

/// Budget snapshots for one month.
pub async fn get_budget_snapshots_for_month(
    db: &DatabaseConnection,
    month: i32,
    year: i32,
) -> Result<Vec<budget_snapshot::Model>> {
    BudgetSnapshot::find()
        .filter(budget_snapshot::Column::Month.eq(month))
        .filter(budget_snapshot::Column::Year.eq(year))
        .all(db)
        .await
        .map_err(Into::into)
}

/// Recurring expense snapshots for one month.
pub async fn get_recurring_expense_snapshots_for_month(
    db: &DatabaseConnection,
    month: i32,
    year: i32,
) -> Result<Vec<recurring_expense_snapshot::Model>> {
    RecurringExpenseSnapshot::find()
        .filter(recurring_expense_snapshot::Column::Month.eq(month))
        .filter(recurring_expense_snapshot::Column::Year.eq(year))
        .all(db)
        .await
        .map_err(Into::into)
}

/// Income snapshots for one month.
pub async fn get_income_snapshots_for_month(
    db: &DatabaseConnection,
    month: i32,
    year: i32,
) -> Result<Vec<income_snapshot::Model>> {
    IncomeSnapshot::find()
        .filter(income_snapshot::Column::Month.eq(month))
        .filter(income_snapshot::Column::Year.eq(year))
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes all budget snapshots for one month; returns rows removed.
pub async fn delete_budget_snapshots_for_month(
    db: &DatabaseConnection,
    month: i32,
    year: i32,
) -> Result<u64> {
    let result = BudgetSnapshot::delete_many()
        .filter(budget_snapshot::Column::Month.eq(month))
        .filter(budget_snapshot::Column::Year.eq(year))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Deletes all recurring expense snapshots for one month; returns rows removed.
pub async fn delete_recurring_expense_snapshots_for_month(
    db: &DatabaseConnection,
    month: i32,
    year: i32,
) -> Result<u64> {
    let result = RecurringExpenseSnapshot::delete_many()
        .filter(recurring_expense_snapshot::Column::Month.eq(month))
        .filter(recurring_expense_snapshot::Column::Year.eq(year))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Deletes all income snapshots for one month; returns rows removed.
pub async fn delete_income_snapshots_for_month(
    db: &DatabaseConnection,
    month: i32,
    year: i32,
) -> Result<u64> {
    let result = IncomeSnapshot::delete_many()
        .filter(income_snapshot::Column::Month.eq(month))
        .filter(income_snapshot::Column::Year.eq(year))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Wipes every table: master data, snapshots, ledger records, balances,
/// statuses, and preferences. Runs in a single transaction so the caller
/// sees either the full wipe or none of it. Backs the destructive
/// "reset app" feature.
pub async fn clear_all_data(db: &DatabaseConnection) -> Result<()> {
    let txn = db.begin().await?;

    PaymentRecord::delete_many().exec(&txn).await?;
    IncomeRecord::delete_many().exec(&txn).await?;
    BudgetSnapshot::delete_many().exec(&txn).await?;
    RecurringExpenseSnapshot::delete_many().exec(&txn).await?;
    IncomeSnapshot::delete_many().exec(&txn).await?;
    BudgetSpending::delete_many().exec(&txn).await?;
    Expense::delete_many().exec(&txn).await?;
    MonthStatus::delete_many().exec(&txn).await?;
    BankBalance::delete_many().exec(&txn).await?;
    Budget::delete_many().exec(&txn).await?;
    RecurringExpense::delete_many().exec(&txn).await?;
    Income::delete_many().exec(&txn).await?;
    Category::delete_many().exec(&txn).await?;
    Preference::delete_many().exec(&txn).await?;

    txn.commit().await?;
    info!("all application data cleared");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::PaginatorTrait;

    #[tokio::test]
    async fn test_snapshot_copies_master_fields() -> Result<()> {
        let db = setup_test_db().await?;
        let budget = create_custom_budget(&db, "Groceries", 300.0, true).await?;

        let snapshot = insert_budget_snapshot(&db, &budget, 4, 2025).await?;
        assert_eq!(snapshot.original_budget_id, budget.id);
        assert_eq!(snapshot.name, "Groceries");
        assert_eq!(snapshot.amount, 300.0);
        assert_eq!((snapshot.month, snapshot.year), (4, 2025));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_is_scoped_to_month() -> Result<()> {
        let db = setup_test_db().await?;
        let budget = create_test_budget(&db, "Groceries").await?;

        insert_budget_snapshot(&db, &budget, 4, 2025).await?;
        insert_budget_snapshot(&db, &budget, 5, 2025).await?;

        let removed = delete_budget_snapshots_for_month(&db, 4, 2025).await?;
        assert_eq!(removed, 1);
        assert_eq!(get_budget_snapshots_for_month(&db, 5, 2025).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_clear_all_data_empties_every_table() -> Result<()> {
        let db = setup_test_db().await?;
        let category = any_category(&db).await?;

        let budget = create_test_budget(&db, "Groceries").await?;
        create_custom_recurring_expense(&db, "Rent", 800.0, 1, category.id).await?;
        create_test_income(&db, "Day job").await?;
        insert_budget_snapshot(&db, &budget, 4, 2025).await?;
        crate::core::ledger::mark_paid(&db, budget.id, 4, 2025).await?;
        crate::core::balance::update_bank_balance(&db, 4, 2025, 50.0).await?;

        clear_all_data(&db).await?;

        assert_eq!(Budget::find().count(&db).await?, 0);
        assert_eq!(RecurringExpense::find().count(&db).await?, 0);
        assert_eq!(Income::find().count(&db).await?, 0);
        assert_eq!(Category::find().count(&db).await?, 0);
        assert_eq!(BudgetSnapshot::find().count(&db).await?, 0);
        assert_eq!(PaymentRecord::find().count(&db).await?, 0);
        assert_eq!(BankBalance::find().count(&db).await?, 0);

        Ok(())
    }
}
