//! Database connection and schema setup for the embedded `SQLite` store.
//!
//! Schema creation is generated from the entity definitions through `SeaORM`'s
//! `Schema::create_table_from_entity`, so the tables always match the Rust
//! structs without hand-written SQL. On top of the generated tables this
//! module adds the secondary indexes the monthly queries rely on and unique
//! indexes on every natural composite key, which is what makes the
//! conditional upserts in `core` race-free on a single-writer store.
//!
//! [`init_store`] is the one-time startup step: the embedding application
//! calls it exactly once after connecting, before any lifecycle or CRUD call.
//! Every statement it issues is `IF NOT EXISTS`-guarded, so re-running it
//! against an existing store is harmless.

use crate::entities::{
    BankBalance, Budget, BudgetSnapshot, BudgetSpending, Category, Expense, Income, IncomeRecord,
    IncomeSnapshot, MonthStatus, PaymentRecord, Preference, RecurringExpense,
    RecurringExpenseSnapshot, bank_balance, budget_snapshot, budget_spending, expense,
    income_record, income_snapshot, month_status, payment_record, preference,
    recurring_expense_snapshot,
};
use crate::errors::Result;
use sea_orm::sea_query::{Index, IndexCreateStatement};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::info;

/// Establishes a connection to the store at the given URL.
///
/// The URL typically comes from [`crate::config::settings::AppConfig`];
/// `sqlite::memory:` gives a fresh in-memory store for tests.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all tables from the entity definitions.
///
/// Statements are `IF NOT EXISTS`-guarded; calling this against an existing
/// schema is a no-op.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let tables = [
        schema.create_table_from_entity(Budget),
        schema.create_table_from_entity(RecurringExpense),
        schema.create_table_from_entity(Income),
        schema.create_table_from_entity(Expense),
        schema.create_table_from_entity(Category),
        schema.create_table_from_entity(MonthStatus),
        schema.create_table_from_entity(BudgetSnapshot),
        schema.create_table_from_entity(RecurringExpenseSnapshot),
        schema.create_table_from_entity(IncomeSnapshot),
        schema.create_table_from_entity(PaymentRecord),
        schema.create_table_from_entity(IncomeRecord),
        schema.create_table_from_entity(BankBalance),
        schema.create_table_from_entity(BudgetSpending),
        schema.create_table_from_entity(Preference),
    ];

    for mut table in tables {
        db.execute(builder.build(table.if_not_exists())).await?;
    }

    Ok(())
}

/// Creates the secondary and unique indexes the core queries depend on.
///
/// Unique indexes enforce the one-row-per-natural-key invariants: month
/// status, ledger records, bank balances, and budget spending all key on
/// (entity, month, year) or (month, year).
pub async fn create_indexes(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();

    let indexes: [IndexCreateStatement; 10] = [
        Index::create()
            .if_not_exists()
            .name("ux_month_statuses_month_year")
            .table(MonthStatus)
            .col(month_status::Column::Month)
            .col(month_status::Column::Year)
            .unique()
            .to_owned(),
        Index::create()
            .if_not_exists()
            .name("ux_payment_records_expense_month_year")
            .table(PaymentRecord)
            .col(payment_record::Column::ExpenseId)
            .col(payment_record::Column::Month)
            .col(payment_record::Column::Year)
            .unique()
            .to_owned(),
        Index::create()
            .if_not_exists()
            .name("ux_income_records_income_month_year")
            .table(IncomeRecord)
            .col(income_record::Column::IncomeId)
            .col(income_record::Column::Month)
            .col(income_record::Column::Year)
            .unique()
            .to_owned(),
        Index::create()
            .if_not_exists()
            .name("ux_bank_balances_month_year")
            .table(BankBalance)
            .col(bank_balance::Column::Month)
            .col(bank_balance::Column::Year)
            .unique()
            .to_owned(),
        Index::create()
            .if_not_exists()
            .name("ux_budget_spendings_budget_month_year")
            .table(BudgetSpending)
            .col(budget_spending::Column::BudgetId)
            .col(budget_spending::Column::Month)
            .col(budget_spending::Column::Year)
            .unique()
            .to_owned(),
        Index::create()
            .if_not_exists()
            .name("ux_preferences_key")
            .table(Preference)
            .col(preference::Column::Key)
            .unique()
            .to_owned(),
        Index::create()
            .if_not_exists()
            .name("idx_budget_snapshots_month_year")
            .table(BudgetSnapshot)
            .col(budget_snapshot::Column::Month)
            .col(budget_snapshot::Column::Year)
            .to_owned(),
        Index::create()
            .if_not_exists()
            .name("idx_recurring_expense_snapshots_month_year")
            .table(RecurringExpenseSnapshot)
            .col(recurring_expense_snapshot::Column::Month)
            .col(recurring_expense_snapshot::Column::Year)
            .to_owned(),
        Index::create()
            .if_not_exists()
            .name("idx_income_snapshots_month_year")
            .table(IncomeSnapshot)
            .col(income_snapshot::Column::Month)
            .col(income_snapshot::Column::Year)
            .to_owned(),
        Index::create()
            .if_not_exists()
            .name("idx_expenses_budget_id")
            .table(Expense)
            .col(expense::Column::BudgetId)
            .to_owned(),
    ];

    for index in &indexes {
        db.execute(builder.build(index)).await?;
    }

    Ok(())
}

/// One-time store initialization: tables, indexes, and the default category
/// seed set. Call once at startup before any other store access.
pub async fn init_store(db: &DatabaseConnection) -> Result<()> {
    create_tables(db).await?;
    create_indexes(db).await?;
    let seeded = crate::core::category::ensure_default_categories(db).await?;
    if seeded > 0 {
        info!(seeded, "installed default category set");
    }
    info!("store initialized");
    Ok(())
}
