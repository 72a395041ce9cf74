//! Month lifecycle - initialization and regeneration.
//!
//! Initializing a month freezes every active budget, recurring expense, and
//! income source into snapshot rows tagged (month, year), pre-populates the
//! payment/receipt ledger, optionally carries the previous month's bank
//! balance forward, and finally flips the month's status to initialized.
//!
//! The sequence is deliberately not wrapped in a transaction: snapshot rows
//! are cleared and rebuilt at the start, the ledger and balance steps only
//! create what is missing, so a crash mid-way leaves the month uninitialized
//! and a retry produces the same end state. The status flag is written last
//! so `is_month_initialized` never reports a half-built month as done.
//!
//! Regeneration re-derives the snapshots from the current master data after
//! the user edited it, with a policy choice over whether the paid/received
//! flags the user already set survive.

use crate::{
    core::{balance, budget, income, ledger, recurring, snapshot},
    entities::{MonthStatus, bank_balance, month_status},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{Set, prelude::*};
use tracing::info;
use uuid::Uuid;

/// What a month initialization (or regeneration) produced.
#[derive(Debug, Clone)]
pub struct MonthInitSummary {
    /// Calendar month (1-12) that was initialized
    pub month: i32,
    /// Calendar year that was initialized
    pub year: i32,
    /// Number of budget snapshots created
    pub budgets_snapshotted: usize,
    /// Number of recurring expense snapshots created
    pub recurring_expenses_snapshotted: usize,
    /// Number of income snapshots created
    pub incomes_snapshotted: usize,
    /// Balance carried over from the previous month, if one existed
    pub carried_balance: Option<f64>,
}

/// Formats an initialization summary into a human-readable string, for
/// logging or display after a manual regeneration.
#[must_use]
pub fn format_month_summary(summary: &MonthInitSummary) -> String {
    let carried = summary.carried_balance.map_or_else(
        || "no previous balance".to_string(),
        |b| format!("carried balance {b:.2}"),
    );
    format!(
        "Initialized {}/{}: {} budgets, {} recurring expenses, {} incomes, {}",
        summary.month,
        summary.year,
        summary.budgets_snapshotted,
        summary.recurring_expenses_snapshotted,
        summary.incomes_snapshotted,
        carried
    )
}

fn validate_month(month: i32) -> Result<()> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(Error::InvalidMonth { month })
    }
}

/// The calendar month preceding (month, year); January wraps to December of
/// the previous year.
const fn previous_month(month: i32, year: i32) -> (i32, i32) {
    if month == 1 { (12, year - 1) } else { (month - 1, year) }
}

/// Retrieves the status row for (month, year), if the month was ever touched
/// by the lifecycle.
pub async fn get_month_status(
    db: &DatabaseConnection,
    month: i32,
    year: i32,
) -> Result<Option<month_status::Model>> {
    MonthStatus::find()
        .filter(month_status::Column::Month.eq(month))
        .filter(month_status::Column::Year.eq(year))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Whether (month, year) has been initialized. No side effects.
pub async fn is_month_initialized(db: &DatabaseConnection, month: i32, year: i32) -> Result<bool> {
    let status = get_month_status(db, month, year).await?;
    Ok(status.is_some_and(|s| s.is_initialized))
}

/// The previous month's bank balance, or None if that month has no balance
/// row. None is distinct from a literal zero balance: callers use it to
/// decide whether to ask the user about carrying a balance forward.
pub async fn get_previous_month_balance(
    db: &DatabaseConnection,
    month: i32,
    year: i32,
) -> Result<Option<f64>> {
    validate_month(month)?;
    let (prev_month, prev_year) = previous_month(month, year);

    let balance = crate::entities::BankBalance::find()
        .filter(bank_balance::Column::Month.eq(prev_month))
        .filter(bank_balance::Column::Year.eq(prev_year))
        .one(db)
        .await?;

    Ok(balance.map(|b| b.current_balance))
}

/// Upserts the status row for (month, year) through the given edit closure.
async fn upsert_month_status<F>(
    db: &DatabaseConnection,
    month: i32,
    year: i32,
    edit: F,
) -> Result<month_status::Model>
where
    F: FnOnce(&mut month_status::ActiveModel),
{
    let now = Utc::now().naive_utc();

    let mut active = match get_month_status(db, month, year).await? {
        Some(status) => status.into(),
        None => month_status::ActiveModel {
            id: Set(Uuid::new_v4()),
            month: Set(month),
            year: Set(year),
            is_initialized: Set(false),
            initialized_at: Set(now),
            last_regenerated_at: Set(None),
            created_at: Set(now),
        },
    };

    edit(&mut active);

    let result = if active.id.is_unchanged() {
        active.update(db).await?
    } else {
        active.insert(db).await?
    };

    Ok(result)
}

/// Initializes (month, year) from the current master data.
///
/// Fails with [`Error::AlreadyInitialized`] if the month is already done;
/// that signals a logic error in the caller, not a retryable condition. A
/// partially applied earlier attempt is safe to retry: snapshot rows left
/// behind by the crashed run are cleared and rebuilt, and the ledger and
/// balance steps create only what is missing.
pub async fn initialize_month(
    db: &DatabaseConnection,
    month: i32,
    year: i32,
    copy_previous_balance: bool,
) -> Result<MonthInitSummary> {
    validate_month(month)?;

    if is_month_initialized(db, month, year).await? {
        return Err(Error::AlreadyInitialized { month, year });
    }

    // 1. Drop snapshot rows a crashed earlier attempt may have left; the
    //    rebuild below must not duplicate them
    snapshot::delete_budget_snapshots_for_month(db, month, year).await?;
    snapshot::delete_recurring_expense_snapshots_for_month(db, month, year).await?;
    snapshot::delete_income_snapshots_for_month(db, month, year).await?;

    // 2. Freeze active budgets
    let budgets = budget::get_active_budgets(db).await?;
    for b in &budgets {
        snapshot::insert_budget_snapshot(db, b, month, year).await?;
    }

    // 3. Freeze active recurring expenses and pre-populate the payment ledger
    let expenses = recurring::get_active_recurring_expenses(db).await?;
    for e in &expenses {
        snapshot::insert_recurring_expense_snapshot(db, e, month, year).await?;
        ledger::ensure_payment_record(db, e.id, month, year).await?;
    }

    // 4. Freeze active incomes and pre-populate the receipt ledger
    let incomes = income::get_active_incomes(db).await?;
    for i in &incomes {
        snapshot::insert_income_snapshot(db, i, month, year).await?;
        ledger::ensure_income_record(db, i.id, month, year).await?;
    }

    // 5. Carry the previous month's balance forward; a month with no
    //    predecessor simply starts at the zero default
    let mut carried_balance = None;
    if copy_previous_balance {
        if let Some(previous) = get_previous_month_balance(db, month, year).await? {
            balance::update_bank_balance(db, month, year, previous).await?;
            carried_balance = Some(previous);
        }
    }

    // 6. Flip the status last, once the month's rows all exist
    upsert_month_status(db, month, year, |active| {
        active.is_initialized = Set(true);
        active.initialized_at = Set(Utc::now().naive_utc());
    })
    .await?;

    let summary = MonthInitSummary {
        month,
        year,
        budgets_snapshotted: budgets.len(),
        recurring_expenses_snapshotted: expenses.len(),
        incomes_snapshotted: incomes.len(),
        carried_balance,
    };
    info!("{}", format_month_summary(&summary));

    Ok(summary)
}

/// Rebuilds (month, year)'s snapshots from the current master data.
///
/// User-entered expense transactions are never touched. With
/// `preserve_user_data` the existing paid/received records survive as well;
/// without it they are deleted and recreated with the flags down.
pub async fn regenerate_month(
    db: &DatabaseConnection,
    month: i32,
    year: i32,
    preserve_user_data: bool,
) -> Result<MonthInitSummary> {
    validate_month(month)?;
    info!(month, year, preserve_user_data, "regenerating month");

    // 1. Optionally reset the paid/received state
    if !preserve_user_data {
        ledger::delete_payment_records_for_month(db, month, year).await?;
        ledger::delete_income_records_for_month(db, month, year).await?;
    }

    // 2. Clear the flag so re-initialization passes its guard
    if let Some(status) = get_month_status(db, month, year).await? {
        let mut active: month_status::ActiveModel = status.into();
        active.is_initialized = Set(false);
        active.update(db).await?;
    }

    // 3. Re-initialize from current master data; the old snapshots are
    //    dropped and re-derived there
    let summary = initialize_month(db, month, year, true).await?;

    // 4. Stamp the regeneration time
    upsert_month_status(db, month, year, |active| {
        active.last_regenerated_at = Set(Some(Utc::now().naive_utc()));
    })
    .await?;

    Ok(summary)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_never_initialized_month_reports_false() -> Result<()> {
        let db = setup_test_db().await?;

        assert!(!is_month_initialized(&db, 3, 2025).await?);
        assert!(get_month_status(&db, 3, 2025).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_initialize_month_flips_status() -> Result<()> {
        let db = setup_test_db().await?;

        initialize_month(&db, 3, 2025, true).await?;
        assert!(is_month_initialized(&db, 3, 2025).await?);

        let status = get_month_status(&db, 3, 2025).await?.unwrap();
        assert!(status.is_initialized);
        assert!(status.last_regenerated_at.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_initialize_twice_fails_without_mutation() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_budget(&db, "Groceries").await?;

        initialize_month(&db, 3, 2025, true).await?;
        let before = crate::core::snapshot::get_budget_snapshots_for_month(&db, 3, 2025).await?;

        let result = initialize_month(&db, 3, 2025, true).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::AlreadyInitialized {
                month: 3,
                year: 2025
            }
        ));

        let after = crate::core::snapshot::get_budget_snapshots_for_month(&db, 3, 2025).await?;
        assert_eq!(before.len(), after.len());

        Ok(())
    }

    #[tokio::test]
    async fn test_initialize_snapshots_active_masters_only() -> Result<()> {
        let db = setup_test_db().await?;
        let category = any_category(&db).await?;

        create_custom_budget(&db, "Groceries", 300.0, true).await?;
        create_custom_budget(&db, "Old budget", 100.0, false).await?;
        let rent = create_custom_recurring_expense(&db, "Rent", 800.0, 1, category.id).await?;
        let income = create_test_income(&db, "Day job").await?;

        let summary = initialize_month(&db, 3, 2025, true).await?;
        assert_eq!(summary.budgets_snapshotted, 1);
        assert_eq!(summary.recurring_expenses_snapshotted, 1);
        assert_eq!(summary.incomes_snapshotted, 1);

        let budget_snaps =
            crate::core::snapshot::get_budget_snapshots_for_month(&db, 3, 2025).await?;
        assert_eq!(budget_snaps.len(), 1);
        assert_eq!(budget_snaps[0].name, "Groceries");

        // Ledger pre-populated with the flags down
        let payments = ledger::get_payment_records_for_month(&db, 3, 2025).await?;
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].expense_id, rent.id);
        assert!(!payments[0].is_paid);

        let receipts = ledger::get_income_records_for_month(&db, 3, 2025).await?;
        assert_eq!(receipts.len(), 1);
        assert_eq!(receipts[0].income_id, income.id);
        assert!(!receipts[0].is_received);

        Ok(())
    }

    #[tokio::test]
    async fn test_snapshot_immune_to_master_edits() -> Result<()> {
        let db = setup_test_db().await?;

        let budget = create_custom_budget(&db, "Groceries", 300.0, true).await?;
        initialize_month(&db, 3, 2025, true).await?;

        let mut edited = budget;
        edited.amount = 999.0;
        crate::core::budget::update_budget(&db, edited).await?;

        let snaps = crate::core::snapshot::get_budget_snapshots_for_month(&db, 3, 2025).await?;
        assert_eq!(snaps[0].amount, 300.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_previous_month_wraps_january() -> Result<()> {
        let db = setup_test_db().await?;

        assert_eq!(previous_month(1, 2025), (12, 2024));
        assert_eq!(previous_month(6, 2025), (5, 2025));

        // Absent is None, not zero
        assert!(get_previous_month_balance(&db, 1, 2025).await?.is_none());

        balance::update_bank_balance(&db, 12, 2024, 250.0).await?;
        assert_eq!(
            get_previous_month_balance(&db, 1, 2025).await?,
            Some(250.0)
        );

        // A zero balance row still reads as Some
        balance::update_bank_balance(&db, 5, 2025, 0.0).await?;
        assert_eq!(get_previous_month_balance(&db, 6, 2025).await?, Some(0.0));

        Ok(())
    }

    #[tokio::test]
    async fn test_initialize_carries_previous_balance() -> Result<()> {
        let db = setup_test_db().await?;

        balance::update_bank_balance(&db, 2, 2025, 512.0).await?;

        let summary = initialize_month(&db, 3, 2025, true).await?;
        assert_eq!(summary.carried_balance, Some(512.0));

        let current = balance::get_bank_balance(&db, 3, 2025).await?;
        assert_eq!(current.current_balance, 512.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_initialize_without_balance_copy() -> Result<()> {
        let db = setup_test_db().await?;

        balance::update_bank_balance(&db, 2, 2025, 512.0).await?;

        let summary = initialize_month(&db, 3, 2025, false).await?;
        assert_eq!(summary.carried_balance, None);

        let current = balance::get_bank_balance(&db, 3, 2025).await?;
        assert_eq!(current.current_balance, 0.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_regenerate_picks_up_master_edits() -> Result<()> {
        let db = setup_test_db().await?;

        let budget = create_custom_budget(&db, "Groceries", 300.0, true).await?;
        initialize_month(&db, 3, 2025, true).await?;

        let mut edited = budget;
        edited.amount = 450.0;
        crate::core::budget::update_budget(&db, edited).await?;

        regenerate_month(&db, 3, 2025, true).await?;

        let snaps = crate::core::snapshot::get_budget_snapshots_for_month(&db, 3, 2025).await?;
        assert_eq!(snaps.len(), 1);
        assert_eq!(snaps[0].amount, 450.0);

        assert!(is_month_initialized(&db, 3, 2025).await?);
        let status = get_month_status(&db, 3, 2025).await?.unwrap();
        assert!(status.last_regenerated_at.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn test_regenerate_preserves_paid_state() -> Result<()> {
        let db = setup_test_db().await?;
        let category = any_category(&db).await?;

        let rent = create_custom_recurring_expense(&db, "Rent", 800.0, 1, category.id).await?;
        let income = create_test_income(&db, "Day job").await?;
        initialize_month(&db, 3, 2025, true).await?;

        ledger::mark_paid(&db, rent.id, 3, 2025).await?;
        ledger::mark_received(&db, income.id, 3, 2025).await?;

        regenerate_month(&db, 3, 2025, true).await?;

        assert!(ledger::is_paid(&db, rent.id, 3, 2025).await?);
        assert!(ledger::is_received(&db, income.id, 3, 2025).await?);

        // Still exactly one record per key
        assert_eq!(
            ledger::get_payment_records_for_month(&db, 3, 2025).await?.len(),
            1
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_regenerate_discarding_user_data_resets_flags() -> Result<()> {
        let db = setup_test_db().await?;
        let category = any_category(&db).await?;

        let rent = create_custom_recurring_expense(&db, "Rent", 800.0, 1, category.id).await?;
        initialize_month(&db, 3, 2025, true).await?;
        ledger::mark_paid(&db, rent.id, 3, 2025).await?;

        regenerate_month(&db, 3, 2025, false).await?;

        assert!(!ledger::is_paid(&db, rent.id, 3, 2025).await?);
        // The ledger was re-populated for the active expense
        assert_eq!(
            ledger::get_payment_records_for_month(&db, 3, 2025).await?.len(),
            1
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_regenerate_leaves_transactions_alone() -> Result<()> {
        let db = setup_test_db().await?;

        initialize_month(&db, 3, 2025, true).await?;

        let date = chrono::NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_time(chrono::NaiveTime::MIN);
        crate::core::transaction::add_expense(
            &db,
            "Concert".to_string(),
            45.0,
            date,
            None,
            None,
        )
        .await?;

        regenerate_month(&db, 3, 2025, false).await?;

        let expenses =
            crate::core::transaction::get_all_expenses_for_month(&db, 3, 2025).await?;
        assert_eq!(expenses.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_initialize_retry_after_partial_state() -> Result<()> {
        let db = setup_test_db().await?;
        let category = any_category(&db).await?;

        let budget = create_custom_budget(&db, "Groceries", 300.0, true).await?;
        let rent = create_custom_recurring_expense(&db, "Rent", 800.0, 1, category.id).await?;

        // A crashed first attempt got through the snapshot and ledger steps
        // for some entities but never flipped the status flag
        crate::core::snapshot::insert_budget_snapshot(&db, &budget, 3, 2025).await?;
        crate::core::snapshot::insert_recurring_expense_snapshot(&db, &rent, 3, 2025).await?;
        ledger::ensure_payment_record(&db, rent.id, 3, 2025).await?;
        assert!(!is_month_initialized(&db, 3, 2025).await?);

        let summary = initialize_month(&db, 3, 2025, true).await?;
        assert_eq!(summary.budgets_snapshotted, 1);
        assert_eq!(summary.recurring_expenses_snapshotted, 1);

        // No duplicated rows from the first attempt
        let budget_snaps =
            crate::core::snapshot::get_budget_snapshots_for_month(&db, 3, 2025).await?;
        assert_eq!(budget_snaps.len(), 1);
        let expense_snaps =
            crate::core::snapshot::get_recurring_expense_snapshots_for_month(&db, 3, 2025)
                .await?;
        assert_eq!(expense_snaps.len(), 1);
        assert_eq!(
            ledger::get_payment_records_for_month(&db, 3, 2025).await?.len(),
            1
        );
        assert!(is_month_initialized(&db, 3, 2025).await?);

        Ok(())
    }

    #[tokio::test]
    async fn test_masters_deletable_while_month_initialized() -> Result<()> {
        let db = setup_test_db().await?;
        let category = any_category(&db).await?;

        let budget = create_custom_budget(&db, "Groceries", 300.0, true).await?;
        let rent = create_custom_recurring_expense(&db, "Rent", 800.0, 1, category.id).await?;
        let income = create_test_income(&db, "Day job").await?;
        initialize_month(&db, 3, 2025, true).await?;
        ledger::mark_paid(&db, rent.id, 3, 2025).await?;
        crate::core::budget::upsert_budget_spending(&db, budget.id, 3, 2025, 120.0).await?;

        // Master deletion is independent of month state
        assert!(crate::core::budget::delete_budget(&db, budget.id).await?);
        assert!(crate::core::recurring::delete_recurring_expense(&db, rent.id).await?);
        assert!(crate::core::income::delete_income(&db, income.id).await?);

        // The month's frozen rows and ledger state survive the masters
        assert_eq!(
            crate::core::snapshot::get_budget_snapshots_for_month(&db, 3, 2025)
                .await?
                .len(),
            1
        );
        assert_eq!(
            crate::core::snapshot::get_recurring_expense_snapshots_for_month(&db, 3, 2025)
                .await?
                .len(),
            1
        );
        assert_eq!(
            crate::core::snapshot::get_income_snapshots_for_month(&db, 3, 2025)
                .await?
                .len(),
            1
        );
        assert!(ledger::is_paid(&db, rent.id, 3, 2025).await?);
        assert_eq!(
            crate::core::budget::get_budget_spent(&db, budget.id, 3, 2025).await?,
            120.0
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_month_rejected() -> Result<()> {
        let db = setup_test_db().await?;

        let result = initialize_month(&db, 13, 2025, true).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidMonth { month: 13 }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_format_month_summary() {
        let summary = MonthInitSummary {
            month: 3,
            year: 2025,
            budgets_snapshotted: 2,
            recurring_expenses_snapshotted: 4,
            incomes_snapshotted: 1,
            carried_balance: Some(512.0),
        };

        let text = format_month_summary(&summary);
        assert!(text.contains("3/2025"));
        assert!(text.contains("2 budgets"));
        assert!(text.contains("4 recurring expenses"));
        assert!(text.contains("carried balance 512.00"));

        let summary = MonthInitSummary {
            carried_balance: None,
            ..summary
        };
        assert!(format_month_summary(&summary).contains("no previous balance"));
    }
}
