//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.
//!
//! Master records (budgets, recurring expenses, incomes, categories) are
//! user-editable at any time; the monthly snapshot and record tables are
//! written exclusively by the month lifecycle in [`crate::core::month`].

pub mod bank_balance;
pub mod budget;
pub mod budget_snapshot;
pub mod budget_spending;
pub mod category;
pub mod expense;
pub mod income;
pub mod income_record;
pub mod income_snapshot;
pub mod month_status;
pub mod payment_record;
pub mod preference;
pub mod recurring_expense;
pub mod recurring_expense_snapshot;

// Re-export specific types to avoid conflicts
pub use bank_balance::{Column as BankBalanceColumn, Entity as BankBalance, Model as BankBalanceModel};
pub use budget::{Column as BudgetColumn, Entity as Budget, Model as BudgetModel};
pub use budget_snapshot::{
    Column as BudgetSnapshotColumn, Entity as BudgetSnapshot, Model as BudgetSnapshotModel,
};
pub use budget_spending::{
    Column as BudgetSpendingColumn, Entity as BudgetSpending, Model as BudgetSpendingModel,
};
pub use category::{Column as CategoryColumn, Entity as Category, Model as CategoryModel};
pub use expense::{Column as ExpenseColumn, Entity as Expense, Model as ExpenseModel};
pub use income::{Column as IncomeColumn, Entity as Income, Model as IncomeModel};
pub use income_record::{
    Column as IncomeRecordColumn, Entity as IncomeRecord, Model as IncomeRecordModel,
};
pub use income_snapshot::{
    Column as IncomeSnapshotColumn, Entity as IncomeSnapshot, Model as IncomeSnapshotModel,
};
pub use month_status::{
    Column as MonthStatusColumn, Entity as MonthStatus, Model as MonthStatusModel,
};
pub use payment_record::{
    Column as PaymentRecordColumn, Entity as PaymentRecord, Model as PaymentRecordModel,
};
pub use preference::{Column as PreferenceColumn, Entity as Preference, Model as PreferenceModel};
pub use recurring_expense::{
    Column as RecurringExpenseColumn, Entity as RecurringExpense, Model as RecurringExpenseModel,
};
pub use recurring_expense_snapshot::{
    Column as RecurringExpenseSnapshotColumn, Entity as RecurringExpenseSnapshot,
    Model as RecurringExpenseSnapshotModel,
};
