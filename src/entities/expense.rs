//! Expense entity - a single user-entered transaction.
//!
//! Expenses are inherently month-scoped through their date and are never
//! snapshotted; month regeneration leaves them untouched. A `budget_id` of
//! `None` marks a one-time expense, otherwise the transaction counts against
//! that budget for the month of its date. Deletion is a soft flag.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Expense transaction database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    /// Unique identifier for the transaction
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Budget this expense counts against; None for one-time expenses
    pub budget_id: Option<Uuid>,
    /// Human-readable name of the purchase
    pub name: String,
    /// Optional free-form description
    pub description: Option<String>,
    /// Amount spent
    pub amount: f64,
    /// When the money was spent (determines the month it belongs to)
    pub date: DateTime,
    /// When the record was created
    pub created_at: DateTime,
    /// When the record was last edited, if ever
    pub modified_at: Option<DateTime>,
    /// Soft delete flag - if true, expense is hidden but data is preserved
    pub is_deleted: bool,
}

/// `Expense` carries no enforced relations; `budget_id` is a plain reference
/// so the budget stays deletable while transactions point at it
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
