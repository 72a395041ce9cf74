//! Budget entity - a user-editable spending envelope for one category of life.
//!
//! Budgets are master records: editing one later never changes the snapshots
//! already taken for initialized months. Expense transactions may reference a
//! budget to count against it for the month of their date.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Budget database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    /// Unique identifier for the budget
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Human-readable name of the budget (e.g., "Groceries")
    pub name: String,
    /// Budgeted amount per month
    pub amount: f64,
    /// Optional category for grouping and display
    pub category_id: Option<Uuid>,
    /// Optional free-form description
    pub description: Option<String>,
    /// Whether this budget counts as a fixed expense in overviews
    pub count_as_fixed_expense: bool,
    /// Inactive budgets are kept for history but excluded from new months
    pub is_active: bool,
    /// When the budget was created
    pub created_at: DateTime,
    /// When the budget was last edited, if ever
    pub modified_at: Option<DateTime>,
}

/// `Budget` carries no enforced relations; expenses and snapshots point back
/// at it by plain id and survive its deletion
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
