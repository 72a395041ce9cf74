//! Budget spending entity - cached per-month spend figure for a budget.
//!
//! One row per (budget, month, year), written through the conditional upsert
//! in [`crate::core::budget`].

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Budget spending database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "budget_spendings")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Id of the budget this figure belongs to; a plain reference, the row
    /// survives the master's deletion
    pub budget_id: Uuid,
    /// Calendar month (1-12)
    pub month: i32,
    /// Calendar year
    pub year: i32,
    /// Total spent against the budget this month
    pub amount_spent: f64,
    /// When this row was created
    pub created_at: DateTime,
    /// When this row was last changed, if ever
    pub modified_at: Option<DateTime>,
}

/// `BudgetSpending` carries no enforced relations; `budget_id` is a plain
/// reference so the budget stays deletable while cached figures exist
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
