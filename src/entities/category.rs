//! Category entity - grouping for budgets and recurring expenses.
//!
//! A fixed seed set is installed once on first startup; user-created
//! categories can be added and removed alongside it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Category database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    /// Unique identifier for the category
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Display name (e.g., "Housing")
    pub name: String,
    /// Optional display color as a hex string
    pub color: Option<String>,
    /// Optional display icon
    pub icon: Option<String>,
    /// Seeded categories are marked default and cannot be deleted
    pub is_default: bool,
    /// When the category was created
    pub created_at: DateTime,
}

/// Defines relationships between Category and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One category groups many recurring expenses
    #[sea_orm(has_many = "super::recurring_expense::Entity")]
    RecurringExpenses,
}

impl Related<super::recurring_expense::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RecurringExpenses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
