//! Recurring expense entity - a bill that comes back every month.
//!
//! Master record; the day of month records when the bill is usually due.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Recurring expense database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recurring_expenses")]
pub struct Model {
    /// Unique identifier for the recurring expense
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Human-readable name (e.g., "Rent", "Electricity")
    pub name: String,
    /// Amount due each month
    pub amount: f64,
    /// Day of the month the bill is due (1-31)
    pub day_of_month: i32,
    /// Category for grouping and display
    pub category_id: Uuid,
    /// Optional free-form description
    pub description: Option<String>,
    /// Inactive expenses are kept for history but excluded from new months
    pub is_active: bool,
    /// When the record was created
    pub created_at: DateTime,
    /// When the record was last edited, if ever
    pub modified_at: Option<DateTime>,
}

/// Defines relationships between `RecurringExpense` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each recurring expense belongs to one category; category deletion is
    /// guarded while expenses reference it
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
