//! Income entity - a recurring source of money (salary, benefits, ...).
//!
//! The category is a label from the fixed set in
//! [`crate::core::income::INCOME_CATEGORIES`], not a foreign key.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Income database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "incomes")]
pub struct Model {
    /// Unique identifier for the income source
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Human-readable name (e.g., "Day job")
    pub name: String,
    /// Amount received each month
    pub amount: f64,
    /// Day of the month the money usually arrives (1-31)
    pub day_of_month: i32,
    /// Label from the fixed income-category set
    pub category: String,
    /// Optional free-form description
    pub description: Option<String>,
    /// Inactive incomes are kept for history but excluded from new months
    pub is_active: bool,
    /// When the record was created
    pub created_at: DateTime,
    /// When the record was last edited, if ever
    pub modified_at: Option<DateTime>,
}

/// `Income` carries no enforced relations; receipt records and snapshots
/// point back at it by plain id and survive its deletion
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
