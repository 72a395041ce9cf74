//! Monthly budget snapshot entity.
//!
//! An immutable-at-creation copy of a budget's fields as they existed when
//! its month was initialized. Later edits to the master budget do not touch
//! existing snapshots; only regeneration rewrites them.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Monthly budget snapshot database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "monthly_budget_snapshots")]
pub struct Model {
    /// Unique identifier for the snapshot
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Calendar month (1-12) this snapshot belongs to
    pub month: i32,
    /// Calendar year this snapshot belongs to
    pub year: i32,
    /// Id of the live budget this snapshot was taken from; a plain
    /// back-reference, the snapshot outlives the master
    pub original_budget_id: Uuid,
    /// Name as it was at initialization time
    pub name: String,
    /// Amount as it was at initialization time
    pub amount: f64,
    /// Category as it was at initialization time
    pub category_id: Option<Uuid>,
    /// Description as it was at initialization time
    pub description: Option<String>,
    /// Fixed-expense flag as it was at initialization time
    pub count_as_fixed_expense: bool,
    /// When the snapshot was taken
    pub created_at: DateTime,
}

/// `BudgetSnapshot` carries no enforced relations; deleting the master budget
/// must leave its snapshots in place
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
