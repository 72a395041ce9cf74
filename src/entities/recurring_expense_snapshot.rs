//! Monthly recurring expense snapshot entity.
//!
//! Frozen copy of a recurring expense for one initialized month.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Monthly recurring expense snapshot database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "monthly_recurring_expense_snapshots")]
pub struct Model {
    /// Unique identifier for the snapshot
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Calendar month (1-12) this snapshot belongs to
    pub month: i32,
    /// Calendar year this snapshot belongs to
    pub year: i32,
    /// Id of the live recurring expense this snapshot was taken from; a plain
    /// back-reference, the snapshot outlives the master
    pub original_expense_id: Uuid,
    /// Name as it was at initialization time
    pub name: String,
    /// Amount as it was at initialization time
    pub amount: f64,
    /// Due day as it was at initialization time
    pub day_of_month: i32,
    /// Category as it was at initialization time
    pub category_id: Uuid,
    /// Description as it was at initialization time
    pub description: Option<String>,
    /// When the snapshot was taken
    pub created_at: DateTime,
}

/// `RecurringExpenseSnapshot` carries no enforced relations; deleting the
/// master expense must leave its snapshots in place
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
