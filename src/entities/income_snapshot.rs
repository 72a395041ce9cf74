//! Monthly income snapshot entity.
//!
//! Frozen copy of an income source for one initialized month.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Monthly income snapshot database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "monthly_income_snapshots")]
pub struct Model {
    /// Unique identifier for the snapshot
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Calendar month (1-12) this snapshot belongs to
    pub month: i32,
    /// Calendar year this snapshot belongs to
    pub year: i32,
    /// Id of the live income source this snapshot was taken from; a plain
    /// back-reference, the snapshot outlives the master
    pub original_income_id: Uuid,
    /// Name as it was at initialization time
    pub name: String,
    /// Amount as it was at initialization time
    pub amount: f64,
    /// Arrival day as it was at initialization time
    pub day_of_month: i32,
    /// Category label as it was at initialization time
    pub category: String,
    /// Description as it was at initialization time
    pub description: Option<String>,
    /// When the snapshot was taken
    pub created_at: DateTime,
}

/// `IncomeSnapshot` carries no enforced relations; deleting the master income
/// must leave its snapshots in place
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
