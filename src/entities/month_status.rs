//! Month status entity - tracks which calendar months have been initialized.
//!
//! At most one row exists per (month, year). A month with `is_initialized`
//! true has a consistent set of snapshot and ledger rows; an uninitialized
//! month has none.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Month status database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "month_statuses")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Calendar month (1-12)
    pub month: i32,
    /// Calendar year
    pub year: i32,
    /// Whether snapshots and ledger rows exist for this month
    pub is_initialized: bool,
    /// When the month was (last) initialized
    pub initialized_at: DateTime,
    /// When the month was last regenerated, if ever
    pub last_regenerated_at: Option<DateTime>,
    /// When this row was first created
    pub created_at: DateTime,
}

/// `MonthStatus` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
