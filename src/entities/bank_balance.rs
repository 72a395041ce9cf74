//! Bank balance entity - one balance figure per calendar month.
//!
//! Lazily created at zero on first read, so a queried month always has a row.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Bank balance database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bank_balances")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Calendar month (1-12)
    pub month: i32,
    /// Calendar year
    pub year: i32,
    /// The balance as last entered or carried over
    pub current_balance: f64,
    /// When the balance was last written
    pub last_updated: DateTime,
}

/// `BankBalance` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
