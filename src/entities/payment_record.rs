//! Payment record entity - per-month paid/unpaid tracking for recurring expenses.
//!
//! Exactly one record exists per (expense, month, year); the composite key
//! carries a unique index and all writes go through the conditional upsert in
//! [`crate::core::ledger`]. An absent record means unpaid.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Payment record database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payment_records")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Id of the recurring or one-time expense this record tracks; a plain
    /// reference, records outlive the master
    pub expense_id: Uuid,
    /// Calendar month (1-12)
    pub month: i32,
    /// Calendar year
    pub year: i32,
    /// Whether the expense has been paid for this month
    pub is_paid: bool,
    /// When the expense was marked paid, if it is
    pub paid_date: Option<DateTime>,
    /// When this record was created
    pub created_at: DateTime,
    /// When this record was last changed, if ever
    pub modified_at: Option<DateTime>,
}

/// `PaymentRecord` carries no enforced relations; `expense_id` may point at a
/// recurring expense, a one-time expense, or a master that was deleted since
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
