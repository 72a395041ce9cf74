//! Income record entity - per-month received/not-received tracking for incomes.
//!
//! Mirror of [`super::payment_record`] for the income side: one record per
//! (income, month, year), absent means not received.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Income record database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "income_records")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Id of the income source this record tracks; a plain reference,
    /// records outlive the master
    pub income_id: Uuid,
    /// Calendar month (1-12)
    pub month: i32,
    /// Calendar year
    pub year: i32,
    /// Whether the income has arrived for this month
    pub is_received: bool,
    /// When the income was marked received, if it is
    pub received_date: Option<DateTime>,
    /// When this record was created
    pub created_at: DateTime,
    /// When this record was last changed, if ever
    pub modified_at: Option<DateTime>,
}

/// `IncomeRecord` carries no enforced relations; `income_id` is a plain
/// reference that stays valid after the master income is deleted
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
