//! Month entity - One accounting period of the ledger.
//!
//! A month carries the salary for the period. At most one month is active at
//! a time; closing a month stamps `ended_at`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Month database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "months")]
pub struct Model {
    /// Unique identifier for the month
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Base salary available for the period
    pub salary: Decimal,
    /// Whether this is the currently open period
    pub is_active: bool,
    /// When the period was started
    pub started_at: DateTimeUtc,
    /// When the period was closed, None while active
    pub ended_at: Option<DateTimeUtc>,
}

/// Defines relationships between Month and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One month has many expenses
    #[sea_orm(has_many = "super::expense::Entity")]
    Expenses,
    /// One month has many incomes
    #[sea_orm(has_many = "super::income::Entity")]
    Incomes,
}

impl Related<super::expense::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl Related<super::income::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Incomes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
