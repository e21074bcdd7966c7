//! Expense entity - A cash outflow recorded against a month.
//!
//! The `category` column stores the category id as text (see
//! [`crate::core::category::Category`]). Two reserved ids model the transit
//! sub-budget: `transport_budget` and `transport_daily`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Expense database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    /// Unique identifier for the expense
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Month this expense belongs to
    pub month_id: i64,
    /// Human-readable description
    pub description: String,
    /// Amount spent, always positive
    pub amount: Decimal,
    /// Category id (e.g. `"comida"`, `"transport_daily"`)
    pub category: String,
    /// When the expense was recorded
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Expense and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each expense belongs to one month
    #[sea_orm(
        belongs_to = "super::month::Entity",
        from = "Column::MonthId",
        to = "super::month::Column::Id"
    )]
    Month,
}

impl Related<super::month::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Month.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
