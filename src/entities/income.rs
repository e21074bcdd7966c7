//! Income entity - Extra money received during a month, on top of salary.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Income database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "incomes")]
pub struct Model {
    /// Unique identifier for the income
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Month this income belongs to
    pub month_id: i64,
    /// Human-readable description
    pub description: String,
    /// Amount received, always positive
    pub amount: Decimal,
    /// When the income was recorded
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Income and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each income belongs to one month
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
