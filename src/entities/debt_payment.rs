//! Debt payment entity - One installment against a debt.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Debt payment database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "debt_payments")]
pub struct Model {
    /// Unique identifier for the payment
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Debt this payment amortizes
    pub debt_id: i64,
    /// Amount paid, always positive
    pub amount: Decimal,
    /// Date the payment was made
    pub date: DateTimeUtc,
    /// When the row was recorded
    pub created_at: DateTimeUtc,
}

/// Defines relationships between `DebtPayment` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each payment belongs to one debt
    #[sea_orm(
        belongs_to = "super::debt::Entity",
        from = "Column::DebtId",
        to = "super::debt::Column::Id"
    )]
    Debt,
}

impl Related<super::debt::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Debt.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
