//! Debt entity - A payable balance amortized by [`super::debt_payment`] rows.
//!
//! `is_paid` is never derived by the store; it is flipped explicitly once the
//! payments cover `total_amount`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Debt database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "debts")]
pub struct Model {
    /// Unique identifier for the debt
    #[sea_orm(primary_key)]
    pub id: i64,
    /// What the debt is for
    pub description: String,
    /// Full amount owed
    pub total_amount: Decimal,
    /// Whether the debt has been settled
    pub is_paid: bool,
    /// When the debt was recorded
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Debt and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One debt has many payments
    #[sea_orm(has_many = "super::debt_payment::Entity")]
    Payments,
}

impl Related<super::debt_payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
