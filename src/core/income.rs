//! Income business logic.
//!
//! Extra money received during a month. Same validation rules as expenses.

use crate::{
    core::{expense::validate_description, money::ensure_positive},
    entities::{Income, Month, income},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Records an extra income for a month.
///
/// # Errors
/// [`Error::Validation`] for a blank description, [`Error::InvalidAmount`]
/// for a non-positive amount and [`Error::MonthNotFound`] for a missing month.
pub async fn create_income(
    db: &DatabaseConnection,
    month_id: i64,
    description: &str,
    amount: Decimal,
) -> Result<income::Model> {
    let description = validate_description(description)?;
    ensure_positive(amount)?;

    Month::find_by_id(month_id)
        .one(db)
        .await?
        .ok_or(Error::MonthNotFound { id: month_id })?;

    let model = income::ActiveModel {
        month_id: Set(month_id),
        description: Set(description),
        amount: Set(amount),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Recorded income {} of {} in month {month_id}", model.id, model.amount);
    Ok(model)
}

/// Retrieves all incomes of a month, newest first.
pub async fn get_incomes_for_month<C>(db: &C, month_id: i64) -> Result<Vec<income::Model>>
where
    C: ConnectionTrait,
{
    Income::find()
        .filter(income::Column::MonthId.eq(month_id))
        .order_by_desc(income::Column::CreatedAt)
        .order_by_desc(income::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific income by its unique ID.
pub async fn get_income_by_id(
    db: &DatabaseConnection,
    income_id: i64,
) -> Result<Option<income::Model>> {
    Income::find_by_id(income_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Deletes an income and returns the removed row.
///
/// # Errors
/// Returns [`Error::IncomeNotFound`] if the income does not exist.
pub async fn delete_income(db: &DatabaseConnection, income_id: i64) -> Result<income::Model> {
    let existing = get_income_by_id(db, income_id)
        .await?
        .ok_or(Error::IncomeNotFound { id: income_id })?;

    existing.clone().delete(db).await?;
    info!("Deleted income {income_id}");
    Ok(existing)
}
