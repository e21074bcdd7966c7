//! Expense business logic - Handles all expense-related operations.
//!
//! This module provides functions for creating, retrieving and deleting expenses
//! of a month. Inputs are validated before anything is written: descriptions
//! must not be blank and amounts must be strictly positive. The owning month
//! must exist.

use crate::{
    core::{category::Category, ledger::counts_against_balance, money::ensure_positive},
    entities::{Expense, Month, expense},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, info};

/// Longest description accepted, in characters. Keeps a debt title inside
/// Discord's 256-character embed title.
pub const MAX_DESCRIPTION_CHARS: usize = 200;

/// Trims a description and rejects it when nothing is left or it is too long.
pub(crate) fn validate_description(description: &str) -> Result<String> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation {
            message: "Description cannot be empty".to_string(),
        });
    }
    if trimmed.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(Error::Validation {
            message: format!(
                "Description cannot be longer than {MAX_DESCRIPTION_CHARS} characters"
            ),
        });
    }
    Ok(trimmed.to_string())
}

/// Inserts an expense row without user-input validation of the category.
///
/// Shared by regular expenses and the transit sub-budget.
pub(crate) async fn insert_expense<C>(
    db: &C,
    month_id: i64,
    description: &str,
    amount: Decimal,
    category: &Category,
) -> Result<expense::Model>
where
    C: ConnectionTrait,
{
    let description = validate_description(description)?;
    ensure_positive(amount)?;

    Month::find_by_id(month_id)
        .one(db)
        .await?
        .ok_or(Error::MonthNotFound { id: month_id })?;

    let model = expense::ActiveModel {
        month_id: Set(month_id),
        description: Set(description),
        amount: Set(amount),
        category: Set(category.id().to_string()),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    debug!(
        "Inserted expense {} ({}) in month {month_id}",
        model.id, model.category
    );
    Ok(model)
}

/// Records a new expense against a month.
///
/// # Arguments
/// * `month_id` - The month to record against
/// * `description` - What the money was spent on
/// * `amount` - Strictly positive amount
/// * `category` - Category of the expense
///
/// # Errors
/// [`Error::Validation`] for a blank description, [`Error::InvalidAmount`]
/// for a non-positive amount and [`Error::MonthNotFound`] for a missing month.
pub async fn create_expense(
    db: &DatabaseConnection,
    month_id: i64,
    description: &str,
    amount: Decimal,
    category: &Category,
) -> Result<expense::Model> {
    let model = insert_expense(db, month_id, description, amount, category).await?;
    info!("Recorded expense {} of {} in month {month_id}", model.id, model.amount);
    Ok(model)
}

/// Retrieves all expenses of a month, newest first.
///
/// Includes the transit sub-budget rows; see [`get_ledger_expenses`] for the
/// main ledger view.
pub async fn get_expenses_for_month<C>(db: &C, month_id: i64) -> Result<Vec<expense::Model>>
where
    C: ConnectionTrait,
{
    Expense::find()
        .filter(expense::Column::MonthId.eq(month_id))
        .order_by_desc(expense::Column::CreatedAt)
        .order_by_desc(expense::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Keeps only the expenses that count against the main balance.
#[must_use]
pub fn get_ledger_expenses(expenses: &[expense::Model]) -> Vec<expense::Model> {
    expenses
        .iter()
        .filter(|e| counts_against_balance(e))
        .cloned()
        .collect()
}

/// Retrieves a specific expense by its unique ID.
pub async fn get_expense_by_id(
    db: &DatabaseConnection,
    expense_id: i64,
) -> Result<Option<expense::Model>> {
    Expense::find_by_id(expense_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Deletes an expense and returns the removed row.
///
/// # Errors
/// Returns [`Error::ExpenseNotFound`] if the expense does not exist.
pub async fn delete_expense(db: &DatabaseConnection, expense_id: i64) -> Result<expense::Model> {
    let existing = get_expense_by_id(db, expense_id)
        .await?
        .ok_or(Error::ExpenseNotFound { id: expense_id })?;

    existing.clone().delete(db).await?;
    info!("Deleted expense {expense_id}");
    Ok(existing)
}
