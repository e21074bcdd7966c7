//! Transit sub-budget.
//!
//! A month may carry a ring-fenced transit allowance, stored as a single
//! `transport_budget` expense. Daily fares are `transport_daily` expenses drawn
//! from that allowance; they never count against the main balance.

use crate::{
    core::{
        category::{Category, TRANSPORT_BUDGET_ID},
        expense::insert_expense,
        money::ensure_positive,
    },
    entities::{Expense, expense},
    errors::Result,
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{info, warn};

const BUDGET_DESCRIPTION: &str = "Transit budget";
const DAILY_FARE_DESCRIPTION: &str = "Daily fare";

/// State of the transit allowance for a month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitStatus {
    /// The allowance, zero when none was set
    pub budget: Decimal,
    /// Sum of daily fares
    pub spent: Decimal,
    /// Allowance minus fares, negative when overdrawn
    pub remaining: Decimal,
    /// Id of the expense row holding the allowance
    pub budget_expense_id: Option<i64>,
    /// Number of daily fares recorded
    pub fare_count: usize,
}

/// Computes the transit status from a month's expenses.
///
/// Expects expenses newest first (as returned by
/// [`crate::core::expense::get_expenses_for_month`]); if several allowance
/// rows exist the newest one wins.
#[must_use]
pub fn transit_status(expenses: &[expense::Model]) -> TransitStatus {
    let budget_row = expenses
        .iter()
        .find(|e| Category::parse(&e.category) == Category::TransportBudget);
    let fares = daily_fares(expenses);

    let budget = budget_row.map_or(Decimal::ZERO, |e| e.amount);
    let spent: Decimal = fares.iter().map(|e| e.amount).sum();

    TransitStatus {
        budget,
        spent,
        remaining: budget - spent,
        budget_expense_id: budget_row.map(|e| e.id),
        fare_count: fares.len(),
    }
}

/// Daily fares among a month's expenses, in the order given.
#[must_use]
pub fn daily_fares(expenses: &[expense::Model]) -> Vec<&expense::Model> {
    expenses
        .iter()
        .filter(|e| Category::parse(&e.category) == Category::TransportDaily)
        .collect()
}

/// Sets the month's transit allowance.
///
/// Updates the existing allowance row in place, removing any duplicates, or
/// inserts one when none exists. Runs in a single database transaction so the
/// allowance is never missing, even briefly.
///
/// # Errors
/// Returns [`crate::errors::Error::InvalidAmount`] for a non-positive amount
/// and [`crate::errors::Error::MonthNotFound`] for a missing month.
pub async fn set_transit_budget(
    db: &DatabaseConnection,
    month_id: i64,
    amount: Decimal,
) -> Result<expense::Model> {
    ensure_positive(amount)?;

    let txn = db.begin().await?;

    let mut existing = Expense::find()
        .filter(expense::Column::MonthId.eq(month_id))
        .filter(expense::Column::Category.eq(TRANSPORT_BUDGET_ID))
        .order_by_desc(expense::Column::CreatedAt)
        .order_by_desc(expense::Column::Id)
        .all(&txn)
        .await?
        .into_iter();

    let budget = if let Some(current) = existing.next() {
        for duplicate in existing {
            warn!(
                "Removing duplicate transit budget {} in month {month_id}",
                duplicate.id
            );
            duplicate.delete(&txn).await?;
        }
        let mut active_model: expense::ActiveModel = current.into();
        active_model.amount = Set(amount);
        active_model.update(&txn).await?
    } else {
        insert_expense(
            &txn,
            month_id,
            BUDGET_DESCRIPTION,
            amount,
            &Category::TransportBudget,
        )
        .await?
    };

    txn.commit().await?;

    info!("Transit budget for month {month_id} set to {amount}");
    Ok(budget)
}

/// Records a daily fare against the transit allowance.
///
/// # Errors
/// Returns [`crate::errors::Error::InvalidAmount`] for a non-positive amount
/// and [`crate::errors::Error::MonthNotFound`] for a missing month.
pub async fn record_daily_fare(
    db: &DatabaseConnection,
    month_id: i64,
    amount: Decimal,
) -> Result<expense::Model> {
    let fare = insert_expense(
        db,
        month_id,
        DAILY_FARE_DESCRIPTION,
        amount,
        &Category::TransportDaily,
    )
    .await?;
    info!("Recorded daily fare {} of {amount}", fare.id);
    Ok(fare)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::expense::get_expenses_for_month;
    use crate::errors::Error;
    use crate::test_utils::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_status_without_budget() -> Result<()> {
        let (db, month) = setup_with_month().await?;
        record_daily_fare(&db, month.id, dec!(2900)).await?;

        let status = transit_status(&get_expenses_for_month(&db, month.id).await?);
        assert_eq!(status.budget, dec!(0));
        assert_eq!(status.spent, dec!(2900));
        assert_eq!(status.remaining, dec!(-2900));
        assert!(status.budget_expense_id.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_budget_minus_fares() -> Result<()> {
        let (db, month) = setup_with_month().await?;
        let budget = set_transit_budget(&db, month.id, dec!(100000)).await?;
        record_daily_fare(&db, month.id, dec!(5800)).await?;
        record_daily_fare(&db, month.id, dec!(2900)).await?;
        create_test_expense(&db, month.id, dec!(40000), "transporte").await?;

        let status = transit_status(&get_expenses_for_month(&db, month.id).await?);
        assert_eq!(status.budget, dec!(100000));
        assert_eq!(status.spent, dec!(8700));
        assert_eq!(status.remaining, dec!(91300));
        assert_eq!(status.budget_expense_id, Some(budget.id));
        assert_eq!(status.fare_count, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_daily_fares_newest_first() -> Result<()> {
        let (db, month) = setup_with_month().await?;
        set_transit_budget(&db, month.id, dec!(100000)).await?;
        let first = record_daily_fare(&db, month.id, dec!(2900)).await?;
        create_test_expense(&db, month.id, dec!(15000), "comida").await?;
        let second = record_daily_fare(&db, month.id, dec!(3100)).await?;

        let expenses = get_expenses_for_month(&db, month.id).await?;
        let ids: Vec<i64> = daily_fares(&expenses).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
        Ok(())
    }

    #[tokio::test]
    async fn test_status_matches_stored_budget_ids_exactly() -> Result<()> {
        let (db, month) = setup_with_month().await?;
        create_test_expense(&db, month.id, dec!(500), "Transport_Budget").await?;
        let budget = set_transit_budget(&db, month.id, dec!(100000)).await?;

        let expenses = get_expenses_for_month(&db, month.id).await?;
        assert_eq!(expenses.len(), 2);
        let status = transit_status(&expenses);
        assert_eq!(status.budget, dec!(100000));
        assert_eq!(status.budget_expense_id, Some(budget.id));
        Ok(())
    }

    #[tokio::test]
    async fn test_set_budget_updates_in_place() -> Result<()> {
        let (db, month) = setup_with_month().await?;
        let first = set_transit_budget(&db, month.id, dec!(100000)).await?;
        let second = set_transit_budget(&db, month.id, dec!(120000)).await?;

        assert_eq!(first.id, second.id);
        assert_eq!(second.amount, dec!(120000));

        let budgets = Expense::find()
            .filter(expense::Column::Category.eq(TRANSPORT_BUDGET_ID))
            .count(&db)
            .await?;
        assert_eq!(budgets, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_set_budget_collapses_duplicates() -> Result<()> {
        let (db, month) = setup_with_month().await?;
        create_test_expense(&db, month.id, dec!(10), "transport_budget").await?;
        create_test_expense(&db, month.id, dec!(20), "transport_budget").await?;

        set_transit_budget(&db, month.id, dec!(30)).await?;

        let expenses = get_expenses_for_month(&db, month.id).await?;
        assert_eq!(expenses.len(), 1);
        assert_eq!(transit_status(&expenses).budget, dec!(30));
        Ok(())
    }

    #[tokio::test]
    async fn test_set_budget_is_scoped_to_month() -> Result<()> {
        let (db, month) = setup_with_month().await?;
        set_transit_budget(&db, month.id, dec!(50)).await?;

        let next = crate::core::month::start_month(&db, dec!(1000)).await?;
        set_transit_budget(&db, next.id, dec!(70)).await?;

        let old = transit_status(&get_expenses_for_month(&db, month.id).await?);
        let new = transit_status(&get_expenses_for_month(&db, next.id).await?);
        assert_eq!(old.budget, dec!(50));
        assert_eq!(new.budget, dec!(70));
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_amounts_are_rejected() -> Result<()> {
        let (db, month) = setup_with_month().await?;
        assert!(matches!(
            set_transit_budget(&db, month.id, dec!(0)).await,
            Err(Error::InvalidAmount { .. })
        ));
        assert!(matches!(
            record_daily_fare(&db, month.id, dec!(-1)).await,
            Err(Error::InvalidAmount { .. })
        ));
        assert!(matches!(
            set_transit_budget(&db, 777, dec!(10)).await,
            Err(Error::MonthNotFound { id: 777 })
        ));
        Ok(())
    }
}
