//! Month lifecycle business logic
//!
//! Handles opening and closing accounting periods. Only one month may be
//! active at a time: starting a month closes whatever is open in the same
//! database transaction, so a failure can never leave two active months or
//! none where there was one.

use crate::{
    core::money::ensure_positive,
    entities::{Month, month},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*, sea_query::Expr};
use tracing::info;

/// Retrieves the currently active month, if any.
pub async fn get_active_month<C>(db: &C) -> Result<Option<month::Model>>
where
    C: ConnectionTrait,
{
    Month::find()
        .filter(month::Column::IsActive.eq(true))
        .order_by_desc(month::Column::StartedAt)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the active month or fails with [`Error::NoActiveMonth`].
pub async fn require_active_month(db: &DatabaseConnection) -> Result<month::Model> {
    get_active_month(db).await?.ok_or(Error::NoActiveMonth)
}

/// Finds a month by its unique ID.
pub async fn get_month_by_id(db: &DatabaseConnection, month_id: i64) -> Result<Option<month::Model>> {
    Month::find_by_id(month_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists every month, newest first.
pub async fn list_months(db: &DatabaseConnection) -> Result<Vec<month::Model>> {
    Month::find()
        .order_by_desc(month::Column::StartedAt)
        .order_by_desc(month::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Closes every active month. Returns how many were closed.
async fn close_active_months<C>(db: &C) -> Result<u64>
where
    C: ConnectionTrait,
{
    let result = Month::update_many()
        .col_expr(month::Column::IsActive, Expr::value(false))
        .col_expr(month::Column::EndedAt, Expr::value(Some(Utc::now())))
        .filter(month::Column::IsActive.eq(true))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Starts a new month with the given salary.
///
/// Any month still active is closed first. Both steps run in one database
/// transaction.
///
/// # Errors
/// Returns [`Error::InvalidAmount`] if `salary` is not positive.
pub async fn start_month(db: &DatabaseConnection, salary: Decimal) -> Result<month::Model> {
    ensure_positive(salary)?;

    let txn = db.begin().await?;

    let closed = close_active_months(&txn).await?;
    if closed > 0 {
        info!("Closed {closed} active month(s) before starting a new one");
    }

    let new_month = month::ActiveModel {
        salary: Set(salary),
        is_active: Set(true),
        started_at: Set(Utc::now()),
        ended_at: Set(None),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    info!("Started month {} with salary {}", new_month.id, new_month.salary);
    Ok(new_month)
}

/// Ends a month, marking it inactive and stamping `ended_at`.
///
/// Ending an already closed month keeps its original `ended_at`.
///
/// # Errors
/// Returns [`Error::MonthNotFound`] if no month has this id.
pub async fn end_month(db: &DatabaseConnection, month_id: i64) -> Result<month::Model> {
    let existing = get_month_by_id(db, month_id)
        .await?
        .ok_or(Error::MonthNotFound { id: month_id })?;

    if !existing.is_active {
        return Ok(existing);
    }

    let mut active_model: month::ActiveModel = existing.into();
    active_model.is_active = Set(false);
    active_model.ended_at = Set(Some(Utc::now()));
    let closed = active_model.update(db).await?;

    info!("Ended month {month_id}");
    Ok(closed)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_no_active_month_initially() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(get_active_month(&db).await?.is_none());
        assert!(matches!(
            require_active_month(&db).await,
            Err(Error::NoActiveMonth)
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_start_month() -> Result<()> {
        let db = setup_test_db().await?;

        let month = start_month(&db, dec!(1500000)).await?;
        assert!(month.is_active);
        assert!(month.ended_at.is_none());
        assert_eq!(month.salary, dec!(1500000));

        let active = get_active_month(&db).await?.unwrap();
        assert_eq!(active.id, month.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_start_month_rejects_non_positive_salary() -> Result<()> {
        let db = setup_test_db().await?;

        let result = start_month(&db, dec!(0)).await;
        assert!(matches!(result, Err(Error::InvalidAmount { .. })));

        let result = start_month(&db, dec!(-10)).await;
        assert!(matches!(result, Err(Error::InvalidAmount { .. })));

        assert!(list_months(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_starting_a_month_closes_the_previous_one() -> Result<()> {
        let db = setup_test_db().await?;

        let first = start_month(&db, dec!(1000)).await?;
        let second = start_month(&db, dec!(2000)).await?;

        let first = get_month_by_id(&db, first.id).await?.unwrap();
        assert!(!first.is_active);
        assert!(first.ended_at.is_some());

        let active_count = Month::find()
            .filter(month::Column::IsActive.eq(true))
            .count(&db)
            .await?;
        assert_eq!(active_count, 1);
        assert_eq!(get_active_month(&db).await?.unwrap().id, second.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_end_month() -> Result<()> {
        let db = setup_test_db().await?;
        let month = start_month(&db, dec!(1000)).await?;

        let closed = end_month(&db, month.id).await?;
        assert!(!closed.is_active);
        assert!(closed.ended_at.is_some());
        assert!(get_active_month(&db).await?.is_none());

        // Ending twice keeps the first timestamp
        let again = end_month(&db, month.id).await?;
        assert_eq!(again.ended_at, closed.ended_at);
        Ok(())
    }

    #[tokio::test]
    async fn test_end_missing_month() -> Result<()> {
        let db = setup_test_db().await?;
        let result = end_month(&db, 42).await;
        assert!(matches!(result, Err(Error::MonthNotFound { id: 42 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_list_months_newest_first() -> Result<()> {
        let db = setup_test_db().await?;
        let first = start_month(&db, dec!(1000)).await?;
        let second = start_month(&db, dec!(2000)).await?;

        let months = list_months(&db).await?;
        assert_eq!(months.len(), 2);
        assert_eq!(months[0].id, second.id);
        assert_eq!(months[1].id, first.id);
        Ok(())
    }
}
