//! Debt business logic - debts and their payment history.
//!
//! A debt's remaining balance is its total minus the sum of its payments.
//! Adding a payment that brings the remaining balance to zero or below marks
//! the debt paid in the same database transaction as the insert.

use crate::{
    core::{expense::validate_description, money::ensure_positive},
    entities::{Debt, DebtPayment, debt, debt_payment},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::info;

/// Amortization progress of a debt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebtProgress {
    /// Full amount owed
    pub total: Decimal,
    /// Sum of payments
    pub paid: Decimal,
    /// Total minus paid, zero or negative once settled
    pub remaining: Decimal,
    /// Paid as a percentage of total, capped at 100
    pub progress_percent: Decimal,
}

impl DebtProgress {
    /// Whether the payments cover the debt.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.remaining <= Decimal::ZERO
    }
}

/// Result of recording a payment.
#[derive(Debug, Clone)]
pub struct PaymentOutcome {
    /// The stored payment
    pub payment: debt_payment::Model,
    /// Progress after the payment
    pub progress: DebtProgress,
    /// True when this payment settled the debt
    pub newly_paid: bool,
}

/// Computes progress from a debt total and its payments.
#[must_use]
pub fn debt_progress(total: Decimal, payments: &[debt_payment::Model]) -> DebtProgress {
    let paid: Decimal = payments.iter().map(|p| p.amount).sum();
    let progress_percent = if total > Decimal::ZERO {
        (paid / total * Decimal::ONE_HUNDRED).min(Decimal::ONE_HUNDRED)
    } else {
        Decimal::ZERO
    };

    DebtProgress {
        total,
        paid,
        remaining: total - paid,
        progress_percent,
    }
}

/// Splits debts into (active, paid), keeping their order.
#[must_use]
pub fn partition_debts(debts: Vec<debt::Model>) -> (Vec<debt::Model>, Vec<debt::Model>) {
    debts.into_iter().partition(|d| !d.is_paid)
}

/// Records a new debt.
///
/// # Errors
/// [`Error::Validation`] for a blank description and [`Error::InvalidAmount`]
/// for a non-positive total.
pub async fn create_debt(
    db: &DatabaseConnection,
    description: &str,
    total_amount: Decimal,
) -> Result<debt::Model> {
    let description = validate_description(description)?;
    ensure_positive(total_amount)?;

    let model = debt::ActiveModel {
        description: Set(description),
        total_amount: Set(total_amount),
        is_paid: Set(false),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Recorded debt {} of {}", model.id, model.total_amount);
    Ok(model)
}

/// Retrieves every debt, newest first.
pub async fn get_all_debts<C>(db: &C) -> Result<Vec<debt::Model>>
where
    C: ConnectionTrait,
{
    Debt::find()
        .order_by_desc(debt::Column::CreatedAt)
        .order_by_desc(debt::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a debt by its unique ID.
pub async fn get_debt_by_id<C>(db: &C, debt_id: i64) -> Result<Option<debt::Model>>
where
    C: ConnectionTrait,
{
    Debt::find_by_id(debt_id).one(db).await.map_err(Into::into)
}

/// Retrieves the payments of a debt, most recent date first.
pub async fn get_payments_for_debt<C>(db: &C, debt_id: i64) -> Result<Vec<debt_payment::Model>>
where
    C: ConnectionTrait,
{
    DebtPayment::find()
        .filter(debt_payment::Column::DebtId.eq(debt_id))
        .order_by_desc(debt_payment::Column::Date)
        .order_by_desc(debt_payment::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Sets the paid flag of a debt explicitly.
///
/// # Errors
/// Returns [`Error::DebtNotFound`] if the debt does not exist.
pub async fn set_debt_paid<C>(db: &C, debt_id: i64, is_paid: bool) -> Result<debt::Model>
where
    C: ConnectionTrait,
{
    let existing = get_debt_by_id(db, debt_id)
        .await?
        .ok_or(Error::DebtNotFound { id: debt_id })?;

    let mut active_model: debt::ActiveModel = existing.into();
    active_model.is_paid = Set(is_paid);
    let updated = active_model.update(db).await?;

    info!("Debt {debt_id} marked as {}", if is_paid { "paid" } else { "unpaid" });
    Ok(updated)
}

/// Records a payment against a debt, dated now.
///
/// When the payment brings the remaining balance to zero or below, the debt is
/// marked paid in the same transaction.
///
/// # Errors
/// [`Error::InvalidAmount`] for a non-positive amount and
/// [`Error::DebtNotFound`] for a missing debt.
pub async fn add_payment(
    db: &DatabaseConnection,
    debt_id: i64,
    amount: Decimal,
) -> Result<PaymentOutcome> {
    ensure_positive(amount)?;

    let txn = db.begin().await?;

    let debt = get_debt_by_id(&txn, debt_id)
        .await?
        .ok_or(Error::DebtNotFound { id: debt_id })?;

    let now = Utc::now();
    let payment = debt_payment::ActiveModel {
        debt_id: Set(debt_id),
        amount: Set(amount),
        date: Set(now),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let payments = get_payments_for_debt(&txn, debt_id).await?;
    let progress = debt_progress(debt.total_amount, &payments);

    let newly_paid = progress.is_settled() && !debt.is_paid;
    if newly_paid {
        set_debt_paid(&txn, debt_id, true).await?;
    }

    txn.commit().await?;

    info!(
        "Payment {} of {amount} on debt {debt_id}; remaining {}",
        payment.id, progress.remaining
    );
    Ok(PaymentOutcome {
        payment,
        progress,
        newly_paid,
    })
}
