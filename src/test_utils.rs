//! Shared test utilities for Mesada.
//!
//! This module provides helpers for setting up in-memory test databases and
//! creating test records with sensible defaults.

use crate::{
    core::{category::Category, expense, income, month},
    entities,
    errors::Result,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

/// Routes `tracing` output to the test harness. Safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all database tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Sets up a database with one active month.
/// Returns (db, month) for common test scenarios.
///
/// # Defaults
/// * salary: 1.000.000
pub async fn setup_with_month() -> Result<(DatabaseConnection, entities::month::Model)> {
    let db = setup_test_db().await?;
    let month = month::start_month(&db, dec!(1000000)).await?;
    Ok((db, month))
}

/// Creates a test expense with the given category id.
///
/// Unlike the bot commands this accepts reserved and unknown category ids, so
/// transit rows and legacy data can be set up directly.
///
/// # Defaults
/// * `description`: `"Test expense"`
pub async fn create_test_expense(
    db: &DatabaseConnection,
    month_id: i64,
    amount: Decimal,
    category: &str,
) -> Result<entities::expense::Model> {
    expense::insert_expense(
        db,
        month_id,
        "Test expense",
        amount,
        &Category::parse(category),
    )
    .await
}

/// Creates a test income.
///
/// # Defaults
/// * `description`: `"Test income"`
pub async fn create_test_income(
    db: &DatabaseConnection,
    month_id: i64,
    amount: Decimal,
) -> Result<entities::income::Model> {
    income::create_income(db, month_id, "Test income", amount).await
}
