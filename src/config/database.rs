//! Database configuration module for Mesada.
//!
//! This module handles the table store connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust
//! models. Parents are created before children so foreign keys resolve.

use crate::entities::{Debt, DebtPayment, Expense, Income, Month};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{debug, info};

const DEFAULT_DATABASE_URL: &str = "sqlite://mesada.sqlite?mode=rwc";

/// Gets the database URL from environment variable or returns default `SQLite` path.
///
/// This function looks for `DATABASE_URL` in the environment and falls back to
/// a default local `SQLite` file if not found.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the table store named by `DATABASE_URL`.
///
/// Falls back to a default local `SQLite` file if no environment variable is set.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    info!("Connecting to database at {database_url}");
    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates all ledger tables if they do not exist yet.
///
/// Uses `IF NOT EXISTS` so it is safe to call on every start.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut statements = vec![
        schema.create_table_from_entity(Month),
        schema.create_table_from_entity(Expense),
        schema.create_table_from_entity(Income),
        schema.create_table_from_entity(Debt),
        schema.create_table_from_entity(DebtPayment),
    ];

    for statement in &mut statements {
        statement.if_not_exists();
        db.execute(builder.build(&*statement)).await?;
    }

    debug!("Created {} tables", statements.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        debt::Model as DebtModel, debt_payment::Model as DebtPaymentModel,
        expense::Model as ExpenseModel, income::Model as IncomeModel, month::Model as MonthModel,
    };
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<MonthModel> = Month::find().limit(1).all(&db).await?;
        let _: Vec<ExpenseModel> = Expense::find().limit(1).all(&db).await?;
        let _: Vec<IncomeModel> = Income::find().limit(1).all(&db).await?;
        let _: Vec<DebtModel> = Debt::find().limit(1).all(&db).await?;
        let _: Vec<DebtPaymentModel> = DebtPayment::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;

        let _: Vec<MonthModel> = Month::find().limit(1).all(&db).await?;
        Ok(())
    }
}
