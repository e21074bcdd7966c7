//! Unified error type for the ledger.
//!
//! Every layer (core, cache, config, bot) returns [`Result`]. Validation
//! failures are ordinary variants so the bot can turn them into a friendly
//! reply instead of a command failure.

use rust_decimal::Decimal;
use thiserror::Error;

/// All errors that can occur in Mesada.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// A user-entered amount was zero, negative or not a number
    #[error("Invalid amount: {amount} (must be greater than zero)")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// User input failed validation (empty description, unparseable text, ...)
    #[error("Invalid input: {message}")]
    Validation {
        /// Human-readable reason
        message: String,
    },

    /// No month with the given id exists
    #[error("Month {id} not found")]
    MonthNotFound {
        /// Month id that was looked up
        id: i64,
    },

    /// An operation needed the active month but none is open
    #[error("No active month. Start one with /start_month")]
    NoActiveMonth,

    /// No expense with the given id exists
    #[error("Expense {id} not found")]
    ExpenseNotFound {
        /// Expense id that was looked up
        id: i64,
    },

    /// No income with the given id exists
    #[error("Income {id} not found")]
    IncomeNotFound {
        /// Income id that was looked up
        id: i64,
    },

    /// No debt with the given id exists
    #[error("Debt {id} not found")]
    DebtNotFound {
        /// Debt id that was looked up
        id: i64,
    },

    /// Error returned by the table store
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// CSV export failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Required environment variable missing
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Writing into a `String` failed
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Serenity/Poise framework error
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

impl Error {
    /// Whether this error comes from bad user input rather than a failure
    /// of the store or the framework.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount { .. }
                | Self::Validation { .. }
                | Self::NoActiveMonth
                | Self::MonthNotFound { .. }
                | Self::ExpenseNotFound { .. }
                | Self::IncomeNotFound { .. }
                | Self::DebtNotFound { .. }
        )
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_invalid_amount_is_user_error() {
        let err = Error::InvalidAmount { amount: dec!(0) };
        assert!(err.is_user_error());
        assert_eq!(
            err.to_string(),
            "Invalid amount: 0 (must be greater than zero)"
        );
    }

    #[test]
    fn test_database_error_is_not_user_error() {
        let err = Error::from(sea_orm::DbErr::Custom("boom".to_string()));
        assert!(!err.is_user_error());
        assert!(err.to_string().contains("boom"));
    }
}
