//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

use crate::{bot::BotData, errors::Error};

/// Debt tracking commands
pub mod debt;

/// Expense commands
pub mod expense;

/// General utility commands
pub mod general;

/// Extra income commands
pub mod income;

/// Month lifecycle, dashboard and export commands
pub mod month;

/// Transit sub-budget commands
pub mod transit;

// Export commands
pub use debt::*;
pub use expense::*;
pub use general::*;
pub use income::*;
pub use month::*;
pub use transit::*;

/// Every command the bot registers.
#[must_use]
pub fn all() -> Vec<poise::Command<BotData, Error>> {
    vec![
        general::ping(),
        general::help(),
        month::start_month(),
        month::end_month(),
        month::status(),
        month::summary(),
        month::export(),
        month::close_month(),
        month::history(),
        expense::expense(),
        expense::expenses(),
        expense::delete_expense(),
        income::income(),
        income::incomes(),
        income::delete_income(),
        transit::transit(),
        transit::transit_budget(),
        transit::fare(),
        debt::debt(),
    ]
}
