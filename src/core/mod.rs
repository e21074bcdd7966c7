//! Core business logic - framework-agnostic ledger operations.
//!
//! Persistence helpers take a `SeaORM` connection; the aggregation, advice,
//! transit and debt-progress calculations are pure functions over models.

/// Advisory messages derived from a ledger summary
pub mod advice;
/// Closed set of expense categories
pub mod category;
/// Debts and their payment history
pub mod debt;
/// Expense records
pub mod expense;
/// Month-end report documents and spreadsheets
pub mod export;
/// Income records
pub mod income;
/// Monthly Ledger Aggregator
pub mod ledger;
/// Amount parsing and display
pub mod money;
/// Month lifecycle
pub mod month;
/// Transit sub-budget
pub mod transit;
