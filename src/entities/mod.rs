//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the five collections of the ledger store and
//! their relationships. Each entity has a Model struct for data and an Entity
//! struct for operations.

pub mod debt;
pub mod debt_payment;
pub mod expense;
pub mod income;
pub mod month;

// Re-export specific types to avoid conflicts
pub use debt::{Column as DebtColumn, Entity as Debt, Model as DebtModel};
pub use debt_payment::{
    Column as DebtPaymentColumn, Entity as DebtPayment, Model as DebtPaymentModel,
};
pub use expense::{Column as ExpenseColumn, Entity as Expense, Model as ExpenseModel};
pub use income::{Column as IncomeColumn, Entity as Income, Model as IncomeModel};
pub use month::{Column as MonthColumn, Entity as Month, Model as MonthModel};
