//! Monthly Ledger Aggregator.
//!
//! Derives the month's totals from salary, expenses and incomes. Daily transit
//! fares are tracked by the transit sub-budget and never count against the
//! main balance; the transit allowance itself does.

use crate::{
    core::category::Category,
    entities::{expense, income},
};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Spend for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    /// The category (all unknown ids share one bucket)
    pub category: Category,
    /// Sum of matching expense amounts
    pub amount: Decimal,
}

/// Derived figures for a month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerSummary {
    /// Base salary of the month
    pub salary: Decimal,
    /// Sum of expenses, excluding daily transit fares
    pub total_spent: Decimal,
    /// Sum of extra incomes
    pub total_income: Decimal,
    /// Salary plus extra incomes
    pub total_available: Decimal,
    /// Available minus spent, negative when overspent
    pub remaining: Decimal,
    /// Spent as a percentage of available; may exceed 100
    pub percent_spent: Decimal,
    /// Remaining as a percentage of available
    pub savings_rate: Decimal,
    /// Non-zero category totals in display order
    pub by_category: Vec<CategoryTotal>,
    /// Number of expenses counted in `total_spent`
    pub expense_count: usize,
}

impl LedgerSummary {
    /// Whether spending exceeded what was available.
    #[must_use]
    pub fn is_overspent(&self) -> bool {
        self.remaining < Decimal::ZERO
    }

    /// The category with the largest spend, first in display order on ties.
    #[must_use]
    pub fn top_category(&self) -> Option<&CategoryTotal> {
        self.by_category
            .iter()
            .rev()
            .max_by_key(|total| total.amount)
    }
}

/// Whether an expense counts against the main balance.
#[must_use]
pub fn counts_against_balance(expense: &expense::Model) -> bool {
    Category::parse(&expense.category) != Category::TransportDaily
}

/// `part / whole * 100`, or zero when `whole` is not positive.
#[must_use]
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    part / whole * Decimal::ONE_HUNDRED
}

/// Computes the month's totals.
#[must_use]
pub fn summarize(
    salary: Decimal,
    expenses: &[expense::Model],
    incomes: &[income::Model],
) -> LedgerSummary {
    let counted: Vec<&expense::Model> = expenses
        .iter()
        .filter(|e| counts_against_balance(e))
        .collect();

    let total_spent: Decimal = counted.iter().map(|e| e.amount).sum();
    let total_income: Decimal = incomes.iter().map(|i| i.amount).sum();
    let total_available = salary + total_income;
    let remaining = total_available - total_spent;

    LedgerSummary {
        salary,
        total_spent,
        total_income,
        total_available,
        remaining,
        percent_spent: percent_of(total_spent, total_available),
        savings_rate: percent_of(remaining, total_available),
        by_category: category_breakdown(&counted),
        expense_count: counted.len(),
    }
}

fn category_breakdown(expenses: &[&expense::Model]) -> Vec<CategoryTotal> {
    let mut totals: BTreeMap<usize, CategoryTotal> = BTreeMap::new();

    for exp in expenses {
        let category = match Category::parse(&exp.category) {
            Category::Unknown(_) => Category::Unknown("unknown".to_string()),
            known => known,
        };
        totals
            .entry(category.display_rank())
            .or_insert_with(|| CategoryTotal {
                category,
                amount: Decimal::ZERO,
            })
            .amount += exp.amount;
    }

    totals
        .into_values()
        .filter(|total| !total.amount.is_zero())
        .collect()
}
