//! Advisory messages for the dashboard.
//!
//! Rules are evaluated in a fixed order and the result is truncated to
//! `max_tips`:
//!
//! 1. overspent, else near the limit, else doing well (needs one expense)
//! 2. a single category above `top_category_share` percent of salary
//! 3. no expenses yet

use crate::core::{
    category::Category,
    ledger::{LedgerSummary, percent_of},
    money::format_money,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

/// Tunable limits for the advice rules.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AdviceThresholds {
    /// Percent spent above which a caution is shown
    pub caution_percent: Decimal,
    /// Percent spent below which praise is shown
    pub praise_percent: Decimal,
    /// Percent of salary a single category may take before a tip is shown
    pub top_category_share: Decimal,
    /// Maximum number of messages returned
    pub max_tips: usize,
}

impl Default for AdviceThresholds {
    fn default() -> Self {
        Self {
            caution_percent: dec!(80),
            praise_percent: dec!(30),
            top_category_share: dec!(30),
            max_tips: 3,
        }
    }
}

/// How a message should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Something needs attention
    Warning,
    /// Positive reinforcement
    Success,
    /// Neutral tip
    Info,
}

/// One advisory message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advice {
    /// Spending exceeded the available money
    Overspent {
        /// How far below zero the balance is
        deficit: Decimal,
    },
    /// Spending passed the caution threshold
    NearLimit {
        /// Percent of available money spent
        percent_spent: Decimal,
    },
    /// Spending is comfortably low
    OnTrack,
    /// One category takes a large share of salary
    TopCategory {
        /// The category
        category: Category,
        /// Amount spent in it
        amount: Decimal,
    },
    /// Nothing recorded yet
    FirstExpense,
}

impl Advice {
    /// The text shown to the user.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Overspent { deficit } => format!(
                "You are {} over budget. Try not to spend anything else this month 💪",
                format_money(*deficit)
            ),
            Self::NearLimit { percent_spent } => format!(
                "You've already spent {}% of your money. Careful with new expenses! 🙀",
                percent_spent.round()
            ),
            Self::OnTrack => "You're doing great! Excellent control of your spending 🌟".to_string(),
            Self::TopCategory { category, amount } => format!(
                "{} is your biggest expense ({}). Can you cut it down?",
                category.label(),
                format_money(*amount)
            ),
            Self::FirstExpense => {
                "Add your first expense to get personalised tips! 📝".to_string()
            }
        }
    }

    /// Presentation tone of the message.
    #[must_use]
    pub const fn tone(&self) -> Tone {
        match self {
            Self::Overspent { .. } | Self::NearLimit { .. } => Tone::Warning,
            Self::OnTrack => Tone::Success,
            Self::TopCategory { .. } | Self::FirstExpense => Tone::Info,
        }
    }
}

/// Generates the ordered, truncated advice list for a month.
#[must_use]
pub fn advise(summary: &LedgerSummary, thresholds: &AdviceThresholds) -> Vec<Advice> {
    let mut tips = Vec::new();
    let has_expenses = summary.expense_count > 0;

    if summary.is_overspent() {
        tips.push(Advice::Overspent {
            deficit: -summary.remaining,
        });
    } else if summary.percent_spent > thresholds.caution_percent {
        tips.push(Advice::NearLimit {
            percent_spent: summary.percent_spent,
        });
    } else if summary.percent_spent < thresholds.praise_percent && has_expenses {
        tips.push(Advice::OnTrack);
    }

    if let Some(top) = summary.top_category() {
        let share = percent_of(top.amount, summary.salary);
        if summary.salary > Decimal::ZERO && share > thresholds.top_category_share {
            tips.push(Advice::TopCategory {
                category: top.category.clone(),
                amount: top.amount,
            });
        }
    }

    if !has_expenses {
        tips.push(Advice::FirstExpense);
    }

    tips.truncate(thresholds.max_tips);
    tips
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::ledger::summarize;
    use crate::entities::expense;
    use chrono::Utc;

    fn expense(amount: Decimal, category: &str) -> expense::Model {
        expense::Model {
            id: 1,
            month_id: 1,
            description: "test".to_string(),
            amount,
            category: category.to_string(),
            created_at: Utc::now(),
        }
    }

    fn advise_default(salary: Decimal, expenses: &[expense::Model]) -> Vec<Advice> {
        advise(&summarize(salary, expenses, &[]), &AdviceThresholds::default())
    }

    #[test]
    fn test_no_expenses_gives_only_first_expense_tip() {
        let tips = advise_default(dec!(500000), &[]);
        assert_eq!(tips, vec![Advice::FirstExpense]);
    }

    #[test]
    fn test_overspent_and_top_category() {
        let tips = advise_default(dec!(100000), &[expense(dec!(150000), "comida")]);
        assert_eq!(
            tips,
            vec![
                Advice::Overspent {
                    deficit: dec!(50000)
                },
                Advice::TopCategory {
                    category: Category::Food,
                    amount: dec!(150000),
                },
            ]
        );
        assert_eq!(tips[0].tone(), Tone::Warning);
        assert!(tips[0].message().contains("$ 50.000"));
    }

    #[test]
    fn test_near_limit() {
        let tips = advise_default(
            dec!(100000),
            &[
                expense(dec!(25000), "comida"),
                expense(dec!(25000), "hogar"),
                expense(dec!(25000), "salud"),
                expense(dec!(10000), "otros"),
            ],
        );
        assert_eq!(
            tips,
            vec![Advice::NearLimit {
                percent_spent: dec!(85)
            }]
        );
        assert!(tips[0].message().contains("85%"));
    }

    #[test]
    fn test_on_track_when_spending_is_low() {
        let tips = advise_default(dec!(1000000), &[expense(dec!(200000), "comida")]);
        assert_eq!(tips, vec![Advice::OnTrack]);
        assert_eq!(tips[0].tone(), Tone::Success);
    }

    #[test]
    fn test_middle_band_gives_no_balance_message() {
        let tips = advise_default(
            dec!(1000),
            &[expense(dec!(250), "comida"), expense(dec!(250), "hogar")],
        );
        assert!(tips.is_empty());
    }

    #[test]
    fn test_daily_fares_do_not_count_as_expenses() {
        let tips = advise_default(dec!(1000), &[expense(dec!(900), "transport_daily")]);
        assert_eq!(tips, vec![Advice::FirstExpense]);
    }

    #[test]
    fn test_truncates_to_max_tips() {
        let thresholds = AdviceThresholds {
            max_tips: 1,
            ..AdviceThresholds::default()
        };
        let summary = summarize(dec!(100), &[expense(dec!(150), "comida")], &[]);
        let tips = advise(&summary, &thresholds);
        assert_eq!(tips.len(), 1);
        assert!(matches!(tips[0], Advice::Overspent { .. }));
    }

    #[test]
    fn test_zero_salary_skips_category_tip() {
        let tips = advise_default(dec!(0), &[expense(dec!(10), "comida")]);
        assert_eq!(tips, vec![Advice::Overspent { deficit: dec!(10) }]);
    }
}
