//! Text rendering shared by the commands.
//!
//! Pure functions from ledger values to the strings placed in embeds, kept
//! apart from the command handlers so they can be tested without Discord.

use crate::{
    bot::tone_style,
    core::{
        advice::Advice,
        category::Category,
        debt::DebtProgress,
        ledger::{LedgerSummary, percent_of},
        money::{format_money, format_percent, format_progress_bar},
        transit::TransitStatus,
    },
    entities::{debt, debt_payment, expense, income, month},
    errors::Result,
};
use rust_decimal::Decimal;
use std::fmt::Write;

/// Longest list shown in one embed before the rest is summarised
pub const MAX_LIST_LINES: usize = 20;
/// Discord's character limit for an embed field value
pub const FIELD_LIMIT: usize = 1024;
/// Discord's character limit for an embed description
pub const DESCRIPTION_LIMIT: usize = 4096;

/// Headline of the status dashboard: remaining money and the spend bar.
pub fn status_description(summary: &LedgerSummary) -> Result<String> {
    let mut text = String::new();
    if summary.is_overspent() {
        writeln!(text, "**Over budget by {}**", format_money(-summary.remaining))?;
    } else {
        writeln!(text, "**Remaining:** {}", format_money(summary.remaining))?;
    }
    writeln!(
        text,
        "**Spent:** {}",
        format_progress_bar(summary.percent_spent, None)
    )?;
    Ok(text)
}

/// One line per tip, prefixed with the tone emoji.
#[must_use]
pub fn advice_text(tips: &[Advice]) -> String {
    tips.iter()
        .map(|tip| format!("{} {}", tone_style(tip.tone()).1, tip.message()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Transit allowance with the fares drawn from it.
#[must_use]
pub fn transit_text(transit: &TransitStatus) -> String {
    let used = percent_of(transit.spent, transit.budget);
    format!(
        "Budget: {}\nFares: {} ({} recorded)\nLeft: {}\n{}",
        format_money(transit.budget),
        format_money(transit.spent),
        transit.fare_count,
        format_money(transit.remaining),
        format_progress_bar(used, None)
    )
}

/// Category breakdown with each category's share of the total spent.
pub fn breakdown_text(summary: &LedgerSummary) -> Result<String> {
    let mut text = String::new();
    if summary.by_category.is_empty() {
        writeln!(text, "No expenses yet.")?;
        return Ok(text);
    }
    for total in &summary.by_category {
        writeln!(
            text,
            "{} - {} ({})",
            total.category.label(),
            format_money(total.amount),
            format_percent(percent_of(total.amount, summary.total_spent))
        )?;
    }
    Ok(text)
}

/// `#id` line for an expense listing.
#[must_use]
pub fn expense_line(expense: &expense::Model) -> String {
    format!(
        "`#{}` {} {} - **{}** ({})",
        expense.id,
        Category::parse(&expense.category).emoji(),
        expense.description,
        format_money(expense.amount),
        expense.created_at.format("%m-%d")
    )
}

/// `#id` line for an income listing.
#[must_use]
pub fn income_line(income: &income::Model) -> String {
    format!(
        "`#{}` 💵 {} - **{}** ({})",
        income.id,
        income.description,
        format_money(income.amount),
        income.created_at.format("%m-%d")
    )
}

/// Cuts `text` to at most `max_chars` characters, ending with `…` when cut.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

/// Joins list entries with newlines, keeping at most [`MAX_LIST_LINES`]
/// entries and `max_chars` characters. Entries left out are summarised in a
/// final `…and N more` line.
#[must_use]
pub fn list_text(entries: Vec<String>, max_chars: usize) -> String {
    let total = entries.len();
    let mut shown: Vec<String> = Vec::new();
    let mut used = 0;

    for entry in entries {
        let len = entry.chars().count() + usize::from(!shown.is_empty());
        if shown.len() == MAX_LIST_LINES || used + len > max_chars {
            if shown.is_empty() {
                // A lone oversized entry is cut rather than dropped
                let room = if total == 1 {
                    max_chars
                } else {
                    max_chars.saturating_sub(more_line(total - 1).chars().count() + 1)
                };
                if room > 0 {
                    used = room;
                    shown.push(truncate_chars(&entry, room));
                }
            }
            break;
        }
        used += len;
        shown.push(entry);
    }

    while shown.len() < total {
        let more = more_line(total - shown.len());
        let needed = more.chars().count() + usize::from(!shown.is_empty());
        if used + needed <= max_chars || shown.is_empty() {
            shown.push(more);
            break;
        }
        if let Some(dropped) = shown.pop() {
            used -= dropped.chars().count() + usize::from(!shown.is_empty());
        }
    }
    shown.join("\n")
}

fn more_line(hidden: usize) -> String {
    format!("…and {hidden} more")
}

/// Line for one payment in a debt's history.
#[must_use]
pub fn payment_line(payment: &debt_payment::Model) -> String {
    format!(
        "{} - {}",
        payment.date.format("%Y-%m-%d"),
        format_money(payment.amount)
    )
}

/// `#id` line for a daily fare, so it can be found for deletion.
#[must_use]
pub fn fare_line(fare: &expense::Model) -> String {
    format!(
        "`#{}` 🚌 {} - **{}**",
        fare.id,
        fare.created_at.format("%m-%d"),
        format_money(fare.amount)
    )
}

/// `#id` line for a debt listing.
#[must_use]
pub fn debt_line(debt: &debt::Model, progress: &DebtProgress) -> String {
    let status = if debt.is_paid { "✅" } else { "💳" };
    format!(
        "`#{}` {status} {} - {} left of {}\n{}",
        debt.id,
        debt.description,
        format_money(progress.remaining.max(Decimal::ZERO)),
        format_money(progress.total),
        format_progress_bar(progress.progress_percent, None)
    )
}

/// One line of the month history.
#[must_use]
pub fn month_line(month: &month::Model) -> String {
    let period = month.ended_at.map_or_else(
        || format!("{} → now", month.started_at.format("%Y-%m-%d")),
        |ended| {
            format!(
                "{} → {}",
                month.started_at.format("%Y-%m-%d"),
                ended.format("%Y-%m-%d")
            )
        },
    );
    let marker = if month.is_active { " 🟢" } else { "" };
    format!(
        "`#{}` {period} - salary {}{marker}",
        month.id,
        format_money(month.salary)
    )
}
