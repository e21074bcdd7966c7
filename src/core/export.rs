//! Month-end report exports.
//!
//! A [`MonthlyReport`] holds the summary figures and the dated expense detail
//! of one month. It can be rendered as a plain-text document with two tables
//! or as a workbook of two CSV sheets. Daily transit fares are listed as one
//! summary line because they do not count against the balance.

use crate::{
    core::{
        category::Category,
        expense::get_ledger_expenses,
        ledger::{LedgerSummary, summarize},
        money::{format_money, format_percent},
        transit::{TransitStatus, transit_status},
    },
    entities::{expense, income, month},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt::Write;

/// Everything needed to render a month-end report.
#[derive(Debug, Clone)]
pub struct MonthlyReport {
    /// The reported month
    pub month: month::Model,
    /// Derived totals
    pub summary: LedgerSummary,
    /// Transit sub-budget state
    pub transit: TransitStatus,
    /// Expenses counted against the balance, newest first
    pub expenses: Vec<expense::Model>,
}

/// One CSV sheet of an exported workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    /// Sheet name, also used in the file name
    pub name: String,
    /// CSV bytes including the header row
    pub data: Vec<u8>,
}

#[derive(Serialize)]
struct ExpenseRow<'a> {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Amount")]
    amount: String,
}

impl MonthlyReport {
    /// Builds a report from a month and its records.
    #[must_use]
    pub fn build(
        month: month::Model,
        expenses: &[expense::Model],
        incomes: &[income::Model],
    ) -> Self {
        let summary = summarize(month.salary, expenses, incomes);
        Self {
            summary,
            transit: transit_status(expenses),
            expenses: get_ledger_expenses(expenses),
            month,
        }
    }

    /// Summary table rows as (concept, amount).
    #[must_use]
    pub fn summary_rows(&self) -> Vec<(&'static str, Decimal)> {
        vec![
            ("Base salary", self.summary.salary),
            ("Extra income", self.summary.total_income),
            ("Total available", self.summary.total_available),
            ("Total spent", self.summary.total_spent),
            ("Remaining", self.summary.remaining),
            ("Transit fares (separate)", self.transit.spent),
        ]
    }
}

/// File name stem for an export made on `date`, e.g. `resumen-mes-2025-03-31`.
#[must_use]
pub fn export_file_stem(prefix: &str, date: NaiveDate) -> String {
    format!("{prefix}-{}", date.format("%Y-%m-%d"))
}

/// Renders the report as a plain-text document.
pub fn render_document(report: &MonthlyReport) -> Result<String> {
    let mut doc = String::new();

    writeln!(doc, "MONTHLY SUMMARY")?;
    writeln!(
        doc,
        "Month started: {}",
        report.month.started_at.format("%Y-%m-%d")
    )?;
    if let Some(ended_at) = report.month.ended_at {
        writeln!(doc, "Month ended:   {}", ended_at.format("%Y-%m-%d"))?;
    }
    writeln!(doc)?;

    writeln!(doc, "{:<26} {:>16}", "Concept", "Amount")?;
    writeln!(doc, "{}", "-".repeat(43))?;
    for (concept, amount) in report.summary_rows() {
        writeln!(doc, "{concept:<26} {:>16}", format_money(amount))?;
    }
    writeln!(
        doc,
        "{:<26} {:>16}",
        "Savings rate",
        format_percent(report.summary.savings_rate)
    )?;
    writeln!(doc)?;

    writeln!(doc, "EXPENSE DETAIL")?;
    if report.expenses.is_empty() {
        writeln!(doc, "No expenses recorded.")?;
        return Ok(doc);
    }

    writeln!(
        doc,
        "{:<10}  {:<28}  {:<20}  {:>14}",
        "Date", "Description", "Category", "Amount"
    )?;
    writeln!(doc, "{}", "-".repeat(78))?;
    for exp in &report.expenses {
        writeln!(
            doc,
            "{:<10}  {:<28}  {:<20}  {:>14}",
            exp.created_at.format("%Y-%m-%d"),
            exp.description,
            Category::parse(&exp.category).label(),
            format_money(exp.amount)
        )?;
    }

    Ok(doc)
}

fn finish_sheet(name: &str, writer: csv::Writer<Vec<u8>>) -> Result<Sheet> {
    let data = writer
        .into_inner()
        .map_err(|e| Error::Io(e.into_error()))?;
    Ok(Sheet {
        name: name.to_string(),
        data,
    })
}

/// Renders the report as two CSV sheets: `summary` and `expenses`.
pub fn render_workbook(report: &MonthlyReport) -> Result<Vec<Sheet>> {
    let mut summary = csv::Writer::from_writer(Vec::new());
    summary.write_record(["Concept", "Amount"])?;
    for (concept, amount) in report.summary_rows() {
        summary.write_record([concept.to_string(), amount.to_string()])?;
    }
    summary.write_record([
        "Savings rate (%)".to_string(),
        report.summary.savings_rate.round_dp(1).to_string(),
    ])?;

    let mut expenses = csv::Writer::from_writer(Vec::new());
    if report.expenses.is_empty() {
        expenses.write_record(["Date", "Description", "Category", "Amount"])?;
    }
    for exp in &report.expenses {
        expenses.serialize(ExpenseRow {
            date: exp.created_at.format("%Y-%m-%d").to_string(),
            description: &exp.description,
            category: Category::parse(&exp.category).name().to_string(),
            amount: exp.amount.to_string(),
        })?;
    }

    Ok(vec![
        finish_sheet("summary", summary)?,
        finish_sheet("expenses", expenses)?,
    ])
}
