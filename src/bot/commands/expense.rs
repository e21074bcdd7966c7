//! Expense Discord commands - `expense`, `expenses` and `delete_expense`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, COLOR_INFO, handlers::autocomplete, views},
        cache::QueryKey,
        core::{
            category::Category,
            expense::{create_expense, delete_expense as remove_expense, get_ledger_expenses},
            ledger::summarize,
            money::{format_money, parse_positive_amount},
        },
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use rust_decimal::Decimal;

    /// Records an expense in the current month.
    #[poise::command(slash_command)]
    pub async fn expense(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "What was it for?"] description: String,
        #[description = "Amount, e.g. 45.000"] amount: String,
        #[description = "Category (defaults to Other)"]
        #[autocomplete = "autocomplete::autocomplete_category"]
        category: Option<String>,
    ) -> Result<()> {
        let amount = parse_positive_amount(&amount)?;
        let category = match category.as_deref() {
            None => Category::default(),
            Some(input) => Category::from_user_input(input).ok_or_else(|| Error::Validation {
                message: format!("Unknown category '{input}'"),
            })?,
        };

        let data = ctx.data();
        let month = data.active_month().await?;

        let recorded =
            create_expense(&data.database, month.id, &description, amount, &category).await?;
        data.cache.invalidate(&QueryKey::Expenses(month.id)).await;

        let (expenses, incomes) = data.month_records(month.id).await?;
        let summary = summarize(month.salary, &expenses, &incomes);

        ctx.say(format!(
            "✅ {} {} - {} (#{})\nRemaining this month: {}",
            category.label(),
            recorded.description,
            format_money(recorded.amount),
            recorded.id,
            format_money(summary.remaining)
        ))
        .await?;
        Ok(())
    }

    /// Lists the current month's expenses, newest first.
    #[poise::command(slash_command)]
    pub async fn expenses(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let data = ctx.data();
        let month = data.active_month().await?;
        let (expenses, _) = data.month_records(month.id).await?;
        let ledger = get_ledger_expenses(&expenses);

        if ledger.is_empty() {
            ctx.say("No expenses this month yet. Add one with `/expense`.")
                .await?;
            return Ok(());
        }

        let total: Decimal = ledger.iter().map(|e| e.amount).sum();
        let embed = serenity::CreateEmbed::default()
            .title("🧾 Expenses")
            .color(COLOR_INFO)
            .description(views::list_text(
                ledger.iter().map(views::expense_line).collect(),
                views::DESCRIPTION_LIMIT,
            ))
            .footer(serenity::CreateEmbedFooter::new(format!(
                "{} expense{} | {}",
                ledger.len(),
                if ledger.len() == 1 { "" } else { "s" },
                format_money(total)
            )));

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Deletes an expense by id.
    #[poise::command(slash_command)]
    pub async fn delete_expense(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Expense id, as shown by /expenses"] id: i64,
    ) -> Result<()> {
        let data = ctx.data();

        let removed = remove_expense(&data.database, id).await?;
        data.cache
            .invalidate(&QueryKey::Expenses(removed.month_id))
            .await;

        ctx.say(format!(
            "🗑️ Deleted expense #{}: {} ({})",
            removed.id,
            removed.description,
            format_money(removed.amount)
        ))
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
