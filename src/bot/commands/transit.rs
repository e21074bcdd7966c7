//! Transit Discord commands - the ring-fenced transit allowance.
//!
//! Fares recorded with `/fare` come out of the allowance set with
//! `/transit_budget` and never reduce the main balance.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, COLOR_INFO, COLOR_WARNING, views},
        cache::QueryKey,
        core::{
            money::{format_money, parse_positive_amount},
            transit::{daily_fares, record_daily_fare, set_transit_budget, transit_status},
        },
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use rust_decimal::Decimal;

    /// Shows the transit allowance and what is left of it.
    #[poise::command(slash_command)]
    pub async fn transit(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let data = ctx.data();
        let month = data.active_month().await?;
        let (expenses, _) = data.month_records(month.id).await?;
        let status = transit_status(&expenses);

        if status.budget_expense_id.is_none() && status.fare_count == 0 {
            ctx.say("No transit budget this month. Set one with `/transit_budget`.")
                .await?;
            return Ok(());
        }

        let color = if status.remaining < Decimal::ZERO {
            COLOR_WARNING
        } else {
            COLOR_INFO
        };
        let mut embed = serenity::CreateEmbed::default()
            .title("🚌 Transit")
            .color(color)
            .description(views::transit_text(&status));

        let fares = daily_fares(&expenses);
        if !fares.is_empty() {
            embed = embed
                .field(
                    "Fares",
                    views::list_text(
                        fares.into_iter().map(views::fare_line).collect(),
                        views::FIELD_LIMIT,
                    ),
                    false,
                )
                .footer(serenity::CreateEmbedFooter::new(
                    "Delete a fare with /delete_expense <id>",
                ));
        }

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Sets this month's transit allowance, replacing any previous value.
    #[poise::command(slash_command)]
    pub async fn transit_budget(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Allowance for the month, e.g. 150.000"] amount: String,
    ) -> Result<()> {
        let amount = parse_positive_amount(&amount)?;
        let data = ctx.data();
        let month = data.active_month().await?;

        let budget = set_transit_budget(&data.database, month.id, amount).await?;
        data.cache.invalidate(&QueryKey::Expenses(month.id)).await;

        ctx.say(format!(
            "🚌 Transit budget set to {}.",
            format_money(budget.amount)
        ))
        .await?;
        Ok(())
    }

    /// Records a daily fare against the transit allowance.
    #[poise::command(slash_command)]
    pub async fn fare(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Fare amount, e.g. 2.950"] amount: String,
    ) -> Result<()> {
        let amount = parse_positive_amount(&amount)?;
        let data = ctx.data();
        let month = data.active_month().await?;

        let recorded = record_daily_fare(&data.database, month.id, amount).await?;
        data.cache.invalidate(&QueryKey::Expenses(month.id)).await;

        let (expenses, _) = data.month_records(month.id).await?;
        let status = transit_status(&expenses);

        ctx.say(format!(
            "🚌 Fare of {} recorded (#{}). {} left of the transit budget.",
            format_money(recorded.amount),
            recorded.id,
            format_money(status.remaining)
        ))
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
