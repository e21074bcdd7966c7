//! Income Discord commands - extra money received during the month.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, COLOR_SUCCESS, views},
        cache::QueryKey,
        core::{
            income::{create_income, delete_income as remove_income},
            money::{format_money, parse_positive_amount},
        },
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use rust_decimal::Decimal;

    /// Records extra income in the current month.
    #[poise::command(slash_command)]
    pub async fn income(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Where did it come from?"] description: String,
        #[description = "Amount, e.g. 50.000"] amount: String,
    ) -> Result<()> {
        let amount = parse_positive_amount(&amount)?;
        let data = ctx.data();
        let month = data.active_month().await?;

        let recorded = create_income(&data.database, month.id, &description, amount).await?;
        data.cache.invalidate(&QueryKey::Incomes(month.id)).await;

        ctx.say(format!(
            "💵 Added {} from {} (#{})",
            format_money(recorded.amount),
            recorded.description,
            recorded.id
        ))
        .await?;
        Ok(())
    }

    /// Lists the current month's extra income.
    #[poise::command(slash_command)]
    pub async fn incomes(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let data = ctx.data();
        let month = data.active_month().await?;
        let (_, incomes) = data.month_records(month.id).await?;

        if incomes.is_empty() {
            ctx.say("No extra income this month.").await?;
            return Ok(());
        }

        let total: Decimal = incomes.iter().map(|i| i.amount).sum();
        let embed = serenity::CreateEmbed::default()
            .title("💵 Extra income")
            .color(COLOR_SUCCESS)
            .description(views::list_text(
                incomes.iter().map(views::income_line).collect(),
                views::DESCRIPTION_LIMIT,
            ))
            .footer(serenity::CreateEmbedFooter::new(format!(
                "Total: {}",
                format_money(total)
            )));

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Deletes an income by id.
    #[poise::command(slash_command)]
    pub async fn delete_income(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Income id, as shown by /incomes"] id: i64,
    ) -> Result<()> {
        let data = ctx.data();

        let removed = remove_income(&data.database, id).await?;
        data.cache
            .invalidate(&QueryKey::Incomes(removed.month_id))
            .await;

        ctx.say(format!(
            "🗑️ Deleted income #{}: {} ({})",
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
