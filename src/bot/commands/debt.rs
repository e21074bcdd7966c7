//! Debt Discord commands - `/debt add|list|show|pay`.
//!
//! Debts live outside the monthly cycle. A payment that covers the remaining
//! balance marks the debt paid.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, COLOR_INFO, COLOR_SUCCESS, views},
        cache::QueryKey,
        core::{
            debt::{add_payment, create_debt, debt_progress, partition_debts},
            money::{format_money, format_progress_bar, parse_positive_amount},
        },
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use rust_decimal::Decimal;

    /// Parent command for tracking debts and their payments.
    #[poise::command(
        slash_command,
        subcommands("debt_add", "debt_list", "debt_show", "debt_pay")
    )]
    pub async fn debt(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Debt tracking command. Available subcommands:\n\
            `/debt add` - Record a new debt\n\
            `/debt list` - List active and paid debts\n\
            `/debt show` - Show a debt with its payments\n\
            `/debt pay` - Record a payment";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Records a new debt.
    #[poise::command(slash_command, rename = "add")]
    pub async fn debt_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "What is owed (e.g., 'Laptop')"] description: String,
        #[description = "Total amount owed, e.g. 1.200.000"] total: String,
    ) -> Result<()> {
        let total = parse_positive_amount(&total)?;
        let data = ctx.data();

        let debt = create_debt(&data.database, &description, total).await?;
        data.cache.invalidate(&QueryKey::Debts).await;

        ctx.say(format!(
            "💳 Debt #{} recorded: {} for {}",
            debt.id,
            debt.description,
            format_money(debt.total_amount)
        ))
        .await?;
        Ok(())
    }

    /// Lists active debts first, then paid ones.
    #[poise::command(slash_command, rename = "list")]
    pub async fn debt_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let data = ctx.data();
        let debts = data.cache.debts(&data.database).await?;

        if debts.is_empty() {
            ctx.say("No debts recorded. Use `/debt add` to track one.")
                .await?;
            return Ok(());
        }

        let (active, paid) = partition_debts(debts);
        let mut embed_fields = Vec::new();
        for (title, group) in [("Active", active), ("Paid", paid)] {
            if group.is_empty() {
                continue;
            }
            let mut lines = Vec::with_capacity(group.len());
            for debt in &group {
                let payments = data.cache.debt_payments(&data.database, debt.id).await?;
                let progress = debt_progress(debt.total_amount, &payments);
                lines.push(views::debt_line(debt, &progress));
            }
            let text = views::list_text(lines, views::FIELD_LIMIT);
            embed_fields.push((title, text, false));
        }

        let embed = serenity::CreateEmbed::default()
            .title("💳 Debts")
            .color(COLOR_INFO)
            .fields(embed_fields);

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Shows a debt with its payment history.
    #[poise::command(slash_command, rename = "show")]
    pub async fn debt_show(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Debt id, as shown by /debt list"] id: i64,
    ) -> Result<()> {
        let data = ctx.data();
        let debt = data
            .cache
            .debts(&data.database)
            .await?
            .into_iter()
            .find(|d| d.id == id)
            .ok_or(Error::DebtNotFound { id })?;
        let payments = data.cache.debt_payments(&data.database, id).await?;
        let progress = debt_progress(debt.total_amount, &payments);

        let history = if payments.is_empty() {
            "No payments yet.".to_string()
        } else {
            views::list_text(
                payments.iter().map(views::payment_line).collect(),
                views::FIELD_LIMIT,
            )
        };

        let color = if debt.is_paid { COLOR_SUCCESS } else { COLOR_INFO };
        let embed = serenity::CreateEmbed::default()
            .title(format!("💳 {}", debt.description))
            .color(color)
            .description(format_progress_bar(progress.progress_percent, None))
            .field("Total", format_money(progress.total), true)
            .field("Paid", format_money(progress.paid), true)
            .field(
                "Remaining",
                format_money(progress.remaining.max(Decimal::ZERO)),
                true,
            )
            .field("Payments", history, false);

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Records a payment against a debt.
    #[poise::command(slash_command, rename = "pay")]
    pub async fn debt_pay(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Debt id, as shown by /debt list"] id: i64,
        #[description = "Amount paid, e.g. 200.000"] amount: String,
    ) -> Result<()> {
        let amount = parse_positive_amount(&amount)?;
        let data = ctx.data();

        let outcome = add_payment(&data.database, id, amount).await?;
        data.cache.invalidate(&QueryKey::DebtPayments(id)).await;
        if outcome.newly_paid {
            data.cache.invalidate(&QueryKey::Debts).await;
        }

        let message = if outcome.newly_paid {
            format!(
                "🎉 Paid {}. Debt #{id} is fully paid!",
                format_money(amount)
            )
        } else {
            format!(
                "✅ Paid {}. {} left on debt #{id}.\n{}",
                format_money(amount),
                format_money(outcome.progress.remaining.max(Decimal::ZERO)),
                format_progress_bar(outcome.progress.progress_percent, None)
            )
        };
        ctx.say(message).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
