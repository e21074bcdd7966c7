//! Month Discord commands - lifecycle, dashboard and exports.
//!
//! `status` is the main screen: what is left, how much was spent and a few
//! tips. `summary` is the month-end view with the category breakdown.
//! `close_month` sends the report files before ending the month, so a failed
//! upload leaves the month open.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, COLOR_INFO, COLOR_SUCCESS, COLOR_WARNING, views},
        cache::QueryKey,
        core::{
            advice::advise,
            export::{MonthlyReport, export_file_stem, render_document, render_workbook},
            ledger::summarize,
            money::{format_money, format_percent, parse_positive_amount},
            month as months,
            transit::transit_status,
        },
        errors::{Error, Result},
    };
    use chrono::Utc;
    use poise::serenity_prelude as serenity;
    use rust_decimal::Decimal;
    use tracing::info;

    /// Starts a new month with the given salary, closing the current one.
    #[poise::command(slash_command)]
    pub async fn start_month(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Salary for the month, e.g. 1.500.000"] salary: String,
    ) -> Result<()> {
        let salary = parse_positive_amount(&salary)?;
        let data = ctx.data();

        let month = months::start_month(&data.database, salary).await?;
        data.cache.invalidate(&QueryKey::ActiveMonth).await;

        ctx.say(format!(
            "✅ New month started with {}. Use `/expense` to record your spending.",
            format_money(month.salary)
        ))
        .await?;
        Ok(())
    }

    /// Ends the current month without exporting it.
    #[poise::command(slash_command)]
    pub async fn end_month(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let data = ctx.data();
        let month = data.active_month().await?;

        let ended = months::end_month(&data.database, month.id).await?;
        data.cache.invalidate(&QueryKey::ActiveMonth).await;

        ctx.say(format!(
            "📅 Month #{} ended. Start the next one with `/start_month`.",
            ended.id
        ))
        .await?;
        Ok(())
    }

    /// Shows what is left this month, the spend progress and some tips.
    #[poise::command(slash_command)]
    pub async fn status(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let data = ctx.data();
        let month = data.active_month().await?;
        let (expenses, incomes) = data.month_records(month.id).await?;

        let summary = summarize(month.salary, &expenses, &incomes);
        let tips = advise(&summary, &data.settings.advice);
        let transit = transit_status(&expenses);

        let color = if summary.is_overspent() {
            COLOR_WARNING
        } else {
            COLOR_SUCCESS
        };

        let mut embed = serenity::CreateEmbed::default()
            .title("💰 This month")
            .description(views::status_description(&summary)?)
            .color(color)
            .field("Salary", format_money(summary.salary), true)
            .field("Extra income", format_money(summary.total_income), true)
            .field("Spent", format_money(summary.total_spent), true);

        if transit.budget > Decimal::ZERO || transit.fare_count > 0 {
            embed = embed.field(
                "🚌 Transit",
                format!(
                    "{} left of {}",
                    format_money(transit.remaining),
                    format_money(transit.budget)
                ),
                false,
            );
        }
        if !tips.is_empty() {
            embed = embed.field("Tips", views::advice_text(&tips), false);
        }

        let embed = embed.footer(serenity::CreateEmbedFooter::new(format!(
            "Month #{} | started {}",
            month.id,
            month.started_at.format("%Y-%m-%d")
        )));

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Shows the month summary: totals, savings rate and category breakdown.
    #[poise::command(slash_command)]
    pub async fn summary(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let data = ctx.data();
        let month = data.active_month().await?;
        let (expenses, incomes) = data.month_records(month.id).await?;
        let summary = summarize(month.salary, &expenses, &incomes);

        let embed = serenity::CreateEmbed::default()
            .title("📊 Month summary")
            .color(COLOR_INFO)
            .field("Total available", format_money(summary.total_available), true)
            .field("Total spent", format_money(summary.total_spent), true)
            .field("Remaining", format_money(summary.remaining), true)
            .field("Savings rate", format_percent(summary.savings_rate), true)
            .field("Expenses", summary.expense_count.to_string(), true)
            .field("By category", views::breakdown_text(&summary)?, false);

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    async fn send_report(
        ctx: poise::Context<'_, BotData, Error>,
        report: &MonthlyReport,
        content: String,
    ) -> Result<()> {
        let prefix = &ctx.data().settings.export.file_prefix;
        let stem = export_file_stem(prefix, Utc::now().date_naive());

        let document = render_document(report)?;
        let mut reply = poise::CreateReply::default()
            .content(content)
            .attachment(serenity::CreateAttachment::bytes(
                document.into_bytes(),
                format!("{stem}.txt"),
            ));
        for sheet in render_workbook(report)? {
            reply = reply.attachment(serenity::CreateAttachment::bytes(
                sheet.data,
                format!("{stem}-{}.csv", sheet.name),
            ));
        }

        ctx.send(reply).await?;
        info!("Sent report {stem} for month {}", report.month.id);
        Ok(())
    }

    /// Downloads this month's report as a text document and CSV sheets.
    #[poise::command(slash_command)]
    pub async fn export(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let data = ctx.data();
        let month = data.active_month().await?;
        let (expenses, incomes) = data.month_records(month.id).await?;

        let report = MonthlyReport::build(month, &expenses, &incomes);
        send_report(ctx, &report, "📎 Here is this month's report.".to_string()).await
    }

    /// Exports this month's report, then ends the month.
    #[poise::command(slash_command)]
    pub async fn close_month(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let data = ctx.data();
        let month = data.active_month().await?;
        let (expenses, incomes) = data.month_records(month.id).await?;

        let report = MonthlyReport::build(month, &expenses, &incomes);
        let content = format!(
            "📅 Closing the month with {} remaining ({} saved). Report attached.",
            format_money(report.summary.remaining),
            format_percent(report.summary.savings_rate)
        );
        send_report(ctx, &report, content).await?;

        months::end_month(&data.database, report.month.id).await?;
        data.cache.invalidate(&QueryKey::ActiveMonth).await;
        Ok(())
    }

    /// Lists past and current months, newest first.
    #[poise::command(slash_command)]
    pub async fn history(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let history = months::list_months(&ctx.data().database).await?;

        if history.is_empty() {
            ctx.say("No months yet. Start one with `/start_month`.")
                .await?;
            return Ok(());
        }

        let embed = serenity::CreateEmbed::default()
            .title("🗓️ Month history")
            .color(COLOR_INFO)
            .description(views::list_text(
                history.iter().map(views::month_line).collect(),
                views::DESCRIPTION_LIMIT,
            ));

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
