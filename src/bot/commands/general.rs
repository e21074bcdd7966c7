//! General Discord commands - ping and help.
//! These commands don't touch the ledger.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**Mesada Help**\n\
        Amounts accept thousands separators, e.g. `1.500.000`.\n\n\
        **Month**\n\
        • `/start_month <salary>` - Starts a new month (closes the current one).\n\
        • `/status` - Remaining money, progress and tips.\n\
        • `/summary` - Category breakdown and savings rate.\n\
        • `/export` - Downloads the month report.\n\
        • `/close_month` - Exports the report and ends the month.\n\
        • `/end_month` - Ends the month without exporting.\n\
        • `/history` - Past months.\n\n\
        **Money in and out**\n\
        • `/expense <description> <amount> [category]` - Records an expense.\n\
        • `/expenses` - Lists this month's expenses.\n\
        • `/delete_expense <id>` - Deletes an expense.\n\
        • `/income <description> <amount>` - Records extra income.\n\
        • `/incomes` - Lists this month's extra income.\n\
        • `/delete_income <id>` - Deletes an income.\n\n\
        **Transit**\n\
        • `/transit_budget <amount>` - Sets this month's transit allowance.\n\
        • `/fare <amount>` - Records a daily fare.\n\
        • `/transit` - Shows what is left of the allowance.\n\n\
        **Debts**\n\
        • `/debt <add|list|show|pay>` - Tracks debts and their payments.\n\n\
        **Utility**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
