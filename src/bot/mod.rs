//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord front-end of the ledger: slash commands,
//! autocomplete handlers, the shared bot context and the framework setup.

/// Discord command implementations (months, expenses, incomes, transit, debts, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;
/// Text rendering for embeds
pub mod views;

use crate::{
    cache::LedgerCache,
    config::{access::is_allowed, settings::Settings},
    core::advice::Tone,
    entities::{expense, income, month},
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use tracing::{error, info, warn};

/// Embed colour for warnings and overspent months
pub const COLOR_WARNING: u32 = 0x00E7_4C3C;
/// Embed colour for good news
pub const COLOR_SUCCESS: u32 = 0x002E_CC71;
/// Embed colour for neutral information
pub const COLOR_INFO: u32 = 0x0034_98DB;

/// Embed colour and emoji for an advice tone.
#[must_use]
pub const fn tone_style(tone: Tone) -> (u32, &'static str) {
    match tone {
        Tone::Warning => (COLOR_WARNING, "⚠️"),
        Tone::Success => (COLOR_SUCCESS, "✅"),
        Tone::Info => (COLOR_INFO, "💡"),
    }
}

/// Shared data available to all bot commands.
/// Holds the database connection, the query cache and the loaded settings.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Read-through cache in front of the database
    pub cache: LedgerCache,
    /// Settings loaded from config.toml
    pub settings: Settings,
    /// Discord user id allowed to use the bot, if restricted
    pub owner: Option<String>,
}

impl BotData {
    /// Creates a new `BotData` instance with an empty cache.
    #[must_use]
    pub fn new(database: DatabaseConnection, settings: Settings, owner: Option<String>) -> Self {
        Self {
            database,
            cache: LedgerCache::new(),
            settings,
            owner,
        }
    }

    /// The active month.
    ///
    /// # Errors
    /// Returns [`Error::NoActiveMonth`] when no month is open.
    pub async fn active_month(&self) -> Result<month::Model> {
        self.cache
            .active_month(&self.database)
            .await?
            .ok_or(Error::NoActiveMonth)
    }

    /// Expenses and incomes of a month, newest first.
    pub async fn month_records(
        &self,
        month_id: i64,
    ) -> Result<(Vec<expense::Model>, Vec<income::Model>)> {
        let expenses = self.cache.expenses(&self.database, month_id).await?;
        let incomes = self.cache.incomes(&self.database, month_id).await?;
        Ok((expenses, incomes))
    }
}

/// Reply shown to the user when a command fails.
///
/// Input mistakes are echoed back; anything else gets a generic message
/// naming only the kind of failure.
fn error_reply(error: &Error) -> String {
    if error.is_user_error() {
        return format!("❌ {error}");
    }
    let what = match error {
        Error::Database(_) => "while reading or saving your data",
        Error::Framework(_) => "while talking to Discord",
        Error::Csv(_) | Error::Io(_) | Error::Fmt(_) => "while preparing the reply",
        _ => "on our side",
    };
    format!("❌ Something went wrong {what}. Please try again.")
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {error:?}");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            if error.is_user_error() {
                warn!("Rejected `{}`: {error}", ctx.command().name);
            } else {
                error!("Error in command `{}`: {error:?}", ctx.command().name);
            }
            if let Err(e) = ctx.say(error_reply(&error)).await {
                error!("Failed to send error message: {e}");
            }
        }
        poise::FrameworkError::CommandCheckFailed { ctx, .. } => {
            warn!(
                "User {} tried to run `{}` without access",
                ctx.author().id,
                ctx.command().name
            );
            let reply = poise::CreateReply::default()
                .content("⛔ This ledger is private.")
                .ephemeral(true);
            if let Err(e) = ctx.send(reply).await {
                error!("Failed to send access message: {e}");
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {e}");
            }
        }
    }
}

/// Builds the poise framework and runs the Discord client until it stops.
///
/// # Errors
/// Returns an error if the client cannot be created or the gateway
/// connection fails.
pub async fn run_bot(token: &str, data: BotData) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            on_error: |error| Box::pin(on_error(error)),
            command_check: Some(|ctx| {
                Box::pin(async move {
                    let user_id = ctx.author().id.to_string();
                    Ok(is_allowed(ctx.data().owner.as_deref(), &user_id))
                })
            }),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    // Slash commands only need the non-privileged intents
    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {e:?}"))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {e:?}"))?;
    Ok(())
}

pub use commands::*;
pub use handlers::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_style() {
        assert_eq!(tone_style(Tone::Warning).0, COLOR_WARNING);
        assert_eq!(tone_style(Tone::Success).1, "✅");
        assert_eq!(tone_style(Tone::Info).0, COLOR_INFO);
    }

    #[test]
    fn test_error_reply() {
        assert_eq!(
            error_reply(&Error::NoActiveMonth),
            "❌ No active month. Start one with /start_month"
        );
        assert_eq!(
            error_reply(&Error::Database(sea_orm::DbErr::Custom("locked".into()))),
            "❌ Something went wrong while reading or saving your data. Please try again."
        );
        let fmt = error_reply(&Error::Fmt(std::fmt::Error));
        assert!(fmt.contains("while preparing the reply"));
        assert!(!fmt.contains("database"));
    }
}
