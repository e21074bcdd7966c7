use dotenvy::dotenv;
use mesada::{
    bot::{BotData, run_bot},
    config::{access::get_owner_id, database, settings::load_default_settings},
    errors::{Error, Result},
};
use std::env;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; variables may also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Settings from config.toml (defaults when missing)
    let settings = load_default_settings()
        .inspect_err(|e| error!("Failed to load settings: {e}"))?;
    info!("Settings loaded.");

    // 4. Database connection and schema
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {e}"))?;

    // 5. Access restriction
    let owner = get_owner_id();
    match &owner {
        Some(id) => info!("Restricting commands to user {id}"),
        None => info!("OWNER_USER_ID not set; any user may run commands"),
    }

    // 6. Run the bot
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {e}"))
        .map_err(Error::EnvVar)?;

    run_bot(&token, BotData::new(db, settings, owner)).await
}
