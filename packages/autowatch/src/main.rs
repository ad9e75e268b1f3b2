// Entry point for the AutoTrader watcher. Intended to be run from cron.

use anyhow::{Context, Result};
use autowatch::config::Config;
use autowatch::fetch::HttpFetcher;
use telegram::{TelegramOptions, TelegramService};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting AutoTrader watcher");

    // Missing credentials are the only fatal failure; everything past this
    // point degrades and still produces a summary.
    let config = Config::from_env().context("Failed to load configuration")?;

    let fetcher = HttpFetcher::new().context("Failed to build HTTP fetcher")?;
    let notifier = TelegramService::new(TelegramOptions {
        bot_token: config.bot_token.clone(),
        chat_id: config.chat_id.clone(),
    });

    let summary = autowatch::run(&config, &fetcher, &notifier).await;

    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
