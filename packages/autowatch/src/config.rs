use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

/// Hard ceiling on result pages fetched per run, regardless of what the
/// pagination footer reports. Bounds request volume and runtime.
pub const MAX_PAGES: usize = 5;

/// Application configuration loaded from environment variables.
///
/// Credentials are carried here explicitly and threaded through the run;
/// nothing is stashed in globals.
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub chat_id: String,
    pub make: String,
    pub model: String,
    pub postcode: String,
    pub radius: u32,
    pub state_file: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `BOT_TOKEN` and `CHAT_ID` are required; everything else has a default.
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            bot_token: env::var("BOT_TOKEN").context("BOT_TOKEN must be set")?,
            chat_id: env::var("CHAT_ID").context("CHAT_ID must be set")?,
            make: env::var("CAR_MAKE").unwrap_or_else(|_| "BMW".to_string()),
            model: env::var("CAR_MODEL").unwrap_or_else(|_| "3 Series".to_string()),
            postcode: env::var("POSTCODE").unwrap_or_else(|_| "E15 4EQ".to_string()),
            radius: env::var("RADIUS")
                .unwrap_or_else(|_| "150000".to_string())
                .parse()
                .context("RADIUS must be a valid number")?,
            state_file: env::var("STATE_FILE")
                .unwrap_or_else(|_| "seen_cars.json".to_string())
                .into(),
        })
    }
}
