//! Minimal Telegram Bot API client.
//!
//! Only implements `sendMessage`, which is all the watcher needs. Messages
//! longer than 4096 characters are rejected by the API, so callers are
//! expected to split before sending.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

#[derive(Debug, thiserror::Error)]
pub enum TelegramError {
    #[error("request to Telegram failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Telegram API error ({status}): {body}")]
    Api { status: u16, body: String },
    #[error("Telegram rejected the message: {description}")]
    Rejected { description: String },
}

#[derive(Debug, Clone)]
pub struct TelegramOptions {
    pub bot_token: String,
    pub chat_id: String,
}

#[derive(Debug, Clone)]
pub struct TelegramService {
    client: Client,
    options: TelegramOptions,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

impl TelegramService {
    pub fn new(options: TelegramOptions) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, options }
    }

    /// Send a plain-text message to the configured chat.
    ///
    /// Success requires both a 2xx status and `"ok": true` in the response
    /// body; anything else is a hard failure for this call.
    pub async fn send_message(&self, text: &str) -> Result<(), TelegramError> {
        let url = format!(
            "https://api.telegram.org/bot{}/sendMessage",
            self.options.bot_token
        );

        let request = SendMessageRequest {
            chat_id: &self.options.chat_id,
            text,
        };

        let response = self.client.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %body, "Telegram send failed");
            return Err(TelegramError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let data: SendMessageResponse = response.json().await?;
        if !data.ok {
            let description = data.description.unwrap_or_else(|| "unknown error".to_string());
            error!(description = %description, "Telegram rejected message");
            return Err(TelegramError::Rejected { description });
        }

        info!("Telegram notification sent");
        Ok(())
    }
}
