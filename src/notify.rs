//! Telegram delivery of notification messages.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{error, info};

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Delivery seam for notification messages.
///
/// `send` reports delivery as a boolean and never panics or retries; a failed
/// send is the caller's signal to log and move on.
#[async_trait]
pub trait Notify: Send + Sync {
    async fn send(&self, text: &str) -> bool;
}

pub struct TelegramNotifier {
    client: Client,
    token: String,
    chat_id: String,
}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

impl TelegramNotifier {
    pub fn new(token: String, chat_id: String) -> Self {
        Self {
            client: Client::new(),
            token,
            chat_id,
        }
    }

    /// Check the bot token against the Telegram API (`getMe`).
    ///
    /// Called once at startup; a rejected token is fatal since no
    /// notification could ever be delivered.
    pub async fn validate_token(&self) -> Result<()> {
        let url = format!("{}/bot{}/getMe", TELEGRAM_API_BASE, self.token);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to reach the Telegram API")?;

        if !response.status().is_success() {
            bail!("Telegram rejected the bot token: {}", response.status());
        }
        Ok(())
    }
}

#[async_trait]
impl Notify for TelegramNotifier {
    async fn send(&self, text: &str) -> bool {
        let url = format!("{}/bot{}/sendMessage", TELEGRAM_API_BASE, self.token);
        let request = SendMessageRequest {
            chat_id: &self.chat_id,
            text,
        };

        match self.client.post(&url).json(&request).send().await {
            Ok(response) if response.status().is_success() => {
                info!("Notification sent: {}", text);
                true
            }
            Ok(response) => {
                error!("Telegram rejected the message: {}", response.status());
                false
            }
            Err(e) => {
                error!("Failed to send notification: {}", e);
                false
            }
        }
    }
}
