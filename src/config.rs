use anyhow::{Context, Result};
use std::env;

/// Production endpoint of the homework review API.
pub const DEFAULT_ENDPOINT: &str =
    "https://practicum.yandex.ru/api/user_api/homework_statuses/";

const DEFAULT_POLL_INTERVAL_SECS: u64 = 600;

#[derive(Clone)]
pub struct Config {
    pub api_token: String,
    pub telegram_token: String,
    pub chat_id: String,
    pub endpoint: String,
    /// Seconds between poll cycles.
    pub poll_interval_secs: u64,
    /// How far behind "now" the initial cursor starts.
    pub lookback_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let api_token = env::var("REVIEW_API_TOKEN")
            .context("REVIEW_API_TOKEN environment variable is required")?;

        let telegram_token = env::var("TELEGRAM_TOKEN")
            .context("TELEGRAM_TOKEN environment variable is required")?;

        let chat_id = env::var("TELEGRAM_CHAT_ID")
            .context("TELEGRAM_CHAT_ID environment variable is required")?;

        let endpoint =
            env::var("REVIEW_API_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());

        let poll_interval_secs = env::var("POLL_INTERVAL_SECS")
            .unwrap_or_else(|_| DEFAULT_POLL_INTERVAL_SECS.to_string())
            .parse::<u64>()
            .context("POLL_INTERVAL_SECS must be a valid number")?;

        let lookback_secs = env::var("LOOKBACK_SECS")
            .unwrap_or_else(|_| "0".to_string())
            .parse::<u64>()
            .context("LOOKBACK_SECS must be a valid number")?;

        Ok(Self {
            api_token,
            telegram_token,
            chat_id,
            endpoint,
            poll_interval_secs,
            lookback_secs,
        })
    }
}
