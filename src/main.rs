use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{error, info, Level};

use review_watcher::client::ReviewClient;
use review_watcher::config::Config;
use review_watcher::notify::TelegramNotifier;
use review_watcher::poll::{poll_loop, PollState};

fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    info!("Starting homework review watcher");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration, cannot continue: {:#}", e);
            std::process::exit(1);
        }
    };

    let client = ReviewClient::new(config.endpoint.clone(), config.api_token.clone());
    let notifier = TelegramNotifier::new(config.telegram_token.clone(), config.chat_id.clone());

    if let Err(e) = notifier.validate_token().await {
        error!("Telegram bot token is unusable, cannot continue: {:#}", e);
        std::process::exit(1);
    }
    info!("Telegram bot token validated");

    let cursor = now_secs() - config.lookback_secs as i64;
    info!(
        "Polling every {} seconds starting from cursor {}",
        config.poll_interval_secs, cursor
    );

    poll_loop(
        PollState::new(cursor),
        &client,
        &notifier,
        config.poll_interval_secs,
    )
    .await;
}
