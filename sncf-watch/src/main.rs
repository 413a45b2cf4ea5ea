use std::path::Path;

use tracing::info;
use tracing_subscriber::EnvFilter;

use sncf_watch::notify::TelegramNotifier;
use sncf_watch::scheduler;
use sncf_watch::sncf::{SncfClient, SncfConfig};
use sncf_watch::watch::ItineraryCache;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Get Telegram credentials from environment
    let Ok(bot_token) = std::env::var("TELEGRAM_BOT_KEY") else {
        eprintln!("Error: TELEGRAM_BOT_KEY is not set");
        std::process::exit(1);
    };
    let Ok(chat_id) = std::env::var("TELEGRAM_CHAT_ID") else {
        eprintln!("Error: TELEGRAM_CHAT_ID is not set");
        std::process::exit(1);
    };

    let client = SncfClient::new(SncfConfig::new()).expect("Failed to create SNCF client");
    let notifier =
        TelegramNotifier::new(bot_token, chat_id).expect("Failed to create Telegram notifier");
    let mut cache = ItineraryCache::new();

    info!("sncf-watch started");

    // Config and payload templates live in the working directory and are
    // re-read every batch
    scheduler::run(
        &client,
        &notifier,
        &mut cache,
        Path::new("config.txt"),
        Path::new("."),
    )
    .await;
}
