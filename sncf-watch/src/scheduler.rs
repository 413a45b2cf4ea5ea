//! The polling loop.
//!
//! Two nested loops: the outer batch loop runs until the process is
//! killed; the inner loop walks the configured search dates, running
//! fetch → diff → notify for each. Config and payload templates are
//! re-read at the start of every batch so edits take effect without a
//! restart, and the config is read again — independently — to pick the
//! inter-batch delay.
//!
//! Errors never escalate past a batch: a failed config read, fetch or
//! notification is logged and the loop moves on.

use std::path::Path;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::notify::{TelegramNotifier, render};
use crate::sncf::{FetchOutcome, PayloadTemplates, SncfClient, SncfError};
use crate::watch::{ConfigError, ItineraryCache, OfferEvent, WatchConfig, diff_cycle};

/// Inter-batch delay used when the config cannot be re-read.
const FALLBACK_BATCH_PAUSE: Duration = Duration::from_secs(10);

/// Where the raw API response lands when a cycle finds zero proposals.
const FALLBACK_ARTIFACT_PATH: &str = "output.txt";

/// Errors that abort one batch (and only that batch).
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Sncf(#[from] SncfError),
}

/// Run the watcher until the process is terminated.
pub async fn run(
    client: &SncfClient,
    notifier: &TelegramNotifier,
    cache: &mut ItineraryCache,
    config_path: &Path,
    payload_dir: &Path,
) {
    loop {
        info!("starting check cycle");
        if let Err(e) = run_batch(client, notifier, cache, config_path, payload_dir).await {
            error!(error = %e, "check cycle failed");
        }

        let pause = match WatchConfig::load(config_path) {
            Ok(config) => config.batch_pause(),
            Err(e) => {
                error!(
                    error = %e,
                    fallback_secs = FALLBACK_BATCH_PAUSE.as_secs(),
                    "failed to read config for batch delay, using fallback"
                );
                FALLBACK_BATCH_PAUSE
            }
        };
        tokio::time::sleep(pause).await;
    }
}

/// One pass over all configured search dates.
async fn run_batch(
    client: &SncfClient,
    notifier: &TelegramNotifier,
    cache: &mut ItineraryCache,
    config_path: &Path,
    payload_dir: &Path,
) -> Result<(), BatchError> {
    let config = WatchConfig::load(config_path)?;
    let templates = PayloadTemplates::load(payload_dir)?;
    let base_name = templates.base_itinerary_name()?;

    for date in &config.dates_to_search {
        let itinerary = format!("{base_name} on {date}");
        info!(%itinerary, "fetching itineraries");

        match client.fetch_proposals(&templates, date).await {
            Ok(outcome) => {
                if outcome.proposals.is_empty() {
                    dump_raw_response(&itinerary, &outcome);
                } else {
                    let events = cycle_events(cache, &itinerary, &outcome, &config);
                    notify_all(notifier, &events).await;
                }
            }
            // No retry: the date is skipped until the next batch
            Err(e) => error!(%itinerary, error = %e, "fetch failed"),
        }

        tokio::time::sleep(config.request_pause()).await;
    }

    Ok(())
}

/// Diff one cycle's fetch outcome against the cache.
///
/// A cycle with zero proposals does not touch the cache: an empty result
/// is treated as an API hiccup, not as every train selling out at once.
fn cycle_events(
    cache: &mut ItineraryCache,
    itinerary: &str,
    outcome: &FetchOutcome,
    config: &WatchConfig,
) -> Vec<OfferEvent> {
    if outcome.proposals.is_empty() {
        return Vec::new();
    }
    diff_cycle(cache, itinerary, &outcome.proposals, config)
}

/// Render and deliver every event; delivery failures are logged, never
/// escalated.
async fn notify_all(notifier: &TelegramNotifier, events: &[OfferEvent]) {
    for event in events {
        let text = render(event);
        info!("{text}");
        if let Err(e) = notifier.send(&text).await {
            error!(error = %e, "failed to send Telegram notification");
        }
    }
}

/// Keep the raw response of a zero-proposal cycle for offline inspection.
fn dump_raw_response(itinerary: &str, outcome: &FetchOutcome) {
    info!(%itinerary, path = FALLBACK_ARTIFACT_PATH, "no proposals found, saving raw response");
    if let Err(e) = std::fs::write(FALLBACK_ARTIFACT_PATH, &outcome.raw_initial) {
        warn!(error = %e, "failed to write raw response artifact");
    }
}
