//! Filtering, diffing and configuration — the watcher's core.
//!
//! Each polling cycle takes one itinerary's proposal list, applies the
//! configured filters, and diffs the survivors against the previous
//! cycle's snapshot to decide what is worth a notification.

mod config;
mod diff;
mod filter;

pub use config::{ConfigError, WatchConfig};
pub use diff::{ItineraryCache, OfferEvent, OfferEventKind, OfferKey, diff_cycle};
pub use filter::{FilteredProposal, filter_proposal};
