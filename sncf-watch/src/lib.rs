//! SNCF Connect offer watcher.
//!
//! Polls the itinerary search behind sncf-connect.com for configured
//! dates, filters proposals against price/time/directness criteria, diffs
//! them against the previous cycle's snapshot, and sends a Telegram
//! message for every newly visible offer.

pub mod domain;
pub mod notify;
pub mod scheduler;
pub mod sncf;
pub mod watch;
