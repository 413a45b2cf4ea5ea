//! Parsing primitives shared across the watcher.
//!
//! SNCF Connect is a consumer-facing API: prices and times arrive as display
//! labels, not structured values. These modules turn the labels into
//! comparable values while staying tolerant of anything unexpected.

mod price;
mod time;

pub use price::parse_price;
pub use time::{departs_before, parse_hhmm};
