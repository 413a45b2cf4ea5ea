//! Offer diffing across polling cycles.
//!
//! This is the piece of the watcher with real state: given one itinerary's
//! proposal list for the current cycle, decide which offers are newly
//! visible since the previous cycle and should trigger a notification.
//!
//! The cache invariant: for each itinerary, the cache holds exactly the
//! proposals that passed filtering in the most recent cycle, each with
//! only its surviving offers. The per-itinerary map is replaced wholesale
//! at the end of every cycle, so proposals that vanish or stop passing the
//! filter are dropped silently.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::sncf::{Offer, Proposal};

use super::config::WatchConfig;
use super::filter::{FilteredProposal, filter_proposal};

/// Stable identity for an offer across requests.
///
/// Offer ids are not stable across requests for the same logical offer, so
/// identity is derived from observable fields. Two textually identical
/// offers are treated as the same offer even if they are distinct
/// inventory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OfferKey {
    price_label: String,
    title: String,
}

impl OfferKey {
    /// Derive the key for an offer.
    pub fn of(offer: &Offer) -> Self {
        Self {
            price_label: offer.price_label.clone(),
            title: offer.title.clone(),
        }
    }
}

/// Kind of notification an event represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferEventKind {
    /// First time this travel id is seen passing the filters.
    NewProposal,

    /// A known travel id gained offers not present in the cached snapshot.
    UpdatedProposal,
}

/// One notification-worthy change detected during a cycle.
#[derive(Debug, Clone)]
pub struct OfferEvent {
    /// Itinerary cache key, e.g. "Paris-Lyon on 2025-06-01".
    pub itinerary: String,

    pub kind: OfferEventKind,

    /// The proposal the offers belong to (full surviving snapshot).
    pub proposal: FilteredProposal,

    /// The offers to announce: all surviving offers for a new proposal,
    /// only the newly appeared ones for an update.
    pub new_offers: Vec<Offer>,
}

/// Process-lifetime cache of the last-seen snapshot per itinerary.
///
/// Owned state passed into [`diff_cycle`] by the caller; there is no
/// global. Created empty at process start.
#[derive(Debug, Default)]
pub struct ItineraryCache {
    itineraries: HashMap<String, HashMap<String, FilteredProposal>>,
}

impl ItineraryCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached snapshot for a travel id within an itinerary, if any.
    pub fn proposal(&self, itinerary: &str, travel_id: &str) -> Option<&FilteredProposal> {
        self.itineraries.get(itinerary)?.get(travel_id)
    }

    /// Number of cached proposals for an itinerary.
    pub fn proposal_count(&self, itinerary: &str) -> usize {
        self.itineraries.get(itinerary).map_or(0, HashMap::len)
    }
}

/// Run one diff cycle for an itinerary.
///
/// Filters `proposals`, compares the survivors against the cached snapshot
/// from the previous cycle, and returns the notification events. The
/// itinerary's cache entry is replaced wholesale with this cycle's
/// survivors before returning.
pub fn diff_cycle(
    cache: &mut ItineraryCache,
    itinerary: &str,
    proposals: &[Proposal],
    config: &WatchConfig,
) -> Vec<OfferEvent> {
    let previous = cache.itineraries.get(itinerary);

    let mut next: HashMap<String, FilteredProposal> = HashMap::new();
    let mut events = Vec::new();

    for proposal in proposals {
        let Some(filtered) = filter_proposal(proposal, config) else {
            continue;
        };

        match previous.and_then(|snapshot| snapshot.get(&filtered.travel_id)) {
            None => {
                debug!(
                    itinerary,
                    travel_id = %filtered.travel_id,
                    offers = filtered.offers.len(),
                    "new proposal"
                );
                events.push(OfferEvent {
                    itinerary: itinerary.to_string(),
                    kind: OfferEventKind::NewProposal,
                    new_offers: filtered.offers.clone(),
                    proposal: filtered.clone(),
                });
            }
            Some(cached) => {
                let seen: HashSet<OfferKey> = cached.offers.iter().map(OfferKey::of).collect();
                let new_offers: Vec<Offer> = filtered
                    .offers
                    .iter()
                    .filter(|offer| !seen.contains(&OfferKey::of(offer)))
                    .cloned()
                    .collect();

                if !new_offers.is_empty() {
                    debug!(
                        itinerary,
                        travel_id = %filtered.travel_id,
                        offers = new_offers.len(),
                        "new offers on known proposal"
                    );
                    events.push(OfferEvent {
                        itinerary: itinerary.to_string(),
                        kind: OfferEventKind::UpdatedProposal,
                        new_offers,
                        proposal: filtered.clone(),
                    });
                }
            }
        }

        next.insert(filtered.travel_id.clone(), filtered);
    }

    cache.itineraries.insert(itinerary.to_string(), next);
    events
}
