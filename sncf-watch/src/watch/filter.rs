//! Per-proposal filtering.
//!
//! Filtering runs before any diffing: a proposal that fails here
//! contributes nothing to the cache or to notifications.

use crate::domain::{departs_before, parse_price};
use crate::sncf::{ArrivalInfo, DepartureInfo, Offer, Proposal};

use super::config::WatchConfig;

/// A proposal that passed filtering, with only its surviving offers.
///
/// This is both the unit the diff engine compares and the snapshot the
/// cache stores.
#[derive(Debug, Clone)]
pub struct FilteredProposal {
    pub travel_id: String,
    pub departure: DepartureInfo,
    pub arrival: ArrivalInfo,
    pub duration_label: String,
    pub transporter_description: String,

    /// Offers that passed the price ceiling, in comfort-class order.
    pub offers: Vec<Offer>,
}

/// Apply the configured filters to one proposal.
///
/// Returns `None` when the proposal is discarded:
/// - direct-only is set and the transport description does not mention
///   "direct" (case-insensitive),
/// - the departure time label is before the configured minimum,
/// - no offer survives the price ceiling (unparseable price labels count
///   as failing it).
pub fn filter_proposal(proposal: &Proposal, config: &WatchConfig) -> Option<FilteredProposal> {
    if config.train_type_direct_only
        && !proposal
            .transporter_description
            .to_lowercase()
            .contains("direct")
    {
        return None;
    }

    if departs_before(
        &proposal.departure.time_label,
        &config.minimum_departure_time,
    ) {
        return None;
    }

    let max_price = f64::from(config.maximum_ticket_price);
    let offers: Vec<Offer> = proposal
        .all_offers()
        .filter(|offer| parse_price(&offer.price_label).is_some_and(|price| price <= max_price))
        .cloned()
        .collect();

    if offers.is_empty() {
        return None;
    }

    Some(FilteredProposal {
        travel_id: proposal.travel_id.clone(),
        departure: proposal.departure.clone(),
        arrival: proposal.arrival.clone(),
        duration_label: proposal.duration_label.clone(),
        transporter_description: proposal.transporter_description.clone(),
        offers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sncf::{ComfortClass, OfferGroup};

    fn config() -> WatchConfig {
        WatchConfig {
            seconds_between_each_request: 1,
            seconds_between_each_batch: 1,
            dates_to_search: vec!["2025-06-01".to_string()],
            minimum_departure_time: "06:00".to_string(),
            train_type_direct_only: true,
            maximum_ticket_price: 50,
        }
    }

    fn offer(price_label: &str, title: &str, class: &str) -> Offer {
        Offer {
            id: None,
            comfort_class: ComfortClass {
                label: class.to_string(),
            },
            price_label: price_label.to_string(),
            title: title.to_string(),
        }
    }

    fn proposal(
        travel_id: &str,
        time_label: &str,
        transporter: &str,
        second_class: Vec<Offer>,
    ) -> Proposal {
        Proposal {
            id: None,
            travel_id: travel_id.to_string(),
            departure: DepartureInfo {
                origin_station_label: "Paris Gare de Lyon".to_string(),
                time_label: time_label.to_string(),
                date_label: "dim. 1 juin".to_string(),
            },
            arrival: ArrivalInfo {
                destination_station_label: "Lyon Part Dieu".to_string(),
                time_label: "10:26".to_string(),
                date_label: "dim. 1 juin".to_string(),
            },
            duration_label: "1h56".to_string(),
            transporter_description: transporter.to_string(),
            first_comfort_class_offers: None,
            second_comfort_class_offers: Some(OfferGroup {
                offers: second_class,
            }),
        }
    }

    #[test]
    fn direct_proposal_with_affordable_offer_passes() {
        let p = proposal(
            "t1",
            "08:30",
            "TGV INOUI - Direct",
            vec![offer("45,00 €", "Seconde", "2de classe")],
        );

        let filtered = filter_proposal(&p, &config()).unwrap();
        assert_eq!(filtered.travel_id, "t1");
        assert_eq!(filtered.offers.len(), 1);
    }

    #[test]
    fn non_direct_discarded_when_direct_only() {
        let p = proposal(
            "t1",
            "08:30",
            "TER + TGV, 1 correspondance",
            vec![offer("45,00 €", "Seconde", "2de classe")],
        );

        assert!(filter_proposal(&p, &config()).is_none());
    }

    #[test]
    fn direct_match_is_case_insensitive() {
        let p = proposal(
            "t1",
            "08:30",
            "ouigo - DIRECT",
            vec![offer("45,00 €", "Seconde", "2de classe")],
        );

        assert!(filter_proposal(&p, &config()).is_some());
    }

    #[test]
    fn non_direct_kept_when_direct_only_unset() {
        let mut config = config();
        config.train_type_direct_only = false;

        let p = proposal(
            "t1",
            "08:30",
            "TER + TGV, 1 correspondance",
            vec![offer("45,00 €", "Seconde", "2de classe")],
        );

        assert!(filter_proposal(&p, &config).is_some());
    }

    #[test]
    fn early_departure_discarded() {
        let p = proposal(
            "t1",
            "05:45",
            "TGV INOUI - Direct",
            vec![offer("45,00 €", "Seconde", "2de classe")],
        );

        assert!(filter_proposal(&p, &config()).is_none());
    }

    #[test]
    fn departure_at_minimum_kept() {
        let p = proposal(
            "t1",
            "06:00",
            "TGV INOUI - Direct",
            vec![offer("45,00 €", "Seconde", "2de classe")],
        );

        assert!(filter_proposal(&p, &config()).is_some());
    }

    #[test]
    fn overpriced_offers_dropped_but_proposal_kept() {
        let p = proposal(
            "t1",
            "08:30",
            "TGV INOUI - Direct",
            vec![
                offer("45,00 €", "Seconde", "2de classe"),
                offer("89,00 €", "Flex", "2de classe"),
            ],
        );

        let filtered = filter_proposal(&p, &config()).unwrap();
        assert_eq!(filtered.offers.len(), 1);
        assert_eq!(filtered.offers[0].price_label, "45,00 €");
    }

    #[test]
    fn proposal_with_no_surviving_offer_discarded() {
        let p = proposal(
            "t1",
            "08:30",
            "TGV INOUI - Direct",
            vec![offer("89,00 €", "Flex", "2de classe")],
        );

        assert!(filter_proposal(&p, &config()).is_none());
    }

    #[test]
    fn unparseable_price_fails_the_ceiling() {
        let p = proposal(
            "t1",
            "08:30",
            "TGV INOUI - Direct",
            vec![
                offer("Complet", "Seconde", "2de classe"),
                offer("45,00 €", "Seconde", "2de classe"),
            ],
        );

        let filtered = filter_proposal(&p, &config()).unwrap();
        assert_eq!(filtered.offers.len(), 1);
        assert_eq!(filtered.offers[0].price_label, "45,00 €");
    }

    #[test]
    fn offer_exactly_at_ceiling_survives() {
        let p = proposal(
            "t1",
            "08:30",
            "TGV INOUI - Direct",
            vec![offer("50,00 €", "Seconde", "2de classe")],
        );

        assert!(filter_proposal(&p, &config()).is_some());
    }

    #[test]
    fn offers_from_both_classes_collected() {
        let mut p = proposal(
            "t1",
            "08:30",
            "TGV INOUI - Direct",
            vec![offer("45,00 €", "Seconde", "2de classe")],
        );
        p.first_comfort_class_offers = Some(OfferGroup {
            offers: vec![offer("49,00 €", "Première", "1re classe")],
        });

        let filtered = filter_proposal(&p, &config()).unwrap();
        assert_eq!(filtered.offers.len(), 2);
        // First class group comes first
        assert_eq!(filtered.offers[0].comfort_class.label, "1re classe");
    }
}
