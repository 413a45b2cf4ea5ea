//! SNCF Connect BFF API response DTOs.
//!
//! These types map directly to the JSON returned by the itinerary search
//! endpoints. They use `Option` liberally because the BFF omits fields
//! rather than sending nulls, and because the same endpoints serve several
//! response shapes: long-distance searches nest their proposals under a
//! `longDistance` section while other searches return them at top level.

use serde::Deserialize;

/// A priced ticket option within a [`Proposal`], grouped by comfort class.
///
/// Offer `id`s are not stable across requests for the same logical offer;
/// diffing derives identity from `(price_label, title)` instead.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    /// Ephemeral offer id. Not stable across requests.
    pub id: Option<String>,

    /// Fare tier this offer belongs to.
    pub comfort_class: ComfortClass,

    /// Free-text price label, e.g. "45,00 €".
    pub price_label: String,

    /// Offer title, e.g. the fare name.
    pub title: String,
}

/// Fare tier label (e.g. "1re classe", "2de classe").
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComfortClass {
    pub label: String,
}

/// Wrapper the BFF uses around each comfort class's offer list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferGroup {
    pub offers: Vec<Offer>,
}

/// Departure leg of a proposal.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartureInfo {
    pub origin_station_label: String,

    /// Time-of-day display label, "HH:MM".
    pub time_label: String,

    /// Date display label.
    pub date_label: String,
}

/// Arrival leg of a proposal.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrivalInfo {
    pub destination_station_label: String,
    pub time_label: String,
    pub date_label: String,
}

/// One journey option returned by the search.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    /// Response-local proposal id.
    pub id: Option<String>,

    /// Stable identifier for the underlying journey. This is the key the
    /// cache is organised around.
    pub travel_id: String,

    pub departure: DepartureInfo,

    pub arrival: ArrivalInfo,

    /// Journey duration display label.
    pub duration_label: String,

    /// Transport description, e.g. "TGV INOUI - Direct".
    pub transporter_description: String,

    /// First-class offers, when any exist.
    pub first_comfort_class_offers: Option<OfferGroup>,

    /// Second-class offers, when any exist.
    pub second_comfort_class_offers: Option<OfferGroup>,
}

impl Proposal {
    /// All offers across both comfort-class groups, first class first.
    pub fn all_offers(&self) -> impl Iterator<Item = &Offer> {
        self.first_comfort_class_offers
            .iter()
            .chain(self.second_comfort_class_offers.iter())
            .flat_map(|group| group.offers.iter())
    }
}

/// Long-distance section of a search response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LongDistanceSection {
    pub itinerary_id: Option<String>,
    pub proposals: Option<ProposalsWrapper>,
}

/// The BFF double-nests long-distance proposals.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalsWrapper {
    pub proposals: Vec<Proposal>,
}

/// Raw response from `POST /itineraries` or `POST /itineraries/more`.
///
/// Use [`SearchResponse::shape`] to resolve which of the two layouts this
/// particular response uses, or the [`SearchResponse::proposals`] and
/// [`SearchResponse::itinerary_id`] accessors which apply the fallback
/// order directly.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Itinerary id at top level (non-long-distance shape).
    pub itinerary_id: Option<String>,

    /// Long-distance section, when present.
    pub long_distance: Option<LongDistanceSection>,

    /// Proposals at top level (non-long-distance shape).
    pub proposals: Option<Vec<Proposal>>,
}

/// Where a response keeps its proposals.
///
/// The fallback order is fixed: a populated long-distance section wins over
/// top-level proposals.
#[derive(Debug)]
pub enum ResponseShape<'a> {
    /// Proposals nested under `longDistance.proposals.proposals`.
    LongDistance(&'a [Proposal]),

    /// Proposals at the top level of the response.
    TopLevel(&'a [Proposal]),

    /// No proposals in either position.
    Empty,
}

impl SearchResponse {
    /// Resolve which layout this response uses.
    pub fn shape(&self) -> ResponseShape<'_> {
        if let Some(wrapper) = self
            .long_distance
            .as_ref()
            .and_then(|ld| ld.proposals.as_ref())
        {
            return ResponseShape::LongDistance(&wrapper.proposals);
        }
        match self.proposals.as_deref() {
            Some(proposals) => ResponseShape::TopLevel(proposals),
            None => ResponseShape::Empty,
        }
    }

    /// The response's proposals, wherever they are nested.
    pub fn proposals(&self) -> &[Proposal] {
        match self.shape() {
            ResponseShape::LongDistance(p) | ResponseShape::TopLevel(p) => p,
            ResponseShape::Empty => &[],
        }
    }

    /// The itinerary id needed for the "more results" request, if any.
    ///
    /// Top-level id wins over the long-distance section's id.
    pub fn itinerary_id(&self) -> Option<&str> {
        self.itinerary_id
            .as_deref()
            .or_else(|| self.long_distance.as_ref()?.itinerary_id.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_long_distance_response() {
        let json = r#"{
            "longDistance": {
                "itineraryId": "it-123",
                "proposals": {
                    "proposals": [
                        {
                            "id": "p1",
                            "travelId": "travel-1",
                            "departure": {
                                "originStationLabel": "Paris Gare de Lyon",
                                "timeLabel": "08:30",
                                "dateLabel": "dim. 1 juin"
                            },
                            "arrival": {
                                "destinationStationLabel": "Lyon Part Dieu",
                                "timeLabel": "10:26",
                                "dateLabel": "dim. 1 juin"
                            },
                            "durationLabel": "1h56",
                            "transporterDescription": "TGV INOUI - Direct",
                            "secondComfortClassOffers": {
                                "offers": [
                                    {
                                        "id": "o1",
                                        "comfortClass": {"label": "2de classe"},
                                        "priceLabel": "45,00 €",
                                        "title": "Seconde"
                                    }
                                ]
                            }
                        }
                    ]
                }
            }
        }"#;

        let response: SearchResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.itinerary_id(), Some("it-123"));
        assert!(matches!(response.shape(), ResponseShape::LongDistance(_)));

        let proposals = response.proposals();
        assert_eq!(proposals.len(), 1);
        assert_eq!(proposals[0].travel_id, "travel-1");
        assert_eq!(proposals[0].departure.time_label, "08:30");
        assert_eq!(proposals[0].all_offers().count(), 1);
    }

    #[test]
    fn deserialize_top_level_response() {
        let json = r#"{
            "itineraryId": "it-456",
            "proposals": [
                {
                    "travelId": "travel-2",
                    "departure": {
                        "originStationLabel": "Paris",
                        "timeLabel": "09:00",
                        "dateLabel": "lun. 2 juin"
                    },
                    "arrival": {
                        "destinationStationLabel": "Lyon",
                        "timeLabel": "11:00",
                        "dateLabel": "lun. 2 juin"
                    },
                    "durationLabel": "2h00",
                    "transporterDescription": "OUIGO - Direct"
                }
            ]
        }"#;

        let response: SearchResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.itinerary_id(), Some("it-456"));
        assert!(matches!(response.shape(), ResponseShape::TopLevel(_)));
        assert_eq!(response.proposals().len(), 1);

        // No offer groups at all: zero offers, not an error
        assert_eq!(response.proposals()[0].all_offers().count(), 0);
    }

    #[test]
    fn long_distance_wins_over_top_level() {
        let json = r#"{
            "proposals": [],
            "longDistance": {
                "proposals": {"proposals": []}
            }
        }"#;

        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(response.shape(), ResponseShape::LongDistance(_)));
    }

    #[test]
    fn empty_response_has_empty_shape() {
        let response: SearchResponse = serde_json::from_str("{}").unwrap();

        assert!(matches!(response.shape(), ResponseShape::Empty));
        assert!(response.proposals().is_empty());
        assert_eq!(response.itinerary_id(), None);
    }

    #[test]
    fn itinerary_id_falls_back_to_long_distance() {
        let json = r#"{
            "longDistance": {"itineraryId": "it-789"}
        }"#;

        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.itinerary_id(), Some("it-789"));
    }

    #[test]
    fn offers_flatten_first_class_first() {
        let json = r#"{
            "travelId": "travel-3",
            "departure": {
                "originStationLabel": "Paris",
                "timeLabel": "10:00",
                "dateLabel": "mar. 3 juin"
            },
            "arrival": {
                "destinationStationLabel": "Marseille",
                "timeLabel": "13:05",
                "dateLabel": "mar. 3 juin"
            },
            "durationLabel": "3h05",
            "transporterDescription": "TGV INOUI - Direct",
            "firstComfortClassOffers": {
                "offers": [
                    {
                        "comfortClass": {"label": "1re classe"},
                        "priceLabel": "89,00 €",
                        "title": "Première"
                    }
                ]
            },
            "secondComfortClassOffers": {
                "offers": [
                    {
                        "comfortClass": {"label": "2de classe"},
                        "priceLabel": "45,00 €",
                        "title": "Seconde"
                    }
                ]
            }
        }"#;

        let proposal: Proposal = serde_json::from_str(json).unwrap();

        let labels: Vec<&str> = proposal
            .all_offers()
            .map(|o| o.comfort_class.label.as_str())
            .collect();
        assert_eq!(labels, vec!["1re classe", "2de classe"]);
    }
}
