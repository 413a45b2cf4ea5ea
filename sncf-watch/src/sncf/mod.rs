//! SNCF Connect BFF (backend-for-frontend) client.
//!
//! This module talks to the itinerary search API behind sncf-connect.com.
//!
//! Key characteristics of the BFF:
//! - It is a consumer API: prices, times and durations are display labels,
//!   not structured values.
//! - Responses come in two shapes: long-distance searches nest proposals
//!   under a `longDistance` section, others put them at top level.
//! - Pagination needs an `itineraryId` from the initial response and a
//!   separate `POST /itineraries/more` call.
//! - Request payloads and headers are captured browser artifacts supplied
//!   as JSON template files, not constructed from scratch.

mod client;
mod error;
mod mock;
mod payload;
mod types;

pub use client::{FetchOutcome, SncfClient, SncfConfig};
pub use error::SncfError;
pub use mock::MockSncfClient;
pub use payload::PayloadTemplates;
pub use types::{
    ArrivalInfo, ComfortClass, DepartureInfo, LongDistanceSection, Offer, OfferGroup, Proposal,
    ProposalsWrapper, ResponseShape, SearchResponse,
};
