//! SNCF Connect BFF HTTP client.
//!
//! Two endpoints matter: `POST /itineraries` (initial search) and
//! `POST /itineraries/more` (pagination, which requires an itinerary id
//! taken from the first response). One fetch for an itinerary/date runs
//! both sequentially, with a pause between them.

use std::time::Duration;

use serde_json::Value;
use tracing::{info, warn};

use super::error::SncfError;
use super::payload::PayloadTemplates;
use super::types::{Proposal, SearchResponse};

/// Default base URL for the SNCF Connect BFF.
const DEFAULT_BASE_URL: &str = "https://www.sncf-connect.com/bff/api/v1";

/// Pause between the initial search and the "more results" request.
const MORE_RESULTS_PAUSE: Duration = Duration::from_secs(5);

/// Configuration for the SNCF client.
#[derive(Debug, Clone)]
pub struct SncfConfig {
    /// Base URL for the API (defaults to production SNCF Connect).
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl SncfConfig {
    /// Create a config with production defaults.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for SncfConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything one itinerary/date fetch produced.
#[derive(Debug)]
pub struct FetchOutcome {
    /// Proposals from the initial response followed by the "more" response.
    pub proposals: Vec<Proposal>,

    /// Raw body of the initial response, kept so a zero-proposal cycle can
    /// dump it to disk for offline inspection.
    pub raw_initial: String,
}

/// SNCF Connect API client.
#[derive(Debug, Clone)]
pub struct SncfClient {
    http: reqwest::Client,
    base_url: String,
}

impl SncfClient {
    /// Create a new client with the given configuration.
    pub fn new(config: SncfConfig) -> Result<Self, SncfError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// `POST /itineraries` — initial search.
    pub async fn search(
        &self,
        payload: &Value,
        templates: &PayloadTemplates,
    ) -> Result<SearchResponse, SncfError> {
        let (response, _) = self.post_raw("itineraries", payload, templates).await?;
        Ok(response)
    }

    /// `POST /itineraries/more` — pagination.
    pub async fn more_results(
        &self,
        payload: &Value,
        templates: &PayloadTemplates,
    ) -> Result<SearchResponse, SncfError> {
        let (response, _) = self
            .post_raw("itineraries/more", payload, templates)
            .await?;
        Ok(response)
    }

    /// Run both requests for one itinerary/date.
    ///
    /// The "more results" request only happens when the initial response
    /// carried an itinerary id. A failure there degrades to the initial
    /// proposals rather than failing the whole fetch; a failure of the
    /// initial request is an error.
    pub async fn fetch_proposals(
        &self,
        templates: &PayloadTemplates,
        date: &str,
    ) -> Result<FetchOutcome, SncfError> {
        let payload = templates.payload_for_date(date)?;
        let (initial, raw_initial) = self.post_raw("itineraries", &payload, templates).await?;

        let mut proposals = initial.proposals().to_vec();
        info!(
            date,
            count = proposals.len(),
            "initial search returned proposals"
        );

        if let Some(itinerary_id) = initial.itinerary_id() {
            tokio::time::sleep(MORE_RESULTS_PAUSE).await;

            let more_payload = templates.more_payload(itinerary_id);
            match self.more_results(&more_payload, templates).await {
                Ok(more) => {
                    let more_proposals = more.proposals();
                    info!(
                        date,
                        count = more_proposals.len(),
                        "more-results request returned proposals"
                    );
                    proposals.extend(more_proposals.iter().cloned());
                }
                Err(e) => {
                    warn!(date, error = %e, "more-results request failed, keeping initial proposals");
                }
            }
        }

        Ok(FetchOutcome {
            proposals,
            raw_initial,
        })
    }

    /// POST a JSON payload and parse the response, returning the raw body
    /// alongside the parsed form.
    async fn post_raw(
        &self,
        path: &str,
        payload: &Value,
        templates: &PayloadTemplates,
    ) -> Result<(SearchResponse, String), SncfError> {
        let url = format!("{}/{}", self.base_url, path);

        let response = self
            .http
            .post(&url)
            .headers(templates.header_map()?)
            .json(payload)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SncfError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| SncfError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        Ok((parsed, body))
    }
}
