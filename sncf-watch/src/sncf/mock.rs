//! Mock SNCF client for testing without API access.
//!
//! Loads captured search responses from JSON files and serves them as if
//! they were live API responses. Files are named `{date}.json` (e.g.
//! `2025-06-01.json`) and contain a full `SearchResponse` body.

use std::collections::HashMap;
use std::path::Path;

use super::client::FetchOutcome;
use super::error::SncfError;
use super::types::SearchResponse;

/// Mock SNCF client that serves data from JSON files.
#[derive(Debug, Clone)]
pub struct MockSncfClient {
    /// Raw fixture bodies keyed by date.
    responses: HashMap<String, String>,
}

impl MockSncfClient {
    /// Create a new mock client by loading JSON files from a directory.
    ///
    /// Expects files named `{date}.json` (e.g. `2025-06-01.json`).
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, SncfError> {
        let data_dir = data_dir.as_ref();
        let mut responses = HashMap::new();

        let entries = std::fs::read_dir(data_dir).map_err(|source| SncfError::Io {
            path: data_dir.display().to_string(),
            source,
        })?;

        for entry in entries {
            let entry = entry.map_err(|source| SncfError::Io {
                path: data_dir.display().to_string(),
                source,
            })?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let date = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| SncfError::Template(format!("invalid filename: {path:?}")))?
                .to_string();

            let body = std::fs::read_to_string(&path).map_err(|source| SncfError::Io {
                path: path.display().to_string(),
                source,
            })?;

            // Validate at load time so a broken fixture fails early
            serde_json::from_str::<SearchResponse>(&body).map_err(|e| SncfError::Json {
                message: format!("{}: {e}", path.display()),
                body: None,
            })?;

            responses.insert(date, body);
        }

        if responses.is_empty() {
            return Err(SncfError::Template(format!(
                "no fixture files found in {data_dir:?}"
            )));
        }

        Ok(Self { responses })
    }

    /// Fetch proposals for a date.
    ///
    /// Mirrors `SncfClient::fetch_proposals`, minus the second request:
    /// each fixture stands for the combined result of a cycle.
    pub fn fetch_proposals(&self, date: &str) -> Result<FetchOutcome, SncfError> {
        let body = self.responses.get(date).ok_or_else(|| SncfError::Api {
            status: 404,
            message: format!(
                "no fixture for date {date}. Available: {:?}",
                self.responses.keys().collect::<Vec<_>>()
            ),
        })?;

        let response: SearchResponse =
            serde_json::from_str(body).map_err(|e| SncfError::Json {
                message: e.to_string(),
                body: None,
            })?;

        Ok(FetchOutcome {
            proposals: response.proposals().to_vec(),
            raw_initial: body.clone(),
        })
    }

    /// List available fixture dates.
    pub fn available_dates(&self) -> Vec<&str> {
        self.responses.keys().map(String::as_str).collect()
    }
}
