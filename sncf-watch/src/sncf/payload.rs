//! Externally supplied request payload templates.
//!
//! The search payloads are too large and too churn-prone to hardcode, so
//! they live on disk next to the config: `payload.json` (base search),
//! `payload_more.json` (pagination) and `headers.json` (request headers,
//! captured from a browser session). This module loads them and performs
//! the two per-request mutations the watcher needs: rewriting the outward
//! date for each searched day, and injecting the itinerary id into the
//! pagination payload.

use std::collections::HashMap;
use std::path::Path;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;

use super::error::SncfError;

/// Loaded payload templates for one origin-destination search.
#[derive(Debug, Clone)]
pub struct PayloadTemplates {
    base: Value,
    more: Value,
    headers: HashMap<String, String>,
}

impl PayloadTemplates {
    /// Load `payload.json`, `payload_more.json` and `headers.json` from a
    /// directory.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, SncfError> {
        let dir = dir.as_ref();

        Ok(Self {
            base: read_json(&dir.join("payload.json"))?,
            more: read_json(&dir.join("payload_more.json"))?,
            headers: serde_json::from_value(read_json(&dir.join("headers.json"))?).map_err(
                |e| SncfError::Template(format!("headers.json is not a string map: {e}")),
            )?,
        })
    }

    /// Build templates from already-parsed values (used by tests).
    pub fn from_values(base: Value, more: Value, headers: HashMap<String, String>) -> Self {
        Self {
            base,
            more,
            headers,
        }
    }

    /// The human-readable base itinerary name, `"{origin}-{destination}"`.
    ///
    /// Per-date itinerary cache keys append `" on {date}"` to this.
    pub fn base_itinerary_name(&self) -> Result<String, SncfError> {
        let origin = self
            .base
            .pointer("/mainJourney/origin/label")
            .and_then(Value::as_str)
            .ok_or_else(|| SncfError::Template("mainJourney.origin.label missing".into()))?;
        let destination = self
            .base
            .pointer("/mainJourney/destination/label")
            .and_then(Value::as_str)
            .ok_or_else(|| SncfError::Template("mainJourney.destination.label missing".into()))?;

        Ok(format!("{origin}-{destination}"))
    }

    /// The base search payload with `schedule.outward.date` rewritten to the
    /// given date, preserving the template's time-of-day component.
    pub fn payload_for_date(&self, date: &str) -> Result<Value, SncfError> {
        let mut payload = self.base.clone();

        let slot = payload
            .pointer_mut("/schedule/outward/date")
            .ok_or_else(|| SncfError::Template("schedule.outward.date missing".into()))?;
        let current = slot
            .as_str()
            .ok_or_else(|| SncfError::Template("schedule.outward.date is not a string".into()))?;
        let (_, time_part) = current.split_once('T').ok_or_else(|| {
            SncfError::Template(format!(
                "schedule.outward.date has no time component: {current}"
            ))
        })?;

        *slot = Value::String(format!("{date}T{time_part}"));
        Ok(payload)
    }

    /// The pagination payload with the itinerary id injected.
    pub fn more_payload(&self, itinerary_id: &str) -> Value {
        let mut payload = self.more.clone();
        if let Some(object) = payload.as_object_mut() {
            object.insert(
                "itineraryId".to_string(),
                Value::String(itinerary_id.to_string()),
            );
        }
        payload
    }

    /// The request headers as a reqwest header map.
    pub fn header_map(&self) -> Result<HeaderMap, SncfError> {
        let mut map = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| SncfError::Header(name.clone()))?;
            let value =
                HeaderValue::from_str(value).map_err(|_| SncfError::Header(name.to_string()))?;
            map.insert(name, value);
        }
        Ok(map)
    }
}

fn read_json(path: &Path) -> Result<Value, SncfError> {
    let content = std::fs::read_to_string(path).map_err(|source| SncfError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&content)
        .map_err(|e| SncfError::Template(format!("{}: {e}", path.display())))
}
