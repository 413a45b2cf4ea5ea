//! Watcher configuration.
//!
//! Settings live in a flat `key=value` text file so they can be edited
//! while the watcher runs: the scheduler re-reads the file at the start of
//! every batch, so changes take effect without a restart.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Errors from reading or parsing the config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Could not read the config file
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A recognised key is absent
    #[error("missing config key: {0}")]
    MissingKey(&'static str),

    /// A key is present but its value does not parse
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Immutable per-batch snapshot of the filter and timing settings.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchConfig {
    /// Pause between consecutive date searches within a batch.
    pub seconds_between_each_request: u64,

    /// Pause between batches.
    pub seconds_between_each_batch: u64,

    /// Outward dates to search, as `YYYY-MM-DD` strings.
    pub dates_to_search: Vec<String>,

    /// Proposals departing before this "HH:MM" label are discarded.
    pub minimum_departure_time: String,

    /// When set, only proposals whose transport description mentions
    /// "direct" are considered.
    pub train_type_direct_only: bool,

    /// Offers priced above this (euros) are discarded.
    pub maximum_ticket_price: u32,
}

impl WatchConfig {
    /// Load and parse the config file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse config file contents.
    ///
    /// Lines without an `=` are ignored; whitespace around keys and values
    /// is trimmed. Unknown keys are ignored so the file can carry comments
    /// of the `# note` variety as long as they contain no `=`.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut values: HashMap<&str, &str> = HashMap::new();
        for line in content.lines() {
            if let Some((key, value)) = line.split_once('=') {
                values.insert(key.trim(), value.trim());
            }
        }

        let dates_to_search = require(&values, "dates_to_search")?
            .split(',')
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            seconds_between_each_request: parse_u64(&values, "seconds_between_each_request")?,
            seconds_between_each_batch: parse_u64(&values, "seconds_between_each_batch")?,
            dates_to_search,
            minimum_departure_time: require(&values, "minimum_departure_time")?.to_string(),
            train_type_direct_only: require(&values, "train_type_direct_only")? == "true",
            maximum_ticket_price: parse_u32(&values, "maximum_ticket_price")?,
        })
    }

    /// Pause between date searches.
    pub fn request_pause(&self) -> Duration {
        Duration::from_secs(self.seconds_between_each_request)
    }

    /// Pause between batches.
    pub fn batch_pause(&self) -> Duration {
        Duration::from_secs(self.seconds_between_each_batch)
    }
}

fn require<'a>(
    values: &HashMap<&str, &'a str>,
    key: &'static str,
) -> Result<&'a str, ConfigError> {
    values.get(key).copied().ok_or(ConfigError::MissingKey(key))
}

fn parse_u64(values: &HashMap<&str, &str>, key: &'static str) -> Result<u64, ConfigError> {
    let raw = require(values, key)?;
    raw.parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}

fn parse_u32(values: &HashMap<&str, &str>, key: &'static str) -> Result<u32, ConfigError> {
    let raw = require(values, key)?;
    raw.parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}
