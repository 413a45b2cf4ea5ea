//! SNCF client error types.

/// Errors from the SNCF Connect HTTP client and payload handling.
#[derive(Debug, thiserror::Error)]
pub enum SncfError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        /// Truncated response body, kept for logging.
        body: Option<String>,
    },

    /// A payload template is missing or malformed
    #[error("payload template error: {0}")]
    Template(String),

    /// A request header from headers.json is not a valid HTTP header
    #[error("invalid request header {0}")]
    Header(String),

    /// Failed to read a template or fixture file
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SncfError::Api {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");

        let err = SncfError::Json {
            message: "expected string".into(),
            body: Some("{}".into()),
        };
        assert!(err.to_string().contains("JSON parse error"));
        assert!(err.to_string().contains("expected string"));

        let err = SncfError::Template("schedule.outward.date missing".into());
        assert!(err.to_string().contains("schedule.outward.date"));
    }
}
