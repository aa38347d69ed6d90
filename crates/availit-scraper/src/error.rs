use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid CSS selector \"{selector}\": {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("source {source_key} yielded no records from {url}")]
    EmptyExtraction { source_key: String, url: String },
}

impl ScraperError {
    /// `true` when the outbound request ran past the configured timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, ScraperError::Http(e) if e.is_timeout())
    }
}
