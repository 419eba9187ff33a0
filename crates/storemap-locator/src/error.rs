use thiserror::Error;

/// Errors from loading the store catalog.
#[derive(Debug, Error)]
pub enum LocatorError {
    #[error("HTTP error fetching catalog: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors returned by a [`crate::MapProvider`].
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-`OK` status such as `ZERO_RESULTS`
    /// or `REQUEST_DENIED`. The status string is kept verbatim.
    #[error("{0}")]
    Status(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured base URL cannot be combined with an endpoint path.
    #[error("invalid provider URL: {0}")]
    InvalidUrl(String),

    /// No provider credentials are configured.
    #[error("map provider is not configured: {0}")]
    NotConfigured(String),

    /// The provider returned coordinates that fail validation.
    #[error("provider returned an invalid position: {0}")]
    InvalidPosition(#[from] storemap_core::CoreError),
}

impl ProviderError {
    /// The text shown to the user after a failed request.
    ///
    /// Status errors surface the provider's status verbatim.
    #[must_use]
    pub fn status_text(&self) -> String {
        match self {
            ProviderError::Status(status) => status.clone(),
            other => other.to_string(),
        }
    }
}
