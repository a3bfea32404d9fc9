//! Error types for EDSM API operations.

use thiserror::Error;

/// Errors that can occur during EDSM API operations.
#[derive(Debug, Error)]
pub enum EdsmError {
    /// The upstream answered with the empty-object sentinel: no such entity.
    #[error("no match from '{endpoint}': EDSM returned an empty object")]
    NotFound {
        /// Endpoint path that produced the empty response.
        endpoint: String,
    },

    /// API request failed with a non-success status.
    #[error("EDSM API error: {message}")]
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Query string encoding error.
    #[error("failed to encode query parameters: {0}")]
    QueryError(#[from] serde_urlencoded::ser::Error),

    /// Cache I/O error.
    #[error("cache I/O error: {0}")]
    CacheError(#[from] std::io::Error),

    /// Rate limited.
    #[error("rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },
}

impl EdsmError {
    /// True for the "empty object" response, so callers can treat a missing
    /// entity differently from a failed request.
    pub fn is_not_found(&self) -> bool {
        matches!(self, EdsmError::NotFound { .. })
    }
}

/// Result type alias for EDSM operations.
pub type Result<T> = core::result::Result<T, EdsmError>;
