//! Error types for rs-blogscrape.
//!
//! Most pipeline entry points degrade to `None` or an empty list instead of
//! returning these; they surface from the transport, configuration, export,
//! and the fallible marker walk.

/// Error type for scraping and extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The transport failed before a response was received.
    #[error("HTTP request to {url} failed: {message}")]
    Http {
        url: String,
        message: String,
        /// Whether the failure was a timeout.
        timeout: bool,
    },

    /// The server answered with a non-success status.
    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// A URL could not be parsed or made absolute.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration could not be loaded or is inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Writing exported files failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Keyword rankings could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The marker walk could not linearize a subtree.
    #[error("Extraction failed: {0}")]
    Extraction(String),
}

/// Result type alias for scraping operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_url_mentions_input() {
        let err = Error::InvalidUrl("relative URL without a base: search".into());
        assert_eq!(err.to_string(), "Invalid URL: relative URL without a base: search");
    }

    #[test]
    fn status_error_mentions_code() {
        let err = Error::Status { status: 404, url: "https://blog.naver.com/x".into() };
        assert_eq!(err.to_string(), "HTTP 404 for https://blog.naver.com/x");
    }
}
