use std::path::PathBuf;

/// Client-specific result type
pub type Result<T> = std::result::Result<T, ScribeClientError>;

/// Errors from the scribe client and its HTTP transport
#[derive(Debug, thiserror::Error)]
pub enum ScribeClientError {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with a non-success status
    #[error("service returned {status}: {detail}")]
    Api {
        /// HTTP status code
        status: u16,
        /// The service's `detail` message, or the raw body
        detail: String,
    },

    /// Audio file could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// Path handed to the upload
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Failed to decode a response body
    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),
}
