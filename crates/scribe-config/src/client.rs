use serde::Deserialize;
use url::Url;

/// Address of a transcription service running on the local machine
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Transcription service client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Base URL of the transcription service
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    /// `User-Agent` header sent with every request
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: None,
        }
    }
}

/// Parsed form of [`DEFAULT_BASE_URL`]
///
/// # Panics
///
/// Never in practice; the constant is a valid absolute URL
pub fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("default base URL must be valid")
}
