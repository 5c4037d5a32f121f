use std::path::PathBuf;

use http::Method;
use scribe_config::ClientConfig;
use url::Url;

use crate::error::{Result, ScribeClientError};
use crate::http_transport::HttpTransport;
use crate::transport::{FILE_FIELD, FileUpload, Transport};
use crate::types::TranscriptionRequest;

/// Liveness endpoint, relative to the base URL
pub const ROOT_PATH: &str = "/";

/// Transcription endpoint, relative to the base URL
pub const TRANSCRIBE_PATH: &str = "/api/v1/transcribe/";

/// Typed client for the transcription service
///
/// Each call builds its request, hands it to the transport and returns the
/// transport's result untouched. The client holds no state besides the base
/// URL and the transport.
#[derive(Debug, Clone)]
pub struct TranscriptionClient<T = HttpTransport> {
    base_url: Url,
    transport: T,
}

impl TranscriptionClient {
    /// Create a new client pointing at the given base URL
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ScribeClientError::Config(format!("invalid base URL: {e}")))?;

        Ok(Self::with_transport(base_url, HttpTransport::new()))
    }

    /// Create a client from loaded configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configured user agent is not a legal header value
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let mut transport = HttpTransport::new();

        if let Some(ref user_agent) = config.user_agent {
            transport = transport.with_user_agent(user_agent)?;
        }

        Ok(Self::with_transport(config.base_url.clone(), transport))
    }
}

impl Default for TranscriptionClient {
    fn default() -> Self {
        Self::with_transport(scribe_config::default_base_url(), HttpTransport::new())
    }
}

impl<T> TranscriptionClient<T> {
    /// Create a client that delegates to `transport`
    pub const fn with_transport(base_url: Url, transport: T) -> Self {
        Self { base_url, transport }
    }

    /// Get the base URL
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the transport
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// URL of the liveness endpoint
    pub fn root_url(&self) -> Url {
        make_url(&self.base_url, ROOT_PATH)
    }

    /// URL of the transcription endpoint
    pub fn transcribe_url(&self) -> Url {
        make_url(&self.base_url, TRANSCRIBE_PATH)
    }
}

impl<T: Transport> TranscriptionClient<T> {
    // -- Transcription --

    /// Upload an audio file for transcription
    ///
    /// Sends the file under the `file` field together with `return_type`,
    /// `language` and, when set, `scene`.
    ///
    /// # Errors
    ///
    /// Returns the transport's error unchanged
    pub async fn transcribe_audio(&self, request: &TranscriptionRequest) -> std::result::Result<T::Response, T::Error> {
        let upload = FileUpload {
            url: self.transcribe_url(),
            file_path: request.file.clone(),
            field_name: FILE_FIELD.to_owned(),
            form_fields: request.form_fields(),
        };

        tracing::debug!(
            url = %upload.url,
            path = %upload.file_path.display(),
            scene = ?request.scene,
            return_type = %request.return_type,
            language = %request.language,
            "transcribe audio"
        );

        self.transport.upload_file(upload).await
    }

    /// Upload an audio file with default options
    ///
    /// # Errors
    ///
    /// Returns the transport's error unchanged
    pub async fn transcribe_file(&self, file: impl Into<PathBuf>) -> std::result::Result<T::Response, T::Error> {
        self.transcribe_audio(&TranscriptionRequest::new(file)).await
    }

    // -- Liveness --

    /// Issue a GET to the service root
    ///
    /// # Errors
    ///
    /// Returns the transport's error unchanged
    pub async fn check_root(&self) -> std::result::Result<T::Response, T::Error> {
        let url = self.root_url();

        tracing::debug!(%url, "check root");

        self.transport.request(Method::GET, url).await
    }
}

// -- Helper functions --

/// Append `path` to the base URL's own path
///
/// A base of `http://host/svc` keeps its `/svc` prefix; query and fragment
/// are dropped.
fn make_url(base_url: &Url, path: &str) -> Url {
    let mut url = base_url.clone();
    let joined = format!("{}{path}", base_url.path().trim_end_matches('/'));

    url.set_path(&joined);
    url.set_query(None);
    url.set_fragment(None);
    url
}
