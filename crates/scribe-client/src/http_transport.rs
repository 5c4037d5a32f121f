use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use http::{HeaderMap, HeaderValue, Method, header};
use reqwest::multipart::{Form, Part};
use url::Url;

use crate::audio::AudioFormat;
use crate::error::{Result, ScribeClientError};
use crate::response::ServiceResponse;
use crate::transport::{FileUpload, Transport};

/// Shared client reusing connections across transports
fn shared_client() -> reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

    CLIENT
        .get_or_init(|| {
            let mut headers = HeaderMap::new();
            headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));

            reqwest::Client::builder()
                .pool_idle_timeout(Some(Duration::from_secs(5)))
                .tcp_nodelay(true)
                .tcp_keepalive(Some(Duration::from_secs(60)))
                .default_headers(headers)
                .build()
                .unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "failed to build pooled HTTP client, using defaults");
                    reqwest::Client::new()
                })
        })
        .clone()
}

/// [`Transport`] speaking HTTP through `reqwest`
///
/// Non-success statuses are turned into [`ScribeClientError::Api`]; bodies
/// of successful responses are buffered into a [`ServiceResponse`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    user_agent: Option<HeaderValue>,
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport {
    /// Create a transport on the shared connection pool
    pub fn new() -> Self {
        Self {
            http: shared_client(),
            user_agent: None,
        }
    }

    /// Create a transport around an existing `reqwest` client
    pub const fn with_client(http: reqwest::Client) -> Self {
        Self { http, user_agent: None }
    }

    /// Send `user_agent` as the `User-Agent` header
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a legal header value
    pub fn with_user_agent(mut self, user_agent: &str) -> Result<Self> {
        let value = HeaderValue::from_str(user_agent)
            .map_err(|e| ScribeClientError::Config(format!("invalid user agent: {e}")))?;
        self.user_agent = Some(value);
        Ok(self)
    }

    fn make_request(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
        let mut builder = self.http.request(method, url);

        if let Some(ref user_agent) = self.user_agent {
            builder = builder.header(header::USER_AGENT, user_agent.clone());
        }

        builder
    }
}

#[async_trait]
impl Transport for HttpTransport {
    type Response = ServiceResponse;
    type Error = ScribeClientError;

    async fn request(&self, method: Method, url: Url) -> Result<ServiceResponse> {
        tracing::debug!(%method, %url, "sending request");

        let response = self.make_request(method, url).send().await?;

        into_service_response(response).await
    }

    async fn upload_file(&self, upload: FileUpload) -> Result<ServiceResponse> {
        let FileUpload {
            url,
            file_path,
            field_name,
            form_fields,
        } = upload;

        let audio = tokio::fs::read(&file_path)
            .await
            .map_err(|source| ScribeClientError::Io {
                path: file_path.clone(),
                source,
            })?;

        let file_name = upload_file_name(&file_path);
        let format = AudioFormat::from_path(&file_path);

        tracing::debug!(
            %url,
            path = %file_path.display(),
            bytes = audio.len(),
            mime = format.mime_type(),
            fields = ?form_fields.keys().collect::<Vec<_>>(),
            "uploading audio"
        );

        let part = Part::bytes(audio)
            .file_name(file_name)
            .mime_str(format.mime_type())
            .map_err(|e| ScribeClientError::Config(format!("invalid mime type: {e}")))?;

        let form = form_fields
            .into_iter()
            .fold(Form::new().part(field_name, part), |form, (name, value)| form.text(name, value));

        let response = self.make_request(Method::POST, url).multipart(form).send().await?;

        into_service_response(response).await
    }
}

/// Name reported for the file part; `audio` when the path has none
fn upload_file_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| "audio".to_owned(), |name| name.to_string_lossy().into_owned())
}

/// Check the status and buffer the body
async fn into_service_response(response: reqwest::Response) -> Result<ServiceResponse> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_else(|e| {
            tracing::warn!(status = status.as_u16(), error = %e, "failed to read error body");
            String::new()
        });
        let detail = parse_error_body(&body);

        tracing::error!(status = status.as_u16(), %detail, "transcription service returned an error");

        return Err(ScribeClientError::Api {
            status: status.as_u16(),
            detail,
        });
    }

    let headers = response.headers().clone();
    let body = response.bytes().await?;

    tracing::debug!(status = status.as_u16(), bytes = body.len(), "response received");

    Ok(ServiceResponse { status, headers, body })
}

/// Pull the message out of a `{"detail": ...}` error body
///
/// Structured details (validation errors) are kept as compact JSON; bodies
/// without a `detail` key are returned as-is.
fn parse_error_body(body: &str) -> String {
    let Ok(json) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.to_owned();
    };

    match json.get("detail") {
        Some(serde_json::Value::String(detail)) => detail.clone(),
        Some(detail) => detail.to_string(),
        None => body.to_owned(),
    }
}
