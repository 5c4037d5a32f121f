//! The capability the client delegates every network exchange to

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use http::Method;
use url::Url;

use crate::types::FormFields;

/// Multipart field name the service reads the audio from
pub const FILE_FIELD: &str = "file";

/// A file upload handed to [`Transport::upload_file`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// Target endpoint
    pub url: Url,
    /// Local file to send
    pub file_path: PathBuf,
    /// Multipart field name for the file part
    pub field_name: String,
    /// Text fields sent with the file
    pub form_fields: FormFields,
}

/// HTTP and upload capability
///
/// The client never inspects what a transport returns: responses and
/// errors reach the caller exactly as produced here.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Successful result of an exchange
    type Response: Send;

    /// Failure of an exchange
    type Error: std::error::Error + Send + Sync + 'static;

    /// Issue a request without a body
    async fn request(&self, method: Method, url: Url) -> Result<Self::Response, Self::Error>;

    /// Upload a local file as multipart form data
    async fn upload_file(&self, upload: FileUpload) -> Result<Self::Response, Self::Error>;
}

#[async_trait]
impl<T> Transport for Arc<T>
where
    T: Transport + ?Sized,
{
    type Response = T::Response;
    type Error = T::Error;

    async fn request(&self, method: Method, url: Url) -> Result<Self::Response, Self::Error> {
        (**self).request(method, url).await
    }

    async fn upload_file(&self, upload: FileUpload) -> Result<Self::Response, Self::Error> {
        (**self).upload_file(upload).await
    }
}
