#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Typed Rust client for the Whisper transcription service
//!
//! Uploads audio for transcription and checks that the service is up.
//! Every call is delegated to a [`Transport`]; the default
//! [`HttpTransport`] speaks multipart HTTP through `reqwest`.

mod audio;
mod client;
pub mod error;
mod http_transport;
mod response;
pub mod transport;
pub mod types;

pub use audio::AudioFormat;
pub use client::{ROOT_PATH, TRANSCRIBE_PATH, TranscriptionClient};
pub use error::{Result, ScribeClientError};
pub use http_transport::HttpTransport;
pub use response::{PlainTranscript, RootInfo, Segment, ServiceResponse, Transcript};
pub use scribe_config::DEFAULT_BASE_URL;
pub use transport::{FILE_FIELD, FileUpload, Transport};
pub use types::*;
