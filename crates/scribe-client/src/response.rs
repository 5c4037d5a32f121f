use std::collections::BTreeMap;

use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::types::Scene;

/// Response of the transcription service, as received
///
/// The body is kept as raw bytes; decoding is up to the caller.
#[derive(Debug, Clone)]
pub struct ServiceResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw response body
    pub body: Bytes,
}

impl ServiceResponse {
    /// Body as UTF-8 text, replacing invalid sequences
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(Into::into)
    }

    /// Decode a `return_type=json` transcription body
    pub fn transcript(&self) -> Result<Transcript> {
        self.json()
    }

    /// Decode a `return_type=text` transcription body
    pub fn plain_transcript(&self) -> Result<PlainTranscript> {
        self.json()
    }

    /// Decode the service root's welcome body
    pub fn root_info(&self) -> Result<RootInfo> {
        self.json()
    }
}

// -- Transcription bodies --

/// Full transcription result (`return_type=json`)
#[derive(Debug, Clone, Deserialize)]
pub struct Transcript {
    /// Transcribed text
    #[serde(default)]
    pub text: String,
    /// Timed segments
    #[serde(default)]
    pub segments: Vec<Segment>,
    /// Server-side processing time in seconds
    #[serde(default)]
    pub processing_time: f64,
    /// Model that produced the transcript
    #[serde(default = "unknown")]
    pub model_type: String,
    /// Device the model ran on
    #[serde(default = "unknown")]
    pub device: String,
    /// Detected language
    #[serde(default = "unknown")]
    pub language: String,
    /// Scene the analysis used, requested or detected
    #[serde(default = "general_scene")]
    pub detected_scene: Scene,
    /// Scene keywords found in the text
    #[serde(default)]
    pub found_keywords: Vec<String>,
    /// Semantic connectives found in the text, by category
    #[serde(default)]
    pub found_semantics: BTreeMap<String, Vec<String>>,
}

/// One timed span of the transcript
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Segment {
    /// Start offset in seconds
    #[serde(default)]
    pub start: f64,
    /// End offset in seconds
    #[serde(default)]
    pub end: f64,
    /// Text of the span
    #[serde(default)]
    pub text: String,
}

/// Text-only transcription result (`return_type=text`)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlainTranscript {
    /// Transcribed text
    #[serde(default)]
    pub text: String,
}

/// Welcome body served at the service root
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RootInfo {
    /// Greeting
    pub message: String,
    /// Path of the interactive API docs
    #[serde(default)]
    pub docs_url: Option<String>,
    /// Path of the ReDoc API docs
    #[serde(default)]
    pub redoc_url: Option<String>,
}

fn unknown() -> String {
    "unknown".to_owned()
}

const fn general_scene() -> Scene {
    Scene::General
}
