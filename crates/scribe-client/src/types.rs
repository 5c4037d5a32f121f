use std::convert::Infallible;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// -- Enumerated form values --

/// Error returned when a string is not a known form value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl ParseEnumError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

/// Application context the service uses to pick its keyword tables
///
/// Serialized with the labels the service matches on. [`Scene::Auto`] asks
/// the service to detect the scene from the transcript. Labels the client
/// does not know travel as [`Scene::Other`]; the service decides what to do
/// with them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Scene {
    /// Lectures and lessons
    Classroom,
    /// Meetings
    Meeting,
    /// Voice memos
    Memo,
    /// Anything else; the service's fallback scene
    General,
    /// Let the service decide
    Auto,
    /// Any other label, sent and received verbatim
    Other(String),
}

impl Scene {
    /// Label sent on the wire
    pub fn as_str(&self) -> &str {
        match self {
            Self::Classroom => "课堂",
            Self::Meeting => "会议",
            Self::Memo => "备忘录",
            Self::General => "通用",
            Self::Auto => "auto",
            Self::Other(label) => label.as_str(),
        }
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Scene {
    /// Accepts the wire label or the English name, case-insensitively
    fn from(label: String) -> Self {
        match label.trim().to_lowercase().as_str() {
            "课堂" | "classroom" => Self::Classroom,
            "会议" | "meeting" => Self::Meeting,
            "备忘录" | "memo" => Self::Memo,
            "通用" | "general" => Self::General,
            "auto" => Self::Auto,
            _ => Self::Other(label),
        }
    }
}

impl From<Scene> for String {
    fn from(scene: Scene) -> Self {
        match scene {
            Scene::Other(label) => label,
            known => known.as_str().to_owned(),
        }
    }
}

impl FromStr for Scene {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_owned()))
    }
}

/// Shape of the transcription response
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnType {
    /// Full analysis: segments, scene, keywords, timing
    #[default]
    Json,
    /// Transcript text only
    Text,
}

impl ReturnType {
    /// Value sent on the wire
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for ReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReturnType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            _ => Err(ParseEnumError::new("return type", s)),
        }
    }
}

/// Spoken language of the audio
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Chinese
    #[default]
    Zh,
    /// English
    En,
    /// Japanese
    Ja,
    /// Korean
    Ko,
}

impl Language {
    /// ISO 639-1 code sent on the wire
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Zh => "zh",
            Self::En => "en",
            Self::Ja => "ja",
            Self::Ko => "ko",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "zh" => Ok(Self::Zh),
            "en" => Ok(Self::En),
            "ja" => Ok(Self::Ja),
            "ko" => Ok(Self::Ko),
            _ => Err(ParseEnumError::new("language", s)),
        }
    }
}

// -- Transcription request --

/// Parameters of a single transcription call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionRequest {
    /// Local audio file to upload
    pub file: PathBuf,
    /// Scene hint; left out of the form when `None`
    pub scene: Option<Scene>,
    /// Response shape
    pub return_type: ReturnType,
    /// Spoken language
    pub language: Language,
}

impl TranscriptionRequest {
    /// Create a request for `file` with default options
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            scene: None,
            return_type: ReturnType::default(),
            language: Language::default(),
        }
    }

    /// Set the scene hint
    #[must_use]
    pub fn with_scene(mut self, scene: Scene) -> Self {
        self.scene = Some(scene);
        self
    }

    /// Set the response shape
    #[must_use]
    pub const fn with_return_type(mut self, return_type: ReturnType) -> Self {
        self.return_type = return_type;
        self
    }

    /// Set the spoken language
    #[must_use]
    pub const fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Path of the audio file
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Text fields sent alongside the file
    pub fn form_fields(&self) -> FormFields {
        let mut fields = FormFields::default();
        fields.insert("return_type", self.return_type.as_str());
        fields.insert("language", self.language.as_str());

        if let Some(ref scene) = self.scene {
            fields.insert("scene", scene.as_str());
        }

        fields
    }
}

/// Ordered text fields of a multipart upload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    fields: IndexMap<String, String>,
}

impl FormFields {
    /// Set `key` to `value`; an existing key keeps its position
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Value stored under `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Whether `key` is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Field names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// `(name, value)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether there are no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl IntoIterator for FormFields {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
