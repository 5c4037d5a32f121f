use std::path::Path;

/// Audio container, as far as the upload's content type is concerned
///
/// The service only accepts MPEG, WAV and M4A audio; anything else is
/// uploaded as `application/octet-stream` and rejected remotely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    /// MPEG layer 3
    Mp3,
    /// RIFF WAVE
    Wav,
    /// MPEG-4 audio
    M4a,
    /// Unrecognized extension
    Other,
}

impl AudioFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "mp3" | "mpga" | "mpeg" => Self::Mp3,
            "wav" | "wave" => Self::Wav,
            "m4a" | "mp4" => Self::M4a,
            _ => Self::Other,
        }
    }

    /// Detect format from a file path
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map_or(Self::Other, Self::from_extension)
    }

    /// MIME type for the multipart file part
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Wav => "audio/wav",
            Self::M4a => "audio/x-m4a",
            Self::Other => "application/octet-stream",
        }
    }
}
