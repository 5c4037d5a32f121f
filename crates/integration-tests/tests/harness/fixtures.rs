//! On-disk audio fixtures

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Bytes standing in for an encoded audio stream
pub const FAKE_AUDIO: &[u8] = b"ID3\x04\x00\x00\x00\x00\x00\x00fake-mpeg-frames";

/// Temporary directory holding audio files for one test
pub struct AudioDir {
    dir: TempDir,
}

impl AudioDir {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self { dir: TempDir::new()? })
    }

    /// Write `contents` to `name` inside the directory
    pub fn write(&self, name: &str, contents: &[u8]) -> anyhow::Result<PathBuf> {
        let path = self.dir.path().join(name);
        let mut file = std::fs::File::create(&path)?;
        file.write_all(contents)?;
        Ok(path)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
