#![allow(clippy::must_use_candidate)]

//! Configuration for the scribe transcription client
//!
//! Loaded from TOML with `{{ env.VAR }}` placeholder expansion

pub mod client;
mod env;
mod loader;

use serde::Deserialize;

pub use client::*;

/// Top-level scribe configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Transcription service client configuration
    #[serde(default)]
    pub client: ClientConfig,
}
