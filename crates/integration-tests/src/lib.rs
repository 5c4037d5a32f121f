//! End-to-end tests for the scribe client against a mock transcription service
//!
//! All tests live under `tests/`
