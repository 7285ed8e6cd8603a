//! Speech synthesis engines.
//!
//! This module contains implementations of text-to-speech engines.
//!
//! # Available Engines
//!
//! Enable engines via Cargo features:
//! - `gtts` - Google Translate TTS (HTTP, enabled by default)

#[cfg(feature = "gtts")]
pub mod gtts;
