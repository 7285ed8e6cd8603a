//! # tour-narration
//!
//! Renders the narration texts of a virtual tour to speech, one audio file per
//! location and language.
//!
//! ## Features
//!
//! - **Google Translate TTS**: MP3 synthesis through Google's public TTS endpoint
//! - **Batch generation**: walk a narration table and save every entry, logging
//!   failures without stopping
//! - **Deterministic naming**: `<location>_<language>.mp3` in a fixed directory
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use tour_narration::{engines::gtts::GttsEngine, SynthesisEngine};
//!
//! let mut engine = GttsEngine::new();
//! engine.synthesize_to_file("Hello, world!", "en", &PathBuf::from("hello.mp3"), None)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod batch;
pub mod engines;
pub mod narration;

use std::path::Path;

pub use batch::{generate_audio, GenerationConfig, GenerationConfigBuilder, GenerationReport};
pub use narration::NarrationTable;

/// Container format of synthesized audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Mp3,
}

impl AudioFormat {
    /// Conventional file extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
        }
    }
}

/// The result of a synthesis (text-to-speech) operation.
///
/// Holds the encoded audio exactly as the provider returned it.
#[derive(Debug)]
pub struct SynthesisResult {
    /// Encoded audio bytes
    pub audio: Vec<u8>,
    /// Container format of `audio`
    pub format: AudioFormat,
}

impl SynthesisResult {
    /// Write the audio to `path`, replacing any existing file.
    pub fn write_file(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        std::fs::write(path, &self.audio)?;
        Ok(())
    }

    /// Size of the encoded audio in bytes.
    pub fn len(&self) -> usize {
        self.audio.len()
    }

    pub fn is_empty(&self) -> bool {
        self.audio.is_empty()
    }
}

/// Common interface for text-to-speech synthesis engines.
///
/// Each engine may have its own parameter type for per-request options such
/// as speaking speed.
pub trait SynthesisEngine {
    /// Parameters for configuring a synthesis request (speed, etc.)
    type SynthesisParams: Default;

    /// Synthesize speech for `text` spoken in language `lang`.
    fn synthesize(
        &mut self,
        text: &str,
        lang: &str,
        params: Option<Self::SynthesisParams>,
    ) -> Result<SynthesisResult, Box<dyn std::error::Error>>;

    /// Synthesize speech and write it to `path`.
    ///
    /// Default implementation calls `synthesize()` then `SynthesisResult::write_file()`.
    fn synthesize_to_file(
        &mut self,
        text: &str,
        lang: &str,
        path: &Path,
        params: Option<Self::SynthesisParams>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.synthesize(text, lang, params)?.write_file(path)
    }
}
