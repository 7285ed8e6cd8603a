//! Google Translate text-to-speech engine.
//!
//! This module synthesizes speech through the public endpoint behind Google
//! Translate's "listen" button. Audio comes back as MP3; no local model or
//! system library is needed, only network access.
//!
//! # Request Flow
//!
//! ```text
//! text ─► preprocess ─► tokenize (≤100 chars) ─► one batchexecute POST per token
//!                                                    │
//!                      MP3 bytes ◄─ concat ◄─ base64 ┘
//! ```
//!
//! # Language Support
//!
//! Around seventy languages, including the Dravidian and Indic languages used
//! by the tour narration:
//!
//! | Code | Language |
//! |---|---|
//! | `en` | English |
//! | `ta` | Tamil |
//! | `kn` | Kannada |
//! | `hi` | Hindi |
//!
//! Call [`supported_languages()`] for the full list. Unknown codes are
//! rejected before any request unless the engine is built with
//! `with_lang_check(false)`.
//!
//! # Examples
//!
//! ```rust,no_run
//! use tour_narration::{SynthesisEngine, engines::gtts::{GttsEngine, GttsParams}};
//!
//! let mut engine = GttsEngine::with_tld("co.in");
//! let result = engine.synthesize("नमस्ते", "hi", Some(GttsParams { slow: true }))?;
//! println!("Received {} bytes of MP3", result.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod client;
pub mod engine;
pub mod langs;
pub mod rpc;
pub mod tokenizer;

pub use client::GttsError;
pub use engine::{GttsEngine, GttsParams};
pub use langs::{canonical_lang, language_name, supported_languages};
