use crate::{AudioFormat, SynthesisEngine, SynthesisResult};

use super::client::{GttsClient, GttsError};
use super::langs::canonical_lang;
use super::tokenizer::{preprocess, tokenize};

/// Parameters for configuring a Google TTS synthesis request.
#[derive(Debug, Clone, Default)]
pub struct GttsParams {
    /// Ask the endpoint for slower speech.
    pub slow: bool,
}

/// Google Translate text-to-speech engine.
///
/// Text is normalized and split into short tokens; each token is sent as one
/// request and the returned MP3 segments are concatenated in order.
///
/// # Quick Start
///
/// ```rust,no_run
/// use tour_narration::{SynthesisEngine, engines::gtts::{GttsEngine, GttsParams}};
/// use std::path::PathBuf;
///
/// let mut engine = GttsEngine::new();
/// let params = GttsParams { slow: false };
/// engine.synthesize_to_file("வணக்கம்", "ta", &PathBuf::from("hello_ta.mp3"), Some(params))?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct GttsEngine {
    client: Option<GttsClient>,
    tld: String,
    lang_check: bool,
}

impl Default for GttsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GttsEngine {
    /// Create an engine that talks to `translate.google.com`.
    pub fn new() -> Self {
        Self::with_tld("com")
    }

    /// Create an engine for a regional Google host, e.g. `"co.in"`.
    pub fn with_tld(tld: &str) -> Self {
        Self {
            client: None,
            tld: tld.to_string(),
            lang_check: true,
        }
    }

    /// Enable or disable rejecting unknown language codes before any request.
    pub fn with_lang_check(mut self, lang_check: bool) -> Self {
        self.lang_check = lang_check;
        self
    }

    pub fn tld(&self) -> &str {
        &self.tld
    }

    fn resolve_lang(&self, lang: &str) -> Result<String, GttsError> {
        if !self.lang_check {
            return Ok(lang.to_string());
        }
        canonical_lang(lang)
            .map(str::to_string)
            .ok_or_else(|| GttsError::UnsupportedLanguage(lang.to_string()))
    }

    /// The HTTP client is built on first use and reused afterwards.
    fn client(&mut self) -> Result<&GttsClient, GttsError> {
        let client = match self.client.take() {
            Some(client) => client,
            None => GttsClient::new(&self.tld)?,
        };
        Ok(self.client.insert(client))
    }
}

impl SynthesisEngine for GttsEngine {
    type SynthesisParams = GttsParams;

    fn synthesize(
        &mut self,
        text: &str,
        lang: &str,
        params: Option<Self::SynthesisParams>,
    ) -> Result<SynthesisResult, Box<dyn std::error::Error>> {
        let p = params.unwrap_or_default();
        let lang = self.resolve_lang(lang)?;

        let tokens = tokenize(&preprocess(text));
        if tokens.is_empty() {
            return Err(GttsError::EmptyText.into());
        }
        log::debug!("Synthesizing {} token(s) in '{lang}'", tokens.len());

        let client = self.client()?;
        let mut audio = Vec::new();
        for token in &tokens {
            audio.extend(client.fetch_token(token, &lang, p.slow)?);
        }

        Ok(SynthesisResult {
            audio,
            format: AudioFormat::Mp3,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gtts_error<'a>(err: &'a (dyn std::error::Error + 'static)) -> Option<&'a GttsError> {
        err.downcast_ref::<GttsError>()
    }

    #[test]
    fn rejects_unknown_language_before_any_request() {
        let mut engine = GttsEngine::new();
        let err = engine.synthesize("Hello", "xx", None).unwrap_err();
        assert!(matches!(
            gtts_error(err.as_ref()),
            Some(GttsError::UnsupportedLanguage(code)) if code == "xx"
        ));
        assert!(engine.client.is_none());
    }

    #[test]
    fn rejects_text_without_speakable_tokens() {
        let mut engine = GttsEngine::new();
        let err = engine.synthesize(" ... !", "en", None).unwrap_err();
        assert!(matches!(gtts_error(err.as_ref()), Some(GttsError::EmptyText)));
    }

    #[test]
    fn language_codes_are_canonicalized() {
        let engine = GttsEngine::new();
        assert_eq!(engine.resolve_lang("HI").unwrap(), "hi");
        let unchecked = GttsEngine::new().with_lang_check(false);
        assert_eq!(unchecked.resolve_lang("xx").unwrap(), "xx");
    }

    #[test]
    fn regional_host_is_kept() {
        assert_eq!(GttsEngine::with_tld("co.in").tld(), "co.in");
        assert_eq!(GttsEngine::default().tld(), "com");
    }
}
