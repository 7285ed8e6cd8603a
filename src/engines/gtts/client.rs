use reqwest::blocking::Client;
use reqwest::header::REFERER;
use reqwest::StatusCode;

use super::rpc::{decode_response, package_rpc, probable_cause};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                          AppleWebKit/537.36 (KHTML, like Gecko) \
                          Chrome/47.0.2526.106 Safari/537.36";

const TRANSLATE_REFERER: &str = "http://translate.google.com/";

#[derive(thiserror::Error, Debug)]
pub enum GttsError {
    #[error("Language not supported: {0}")]
    UnsupportedLanguage(String),
    #[error("No text to send to TTS API")]
    EmptyText,
    #[error("Failed to connect to TTS API: {0}")]
    Request(#[from] reqwest::Error),
    #[error("{status} ({reason}) from TTS API. Probable cause: {cause}")]
    Http {
        status: u16,
        reason: String,
        cause: String,
    },
    #[error("No audio stream in response. Unsupported language?")]
    NoAudio,
    #[error("Invalid audio payload: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("Failed to build RPC request: {0}")]
    Rpc(#[from] serde_json::Error),
}

/// Blocking HTTP client for the translate `batchexecute` endpoint.
pub struct GttsClient {
    http: Client,
    tld: String,
}

impl GttsClient {
    pub fn new(tld: &str) -> Result<Self, GttsError> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            tld: tld.to_string(),
        })
    }

    /// URL requests are posted to for this client's top-level domain.
    pub fn endpoint(&self) -> String {
        endpoint_for(&self.tld)
    }

    /// Synthesize a single token and return its MP3 bytes.
    pub fn fetch_token(&self, text: &str, lang: &str, slow: bool) -> Result<Vec<u8>, GttsError> {
        let rpc = package_rpc(text, lang, slow)?;
        let url = self.endpoint();
        log::debug!("POST {url} ({} chars, lang={lang})", text.chars().count());

        let response = self
            .http
            .post(&url)
            .header(REFERER, TRANSLATE_REFERER)
            .form(&[("f.req", rpc.as_str())])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.http_error(status, lang));
        }

        let body = response.text()?;
        match decode_response(&body) {
            Err(GttsError::NoAudio) => Err(self.http_error(status, lang)),
            decoded => decoded,
        }
    }

    fn http_error(&self, status: StatusCode, lang: &str) -> GttsError {
        GttsError::Http {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            cause: probable_cause(status.as_u16(), &self.tld, lang),
        }
    }
}

pub(crate) fn endpoint_for(tld: &str) -> String {
    format!("https://translate.google.{tld}/_/TranslateWebserverUi/data/batchexecute")
}

#[cfg(test)]
mod tests {
    use super::{endpoint_for, GttsClient, GttsError, StatusCode};

    #[test]
    fn endpoint_uses_tld() {
        assert_eq!(
            endpoint_for("com"),
            "https://translate.google.com/_/TranslateWebserverUi/data/batchexecute"
        );
        assert_eq!(
            endpoint_for("co.in"),
            "https://translate.google.co.in/_/TranslateWebserverUi/data/batchexecute"
        );
    }

    #[test]
    fn silent_success_is_reported_with_status_and_language() {
        let client = GttsClient::new("com").unwrap();
        let err = client.http_error(StatusCode::OK, "xx");
        assert_eq!(
            err.to_string(),
            "200 (OK) from TTS API. Probable cause: No audio stream in response. \
             Unsupported language 'xx'"
        );
    }

    #[test]
    fn upstream_outage_is_reported_as_retryable() {
        let client = GttsClient::new("com").unwrap();
        let err = client.http_error(StatusCode::SERVICE_UNAVAILABLE, "en");
        assert_eq!(
            err.to_string(),
            "503 (Service Unavailable) from TTS API. Probable cause: \
             Upstream API error. Try again later."
        );
    }

    #[test]
    fn http_error_message_names_status_and_cause() {
        let err = GttsError::Http {
            status: 403,
            reason: "Forbidden".to_string(),
            cause: "Bad token or upstream API changes".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "403 (Forbidden) from TTS API. Probable cause: Bad token or upstream API changes"
        );
    }
}
