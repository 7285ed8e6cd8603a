use base64::{engine::general_purpose, Engine as _};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};

use super::client::GttsError;

/// RPC identifier of the translate TTS call inside `batchexecute`.
pub const RPC_ID: &str = "jQ1olc";

static AUDIO_PAYLOAD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"jQ1olc","\[\\"(.*?)\\"\]"#).expect("audio payload pattern is valid")
});

/// Build the `f.req` value for one token.
///
/// The inner parameter list is serialized first and embedded as a string in
/// the outer envelope, both as compact JSON:
///
/// ```text
/// [[["jQ1olc","[\"Hello\",\"en\",null,\"null\"]",null,"generic"]]]
/// ```
///
/// `slow` speech is requested with `true` in the speed slot, normal speed
/// with `null`.
pub fn package_rpc(text: &str, lang: &str, slow: bool) -> Result<String, GttsError> {
    let speed = if slow { Value::Bool(true) } else { Value::Null };
    let parameter = serde_json::to_string(&json!([text, lang, speed, "null"]))?;
    let envelope = json!([[[RPC_ID, parameter, Value::Null, "generic"]]]);
    Ok(serde_json::to_string(&envelope)?)
}

/// Extract and decode the MP3 bytes from a `batchexecute` response body.
///
/// Every line that carries the RPC id is scanned for a base64 payload; all
/// payloads found are decoded and concatenated.
pub fn decode_response(body: &str) -> Result<Vec<u8>, GttsError> {
    let mut audio = Vec::new();
    let mut found = false;

    for line in body.lines().filter(|line| line.contains(RPC_ID)) {
        if let Some(caps) = AUDIO_PAYLOAD.captures(line) {
            audio.extend(general_purpose::STANDARD.decode(&caps[1])?);
            found = true;
        }
    }

    if !found {
        return Err(GttsError::NoAudio);
    }
    Ok(audio)
}

/// Best guess at why a request for `lang` failed with `status`.
///
/// A 200 only gets here when the body carried no audio.
pub fn probable_cause(status: u16, tld: &str, lang: &str) -> String {
    match status {
        200 => format!("No audio stream in response. Unsupported language '{lang}'"),
        403 => "Bad token or upstream API changes".to_string(),
        404 if tld != "com" => format!("Unsupported tld '{tld}'"),
        500..=599 => "Upstream API error. Try again later.".to_string(),
        _ => "Unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packages_normal_speed_request() {
        let rpc = package_rpc("Hello", "en", false).unwrap();
        assert_eq!(
            rpc,
            r#"[[["jQ1olc","[\"Hello\",\"en\",null,\"null\"]",null,"generic"]]]"#
        );
    }

    #[test]
    fn packages_slow_request_and_escapes_quotes() {
        let rpc = package_rpc(r#"Say "hi""#, "ta", true).unwrap();
        assert_eq!(
            rpc,
            r#"[[["jQ1olc","[\"Say \\\"hi\\\"\",\"ta\",true,\"null\"]",null,"generic"]]]"#
        );
    }

    #[test]
    fn decodes_audio_payload() {
        // "SUQz" is base64 for "ID3"
        let body = ")]}'\n\n123\n[[\"wrb.fr\",\"jQ1olc\",\"[\\\"SUQz\\\"]\",null,null,null,\"generic\"]]\n58\n[[\"di\",45]]\n";
        assert_eq!(decode_response(body).unwrap(), b"ID3");
    }

    #[test]
    fn response_without_audio_is_an_error() {
        let body = ")]}'\n\n[[\"wrb.fr\",\"jQ1olc\",null,null,null,[3],\"generic\"]]\n";
        assert!(matches!(decode_response(body), Err(GttsError::NoAudio)));
        assert!(matches!(decode_response(""), Err(GttsError::NoAudio)));
    }

    #[test]
    fn invalid_base64_is_reported() {
        let body = "[[\"wrb.fr\",\"jQ1olc\",\"[\\\"@@@@\\\"]\",null]]";
        assert!(matches!(decode_response(body), Err(GttsError::Decode(_))));
    }

    #[test]
    fn infers_probable_cause_from_status() {
        assert_eq!(probable_cause(403, "com", "en"), "Bad token or upstream API changes");
        assert_eq!(probable_cause(404, "co.in", "en"), "Unsupported tld 'co.in'");
        assert_eq!(probable_cause(404, "com", "en"), "Unknown");
        assert_eq!(probable_cause(429, "com", "en"), "Unknown");
        for status in [500, 502, 503, 599] {
            assert_eq!(
                probable_cause(status, "com", "en"),
                "Upstream API error. Try again later."
            );
        }
    }

    #[test]
    fn empty_success_points_at_the_language() {
        assert_eq!(
            probable_cause(200, "com", "xx"),
            "No audio stream in response. Unsupported language 'xx'"
        );
    }
}
