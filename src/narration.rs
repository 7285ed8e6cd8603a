use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Narration for the Gangaikondacholapuram temple tour, compiled in.
const GANGAIKONDACHOLAPURAM: &str = include_str!("../assets/gangaikondacholapuram.json");

/// Narration texts keyed by location, then by language code.
///
/// Serializes as a plain JSON object of objects:
///
/// ```json
/// { "entrance": { "en": "Hello", "ta": "வணக்கம்" } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NarrationTable {
    locations: BTreeMap<String, BTreeMap<String, String>>,
}

impl NarrationTable {
    /// The built-in tour table: five temple locations in English, Tamil,
    /// Kannada and Hindi.
    pub fn builtin() -> Result<Self, serde_json::Error> {
        Self::from_json(GANGAIKONDACHOLAPURAM)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Add or replace the text for one location and language.
    pub fn insert(&mut self, location: &str, lang: &str, text: &str) {
        self.locations
            .entry(location.to_string())
            .or_default()
            .insert(lang.to_string(), text.to_string());
    }

    /// Every `(location, language, text)` triple.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.locations.iter().flat_map(|(location, languages)| {
            languages
                .iter()
                .map(move |(lang, text)| (location.as_str(), lang.as_str(), text.as_str()))
        })
    }

    pub fn locations(&self) -> impl Iterator<Item = &str> {
        self.locations.keys().map(String::as_str)
    }

    /// Number of `(location, language)` pairs.
    pub fn len(&self) -> usize {
        self.locations.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
