//! Core data models for the DeepLX wire format

use serde::{Deserialize, Deserializer, Serialize};

/// Body of `POST /translate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRequest {
    /// Text to translate
    pub text: String,
    /// Upper-cased source language, `AUTO` for detection
    pub source_lang: String,
    /// Upper-cased target language
    pub target_lang: String,
}

impl TranslationRequest {
    /// Build a request; language codes are always sent upper-cased.
    pub fn new(
        text: impl Into<String>,
        source_lang: impl AsRef<str>,
        target_lang: impl AsRef<str>,
    ) -> Self {
        Self {
            text: text.into(),
            source_lang: source_lang.as_ref().trim().to_uppercase(),
            target_lang: target_lang.as_ref().trim().to_uppercase(),
        }
    }
}

/// Reply from a DeepLX server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationResponse {
    /// Application-level status, independent of the HTTP status
    pub code: i64,
    /// Server-side request id
    pub id: i64,
    /// Translated text, or the server's message when `code != 200`
    pub data: String,
    /// Other candidate translations; `null` reads as empty
    #[serde(deserialize_with = "null_as_empty")]
    pub alternatives: Vec<String>,
    /// Detected or requested source language
    pub source_lang: String,
    /// Target language
    pub target_lang: String,
    /// Backend the server used, e.g. `Free` or `Pro`
    pub method: String,
}

impl TranslationResponse {
    /// Check whether the payload reports success
    pub fn is_success(&self) -> bool {
        self.code == 200
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
