//! Speech provider abstraction
//!
//! Callers request synthesized speech through [`SpeechProvider`] without
//! knowing which vendor sits behind it. Every provider reports failures in the
//! shared error taxonomy, so a missing backend is an ordinary
//! `CapabilityUnavailable` result rather than a crash.

use crate::{Language, PeppiError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Voice gender requested from a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceGender {
    Male,
    Female,
    Neutral,
}

impl VoiceGender {
    pub fn as_str(self) -> &'static str {
        match self {
            VoiceGender::Male => "male",
            VoiceGender::Female => "female",
            VoiceGender::Neutral => "neutral",
        }
    }
}

impl fmt::Display for VoiceGender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoiceGender {
    type Err = PeppiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(VoiceGender::Male),
            "female" | "f" => Ok(VoiceGender::Female),
            "neutral" | "n" => Ok(VoiceGender::Neutral),
            _ => Err(PeppiError::InvalidRequest(format!(
                "unknown voice gender '{}'",
                s
            ))),
        }
    }
}

/// One text-to-speech request
///
/// Construction validates the input, so providers can rely on non-blank text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeechRequest {
    text: String,
    language: Language,
    gender: VoiceGender,
    /// Child whose personalized voice should be used, if any
    child_id: Option<String>,
}

impl SpeechRequest {
    pub fn new(text: impl Into<String>, language: Language, gender: VoiceGender) -> Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(PeppiError::InvalidRequest(
                "text to synthesize is empty".to_string(),
            ));
        }
        Ok(Self {
            text,
            language,
            gender,
            child_id: None,
        })
    }

    /// Build a request from primitive API inputs
    ///
    /// Unknown language codes and genders are malformed input here and are
    /// reported as `InvalidRequest`.
    pub fn parse(text: &str, language_code: &str, gender: &str) -> Result<Self> {
        let language: Language = language_code.parse().map_err(|_| {
            PeppiError::InvalidRequest(format!("unsupported language code '{}'", language_code))
        })?;
        let gender: VoiceGender = gender.parse()?;
        Self::new(text, language, gender)
    }

    /// Personalize the voice for a child
    pub fn with_child(mut self, child_id: impl Into<String>) -> Self {
        self.child_id = Some(child_id.into());
        self
    }

    /// Same request with different text (e.g. its transliteration)
    pub fn with_text(&self, text: impl Into<String>) -> Result<Self> {
        let mut request = Self::new(text, self.language, self.gender)?;
        request.child_id = self.child_id.clone();
        Ok(request)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn gender(&self) -> VoiceGender {
        self.gender
    }

    pub fn child_id(&self) -> Option<&str> {
        self.child_id.as_deref()
    }
}

/// Opaque handle to synthesized audio
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AudioReference {
    /// Audio hosted by the vendor or a CDN
    Url { url: String },
    /// Audio returned inline
    Bytes { data: Vec<u8>, mime_type: String },
    /// Audio stored on local disk
    File { path: PathBuf },
}

/// Text-to-speech backend
///
/// Implementations hold only immutable configuration, so one instance can
/// serve concurrent requests. A call in flight is abandoned by dropping its
/// future.
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Provider name for logging and routing
    fn name(&self) -> &str;

    /// Can this provider voice `language`?
    fn supports_language(&self, _language: Language) -> bool {
        true
    }

    /// Synthesize speech for a validated request
    async fn text_to_speech(&self, request: &SpeechRequest) -> Result<AudioReference>;
}

/// Synthesize from primitive inputs: validate, then call `provider`
pub async fn text_to_speech(
    provider: &dyn SpeechProvider,
    text: &str,
    language_code: &str,
    gender: &str,
    child_id: Option<&str>,
) -> Result<AudioReference> {
    let mut request = SpeechRequest::parse(text, language_code, gender)?;
    if let Some(child_id) = child_id {
        request = request.with_child(child_id);
    }
    provider.text_to_speech(&request).await
}
