//! Third-party AI voice vendor backend
//!
//! The vendor integration is not built yet. The provider resolves the voice it
//! would ask for and then reports `CapabilityUnavailable`, which callers treat
//! as "use another provider or show text only".

use crate::config::Config;
use crate::speech::{AudioReference, SpeechProvider, SpeechRequest, VoiceGender};
use crate::{PeppiError, Result};
use async_trait::async_trait;
use log::debug;
use std::time::Duration;

/// Name used in config and error reports
pub const PROVIDER_NAME: &str = "ai-voice";

/// Connection settings supplied by the surrounding application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl VendorConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            endpoint: config.speech_endpoint(),
            api_key: config.speech_api_key(),
            timeout: config.speech_timeout(),
        }
    }

    /// Are endpoint and credentials both present?
    pub fn is_configured(&self) -> bool {
        !self.endpoint.trim().is_empty() && self.api_key.is_some()
    }
}

/// AI voice vendor provider (stub)
pub struct AiVoiceProvider {
    config: VendorConfig,
}

impl AiVoiceProvider {
    pub fn new(config: VendorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &VendorConfig {
        &self.config
    }

    /// Vendor voice id for a request
    ///
    /// Voices are named `<language>-<gender>`; a child id selects that child's
    /// personalized clone of the base voice.
    pub fn voice_for(&self, request: &SpeechRequest) -> String {
        let gender = match request.gender() {
            // The vendor has no neutral voices; its female voices are closest
            VoiceGender::Neutral => VoiceGender::Female,
            other => other,
        };
        let base = format!("{}-{}", request.language().code(), gender);
        match request.child_id() {
            Some(child) => format!("{}.child-{}", base, child),
            None => base,
        }
    }
}

#[async_trait]
impl SpeechProvider for AiVoiceProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn text_to_speech(&self, request: &SpeechRequest) -> Result<AudioReference> {
        debug!(
            "{}: {} chars with voice {} (configured: {})",
            PROVIDER_NAME,
            request.text().chars().count(),
            self.voice_for(request),
            self.config.is_configured()
        );

        let reason = if self.config.is_configured() {
            "text-to-speech backend is not implemented"
        } else {
            "text-to-speech backend is not implemented or configured"
        };
        Err(PeppiError::unavailable(PROVIDER_NAME, reason))
    }
}
