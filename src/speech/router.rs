//! Provider fallback routing
//!
//! Providers are tried in order. A provider without a working backend, or one
//! that fails transiently, hands over to the next. When nobody can speak, the
//! caller gets a text-only outcome instead of an error, unless one of the
//! failures was transient, in which case that error is returned so the caller
//! can retry later. Nothing is retried here.

use super::backends::ai_voice::{self, AiVoiceProvider, VendorConfig};
use super::vendor_error::VendorFailure;
use super::{AudioReference, SpeechProvider, SpeechRequest};
use crate::config::Config;
use crate::{PeppiError, Result};
use log::{debug, info, warn};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Result of a routed speech request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SpeechOutcome {
    /// A provider synthesized the text
    Audio {
        provider: String,
        audio: AudioReference,
    },
    /// No provider could speak; display the text instead
    TextOnly {
        text: String,
        /// Pronunciation hint for native-script text
        romanized: Option<String>,
    },
}

/// Ordered set of speech providers with a per-call timeout
pub struct SpeechRouter {
    providers: Vec<Arc<dyn SpeechProvider>>,
    timeout: Duration,
}

impl SpeechRouter {
    pub fn new(timeout: Duration) -> Self {
        Self {
            providers: Vec::new(),
            timeout,
        }
    }

    /// Append a provider (lower priority than those already added)
    pub fn with_provider(mut self, provider: Arc<dyn SpeechProvider>) -> Self {
        self.push(provider);
        self
    }

    pub fn push(&mut self, provider: Arc<dyn SpeechProvider>) {
        debug!("Registered speech provider {}", provider.name());
        self.providers.push(provider);
    }

    /// Provider names in fallback order
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Speak `request` with the first provider that can
    ///
    /// Dropping the returned future cancels the provider call in flight.
    pub async fn speak(&self, request: &SpeechRequest) -> Result<SpeechOutcome> {
        let mut transient: Option<PeppiError> = None;

        for provider in &self.providers {
            let name = provider.name();
            if !provider.supports_language(request.language()) {
                debug!("{} does not support {}, skipping", name, request.language());
                continue;
            }

            info!("Trying speech provider {}...", name);
            let result = match tokio::time::timeout(self.timeout, provider.text_to_speech(request))
                .await
            {
                Ok(result) => result,
                Err(_) => Err(VendorFailure::Timeout.normalize(name)),
            };

            match result {
                Ok(audio) => {
                    info!("✓ {} synthesized speech", name);
                    return Ok(SpeechOutcome::Audio {
                        provider: name.to_string(),
                        audio,
                    });
                }
                Err(e) if e.is_retryable() => {
                    warn!("✗ {} failed transiently: {}", name, e);
                    transient = Some(e);
                }
                Err(e @ PeppiError::CapabilityUnavailable { .. }) => {
                    info!("✗ {} unavailable: {}", name, e);
                }
                Err(e) => return Err(e),
            }
        }

        if let Some(e) = transient {
            return Err(e);
        }

        warn!("No speech provider available, falling back to text-only output");
        Ok(SpeechOutcome::TextOnly {
            text: request.text().to_string(),
            romanized: None,
        })
    }
}

/// Build the router described by the `[speech]` config section
pub fn create_router(config: &Config) -> Result<SpeechRouter> {
    let mut router = SpeechRouter::new(config.speech_timeout());

    for name in config.speech_providers() {
        match name.as_str() {
            ai_voice::PROVIDER_NAME => {
                let vendor = VendorConfig::from_config(config);
                router.push(Arc::new(AiVoiceProvider::new(vendor)));
            }
            other => {
                return Err(PeppiError::Config(format!(
                    "Unknown speech provider '{}' in [speech] providers",
                    other
                )));
            }
        }
    }

    info!(
        "Speech router ready with providers {:?} (timeout {:?})",
        router.provider_names(),
        router.timeout()
    );
    Ok(router)
}
