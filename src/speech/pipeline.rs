//! Transliterate-then-speak pipeline
//!
//! Some voices only read Roman text, so the pipeline can transliterate the
//! request before routing it. Text-only outcomes always keep the original
//! text and carry the Roman rendering as a pronunciation hint.

use super::router::{create_router, SpeechOutcome, SpeechRouter};
use super::SpeechRequest;
use crate::config::Config;
use crate::translit::Transliterator;
use crate::Result;
use log::{debug, warn};

pub struct SpeechPipeline {
    router: SpeechRouter,
    transliterator: Transliterator,
    /// Send the Roman rendering to providers instead of the native text
    transliterate: bool,
}

impl SpeechPipeline {
    pub fn new(router: SpeechRouter, transliterator: Transliterator, transliterate: bool) -> Self {
        Self {
            router,
            transliterator,
            transliterate,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            create_router(config)?,
            Transliterator::from_config(config),
            config.transliterate_for_speech(),
        ))
    }

    pub fn router(&self) -> &SpeechRouter {
        &self.router
    }

    pub async fn speak(&self, request: &SpeechRequest) -> Result<SpeechOutcome> {
        let romanized = self
            .transliterator
            .transliterate(request.text(), request.language())?;

        let outcome = if self.transliterate && !romanized.trim().is_empty() {
            debug!("Speaking romanized text {:?}", romanized);
            self.router.speak(&request.with_text(romanized.as_str())?).await?
        } else {
            if self.transliterate {
                warn!("Romanized text is blank, speaking the original text");
            }
            self.router.speak(request).await?
        };

        Ok(match outcome {
            SpeechOutcome::TextOnly { .. } => SpeechOutcome::TextOnly {
                text: request.text().to_string(),
                romanized: Some(romanized),
            },
            audio => audio,
        })
    }
}
