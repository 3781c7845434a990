//! Transliteration of Indian-script text into Roman phonetic spelling
//!
//! The output is a best-effort, lossy rendering meant for display and
//! pronunciation hints ("namaste", "vanakkam"); it cannot be converted back.
//! Everything here is a pure function of the input and the static tables, so
//! it can be called from any number of threads at once.

mod engine;
pub mod scripts;
pub mod segment;
pub mod table;

pub use scripts::table_for;
pub use table::{FallbackPolicy, Mapping, ScriptTable, ScriptTableBuilder, Unit};

use crate::config::Config;
use crate::{Language, PeppiError, Result};
use log::debug;

/// Transliterate `text` using the built-in table for `language`
///
/// Empty text is rejected with `InvalidRequest`. Unmapped characters never
/// fail the call; they follow the table's fallback policy.
pub fn transliterate(text: &str, language: Language) -> Result<String> {
    Transliterator::new().transliterate(text, language)
}

/// Transliterate with a language tag such as "hi" or "ta-IN"
pub fn transliterate_code(text: &str, language_code: &str) -> Result<String> {
    let language: Language = language_code.parse()?;
    transliterate(text, language)
}

/// Transliteration front-end with an optional fallback override
#[derive(Debug, Clone, Default)]
pub struct Transliterator {
    fallback: Option<FallbackPolicy>,
}

impl Transliterator {
    /// Use each table's own fallback policy
    pub fn new() -> Self {
        Self { fallback: None }
    }

    /// Use `policy` for every language
    pub fn with_fallback(policy: FallbackPolicy) -> Self {
        Self {
            fallback: Some(policy),
        }
    }

    /// Fallback policy from the `[transliteration]` config section
    pub fn from_config(config: &Config) -> Self {
        Self::with_fallback(config.fallback_policy())
    }

    pub fn transliterate(&self, text: &str, language: Language) -> Result<String> {
        let table = table_for(language)
            .ok_or_else(|| PeppiError::UnsupportedLanguage(language.code().to_string()))?;
        self.transliterate_with(text, table)
    }

    /// Transliterate with a caller-built table
    pub fn transliterate_with(&self, text: &str, table: &ScriptTable) -> Result<String> {
        if text.is_empty() {
            return Err(PeppiError::InvalidRequest(
                "text to transliterate is empty".to_string(),
            ));
        }

        let fallback = self.fallback.as_ref().unwrap_or_else(|| table.fallback());
        let roman = engine::render(text, table, fallback);
        debug!("Transliterated {} chars of {} text", text.chars().count(), table.name());

        Ok(roman)
    }
}
