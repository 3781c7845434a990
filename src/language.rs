//! Supported languages and the scripts they are written in
//!
//! The language set is closed: every variant has a mapping table in
//! `translit::scripts`. Tags arriving from callers are parsed with
//! [`Language::from_str`], which is the only place `UnsupportedLanguage`
//! originates.

use crate::PeppiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Brahmic scripts covered by the transliteration tables
///
/// All of these Unicode blocks are ISCII-aligned: the same letter sits at the
/// same offset from the start of its block, which lets one inventory generate
/// most of every table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Script {
    Devanagari,
    Bengali,
    Gurmukhi,
    Gujarati,
    Oriya,
    Tamil,
    Telugu,
    Kannada,
    Malayalam,
}

impl Script {
    pub const ALL: [Script; 9] = [
        Script::Devanagari,
        Script::Bengali,
        Script::Gurmukhi,
        Script::Gujarati,
        Script::Oriya,
        Script::Tamil,
        Script::Telugu,
        Script::Kannada,
        Script::Malayalam,
    ];

    /// Script whose block holds `ch`, if any
    pub fn of(ch: char) -> Option<Script> {
        Script::ALL.iter().copied().find(|script| script.contains(ch))
    }

    /// First code point of the script's 128-code-point block
    pub fn block_start(self) -> u32 {
        match self {
            Script::Devanagari => 0x0900,
            Script::Bengali => 0x0980,
            Script::Gurmukhi => 0x0A00,
            Script::Gujarati => 0x0A80,
            Script::Oriya => 0x0B00,
            Script::Tamil => 0x0B80,
            Script::Telugu => 0x0C00,
            Script::Kannada => 0x0C80,
            Script::Malayalam => 0x0D00,
        }
    }

    /// Does the character belong to this script's block?
    pub fn contains(self, ch: char) -> bool {
        let start = self.block_start();
        (start..start + 0x80).contains(&(ch as u32))
    }
}

/// Languages the platform teaches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Language {
    Hindi,
    Marathi,
    Nepali,
    Bengali,
    Punjabi,
    Gujarati,
    Odia,
    Tamil,
    Telugu,
    Kannada,
    Malayalam,
}

impl Language {
    /// Every supported language, in table order
    pub const ALL: [Language; 11] = [
        Language::Hindi,
        Language::Marathi,
        Language::Nepali,
        Language::Bengali,
        Language::Punjabi,
        Language::Gujarati,
        Language::Odia,
        Language::Tamil,
        Language::Telugu,
        Language::Kannada,
        Language::Malayalam,
    ];

    /// ISO 639-1 code
    pub fn code(self) -> &'static str {
        match self {
            Language::Hindi => "hi",
            Language::Marathi => "mr",
            Language::Nepali => "ne",
            Language::Bengali => "bn",
            Language::Punjabi => "pa",
            Language::Gujarati => "gu",
            Language::Odia => "or",
            Language::Tamil => "ta",
            Language::Telugu => "te",
            Language::Kannada => "kn",
            Language::Malayalam => "ml",
        }
    }

    /// English name, lowercase
    pub fn name(self) -> &'static str {
        match self {
            Language::Hindi => "hindi",
            Language::Marathi => "marathi",
            Language::Nepali => "nepali",
            Language::Bengali => "bengali",
            Language::Punjabi => "punjabi",
            Language::Gujarati => "gujarati",
            Language::Odia => "odia",
            Language::Tamil => "tamil",
            Language::Telugu => "telugu",
            Language::Kannada => "kannada",
            Language::Malayalam => "malayalam",
        }
    }

    /// Script the language is written in
    pub fn script(self) -> Script {
        match self {
            Language::Hindi | Language::Marathi | Language::Nepali => Script::Devanagari,
            Language::Bengali => Script::Bengali,
            Language::Punjabi => Script::Gurmukhi,
            Language::Gujarati => Script::Gujarati,
            Language::Odia => Script::Oriya,
            Language::Tamil => Script::Tamil,
            Language::Telugu => Script::Telugu,
            Language::Kannada => Script::Kannada,
            Language::Malayalam => Script::Malayalam,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = PeppiError;

    /// Accepts "hi", "hi-IN", "ta_IN", "Hindi" (case-insensitive)
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let lower = tag.trim().to_ascii_lowercase();
        let primary = lower.split(['-', '_']).next().unwrap_or_default();
        // "or" was retired in favour of "od" by some clients; accept both
        let primary = if primary == "od" || primary == "oriya" { "or" } else { primary };

        Language::ALL
            .iter()
            .copied()
            .find(|lang| lang.code() == primary || lang.name() == primary)
            .ok_or_else(|| PeppiError::UnsupportedLanguage(tag.to_string()))
    }
}

impl TryFrom<String> for Language {
    type Error = PeppiError;

    fn try_from(tag: String) -> Result<Self, Self::Error> {
        tag.parse()
    }
}

impl From<Language> for String {
    fn from(lang: Language) -> Self {
        lang.code().to_string()
    }
}
