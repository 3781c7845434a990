//! Peppi core - transliteration and speech for Peppi Academy
//!
//! Converts Indian-script text into Roman phonetic spelling, scores learners'
//! typed answers against canonical ones, and puts text-to-speech vendors
//! behind one provider contract.

pub mod config;
pub mod error;
pub mod language;
pub mod similarity;
pub mod speech;
pub mod translit;

pub use error::{PeppiError, Result};
pub use language::{Language, Script};
pub use similarity::{similarity, AnswerMatcher};
pub use translit::{transliterate, transliterate_code, Transliterator};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "peppi";
