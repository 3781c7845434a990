//! Error types for the Peppi core
//!
//! One taxonomy is shared by the transliteration engine and every speech
//! provider. Vendor failures are normalized into it before they reach callers
//! (see `speech::vendor_error`).

use std::io;
use thiserror::Error;

/// Main error type for the Peppi core
#[derive(Error, Debug)]
pub enum PeppiError {
    /// Language tag is not one of the supported languages
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Malformed input: empty text, unknown gender or language enum value
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A speech provider has no working backend (stub, bad credentials, ...)
    #[error("[{provider}] Capability unavailable: {reason}")]
    CapabilityUnavailable { provider: String, reason: String },

    /// Network, timeout or quota failure from a vendor call
    #[error("[{provider}] Transient provider error: {message}")]
    TransientProvider {
        provider: String,
        message: String,
        /// Vendor-suggested delay in seconds before retrying, if any
        retry_after: Option<u64>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("INI parse error: {0}")]
    IniParse(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for Peppi operations
pub type Result<T> = std::result::Result<T, PeppiError>;

impl PeppiError {
    /// Create a capability-unavailable error for a provider
    pub fn unavailable(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        PeppiError::CapabilityUnavailable {
            provider: provider.into(),
            reason: reason.into(),
        }
    }

    /// Create a transient provider error
    pub fn transient(
        provider: impl Into<String>,
        message: impl Into<String>,
        retry_after: Option<u64>,
    ) -> Self {
        PeppiError::TransientProvider {
            provider: provider.into(),
            message: message.into(),
            retry_after,
        }
    }

    /// Can the caller retry the same call with backoff?
    pub fn is_retryable(&self) -> bool {
        matches!(self, PeppiError::TransientProvider { .. })
    }

    /// Should the caller degrade gracefully instead of failing the request?
    ///
    /// True for retryable failures and for providers without a working
    /// backend, where a text-only rendering is an acceptable answer.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PeppiError::TransientProvider { .. } | PeppiError::CapabilityUnavailable { .. }
        )
    }
}
