//! Normalization of vendor failures
//!
//! Providers describe what went wrong on the wire with [`VendorFailure`] and
//! convert it with [`VendorFailure::normalize`] before returning, so raw
//! vendor errors never cross the provider boundary.

use crate::PeppiError;
use std::fmt;

/// What a vendor call reported
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VendorFailure {
    /// No response within the deadline
    Timeout,
    /// Connection refused, reset, DNS failure, ...
    Connection(String),
    /// HTTP-style status from the vendor
    Status {
        code: u16,
        message: String,
        /// Seconds, from a Retry-After style hint
        retry_after: Option<u64>,
    },
    /// Response body could not be understood
    Decode(String),
}

impl fmt::Display for VendorFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "request timed out"),
            Self::Connection(message) => write!(f, "connection failed: {}", message),
            Self::Status { code, message, .. } => write!(f, "status {}: {}", code, message),
            Self::Decode(message) => write!(f, "undecodable response: {}", message),
        }
    }
}

impl VendorFailure {
    /// Map onto the shared taxonomy
    ///
    /// - timeouts, connection errors, 408, 429 and 5xx are transient
    /// - 400 and 422 mean the request itself was malformed
    /// - auth failures, other 4xx and undecodable responses mean the
    ///   provider cannot serve us until someone fixes it
    pub fn normalize(self, provider: &str) -> PeppiError {
        let description = self.to_string();
        match self {
            Self::Timeout | Self::Connection(_) => {
                PeppiError::transient(provider, description, None)
            }
            Self::Status {
                code, retry_after, ..
            } => match code {
                408 | 429 | 500..=599 => PeppiError::transient(provider, description, retry_after),
                400 | 422 => PeppiError::InvalidRequest(format!("[{}] {}", provider, description)),
                _ => PeppiError::unavailable(provider, description),
            },
            Self::Decode(_) => PeppiError::unavailable(provider, description),
        }
    }
}
