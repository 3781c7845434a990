//! Concrete speech providers

// Third-party AI voice vendor (not yet integrated)
pub mod ai_voice;

pub use ai_voice::{AiVoiceProvider, VendorConfig};
