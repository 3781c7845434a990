//! Speech synthesis system

pub mod backends;
pub mod pipeline;
pub mod provider;
pub mod router;
pub mod vendor_error;

pub use pipeline::SpeechPipeline;
pub use provider::{text_to_speech, AudioReference, SpeechProvider, SpeechRequest, VoiceGender};
pub use router::{create_router, SpeechOutcome, SpeechRouter};
pub use vendor_error::VendorFailure;
