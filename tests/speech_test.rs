//! Integration tests for speech routing
//!
//! These tests drive the router and pipeline with in-process providers, so
//! they run without any vendor account or network access.

use async_trait::async_trait;
use peppi_core::config::Config;
use peppi_core::speech::backends::{AiVoiceProvider, VendorConfig};
use peppi_core::speech::{
    create_router, text_to_speech, AudioReference, SpeechOutcome, SpeechPipeline,
    SpeechProvider, SpeechRequest, SpeechRouter, VendorFailure, VoiceGender,
};
use peppi_core::translit::FallbackPolicy;
use peppi_core::{Language, PeppiError, Result, Transliterator};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Provider that answers every call the same way and counts calls
struct FixedProvider {
    name: &'static str,
    reply: fn(&str) -> Result<AudioReference>,
    calls: AtomicUsize,
}

impl FixedProvider {
    fn new(name: &'static str, reply: fn(&str) -> Result<AudioReference>) -> Arc<Self> {
        Arc::new(Self {
            name,
            reply,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechProvider for FixedProvider {
    fn name(&self) -> &str {
        self.name
    }

    async fn text_to_speech(&self, _request: &SpeechRequest) -> Result<AudioReference> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.reply)(self.name)
    }
}

fn audio(name: &str) -> Result<AudioReference> {
    Ok(AudioReference::Url {
        url: format!("https://cdn.invalid/{}.mp3", name),
    })
}

fn unavailable(name: &str) -> Result<AudioReference> {
    Err(PeppiError::unavailable(name, "no backend"))
}

fn rate_limited(name: &str) -> Result<AudioReference> {
    Err(VendorFailure::Status {
        code: 429,
        message: "slow down".to_string(),
        retry_after: Some(30),
    }
    .normalize(name))
}

fn rejected(name: &str) -> Result<AudioReference> {
    Err(VendorFailure::Status {
        code: 400,
        message: "text too long".to_string(),
        retry_after: None,
    }
    .normalize(name))
}

/// Provider that never answers within the router timeout
struct SlowProvider;

#[async_trait]
impl SpeechProvider for SlowProvider {
    fn name(&self) -> &str {
        "slow"
    }

    async fn text_to_speech(&self, request: &SpeechRequest) -> Result<AudioReference> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        audio(request.text())
    }
}

/// Provider that records the text it was asked to speak
#[derive(Default)]
struct RecordingProvider {
    heard: Mutex<Vec<String>>,
}

#[async_trait]
impl SpeechProvider for RecordingProvider {
    fn name(&self) -> &str {
        "recorder"
    }

    async fn text_to_speech(&self, request: &SpeechRequest) -> Result<AudioReference> {
        if let Ok(mut heard) = self.heard.lock() {
            heard.push(request.text().to_string());
        }
        audio("recorder")
    }
}

/// Provider that only voices Tamil
struct TamilOnly;

#[async_trait]
impl SpeechProvider for TamilOnly {
    fn name(&self) -> &str {
        "tamil-only"
    }

    fn supports_language(&self, language: Language) -> bool {
        language == Language::Tamil
    }

    async fn text_to_speech(&self, _request: &SpeechRequest) -> Result<AudioReference> {
        audio("tamil-only")
    }
}

fn stub_provider() -> AiVoiceProvider {
    AiVoiceProvider::new(VendorConfig {
        endpoint: String::new(),
        api_key: None,
        timeout: Duration::from_secs(1),
    })
}

fn hindi_request() -> SpeechRequest {
    SpeechRequest::new("नमस्ते", Language::Hindi, VoiceGender::Female).unwrap()
}

#[tokio::test]
async fn test_stub_provider_reports_unavailable() {
    let provider = stub_provider();
    let result = text_to_speech(&provider, "Hello", "hi", "female", None).await;
    match result {
        Err(PeppiError::CapabilityUnavailable { provider, .. }) => {
            assert_eq!(provider, "ai-voice");
        }
        other => panic!("Expected CapabilityUnavailable, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_inputs_rejected_before_provider() {
    let provider = FixedProvider::new("counted", audio);
    let inputs = [
        ("", "hi", "female"),
        ("Hello", "xx", "female"),
        ("Hello", "hi", "robot"),
    ];
    for (text, lang, gender) in inputs {
        let result = text_to_speech(&*provider, text, lang, gender, None).await;
        assert!(
            matches!(result, Err(PeppiError::InvalidRequest(_))),
            "{:?}/{:?}/{:?} should be invalid",
            text,
            lang,
            gender
        );
    }
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_router_with_only_stub_gives_text_only() {
    let router = SpeechRouter::new(Duration::from_secs(1)).with_provider(Arc::new(stub_provider()));
    let outcome = router.speak(&hindi_request()).await.unwrap();
    assert_eq!(
        outcome,
        SpeechOutcome::TextOnly {
            text: "नमस्ते".to_string(),
            romanized: None,
        }
    );
}

#[tokio::test]
async fn test_router_without_providers_gives_text_only() {
    let router = SpeechRouter::new(Duration::from_secs(1));
    let outcome = router.speak(&hindi_request()).await.unwrap();
    assert!(matches!(outcome, SpeechOutcome::TextOnly { .. }));
}

#[tokio::test]
async fn test_router_returns_audio() {
    let router =
        SpeechRouter::new(Duration::from_secs(1)).with_provider(FixedProvider::new("main", audio));
    let outcome = router.speak(&hindi_request()).await.unwrap();
    assert_eq!(
        outcome,
        SpeechOutcome::Audio {
            provider: "main".to_string(),
            audio: AudioReference::Url {
                url: "https://cdn.invalid/main.mp3".to_string(),
            },
        }
    );
}

#[tokio::test]
async fn test_router_falls_back_past_unavailable_provider() {
    let first = FixedProvider::new("first", unavailable);
    let second = FixedProvider::new("second", audio);
    let router = SpeechRouter::new(Duration::from_secs(1))
        .with_provider(first.clone())
        .with_provider(second.clone());
    assert_eq!(router.provider_names(), vec!["first", "second"]);

    let outcome = router.speak(&hindi_request()).await.unwrap();
    assert!(matches!(outcome, SpeechOutcome::Audio { ref provider, .. } if provider == "second"));
    assert_eq!(first.calls(), 1);
    assert_eq!(second.calls(), 1);
}

#[tokio::test]
async fn test_router_surfaces_transient_failure() {
    let router = SpeechRouter::new(Duration::from_secs(1))
        .with_provider(FixedProvider::new("busy", rate_limited))
        .with_provider(Arc::new(stub_provider()));

    let err = router.speak(&hindi_request()).await.unwrap_err();
    assert!(err.is_retryable());
    assert!(matches!(
        err,
        PeppiError::TransientProvider {
            retry_after: Some(30),
            ..
        }
    ));
}

#[tokio::test]
async fn test_router_transient_then_audio() {
    let router = SpeechRouter::new(Duration::from_secs(1))
        .with_provider(FixedProvider::new("busy", rate_limited))
        .with_provider(FixedProvider::new("backup", audio));

    let outcome = router.speak(&hindi_request()).await.unwrap();
    assert!(matches!(outcome, SpeechOutcome::Audio { ref provider, .. } if provider == "backup"));
}

#[tokio::test]
async fn test_router_times_out_slow_provider() {
    let router = SpeechRouter::new(Duration::from_millis(50)).with_provider(Arc::new(SlowProvider));

    let err = router.speak(&hindi_request()).await.unwrap_err();
    match err {
        PeppiError::TransientProvider { provider, .. } => assert_eq!(provider, "slow"),
        other => panic!("Expected TransientProvider, got {:?}", other),
    }
}

#[tokio::test]
async fn test_router_stops_on_invalid_request() {
    let first = FixedProvider::new("strict", rejected);
    let second = FixedProvider::new("backup", audio);
    let router = SpeechRouter::new(Duration::from_secs(1))
        .with_provider(first.clone())
        .with_provider(second.clone());

    let err = router.speak(&hindi_request()).await.unwrap_err();
    assert!(matches!(err, PeppiError::InvalidRequest(_)));
    assert_eq!(first.calls(), 1);
    assert_eq!(second.calls(), 0, "Invalid requests must not be retried elsewhere");
}

#[tokio::test]
async fn test_router_skips_unsupported_language() {
    let router = SpeechRouter::new(Duration::from_secs(1)).with_provider(Arc::new(TamilOnly));

    let outcome = router.speak(&hindi_request()).await.unwrap();
    assert!(matches!(outcome, SpeechOutcome::TextOnly { .. }));

    let tamil = SpeechRequest::new("வணக்கம்", Language::Tamil, VoiceGender::Male).unwrap();
    let outcome = router.speak(&tamil).await.unwrap();
    assert!(matches!(outcome, SpeechOutcome::Audio { .. }));
}

#[tokio::test]
async fn test_pipeline_text_only_carries_romanization() {
    let router = SpeechRouter::new(Duration::from_secs(1)).with_provider(Arc::new(stub_provider()));
    let pipeline = SpeechPipeline::new(router, Transliterator::new(), false);

    let outcome = pipeline.speak(&hindi_request()).await.unwrap();
    assert_eq!(
        outcome,
        SpeechOutcome::TextOnly {
            text: "नमस्ते".to_string(),
            romanized: Some("namaste".to_string()),
        }
    );

    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["outcome"], "text_only");
    assert_eq!(json["romanized"], "namaste");
}

#[tokio::test]
async fn test_pipeline_sends_romanized_text() {
    let recorder = Arc::new(RecordingProvider::default());
    let router = SpeechRouter::new(Duration::from_secs(1)).with_provider(recorder.clone());

    let pipeline = SpeechPipeline::new(router, Transliterator::new(), true);
    pipeline.speak(&hindi_request()).await.unwrap();

    let plain = SpeechPipeline::new(
        SpeechRouter::new(Duration::from_secs(1)).with_provider(recorder.clone()),
        Transliterator::new(),
        false,
    );
    plain.speak(&hindi_request()).await.unwrap();

    let heard = recorder.heard.lock().unwrap().clone();
    assert_eq!(heard, vec!["namaste".to_string(), "नमस्ते".to_string()]);
}

#[tokio::test]
async fn test_pipeline_speaks_original_when_romanization_is_blank() {
    let recorder = Arc::new(RecordingProvider::default());
    let router = SpeechRouter::new(Duration::from_secs(1)).with_provider(recorder.clone());
    let blank = Transliterator::with_fallback(FallbackPolicy::Placeholder(" ".to_string()));
    let pipeline = SpeechPipeline::new(router, blank, true);

    let request = SpeechRequest::new("😀", Language::Hindi, VoiceGender::Female).unwrap();
    let outcome = pipeline.speak(&request).await.unwrap();
    assert!(matches!(outcome, SpeechOutcome::Audio { .. }));

    let heard = recorder.heard.lock().unwrap().clone();
    assert_eq!(heard, vec!["😀".to_string()]);
}

#[tokio::test]
async fn test_pipeline_silent_sign_reaches_text_only() {
    let router = SpeechRouter::new(Duration::from_secs(1)).with_provider(Arc::new(stub_provider()));
    let pipeline = SpeechPipeline::new(router, Transliterator::new(), true);

    let request = SpeechRequest::new("ऽ", Language::Hindi, VoiceGender::Male).unwrap();
    let outcome = pipeline.speak(&request).await.unwrap();
    assert_eq!(
        outcome,
        SpeechOutcome::TextOnly {
            text: "ऽ".to_string(),
            romanized: Some("'".to_string()),
        }
    );
}

#[tokio::test]
async fn test_concurrent_requests_share_router() {
    let provider = FixedProvider::new("shared", audio);
    let router = Arc::new(
        SpeechRouter::new(Duration::from_secs(1)).with_provider(provider.clone()),
    );

    let mut handles = Vec::new();
    for text in ["नमस्ते", "पानी", "भारत", "घर"] {
        let router = Arc::clone(&router);
        handles.push(tokio::spawn(async move {
            let request = SpeechRequest::new(text, Language::Hindi, VoiceGender::Male).unwrap();
            router.speak(&request).await
        }));
    }
    for handle in handles {
        let outcome = handle.await.unwrap().unwrap();
        assert!(matches!(outcome, SpeechOutcome::Audio { .. }));
    }
    assert_eq!(provider.calls(), 4);
}

#[test]
fn test_create_router_from_config() {
    let config = Config::defaults();
    let router = create_router(&config).expect("Default config should build a router");
    assert_eq!(router.provider_names(), vec!["ai-voice"]);
    assert_eq!(router.timeout(), Duration::from_secs(10));

    let mut config = Config::defaults();
    config.set("speech", "providers", "ai-voice, carrier-pigeon");
    assert!(matches!(create_router(&config), Err(PeppiError::Config(_))));
}
