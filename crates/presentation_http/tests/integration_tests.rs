//! Integration tests for HTTP handlers
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use application::{
    AudioClip, ClassificationService, CompletionPort, GuidelineTemplate, PromptPair,
    TranscriptionPort, error::ApplicationError,
};
use async_trait::async_trait;
use axum_test::{
    TestServer,
    multipart::{MultipartForm, Part},
};
use domain::{RatingTaxonomy, RawModelOutput, TranscriptionFailureKind, TranscriptionResult};
use infrastructure::AppConfig;
use presentation_http::{routes::create_router, state::AppState};
use serde_json::{Value, json};

const MODEL: &str = "test-model";
const STT_MODEL: &str = "whisper-1";

const PG_REPLY: &str = r#"{"rating":"PG","reasons":["Mild language"],"summary":"Family vlog with mild language","scores":{"violence":0,"language":1},"recommendation":"Suitable for most brands","confidence":0.8}"#;

type Reply = Box<dyn Fn(&PromptPair) -> Result<String, ApplicationError> + Send + Sync>;

/// Completion provider double that counts calls
struct FakeCompletion {
    reply: Reply,
    healthy: bool,
    calls: Arc<AtomicUsize>,
}

impl FakeCompletion {
    fn new(reply: Reply) -> Self {
        Self {
            reply,
            healthy: true,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn replying(content: impl Into<String>) -> Self {
        let content = content.into();
        Self::new(Box::new(move |_| Ok(content.clone())))
    }

    fn failing(error: fn() -> ApplicationError) -> Self {
        Self::new(Box::new(move |_| Err(error())))
    }
}

#[async_trait]
impl CompletionPort for FakeCompletion {
    async fn complete(&self, prompt: &PromptPair) -> Result<RawModelOutput, ApplicationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.reply)(prompt).map(|content| RawModelOutput::new(content, MODEL))
    }

    async fn is_healthy(&self) -> bool {
        self.healthy
    }

    fn model_name(&self) -> String {
        MODEL.to_string()
    }
}

/// Speech-to-text double returning a fixed outcome
struct FakeTranscription {
    outcome: TranscriptionResult,
    calls: Arc<AtomicUsize>,
}

impl FakeTranscription {
    fn new(outcome: TranscriptionResult) -> Self {
        Self {
            outcome,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl TranscriptionPort for FakeTranscription {
    async fn transcribe(&self, _clip: AudioClip) -> TranscriptionResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }

    async fn is_available(&self) -> bool {
        true
    }

    fn model_name(&self) -> String {
        STT_MODEL.to_string()
    }
}

struct Harness {
    server: TestServer,
    completion_calls: Arc<AtomicUsize>,
    transcription_calls: Arc<AtomicUsize>,
}

fn harness_with(
    completion: FakeCompletion,
    transcription: FakeTranscription,
    configure: impl FnOnce(&mut AppConfig),
) -> Harness {
    let mut config = AppConfig::default();
    configure(&mut config);

    let completion_calls = Arc::clone(&completion.calls);
    let transcription_calls = Arc::clone(&transcription.calls);
    let classifier = ClassificationService::new(
        Arc::new(completion),
        Arc::new(transcription),
        GuidelineTemplate::builtin(config.classifier.taxonomy),
    );
    let router = create_router(AppState::new(classifier, config));

    Harness {
        server: TestServer::new(router).expect("Failed to create test server"),
        completion_calls,
        transcription_calls,
    }
}

fn harness(completion: FakeCompletion) -> Harness {
    harness_with(
        completion,
        FakeTranscription::new(TranscriptionResult::NoSpeech),
        |_| {},
    )
}

fn audio_form(data: &[u8]) -> MultipartForm {
    MultipartForm::new()
        .add_text("handle", "@podcaster")
        .add_text("platform", "spotify")
        .add_part(
            "audio",
            Part::bytes(data.to_vec())
                .file_name("episode.mp3")
                .mime_type("audio/mpeg"),
        )
}

// ============ Health Tests ============

#[tokio::test]
async fn health_returns_ok() {
    let h = harness(FakeCompletion::replying(PG_REPLY));

    let response = h.server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn ready_reports_taxonomy_and_models() {
    let h = harness(FakeCompletion::replying(PG_REPLY));

    let response = h.server.get("/ready").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["ready"], true);
    assert_eq!(body["taxonomy"], "mpaa");
    assert_eq!(body["completion"]["model"], MODEL);
    assert_eq!(body["transcription"]["model"], STT_MODEL);
}

#[tokio::test]
async fn ready_unavailable_when_completion_unhealthy() {
    let mut completion = FakeCompletion::replying(PG_REPLY);
    completion.healthy = false;
    let h = harness(completion);

    let response = h.server.get("/ready").await;

    response.assert_status_service_unavailable();
    let body: Value = response.json();
    assert_eq!(body["ready"], false);
}

// ============ Classify Tests ============

#[tokio::test]
async fn classify_returns_normalized_result() {
    let h = harness(FakeCompletion::replying(PG_REPLY));

    let response = h
        .server
        .post("/classify")
        .json(&json!({
            "description": "Daily family vlog, occasional mild swearing",
            "handle": "@family",
            "platform": "youtube"
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["rating"], "PG");
    assert_eq!(body["riskLevel"], "Low");
    assert_eq!(body["isError"], false);
    assert_eq!(body["model"], MODEL);
    assert_eq!(body["reasons"], json!(["Mild language"]));
    assert_eq!(body["factors"], body["reasons"]);
    assert_eq!(body["thinking"][0], "Analyzing influencer: @family on youtube");
    assert_eq!(body["scores"]["language"], 1);
    assert_eq!(h.completion_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn classify_missing_description_is_rejected_before_provider() {
    let h = harness(FakeCompletion::replying(PG_REPLY));

    let response = h.server.post("/classify").json(&json!({"handle": "@x"})).await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["error"], "Description is required");
    assert_eq!(body["code"], "validation_error");
    assert_eq!(h.completion_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn classify_blank_description_is_rejected() {
    let h = harness(FakeCompletion::replying(PG_REPLY));

    let response = h
        .server
        .post("/classify")
        .json(&json!({"description": "   \n"}))
        .await;

    response.assert_status_bad_request();
    assert_eq!(h.completion_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn classify_malformed_json_is_rejected() {
    let h = harness(FakeCompletion::replying(PG_REPLY));

    let response = h
        .server
        .post("/classify")
        .text("{not json")
        .content_type("application/json")
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["code"], "invalid_json");
}

#[tokio::test]
async fn classify_accepts_fenced_reply() {
    let fenced = "```json\n{\"rating\":\"R\",\"reasons\":[\"Graphic violence\"],\"scores\":{\"violence\":3}}\n```";
    let h = harness(FakeCompletion::replying(fenced));

    let response = h
        .server
        .post("/classify")
        .json(&json!({"description": "Horror game streams"}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["rating"], "R");
    assert_eq!(body["riskLevel"], "High");
    assert_eq!(body["isError"], false);
}

#[tokio::test]
async fn classify_uses_configured_taxonomy() {
    let h = harness_with(
        FakeCompletion::new(Box::new(|prompt| {
            assert!(prompt.system.contains("I-PG13"));
            Ok(r#"{"rating":"I-PG13","reasons":["Crude jokes"]}"#.to_string())
        })),
        FakeTranscription::new(TranscriptionResult::NoSpeech),
        |config| config.classifier.taxonomy = RatingTaxonomy::Influencer,
    );

    let response = h
        .server
        .post("/classify")
        .json(&json!({"description": "Prank channel"}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["rating"], "I-PG13");
}

#[tokio::test]
async fn classify_unparseable_reply_falls_back() {
    let h = harness(FakeCompletion::replying("I'd say this is fine for kids."));

    let response = h
        .server
        .post("/classify")
        .json(&json!({"description": "Toy unboxing"}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["rating"], "PG-13");
    assert_eq!(body["isError"], true);
    assert_eq!(
        body["recommendation"],
        "Unable to classify - manual review recommended"
    );
}

#[tokio::test]
async fn classify_provider_outage_falls_back() {
    let h = harness(FakeCompletion::failing(|| {
        ApplicationError::ExternalService("connection reset".into())
    }));

    let response = h
        .server
        .post("/classify")
        .json(&json!({"description": "Toy unboxing"}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["rating"], "PG-13");
    assert_eq!(body["isError"], true);
}

#[tokio::test]
async fn classify_passes_through_unauthorized() {
    let h = harness(FakeCompletion::failing(|| {
        ApplicationError::NotAuthorized("key revoked".into())
    }));

    let response = h
        .server
        .post("/classify")
        .json(&json!({"description": "Toy unboxing"}))
        .await;

    response.assert_status_unauthorized();
    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid API key");
}

#[tokio::test]
async fn classify_passes_through_rate_limit() {
    let h = harness(FakeCompletion::failing(|| ApplicationError::RateLimited));

    let response = h
        .server
        .post("/classify")
        .json(&json!({"description": "Toy unboxing"}))
        .await;

    response.assert_status(axum::http::StatusCode::TOO_MANY_REQUESTS);
    let body: Value = response.json();
    assert_eq!(body["error"], "Rate limit exceeded. Please try again later.");
}

#[tokio::test]
async fn classify_missing_credentials_is_internal_error() {
    let h = harness(FakeCompletion::failing(|| {
        ApplicationError::Configuration("OPENAI_API_KEY is not set".into())
    }));

    let response = h
        .server
        .post("/classify")
        .json(&json!({"description": "Toy unboxing"}))
        .await;

    response.assert_status_internal_server_error();
    let body: Value = response.json();
    assert_eq!(body["code"], "internal_error");
}

// ============ Audio Tests ============

#[tokio::test]
async fn audio_without_file_is_rejected() {
    let h = harness(FakeCompletion::replying(PG_REPLY));

    let form = MultipartForm::new().add_text("handle", "@podcaster");
    let response = h.server.post("/classify-audio").multipart(form).await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["error"], "Audio file is required");
    assert_eq!(h.transcription_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn audio_without_speech_is_rated_general() {
    let h = harness(FakeCompletion::replying(PG_REPLY));

    let response = h
        .server
        .post("/classify-audio")
        .multipart(audio_form(b"ID3 silence"))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["rating"], "G");
    assert_eq!(body["transcription"], "");
    assert_eq!(body["confidence"], 0.0);
    assert_eq!(body["model"], STT_MODEL);
    assert_eq!(h.completion_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn audio_transcription_failure_returns_fallback_body() {
    let h = harness_with(
        FakeCompletion::replying(PG_REPLY),
        FakeTranscription::new(TranscriptionResult::failed(
            TranscriptionFailureKind::Transport,
            "upstream returned 502",
        )),
        |_| {},
    );

    let response = h
        .server
        .post("/classify-audio")
        .multipart(audio_form(b"ID3 data"))
        .await;

    response.assert_status_internal_server_error();
    let body: Value = response.json();
    assert_eq!(body["error"], "Audio transcription failed");
    assert_eq!(body["details"], "transport: upstream returned 502");
    assert_eq!(body["rating"], "PG");
    assert_eq!(body["isError"], true);
    assert_eq!(body["reasons"], json!(["Transcription failed: transport"]));
    assert_eq!(h.completion_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn audio_with_speech_is_transcribed_then_classified() {
    let h = harness_with(
        FakeCompletion::new(Box::new(|prompt| {
            assert!(prompt.user.contains("we talk about gardening"));
            Ok(PG_REPLY.to_string())
        })),
        FakeTranscription::new(TranscriptionResult::from_text("Today we talk about gardening")),
        |_| {},
    );

    let response = h
        .server
        .post("/classify-audio")
        .multipart(audio_form(b"ID3 data"))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["rating"], "PG");
    assert_eq!(body["transcription"], "Today we talk about gardening");
    assert_eq!(body["model"], "whisper-1 + test-model");
    assert_eq!(h.transcription_calls.load(Ordering::SeqCst), 1);
    assert_eq!(h.completion_calls.load(Ordering::SeqCst), 1);
}

// ============ Batch Tests ============

#[tokio::test]
async fn batch_isolates_failing_records() {
    let h = harness(FakeCompletion::new(Box::new(|prompt| {
        if prompt.user.contains("throttled") {
            Err(ApplicationError::RateLimited)
        } else {
            Ok(PG_REPLY.to_string())
        }
    })));

    let response = h
        .server
        .post("/classify-batch")
        .json(&json!({
            "influencers": [
                {"handle": "@one", "platform": "tiktok", "description": "Dance covers"},
                {"handle": "@two", "platform": "tiktok"},
                {"handle": "@three", "description": "throttled channel"}
            ]
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["total"], 3);
    assert_eq!(body["processed"], 3);

    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);

    assert_eq!(results[0]["handle"], "@one");
    assert_eq!(results[0]["rating"], "PG");
    assert!(results[0].get("error").is_none());

    assert_eq!(results[1]["handle"], "@two");
    assert_eq!(results[1]["error"], "Description is required");
    assert_eq!(results[1]["rating"], "PG-13");
    assert_eq!(results[1]["isError"], true);

    assert_eq!(results[2]["error"], "Rate limit exceeded");
    assert_eq!(results[2]["isError"], true);

    assert_eq!(h.completion_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn batch_isolates_malformed_records() {
    let h = harness(FakeCompletion::replying(PG_REPLY));

    let response = h
        .server
        .post("/classify-batch")
        .json(&json!({
            "influencers": [
                {"handle": "@one", "description": "cooking"},
                {"handle": "@two", "description": 5},
                {"handle": "@three", "description": "gaming"},
                "@four"
            ]
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["total"], 4);
    assert_eq!(body["processed"], 4);

    let results = body["results"].as_array().unwrap();
    assert_eq!(results[0]["rating"], "PG");
    assert!(results[0].get("error").is_none());

    assert_eq!(results[1]["handle"], "@two");
    assert_eq!(results[1]["isError"], true);
    assert_eq!(results[1]["rating"], "PG-13");
    assert!(
        results[1]["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid record: ")
    );

    assert_eq!(results[2]["handle"], "@three");
    assert_eq!(results[2]["rating"], "PG");
    assert_eq!(results[3]["isError"], true);

    assert_eq!(h.completion_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn batch_without_influencers_is_rejected() {
    let h = harness(FakeCompletion::replying(PG_REPLY));

    let response = h.server.post("/classify-batch").json(&json!({})).await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["error"], "Influencers array is required");
}

#[tokio::test]
async fn batch_over_limit_is_rejected() {
    let h = harness_with(
        FakeCompletion::replying(PG_REPLY),
        FakeTranscription::new(TranscriptionResult::NoSpeech),
        |config| config.classifier.max_batch_size = 2,
    );

    let records: Vec<Value> = (0..3)
        .map(|i| json!({"handle": format!("@{i}"), "description": "Cooking"}))
        .collect();
    let response = h
        .server
        .post("/classify-batch")
        .json(&json!({"influencers": records}))
        .await;

    response.assert_status_bad_request();
    assert_eq!(h.completion_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn batch_aborts_on_missing_credentials() {
    let h = harness(FakeCompletion::failing(|| {
        ApplicationError::Configuration("OPENAI_API_KEY is not set".into())
    }));

    let response = h
        .server
        .post("/classify-batch")
        .json(&json!({"influencers": [{"description": "Cooking"}, {"description": "Gaming"}]}))
        .await;

    response.assert_status_internal_server_error();
    assert_eq!(h.completion_calls.load(Ordering::SeqCst), 1);
}
