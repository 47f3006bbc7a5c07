//! Integration tests for infrastructure crate
//!
//! Tests cover:
//! - Completion adapter against a mocked chat-completions endpoint
//! - Transcription adapter against a mocked Whisper endpoint
//! - Full classification pipeline wired from configuration

use std::sync::Arc;

use application::{
    ApplicationError, AudioClassification, AudioClip, ClassificationService, CompletionPort,
    PromptPair, TranscriptionPort,
};
use domain::{ClassificationRequest, RiskLevel, TranscriptionFailureKind, TranscriptionResult};
use infrastructure::{AppConfig, OpenAiCompletionAdapter, SpeechTranscriptionAdapter};
use secrecy::SecretString;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> AppConfig {
    let mut config = AppConfig::default();
    config.inference.base_url = Some(server.uri());
    config.inference.api_key = Some(SecretString::from("sk-test"));
    config.inference.default_model = "test/model".to_string();
    config.speech.openai_base_url = server.uri();
    config.speech.openai_api_key = Some(SecretString::from("sk-whisper"));
    config
}

fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "model": "test/model-2025",
        "choices": [{
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

fn prompt() -> PromptPair {
    PromptPair {
        system: "Rate content.".to_string(),
        user: "Influencer: @a (YouTube)\nContent Description: cooking".to_string(),
    }
}

// ============================================================================
// Completion Adapter Tests
// ============================================================================

mod completion_adapter_tests {
    use super::*;

    #[tokio::test]
    async fn returns_raw_content_and_model() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("```json\n{}\n```")))
            .expect(1)
            .mount(&server)
            .await;

        let adapter =
            OpenAiCompletionAdapter::new(config_for(&server).inference.to_client_config()).unwrap();
        let raw = adapter.complete(&prompt()).await.unwrap();

        assert_eq!(raw.content, "```json\n{}\n```");
        assert_eq!(raw.model_name, "test/model-2025");
    }

    #[tokio::test]
    async fn unauthorized_is_typed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": { "message": "Invalid API key" }
            })))
            .mount(&server)
            .await;

        let adapter =
            OpenAiCompletionAdapter::new(config_for(&server).inference.to_client_config()).unwrap();
        let err = adapter.complete(&prompt()).await.unwrap_err();
        assert!(matches!(err, ApplicationError::NotAuthorized(_)));
    }

    #[tokio::test]
    async fn rate_limit_is_typed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let adapter =
            OpenAiCompletionAdapter::new(config_for(&server).inference.to_client_config()).unwrap();
        let err = adapter.complete(&prompt()).await.unwrap_err();
        assert!(matches!(err, ApplicationError::RateLimited));
    }

    #[tokio::test]
    async fn server_error_degrades() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let adapter =
            OpenAiCompletionAdapter::new(config_for(&server).inference.to_client_config()).unwrap();
        let err = adapter.complete(&prompt()).await.unwrap_err();
        assert!(err.degrades_to_fallback());
    }

    #[tokio::test]
    async fn missing_key_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut config = config_for(&server);
        config.inference.api_key = None;
        let adapter = OpenAiCompletionAdapter::new(config.inference.to_client_config()).unwrap();
        let err = adapter.complete(&prompt()).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Configuration(_)));
    }
}

// ============================================================================
// Transcription Adapter Tests
// ============================================================================

mod transcription_adapter_tests {
    use super::*;

    #[tokio::test]
    async fn transcribes_upload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .and(header("authorization", "Bearer sk-whisper"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "text": "hello everyone"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let adapter =
            SpeechTranscriptionAdapter::new(config_for(&server).speech.to_client_config()).unwrap();
        let clip = AudioClip::new(vec![0x1a, 0x45, 0xdf, 0xa3])
            .with_content_type(Some("audio/webm".into()))
            .with_file_name(Some("recording.webm".into()));

        assert_eq!(
            adapter.transcribe(clip).await,
            TranscriptionResult::Speech {
                text: "hello everyone".into()
            }
        );
    }

    #[tokio::test]
    async fn oversized_upload_fails_without_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut config = config_for(&server);
        config.speech.max_audio_bytes = 8;
        let adapter = SpeechTranscriptionAdapter::new(config.speech.to_client_config()).unwrap();

        let result = adapter.transcribe(AudioClip::new(vec![0; 64])).await;
        let TranscriptionResult::Failed(failure) = result else {
            unreachable!("Expected failure");
        };
        assert_eq!(failure.kind, TranscriptionFailureKind::InvalidAudio);
    }

    #[tokio::test]
    async fn missing_key_is_configuration_failure() {
        let server = MockServer::start().await;
        let mut config = config_for(&server);
        config.speech.openai_api_key = None;
        let adapter = SpeechTranscriptionAdapter::new(config.speech.to_client_config()).unwrap();

        let result = adapter.transcribe(AudioClip::new(vec![1, 2, 3])).await;
        let TranscriptionResult::Failed(failure) = result else {
            unreachable!("Expected failure");
        };
        assert_eq!(failure.kind, TranscriptionFailureKind::Configuration);
    }

    #[tokio::test]
    async fn provider_error_is_transport_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let adapter =
            SpeechTranscriptionAdapter::new(config_for(&server).speech.to_client_config()).unwrap();
        let result = adapter.transcribe(AudioClip::new(vec![1, 2, 3])).await;
        let TranscriptionResult::Failed(failure) = result else {
            unreachable!("Expected failure");
        };
        assert_eq!(failure.kind, TranscriptionFailureKind::Transport);
    }
}

// ============================================================================
// Pipeline Tests
// ============================================================================

mod pipeline_tests {
    use super::*;

    fn service(config: &AppConfig) -> ClassificationService {
        ClassificationService::new(
            Arc::new(OpenAiCompletionAdapter::new(config.inference.to_client_config()).unwrap()),
            Arc::new(SpeechTranscriptionAdapter::new(config.speech.to_client_config()).unwrap()),
            config.guideline_template().unwrap(),
        )
    }

    #[tokio::test]
    async fn fenced_reply_classified() {
        let server = MockServer::start().await;
        let reply = "```json\n{\"rating\":\"R\",\"reasons\":[\"Graphic violence\"],\"scores\":{\"violence\":3}}\n```";
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(reply)))
            .expect(1)
            .mount(&server)
            .await;

        let request = ClassificationRequest::new("Horror short film breakdown").unwrap();
        let result = service(&config_for(&server)).classify(&request).await.unwrap();

        assert_eq!(result.rating().label(), "R");
        assert_eq!(result.risk_level(), RiskLevel::High);
        assert_eq!(result.reasons(), ["Graphic violence"]);
        assert!(!result.is_error());
    }

    #[tokio::test]
    async fn timeout_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion_body("{}"))
                    .set_delay(std::time::Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let mut config = config_for(&server);
        config.inference.timeout_ms = 50;
        let request = ClassificationRequest::new("Unboxing video").unwrap();
        let result = service(&config).classify(&request).await.unwrap();

        assert!(result.is_error());
        assert_eq!(result.rating().label(), "PG-13");
    }

    #[tokio::test]
    async fn audio_end_to_end() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "text": "Welcome back to the channel"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(
                r#"{"rating":"G","reasons":["Friendly greeting"]}"#,
            )))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = service(&config_for(&server))
            .classify_audio(
                AudioClip::new(vec![1, 2, 3, 4]).with_content_type(Some("audio/mpeg".into())),
                Some("@host".into()),
                Some("Podcast".into()),
            )
            .await
            .unwrap();

        let AudioClassification::Classified(result) = outcome else {
            unreachable!("Expected classified outcome");
        };
        assert_eq!(result.rating().label(), "G");
        assert_eq!(result.transcription(), Some("Welcome back to the channel"));
        assert_eq!(result.model(), "whisper-1 + test/model-2025");
    }
}
