//! Classification service - single text and audio classification
//!
//! Orchestrates prompt building, the completion call, reply parsing and
//! normalization. Provider transport failures and unreadable replies are
//! absorbed into conservative fallback results; validation, configuration,
//! auth and rate-limit errors are returned to the caller.

use std::{fmt, sync::Arc};

use domain::{
    ClassificationRequest, ClassificationResult, RatingTaxonomy, TranscriptionFailure,
    TranscriptionResult,
};
use tracing::{debug, info, instrument, warn};

use crate::{
    error::ApplicationError,
    guidelines::GuidelineTemplate,
    normalizer::ResultNormalizer,
    ports::{AudioClip, CompletionPort, TranscriptionPort},
    prompt_builder::PromptBuilder,
    response_parser::parse_model_output,
};

/// Outcome of classifying an audio clip
#[derive(Debug, Clone)]
pub enum AudioClassification {
    /// Transcript classified, or silence detected
    Classified(ClassificationResult),
    /// Transcription failed; `result` is the terminal fallback body
    TranscriptionFailed {
        result: ClassificationResult,
        failure: TranscriptionFailure,
    },
}

impl AudioClassification {
    /// The result body, whichever way classification went
    pub const fn result(&self) -> &ClassificationResult {
        match self {
            Self::Classified(result) | Self::TranscriptionFailed { result, .. } => result,
        }
    }

    pub fn into_result(self) -> ClassificationResult {
        match self {
            Self::Classified(result) | Self::TranscriptionFailed { result, .. } => result,
        }
    }
}

/// Service classifying text descriptions and audio clips
pub struct ClassificationService {
    completion: Arc<dyn CompletionPort>,
    transcription: Arc<dyn TranscriptionPort>,
    prompts: PromptBuilder,
    normalizer: ResultNormalizer,
}

impl fmt::Debug for ClassificationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassificationService")
            .field("taxonomy", &self.normalizer.taxonomy())
            .field("guidelines", &self.prompts.template().version())
            .finish_non_exhaustive()
    }
}

impl ClassificationService {
    /// Create a service rating against `template`'s taxonomy
    pub fn new(
        completion: Arc<dyn CompletionPort>,
        transcription: Arc<dyn TranscriptionPort>,
        template: GuidelineTemplate,
    ) -> Self {
        let normalizer = ResultNormalizer::new(template.taxonomy());
        Self {
            completion,
            transcription,
            prompts: PromptBuilder::new(template),
            normalizer,
        }
    }

    pub const fn taxonomy(&self) -> RatingTaxonomy {
        self.normalizer.taxonomy()
    }

    pub const fn normalizer(&self) -> &ResultNormalizer {
        &self.normalizer
    }

    pub fn completion_model(&self) -> String {
        self.completion.model_name()
    }

    pub fn transcription_model(&self) -> String {
        self.transcription.model_name()
    }

    /// Whether the completion provider is reachable
    pub async fn is_healthy(&self) -> bool {
        self.completion.is_healthy().await
    }

    pub async fn is_transcription_available(&self) -> bool {
        self.transcription.is_available().await
    }

    /// Classify one request
    #[instrument(skip(self, request), fields(
        text_len = request.subject_text().len(),
        source = ?request.source(),
    ))]
    pub async fn classify(
        &self,
        request: &ClassificationRequest,
    ) -> Result<ClassificationResult, ApplicationError> {
        let prompt = self.prompts.build(request);
        debug!(
            system_len = prompt.system.len(),
            user_len = prompt.user.len(),
            "Built classification prompt"
        );

        let raw = match self.completion.complete(&prompt).await {
            Ok(raw) => raw,
            Err(e) if e.degrades_to_fallback() => {
                warn!(error = %e, "Completion unavailable, applying conservative rating");
                return Ok(self
                    .normalizer
                    .unavailable_fallback(request, &self.completion.model_name()));
            },
            Err(e) => return Err(e),
        };

        let result = match parse_model_output(&raw.content) {
            Ok(verdict) => self.normalizer.normalize(verdict, request, &raw.model_name),
            Err(e) => {
                warn!(
                    error = %e,
                    reply_len = raw.content.len(),
                    "Model reply unreadable, applying conservative rating"
                );
                self.normalizer.parse_fallback(request, &raw.model_name)
            },
        };

        info!(
            rating = %result.rating(),
            risk = %result.risk_level(),
            is_error = result.is_error(),
            "Content classified"
        );
        Ok(result)
    }

    /// Transcribe and classify an audio clip
    ///
    /// A failed transcription is terminal and yields the transcription
    /// fallback body. Silence yields the most permissive rating without a
    /// completion call.
    #[instrument(skip(self, clip, handle, platform), fields(audio_size = clip.len()))]
    pub async fn classify_audio(
        &self,
        clip: AudioClip,
        handle: Option<String>,
        platform: Option<String>,
    ) -> Result<AudioClassification, ApplicationError> {
        let stt_model = self.transcription.model_name();

        let text = match self.transcription.transcribe(clip).await {
            TranscriptionResult::Speech { text } => text,
            TranscriptionResult::NoSpeech => {
                info!("No speech detected in audio");
                return Ok(AudioClassification::Classified(
                    self.normalizer.no_speech(&stt_model),
                ));
            },
            TranscriptionResult::Failed(failure) => {
                warn!(kind = %failure.kind, detail = %failure.detail, "Transcription failed");
                return Ok(AudioClassification::TranscriptionFailed {
                    result: self.normalizer.transcription_failed(&failure, &stt_model),
                    failure,
                });
            },
        };
        debug!(transcript_len = text.len(), "Audio transcribed");

        let request = ClassificationRequest::from_transcript(text.as_str())?
            .with_handle(handle)
            .with_platform(platform);
        let result = self.classify(&request).await?;
        let model = format!("{stt_model} + {}", result.model());

        Ok(AudioClassification::Classified(
            result.with_transcription(text).with_model(model),
        ))
    }
}
