//! Result normalization and fallbacks
//!
//! Turns a parsed model verdict, or the absence of one, into the canonical
//! [`ClassificationResult`]. The rating always belongs to the active taxonomy,
//! is never below the floor implied by the highest category score, and the
//! risk level is derived from it.

use domain::{
    CategoryScores, ClassificationRequest, ClassificationResult, MaturityTier, Rating,
    RatingTaxonomy, Severity, TranscriptionFailure,
};
use tracing::warn;

use crate::response_parser::ModelVerdict;

pub const DEFAULT_SUMMARY: &str = "Content classified";
pub const DEFAULT_RECOMMENDATION: &str = "No recommendation provided";
pub const PARSE_FALLBACK_REASON: &str = "Classification failed - conservative rating applied";
pub const UNAVAILABLE_FALLBACK_REASON: &str =
    "Classification unavailable - conservative rating applied";
pub const FALLBACK_RECOMMENDATION: &str = "Unable to classify - manual review recommended";
pub const NO_SPEECH_SUMMARY: &str = "No speech detected in audio file.";
pub const NO_SPEECH_FACTOR: &str = "No transcribable content found";
pub const NO_SPEECH_RECOMMENDATION: &str = "Unable to classify - no content detected";
pub const TRANSCRIPTION_FAILED_SUMMARY: &str = "Unable to transcribe audio.";
pub const TRANSCRIPTION_FAILED_RECOMMENDATION: &str =
    "Audio could not be transcribed - retry or submit a text description";

/// Severity every category gets in a fallback result
const FALLBACK_SEVERITY: Severity = Severity::clamped(1);

/// Builds canonical results for one taxonomy
#[derive(Debug, Clone, Copy)]
pub struct ResultNormalizer {
    taxonomy: RatingTaxonomy,
}

impl ResultNormalizer {
    #[must_use]
    pub const fn new(taxonomy: RatingTaxonomy) -> Self {
        Self { taxonomy }
    }

    #[must_use]
    pub const fn taxonomy(&self) -> RatingTaxonomy {
        self.taxonomy
    }

    /// Normalize a parsed verdict
    ///
    /// Schema violations keep whatever the model got right and mark the
    /// result as an error. An unrecognized rating resolves to the
    /// conservative default, raised to the severity floor if needed.
    pub fn normalize(
        &self,
        verdict: ModelVerdict,
        request: &ClassificationRequest,
        model: &str,
    ) -> ClassificationResult {
        let floor = verdict
            .scores
            .as_ref()
            .map_or(MaturityTier::General, |scores| {
                MaturityTier::floor_for_severity(scores.max())
            });

        let parsed = verdict
            .rating
            .as_deref()
            .and_then(|label| self.taxonomy.parse(label));
        let is_error = parsed.is_none() || verdict.has_violations();
        if is_error {
            warn!(
                rating = ?verdict.rating,
                violations = ?verdict.violations,
                "Model reply deviated from the output schema"
            );
        }

        let rating = parsed
            .unwrap_or_else(|| self.taxonomy.conservative_default())
            .at_least(floor);

        let reasons = verdict.reasons.unwrap_or_default();
        let summary = verdict
            .summary
            .or_else(|| reasons.first().cloned())
            .unwrap_or_else(|| DEFAULT_SUMMARY.to_string());

        let mut result = ClassificationResult::new(rating, model)
            .with_summary(summary)
            .with_thinking(self.thinking(request, rating, &reasons))
            .with_reasons(reasons)
            .with_recommendation(
                verdict
                    .recommendation
                    .unwrap_or_else(|| DEFAULT_RECOMMENDATION.to_string()),
            )
            .with_confidence(verdict.confidence);
        if let Some(scores) = verdict.scores {
            result = result.with_scores(scores);
        }
        if is_error {
            result = result.as_fallback();
        }
        result
    }

    /// Result for a reply that could not be parsed at all
    pub fn parse_fallback(&self, request: &ClassificationRequest, model: &str) -> ClassificationResult {
        self.conservative(request, model, PARSE_FALLBACK_REASON)
    }

    /// Result for a completion call that failed in transport
    pub fn unavailable_fallback(
        &self,
        request: &ClassificationRequest,
        model: &str,
    ) -> ClassificationResult {
        self.conservative(request, model, UNAVAILABLE_FALLBACK_REASON)
    }

    /// Fallback for a batch record that never reached the model
    pub fn record_fallback(&self, reason: &str, model: &str) -> ClassificationResult {
        let rating = self.taxonomy.conservative_default();
        ClassificationResult::new(rating, model)
            .with_summary(reason)
            .with_reasons(vec![reason.to_string()])
            .with_scores(CategoryScores::uniform(FALLBACK_SEVERITY))
            .with_recommendation(FALLBACK_RECOMMENDATION)
            .as_fallback()
    }

    /// Result for audio in which no speech was found
    pub fn no_speech(&self, model: &str) -> ClassificationResult {
        ClassificationResult::new(self.taxonomy.most_permissive(), model)
            .with_summary(NO_SPEECH_SUMMARY)
            .with_reasons(vec![NO_SPEECH_FACTOR.to_string()])
            .with_scores(CategoryScores::default())
            .with_recommendation(NO_SPEECH_RECOMMENDATION)
            .with_confidence(Some(0.0))
            .with_transcription("")
    }

    /// Terminal result for a failed transcription
    pub fn transcription_failed(
        &self,
        failure: &TranscriptionFailure,
        model: &str,
    ) -> ClassificationResult {
        ClassificationResult::new(self.taxonomy.second_most_permissive(), model)
            .with_summary(TRANSCRIPTION_FAILED_SUMMARY)
            .with_reasons(vec![format!("Transcription failed: {}", failure.kind)])
            .with_recommendation(TRANSCRIPTION_FAILED_RECOMMENDATION)
            .with_transcription("")
            .as_fallback()
    }

    fn conservative(
        &self,
        request: &ClassificationRequest,
        model: &str,
        reason: &str,
    ) -> ClassificationResult {
        let rating = self.taxonomy.conservative_default();
        let reasons = vec![reason.to_string()];
        ClassificationResult::new(rating, model)
            .with_summary(reason)
            .with_thinking(self.thinking(request, rating, &reasons))
            .with_reasons(reasons)
            .with_scores(CategoryScores::uniform(FALLBACK_SEVERITY))
            .with_recommendation(FALLBACK_RECOMMENDATION)
            .as_fallback()
    }

    /// Step list shown by the presentation layer: preamble, reasons, risk
    fn thinking(
        &self,
        request: &ClassificationRequest,
        rating: Rating,
        reasons: &[String],
    ) -> Vec<String> {
        let mut steps = Vec::with_capacity(reasons.len() + 3);
        steps.push(format!(
            "Analyzing influencer: {} on {}",
            request.handle_or_unknown(),
            request.platform_or_unknown()
        ));
        steps.push(format!("Content rating: {}", rating.label()));
        steps.extend(reasons.iter().cloned());
        steps.push(format!("Risk level: {}", rating.risk_level()));
        steps
    }
}

impl Default for ResultNormalizer {
    fn default() -> Self {
        Self::new(RatingTaxonomy::default())
    }
}
