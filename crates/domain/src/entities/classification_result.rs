//! Canonical classification result
//!
//! Every response body, genuine or fallback, is one of these. The risk level is
//! always derived from the rating and cannot be set independently.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{CategoryScores, Rating, RiskLevel};

/// Result of classifying one piece of content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    rating: Rating,
    risk_level: RiskLevel,
    summary: String,
    reasons: Vec<String>,
    factors: Vec<String>,
    thinking: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scores: Option<CategoryScores>,
    recommendation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    transcription: Option<String>,
    is_error: bool,
    model: String,
    timestamp: DateTime<Utc>,
}

impl ClassificationResult {
    /// Create a result for `rating`, stamped now
    pub fn new(rating: Rating, model: impl Into<String>) -> Self {
        Self {
            rating,
            risk_level: rating.risk_level(),
            summary: String::new(),
            reasons: Vec::new(),
            factors: Vec::new(),
            thinking: Vec::new(),
            scores: None,
            recommendation: String::new(),
            confidence: None,
            transcription: None,
            is_error: false,
            model: model.into(),
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Set the explanation list, exposed as both `reasons` and `factors`
    #[must_use]
    pub fn with_reasons(mut self, reasons: Vec<String>) -> Self {
        self.factors.clone_from(&reasons);
        self.reasons = reasons;
        self
    }

    #[must_use]
    pub fn with_thinking(mut self, thinking: Vec<String>) -> Self {
        self.thinking = thinking;
        self
    }

    #[must_use]
    pub fn with_scores(mut self, scores: CategoryScores) -> Self {
        self.scores = Some(scores);
        self
    }

    #[must_use]
    pub fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendation = recommendation.into();
        self
    }

    /// Attach a confidence; values outside [0, 1] are dropped
    #[must_use]
    pub fn with_confidence(mut self, confidence: Option<f64>) -> Self {
        self.confidence = confidence.filter(|c| (0.0..=1.0).contains(c));
        self
    }

    #[must_use]
    pub fn with_transcription(mut self, transcription: impl Into<String>) -> Self {
        self.transcription = Some(transcription.into());
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Mark as a fallback rather than a genuine classification
    #[must_use]
    pub fn as_fallback(mut self) -> Self {
        self.is_error = true;
        self
    }

    #[must_use]
    pub const fn rating(&self) -> Rating {
        self.rating
    }

    #[must_use]
    pub const fn risk_level(&self) -> RiskLevel {
        self.risk_level
    }

    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    #[must_use]
    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }

    #[must_use]
    pub fn factors(&self) -> &[String] {
        &self.factors
    }

    #[must_use]
    pub fn thinking(&self) -> &[String] {
        &self.thinking
    }

    #[must_use]
    pub const fn scores(&self) -> Option<&CategoryScores> {
        self.scores.as_ref()
    }

    #[must_use]
    pub fn recommendation(&self) -> &str {
        &self.recommendation
    }

    #[must_use]
    pub const fn confidence(&self) -> Option<f64> {
        self.confidence
    }

    #[must_use]
    pub fn transcription(&self) -> Option<&str> {
        self.transcription.as_deref()
    }

    /// Whether this is a fallback result
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.is_error
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
