//! Speech-to-text outcomes
//!
//! A transcription either produced speech, produced nothing (silence), or
//! failed. Failures are values, not errors: the caller turns them into a
//! terminal fallback result for that request.

use std::fmt;

/// Why a transcription attempt failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranscriptionFailureKind {
    /// Missing or invalid provider configuration (e.g. no API key)
    Configuration,
    /// Provider rejected the credentials
    Authentication,
    /// Provider rate limit hit
    RateLimited,
    /// Network error, timeout or non-2xx status
    Transport,
    /// Audio rejected before or by the provider (too large, bad format)
    InvalidAudio,
    /// Provider answered with an unusable body
    InvalidResponse,
}

impl TranscriptionFailureKind {
    /// Stable short name used in logs and error bodies
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Authentication => "authentication",
            Self::RateLimited => "rate_limited",
            Self::Transport => "transport",
            Self::InvalidAudio => "invalid_audio",
            Self::InvalidResponse => "invalid_response",
        }
    }
}

impl fmt::Display for TranscriptionFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed transcription attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionFailure {
    pub kind: TranscriptionFailureKind,
    pub detail: String,
}

impl TranscriptionFailure {
    pub fn new(kind: TranscriptionFailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for TranscriptionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.detail)
    }
}

/// Result of transcribing one audio clip
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptionResult {
    /// Non-blank transcript
    Speech { text: String },
    /// Provider succeeded but returned no speech
    NoSpeech,
    /// Provider call failed
    Failed(TranscriptionFailure),
}

impl TranscriptionResult {
    /// Build a successful result; blank text means no speech was detected
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.trim().is_empty() {
            Self::NoSpeech
        } else {
            Self::Speech { text }
        }
    }

    /// Build a failed result
    pub fn failed(kind: TranscriptionFailureKind, detail: impl Into<String>) -> Self {
        Self::Failed(TranscriptionFailure::new(kind, detail))
    }

    /// Whether the provider call succeeded (silence counts as success)
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }

    /// Transcript text; empty for silence and failures
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Speech { text } => text,
            Self::NoSpeech | Self::Failed(_) => "",
        }
    }

    /// Failure detail, if the call failed
    #[must_use]
    pub fn error_detail(&self) -> Option<&str> {
        match self {
            Self::Failed(failure) => Some(&failure.detail),
            Self::Speech { .. } | Self::NoSpeech => None,
        }
    }
}
