//! Classification request entity

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Placeholder embedded in prompts for absent optional fields
pub const UNKNOWN_PLACEHOLDER: &str = "Unknown";

/// Where the subject text of a request came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentSource {
    /// Free-text content description supplied by the caller
    #[default]
    Description,
    /// Transcript of an uploaded audio clip
    AudioTranscript,
}

/// A single piece of influencer content to classify
///
/// Immutable once built. The subject text is never trimmed or truncated;
/// only blank values are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRequest {
    subject_text: String,
    handle: Option<String>,
    platform: Option<String>,
    source: ContentSource,
}

impl ClassificationRequest {
    /// Create a request for a content description
    pub fn new(subject_text: impl Into<String>) -> Result<Self, DomainError> {
        Self::from_source(subject_text, ContentSource::Description)
    }

    /// Create a request for an audio transcript
    pub fn from_transcript(transcript: impl Into<String>) -> Result<Self, DomainError> {
        Self::from_source(transcript, ContentSource::AudioTranscript)
    }

    fn from_source(subject_text: impl Into<String>, source: ContentSource) -> Result<Self, DomainError> {
        let subject_text = subject_text.into();
        if subject_text.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "Description is required".to_string(),
            ));
        }
        Ok(Self {
            subject_text,
            handle: None,
            platform: None,
            source,
        })
    }

    /// Attach the creator handle; blank values are treated as absent
    #[must_use]
    pub fn with_handle(mut self, handle: Option<impl Into<String>>) -> Self {
        self.handle = non_blank(handle);
        self
    }

    /// Attach the platform; blank values are treated as absent
    #[must_use]
    pub fn with_platform(mut self, platform: Option<impl Into<String>>) -> Self {
        self.platform = non_blank(platform);
        self
    }

    /// The full subject text
    #[must_use]
    pub fn subject_text(&self) -> &str {
        &self.subject_text
    }

    #[must_use]
    pub fn handle(&self) -> Option<&str> {
        self.handle.as_deref()
    }

    #[must_use]
    pub fn platform(&self) -> Option<&str> {
        self.platform.as_deref()
    }

    #[must_use]
    pub const fn source(&self) -> ContentSource {
        self.source
    }

    /// Handle for display, or the `Unknown` placeholder
    #[must_use]
    pub fn handle_or_unknown(&self) -> &str {
        self.handle().unwrap_or(UNKNOWN_PLACEHOLDER)
    }

    /// Platform for display, or the `Unknown` placeholder
    #[must_use]
    pub fn platform_or_unknown(&self) -> &str {
        self.platform().unwrap_or(UNKNOWN_PLACEHOLDER)
    }
}

fn non_blank(value: Option<impl Into<String>>) -> Option<String> {
    value.map(Into::into).filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_subject() {
        assert!(ClassificationRequest::new("").is_err());
        assert!(ClassificationRequest::new("   \n\t").is_err());
    }

    #[test]
    fn keeps_subject_verbatim() {
        let req = ClassificationRequest::new("  gaming clips with mild language ").unwrap();
        assert_eq!(req.subject_text(), "  gaming clips with mild language ");
        assert_eq!(req.source(), ContentSource::Description);
    }

    #[test]
    fn absent_fields_use_placeholder() {
        let req = ClassificationRequest::new("cooking videos").unwrap();
        assert_eq!(req.handle_or_unknown(), "Unknown");
        assert_eq!(req.platform_or_unknown(), "Unknown");
    }

    #[test]
    fn blank_fields_are_absent() {
        let req = ClassificationRequest::new("cooking videos")
            .unwrap()
            .with_handle(Some("  "))
            .with_platform(Some("TikTok"));
        assert!(req.handle().is_none());
        assert_eq!(req.platform(), Some("TikTok"));
    }

    #[test]
    fn transcript_source() {
        let req = ClassificationRequest::from_transcript("hello world").unwrap();
        assert_eq!(req.source(), ContentSource::AudioTranscript);
    }
}
