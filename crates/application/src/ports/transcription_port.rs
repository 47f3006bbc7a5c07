//! Transcription port - Interface for speech-to-text providers

use async_trait::async_trait;
use domain::TranscriptionResult;
#[cfg(test)]
use mockall::automock;

/// An uploaded audio clip as received from the caller
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AudioClip {
    /// Raw audio bytes
    pub data: Vec<u8>,
    /// Declared content type of the upload, if any
    pub content_type: Option<String>,
    /// Original file name of the upload, if any
    pub file_name: Option<String>,
}

impl AudioClip {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: Option<String>) -> Self {
        self.content_type = content_type;
        self
    }

    #[must_use]
    pub fn with_file_name(mut self, file_name: Option<String>) -> Self {
        self.file_name = file_name;
        self
    }

    /// Size of the clip in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Port for speech-to-text operations
///
/// Failures are returned as `TranscriptionResult::Failed`, never as errors:
/// a failed transcription is terminal for that request and the caller builds
/// a fallback body from it.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TranscriptionPort: Send + Sync {
    /// Transcribe one clip with exactly one provider call
    async fn transcribe(&self, clip: AudioClip) -> TranscriptionResult;

    /// Check if the speech provider is configured and reachable
    async fn is_available(&self) -> bool;

    /// Model identifier used for transcription
    fn model_name(&self) -> String;
}
