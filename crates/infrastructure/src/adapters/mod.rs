//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod completion_adapter;
mod transcription_adapter;

pub use completion_adapter::OpenAiCompletionAdapter;
pub use transcription_adapter::SpeechTranscriptionAdapter;
