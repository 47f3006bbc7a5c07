//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod completion_port;
mod transcription_port;

#[cfg(test)]
pub use completion_port::MockCompletionPort;
pub use completion_port::{CompletionPort, PromptPair};
#[cfg(test)]
pub use transcription_port::MockTranscriptionPort;
pub use transcription_port::{AudioClip, TranscriptionPort};
