//! Domain entities - Objects with identity and lifecycle

mod classification_request;
mod classification_result;
mod model_output;
mod transcription;

pub use classification_request::{ClassificationRequest, ContentSource, UNKNOWN_PLACEHOLDER};
pub use classification_result::ClassificationResult;
pub use model_output::RawModelOutput;
pub use transcription::{TranscriptionFailure, TranscriptionFailureKind, TranscriptionResult};
