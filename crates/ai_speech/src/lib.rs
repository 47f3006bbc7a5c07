//! AI Speech - Speech-to-Text abstractions
//!
//! Provides the `SpeechToText` port and two hosted providers:
//! - OpenAI Whisper (`/audio/transcriptions`)
//! - Hathora (`parakeet` and other hosted STT models)
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` module defines the trait (port)
//! - `providers` module contains concrete implementations (adapters)
//!
//! Exactly one provider is used per deployment; there is no fallback chain.
//!
//! # Example
//!
//! ```ignore
//! use ai_speech::{OpenAISpeechProvider, SpeechToText, AudioData, AudioFormat};
//!
//! let provider = OpenAISpeechProvider::new(config)?;
//! let audio = AudioData::new(bytes, AudioFormat::Webm);
//! let transcription = provider.transcribe(audio).await?;
//! ```

pub mod config;
pub mod error;
pub mod ports;
pub mod providers;
pub mod types;

pub use config::{SpeechConfig, SpeechProvider};
pub use error::SpeechError;
pub use ports::SpeechToText;
pub use providers::{HathoraSpeechProvider, OpenAISpeechProvider, create_provider};
pub use types::{AudioData, AudioFormat, Transcription};
