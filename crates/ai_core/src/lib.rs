//! AI Core - Chat-completion engine abstractions
//!
//! Provides the `InferenceEngine` port and an implementation for any
//! OpenAI-compatible `/chat/completions` endpoint (OpenRouter, OpenAI, vLLM).

pub mod config;
pub mod error;
pub mod openai;
pub mod ports;

pub use config::InferenceConfig;
pub use error::InferenceError;
pub use openai::OpenAiCompatibleEngine;
pub use ports::{InferenceEngine, InferenceMessage, InferenceRequest, InferenceResponse, TokenUsage};
