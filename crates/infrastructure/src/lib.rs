//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer on top of the
//! `ai_core` and `ai_speech` clients, and loads the application
//! configuration.

pub mod adapters;
pub mod config;

pub use adapters::*;
pub use config::{
    AppConfig, ClassifierConfig, InferenceAppConfig, ServerConfig, SpeechAppConfig,
};
