//! Application layer - Use cases and orchestration
//!
//! Contains the classification use cases, the ports they depend on, and the
//! prompt, parsing and normalization steps between them.

pub mod error;
pub mod guidelines;
pub mod normalizer;
pub mod ports;
pub mod prompt_builder;
pub mod response_parser;
pub mod services;

pub use error::ApplicationError;
pub use guidelines::GuidelineTemplate;
pub use normalizer::ResultNormalizer;
pub use ports::*;
pub use prompt_builder::PromptBuilder;
pub use response_parser::{ModelVerdict, ParseError, parse_model_output, strip_code_fences};
pub use services::*;
