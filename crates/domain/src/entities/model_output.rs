//! Raw completion output

/// Text returned by a completion provider, not yet parsed
///
/// The content may be wrapped in code fences or contain no JSON at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawModelOutput {
    /// Reply text exactly as returned
    pub content: String,
    /// Model identifier that produced the reply
    pub model_name: String,
}

impl RawModelOutput {
    pub fn new(content: impl Into<String>, model_name: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            model_name: model_name.into(),
        }
    }
}
