//! Prompt construction for classification requests

use domain::{ClassificationRequest, ContentSource};

use crate::{guidelines::GuidelineTemplate, ports::PromptPair};

/// Builds the system/user prompt pair for a request
///
/// The subject text is embedded verbatim; absent handle or platform become
/// the literal `Unknown`.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    template: GuidelineTemplate,
}

impl PromptBuilder {
    pub const fn new(template: GuidelineTemplate) -> Self {
        Self { template }
    }

    pub const fn template(&self) -> &GuidelineTemplate {
        &self.template
    }

    /// Build the prompt pair for one request
    pub fn build(&self, request: &ClassificationRequest) -> PromptPair {
        let creator = format!(
            "Influencer: {} ({})",
            request.handle_or_unknown(),
            request.platform_or_unknown()
        );

        let user = match request.source() {
            ContentSource::Description => format!(
                "{creator}\nContent Description: {}",
                request.subject_text()
            ),
            ContentSource::AudioTranscript => format!(
                "{creator}\nClassify this audio transcription:\n\n\"{}\"\n\n\
                 Provide detailed analysis based on language, themes, and content maturity.",
                request.subject_text()
            ),
        };

        PromptPair {
            system: self.template.text().to_string(),
            user,
        }
    }
}
