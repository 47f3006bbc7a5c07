//! Versioned rating guideline templates
//!
//! A template is the system instruction sent with every classification. It
//! names the taxonomy's labels and the JSON shape the result parser expects.

use domain::RatingTaxonomy;

const MPAA_V1: &str = include_str!("../guidelines/mpaa-v1.txt");
const INFLUENCER_V1: &str = include_str!("../guidelines/influencer-v1.txt");

/// Guideline text plus the taxonomy it instructs the model to use
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuidelineTemplate {
    taxonomy: RatingTaxonomy,
    version: String,
    text: String,
}

impl GuidelineTemplate {
    /// Built-in template for a taxonomy
    pub fn builtin(taxonomy: RatingTaxonomy) -> Self {
        let (version, text) = match taxonomy {
            RatingTaxonomy::Mpaa => ("mpaa-v1", MPAA_V1),
            RatingTaxonomy::Influencer => ("influencer-v1", INFLUENCER_V1),
        };
        Self {
            taxonomy,
            version: version.to_string(),
            text: text.to_string(),
        }
    }

    /// Operator-supplied template text
    pub fn custom(
        taxonomy: RatingTaxonomy,
        version: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            taxonomy,
            version: version.into(),
            text: text.into(),
        }
    }

    pub const fn taxonomy(&self) -> RatingTaxonomy {
        self.taxonomy
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}
