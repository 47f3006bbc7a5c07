//! Classifier configuration: taxonomy, guidelines and batch limits.

use std::path::PathBuf;

use domain::RatingTaxonomy;
use serde::{Deserialize, Serialize};

/// Classifier configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Rating taxonomy used by this deployment
    #[serde(default)]
    pub taxonomy: RatingTaxonomy,

    /// Replace the built-in guideline template with this file
    #[serde(default)]
    pub guidelines_path: Option<PathBuf>,

    /// Maximum records accepted by one batch request
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,
}

const fn default_max_batch_size() -> usize {
    100
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            taxonomy: RatingTaxonomy::default(),
            guidelines_path: None,
            max_batch_size: default_max_batch_size(),
        }
    }
}
