//! Application state shared across handlers

use std::sync::Arc;

use application::{BatchClassificationService, ClassificationService};
use infrastructure::AppConfig;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Single text and audio classification
    pub classifier: Arc<ClassificationService>,
    /// Sequential batch classification
    pub batch: Arc<BatchClassificationService>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Build the state, sharing `classifier` with the batch service
    pub fn new(classifier: ClassificationService, config: AppConfig) -> Self {
        let classifier = Arc::new(classifier);
        Self {
            batch: Arc::new(BatchClassificationService::new(Arc::clone(&classifier))),
            classifier,
            config: Arc::new(config),
        }
    }
}
