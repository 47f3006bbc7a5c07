//! Application services - Use case implementations

mod batch_service;
mod classification_service;

pub use batch_service::{
    BatchClassificationService, BatchEntry, BatchItemResult, BatchRecord, BatchReport,
    DESCRIPTION_REQUIRED, MalformedRecord,
};
pub use classification_service::{AudioClassification, ClassificationService};
