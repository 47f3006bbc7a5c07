//! Batch classification service
//!
//! Classifies records one after another. A record that fails gets a fallback
//! slot and processing continues; only a configuration error stops the batch,
//! since every remaining record would fail the same way.

use std::{fmt, sync::Arc};

use chrono::{DateTime, Utc};
use domain::{ClassificationRequest, ClassificationResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::{error::ApplicationError, services::ClassificationService};

/// Error attached to records submitted without a description
pub const DESCRIPTION_REQUIRED: &str = "Description is required";

/// One record of a batch submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRecord {
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl BatchRecord {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_handle(mut self, handle: impl Into<String>) -> Self {
        self.handle = Some(handle.into());
        self
    }

    #[must_use]
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }
}

/// A submitted entry that could not be read as a [`BatchRecord`]
///
/// String-valued `handle`, `platform` and `description` fields are kept so the
/// result slot can still echo them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MalformedRecord {
    pub handle: Option<String>,
    pub platform: Option<String>,
    pub description: Option<String>,
    pub error: String,
}

impl MalformedRecord {
    fn salvage(value: &Value, error: String) -> Self {
        let field = |name: &str| {
            value
                .get(name)
                .and_then(Value::as_str)
                .map(ToString::to_string)
        };
        Self {
            handle: field("handle"),
            platform: field("platform"),
            description: field("description"),
            error,
        }
    }
}

/// One position of a batch submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEntry {
    Record(BatchRecord),
    Malformed(MalformedRecord),
}

impl BatchEntry {
    /// Read one raw JSON entry; a shape error stays local to this entry
    pub fn from_json(value: Value) -> Self {
        match BatchRecord::deserialize(&value) {
            Ok(record) => Self::Record(record),
            Err(e) => Self::Malformed(MalformedRecord::salvage(
                &value,
                format!("Invalid record: {e}"),
            )),
        }
    }
}

impl From<BatchRecord> for BatchEntry {
    fn from(record: BatchRecord) -> Self {
        Self::Record(record)
    }
}

/// Result slot for one record, echoing its input
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItemResult {
    pub handle: Option<String>,
    pub platform: Option<String>,
    pub description: Option<String>,
    /// Why the record fell back, if it did
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub result: ClassificationResult,
}

/// Outcome of a whole batch
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    /// One entry per submitted record, in submission order
    pub results: Vec<BatchItemResult>,
    pub total: usize,
    /// Records processed, fallbacks included
    pub processed: usize,
    pub timestamp: DateTime<Utc>,
}

impl BatchReport {
    /// Number of records that fell back
    pub fn failed(&self) -> usize {
        self.results.iter().filter(|item| item.result.is_error()).count()
    }
}

/// Sequential batch orchestrator
pub struct BatchClassificationService {
    classifier: Arc<ClassificationService>,
}

impl fmt::Debug for BatchClassificationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchClassificationService")
            .field("classifier", &self.classifier)
            .finish()
    }
}

impl BatchClassificationService {
    pub const fn new(classifier: Arc<ClassificationService>) -> Self {
        Self { classifier }
    }

    /// Classify every record in order
    #[instrument(skip(self, entries), fields(total = entries.len()))]
    pub async fn classify_batch<E>(&self, entries: Vec<E>) -> Result<BatchReport, ApplicationError>
    where
        E: Into<BatchEntry> + Send,
    {
        let total = entries.len();
        let mut results = Vec::with_capacity(total);

        for (index, entry) in entries.into_iter().enumerate() {
            let item = match entry.into() {
                BatchEntry::Record(record) => self.classify_record(index, record).await?,
                BatchEntry::Malformed(malformed) => self.malformed_record(index, malformed),
            };
            results.push(item);
            info!(processed = index + 1, total, "Batch record done");
        }

        let report = BatchReport {
            processed: results.len(),
            results,
            total,
            timestamp: Utc::now(),
        };
        info!(
            total = report.total,
            failed = report.failed(),
            "Batch classification finished"
        );
        Ok(report)
    }

    async fn classify_record(
        &self,
        index: usize,
        record: BatchRecord,
    ) -> Result<BatchItemResult, ApplicationError> {
        let request = record.description.as_deref().map(|text| {
            ClassificationRequest::new(text).map(|request| {
                request
                    .with_handle(record.handle.as_deref())
                    .with_platform(record.platform.as_deref())
            })
        });

        let (result, error) = match request {
            Some(Ok(request)) => match self.classifier.classify(&request).await {
                Ok(result) => (result, None),
                Err(e @ ApplicationError::Configuration(_)) => return Err(e),
                Err(e) => {
                    warn!(index, error = %e, "Batch record failed, applying fallback");
                    (self.fallback(&e.to_string()), Some(e.to_string()))
                },
            },
            Some(Err(_)) | None => {
                warn!(index, "Batch record has no description");
                (
                    self.fallback(DESCRIPTION_REQUIRED),
                    Some(DESCRIPTION_REQUIRED.to_string()),
                )
            },
        };

        Ok(BatchItemResult {
            handle: record.handle,
            platform: record.platform,
            description: record.description,
            error,
            result,
        })
    }

    fn malformed_record(&self, index: usize, malformed: MalformedRecord) -> BatchItemResult {
        warn!(index, error = %malformed.error, "Batch record is malformed");
        BatchItemResult {
            result: self.fallback(&malformed.error),
            handle: malformed.handle,
            platform: malformed.platform,
            description: malformed.description,
            error: Some(malformed.error),
        }
    }

    fn fallback(&self, reason: &str) -> ClassificationResult {
        self.classifier
            .normalizer()
            .record_fallback(reason, &self.classifier.completion_model())
    }
}
