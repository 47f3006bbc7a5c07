//! Per-category content severity scores
//!
//! Each category is scored on a 0-3 scale: none, mild, moderate, strong/explicit.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// Severity on the 0-3 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Severity(u8);

impl Severity {
    /// Highest severity
    pub const MAX: Self = Self(3);
    /// No content of this kind
    pub const NONE: Self = Self(0);

    /// Create a severity, rejecting values above 3
    pub fn new(value: u8) -> Result<Self, DomainError> {
        if value > Self::MAX.0 {
            return Err(DomainError::invalid_score("severity", value));
        }
        Ok(Self(value))
    }

    /// Create a severity, clamping values above 3
    #[must_use]
    pub const fn clamped(value: u8) -> Self {
        if value > Self::MAX.0 {
            Self::MAX
        } else {
            Self(value)
        }
    }

    /// Round a model-produced number to the nearest integer and clamp to 0-3
    ///
    /// Returns `None` for NaN.
    #[must_use]
    pub fn from_f64(value: f64) -> Option<Self> {
        if value.is_nan() {
            return None;
        }
        let rounded = value.round().clamp(0.0, f64::from(Self::MAX.0));
        // Clamped to 0..=3 above
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Some(Self(rounded as u8))
    }

    /// The raw value
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Severity {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        severity.0
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The five scored content categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreCategory {
    Violence,
    SexualContent,
    Language,
    Drugs,
    SelfHarm,
}

impl ScoreCategory {
    /// All categories in wire order
    pub const ALL: [Self; 5] = [
        Self::Violence,
        Self::SexualContent,
        Self::Language,
        Self::Drugs,
        Self::SelfHarm,
    ];

    /// JSON key of this category
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Violence => "violence",
            Self::SexualContent => "sexual_content",
            Self::Language => "language",
            Self::Drugs => "drugs",
            Self::SelfHarm => "self_harm",
        }
    }
}

impl fmt::Display for ScoreCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Severity scores for every category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryScores {
    pub violence: Severity,
    pub sexual_content: Severity,
    pub language: Severity,
    pub drugs: Severity,
    pub self_harm: Severity,
}

impl CategoryScores {
    /// Every category at the same severity
    #[must_use]
    pub const fn uniform(severity: Severity) -> Self {
        Self {
            violence: severity,
            sexual_content: severity,
            language: severity,
            drugs: severity,
            self_harm: severity,
        }
    }

    /// Score of one category
    #[must_use]
    pub const fn get(&self, category: ScoreCategory) -> Severity {
        match category {
            ScoreCategory::Violence => self.violence,
            ScoreCategory::SexualContent => self.sexual_content,
            ScoreCategory::Language => self.language,
            ScoreCategory::Drugs => self.drugs,
            ScoreCategory::SelfHarm => self.self_harm,
        }
    }

    /// Set the score of one category
    pub fn set(&mut self, category: ScoreCategory, severity: Severity) {
        let slot = match category {
            ScoreCategory::Violence => &mut self.violence,
            ScoreCategory::SexualContent => &mut self.sexual_content,
            ScoreCategory::Language => &mut self.language,
            ScoreCategory::Drugs => &mut self.drugs,
            ScoreCategory::SelfHarm => &mut self.self_harm,
        };
        *slot = severity;
    }

    /// Highest severity across all categories
    #[must_use]
    pub fn max(&self) -> Severity {
        ScoreCategory::ALL
            .into_iter()
            .map(|category| self.get(category))
            .max()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_rejects_out_of_range() {
        assert!(Severity::new(3).is_ok());
        assert!(Severity::new(4).is_err());
    }

    #[test]
    fn severity_clamps() {
        assert_eq!(Severity::clamped(9), Severity::MAX);
        assert_eq!(Severity::clamped(2).value(), 2);
    }

    #[test]
    fn severity_from_f64_rounds_and_clamps() {
        assert_eq!(Severity::from_f64(1.4).unwrap().value(), 1);
        assert_eq!(Severity::from_f64(1.6).unwrap().value(), 2);
        assert_eq!(Severity::from_f64(-2.0).unwrap().value(), 0);
        assert_eq!(Severity::from_f64(42.0).unwrap().value(), 3);
        assert!(Severity::from_f64(f64::NAN).is_none());
    }

    #[test]
    fn uniform_and_max() {
        let scores = CategoryScores::uniform(Severity::clamped(1));
        assert_eq!(scores.max().value(), 1);

        let mut scores = CategoryScores::default();
        assert_eq!(scores.max(), Severity::NONE);
        scores.set(ScoreCategory::Drugs, Severity::clamped(2));
        assert_eq!(scores.max().value(), 2);
        assert_eq!(scores.get(ScoreCategory::Drugs).value(), 2);
    }

    #[test]
    fn serializes_snake_case_numbers() {
        let mut scores = CategoryScores::default();
        scores.set(ScoreCategory::SelfHarm, Severity::clamped(3));
        let json = serde_json::to_value(scores).unwrap();
        assert_eq!(json["self_harm"], 3);
        assert_eq!(json["sexual_content"], 0);
    }

    #[test]
    fn deserialize_rejects_out_of_range() {
        let json = r#"{"violence":5,"sexual_content":0,"language":0,"drugs":0,"self_harm":0}"#;
        assert!(serde_json::from_str::<CategoryScores>(json).is_err());
    }

    #[test]
    fn category_keys() {
        let keys: Vec<_> = ScoreCategory::ALL.iter().map(|c| c.key()).collect();
        assert_eq!(
            keys,
            vec!["violence", "sexual_content", "language", "drugs", "self_harm"]
        );
    }
}
