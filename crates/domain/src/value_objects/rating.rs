//! Content maturity ratings
//!
//! A [`Rating`] pairs an ordered [`MaturityTier`] with the [`RatingTaxonomy`]
//! whose labels it is presented in. Two taxonomies exist:
//!
//! - `Mpaa`: G < PG < PG-13 < R
//! - `Influencer`: I-G < I-PG < I-PG13 < I-R < I-NC17
//!
//! The tier drives every invariant (ordering, risk level, severity floor);
//! the taxonomy only decides which tiers are allowed and how they are spelled.

use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{RiskLevel, Severity};
use crate::errors::DomainError;

/// Ordered maturity tier, from most permissive to most restrictive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MaturityTier {
    /// Suitable for all audiences
    General,
    /// Mild elements, parental guidance suggested
    ParentalGuidance,
    /// Moderately mature content
    ParentsStronglyCautioned,
    /// Strong mature themes
    Restricted,
    /// Fully adult content (influencer taxonomy only)
    AdultsOnly,
}

impl MaturityTier {
    /// Risk level derived from this tier
    ///
    /// Total and monotonic: a more restrictive tier never yields a lower risk.
    #[must_use]
    pub const fn risk_level(self) -> RiskLevel {
        match self {
            Self::General | Self::ParentalGuidance => RiskLevel::Low,
            Self::ParentsStronglyCautioned => RiskLevel::Medium,
            Self::Restricted => RiskLevel::High,
            Self::AdultsOnly => RiskLevel::Critical,
        }
    }

    /// Lowest tier compatible with the given maximum category severity
    ///
    /// none → General, mild → ParentalGuidance, moderate → ParentsStronglyCautioned,
    /// strong/explicit → Restricted.
    #[must_use]
    pub const fn floor_for_severity(severity: Severity) -> Self {
        match severity.value() {
            0 => Self::General,
            1 => Self::ParentalGuidance,
            2 => Self::ParentsStronglyCautioned,
            _ => Self::Restricted,
        }
    }

    /// Canonical key used for tolerant label matching
    const fn key(self) -> &'static str {
        match self {
            Self::General => "G",
            Self::ParentalGuidance => "PG",
            Self::ParentsStronglyCautioned => "PG13",
            Self::Restricted => "R",
            Self::AdultsOnly => "NC17",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        Self::all().into_iter().find(|tier| tier.key() == key)
    }

    /// All tiers in ascending order of maturity
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::General,
            Self::ParentalGuidance,
            Self::ParentsStronglyCautioned,
            Self::Restricted,
            Self::AdultsOnly,
        ]
    }
}

/// Rating taxonomy in use for a deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingTaxonomy {
    /// G / PG / PG-13 / R
    #[default]
    Mpaa,
    /// I-G / I-PG / I-PG13 / I-R / I-NC17
    Influencer,
}

impl RatingTaxonomy {
    /// Tiers available in this taxonomy, ascending
    #[must_use]
    pub fn tiers(self) -> &'static [MaturityTier] {
        const MPAA: [MaturityTier; 4] = [
            MaturityTier::General,
            MaturityTier::ParentalGuidance,
            MaturityTier::ParentsStronglyCautioned,
            MaturityTier::Restricted,
        ];
        const INFLUENCER: [MaturityTier; 5] = MaturityTier::all();

        match self {
            Self::Mpaa => &MPAA,
            Self::Influencer => &INFLUENCER,
        }
    }

    /// Whether the tier belongs to this taxonomy
    #[must_use]
    pub fn contains(self, tier: MaturityTier) -> bool {
        self.tiers().contains(&tier)
    }

    /// Display label of a tier in this taxonomy
    #[must_use]
    pub const fn label(self, tier: MaturityTier) -> &'static str {
        match (self, tier) {
            (Self::Mpaa, MaturityTier::General) => "G",
            (Self::Mpaa, MaturityTier::ParentalGuidance) => "PG",
            (Self::Mpaa, MaturityTier::ParentsStronglyCautioned) => "PG-13",
            // NC-17 is not part of the MPAA set; callers never build one, see `rating`.
            (Self::Mpaa, MaturityTier::Restricted | MaturityTier::AdultsOnly) => "R",
            (Self::Influencer, MaturityTier::General) => "I-G",
            (Self::Influencer, MaturityTier::ParentalGuidance) => "I-PG",
            (Self::Influencer, MaturityTier::ParentsStronglyCautioned) => "I-PG13",
            (Self::Influencer, MaturityTier::Restricted) => "I-R",
            (Self::Influencer, MaturityTier::AdultsOnly) => "I-NC17",
        }
    }

    /// Build a rating in this taxonomy
    ///
    /// Tiers outside the taxonomy are clamped to its most restrictive tier.
    #[must_use]
    pub fn rating(self, tier: MaturityTier) -> Rating {
        let tier = if self.contains(tier) {
            tier
        } else {
            self.most_restrictive().tier
        };
        Rating {
            taxonomy: self,
            tier,
        }
    }

    /// Parse a model-produced label, tolerating case, whitespace, an `I-`
    /// prefix and missing hyphens
    ///
    /// Returns `None` for labels that do not name a tier of this taxonomy.
    #[must_use]
    pub fn parse(self, label: &str) -> Option<Rating> {
        let upper = label.trim().to_ascii_uppercase();
        let stripped = upper.strip_prefix("I-").unwrap_or(&upper);
        let key: String = stripped
            .chars()
            .filter(|c| !matches!(c, '-' | ' ' | '_'))
            .collect();

        MaturityTier::from_key(&key)
            .filter(|tier| self.contains(*tier))
            .map(|tier| Rating {
                taxonomy: self,
                tier,
            })
    }

    /// The most permissive rating (used for silent audio)
    #[must_use]
    pub fn most_permissive(self) -> Rating {
        self.rating(MaturityTier::General)
    }

    /// The second-most-permissive rating (used when transcription fails)
    #[must_use]
    pub fn second_most_permissive(self) -> Rating {
        self.rating(MaturityTier::ParentalGuidance)
    }

    /// The conservative default applied when classification cannot be trusted
    #[must_use]
    pub fn conservative_default(self) -> Rating {
        self.rating(MaturityTier::ParentsStronglyCautioned)
    }

    /// The most restrictive rating of this taxonomy
    #[must_use]
    pub fn most_restrictive(self) -> Rating {
        let tier = self
            .tiers()
            .last()
            .copied()
            .unwrap_or(MaturityTier::Restricted);
        Rating {
            taxonomy: self,
            tier,
        }
    }

    /// All labels of this taxonomy joined for prompts and error messages
    #[must_use]
    pub fn labels(self) -> Vec<&'static str> {
        self.tiers().iter().map(|tier| self.label(*tier)).collect()
    }
}

impl fmt::Display for RatingTaxonomy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mpaa => write!(f, "mpaa"),
            Self::Influencer => write!(f, "influencer"),
        }
    }
}

impl FromStr for RatingTaxonomy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mpaa" => Ok(Self::Mpaa),
            "influencer" => Ok(Self::Influencer),
            other => Err(DomainError::ValidationError(format!(
                "Unknown rating taxonomy: {other}. Use 'mpaa' or 'influencer'"
            ))),
        }
    }
}

/// A maturity rating expressed in a specific taxonomy
///
/// Serializes as its label (`"PG-13"`, `"I-NC17"`, ...). Labels are unique
/// across taxonomies, so deserialization recovers the taxonomy as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rating {
    taxonomy: RatingTaxonomy,
    tier: MaturityTier,
}

impl Rating {
    /// The ordered tier
    #[must_use]
    pub const fn tier(&self) -> MaturityTier {
        self.tier
    }

    /// The taxonomy this rating is labelled in
    #[must_use]
    pub const fn taxonomy(&self) -> RatingTaxonomy {
        self.taxonomy
    }

    /// Display label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.taxonomy.label(self.tier)
    }

    /// Derived risk level
    #[must_use]
    pub const fn risk_level(&self) -> RiskLevel {
        self.tier.risk_level()
    }

    /// Raise this rating to at least `floor`, never lowering it
    #[must_use]
    pub fn at_least(self, floor: MaturityTier) -> Self {
        if floor > self.tier {
            self.taxonomy.rating(floor)
        } else {
            self
        }
    }

    /// Parse an exact label from either taxonomy
    pub fn from_label(label: &str) -> Result<Self, DomainError> {
        [RatingTaxonomy::Mpaa, RatingTaxonomy::Influencer]
            .into_iter()
            .flat_map(|taxonomy| {
                taxonomy
                    .tiers()
                    .iter()
                    .map(move |tier| taxonomy.rating(*tier))
            })
            .find(|rating| rating.label() == label)
            .ok_or_else(|| DomainError::InvalidRating(label.to_string()))
    }
}

impl PartialOrd for Rating {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rating {
    fn cmp(&self, other: &Self) -> Ordering {
        self.tier
            .cmp(&other.tier)
            .then_with(|| (self.taxonomy as u8).cmp(&(other.taxonomy as u8)))
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Self::from_label(&label).map_err(serde::de::Error::custom)
    }
}
