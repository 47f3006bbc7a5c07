//! Value objects - Immutable objects defined by their attributes

pub mod category_scores;
pub mod rating;
pub mod risk_level;

pub use category_scores::{CategoryScores, ScoreCategory, Severity};
pub use rating::{MaturityTier, Rating, RatingTaxonomy};
pub use risk_level::RiskLevel;
