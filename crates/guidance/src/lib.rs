//! Static guidance catalog for chronic care plans.
//!
//! This crate owns the (condition, risk tier) → care-plan data table:
//! - the structured [`GuidanceDocument`] carried for each pair
//! - a strict YAML wire model for catalog files
//! - construction-time validation that the catalog covers every pair
//!
//! Clinical wording lives in `catalog/guidance.yaml`. Editing it is a content change and
//! never requires touching the lookup code.

pub mod catalog;
pub mod document;

pub use catalog::GuidanceCatalog;
pub use document::{GuidanceDocument, TeamAction};

use ccm_types::{Condition, RiskTier};

/// Errors returned by the `ccm-guidance` crate.
#[derive(Debug, thiserror::Error)]
pub enum GuidanceError {
    #[error("translation error: {0}")]
    Translation(String),

    #[error("duplicate catalog entry for {condition} / {tier}")]
    Duplicate {
        condition: Condition,
        tier: RiskTier,
    },

    #[error("catalog is missing entries for: {}", format_pairs(.missing))]
    Incomplete { missing: Vec<(Condition, RiskTier)> },

    #[error("no guidance catalogued for {condition} / {tier}")]
    NotFound { condition: String, tier: String },
}

/// Type alias for Results that can fail with a [`GuidanceError`].
pub type GuidanceResult<T> = Result<T, GuidanceError>;

fn format_pairs(pairs: &[(Condition, RiskTier)]) -> String {
    pairs
        .iter()
        .map(|(condition, tier)| format!("{condition} / {tier}"))
        .collect::<Vec<_>>()
        .join(", ")
}
