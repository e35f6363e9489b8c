//! Caller-owned accumulator of completed assessments.

use ccm_types::{Condition, RiskTier};
use serde::{Deserialize, Serialize};

/// Risk tiers recorded for one patient session, in the order the conditions were assessed.
///
/// Each condition appears at most once. Recording a condition again replaces its tier but
/// keeps its original position.
///
/// Serialises as a list of `[condition, tier]` pairs. Deserialising replays the list through
/// [`AssessmentResult::record`], so a repeated condition keeps only its last tier.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "Vec<(Condition, RiskTier)>",
    into = "Vec<(Condition, RiskTier)>"
)]
pub struct AssessmentResult {
    entries: Vec<(Condition, RiskTier)>,
}

impl AssessmentResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a tier for `condition`, returning the tier it replaced, if any.
    pub fn record(&mut self, condition: Condition, tier: RiskTier) -> Option<RiskTier> {
        match self.entries.iter_mut().find(|(c, _)| *c == condition) {
            Some((_, existing)) => Some(std::mem::replace(existing, tier)),
            None => {
                self.entries.push((condition, tier));
                None
            }
        }
    }

    pub fn get(&self, condition: Condition) -> Option<RiskTier> {
        self.entries
            .iter()
            .find(|(c, _)| *c == condition)
            .map(|(_, tier)| *tier)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Condition, RiskTier)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most severe tier recorded across all conditions.
    pub fn highest_tier(&self) -> Option<RiskTier> {
        self.entries.iter().map(|(_, tier)| *tier).max()
    }
}

impl FromIterator<(Condition, RiskTier)> for AssessmentResult {
    fn from_iter<I: IntoIterator<Item = (Condition, RiskTier)>>(iter: I) -> Self {
        let mut result = Self::new();
        for (condition, tier) in iter {
            result.record(condition, tier);
        }
        result
    }
}

impl From<Vec<(Condition, RiskTier)>> for AssessmentResult {
    fn from(entries: Vec<(Condition, RiskTier)>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<AssessmentResult> for Vec<(Condition, RiskTier)> {
    fn from(result: AssessmentResult) -> Self {
        result.entries
    }
}
