//! Structured care-plan content for a single (condition, tier) pair.

use ccm_types::NonEmptyText;
use serde::{Deserialize, Serialize};

/// One multidisciplinary team member's part in a care plan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TeamAction {
    /// Discipline responsible, e.g. "Respiratory Therapist".
    pub role: NonEmptyText,
    pub action: NonEmptyText,
}

/// Immutable guidance attached to one condition at one risk tier.
///
/// Every field is optional. Renderers omit absent fields rather than printing placeholders.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GuidanceDocument {
    /// One-line description of the care intensity for the tier.
    pub summary: Option<NonEmptyText>,
    /// Management steps.
    pub management: Option<NonEmptyText>,
    /// Follow-up cadence.
    pub follow_up: Option<NonEmptyText>,
    pub expected_outcomes: Option<NonEmptyText>,
    /// Multidisciplinary team actions, in presentation order.
    pub care_team: Vec<TeamAction>,
    /// Reference citations.
    pub references: Vec<NonEmptyText>,
}

impl GuidanceDocument {
    pub fn has_management(&self) -> bool {
        self.management.is_some()
    }

    /// Returns `true` if the document carries no content at all.
    pub fn is_empty(&self) -> bool {
        self.summary.is_none()
            && self.management.is_none()
            && self.follow_up.is_none()
            && self.expected_outcomes.is_none()
            && self.care_team.is_empty()
            && self.references.is_empty()
    }
}
