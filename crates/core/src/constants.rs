//! Constants used throughout the chronic care core crate.

use crate::classifier::ScoringPolicy;

/// Scoring policy used when configuration does not name one.
///
/// Weighted scores are the only family in which every catalogued tier is reachable.
pub const DEFAULT_SCORING_POLICY: ScoringPolicy = ScoringPolicy::WeightedScore;

/// Header of the unified care plan report.
pub const CARE_PLAN_HEADER: &str = "Unified Care Plan";

/// Line placed between rendered condition blocks.
pub const ENTRY_SEPARATOR: &str = "---";

/// Text returned when a report is requested before any assessment was recorded.
pub const EMPTY_ASSESSMENT_PLACEHOLDER: &str =
    "No assessments yet. Complete at least one risk assessment to build a care plan.";

/// Opening line of the multidisciplinary team plan.
pub const TEAM_PLAN_INTRO: &str =
    "Here's a detailed, multidisciplinary care plan based on current evidence:";

/// Closing line of the multidisciplinary team plan.
pub const TEAM_PLAN_CLOSING: &str =
    "Please consult specific guidelines for detailed recommendations.";

/// Text returned by the team plan when every recorded condition is Low risk.
pub const NO_TEAM_FOLLOW_UP_PLACEHOLDER: &str =
    "No High or Moderate risk conditions require multidisciplinary follow-up.";
