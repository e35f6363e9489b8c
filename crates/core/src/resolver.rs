//! Guidance lookup and care-plan rendering.
//!
//! Reports are plain text. Any markup for display (markdown, HTML) is applied by the
//! presentation layer, not here.

use ccm_guidance::{GuidanceCatalog, GuidanceDocument, GuidanceError};
use ccm_types::{Condition, NonEmptyText, RiskTier};

use crate::assessment::AssessmentResult;
use crate::constants::{
    CARE_PLAN_HEADER, EMPTY_ASSESSMENT_PLACEHOLDER, ENTRY_SEPARATOR,
    NO_TEAM_FOLLOW_UP_PLACEHOLDER, TEAM_PLAN_CLOSING, TEAM_PLAN_INTRO,
};
use crate::CareResult;

/// Resolves (condition, tier) pairs to guidance and renders combined reports.
///
/// Holds a validated catalog, so lookups over `Condition` and `RiskTier` cannot miss.
#[derive(Clone, Debug)]
pub struct GuidanceResolver {
    catalog: GuidanceCatalog,
}

impl GuidanceResolver {
    pub fn new(catalog: GuidanceCatalog) -> Self {
        Self { catalog }
    }

    /// Resolver over the compiled-in catalog.
    pub fn builtin() -> CareResult<Self> {
        Ok(Self::new(GuidanceCatalog::builtin()?))
    }

    /// Returns the document catalogued for `condition` at `tier`.
    ///
    /// # Errors
    ///
    /// Returns `GuidanceError::NotFound` (wrapped in `CareError::Guidance`) if the pair is absent.
    pub fn lookup(&self, condition: Condition, tier: RiskTier) -> CareResult<&GuidanceDocument> {
        Ok(self.catalog.lookup(condition, tier)?)
    }

    /// Like [`GuidanceResolver::lookup`], for callers holding raw labels such as `"COPD"`.
    ///
    /// An unrecognised condition or tier name is reported as `NotFound`.
    pub fn lookup_by_name(&self, condition: &str, tier: &str) -> CareResult<&GuidanceDocument> {
        let not_found = || GuidanceError::NotFound {
            condition: condition.to_string(),
            tier: tier.to_string(),
        };
        let parsed_condition = condition.parse::<Condition>().map_err(|_| not_found())?;
        let parsed_tier = tier.parse::<RiskTier>().map_err(|_| not_found())?;
        self.lookup(parsed_condition, parsed_tier)
    }

    /// Renders the guidance for one condition block.
    ///
    /// Format produced:
    /// ```text
    /// <Condition> - <Tier> Risk
    /// <summary>
    /// - Management Plan: <management>
    /// - Follow-Up: <follow_up>
    /// - Expected Outcomes: <expected_outcomes>
    /// - References: <ref>; <ref>
    /// ```
    /// Absent fields are left out entirely.
    pub fn render_entry(&self, condition: Condition, tier: RiskTier) -> CareResult<NonEmptyText> {
        let document = self.lookup(condition, tier)?;

        let mut lines = vec![format!("{condition} - {tier} Risk")];
        if let Some(summary) = &document.summary {
            lines.push(summary.to_string());
        }
        push_field(&mut lines, "Management Plan", document.management.as_ref());
        push_field(&mut lines, "Follow-Up", document.follow_up.as_ref());
        push_field(
            &mut lines,
            "Expected Outcomes",
            document.expected_outcomes.as_ref(),
        );
        if let Some(references) = join_references(document) {
            lines.push(format!("- References: {references}"));
        }

        Ok(NonEmptyText::new(lines.join("\n"))?)
    }

    /// Renders the unified care plan for every recorded assessment, in insertion order.
    ///
    /// Condition blocks are separated by a `---` line. An empty assessment renders
    /// [`EMPTY_ASSESSMENT_PLACEHOLDER`].
    pub fn render_combined(&self, assessment: &AssessmentResult) -> CareResult<NonEmptyText> {
        if assessment.is_empty() {
            return Ok(NonEmptyText::new(EMPTY_ASSESSMENT_PLACEHOLDER)?);
        }

        let blocks = assessment
            .iter()
            .map(|(condition, tier)| self.render_entry(condition, tier))
            .collect::<CareResult<Vec<NonEmptyText>>>()?;

        let body = blocks
            .iter()
            .map(|b| b.as_str())
            .collect::<Vec<_>>()
            .join(&format!("\n\n{ENTRY_SEPARATOR}\n\n"));

        tracing::debug!(entries = blocks.len(), "rendered unified care plan");
        Ok(NonEmptyText::new(format!("{CARE_PLAN_HEADER}\n\n{body}\n"))?)
    }

    /// Renders the multidisciplinary team plan.
    ///
    /// Only conditions at Moderate risk or above are listed, each with its team actions and
    /// references. If every recorded condition is Low, [`NO_TEAM_FOLLOW_UP_PLACEHOLDER`] is
    /// returned; an empty assessment renders [`EMPTY_ASSESSMENT_PLACEHOLDER`].
    pub fn render_team_plan(&self, assessment: &AssessmentResult) -> CareResult<NonEmptyText> {
        if assessment.is_empty() {
            return Ok(NonEmptyText::new(EMPTY_ASSESSMENT_PLACEHOLDER)?);
        }

        let mut blocks = Vec::new();
        for (condition, tier) in assessment.iter().filter(|(_, t)| *t >= RiskTier::Moderate) {
            let document = self.lookup(condition, tier)?;
            let mut lines = vec![format!("{condition} ({tier} Risk):")];
            for member in &document.care_team {
                lines.push(format!("- {}: {}", member.role, member.action));
            }
            if let Some(references) = join_references(document) {
                lines.push(format!("- References: {references}"));
            }
            blocks.push(lines.join("\n"));
        }

        if blocks.is_empty() {
            return Ok(NonEmptyText::new(NO_TEAM_FOLLOW_UP_PLACEHOLDER)?);
        }

        tracing::debug!(entries = blocks.len(), "rendered team plan");
        Ok(NonEmptyText::new(format!(
            "{TEAM_PLAN_INTRO}\n\n{}\n\n{TEAM_PLAN_CLOSING}\n",
            blocks.join("\n\n")
        ))?)
    }
}

fn push_field(lines: &mut Vec<String>, label: &str, value: Option<&NonEmptyText>) {
    if let Some(value) = value {
        lines.push(format!("- {label}: {value}"));
    }
}

fn join_references(document: &GuidanceDocument) -> Option<String> {
    if document.references.is_empty() {
        return None;
    }
    Some(
        document
            .references
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join("; "),
    )
}
