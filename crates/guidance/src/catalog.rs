//! Catalog construction, validation and lookup.
//!
//! Responsibilities:
//! - Define a strict wire model for catalog YAML files
//! - Translate wire entries into [`GuidanceDocument`]s keyed by (condition, tier)
//! - Reject catalogs that do not cover the full product of conditions and tiers
//!
//! Notes:
//! - Completeness is checked once here, so `lookup` over the closed enums cannot fail on a
//!   catalog that was successfully constructed

use std::collections::HashMap;

use ccm_types::{Condition, NonEmptyText, RiskTier};
use serde::Deserialize;

use crate::document::{GuidanceDocument, TeamAction};
use crate::{GuidanceError, GuidanceResult};

/// Catalog compiled into the binary.
const BUILTIN_CATALOG_YAML: &str = include_str!("../catalog/guidance.yaml");

// ============================================================================
// Public catalog
// ============================================================================

/// Immutable table of guidance documents covering every (condition, tier) pair.
#[derive(Clone, Debug)]
pub struct GuidanceCatalog {
    documents: HashMap<(Condition, RiskTier), GuidanceDocument>,
}

impl GuidanceCatalog {
    /// Parse and validate the compiled-in catalog.
    ///
    /// # Errors
    ///
    /// Only fails if the bundled asset has been edited into an invalid state.
    pub fn builtin() -> GuidanceResult<Self> {
        Self::parse(BUILTIN_CATALOG_YAML)
    }

    /// Parse a catalog from YAML text.
    ///
    /// Schema mismatches are reported with the path of the failing field
    /// (e.g. `entries[3].follow_up`).
    ///
    /// # Errors
    ///
    /// Returns [`GuidanceError`] if:
    /// - the YAML does not match the catalog schema, including unknown keys,
    /// - a (condition, tier) pair appears more than once,
    /// - any (condition, tier) pair is missing.
    pub fn parse(yaml_text: &str) -> GuidanceResult<Self> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

        let wire = match serde_path_to_error::deserialize::<_, CatalogWire>(deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() {
                    "<root>"
                } else {
                    path.as_str()
                };
                return Err(GuidanceError::Translation(format!(
                    "Guidance catalog schema mismatch at {path}: {source}"
                )));
            }
        };

        Self::from_entries(wire.entries.into_iter().map(wire_to_domain))
    }

    /// Build a catalog from already-structured entries, applying the same validation as
    /// [`GuidanceCatalog::parse`].
    pub fn from_entries<I>(entries: I) -> GuidanceResult<Self>
    where
        I: IntoIterator<Item = (Condition, RiskTier, GuidanceDocument)>,
    {
        let mut documents = HashMap::new();
        for (condition, tier, document) in entries {
            if documents.insert((condition, tier), document).is_some() {
                return Err(GuidanceError::Duplicate { condition, tier });
            }
        }

        let missing: Vec<(Condition, RiskTier)> = Condition::ALL
            .into_iter()
            .flat_map(|c| RiskTier::ALL.into_iter().map(move |t| (c, t)))
            .filter(|pair| !documents.contains_key(pair))
            .collect();

        if !missing.is_empty() {
            return Err(GuidanceError::Incomplete { missing });
        }

        Ok(Self { documents })
    }

    /// Return the document for a (condition, tier) pair.
    ///
    /// # Errors
    ///
    /// Returns [`GuidanceError::NotFound`] if the pair is not catalogued. A catalog built via
    /// `parse` or `from_entries` always holds every pair.
    pub fn lookup(&self, condition: Condition, tier: RiskTier) -> GuidanceResult<&GuidanceDocument> {
        self.documents
            .get(&(condition, tier))
            .ok_or_else(|| GuidanceError::NotFound {
                condition: condition.to_string(),
                tier: tier.to_string(),
            })
    }

    /// Number of catalogued (condition, tier) pairs.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogWire {
    entries: Vec<EntryWire>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EntryWire {
    condition: Condition,
    tier: RiskTier,
    #[serde(default)]
    summary: Option<NonEmptyText>,
    #[serde(default)]
    management: Option<NonEmptyText>,
    #[serde(default)]
    follow_up: Option<NonEmptyText>,
    #[serde(default)]
    expected_outcomes: Option<NonEmptyText>,
    #[serde(default)]
    care_team: Vec<TeamAction>,
    #[serde(default)]
    references: Vec<NonEmptyText>,
}

fn wire_to_domain(wire: EntryWire) -> (Condition, RiskTier, GuidanceDocument) {
    (
        wire.condition,
        wire.tier,
        GuidanceDocument {
            summary: wire.summary,
            management: wire.management,
            follow_up: wire.follow_up,
            expected_outcomes: wire.expected_outcomes,
            care_team: wire.care_team,
            references: wire.references,
        },
    )
}
