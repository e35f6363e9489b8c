//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the classifier
//! and resolver. Nothing in this crate reads process-wide environment variables; callers
//! hand in the raw values.

use std::path::{Path, PathBuf};

use ccm_guidance::GuidanceCatalog;

use crate::classifier::{RiskClassifier, ScoringPolicy};
use crate::constants::DEFAULT_SCORING_POLICY;
use crate::resolver::GuidanceResolver;
use crate::{CareError, CareResult};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    scoring_policy: ScoringPolicy,
    guidance_catalog: Option<PathBuf>,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// `guidance_catalog` is an optional path to a catalog file replacing the built-in one.
    pub fn new(scoring_policy: ScoringPolicy, guidance_catalog: Option<PathBuf>) -> Self {
        Self {
            scoring_policy,
            guidance_catalog,
        }
    }

    /// Resolve configuration from raw, possibly absent, environment-style values.
    pub fn from_env_values(
        scoring_policy: Option<String>,
        guidance_catalog: Option<String>,
    ) -> CareResult<Self> {
        let scoring_policy = scoring_policy_from_env_value(scoring_policy)?;
        let guidance_catalog = guidance_catalog
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Ok(Self::new(scoring_policy, guidance_catalog))
    }

    pub fn scoring_policy(&self) -> ScoringPolicy {
        self.scoring_policy
    }

    pub fn guidance_catalog(&self) -> Option<&Path> {
        self.guidance_catalog.as_deref()
    }

    pub fn classifier(&self) -> RiskClassifier {
        RiskClassifier::new(self.scoring_policy)
    }

    /// Load the configured catalog and build a resolver over it.
    pub fn resolver(&self) -> CareResult<GuidanceResolver> {
        Ok(GuidanceResolver::new(load_guidance_catalog(
            self.guidance_catalog(),
        )?))
    }
}

/// Parse the scoring policy from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_SCORING_POLICY`].
pub fn scoring_policy_from_env_value(value: Option<String>) -> CareResult<ScoringPolicy> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let parsed = value.map(|v| v.parse::<ScoringPolicy>()).transpose()?;

    Ok(parsed.unwrap_or(DEFAULT_SCORING_POLICY))
}

/// Load a guidance catalog, preferring `override_path` when given.
///
/// The override must be a regular file holding a complete catalog; it is validated exactly
/// like the built-in one.
pub fn load_guidance_catalog(override_path: Option<&Path>) -> CareResult<GuidanceCatalog> {
    let Some(path) = override_path else {
        let catalog = GuidanceCatalog::builtin()?;
        tracing::info!(entries = catalog.len(), "loaded built-in guidance catalog");
        return Ok(catalog);
    };

    if !path.is_file() {
        return Err(CareError::InvalidInput(format!(
            "guidance catalog override is not a file: {}",
            path.display()
        )));
    }

    let yaml = std::fs::read_to_string(path).map_err(|source| CareError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = GuidanceCatalog::parse(&yaml)?;
    tracing::info!(
        entries = catalog.len(),
        "loaded guidance catalog from {}",
        path.display()
    );
    Ok(catalog)
}
