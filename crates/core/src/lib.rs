//! # CCM Core
//!
//! Risk scoring and care-plan guidance for chronic condition management.
//!
//! This crate contains pure, stateless operations:
//! - Risk classification for cardiovascular disease, diabetes, COPD and asthma under an
//!   explicitly chosen [`ScoringPolicy`]
//! - An insertion-ordered [`AssessmentResult`] accumulator owned by the caller
//! - Guidance lookup and unified / multidisciplinary care-plan rendering
//!
//! **No presentation concerns**: input range checks, prompting and display formatting belong
//! in `ccm-cli` or whichever front end calls into this crate.

pub mod assessment;
pub mod classifier;
pub mod config;
pub mod constants;
pub mod error;
pub mod measurements;
pub mod resolver;

pub use assessment::AssessmentResult;
pub use classifier::{RiskClassifier, ScoringPolicy};
pub use config::CoreConfig;
pub use error::{CareError, CareResult};
pub use measurements::{
    AsthmaMeasurements, CardiovascularMeasurements, CopdMeasurements, DiabetesMeasurements,
    MeasurementSet,
};
pub use resolver::GuidanceResolver;

pub use ccm_guidance::{GuidanceCatalog, GuidanceDocument, GuidanceError, TeamAction};
pub use ccm_types::{Condition, NonEmptyText, RiskTier};
