//! Risk classification for the four chronic conditions.
//!
//! Two scoring families exist and neither is implied: callers pick a [`ScoringPolicy`] and
//! hand it to [`RiskClassifier::new`].
//!
//! - `threshold-rule`: one or two predicates per condition. Only `Moderate` and `High` are
//!   reachable.
//! - `weighted-score`: a linear score per condition with two strict cut points. All three
//!   tiers are reachable.
//!
//! Every comparison is strict (`>`), so a value sitting exactly on a cut point falls to the
//! lower tier. Classification is pure and never validates ranges.

use std::fmt;
use std::str::FromStr;

use ccm_types::{Condition, RiskTier};
use serde::{Deserialize, Serialize};

use crate::measurements::{
    AsthmaMeasurements, CardiovascularMeasurements, CopdMeasurements, DiabetesMeasurements,
    MeasurementSet,
};
use crate::{CareError, CareResult};

/// Named scoring strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoringPolicy {
    ThresholdRule,
    WeightedScore,
}

impl ScoringPolicy {
    pub const ALL: [ScoringPolicy; 2] = [ScoringPolicy::ThresholdRule, ScoringPolicy::WeightedScore];

    pub fn name(&self) -> &'static str {
        match self {
            ScoringPolicy::ThresholdRule => "threshold-rule",
            ScoringPolicy::WeightedScore => "weighted-score",
        }
    }

    /// Tiers this policy can produce, least severe first.
    pub fn reachable_tiers(&self) -> &'static [RiskTier] {
        match self {
            ScoringPolicy::ThresholdRule => &[RiskTier::Moderate, RiskTier::High],
            ScoringPolicy::WeightedScore => &RiskTier::ALL,
        }
    }
}

impl fmt::Display for ScoringPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScoringPolicy {
    type Err = CareError;

    fn from_str(s: &str) -> CareResult<Self> {
        let wanted = s.trim();
        ScoringPolicy::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                CareError::InvalidInput(format!(
                    "unknown scoring policy '{s}' (expected threshold-rule or weighted-score)"
                ))
            })
    }
}

/// Map a score onto a tier using strict `>` cut points.
fn tier_from_score(score: f64, high_above: f64, moderate_above: f64) -> RiskTier {
    if score > high_above {
        RiskTier::High
    } else if score > moderate_above {
        RiskTier::Moderate
    } else {
        RiskTier::Low
    }
}

fn tier_from_rule(high: bool) -> RiskTier {
    if high {
        RiskTier::High
    } else {
        RiskTier::Moderate
    }
}

/// Stateless classifier bound to one scoring policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RiskClassifier {
    policy: ScoringPolicy,
}

impl RiskClassifier {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ScoringPolicy {
        self.policy
    }

    pub fn classify_cardiovascular(&self, m: &CardiovascularMeasurements) -> RiskTier {
        let tier = match self.policy {
            ScoringPolicy::ThresholdRule => tier_from_rule(m.is_smoker && m.systolic_bp > 140.0),
            ScoringPolicy::WeightedScore => tier_from_score(m.weighted_score(), 15.0, 10.0),
        };
        self.trace(Condition::Cardiovascular, tier);
        tier
    }

    pub fn classify_diabetes(&self, m: &DiabetesMeasurements) -> RiskTier {
        let tier = match self.policy {
            ScoringPolicy::ThresholdRule => {
                tier_from_rule(m.fasting_glucose > 126.0 || m.hba1c > 6.5)
            }
            ScoringPolicy::WeightedScore => tier_from_score(m.weighted_score(), 20.0, 15.0),
        };
        self.trace(Condition::Diabetes, tier);
        tier
    }

    pub fn classify_copd(&self, m: &CopdMeasurements) -> RiskTier {
        let tier = match self.policy {
            ScoringPolicy::ThresholdRule => {
                tier_from_rule(m.smoking_years > 20.0 && m.exacerbations_last_year > 2.0)
            }
            ScoringPolicy::WeightedScore => tier_from_score(m.weighted_score(), 25.0, 15.0),
        };
        self.trace(Condition::Copd, tier);
        tier
    }

    pub fn classify_asthma(&self, m: &AsthmaMeasurements) -> RiskTier {
        let tier = match self.policy {
            ScoringPolicy::ThresholdRule => {
                tier_from_rule(m.frequency_of_symptoms > 4.0 || m.nighttime_symptoms > 2.0)
            }
            ScoringPolicy::WeightedScore => tier_from_score(m.weighted_score(), 20.0, 10.0),
        };
        self.trace(Condition::Asthma, tier);
        tier
    }

    /// Classify whichever condition the measurement set belongs to.
    pub fn classify(&self, set: &MeasurementSet) -> (Condition, RiskTier) {
        let tier = match set {
            MeasurementSet::Cardiovascular(m) => self.classify_cardiovascular(m),
            MeasurementSet::Diabetes(m) => self.classify_diabetes(m),
            MeasurementSet::Copd(m) => self.classify_copd(m),
            MeasurementSet::Asthma(m) => self.classify_asthma(m),
        };
        (set.condition(), tier)
    }

    fn trace(&self, condition: Condition, tier: RiskTier) {
        tracing::debug!(%condition, %tier, policy = %self.policy, "classified risk");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLD: RiskClassifier = RiskClassifier {
        policy: ScoringPolicy::ThresholdRule,
    };
    const WEIGHTED: RiskClassifier = RiskClassifier {
        policy: ScoringPolicy::WeightedScore,
    };

    fn cardio(
        age: f64,
        systolic_bp: f64,
        is_smoker: bool,
        cholesterol: f64,
    ) -> CardiovascularMeasurements {
        CardiovascularMeasurements {
            age,
            systolic_bp,
            is_smoker,
            cholesterol,
        }
    }

    fn diabetes(
        bmi: f64,
        age: f64,
        family_history: bool,
        fasting_glucose: f64,
        hba1c: f64,
    ) -> DiabetesMeasurements {
        DiabetesMeasurements {
            bmi,
            age,
            family_history,
            fasting_glucose,
            hba1c,
        }
    }

    fn copd(
        smoking_years: f64,
        age: f64,
        fev1: f64,
        exacerbations_last_year: f64,
    ) -> CopdMeasurements {
        CopdMeasurements {
            smoking_years,
            age,
            fev1,
            exacerbations_last_year,
        }
    }

    fn asthma(
        frequency_of_symptoms: f64,
        nighttime_symptoms: f64,
        inhaler_use: f64,
        fev1: f64,
        eosinophil_count: f64,
    ) -> AsthmaMeasurements {
        AsthmaMeasurements {
            frequency_of_symptoms,
            nighttime_symptoms,
            inhaler_use,
            fev1,
            eosinophil_count,
        }
    }

    #[test]
    fn policy_names_round_trip() {
        for policy in ScoringPolicy::ALL {
            assert_eq!(policy.name().parse::<ScoringPolicy>().expect("parse"), policy);
        }
        assert_eq!(
            "Weighted-Score".parse::<ScoringPolicy>().expect("case-insensitive"),
            ScoringPolicy::WeightedScore
        );
    }

    #[test]
    fn policy_rejects_unknown_names() {
        let err = "logistic".parse::<ScoringPolicy>().expect_err("should reject");
        assert!(matches!(err, CareError::InvalidInput(msg) if msg.contains("logistic")));
    }

    #[test]
    fn threshold_cardiovascular_boundary_is_strict() {
        assert_eq!(
            THRESHOLD.classify_cardiovascular(&cardio(50.0, 140.0, true, 200.0)),
            RiskTier::Moderate
        );
        assert_eq!(
            THRESHOLD.classify_cardiovascular(&cardio(50.0, 141.0, true, 200.0)),
            RiskTier::High
        );
        assert_eq!(
            THRESHOLD.classify_cardiovascular(&cardio(50.0, 180.0, false, 200.0)),
            RiskTier::Moderate
        );
    }

    #[test]
    fn threshold_classification_is_deterministic() {
        let m = cardio(50.0, 150.0, true, 200.0);
        let first = THRESHOLD.classify_cardiovascular(&m);
        for _ in 0..10 {
            assert_eq!(THRESHOLD.classify_cardiovascular(&m), first);
        }
        assert_eq!(first, RiskTier::High);
    }

    #[test]
    fn threshold_diabetes_glucose_or_hba1c() {
        assert_eq!(
            THRESHOLD.classify_diabetes(&diabetes(25.0, 40.0, false, 127.0, 5.0)),
            RiskTier::High
        );
        assert_eq!(
            THRESHOLD.classify_diabetes(&diabetes(25.0, 40.0, false, 90.0, 6.6)),
            RiskTier::High
        );
        assert_eq!(
            THRESHOLD.classify_diabetes(&diabetes(25.0, 40.0, true, 126.0, 6.5)),
            RiskTier::Moderate
        );
    }

    #[test]
    fn threshold_copd_needs_both_predicates() {
        assert_eq!(THRESHOLD.classify_copd(&copd(21.0, 60.0, 50.0, 3.0)), RiskTier::High);
        assert_eq!(THRESHOLD.classify_copd(&copd(21.0, 60.0, 50.0, 2.0)), RiskTier::Moderate);
        assert_eq!(THRESHOLD.classify_copd(&copd(20.0, 60.0, 50.0, 5.0)), RiskTier::Moderate);
    }

    #[test]
    fn threshold_asthma_frequency_or_nighttime() {
        assert_eq!(
            THRESHOLD.classify_asthma(&asthma(5.0, 0.0, 0.0, 80.0, 0.0)),
            RiskTier::High
        );
        assert_eq!(
            THRESHOLD.classify_asthma(&asthma(0.0, 3.0, 0.0, 80.0, 0.0)),
            RiskTier::High
        );
        assert_eq!(
            THRESHOLD.classify_asthma(&asthma(4.0, 2.0, 7.0, 20.0, 1000.0)),
            RiskTier::Moderate
        );
    }

    #[test]
    fn threshold_rule_never_returns_low() {
        assert_eq!(
            ScoringPolicy::ThresholdRule.reachable_tiers(),
            &[RiskTier::Moderate, RiskTier::High]
        );
        // Smallest inputs inside the documented ranges still land on Moderate.
        assert_eq!(
            THRESHOLD.classify_cardiovascular(&cardio(18.0, 90.0, false, 100.0)),
            RiskTier::Moderate
        );
        assert_eq!(
            THRESHOLD.classify_diabetes(&diabetes(10.0, 18.0, false, 50.0, 4.0)),
            RiskTier::Moderate
        );
        assert_eq!(THRESHOLD.classify_copd(&copd(0.0, 18.0, 100.0, 0.0)), RiskTier::Moderate);
        assert_eq!(
            THRESHOLD.classify_asthma(&asthma(0.0, 0.0, 0.0, 100.0, 0.0)),
            RiskTier::Moderate
        );
    }

    #[test]
    fn weighted_cardiovascular_reaches_every_tier() {
        // 1.8 + 4.5 + 0 + 2.0 = 8.3
        assert_eq!(
            WEIGHTED.classify_cardiovascular(&cardio(18.0, 90.0, false, 100.0)),
            RiskTier::Low
        );
        // 3.0 + 6.0 + 0 + 3.6 = 12.6
        assert_eq!(
            WEIGHTED.classify_cardiovascular(&cardio(30.0, 120.0, false, 180.0)),
            RiskTier::Moderate
        );
        // 5.0 + 7.0 + 10 + 4.0 = 26.0
        assert_eq!(
            WEIGHTED.classify_cardiovascular(&cardio(50.0, 140.0, true, 200.0)),
            RiskTier::High
        );
    }

    #[test]
    fn weighted_diabetes_reaches_every_tier() {
        // 7.5 + 4.0 + 0 + 2.54 + 0.5 = 14.54
        assert_eq!(
            WEIGHTED.classify_diabetes(&diabetes(25.0, 40.0, false, 127.0, 5.0)),
            RiskTier::Low
        );
        // 9.0 + 5.0 + 0 + 2.0 + 0.6 = 16.6
        assert_eq!(
            WEIGHTED.classify_diabetes(&diabetes(30.0, 50.0, false, 100.0, 6.0)),
            RiskTier::Moderate
        );
        // 9.0 + 5.0 + 10 + 2.0 + 0.6 = 26.6
        assert_eq!(
            WEIGHTED.classify_diabetes(&diabetes(30.0, 50.0, true, 100.0, 6.0)),
            RiskTier::High
        );
    }

    #[test]
    fn weighted_copd_reaches_every_tier() {
        // 0 + 6.0 - 8.0 + 0 = -2.0
        assert_eq!(WEIGHTED.classify_copd(&copd(0.0, 30.0, 80.0, 0.0)), RiskTier::Low);
        // 10.0 + 10.0 - 8.0 + 5.0 = 17.0
        assert_eq!(WEIGHTED.classify_copd(&copd(20.0, 50.0, 80.0, 1.0)), RiskTier::Moderate);
        // 15.0 + 12.0 - 4.0 + 15.0 = 38.0
        assert_eq!(WEIGHTED.classify_copd(&copd(30.0, 60.0, 40.0, 3.0)), RiskTier::High);
    }

    #[test]
    fn weighted_asthma_reaches_every_tier() {
        // 0 + 0 + 0 - 8.0 + 0 = -8.0
        assert_eq!(WEIGHTED.classify_asthma(&asthma(0.0, 0.0, 0.0, 80.0, 0.0)), RiskTier::Low);
        // 4.0 + 3.0 + 3.0 - 8.0 + 10.0 = 12.0
        assert_eq!(
            WEIGHTED.classify_asthma(&asthma(2.0, 1.0, 2.0, 80.0, 50.0)),
            RiskTier::Moderate
        );
        // 4.0 + 3.0 + 3.0 - 8.0 + 60.0 = 62.0
        assert_eq!(
            WEIGHTED.classify_asthma(&asthma(2.0, 1.0, 2.0, 80.0, 300.0)),
            RiskTier::High
        );
    }

    #[test]
    fn weighted_cut_points_are_strict() {
        assert_eq!(tier_from_score(15.0, 15.0, 10.0), RiskTier::Moderate);
        assert_eq!(tier_from_score(10.0, 15.0, 10.0), RiskTier::Low);
        assert_eq!(tier_from_score(15.5, 15.0, 10.0), RiskTier::High);
    }

    #[test]
    fn out_of_range_inputs_are_scored_as_given() {
        // Negative age is a caller contract violation but still produces a tier.
        assert_eq!(
            WEIGHTED.classify_cardiovascular(&cardio(-40.0, 90.0, false, 100.0)),
            RiskTier::Low
        );
    }

    #[test]
    fn classify_dispatches_on_measurement_set() {
        let set = MeasurementSet::Copd(copd(30.0, 60.0, 40.0, 3.0));
        assert_eq!(WEIGHTED.classify(&set), (Condition::Copd, RiskTier::High));
        assert_eq!(THRESHOLD.classify(&set), (Condition::Copd, RiskTier::High));
    }
}
