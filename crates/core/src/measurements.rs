//! Clinical measurement sets, one per condition.
//!
//! Values are taken as given. The documented ranges in [`ranges`] describe what a
//! presentation layer should accept; nothing in this crate enforces them.

use ccm_types::Condition;
use serde::{Deserialize, Serialize};

/// Documented input ranges, inclusive.
pub mod ranges {
    use std::ops::RangeInclusive;

    /// Years.
    pub const AGE: RangeInclusive<f64> = 18.0..=100.0;
    /// mmHg.
    pub const SYSTOLIC_BP: RangeInclusive<f64> = 90.0..=200.0;
    /// Total cholesterol, mg/dL.
    pub const CHOLESTEROL: RangeInclusive<f64> = 100.0..=300.0;
    pub const BMI: RangeInclusive<f64> = 10.0..=50.0;
    /// mg/dL.
    pub const FASTING_GLUCOSE: RangeInclusive<f64> = 50.0..=300.0;
    /// Percent.
    pub const HBA1C: RangeInclusive<f64> = 4.0..=15.0;
    pub const SMOKING_YEARS: RangeInclusive<f64> = 0.0..=50.0;
    /// Percent of predicted.
    pub const FEV1: RangeInclusive<f64> = 20.0..=100.0;
    pub const EXACERBATIONS_LAST_YEAR: RangeInclusive<f64> = 0.0..=10.0;
    /// Days per week, shared by symptom frequency, nighttime symptoms and inhaler use.
    pub const DAYS_PER_WEEK: RangeInclusive<f64> = 0.0..=7.0;
    /// Cells/µL.
    pub const EOSINOPHIL_COUNT: RangeInclusive<f64> = 0.0..=1000.0;
}

fn flag(value: bool) -> f64 {
    if value {
        10.0
    } else {
        0.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardiovascularMeasurements {
    pub age: f64,
    pub systolic_bp: f64,
    pub is_smoker: bool,
    pub cholesterol: f64,
}

impl CardiovascularMeasurements {
    pub fn weighted_score(&self) -> f64 {
        self.age * 0.1 + self.systolic_bp * 0.05 + flag(self.is_smoker) + self.cholesterol * 0.02
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiabetesMeasurements {
    pub bmi: f64,
    pub age: f64,
    pub family_history: bool,
    pub fasting_glucose: f64,
    pub hba1c: f64,
}

impl DiabetesMeasurements {
    pub fn weighted_score(&self) -> f64 {
        self.bmi * 0.3
            + self.age * 0.1
            + flag(self.family_history)
            + self.fasting_glucose * 0.02
            + self.hba1c * 0.1
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CopdMeasurements {
    pub smoking_years: f64,
    pub age: f64,
    pub fev1: f64,
    pub exacerbations_last_year: f64,
}

impl CopdMeasurements {
    /// Better lung function (higher FEV1) lowers the score.
    pub fn weighted_score(&self) -> f64 {
        self.smoking_years * 0.5 + self.age * 0.2 - self.fev1 * 0.1
            + self.exacerbations_last_year * 5.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AsthmaMeasurements {
    pub frequency_of_symptoms: f64,
    pub nighttime_symptoms: f64,
    pub inhaler_use: f64,
    pub fev1: f64,
    pub eosinophil_count: f64,
}

impl AsthmaMeasurements {
    pub fn weighted_score(&self) -> f64 {
        self.frequency_of_symptoms * 2.0 + self.nighttime_symptoms * 3.0 + self.inhaler_use * 1.5
            - self.fev1 * 0.1
            + self.eosinophil_count * 0.2
    }
}

/// The measurements gathered for one condition's assessment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "condition", rename_all = "lowercase")]
pub enum MeasurementSet {
    Cardiovascular(CardiovascularMeasurements),
    Diabetes(DiabetesMeasurements),
    Copd(CopdMeasurements),
    Asthma(AsthmaMeasurements),
}

impl MeasurementSet {
    pub fn condition(&self) -> Condition {
        match self {
            MeasurementSet::Cardiovascular(_) => Condition::Cardiovascular,
            MeasurementSet::Diabetes(_) => Condition::Diabetes,
            MeasurementSet::Copd(_) => Condition::Copd,
            MeasurementSet::Asthma(_) => Condition::Asthma,
        }
    }

    pub fn weighted_score(&self) -> f64 {
        match self {
            MeasurementSet::Cardiovascular(m) => m.weighted_score(),
            MeasurementSet::Diabetes(m) => m.weighted_score(),
            MeasurementSet::Copd(m) => m.weighted_score(),
            MeasurementSet::Asthma(m) => m.weighted_score(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn cardiovascular_score_adds_smoker_weight() {
        let non_smoker = CardiovascularMeasurements {
            age: 30.0,
            systolic_bp: 120.0,
            is_smoker: false,
            cholesterol: 180.0,
        };
        let smoker = CardiovascularMeasurements {
            is_smoker: true,
            ..non_smoker
        };
        assert!(close(non_smoker.weighted_score(), 12.6));
        assert!(close(smoker.weighted_score(), 22.6));
    }

    #[test]
    fn copd_score_decreases_with_fev1() {
        let base = CopdMeasurements {
            smoking_years: 10.0,
            age: 30.0,
            fev1: 80.0,
            exacerbations_last_year: 1.0,
        };
        let better = CopdMeasurements { fev1: 100.0, ..base };
        assert!(close(base.weighted_score(), 8.0));
        assert!(better.weighted_score() < base.weighted_score());
    }

    #[test]
    fn measurement_set_reports_its_condition() {
        let set = MeasurementSet::Asthma(AsthmaMeasurements {
            frequency_of_symptoms: 2.0,
            nighttime_symptoms: 1.0,
            inhaler_use: 2.0,
            fev1: 80.0,
            eosinophil_count: 50.0,
        });
        assert_eq!(set.condition(), Condition::Asthma);
        assert!(close(set.weighted_score(), 12.0));
    }

    #[test]
    fn documented_ranges_match_form_bounds() {
        assert!(ranges::AGE.contains(&18.0));
        assert!(!ranges::AGE.contains(&17.9));
        assert!(ranges::DAYS_PER_WEEK.contains(&7.0));
        assert_eq!(*ranges::EOSINOPHIL_COUNT.end(), 1000.0);
    }
}
