use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Weighting parameters shared by the blind and aware scoring functions.
///
/// Merit weights are expressed in points, so a perfect record scores the sum of the
/// five merit weights (100 with the defaults) before any contextual adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
    pub gpa_weight: f64,
    pub test_weight: f64,
    pub extracurricular_weight: f64,
    pub essay_weight: f64,
    pub recommendation_weight: f64,
    pub gpa_scale: f64,
    pub test_scale: f64,
    pub rubric_scale: f64,
    /// Applicants with income strictly below this value receive `income_need_bonus`.
    pub income_need_threshold: f64,
    pub income_need_bonus: f64,
    pub first_generation_bonus: f64,
    pub disability_bonus: f64,
    pub legacy_bonus: f64,
    pub local_residency_bonus: f64,
    /// Aware-only points keyed by ethnicity label, matched case-insensitively.
    pub ethnicity_adjustments: BTreeMap<String, f64>,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            gpa_weight: 30.0,
            test_weight: 30.0,
            extracurricular_weight: 15.0,
            essay_weight: 15.0,
            recommendation_weight: 10.0,
            gpa_scale: 4.0,
            test_scale: 1600.0,
            rubric_scale: 10.0,
            income_need_threshold: 40_000.0,
            income_need_bonus: 2.0,
            first_generation_bonus: 5.0,
            disability_bonus: 3.0,
            legacy_bonus: 4.0,
            local_residency_bonus: 2.0,
            ethnicity_adjustments: BTreeMap::new(),
        }
    }
}

impl ScoringPolicy {
    pub fn ethnicity_adjustment(&self, ethnicity: &str) -> f64 {
        let ethnicity = ethnicity.trim();
        self.ethnicity_adjustments
            .iter()
            .find(|(label, _)| label.trim().eq_ignore_ascii_case(ethnicity))
            .map(|(_, points)| *points)
            .unwrap_or(0.0)
    }
}
