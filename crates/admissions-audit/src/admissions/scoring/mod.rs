mod policy;
mod rules;

pub use policy::ScoringPolicy;

use super::domain::{Applicant, Policy, ScoredRow};
use serde::{Deserialize, Serialize};

/// Attribute that contributed points to a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    Gpa,
    TestScore,
    Extracurricular,
    Essay,
    Recommendation,
    IncomeNeed,
    FirstGeneration,
    Disability,
    Legacy,
    LocalResidency,
    Ethnicity,
}

impl ScoreFactor {
    /// Protected or proxy attributes that only the aware policy may weigh.
    pub const fn is_protected(self) -> bool {
        matches!(
            self,
            ScoreFactor::FirstGeneration
                | ScoreFactor::Disability
                | ScoreFactor::Legacy
                | ScoreFactor::LocalResidency
                | ScoreFactor::Ethnicity
        )
    }
}

/// Discrete contribution to a score, kept for transparent audits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub points: f64,
}

pub fn score_components(
    applicant: &Applicant,
    params: &ScoringPolicy,
    policy: Policy,
) -> Vec<ScoreComponent> {
    rules::score_components(applicant, params, policy)
}

/// Merit score that never consults protected attributes.
pub fn blind_score(applicant: &Applicant, params: &ScoringPolicy) -> f64 {
    total(&score_components(applicant, params, Policy::Blind))
}

/// Blind score plus the contextual adjustments of the aware policy.
pub fn aware_score(applicant: &Applicant, params: &ScoringPolicy) -> f64 {
    total(&score_components(applicant, params, Policy::Aware))
}

fn total(components: &[ScoreComponent]) -> f64 {
    components.iter().map(|component| component.points).sum()
}

/// Stateless scorer that applies one weighting policy to a population.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    params: ScoringPolicy,
}

impl ScoringEngine {
    pub fn new(params: ScoringPolicy) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ScoringPolicy {
        &self.params
    }

    pub fn score(&self, applicant: &Applicant, policy: Policy) -> f64 {
        match policy {
            Policy::Blind => blind_score(applicant, &self.params),
            Policy::Aware => aware_score(applicant, &self.params),
        }
    }

    /// Builds one row per applicant, preserving input order.
    pub fn score_all(&self, applicants: Vec<Applicant>) -> Vec<ScoredRow> {
        applicants
            .into_iter()
            .map(|applicant| {
                let blind = self.score(&applicant, Policy::Blind);
                let aware = self.score(&applicant, Policy::Aware);
                ScoredRow::new(applicant, blind, aware)
            })
            .collect()
    }
}
