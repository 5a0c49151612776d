use serde::{Deserialize, Serialize};

/// Validated applicant attributes as delivered by the intake adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Applicant {
    pub name: String,
    pub age: i32,
    pub geography: String,
    pub ethnicity: String,
    pub income: f64,
    pub legacy_status: bool,
    pub local_residency: bool,
    pub gpa: f64,
    pub test_score: i32,
    pub extracurricular_score: f64,
    pub essay_score: f64,
    pub recommendation_score: f64,
    pub first_generation: bool,
    pub disability: bool,
}

/// Admission policy under evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Ignores protected and proxy attributes.
    Blind,
    /// Weighs protected and contextual attributes.
    Aware,
}

impl Policy {
    pub const ALL: [Policy; 2] = [Policy::Blind, Policy::Aware];

    pub const fn label(self) -> &'static str {
        match self {
            Policy::Blind => "BLIND",
            Policy::Aware => "AWARE",
        }
    }
}

/// Score and admission state for a single policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolicyDecision {
    pub score: f64,
    pub admitted: bool,
    /// 1-based position in the ranked order; only populated by top-K selection.
    pub rank: Option<usize>,
}

impl PolicyDecision {
    pub(crate) fn unranked(score: f64) -> Self {
        Self {
            score,
            admitted: false,
            rank: None,
        }
    }
}

/// One applicant together with both policy scores and the decisions taken on them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRow {
    applicant: Applicant,
    blind: PolicyDecision,
    aware: PolicyDecision,
}

impl ScoredRow {
    pub fn new(applicant: Applicant, blind_score: f64, aware_score: f64) -> Self {
        Self {
            applicant,
            blind: PolicyDecision::unranked(blind_score),
            aware: PolicyDecision::unranked(aware_score),
        }
    }

    pub fn applicant(&self) -> &Applicant {
        &self.applicant
    }

    pub fn decision(&self, policy: Policy) -> &PolicyDecision {
        match policy {
            Policy::Blind => &self.blind,
            Policy::Aware => &self.aware,
        }
    }

    pub fn score(&self, policy: Policy) -> f64 {
        self.decision(policy).score
    }

    pub fn admitted(&self, policy: Policy) -> bool {
        self.decision(policy).admitted
    }

    pub fn rank(&self, policy: Policy) -> Option<usize> {
        self.decision(policy).rank
    }

    pub(crate) fn set_outcome(&mut self, policy: Policy, admitted: bool, rank: Option<usize>) {
        let decision = match policy {
            Policy::Blind => &mut self.blind,
            Policy::Aware => &mut self.aware,
        };
        decision.admitted = admitted;
        decision.rank = rank;
    }
}
