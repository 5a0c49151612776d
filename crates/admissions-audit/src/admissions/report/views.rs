use super::super::domain::{Policy, ScoredRow};
use super::super::fairness::GroupingDimension;
use super::super::selection::SelectionMode;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct GroupRateEntry {
    pub group: String,
    pub size: usize,
    pub blind_rate: Option<f64>,
    pub aware_rate: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DimensionRatesView {
    pub dimension: GroupingDimension,
    pub title: &'static str,
    pub groups: Vec<GroupRateEntry>,
    pub blind_parity_gap: Option<f64>,
    pub aware_parity_gap: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdmissionsReportSummary {
    pub population: usize,
    pub selection: SelectionMode,
    pub overall_blind_rate: Option<f64>,
    pub overall_aware_rate: Option<f64>,
    pub dimensions: Vec<DimensionRatesView>,
}

/// Per-row fields an output adapter needs to rebuild any report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRowView {
    pub name: String,
    pub gpa: f64,
    pub test_score: i32,
    pub income: f64,
    pub legacy: bool,
    pub first_generation: bool,
    pub disability: bool,
    pub blind_score: f64,
    pub aware_score: f64,
    pub admit_blind: bool,
    pub admit_aware: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank_blind: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank_aware: Option<usize>,
}

impl From<&ScoredRow> for ScoredRowView {
    fn from(row: &ScoredRow) -> Self {
        let applicant = row.applicant();
        Self {
            name: applicant.name.clone(),
            gpa: applicant.gpa,
            test_score: applicant.test_score,
            income: applicant.income,
            legacy: applicant.legacy_status,
            first_generation: applicant.first_generation,
            disability: applicant.disability,
            blind_score: row.score(Policy::Blind),
            aware_score: row.score(Policy::Aware),
            admit_blind: row.admitted(Policy::Blind),
            admit_aware: row.admitted(Policy::Aware),
            rank_blind: row.rank(Policy::Blind),
            rank_aware: row.rank(Policy::Aware),
        }
    }
}
