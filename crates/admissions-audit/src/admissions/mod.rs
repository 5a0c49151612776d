//! Blind versus aware admission scoring, selection, and parity aggregation.

pub mod domain;
pub mod fairness;
pub mod report;
pub mod scoring;
pub mod selection;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{Applicant, Policy, PolicyDecision, ScoredRow};
pub use fairness::{
    admission_rate, group_rates, GroupKey, GroupRateTable, GroupRates, GroupingDimension,
    IncomeBracket,
};
pub use report::AdmissionsReport;
pub use scoring::{
    aware_score, blind_score, score_components, ScoreComponent, ScoreFactor, ScoringEngine,
    ScoringPolicy,
};
pub use selection::{
    admit_by_cutoff, admit_top_k, apply_selection, compare_rows, ranked_indices, SelectionMode,
    DEFAULT_TOP_K,
};
pub use service::{AdmissionsAudit, AuditError, AuditOutcome};
