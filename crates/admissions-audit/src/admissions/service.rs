use super::domain::{Applicant, ScoredRow};
use super::fairness::GroupingDimension;
use super::report::AdmissionsReport;
use super::scoring::{ScoringEngine, ScoringPolicy};
use super::selection::{apply_selection, SelectionMode};
use tracing::{debug, info};

/// Composes scoring, selection, and fairness aggregation into a single run.
#[derive(Debug, Clone, Default)]
pub struct AdmissionsAudit {
    engine: ScoringEngine,
}

/// Decorated rows in input order plus the aggregate report built from them.
#[derive(Debug, Clone)]
pub struct AuditOutcome {
    pub rows: Vec<ScoredRow>,
    pub report: AdmissionsReport,
}

impl AdmissionsAudit {
    pub fn new(params: ScoringPolicy) -> Self {
        Self {
            engine: ScoringEngine::new(params),
        }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    pub fn run(
        &self,
        applicants: Vec<Applicant>,
        selection: SelectionMode,
        dimensions: &[GroupingDimension],
    ) -> Result<AuditOutcome, AuditError> {
        if applicants.is_empty() {
            return Err(AuditError::EmptyPopulation);
        }

        let mut rows = self.engine.score_all(applicants);
        debug!(population = rows.len(), "applicants scored");

        apply_selection(&mut rows, &selection);

        let report = AdmissionsReport::build(&rows, selection, dimensions);
        info!(
            population = report.population,
            selection = %selection.describe(),
            blind_rate = ?report.overall_blind_rate,
            aware_rate = ?report.overall_aware_rate,
            "admissions audit complete"
        );

        Ok(AuditOutcome { rows, report })
    }
}

/// Error raised by the audit service.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("no applicants to evaluate; admission rates are undefined")]
    EmptyPopulation,
}
