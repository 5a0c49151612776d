use admissions_audit::admissions::{GroupingDimension, ScoringPolicy, SelectionMode};
use admissions_audit::config::{parse_cutoff, parse_top_k};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) scoring: Arc<ScoringPolicy>,
    pub(crate) selection: SelectionMode,
}

pub(crate) fn parse_k_arg(raw: &str) -> Result<usize, String> {
    parse_top_k(raw).map_err(|err| err.to_string())
}

pub(crate) fn parse_cutoff_arg(raw: &str) -> Result<f64, String> {
    parse_cutoff(raw).map_err(|err| err.to_string())
}

pub(crate) fn parse_dimension(raw: &str) -> Result<GroupingDimension, String> {
    GroupingDimension::parse(raw).ok_or_else(|| {
        format!(
            "unknown dimension '{raw}' (expected first-gen, legacy, income, disability, residency, geography, or ethnicity)"
        )
    })
}

/// Falls back to the standard first-gen, legacy, and income breakdowns.
pub(crate) fn dimensions_or_standard(requested: Vec<GroupingDimension>) -> Vec<GroupingDimension> {
    if requested.is_empty() {
        GroupingDimension::STANDARD.to_vec()
    } else {
        requested
    }
}
