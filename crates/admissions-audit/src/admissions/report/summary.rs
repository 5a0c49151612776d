use super::super::domain::{Policy, ScoredRow};
use super::super::fairness::{admission_rate, GroupKey, GroupRateTable, GroupingDimension};
use super::super::selection::SelectionMode;
use super::views::{AdmissionsReportSummary, DimensionRatesView, GroupRateEntry};

#[derive(Debug, Clone)]
pub struct DimensionRates {
    pub dimension: GroupingDimension,
    pub table: GroupRateTable<GroupKey>,
}

impl DimensionRates {
    pub fn to_view(&self) -> DimensionRatesView {
        DimensionRatesView {
            dimension: self.dimension,
            title: self.dimension.title(),
            groups: self
                .table
                .groups
                .iter()
                .map(|group| GroupRateEntry {
                    group: group.key.label().to_string(),
                    size: group.size,
                    blind_rate: group.blind_rate,
                    aware_rate: group.aware_rate,
                })
                .collect(),
            blind_parity_gap: self.table.parity_gap(Policy::Blind),
            aware_parity_gap: self.table.aware_parity_gap(),
        }
    }
}

/// Aggregate statistics for one selection run over a decorated population.
#[derive(Debug, Clone)]
pub struct AdmissionsReport {
    pub population: usize,
    pub selection: SelectionMode,
    pub overall_blind_rate: Option<f64>,
    pub overall_aware_rate: Option<f64>,
    pub dimensions: Vec<DimensionRates>,
}

impl AdmissionsReport {
    /// Each dimension is grouped independently of the others.
    pub fn build(
        rows: &[ScoredRow],
        selection: SelectionMode,
        dimensions: &[GroupingDimension],
    ) -> Self {
        let dimensions = dimensions
            .iter()
            .map(|&dimension| DimensionRates {
                dimension,
                table: dimension.group_rates(rows),
            })
            .collect();

        Self {
            population: rows.len(),
            selection,
            overall_blind_rate: admission_rate(rows, Policy::Blind),
            overall_aware_rate: admission_rate(rows, Policy::Aware),
            dimensions,
        }
    }

    pub fn overall_rate(&self, policy: Policy) -> Option<f64> {
        match policy {
            Policy::Blind => self.overall_blind_rate,
            Policy::Aware => self.overall_aware_rate,
        }
    }

    pub fn dimension(&self, dimension: GroupingDimension) -> Option<&DimensionRates> {
        self.dimensions
            .iter()
            .find(|rates| rates.dimension == dimension)
    }

    pub fn summary(&self) -> AdmissionsReportSummary {
        AdmissionsReportSummary {
            population: self.population,
            selection: self.selection,
            overall_blind_rate: self.overall_blind_rate,
            overall_aware_rate: self.overall_aware_rate,
            dimensions: self.dimensions.iter().map(DimensionRates::to_view).collect(),
        }
    }
}
