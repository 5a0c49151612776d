use super::domain::{Applicant, Policy, ScoredRow};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Share of `rows` admitted under `policy`; `None` for an empty population.
pub fn admission_rate<'a, I>(rows: I, policy: Policy) -> Option<f64>
where
    I: IntoIterator<Item = &'a ScoredRow>,
{
    let (admitted, total) = rows
        .into_iter()
        .fold((0usize, 0usize), |(admitted, total), row| {
            (admitted + usize::from(row.admitted(policy)), total + 1)
        });

    if total == 0 {
        None
    } else {
        Some(admitted as f64 / total as f64)
    }
}

/// Admission rates for one group of a grouping dimension.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRates<K> {
    pub key: K,
    pub size: usize,
    pub blind_rate: Option<f64>,
    pub aware_rate: Option<f64>,
}

impl<K> GroupRates<K> {
    pub fn rate(&self, policy: Policy) -> Option<f64> {
        match policy {
            Policy::Blind => self.blind_rate,
            Policy::Aware => self.aware_rate,
        }
    }
}

/// Per-group rates for a single grouping dimension, ordered by key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRateTable<K> {
    pub groups: Vec<GroupRates<K>>,
}

impl<K> GroupRateTable<K> {
    /// Spread between the highest and lowest defined group rate under `policy`.
    /// Groups without a defined rate are excluded.
    pub fn parity_gap(&self, policy: Policy) -> Option<f64> {
        let mut rates = self.groups.iter().filter_map(|group| group.rate(policy));
        let first = rates.next()?;
        let (min, max) = rates.fold((first, first), |(min, max), rate| {
            (min.min(rate), max.max(rate))
        });
        Some(max - min)
    }

    /// Demographic parity gap of the aware policy.
    pub fn aware_parity_gap(&self) -> Option<f64> {
        self.parity_gap(Policy::Aware)
    }

    pub fn population(&self) -> usize {
        self.groups.iter().map(|group| group.size).sum()
    }
}

/// Partitions `rows` by `key_fn` and computes both policies' rates per group.
pub fn group_rates<K, F>(rows: &[ScoredRow], key_fn: F) -> GroupRateTable<K>
where
    K: Ord,
    F: Fn(&Applicant) -> K,
{
    let mut partitions: BTreeMap<K, Vec<&ScoredRow>> = BTreeMap::new();
    for row in rows {
        partitions
            .entry(key_fn(row.applicant()))
            .or_default()
            .push(row);
    }

    let groups = partitions
        .into_iter()
        .map(|(key, members)| GroupRates {
            size: members.len(),
            blind_rate: admission_rate(members.iter().copied(), Policy::Blind),
            aware_rate: admission_rate(members.iter().copied(), Policy::Aware),
            key,
        })
        .collect();

    GroupRateTable { groups }
}

/// Income brackets with half-open boundaries, lower bound inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IncomeBracket {
    Low,
    Middle,
    High,
}

impl IncomeBracket {
    pub const MIDDLE_FLOOR: f64 = 40_000.0;
    pub const HIGH_FLOOR: f64 = 100_000.0;

    pub fn from_income(income: f64) -> Self {
        if income < Self::MIDDLE_FLOOR {
            IncomeBracket::Low
        } else if income < Self::HIGH_FLOOR {
            IncomeBracket::Middle
        } else {
            IncomeBracket::High
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            IncomeBracket::Low => "Low",
            IncomeBracket::Middle => "Middle",
            IncomeBracket::High => "High",
        }
    }
}

/// Applicant attribute used to partition a population for parity reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupingDimension {
    FirstGeneration,
    Legacy,
    IncomeBracket,
    Disability,
    LocalResidency,
    Geography,
    Ethnicity,
}

impl GroupingDimension {
    pub const STANDARD: [GroupingDimension; 3] = [
        GroupingDimension::FirstGeneration,
        GroupingDimension::Legacy,
        GroupingDimension::IncomeBracket,
    ];

    pub const fn title(self) -> &'static str {
        match self {
            GroupingDimension::FirstGeneration => "By First-Gen",
            GroupingDimension::Legacy => "By Legacy",
            GroupingDimension::IncomeBracket => "By Income",
            GroupingDimension::Disability => "By Disability",
            GroupingDimension::LocalResidency => "By Residency",
            GroupingDimension::Geography => "By Geography",
            GroupingDimension::Ethnicity => "By Ethnicity",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().replace(&['-', ' '][..], "_").as_str() {
            "first_gen" | "first_generation" | "firstgen" => Some(Self::FirstGeneration),
            "legacy" => Some(Self::Legacy),
            "income" | "income_bracket" => Some(Self::IncomeBracket),
            "disability" => Some(Self::Disability),
            "local" | "residency" | "local_residency" => Some(Self::LocalResidency),
            "geography" => Some(Self::Geography),
            "ethnicity" => Some(Self::Ethnicity),
            _ => None,
        }
    }

    /// Group key for `applicant`. Keys sort in the order groups are reported.
    pub fn key(self, applicant: &Applicant) -> GroupKey {
        let (order, label) = match self {
            GroupingDimension::FirstGeneration => flag(
                applicant.first_generation,
                "FirstGen",
                "NonFirstGen",
            ),
            GroupingDimension::Legacy => flag(applicant.legacy_status, "Legacy", "NonLegacy"),
            GroupingDimension::IncomeBracket => {
                let bracket = IncomeBracket::from_income(applicant.income);
                (bracket as u8, bracket.label().to_string())
            }
            GroupingDimension::Disability => {
                flag(applicant.disability, "Disability", "NoDisability")
            }
            GroupingDimension::LocalResidency => {
                flag(applicant.local_residency, "Local", "NonLocal")
            }
            GroupingDimension::Geography => (0, category(&applicant.geography)),
            GroupingDimension::Ethnicity => (0, category(&applicant.ethnicity)),
        };
        GroupKey { order, label }
    }

    pub fn group_rates(self, rows: &[ScoredRow]) -> GroupRateTable<GroupKey> {
        group_rates(rows, |applicant| self.key(applicant))
    }
}

fn flag(value: bool, yes: &str, no: &str) -> (u8, String) {
    if value {
        (0, yes.to_string())
    } else {
        (1, no.to_string())
    }
}

fn category(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        "Unspecified".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Display label plus a sort position so brackets report Low, Middle, High.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct GroupKey {
    #[serde(skip)]
    order: u8,
    label: String,
}

impl GroupKey {
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl std::fmt::Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label)
    }
}
