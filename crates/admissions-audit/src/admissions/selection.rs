//! Ranking and admission decisions for a scored population.
//!
//! Top-K selection sorts an index vector rather than the rows themselves, so the
//! caller's row order is never disturbed and the blind and aware runs cannot alias
//! each other's ordering.

use super::domain::{Policy, ScoredRow};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

pub const DEFAULT_TOP_K: usize = 120;

/// How admissions are decided for a run. Exactly one mode applies per run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "value")]
pub enum SelectionMode {
    /// Admit the K highest-ranked applicants under each policy.
    TopK(usize),
    /// Admit every applicant whose score reaches the threshold.
    Cutoff(f64),
}

impl SelectionMode {
    /// A present cutoff suppresses K entirely.
    pub fn resolve(top_k: Option<usize>, cutoff: Option<f64>, default_k: usize) -> Self {
        match cutoff {
            Some(cutoff) => SelectionMode::Cutoff(cutoff),
            None => SelectionMode::TopK(top_k.unwrap_or(default_k)),
        }
    }

    /// Applies per-run overrides on top of a configured mode. A present cutoff
    /// wins, a lone K switches to top-K, and no overrides keep `self`.
    pub fn with_overrides(self, top_k: Option<usize>, cutoff: Option<f64>) -> Self {
        match (top_k, cutoff) {
            (_, Some(cutoff)) => SelectionMode::Cutoff(cutoff),
            (Some(k), None) => SelectionMode::TopK(k),
            (None, None) => self,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            SelectionMode::TopK(k) => format!("Top-K:  {k}"),
            SelectionMode::Cutoff(cutoff) => format!("Cutoff: {cutoff:.3}"),
        }
    }
}

impl Default for SelectionMode {
    fn default() -> Self {
        SelectionMode::TopK(DEFAULT_TOP_K)
    }
}

/// Ranking order under `policy`: higher score first, then higher test score, then
/// higher GPA, then case-insensitive name ascending.
pub fn compare_rows(a: &ScoredRow, b: &ScoredRow, policy: Policy) -> Ordering {
    let (score_a, score_b) = (a.score(policy), b.score(policy));
    if score_a != score_b {
        return score_b.total_cmp(&score_a);
    }

    let (left, right) = (a.applicant(), b.applicant());
    right
        .test_score
        .cmp(&left.test_score)
        .then_with(|| {
            if left.gpa == right.gpa {
                Ordering::Equal
            } else {
                right.gpa.total_cmp(&left.gpa)
            }
        })
        .then_with(|| cmp_ignore_case(&left.name, &right.name))
}

fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Indices of `rows` in ranked order. Exact duplicates keep their input order.
pub fn ranked_indices(rows: &[ScoredRow], policy: Policy) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rows.len()).collect();
    order.sort_by(|&a, &b| compare_rows(&rows[a], &rows[b], policy));
    order
}

/// Assigns 1-based ranks under `policy` and admits the first `k`. Fields of the
/// other policy are left untouched.
pub fn admit_top_k(rows: &mut [ScoredRow], k: usize, policy: Policy) {
    let order = ranked_indices(rows, policy);
    for (position, index) in order.into_iter().enumerate() {
        rows[index].set_outcome(policy, position < k, Some(position + 1));
    }

    debug!(
        policy = policy.label(),
        k,
        population = rows.len(),
        "top-k admission applied"
    );
}

/// Admits each row independently when its score reaches `cutoff`. Ranks are cleared.
pub fn admit_by_cutoff(rows: &mut [ScoredRow], cutoff: f64) {
    for row in rows.iter_mut() {
        for policy in Policy::ALL {
            let admitted = row.score(policy) >= cutoff;
            row.set_outcome(policy, admitted, None);
        }
    }

    debug!(cutoff, population = rows.len(), "cutoff admission applied");
}

pub fn apply_selection(rows: &mut [ScoredRow], mode: &SelectionMode) {
    match *mode {
        SelectionMode::TopK(k) => {
            for policy in Policy::ALL {
                admit_top_k(rows, k, policy);
            }
        }
        SelectionMode::Cutoff(cutoff) => admit_by_cutoff(rows, cutoff),
    }
}
