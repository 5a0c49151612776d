use crate::admissions::domain::{Applicant, ScoredRow};

pub(super) fn applicant(name: &str) -> Applicant {
    Applicant {
        name: name.to_string(),
        age: 17,
        geography: "Urban".to_string(),
        ethnicity: "White".to_string(),
        income: 65_000.0,
        legacy_status: false,
        local_residency: false,
        gpa: 3.5,
        test_score: 1300,
        extracurricular_score: 6.0,
        essay_score: 7.0,
        recommendation_score: 7.5,
        first_generation: false,
        disability: false,
    }
}

pub(super) fn applicant_with(name: &str, gpa: f64, test_score: i32) -> Applicant {
    Applicant {
        gpa,
        test_score,
        ..applicant(name)
    }
}

/// Row with explicit scores so selection tests do not depend on weighting.
pub(super) fn row(name: &str, blind: f64, aware: f64) -> ScoredRow {
    ScoredRow::new(applicant(name), blind, aware)
}

pub(super) fn row_from(applicant: Applicant, blind: f64, aware: f64) -> ScoredRow {
    ScoredRow::new(applicant, blind, aware)
}

pub(super) fn admitted_names(rows: &[ScoredRow], policy: crate::admissions::Policy) -> Vec<&str> {
    rows.iter()
        .filter(|row| row.admitted(policy))
        .map(|row| row.applicant().name.as_str())
        .collect()
}
