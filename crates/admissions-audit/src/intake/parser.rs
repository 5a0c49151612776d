use super::normalizer::{normalize_name, parse_income, parse_yes_no};
use crate::admissions::Applicant;
use csv::StringRecord;
use std::str::FromStr;

pub(crate) const EXPECTED_COLUMNS: usize = 14;

/// Reason an input row was left out of the applicant population.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    #[error("expected 14 columns, found {0}")]
    TooFewColumns(usize),
    #[error("applicant name is empty")]
    EmptyName,
    #[error("column '{column}' has invalid value '{value}'")]
    InvalidField { column: &'static str, value: String },
    #[error("row is not valid UTF-8")]
    Encoding,
}

/// Picks tab as the delimiter only for tab-separated headers without commas.
pub(crate) fn detect_delimiter(header: &str) -> u8 {
    if header.contains('\t') && !header.contains(',') {
        b'\t'
    } else {
        b','
    }
}

pub(crate) fn applicant_from_record(record: &StringRecord) -> Result<Applicant, SkipReason> {
    if record.len() < EXPECTED_COLUMNS {
        return Err(SkipReason::TooFewColumns(record.len()));
    }

    let field = |index: usize| record.get(index).unwrap_or_default();

    let name = normalize_name(field(0)).ok_or(SkipReason::EmptyName)?;

    Ok(Applicant {
        name,
        age: parse_number(field(1), "age")?,
        geography: field(2).trim().to_string(),
        ethnicity: field(3).trim().to_string(),
        income: parse_income(field(4)),
        legacy_status: parse_yes_no(field(5)),
        local_residency: parse_yes_no(field(6)),
        gpa: parse_real(field(7), "gpa")?,
        test_score: parse_number(field(8), "test_score")?,
        extracurricular_score: parse_real(field(9), "extracurricular_score")?,
        essay_score: parse_real(field(10), "essay_score")?,
        recommendation_score: parse_real(field(11), "recommendation_score")?,
        first_generation: parse_yes_no(field(12)),
        disability: parse_yes_no(field(13)),
    })
}

fn parse_number<T: FromStr>(raw: &str, column: &'static str) -> Result<T, SkipReason> {
    raw.trim().parse::<T>().map_err(|_| SkipReason::InvalidField {
        column,
        value: raw.to_string(),
    })
}

fn parse_real(raw: &str, column: &'static str) -> Result<f64, SkipReason> {
    let value: f64 = parse_number(raw, column)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SkipReason::InvalidField {
            column,
            value: raw.to_string(),
        })
    }
}
