//! Results spreadsheet written after a selection run.

use crate::admissions::{Policy, ScoredRow};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("could not write results to {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not encode results: {0}")]
    Csv(#[from] csv::Error),
}

const HEADER: [&str; 13] = [
    "name",
    "gpa",
    "test",
    "income",
    "legacy",
    "firstGen",
    "disability",
    "blindScore",
    "awareScore",
    "admitBlind",
    "admitAware",
    "rankBlind",
    "rankAware",
];

/// Field order must match [`HEADER`].
#[derive(Debug, Serialize)]
struct ResultRecord<'a> {
    name: &'a str,
    gpa: String,
    test: i32,
    income: String,
    legacy: bool,
    first_generation: bool,
    disability: bool,
    blind_score: String,
    aware_score: String,
    admit_blind: bool,
    admit_aware: bool,
    rank_blind: usize,
    rank_aware: usize,
}

impl<'a> From<&'a ScoredRow> for ResultRecord<'a> {
    fn from(row: &'a ScoredRow) -> Self {
        let applicant = row.applicant();
        Self {
            name: &applicant.name,
            gpa: format!("{:.2}", applicant.gpa),
            test: applicant.test_score,
            income: format!("{:.2}", applicant.income),
            legacy: applicant.legacy_status,
            first_generation: applicant.first_generation,
            disability: applicant.disability,
            blind_score: format!("{:.4}", row.score(Policy::Blind)),
            aware_score: format!("{:.4}", row.score(Policy::Aware)),
            admit_blind: row.admitted(Policy::Blind),
            admit_aware: row.admitted(Policy::Aware),
            rank_blind: row.rank(Policy::Blind).unwrap_or(0),
            rank_aware: row.rank(Policy::Aware).unwrap_or(0),
        }
    }
}

/// Writes the header, then one line per row in input order. Unranked rows
/// report rank 0.
pub fn write_results<W: Write>(writer: W, rows: &[ScoredRow]) -> Result<(), ExportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(HEADER)?;
    for row in rows {
        csv_writer.serialize(ResultRecord::from(row))?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// The file is rendered in memory before the destination is touched.
pub fn write_results_to_path<P: AsRef<Path>>(path: P, rows: &[ScoredRow]) -> Result<(), ExportError> {
    let mut buffer = Vec::new();
    write_results(&mut buffer, rows)?;

    let path = path.as_ref();
    std::fs::write(path, buffer).map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admissions::{admit_by_cutoff, admit_top_k, Applicant};

    fn row(name: &str, blind: f64, aware: f64) -> ScoredRow {
        ScoredRow::new(
            Applicant {
                name: name.to_string(),
                age: 18,
                geography: "Urban".to_string(),
                ethnicity: "White".to_string(),
                income: 41_500.0,
                legacy_status: true,
                local_residency: false,
                gpa: 3.456,
                test_score: 1320,
                extracurricular_score: 6.0,
                essay_score: 7.0,
                recommendation_score: 8.0,
                first_generation: false,
                disability: false,
            },
            blind,
            aware,
        )
    }

    fn render(rows: &[ScoredRow]) -> String {
        let mut buffer = Vec::new();
        write_results(&mut buffer, rows).expect("results render");
        String::from_utf8(buffer).expect("utf8 output")
    }

    #[test]
    fn writes_header_and_formatted_values() {
        let mut rows = vec![row("Lee", 70.125, 74.5), row("Kim", 65.0, 80.0)];
        admit_top_k(&mut rows, 1, Policy::Blind);
        admit_top_k(&mut rows, 1, Policy::Aware);

        let output = render(&rows);
        let mut lines = output.lines();

        assert_eq!(
            lines.next(),
            Some("name,gpa,test,income,legacy,firstGen,disability,blindScore,awareScore,admitBlind,admitAware,rankBlind,rankAware")
        );
        assert_eq!(
            lines.next(),
            Some("Lee,3.46,1320,41500.00,true,false,false,70.1250,74.5000,true,false,1,2")
        );
        assert_eq!(
            lines.next(),
            Some("Kim,3.46,1320,41500.00,true,false,false,65.0000,80.0000,false,true,2,1")
        );
    }

    #[test]
    fn empty_population_still_writes_header() {
        let output = render(&[]);
        assert_eq!(output, format!("{}\n", HEADER.join(",")));
    }

    #[test]
    fn cutoff_rows_report_rank_zero() {
        let mut rows = vec![row("Lee", 70.0, 74.0)];
        admit_by_cutoff(&mut rows, 72.0);

        let output = render(&rows);
        let data = output.lines().nth(1).expect("data line");
        assert!(data.ends_with("false,true,0,0"), "unexpected line: {data}");
    }

    #[test]
    fn writes_to_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("results.csv");
        let rows = vec![row("Lee", 70.0, 74.0)];

        write_results_to_path(&path, &rows).expect("file written");

        let contents = std::fs::read_to_string(&path).expect("file readable");
        assert_eq!(contents.lines().count(), 2);
    }

    #[test]
    fn missing_directory_reports_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("missing").join("results.csv");

        let error = write_results_to_path(&path, &[]).expect_err("directory missing");
        assert!(matches!(error, ExportError::Io { .. }));
        assert!(error.to_string().contains("results.csv"));
    }
}
