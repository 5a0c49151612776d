//! Reads applicant spreadsheets into validated [`Applicant`] records.

mod normalizer;
mod parser;

pub use parser::SkipReason;

use crate::admissions::Applicant;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug)]
pub enum ImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Io(err) => write!(f, "failed to read applicant file: {}", err),
            ImportError::Csv(err) => write!(f, "invalid applicant CSV data: {}", err),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Io(err) => Some(err),
            ImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Input row that was discarded, with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub line: u64,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default)]
pub struct ImportOutcome {
    pub applicants: Vec<Applicant>,
    pub skipped: Vec<SkippedRow>,
}

pub struct ApplicantImporter;

impl ApplicantImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ImportOutcome, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// The first line is always treated as a header. Malformed rows are skipped
    /// and reported rather than failing the import.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<ImportOutcome, ImportError> {
        let mut raw = Vec::new();
        reader.read_to_end(&mut raw)?;

        let header = raw.split(|byte| *byte == b'\n').next().unwrap_or_default();
        let delimiter = parser::detect_delimiter(&String::from_utf8_lossy(header));

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(raw.as_slice());

        let mut outcome = ImportOutcome::default();

        for result in csv_reader.records() {
            let record = match result {
                Ok(record) => record,
                Err(err) => match err.kind() {
                    csv::ErrorKind::Utf8 { pos, .. } => {
                        let line = pos.as_ref().map(|pos| pos.line()).unwrap_or_default();
                        warn!(line, "skipping row with invalid encoding");
                        outcome.skipped.push(SkippedRow {
                            line,
                            reason: SkipReason::Encoding,
                        });
                        continue;
                    }
                    _ => return Err(err.into()),
                },
            };

            if record.iter().all(str::is_empty) {
                continue;
            }

            let line = record
                .position()
                .map(|pos| pos.line())
                .unwrap_or_default();

            match parser::applicant_from_record(&record) {
                Ok(applicant) => outcome.applicants.push(applicant),
                Err(reason) => {
                    if matches!(reason, SkipReason::TooFewColumns(_)) {
                        debug!(line, %reason, "skipping short row");
                    } else {
                        warn!(line, %reason, "skipping malformed row");
                    }
                    outcome.skipped.push(SkippedRow { line, reason });
                }
            }
        }

        info!(
            imported = outcome.applicants.len(),
            skipped = outcome.skipped.len(),
            "applicant import finished"
        );

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "Name,Age,Geography,Ethnicity,Income,Legacy,Local,GPA,Test,Extracurricular,Essay,Recommendation,FirstGen,Disability";

    #[test]
    fn imports_quoted_currency_and_skips_malformed_rows() {
        let csv = format!(
            "{HEADER}\n\
Avery Stone,18,Urban,White,\"$120,000\",Yes,No,3.7,1450,8,7.5,9,No,No\n\
\n\
Broken Row,17,Rural\n\
Jordan Park,17,Suburban,Asian,$38,500,No,Yes,abc,1300,6,6,6,Yes,No\n\
Riley Moss,18,Rural,Hispanic,\"$39,999\",No,Yes,3.95,1380,9,8,8,Yes,Yes\n"
        );

        let outcome = ApplicantImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        let names: Vec<_> = outcome
            .applicants
            .iter()
            .map(|applicant| applicant.name.as_str())
            .collect();
        assert_eq!(names, vec!["Avery Stone", "Riley Moss"]);
        assert_eq!(outcome.applicants[0].income, 120_000.0);
        assert_eq!(outcome.applicants[1].income, 39_999.0);
        assert_eq!(outcome.skipped.len(), 2);
        assert!(matches!(
            outcome.skipped[0].reason,
            SkipReason::TooFewColumns(3)
        ));
    }

    #[test]
    fn imports_tab_separated_files() {
        let csv = format!(
            "{}\nTaylor Reed\t17\tUrban\tBlack\t55000\tno\tno\t3.2\t1210\t6\t7\t7\tno\tno\n",
            HEADER.replace(',', "\t")
        );

        let outcome = ApplicantImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        assert_eq!(outcome.applicants.len(), 1);
        assert_eq!(outcome.applicants[0].test_score, 1210);
    }

    #[test]
    fn header_only_file_yields_no_applicants() {
        let outcome =
            ApplicantImporter::from_reader(Cursor::new(HEADER)).expect("import succeeds");
        assert!(outcome.applicants.is_empty());
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let error = ApplicantImporter::from_path("./does-not-exist.csv")
            .expect_err("expected io error");

        match error {
            ImportError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
