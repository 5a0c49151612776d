use crate::infra::{dimensions_or_standard, parse_cutoff_arg, parse_dimension, parse_k_arg};
use admissions_audit::admissions::{AdmissionsAudit, AdmissionsReport, GroupingDimension, Policy};
use admissions_audit::config::{load_scoring_policy, AppConfig, AuditConfig};
use admissions_audit::error::AppError;
use admissions_audit::export::write_results_to_path;
use admissions_audit::intake::ApplicantImporter;
use admissions_audit::telemetry;
use clap::Args;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Args, Debug, Default)]
pub(crate) struct RunArgs {
    /// Applicant CSV to read (defaults to ADMISSIONS_INPUT or applicants.csv)
    #[arg(long)]
    pub(crate) input: Option<PathBuf>,
    /// Destination for the per-applicant results CSV (defaults to results.csv)
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
    /// Admit the K highest-ranked applicants under each policy
    #[arg(long = "k", value_parser = parse_k_arg)]
    pub(crate) k: Option<usize>,
    /// Admit every applicant scoring at least this value; overrides --k
    #[arg(long, value_parser = parse_cutoff_arg, allow_hyphen_values = true)]
    pub(crate) cutoff: Option<f64>,
    /// JSON scoring policy overriding the default weights
    #[arg(long)]
    pub(crate) policy_file: Option<PathBuf>,
    /// Grouping dimension to report; repeat for several (defaults to first-gen, legacy, income)
    #[arg(long = "dimension", value_parser = parse_dimension)]
    pub(crate) dimensions: Vec<GroupingDimension>,
}

pub(crate) fn run_audit(args: RunArgs) -> Result<(), AppError> {
    let RunArgs {
        input,
        output,
        k,
        cutoff,
        policy_file,
        dimensions,
    } = args;

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let mut audit_config = config.audit;
    if let Some(path) = input {
        audit_config.input_path = path;
    }
    if let Some(path) = output {
        audit_config.output_path = path;
    }
    if let Some(path) = policy_file {
        audit_config.scoring = load_scoring_policy(path)?;
    }
    if k.is_some() && cutoff.is_some() {
        warn!("both --k and --cutoff supplied; cutoff takes precedence");
    }
    audit_config.selection = audit_config.selection.with_overrides(k, cutoff);

    let stdout = io::stdout();
    execute(audit_config, dimensions, &mut stdout.lock())
}

/// Imports, audits, prints the console report to `out`, and saves the results.
/// An input without applicants only prints a notice.
pub(crate) fn execute<W: Write>(
    audit_config: AuditConfig,
    dimensions: Vec<GroupingDimension>,
    out: &mut W,
) -> Result<(), AppError> {
    let imported = ApplicantImporter::from_path(&audit_config.input_path)?;
    info!(
        path = %audit_config.input_path.display(),
        applicants = imported.applicants.len(),
        skipped = imported.skipped.len(),
        "applicants loaded"
    );
    if imported.applicants.is_empty() {
        writeln!(out, "No applicants found. Check CSV header and path.")?;
        return Ok(());
    }

    let audit = AdmissionsAudit::new(audit_config.scoring);
    let outcome = audit.run(
        imported.applicants,
        audit_config.selection,
        &dimensions_or_standard(dimensions),
    )?;

    render_console_report(out, &outcome.report)?;

    write_results_to_path(&audit_config.output_path, &outcome.rows)?;
    writeln!(out, "\nSaved: {}", audit_config.output_path.display())?;

    Ok(())
}

fn format_rate(rate: Option<f64>) -> String {
    match rate {
        Some(rate) => format!("{rate:.3}"),
        None => "n/a".to_string(),
    }
}

pub(crate) fn render_console_report<W: Write>(
    out: &mut W,
    report: &AdmissionsReport,
) -> io::Result<()> {
    writeln!(out, "=== Ethical Admissions Results ===")?;
    writeln!(out, "Applicants: {}", report.population)?;
    writeln!(out, "{}", report.selection.describe())?;

    for policy in Policy::ALL {
        writeln!(
            out,
            "Overall admit rate {}: {}",
            policy.label(),
            format_rate(report.overall_rate(policy))
        )?;
    }

    for dimension in &report.dimensions {
        writeln!(out, "\n{}", dimension.dimension.title())?;
        for group in &dimension.table.groups {
            writeln!(
                out,
                "  {:<12} | BLIND: {}  AWARE: {}  (n={})",
                group.key.label(),
                format_rate(group.blind_rate),
                format_rate(group.aware_rate),
                group.size
            )?;
        }
        writeln!(
            out,
            "  Demographic parity gap (AWARE): {}",
            format_rate(dimension.table.aware_parity_gap())
        )?;
    }

    Ok(())
}
