use admissions_audit::admissions::{
    AdmissionsAudit, GroupingDimension, Policy, ScoringPolicy, SelectionMode,
};
use admissions_audit::export::write_results;
use admissions_audit::intake::ApplicantImporter;
use std::io::Cursor;

const APPLICANTS: &str = "\
Name,Age,Geography,Ethnicity,Income,Legacy,Local,GPA,Test,Extracurricular,Essay,Recommendation,FirstGen,Disability
Morgan Lee,18,Urban,White,\"$150,000\",Yes,No,3.90,1500,8,8,9,No,No
Dana Cruz,17,Rural,Hispanic,\"$28,000\",No,Yes,3.70,1380,7,9,8,Yes,No
Sam Okafor,18,Suburban,Black,\"$62,500\",No,Yes,3.50,1300,9,7,7,Yes,Yes
Alex Kim,17,Urban,Asian,\"$95,000\",No,No,3.95,1540,6,6,7,No,No
Robin Vale,18,Rural,White,\"$33,000\",No,Yes,3.10,1150,5,6,6,Yes,No
Not Enough,Columns
";

fn import() -> Vec<admissions_audit::admissions::Applicant> {
    let outcome = ApplicantImporter::from_reader(Cursor::new(APPLICANTS)).expect("csv imports");
    assert_eq!(outcome.skipped.len(), 1);
    outcome.applicants
}

#[test]
fn top_k_pipeline_reports_and_exports_every_row() {
    let audit = AdmissionsAudit::new(ScoringPolicy::default());

    let outcome = audit
        .run(import(), SelectionMode::TopK(2), &GroupingDimension::STANDARD)
        .expect("audit runs");

    assert_eq!(outcome.report.population, 5);
    for policy in Policy::ALL {
        let admitted = outcome.rows.iter().filter(|row| row.admitted(policy)).count();
        assert_eq!(admitted, 2, "{} admits", policy.label());
        assert_eq!(outcome.report.overall_rate(policy), Some(0.4));
    }

    let income = outcome
        .report
        .dimension(GroupingDimension::IncomeBracket)
        .expect("income dimension reported");
    let labels: Vec<_> = income
        .table
        .groups
        .iter()
        .map(|group| group.key.label())
        .collect();
    assert_eq!(labels, vec!["Low", "Middle", "High"]);

    let mut buffer = Vec::new();
    write_results(&mut buffer, &outcome.rows).expect("results written");
    let output = String::from_utf8(buffer).expect("utf8");
    assert_eq!(output.lines().count(), 6);
    assert!(output.lines().nth(1).expect("first row").starts_with("Morgan Lee,3.90,1500,150000.00,true"));
}

#[test]
fn aware_policy_can_change_who_is_admitted() {
    let params = ScoringPolicy {
        first_generation_bonus: 25.0,
        legacy_bonus: 0.0,
        ..ScoringPolicy::default()
    };
    let audit = AdmissionsAudit::new(params);

    let outcome = audit
        .run(import(), SelectionMode::TopK(2), &[GroupingDimension::FirstGeneration])
        .expect("audit runs");

    let admitted = |policy: Policy| -> Vec<String> {
        outcome
            .rows
            .iter()
            .filter(|row| row.admitted(policy))
            .map(|row| row.applicant().name.clone())
            .collect()
    };
    assert_eq!(admitted(Policy::Blind), vec!["Morgan Lee", "Dana Cruz"]);
    assert!(admitted(Policy::Aware)
        .iter()
        .all(|name| name != "Morgan Lee" && name != "Alex Kim"));

    let first_gen = &outcome.report.dimensions[0];
    let blind_gap = first_gen
        .table
        .parity_gap(Policy::Blind)
        .expect("blind gap defined");
    assert!((blind_gap - (0.5 - 1.0 / 3.0)).abs() < 1e-12);
    assert_eq!(first_gen.table.aware_parity_gap(), Some(2.0 / 3.0));
}

#[test]
fn cutoff_pipeline_leaves_ranks_unset() {
    let audit = AdmissionsAudit::default();

    let outcome = audit
        .run(import(), SelectionMode::Cutoff(0.0), &GroupingDimension::STANDARD)
        .expect("audit runs");

    assert!(outcome
        .rows
        .iter()
        .all(|row| row.rank(Policy::Blind).is_none() && row.rank(Policy::Aware).is_none()));
    assert_eq!(outcome.report.overall_rate(Policy::Aware), Some(1.0));
    assert!(outcome
        .report
        .dimensions
        .iter()
        .all(|dimension| dimension.table.aware_parity_gap() == Some(0.0)));
}
