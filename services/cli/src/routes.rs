use crate::infra::{dimensions_or_standard, AppState};
use admissions_audit::admissions::report::views::{AdmissionsReportSummary, ScoredRowView};
use admissions_audit::admissions::{AdmissionsAudit, GroupingDimension};
use admissions_audit::error::AppError;
use admissions_audit::intake::ApplicantImporter;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;

#[derive(Debug, Deserialize)]
pub(crate) struct AdmissionsReportRequest {
    pub(crate) applicants_csv: String,
    #[serde(default)]
    pub(crate) top_k: Option<usize>,
    #[serde(default)]
    pub(crate) cutoff: Option<f64>,
    #[serde(default)]
    pub(crate) dimensions: Vec<GroupingDimension>,
    #[serde(default)]
    pub(crate) include_rows: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct AdmissionsReportResponse {
    pub(crate) generated_at: DateTime<Utc>,
    pub(crate) skipped_rows: usize,
    pub(crate) summary: AdmissionsReportSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) rows: Option<Vec<ScoredRowView>>,
}

pub(crate) fn with_routes() -> axum::Router {
    axum::Router::new()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/admissions/report",
            axum::routing::post(admissions_report_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn admissions_report_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<AdmissionsReportRequest>,
) -> Result<Json<AdmissionsReportResponse>, AppError> {
    let AdmissionsReportRequest {
        applicants_csv,
        top_k,
        cutoff,
        dimensions,
        include_rows,
    } = payload;

    let imported = ApplicantImporter::from_reader(Cursor::new(applicants_csv.into_bytes()))?;
    let selection = state.selection.with_overrides(top_k, cutoff);

    let audit = AdmissionsAudit::new(state.scoring.as_ref().clone());
    let outcome = audit.run(
        imported.applicants,
        selection,
        &dimensions_or_standard(dimensions),
    )?;

    let rows = if include_rows {
        Some(outcome.rows.iter().map(ScoredRowView::from).collect())
    } else {
        None
    };

    Ok(Json(AdmissionsReportResponse {
        generated_at: Utc::now(),
        skipped_rows: imported.skipped.len(),
        summary: outcome.report.summary(),
        rows,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use admissions_audit::admissions::{ScoringPolicy, SelectionMode};
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tower::ServiceExt;

    const CSV: &str = "\
Name,Age,Geography,Ethnicity,Income,Legacy,Local,GPA,Test,Extracurricular,Essay,Recommendation,FirstGen,Disability
Avery Stone,18,Urban,White,\"$120,000\",Yes,No,3.9,1500,8,8,8,No,No
Riley Moss,18,Rural,Hispanic,\"$35,000\",No,Yes,3.4,1300,7,7,7,Yes,No
Jordan Park,17,Suburban,Asian,72000,No,No,3.0,1200,6,6,6,No,No
Short,17
";

    fn state(ready: bool) -> AppState {
        let recorder = PrometheusBuilder::new().build_recorder();
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(recorder.handle()),
            scoring: Arc::new(ScoringPolicy::default()),
            selection: SelectionMode::default(),
        }
    }

    fn request(csv: &str) -> AdmissionsReportRequest {
        AdmissionsReportRequest {
            applicants_csv: csv.to_string(),
            top_k: Some(1),
            cutoff: None,
            dimensions: Vec::new(),
            include_rows: false,
        }
    }

    #[tokio::test]
    async fn report_endpoint_summarizes_population() {
        let Json(body) = admissions_report_endpoint(Extension(state(true)), Json(request(CSV)))
            .await
            .expect("report builds");

        assert_eq!(body.skipped_rows, 1);
        assert_eq!(body.summary.population, 3);
        assert_eq!(body.summary.selection, SelectionMode::TopK(1));
        assert_eq!(body.summary.dimensions.len(), 3);
        assert!(body.rows.is_none());
    }

    #[tokio::test]
    async fn report_endpoint_can_include_rows() {
        let mut payload = request(CSV);
        payload.include_rows = true;
        payload.cutoff = Some(0.0);
        payload.dimensions = vec![GroupingDimension::Geography];

        let Json(body) = admissions_report_endpoint(Extension(state(true)), Json(payload))
            .await
            .expect("report builds");

        let rows = body.rows.expect("rows returned");
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row.admit_blind && row.admit_aware));
        assert!(rows.iter().all(|row| row.rank_blind.is_none()));
        assert_eq!(body.summary.dimensions[0].groups.len(), 3);
    }

    #[tokio::test]
    async fn report_endpoint_uses_configured_selection_by_default() {
        let mut configured = state(true);
        configured.selection = SelectionMode::Cutoff(0.0);
        let mut payload = request(CSV);
        payload.top_k = None;

        let Json(body) = admissions_report_endpoint(Extension(configured.clone()), Json(payload))
            .await
            .expect("report builds");
        assert_eq!(body.summary.selection, SelectionMode::Cutoff(0.0));
        assert_eq!(body.summary.overall_aware_rate, Some(1.0));

        let Json(body) = admissions_report_endpoint(Extension(configured), Json(request(CSV)))
            .await
            .expect("report builds");
        assert_eq!(body.summary.selection, SelectionMode::TopK(1));
    }

    #[tokio::test]
    async fn report_endpoint_rejects_header_only_input() {
        let header = CSV.lines().next().expect("header line");
        let error = admissions_report_endpoint(Extension(state(true)), Json(request(header)))
            .await
            .expect_err("empty population");

        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn readiness_reports_initializing_until_bound() {
        let app = with_routes().layer(Extension(state(false)));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/ready")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn health_route_is_mounted() {
        let app = with_routes().layer(Extension(state(true)));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
    }
}
