use std::fmt;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use super::catalog::{Catalog, CatalogRegistry};
use super::report::views::{AssessmentInsights, AssessmentSummary};
use super::report::AssessmentReport;
use super::responses::{ResponseSet, Score};

/// Shared, read-only state behind the assessment endpoints.
#[derive(Debug, Clone)]
pub struct AssessmentService {
    registry: CatalogRegistry,
    default_threshold: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AssessmentServiceError {
    UnknownCatalog(String),
    InvalidThreshold(i64),
}

impl fmt::Display for AssessmentServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssessmentServiceError::UnknownCatalog(key) => write!(f, "unknown catalog '{}'", key),
            AssessmentServiceError::InvalidThreshold(value) => write!(
                f,
                "gap threshold {} is outside {}..={}",
                value,
                Score::MIN,
                Score::MAX
            ),
        }
    }
}

impl std::error::Error for AssessmentServiceError {}

impl AssessmentService {
    pub fn new(registry: CatalogRegistry, default_threshold: u8) -> Self {
        Self {
            registry,
            default_threshold,
        }
    }

    pub fn registry(&self) -> &CatalogRegistry {
        &self.registry
    }

    pub fn default_threshold(&self) -> u8 {
        self.default_threshold
    }

    pub fn catalog(&self, key: &str) -> Result<&Catalog, AssessmentServiceError> {
        self.registry
            .get(key)
            .ok_or_else(|| AssessmentServiceError::UnknownCatalog(key.to_string()))
    }

    pub fn report(
        &self,
        key: &str,
        responses: &ResponseSet,
        gap_threshold: Option<i64>,
    ) -> Result<AssessmentReport, AssessmentServiceError> {
        let threshold = match gap_threshold {
            Some(value) => Score::try_from(value)
                .map_err(|_| AssessmentServiceError::InvalidThreshold(value))?
                .value(),
            None => self.default_threshold,
        };
        let catalog = self.catalog(key)?;
        Ok(AssessmentReport::build(catalog, responses, threshold))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogListing {
    pub key: String,
    pub title: String,
    pub domains: usize,
    pub questions: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benchmark: Option<f64>,
}

impl From<&Catalog> for CatalogListing {
    fn from(catalog: &Catalog) -> Self {
        Self {
            key: catalog.key().to_string(),
            title: catalog.title().to_string(),
            domains: catalog.domains().len(),
            questions: catalog.question_count(),
            benchmark: catalog.benchmark(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportRequest {
    #[serde(default)]
    pub responses: ResponseSet,
    #[serde(default)]
    pub gap_threshold: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportResponse {
    pub summary: AssessmentSummary,
    pub insights: AssessmentInsights,
    pub ignored_question_ids: Vec<String>,
}

/// Router exposing catalog listing and report generation over HTTP.
pub fn assessment_router(service: Arc<AssessmentService>) -> Router {
    Router::new()
        .route("/api/v1/catalogs", get(list_handler))
        .route("/api/v1/catalogs/:key", get(catalog_handler))
        .route("/api/v1/catalogs/:key/report", post(report_handler))
        .with_state(service)
}

pub(crate) async fn list_handler(State(service): State<Arc<AssessmentService>>) -> Response {
    let listings: Vec<CatalogListing> = service
        .registry()
        .catalogs()
        .iter()
        .map(CatalogListing::from)
        .collect();
    (StatusCode::OK, axum::Json(listings)).into_response()
}

pub(crate) async fn catalog_handler(
    State(service): State<Arc<AssessmentService>>,
    Path(key): Path<String>,
) -> Response {
    match service.catalog(&key) {
        Ok(catalog) => (StatusCode::OK, axum::Json(catalog)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn report_handler(
    State(service): State<Arc<AssessmentService>>,
    Path(key): Path<String>,
    axum::Json(request): axum::Json<ReportRequest>,
) -> Response {
    let report = match service.report(&key, &request.responses, request.gap_threshold) {
        Ok(report) => report,
        Err(error) => return error_response(error),
    };

    let ignored_question_ids: Vec<String> = service
        .catalog(&key)
        .map(|catalog| {
            request
                .responses
                .unknown_ids(catalog)
                .into_iter()
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let summary = report.summary();
    info!(
        catalog = %summary.catalog,
        overall = summary.overall,
        maturity = summary.maturity_label,
        gaps = summary.gaps.len(),
        "assessment report generated"
    );

    let body = ReportResponse {
        insights: summary.insights(),
        summary,
        ignored_question_ids,
    };
    (StatusCode::OK, axum::Json(body)).into_response()
}

fn error_response(error: AssessmentServiceError) -> Response {
    let status = match error {
        AssessmentServiceError::UnknownCatalog(_) => StatusCode::NOT_FOUND,
        AssessmentServiceError::InvalidThreshold(_) => StatusCode::UNPROCESSABLE_ENTITY,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
