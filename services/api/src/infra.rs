use maturity_engine::assessment::catalog::{Catalog, CatalogRegistry};
use maturity_engine::assessment::report::AnalysisFocus;
use maturity_engine::config::{self, AssessmentConfig};
use maturity_engine::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Built-in catalogs plus the optional JSON definition named by the configuration, with any
/// configured benchmark overrides applied.
pub(crate) fn load_registry(config: &AssessmentConfig) -> Result<CatalogRegistry, AppError> {
    let mut registry = CatalogRegistry::standard();

    if let Some(path) = &config.catalog_path {
        let catalog = Catalog::from_path(path)?;
        info!(
            key = catalog.key(),
            questions = catalog.question_count(),
            path = %path.display(),
            "registered catalog definition"
        );
        registry.register(catalog)?;
    }

    for (key, average) in &config.benchmarks {
        registry.set_benchmark(key, *average)?;
        info!(key = %key, average = *average, "benchmark override applied");
    }

    Ok(registry)
}

pub(crate) fn parse_gap_threshold(raw: &str) -> Result<u8, String> {
    config::parse_gap_threshold(raw).map_err(|err| err.to_string())
}

pub(crate) fn parse_focus(raw: &str) -> Result<AnalysisFocus, String> {
    raw.parse::<AnalysisFocus>().map_err(|err| {
        let known: Vec<&str> = AnalysisFocus::ordered()
            .into_iter()
            .map(AnalysisFocus::slug)
            .collect();
        format!("{err} (expected one of: {})", known.join(", "))
    })
}
