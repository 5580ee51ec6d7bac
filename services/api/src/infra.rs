use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// `?filter=` query accepted by the listing endpoints.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct FilterQuery {
    #[serde(default)]
    pub(crate) filter: Option<String>,
}

impl FilterQuery {
    /// Parses the raw filter, treating a missing or blank value as the default.
    pub(crate) fn parse<F>(&self) -> Result<F, F::Err>
    where
        F: std::str::FromStr + Default,
    {
        match self.filter.as_deref().map(str::trim) {
            None | Some("") => Ok(F::default()),
            Some(raw) => raw.parse(),
        }
    }
}
