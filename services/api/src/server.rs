use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_service_routes;
use axum::{Extension, Router};
use axum_prometheus::PrometheusMetricLayer;
use hiringthing::config::AppConfig;
use hiringthing::error::AppError;
use hiringthing::telemetry;
use hiringthing::{HiringThingClient, RecruitingApi};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    telemetry::init(&config.telemetry)?;

    let client = HiringThingClient::with_config(config.hiringthing.client_config())?;
    info!(base_url = %client.base_url(), "hiringthing client configured");

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let state = AppState {
        readiness: Arc::new(AtomicBool::new(false)),
        metrics: Arc::new(prometheus_handle),
    };
    let app = service_app(Arc::new(client), state.clone()).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    state.readiness.store(true, Ordering::Release);
    info!(environment = ?config.environment, %addr, "hiringthing dashboard listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Dashboard, listing and operational routes sharing one `AppState`.
pub(crate) fn service_app<A>(api: Arc<A>, state: AppState) -> Router
where
    A: RecruitingApi + 'static,
{
    with_service_routes(api).layer(Extension(state))
}
