use crate::infra::{AppState, FilterQuery};
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use hiringthing::error::AppError;
use hiringthing::report::{render_error_html, DashboardReport};
use hiringthing::{
    Application, ApplicationFilter, ApplicationId, Job, JobFilter, JobId, RecruitingApi,
};
use serde_json::json;
use std::sync::Arc;
use tracing::warn;

/// Dashboard page plus JSON listing endpoints backed by `api`.
pub(crate) fn hiringthing_router<A>(api: Arc<A>) -> Router
where
    A: RecruitingApi + 'static,
{
    Router::new()
        .route("/", get(dashboard_endpoint::<A>))
        .route("/api/v1/jobs", get(list_jobs_endpoint::<A>))
        .route("/api/v1/jobs/:job_id", get(get_job_endpoint::<A>))
        .route(
            "/api/v1/jobs/:job_id/applications",
            get(job_applications_endpoint::<A>),
        )
        .route("/api/v1/applications", get(list_applications_endpoint::<A>))
        .route(
            "/api/v1/applications/:application_id",
            get(get_application_endpoint::<A>),
        )
        .with_state(api)
}

pub(crate) fn with_service_routes<A>(api: Arc<A>) -> Router
where
    A: RecruitingApi + 'static,
{
    hiringthing_router(api)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
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

pub(crate) async fn dashboard_endpoint<A>(State(api): State<Arc<A>>) -> Response
where
    A: RecruitingApi + 'static,
{
    let (status, page) = match DashboardReport::collect(api.as_ref()).await {
        Ok(report) => (StatusCode::OK, report.render_html()),
        Err(err) => {
            warn!(error = %err, "dashboard unavailable");
            let page = render_error_html(&err);
            (AppError::from(err).status_code(), page)
        }
    };

    (
        status,
        [(header::CONTENT_TYPE, mime::TEXT_HTML_UTF_8.as_ref())],
        page,
    )
        .into_response()
}

pub(crate) async fn list_jobs_endpoint<A>(
    State(api): State<Arc<A>>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<Vec<Job>>, AppError>
where
    A: RecruitingApi + 'static,
{
    let filter: JobFilter = query.parse()?;
    Ok(Json(api.list_jobs(filter).await?))
}

pub(crate) async fn get_job_endpoint<A>(
    State(api): State<Arc<A>>,
    Path(job_id): Path<String>,
) -> Result<Json<Job>, AppError>
where
    A: RecruitingApi + 'static,
{
    Ok(Json(api.get_job(&JobId(job_id)).await?))
}

pub(crate) async fn job_applications_endpoint<A>(
    State(api): State<Arc<A>>,
    Path(job_id): Path<String>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<Vec<Application>>, AppError>
where
    A: RecruitingApi + 'static,
{
    let filter: ApplicationFilter = query.parse()?;
    let applications = api.list_job_applications(&JobId(job_id), filter).await?;
    Ok(Json(applications))
}

pub(crate) async fn list_applications_endpoint<A>(
    State(api): State<Arc<A>>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<Vec<Application>>, AppError>
where
    A: RecruitingApi + 'static,
{
    let filter: ApplicationFilter = query.parse()?;
    Ok(Json(api.list_applications(filter).await?))
}

pub(crate) async fn get_application_endpoint<A>(
    State(api): State<Arc<A>>,
    Path(application_id): Path<String>,
) -> Result<Json<Application>, AppError>
where
    A: RecruitingApi + 'static,
{
    Ok(Json(
        api.get_application(&ApplicationId(application_id)).await?,
    ))
}
