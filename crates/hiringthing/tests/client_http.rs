mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use common::{bad_client_config, client_config, spawn_tenant, MockTenant};
use hiringthing::{
    ApplicationFilter, ApplicationId, ClientError, HiringThingClient, JobFilter, JobId, Rating,
    RecruitingApi,
};

async fn client_for(tenant: MockTenant) -> (HiringThingClient, Arc<MockTenant>) {
    let tenant = Arc::new(tenant);
    let base_url = spawn_tenant(tenant.clone()).await;
    let client = HiringThingClient::with_config(client_config(&base_url)).expect("client builds");
    (client, tenant)
}

#[tokio::test]
async fn active_jobs_exclude_archived_postings() {
    let (client, tenant) = client_for(MockTenant::with_fixtures()).await;

    let jobs = client.list_jobs(JobFilter::Active).await.expect("jobs listed");

    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].id, JobId::from(1));
    assert_eq!(jobs[0].title, "Engineer");
    assert!(!jobs[0].archived);
    assert_eq!(tenant.requested_paths(), vec!["/remote/jobs/active"]);
}

#[tokio::test]
async fn all_jobs_preserve_server_order_and_fields() {
    let (client, tenant) = client_for(MockTenant::with_fixtures()).await;

    let jobs = client.list_jobs(JobFilter::All).await.expect("jobs listed");

    let summary: Vec<(&str, &str, bool)> = jobs
        .iter()
        .map(|job| (job.id.as_str(), job.title.as_str(), job.archived))
        .collect();
    assert_eq!(
        summary,
        vec![("1", "Engineer", false), ("2", "Designer", true)]
    );
    assert_eq!(jobs[1].r#abstract, "Shapes the product");
    assert_eq!(tenant.requested_paths(), vec!["/remote/jobs"]);
}

#[tokio::test]
async fn archived_filter_returns_empty_list_when_nothing_matches() {
    let mut tenant = MockTenant::with_fixtures();
    tenant.jobs.retain(|job| job["archived"] == serde_json::json!(false));
    let (client, _) = client_for(tenant).await;

    let jobs = client
        .list_jobs(JobFilter::Archived)
        .await
        .expect("empty listing is not an error");

    assert!(jobs.is_empty());
}

#[tokio::test]
async fn rated_and_unrated_applications_split_on_rating_presence() {
    let (client, _) = client_for(MockTenant::with_fixtures()).await;

    let rated = client
        .list_applications(ApplicationFilter::Rated)
        .await
        .expect("rated listed");
    assert_eq!(rated.len(), 2);
    assert!(rated.iter().all(|application| application.rating.is_some()));
    assert_eq!(rated[1].rating, Some(Rating::Label("Thumbs up".to_string())));

    let unrated = client
        .list_applications(ApplicationFilter::Unrated)
        .await
        .expect("unrated listed");
    assert_eq!(unrated.len(), 2);
    assert!(unrated.iter().all(|application| application.rating.is_none()));
    assert!(unrated
        .iter()
        .any(|application| application.id == ApplicationId::from(13) && application.archived));
}

#[tokio::test]
async fn job_applications_are_scoped_to_the_job() {
    let (client, tenant) = client_for(MockTenant::with_fixtures()).await;
    let job = client.get_job(&JobId::from(1)).await.expect("job fetched");

    let applications = job
        .list_applications(&client, ApplicationFilter::All)
        .await
        .expect("job applications listed");

    assert_eq!(applications.len(), 2);
    assert!(applications.iter().all(|application| application.job == job.id));

    let unrated = job
        .list_applications(&client, ApplicationFilter::Unrated)
        .await
        .expect("unrated job applications listed");
    assert_eq!(unrated.len(), 1);
    assert_eq!(unrated[0].full_name(), "Alan Turing");

    assert_eq!(
        tenant.requested_paths(),
        vec![
            "/remote/jobs/1",
            "/remote/jobs/1/applications",
            "/remote/jobs/1/applications/unrated",
        ]
    );
}

#[tokio::test]
async fn results_outside_the_requested_scope_are_discarded() {
    let mut tenant = MockTenant::with_fixtures();
    tenant.ignore_filters = true;
    let (client, _) = client_for(tenant).await;

    let active = client.list_jobs(JobFilter::Active).await.expect("jobs listed");
    assert!(active.iter().all(|job| !job.archived));
    assert_eq!(active.len(), 1);

    let rated = client
        .list_applications(ApplicationFilter::Rated)
        .await
        .expect("applications listed");
    assert!(rated.iter().all(|application| application.rating.is_some()));

    let scoped = client
        .list_job_applications(&JobId::from(2), ApplicationFilter::All)
        .await
        .expect("job applications listed");
    assert_eq!(scoped.len(), 2);
    assert!(scoped.iter().all(|application| application.job == JobId::from(2)));
}

#[tokio::test]
async fn single_records_decode_and_missing_ones_are_not_found() {
    let (client, _) = client_for(MockTenant::with_fixtures()).await;

    let application = client
        .get_application(&ApplicationId::from(10))
        .await
        .expect("application fetched");
    assert_eq!(application.full_name(), "Ada Lovelace");
    assert_eq!(application.rating, Some(Rating::Score(4.0)));

    let err = client
        .get_job(&JobId::from(99))
        .await
        .expect_err("unknown job");
    assert!(matches!(
        err,
        ClientError::NotFound { resource: "job", ref id } if id == "99"
    ));
}

#[tokio::test]
async fn invalid_credentials_fail_with_auth_error() {
    let tenant = Arc::new(MockTenant::with_fixtures());
    let base_url = spawn_tenant(tenant).await;
    let client =
        HiringThingClient::with_config(bad_client_config(&base_url)).expect("client builds");

    let err = client
        .list_jobs(JobFilter::All)
        .await
        .expect_err("credentials rejected");
    assert!(matches!(err, ClientError::Auth { status: 401 }));

    let err = client
        .list_applications(ApplicationFilter::Rated)
        .await
        .expect_err("credentials rejected");
    assert!(matches!(err, ClientError::Auth { .. }));
}

#[tokio::test]
async fn forbidden_responses_fail_with_auth_error() {
    let mut tenant = MockTenant::with_fixtures();
    tenant.status_override = Some(StatusCode::FORBIDDEN);
    let (client, _) = client_for(tenant).await;

    let err = client
        .get_job(&JobId::from(1))
        .await
        .expect_err("access forbidden");
    assert!(matches!(err, ClientError::Auth { status: 403 }));

    let err = client
        .list_jobs(JobFilter::Active)
        .await
        .expect_err("access forbidden");
    assert!(matches!(err, ClientError::Auth { status: 403 }));
}

#[tokio::test]
async fn malformed_payloads_fail_with_decode_error() {
    let mut tenant = MockTenant::with_fixtures();
    tenant.malformed_body = true;
    let (client, _) = client_for(tenant).await;

    let err = client
        .list_jobs(JobFilter::All)
        .await
        .expect_err("payload rejected");
    assert!(matches!(err, ClientError::Decode { .. }));
}

#[tokio::test]
async fn records_missing_required_fields_fail_with_decode_error() {
    let mut tenant = MockTenant::with_fixtures();
    tenant.applications = vec![serde_json::json!({ "id": 1, "job": 1, "archived": false })];
    let (client, _) = client_for(tenant).await;

    let err = client
        .list_applications(ApplicationFilter::All)
        .await
        .expect_err("incomplete record rejected");
    match err {
        ClientError::Decode { source, .. } => assert!(source.to_string().contains("first_name")),
        other => panic!("expected decode error, got {other:?}"),
    }
}

#[tokio::test]
async fn server_failures_fail_with_transport_error() {
    let mut tenant = MockTenant::with_fixtures();
    tenant.status_override = Some(StatusCode::SERVICE_UNAVAILABLE);
    let (client, _) = client_for(tenant).await;

    let err = client
        .list_jobs(JobFilter::All)
        .await
        .expect_err("service unavailable");
    match err {
        ClientError::Transport { message, .. } => assert!(message.contains("503")),
        other => panic!("expected transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_hosts_fail_with_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind unused port");
    let addr = listener.local_addr().expect("unused port address");
    drop(listener);

    let client = HiringThingClient::with_config(client_config(&format!("http://{addr}/remote/")))
        .expect("client builds");

    let err = client
        .list_jobs(JobFilter::All)
        .await
        .expect_err("nothing is listening");
    assert!(matches!(err, ClientError::Transport { .. }));
}

#[tokio::test]
async fn configured_timeout_bounds_slow_responses() {
    let mut tenant = MockTenant::with_fixtures();
    tenant.delay = Some(Duration::from_secs(5));
    let tenant = Arc::new(tenant);
    let base_url = spawn_tenant(tenant).await;
    let config = client_config(&base_url).with_timeout(Duration::from_millis(200));
    let client = HiringThingClient::with_config(config).expect("client builds");

    let err = client
        .list_jobs(JobFilter::All)
        .await
        .expect_err("request times out");
    match err {
        ClientError::Transport { message, .. } => assert_eq!(message, "request timed out"),
        other => panic!("expected transport error, got {other:?}"),
    }
}

#[test]
fn string_filters_are_validated_before_any_request() {
    let err = "open".parse::<JobFilter>().expect_err("unknown filter");
    assert!(matches!(err, ClientError::InvalidFilter { kind: "job", .. }));
    assert_eq!(err.to_string(), "unsupported job filter 'open'");
}
