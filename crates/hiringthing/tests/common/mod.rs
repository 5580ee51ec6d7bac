#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use hiringthing::{ClientConfig, Credentials};
use serde_json::{json, Value};

/// `key:secret` encoded for HTTP basic auth.
pub const VALID_AUTHORIZATION: &str = "Basic a2V5OnNlY3JldA==";

/// In-process stand-in for a HiringThing tenant.
#[derive(Debug, Default)]
pub struct MockTenant {
    pub jobs: Vec<Value>,
    pub applications: Vec<Value>,
    pub ignore_filters: bool,
    pub malformed_body: bool,
    pub status_override: Option<StatusCode>,
    pub delay: Option<Duration>,
    pub requests: Mutex<Vec<String>>,
}

impl MockTenant {
    pub fn with_fixtures() -> Self {
        Self {
            jobs: vec![
                json!({ "id": 1, "title": "Engineer", "abstract": "Builds the platform", "archived": false }),
                json!({ "id": 2, "title": "Designer", "abstract": "Shapes the product", "archived": true }),
            ],
            applications: vec![
                json!({ "id": 10, "job": 1, "first_name": "Ada", "last_name": "Lovelace", "rating": 4, "archived": false }),
                json!({ "id": 11, "job": 1, "first_name": "Alan", "last_name": "Turing", "rating": null, "archived": false }),
                json!({ "id": 12, "job": 2, "first_name": "Grace", "last_name": "Hopper", "rating": "Thumbs up", "archived": false }),
                json!({ "id": 13, "job": 2, "first_name": "Edsger", "last_name": "Dijkstra", "archived": 1 }),
            ],
            ..Self::default()
        }
    }

    pub fn requested_paths(&self) -> Vec<String> {
        self.requests.lock().expect("request log poisoned").clone()
    }

    fn jobs_matching(&self, filter: Option<&str>) -> Vec<Value> {
        self.jobs
            .iter()
            .filter(|job| match (filter, self.ignore_filters) {
                (_, true) | (None, _) => true,
                (Some("active"), _) => job["archived"] == json!(false),
                (Some("archived"), _) => job["archived"] == json!(true),
                _ => false,
            })
            .cloned()
            .collect()
    }

    fn applications_matching(&self, job_id: Option<&str>, filter: Option<&str>) -> Vec<Value> {
        self.applications
            .iter()
            .filter(|application| {
                if self.ignore_filters {
                    return true;
                }
                let job_matches =
                    job_id.map_or(true, |id| application["job"].to_string() == id);
                let rated = !application
                    .get("rating")
                    .map_or(true, Value::is_null);
                let filter_matches = match filter {
                    None => true,
                    Some("rated") => rated,
                    Some("unrated") => !rated,
                    _ => false,
                };
                job_matches && filter_matches
            })
            .cloned()
            .collect()
    }

    fn resolve(&self, segments: &[&str]) -> Option<Value> {
        match segments {
            ["jobs"] => Some(Value::Array(self.jobs_matching(None))),
            ["jobs", filter @ ("active" | "archived")] => {
                Some(Value::Array(self.jobs_matching(Some(*filter))))
            }
            ["jobs", id, "applications"] => {
                Some(Value::Array(self.applications_matching(Some(*id), None)))
            }
            ["jobs", id, "applications", filter] => Some(Value::Array(
                self.applications_matching(Some(*id), Some(*filter)),
            )),
            ["jobs", id] => self
                .jobs
                .iter()
                .find(|job| job["id"].to_string() == *id)
                .cloned(),
            ["applications"] => Some(Value::Array(self.applications_matching(None, None))),
            ["applications", filter @ ("rated" | "unrated")] => Some(Value::Array(
                self.applications_matching(None, Some(*filter)),
            )),
            ["applications", id] => self
                .applications
                .iter()
                .find(|application| application["id"].to_string() == *id)
                .cloned(),
            _ => None,
        }
    }
}

async fn handle(State(tenant): State<Arc<MockTenant>>, headers: HeaderMap, uri: Uri) -> Response {
    let path = uri.path().to_string();
    tenant
        .requests
        .lock()
        .expect("request log poisoned")
        .push(path.clone());

    if let Some(delay) = tenant.delay {
        tokio::time::sleep(delay).await;
    }

    if let Some(status) = tenant.status_override {
        return (status, "upstream failure").into_response();
    }

    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        == Some(VALID_AUTHORIZATION);
    if !authorized {
        return (StatusCode::UNAUTHORIZED, "invalid credentials").into_response();
    }

    if tenant.malformed_body {
        return (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            "{\"jobs\": [",
        )
            .into_response();
    }

    let segments: Vec<&str> = path
        .trim_start_matches("/remote/")
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();

    match tenant.resolve(&segments) {
        Some(body) => axum::Json(body).into_response(),
        None => (StatusCode::NOT_FOUND, "not found").into_response(),
    }
}

/// Serves `tenant` on an ephemeral port and returns its `/remote/` base url.
pub async fn spawn_tenant(tenant: Arc<MockTenant>) -> String {
    let router = Router::new().fallback(handle).with_state(tenant);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock tenant");
    let addr: SocketAddr = listener.local_addr().expect("mock tenant address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("mock tenant serves");
    });
    format!("http://{addr}/remote/")
}

pub fn client_config(base_url: &str) -> ClientConfig {
    ClientConfig::new(Credentials::new("acme", "key", "secret")).with_base_url(base_url)
}

pub fn bad_client_config(base_url: &str) -> ClientConfig {
    ClientConfig::new(Credentials::new("acme", "bad", "creds")).with_base_url(base_url)
}
