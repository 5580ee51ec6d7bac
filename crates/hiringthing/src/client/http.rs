use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{ClientConfig, ClientError, RecruitingApi};
use crate::config::Credentials;
use crate::model::{Application, ApplicationFilter, ApplicationId, Job, JobFilter, JobId};

const JOBS_SEGMENT: &str = "jobs";
const APPLICATIONS_SEGMENT: &str = "applications";

/// Network-backed client issuing one authenticated GET per operation.
#[derive(Clone)]
pub struct HiringThingClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
}

impl std::fmt::Debug for HiringThingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HiringThingClient")
            .field("base_url", &self.base_url.as_str())
            .field("subdomain", &self.credentials.subdomain)
            .finish_non_exhaustive()
    }
}

impl HiringThingClient {
    pub fn new(credentials: Credentials) -> Result<Self, ClientError> {
        Self::with_config(ClientConfig::new(credentials))
    }

    pub fn with_config(config: ClientConfig) -> Result<Self, ClientError> {
        let raw_url = config.resolved_base_url()?;
        let base_url = parse_base_url(&raw_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|source| ClientError::Transport {
            url: raw_url.clone(),
            message: "failed to build HTTP client".to_string(),
            source: Some(source),
        })?;

        Ok(Self {
            http,
            base_url,
            credentials: config.credentials,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // parse_base_url rejects cannot-be-a-base URLs, so segments are always available.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send(&self, url: &Url) -> Result<Response, ClientError> {
        debug!(%url, "requesting hiringthing resource");

        let response = self
            .http
            .get(url.clone())
            .basic_auth(
                &self.credentials.api_key,
                Some(&self.credentials.api_password),
            )
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| transport_error(url, source))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            warn!(%url, status = status.as_u16(), "hiringthing rejected credentials");
            return Err(ClientError::Auth {
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    async fn fetch_list<T>(&self, segments: &[&str]) -> Result<Vec<T>, ClientError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments);
        let response = self.send(&url).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(status_error(&url, status));
        }
        decode(&url, response).await
    }

    async fn fetch_one<T>(
        &self,
        resource: &'static str,
        id: &str,
        segments: &[&str],
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments);
        let response = self.send(&url).await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound {
                resource,
                id: id.to_string(),
            });
        }
        if !status.is_success() {
            return Err(status_error(&url, status));
        }
        decode(&url, response).await
    }
}

#[async_trait]
impl RecruitingApi for HiringThingClient {
    async fn list_jobs(&self, filter: JobFilter) -> Result<Vec<Job>, ClientError> {
        let mut segments = vec![JOBS_SEGMENT];
        segments.extend(filter.path_segment());

        let jobs: Vec<Job> = self.fetch_list(&segments).await?;
        let received = jobs.len();
        let jobs: Vec<Job> = jobs.into_iter().filter(|job| filter.matches(job)).collect();
        if jobs.len() != received {
            warn!(
                filter = filter.label(),
                dropped = received - jobs.len(),
                "discarded jobs outside the requested filter"
            );
        }

        debug!(filter = filter.label(), count = jobs.len(), "listed jobs");
        Ok(jobs)
    }

    async fn list_applications(
        &self,
        filter: ApplicationFilter,
    ) -> Result<Vec<Application>, ClientError> {
        let mut segments = vec![APPLICATIONS_SEGMENT];
        segments.extend(filter.path_segment());

        let applications: Vec<Application> = self.fetch_list(&segments).await?;
        let applications = retain_matching(applications, filter, None);
        debug!(
            filter = filter.label(),
            count = applications.len(),
            "listed applications"
        );
        Ok(applications)
    }

    async fn list_job_applications(
        &self,
        job_id: &JobId,
        filter: ApplicationFilter,
    ) -> Result<Vec<Application>, ClientError> {
        let mut segments = vec![JOBS_SEGMENT, job_id.as_str(), APPLICATIONS_SEGMENT];
        segments.extend(filter.path_segment());

        let applications: Vec<Application> = self.fetch_list(&segments).await?;
        let applications = retain_matching(applications, filter, Some(job_id));
        debug!(
            job_id = %job_id,
            filter = filter.label(),
            count = applications.len(),
            "listed job applications"
        );
        Ok(applications)
    }

    async fn get_job(&self, id: &JobId) -> Result<Job, ClientError> {
        let segments = [JOBS_SEGMENT, id.as_str()];
        self.fetch_one("job", id.as_str(), &segments).await
    }

    async fn get_application(&self, id: &ApplicationId) -> Result<Application, ClientError> {
        let segments = [APPLICATIONS_SEGMENT, id.as_str()];
        self.fetch_one("application", id.as_str(), &segments).await
    }
}

fn retain_matching(
    applications: Vec<Application>,
    filter: ApplicationFilter,
    job_id: Option<&JobId>,
) -> Vec<Application> {
    let received = applications.len();
    let kept: Vec<Application> = applications
        .into_iter()
        .filter(|application| filter.matches(application))
        .filter(|application| job_id.map_or(true, |id| &application.job == id))
        .collect();

    if kept.len() != received {
        warn!(
            filter = filter.label(),
            dropped = received - kept.len(),
            "discarded applications outside the requested scope"
        );
    }
    kept
}

fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
    let url = Url::parse(raw).map_err(|err| ClientError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: err.to_string(),
    })?;

    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ClientError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: "expected an http(s) base url".to_string(),
        });
    }
    Ok(url)
}

async fn decode<T>(url: &Url, response: Response) -> Result<T, ClientError>
where
    T: DeserializeOwned,
{
    let body = response
        .text()
        .await
        .map_err(|source| transport_error(url, source))?;

    serde_json::from_str(&body).map_err(|source| {
        warn!(%url, error = %source, "undecodable hiringthing response");
        ClientError::Decode {
            url: url.to_string(),
            source,
        }
    })
}

fn transport_error(url: &Url, source: reqwest::Error) -> ClientError {
    let message = if source.is_timeout() {
        "request timed out".to_string()
    } else if source.is_connect() {
        "unable to connect".to_string()
    } else {
        "request failed".to_string()
    };

    ClientError::Transport {
        url: url.to_string(),
        message,
        source: Some(source),
    }
}

fn status_error(url: &Url, status: StatusCode) -> ClientError {
    ClientError::Transport {
        url: url.to_string(),
        message: format!("unexpected status {status}"),
        source: None,
    }
}
