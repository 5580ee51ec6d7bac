//! Read-only access to the HiringThing remote API.
//!
//! [`RecruitingApi`] is the seam the presentation layer and the HTTP service
//! depend on; [`HiringThingClient`] is the network-backed implementation and
//! [`BlockingHiringThingClient`] wraps it for callers without an async runtime.

pub mod blocking;
mod http;

use std::time::Duration;

use async_trait::async_trait;

use crate::config::Credentials;
use crate::model::{Application, ApplicationFilter, ApplicationId, Job, JobFilter, JobId};

pub use blocking::BlockingHiringThingClient;
pub use http::HiringThingClient;

/// Failures surfaced by the client. Nothing is retried or swallowed.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("remote service rejected the credentials (HTTP {status})")]
    Auth { status: u16 },
    #[error("transport failure for {url}: {message}")]
    Transport {
        url: String,
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },
    #[error("malformed response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("unsupported {kind} filter '{value}'")]
    InvalidFilter { kind: &'static str, value: String },
    #[error("{resource} '{id}' not found")]
    NotFound { resource: &'static str, id: String },
    #[error("invalid base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("client runtime unavailable: {0}")]
    Runtime(String),
}

impl ClientError {
    /// True for failures caused by the remote side rather than the caller's input.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            ClientError::Auth { .. } | ClientError::Transport { .. } | ClientError::Decode { .. }
        )
    }
}

/// Connection settings for [`HiringThingClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub credentials: Credentials,
    /// Overrides the tenant URL derived from the subdomain.
    pub base_url: Option<String>,
    /// Per-request deadline; `None` waits for the remote service indefinitely.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: None,
            timeout: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The explicit override, or the tenant URL on the hiringthing.com domain.
    ///
    /// Without an override the subdomain must be a single DNS label; anything
    /// else could move the authenticated requests to a different host.
    pub fn resolved_base_url(&self) -> Result<String, ClientError> {
        if let Some(url) = &self.base_url {
            return Ok(url.clone());
        }

        let subdomain = &self.credentials.subdomain;
        let url = format!("https://{subdomain}.hiringthing.com/remote/");
        if !is_dns_label(subdomain) {
            return Err(ClientError::InvalidBaseUrl {
                url,
                reason: format!("subdomain '{subdomain}' is not a single DNS label"),
            });
        }
        Ok(url)
    }
}

/// ASCII letters, digits and inner hyphens, at most 63 characters.
pub(crate) fn is_dns_label(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= 63
        && !value.starts_with('-')
        && !value.ends_with('-')
        && value
            .bytes()
            .all(|byte| byte.is_ascii_alphanumeric() || byte == b'-')
}

/// Read-only operations exposed by the recruiting platform.
#[async_trait]
pub trait RecruitingApi: Send + Sync {
    async fn list_jobs(&self, filter: JobFilter) -> Result<Vec<Job>, ClientError>;

    async fn list_applications(
        &self,
        filter: ApplicationFilter,
    ) -> Result<Vec<Application>, ClientError>;

    async fn list_job_applications(
        &self,
        job_id: &JobId,
        filter: ApplicationFilter,
    ) -> Result<Vec<Application>, ClientError>;

    async fn get_job(&self, id: &JobId) -> Result<Job, ClientError>;

    async fn get_application(&self, id: &ApplicationId) -> Result<Application, ClientError>;
}

impl Job {
    /// Applications submitted to this job, narrowed by `filter`.
    pub async fn list_applications<A>(
        &self,
        api: &A,
        filter: ApplicationFilter,
    ) -> Result<Vec<Application>, ClientError>
    where
        A: RecruitingApi + ?Sized,
    {
        api.list_job_applications(&self.id, filter).await
    }
}
