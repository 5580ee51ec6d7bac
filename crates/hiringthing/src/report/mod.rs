//! Dashboard assembled from the recruiting API and rendered as HTML tables.

mod html;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::client::{ClientError, RecruitingApi};
use crate::model::{Application, ApplicationFilter, Job, JobFilter};

pub use html::{escape_html, render_error_html};

/// Everything the dashboard page shows, fetched in one pass.
#[derive(Debug, Clone)]
pub struct DashboardReport {
    pub jobs: Vec<Job>,
    pub rated_applications: Vec<Application>,
    pub focus: Option<FocusJob>,
    pub generated_at: DateTime<Utc>,
}

/// First active job together with its unrated applications.
#[derive(Debug, Clone)]
pub struct FocusJob {
    pub job: Job,
    pub unrated_applications: Vec<Application>,
}

impl DashboardReport {
    pub async fn collect<A>(api: &A) -> Result<Self, ClientError>
    where
        A: RecruitingApi + ?Sized,
    {
        Self::collect_at(api, Utc::now()).await
    }

    pub async fn collect_at<A>(api: &A, generated_at: DateTime<Utc>) -> Result<Self, ClientError>
    where
        A: RecruitingApi + ?Sized,
    {
        let jobs = api.list_jobs(JobFilter::All).await?;
        let rated_applications = api.list_applications(ApplicationFilter::Rated).await?;

        let focus = match api.list_jobs(JobFilter::Active).await?.into_iter().next() {
            Some(job) => {
                let unrated_applications =
                    job.list_applications(api, ApplicationFilter::Unrated).await?;
                Some(FocusJob {
                    job,
                    unrated_applications,
                })
            }
            None => None,
        };

        info!(
            jobs = jobs.len(),
            rated = rated_applications.len(),
            focus_job = focus.as_ref().map(|focus| focus.job.id.as_str()),
            "collected dashboard"
        );

        Ok(Self {
            jobs,
            rated_applications,
            focus,
            generated_at,
        })
    }

    pub fn render_html(&self) -> String {
        self.to_string()
    }
}
