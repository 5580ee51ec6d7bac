use tokio::runtime::Runtime;

use super::{ClientConfig, ClientError, HiringThingClient, RecruitingApi};
use crate::model::{Application, ApplicationFilter, ApplicationId, Job, JobFilter, JobId};

/// Synchronous wrapper around [`HiringThingClient`]; every call blocks the
/// current thread until the remote service answers or the request fails.
///
/// Must not be called from within an async runtime.
pub struct BlockingHiringThingClient {
    inner: HiringThingClient,
    runtime: Runtime,
}

impl BlockingHiringThingClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let runtime = Runtime::new().map_err(|err| ClientError::Runtime(err.to_string()))?;
        let inner = HiringThingClient::with_config(config)?;
        Ok(Self { inner, runtime })
    }

    pub fn list_jobs(&self, filter: JobFilter) -> Result<Vec<Job>, ClientError> {
        self.runtime.block_on(self.inner.list_jobs(filter))
    }

    pub fn list_applications(
        &self,
        filter: ApplicationFilter,
    ) -> Result<Vec<Application>, ClientError> {
        self.runtime.block_on(self.inner.list_applications(filter))
    }

    pub fn list_job_applications(
        &self,
        job_id: &JobId,
        filter: ApplicationFilter,
    ) -> Result<Vec<Application>, ClientError> {
        self.runtime
            .block_on(self.inner.list_job_applications(job_id, filter))
    }

    pub fn get_job(&self, id: &JobId) -> Result<Job, ClientError> {
        self.runtime.block_on(self.inner.get_job(id))
    }

    pub fn get_application(&self, id: &ApplicationId) -> Result<Application, ClientError> {
        self.runtime.block_on(self.inner.get_application(id))
    }
}

impl std::fmt::Debug for BlockingHiringThingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingHiringThingClient")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}
