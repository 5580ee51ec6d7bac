//! Read-only client for the HiringThing recruiting API.
//!
//! [`client::HiringThingClient`] lists jobs and applications for a tenant;
//! [`report::DashboardReport`] turns those listings into an HTML page.

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod report;
pub mod telemetry;

pub use client::{
    BlockingHiringThingClient, ClientConfig, ClientError, HiringThingClient, RecruitingApi,
};
pub use config::Credentials;
pub use model::{Application, ApplicationFilter, ApplicationId, Job, JobFilter, JobId, Rating};
