use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use hiringthing::config::AppConfig;
use hiringthing::error::AppError;
use hiringthing::report::DashboardReport;
use hiringthing::{
    Application, ApplicationFilter, HiringThingClient, Job, JobFilter, JobId, RecruitingApi,
};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

#[derive(Args, Debug)]
pub(crate) struct JobsArgs {
    /// Job status filter: active, archived or all
    #[arg(long, default_value = "all")]
    pub(crate) filter: String,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub(crate) format: OutputFormat,
}

#[derive(Args, Debug)]
pub(crate) struct ApplicationsArgs {
    /// Rating filter: rated, unrated or all
    #[arg(long, default_value = "all")]
    pub(crate) filter: String,
    /// Only list applications submitted to this job
    #[arg(long)]
    pub(crate) job: Option<String>,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub(crate) format: OutputFormat,
}

#[derive(Args, Debug, Default)]
pub(crate) struct RenderArgs {
    /// Write the page to this path instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

pub(crate) async fn run_jobs(args: JobsArgs) -> Result<(), AppError> {
    let filter: JobFilter = args.filter.parse()?;
    let client = connect()?;

    let jobs = client.list_jobs(filter).await?;
    info!(filter = filter.label(), count = jobs.len(), "fetched jobs");

    let stdout = io::stdout();
    write_jobs(&mut stdout.lock(), args.format, &jobs)
}

pub(crate) async fn run_applications(args: ApplicationsArgs) -> Result<(), AppError> {
    let filter: ApplicationFilter = args.filter.parse()?;
    let client = connect()?;

    let applications = match args.job {
        Some(job_id) => {
            client
                .list_job_applications(&JobId(job_id), filter)
                .await?
        }
        None => client.list_applications(filter).await?,
    };
    info!(
        filter = filter.label(),
        count = applications.len(),
        "fetched applications"
    );

    let stdout = io::stdout();
    write_applications(&mut stdout.lock(), args.format, &applications)
}

pub(crate) async fn run_render(args: RenderArgs) -> Result<(), AppError> {
    let client = connect()?;
    let report = DashboardReport::collect(&client).await?;
    let html = report.render_html();

    match args.output {
        Some(path) => {
            std::fs::write(&path, html)?;
            info!(path = %path.display(), "dashboard written");
        }
        None => {
            let stdout = io::stdout();
            stdout.lock().write_all(html.as_bytes())?;
        }
    }
    Ok(())
}

fn connect() -> Result<HiringThingClient, AppError> {
    let config = AppConfig::load()?;
    hiringthing::telemetry::init(&config.telemetry)?;
    Ok(HiringThingClient::with_config(
        config.hiringthing.client_config(),
    )?)
}

pub(crate) fn write_jobs<W: Write>(
    out: &mut W,
    format: OutputFormat,
    jobs: &[Job],
) -> Result<(), AppError> {
    match format {
        OutputFormat::Json => write_json(out, jobs),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            writer
                .write_record(["id", "title", "abstract", "archived"])
                .map_err(io::Error::from)?;
            for job in jobs {
                writer
                    .write_record([
                        job.id.as_str(),
                        job.title.as_str(),
                        job.r#abstract.as_str(),
                        yes_no(job.archived),
                    ])
                    .map_err(io::Error::from)?;
            }
            writer.flush()?;
            Ok(())
        }
        OutputFormat::Table => {
            let rows = jobs
                .iter()
                .map(|job| {
                    vec![
                        job.id.to_string(),
                        job.title.clone(),
                        yes_no(job.archived).to_string(),
                        job.r#abstract.clone(),
                    ]
                })
                .collect::<Vec<_>>();
            write_table(out, &["ID", "TITLE", "ARCHIVED", "ABSTRACT"], &rows)
        }
    }
}

pub(crate) fn write_applications<W: Write>(
    out: &mut W,
    format: OutputFormat,
    applications: &[Application],
) -> Result<(), AppError> {
    match format {
        OutputFormat::Json => write_json(out, applications),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            writer
                .write_record(["id", "job", "first_name", "last_name", "rating", "archived"])
                .map_err(io::Error::from)?;
            for application in applications {
                let rating = rating_text(application);
                writer
                    .write_record([
                        application.id.as_str(),
                        application.job.as_str(),
                        application.first_name.as_str(),
                        application.last_name.as_str(),
                        rating.as_str(),
                        yes_no(application.archived),
                    ])
                    .map_err(io::Error::from)?;
            }
            writer.flush()?;
            Ok(())
        }
        OutputFormat::Table => {
            let rows = applications
                .iter()
                .map(|application| {
                    vec![
                        application.id.to_string(),
                        application.job.to_string(),
                        application.full_name(),
                        rating_text(application),
                        yes_no(application.archived).to_string(),
                    ]
                })
                .collect::<Vec<_>>();
            write_table(out, &["ID", "JOB", "NAME", "RATING", "ARCHIVED"], &rows)
        }
    }
}

fn write_json<W: Write, T: serde::Serialize + ?Sized>(
    out: &mut W,
    value: &T,
) -> Result<(), AppError> {
    serde_json::to_writer_pretty(&mut *out, value).map_err(io::Error::from)?;
    writeln!(out)?;
    Ok(())
}

fn write_table<W: Write>(
    out: &mut W,
    headers: &[&str],
    rows: &[Vec<String>],
) -> Result<(), AppError> {
    if rows.is_empty() {
        writeln!(out, "No records")?;
        return Ok(());
    }

    let mut widths: Vec<usize> = headers.iter().map(|header| header.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let render = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    writeln!(out, "{}", render(headers.to_vec()))?;
    for row in rows {
        writeln!(out, "{}", render(row.iter().map(String::as_str).collect()))?;
    }
    Ok(())
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

fn rating_text(application: &Application) -> String {
    application
        .rating
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default()
}
