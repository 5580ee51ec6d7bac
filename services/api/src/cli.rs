use crate::commands::{
    run_applications, run_jobs, run_render, ApplicationsArgs, JobsArgs, RenderArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use hiringthing::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "HiringThing Viewer",
    about = "Browse HiringThing jobs and applications from the command line or a browser",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// List jobs for the configured tenant
    Jobs(JobsArgs),
    /// List applications, optionally scoped to one job
    Applications(ApplicationsArgs),
    /// Render the HTML dashboard to a file or stdout
    Render(RenderArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Jobs(args) => run_jobs(args).await,
        Command::Applications(args) => run_applications(args).await,
        Command::Render(args) => run_render(args).await,
    }
}
