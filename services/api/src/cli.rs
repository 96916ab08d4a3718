use crate::demo::{run_demo, run_prioritize, DemoArgs, PrioritizeArgs};
use crate::server;
use clap::{Args, Parser, Subcommand, ValueEnum};
use epic_prioritizer::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "epic-prioritizer",
    about = "Score, rank, and compare epic assessments from the command line or over HTTP",
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
    /// Prioritize assessments read from a JSON file
    Prioritize(PrioritizeArgs),
    /// Walk through scoring and ranking on a sample portfolio
    Demo(DemoArgs),
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

/// How a prioritization report is printed.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Prioritize(args) => run_prioritize(args),
        Command::Demo(args) => run_demo(args),
    }
}
