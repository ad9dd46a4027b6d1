use crate::demo::{run_demo, run_report, DemoArgs, ReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use job_pareto::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Job Offer Concentration Analyzer",
    about = "Analyze how job offers concentrate across cities, over HTTP or from the command line",
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
    /// Print a concentration report for a per-city count export
    Report(ReportArgs),
    /// Run the report over the bundled sample of offers per city
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
    /// CSV export cached at startup and served by GET /api/v1/concentration/report
    #[arg(long)]
    pub(crate) data_csv: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Report(args) => run_report(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["job-pareto-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn report_flags_parse() {
        let cli = Cli::try_parse_from([
            "job-pareto-api",
            "report",
            "--csv",
            "offers.csv",
            "--threshold",
            "90%",
            "--alpha",
            "1.2",
            "--json",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Report(args)) => {
                assert_eq!(args.csv, PathBuf::from("offers.csv"));
                assert_eq!(args.threshold, Some(0.9));
                assert_eq!(args.alpha, Some(1.2));
                assert!(args.json);
                assert!(!args.list_curve);
            }
            other => panic!("expected report command, got {other:?}"),
        }
    }
}
