use crate::analysis::{run_grid, run_inflation, run_rate};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use talent_ratings::config::AppConfig;
use talent_ratings::error::AppError;
use talent_ratings::telemetry;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "talent-ratings",
    about = "Infer performance and potential scores from HR exports and surface rating inflation",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score every employee in an export against its cohort
    Rate(ExportArgs),
    /// Split employees by rating inflation and summarize manager leniency
    Inflation(InflationArgs),
    /// Place active employees on the nine-box talent grid
    Grid(ExportArgs),
}

#[derive(Args, Debug, Clone)]
pub(crate) struct ExportArgs {
    /// Employee CSV export with snake_case headers
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Date tenure is measured against (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Score against one population-wide baseline instead of per department
    #[arg(long)]
    pub(crate) global: bool,
    /// JSON file overriding scoring weights and thresholds
    #[arg(long)]
    pub(crate) scoring_config: Option<PathBuf>,
    /// Emit JSON instead of a text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct InflationArgs {
    #[command(flatten)]
    pub(crate) export: ExportArgs,
    /// Inflation magnitude that marks an employee as over- or under-rated
    #[arg(long)]
    pub(crate) threshold: Option<f64>,
    /// Rated reports a manager needs before being labelled lenient or harsh
    #[arg(long)]
    pub(crate) min_reports: Option<usize>,
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    info!(
        environment = ?config.environment,
        grouping = config.analysis.grouping.label(),
        "talent-ratings starting"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Rate(args) => run_rate(&config.analysis, &args, &mut out),
        Command::Inflation(args) => run_inflation(&config.analysis, &args, &mut out),
        Command::Grid(args) => run_grid(&config.analysis, &args, &mut out),
    }
}
