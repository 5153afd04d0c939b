use crate::cli::{ExportArgs, InflationArgs};
use crate::report::{self, InflationSummary};
use chrono::Local;
use std::io::Write;
use talent_ratings::config::{AnalysisConfig, ConfigError};
use talent_ratings::error::AppError;
use talent_ratings::import::EmployeeImporter;
use talent_ratings::ratings::{
    average_inflation, BatchRatingOrchestrator, CohortGrouping, EmployeeAttributes,
    InflationClassifier, ManagerLeniencyReport, RatingMap, ScoringConfig, TalentGrid,
};
use tracing::info;

/// An imported export together with its batch ratings.
pub(crate) struct RatedExport {
    pub(crate) employees: Vec<EmployeeAttributes>,
    pub(crate) ratings: RatingMap,
    pub(crate) grouping: CohortGrouping,
}

pub(crate) fn rate_export(
    config: &AnalysisConfig,
    args: &ExportArgs,
) -> Result<RatedExport, AppError> {
    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());
    let scoring = match &args.scoring_config {
        Some(path) => ScoringConfig::from_path(path)?,
        None => ScoringConfig::default(),
    };
    let grouping = if args.global {
        CohortGrouping::Global
    } else {
        config.grouping
    };

    let employees = EmployeeImporter::from_path(&args.input, as_of)?;
    info!(
        input = %args.input.display(),
        employees = employees.len(),
        %as_of,
        "employee export loaded"
    );

    let ratings = BatchRatingOrchestrator::new(scoring).rate_all(&employees, grouping);

    Ok(RatedExport {
        employees,
        ratings,
        grouping,
    })
}

pub(crate) fn run_rate<W: Write>(
    config: &AnalysisConfig,
    args: &ExportArgs,
    out: &mut W,
) -> Result<(), AppError> {
    let rated = rate_export(config, args)?;
    report::render_ratings(&rated.ratings, rated.grouping, args.json, out)
}

pub(crate) fn run_inflation<W: Write>(
    config: &AnalysisConfig,
    args: &InflationArgs,
    out: &mut W,
) -> Result<(), AppError> {
    let threshold = match args.threshold {
        Some(value) if value.is_finite() && value > 0.0 => value,
        Some(_) => return Err(ConfigError::InvalidThreshold.into()),
        None => config.inflation_threshold,
    };
    let min_reports = args.min_reports.unwrap_or(config.manager_min_reports);

    let rated = rate_export(config, &args.export)?;
    let buckets = InflationClassifier::new(threshold).classify(&rated.ratings);
    let managers =
        ManagerLeniencyReport::build(&rated.employees, &rated.ratings, threshold, min_reports);
    info!(
        threshold,
        over_rated = buckets.over_rated.len(),
        under_rated = buckets.under_rated.len(),
        aligned = buckets.aligned.len(),
        flagged_managers = managers.flagged().count(),
        "inflation analysis complete"
    );

    let summary = InflationSummary {
        threshold,
        average_inflation: average_inflation(&rated.ratings),
        buckets: &buckets,
        managers: &managers.managers,
    };
    report::render_inflation(&summary, args.export.json, out)
}

pub(crate) fn run_grid<W: Write>(
    config: &AnalysisConfig,
    args: &ExportArgs,
    out: &mut W,
) -> Result<(), AppError> {
    let rated = rate_export(config, args)?;
    let grid = TalentGrid::build(&rated.employees, &rated.ratings);
    info!(
        analyzed = grid.summary.total_analyzed,
        "talent grid built"
    );
    report::render_grid(&grid, args.json, out)
}
