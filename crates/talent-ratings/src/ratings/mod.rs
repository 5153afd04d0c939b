//! Rating inference: cohort baselines, per-employee scoring, batch orchestration,
//! and the inflation and talent-grid analyses built on top of the results.

mod batch;
mod cohort;
pub mod domain;
pub mod grid;
pub mod inflation;
mod scoring;

#[cfg(test)]
mod tests;

pub use batch::{BatchRatingOrchestrator, CohortGrouping};
pub use domain::{
    latest_by_id, CohortBaseline, EmployeeAttributes, EmployeeId, RatingFactor, RatingMap,
    RatingResult, UNKNOWN_DEPARTMENT,
};
pub use grid::{GridCell, GridEntry, GridLevel, GridSummary, TalentGrid};
pub use inflation::{
    average_inflation, InflationBuckets, InflationClassifier, Leniency, ManagerLeniency,
    ManagerLeniencyReport, DEFAULT_INFLATION_THRESHOLD,
};
pub use scoring::{RatingEngine, ScoringConfig};
