use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::domain::{CohortBaseline, EmployeeAttributes, RatingMap, RatingResult};
use super::scoring::{RatingEngine, ScoringConfig};

/// How employees are partitioned before relative scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CohortGrouping {
    /// One cohort per department; blank departments share the "Unknown" cohort.
    #[default]
    Department,
    /// A single cohort spanning the whole population.
    Global,
}

impl CohortGrouping {
    pub fn from_flag(group_by_cohort: bool) -> Self {
        if group_by_cohort {
            Self::Department
        } else {
            Self::Global
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Department => "department",
            Self::Global => "global",
        }
    }
}

/// Rates a population cohort by cohort.
#[derive(Debug, Clone, Default)]
pub struct BatchRatingOrchestrator {
    engine: RatingEngine,
}

impl BatchRatingOrchestrator {
    pub fn new(config: ScoringConfig) -> Self {
        Self::with_engine(RatingEngine::new(config))
    }

    pub fn with_engine(engine: RatingEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &RatingEngine {
        &self.engine
    }

    /// Rate every employee against the baseline of its cohort.
    ///
    /// When an identifier repeats, the record appearing last in `employees` wins.
    pub fn rate_all(&self, employees: &[EmployeeAttributes], grouping: CohortGrouping) -> RatingMap {
        let cohorts = partition(employees, grouping);

        let mut rated: Vec<(usize, RatingResult)> = cohorts
            .par_iter()
            .flat_map_iter(|(cohort, members)| {
                let baseline =
                    CohortBaseline::from_members(members.iter().map(|&index| &employees[index]));
                debug!(
                    cohort = %cohort,
                    size = members.len(),
                    mean_compensation = baseline.mean_compensation,
                    mean_tenure = baseline.mean_tenure,
                    mean_promotion_velocity = baseline.mean_promotion_velocity,
                    "cohort baseline computed"
                );

                members
                    .iter()
                    .map(|&index| (index, self.engine.rate(&employees[index], Some(&baseline))))
                    .collect::<Vec<_>>()
            })
            .collect();

        rated.sort_by_key(|(index, _)| *index);

        let mut results = RatingMap::new();
        for (_, rating) in rated {
            results.insert(rating.employee_id.clone(), rating);
        }

        info!(
            employees = employees.len(),
            rated = results.len(),
            cohorts = cohorts.len(),
            grouping = grouping.label(),
            "batch rating complete"
        );

        results
    }
}

/// Cohort name to member positions in the input slice, in input order.
fn partition(
    employees: &[EmployeeAttributes],
    grouping: CohortGrouping,
) -> BTreeMap<String, Vec<usize>> {
    let mut cohorts: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (index, employee) in employees.iter().enumerate() {
        let key = match grouping {
            CohortGrouping::Department => employee.cohort_key(),
            CohortGrouping::Global => "All",
        };
        cohorts.entry(key.to_string()).or_default().push(index);
    }
    cohorts
}
