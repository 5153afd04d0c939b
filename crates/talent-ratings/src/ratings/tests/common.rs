use crate::ratings::domain::{
    CohortBaseline, EmployeeAttributes, EmployeeId, RatingMap, RatingResult,
};
use crate::ratings::scoring::{RatingEngine, ScoringConfig};

pub(super) fn baseline() -> CohortBaseline {
    CohortBaseline {
        mean_compensation: 100_000.0,
        mean_tenure: 3.0,
        mean_promotion_velocity: 0.3,
    }
}

pub(super) fn engine() -> RatingEngine {
    RatingEngine::new(ScoringConfig::default())
}

pub(super) fn employee(id: &str) -> EmployeeAttributes {
    EmployeeAttributes::new(id)
}

pub(super) fn staffed(id: &str, department: &str, compensation: f64) -> EmployeeAttributes {
    EmployeeAttributes {
        department: Some(department.to_string()),
        compensation_base: Some(compensation),
        tenure_years: Some(3.0),
        ..employee(id)
    }
}

pub(super) fn rating(id: &str, inflation: Option<f64>) -> RatingResult {
    RatingResult {
        employee_id: EmployeeId::from(id),
        performance: 3.0,
        potential: 2.0,
        rating_inflation: inflation,
        confidence: 50,
        factors: Vec::new(),
    }
}

pub(super) fn rating_map(entries: &[(&str, Option<f64>)]) -> RatingMap {
    entries
        .iter()
        .map(|(id, inflation)| (EmployeeId::from(*id), rating(id, *inflation)))
        .collect()
}

pub(super) fn ids(results: &[RatingResult]) -> Vec<&str> {
    results
        .iter()
        .map(|result| result.employee_id.as_str())
        .collect()
}
