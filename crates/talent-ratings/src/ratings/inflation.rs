use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{latest_by_id, round2, EmployeeAttributes, RatingMap, RatingResult};

pub const DEFAULT_INFLATION_THRESHOLD: f64 = 1.0;

/// Splits rated employees by how far the human rating drifts from the inferred score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InflationClassifier {
    threshold: f64,
}

impl Default for InflationClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_INFLATION_THRESHOLD)
    }
}

/// Classification output. Over-rated is most inflated first, under-rated most negative first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InflationBuckets {
    pub over_rated: Vec<RatingResult>,
    pub under_rated: Vec<RatingResult>,
    pub aligned: Vec<RatingResult>,
}

impl InflationBuckets {
    pub fn classified(&self) -> usize {
        self.over_rated.len() + self.under_rated.len() + self.aligned.len()
    }
}

impl InflationClassifier {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn classify(&self, ratings: &RatingMap) -> InflationBuckets {
        let mut buckets = InflationBuckets::default();

        for rating in ratings.values() {
            let Some(inflation) = rating.rating_inflation else {
                continue;
            };

            if inflation >= self.threshold {
                buckets.over_rated.push(rating.clone());
            } else if inflation <= -self.threshold {
                buckets.under_rated.push(rating.clone());
            } else {
                buckets.aligned.push(rating.clone());
            }
        }

        buckets
            .over_rated
            .sort_by(|a, b| inflation_of(b).total_cmp(&inflation_of(a)));
        buckets
            .under_rated
            .sort_by(|a, b| inflation_of(a).total_cmp(&inflation_of(b)));

        buckets
    }
}

fn inflation_of(rating: &RatingResult) -> f64 {
    rating.rating_inflation.unwrap_or(0.0)
}

/// Mean inflation across results carrying a human rating; zero when none do.
pub fn average_inflation(ratings: &RatingMap) -> f64 {
    let (sum, count) = ratings
        .values()
        .filter_map(|rating| rating.rating_inflation)
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));

    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Direction of a manager's systematic disagreement with the inferred scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Leniency {
    Lenient,
    Harsh,
    Balanced,
}

impl Leniency {
    pub const fn label(self) -> &'static str {
        match self {
            Leniency::Lenient => "lenient",
            Leniency::Harsh => "harsh",
            Leniency::Balanced => "balanced",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagerLeniency {
    pub manager_id: String,
    pub rated_reports: usize,
    pub average_inflation: f64,
    pub leniency: Leniency,
}

/// Per-manager inflation averages, most extreme first. A repeated employee
/// counts once, toward the manager on its last record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManagerLeniencyReport {
    pub managers: Vec<ManagerLeniency>,
}

impl ManagerLeniencyReport {
    pub fn build(
        employees: &[EmployeeAttributes],
        ratings: &RatingMap,
        threshold: f64,
        min_reports: usize,
    ) -> Self {
        let mut inflation_by_manager: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
        for employee in latest_by_id(employees).into_values() {
            let Some(manager_id) = employee
                .manager_id
                .as_deref()
                .map(str::trim)
                .filter(|id| !id.is_empty())
            else {
                continue;
            };
            let Some(inflation) = ratings
                .get(&employee.employee_id)
                .and_then(|rating| rating.rating_inflation)
            else {
                continue;
            };
            inflation_by_manager
                .entry(manager_id)
                .or_default()
                .push(inflation);
        }

        let mut managers: Vec<ManagerLeniency> = inflation_by_manager
            .into_iter()
            .map(|(manager_id, values)| {
                let rated_reports = values.len();
                let average = round2(values.iter().sum::<f64>() / rated_reports as f64);
                let leniency = if rated_reports < min_reports {
                    Leniency::Balanced
                } else if average >= threshold {
                    Leniency::Lenient
                } else if average <= -threshold {
                    Leniency::Harsh
                } else {
                    Leniency::Balanced
                };

                ManagerLeniency {
                    manager_id: manager_id.to_string(),
                    rated_reports,
                    average_inflation: average,
                    leniency,
                }
            })
            .collect();

        managers.sort_by(|a, b| {
            b.average_inflation
                .abs()
                .total_cmp(&a.average_inflation.abs())
                .then_with(|| a.manager_id.cmp(&b.manager_id))
        });

        Self { managers }
    }

    pub fn flagged(&self) -> impl Iterator<Item = &ManagerLeniency> {
        self.managers
            .iter()
            .filter(|manager| manager.leniency != Leniency::Balanced)
    }
}
