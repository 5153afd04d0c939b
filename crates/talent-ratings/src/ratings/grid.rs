use serde::{Deserialize, Serialize};

use super::domain::{latest_by_id, round2, EmployeeAttributes, EmployeeId, RatingMap};

/// Band on one axis of the talent grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridLevel {
    High,
    Medium,
    Low,
}

impl GridLevel {
    pub const fn ordered() -> [Self; 3] {
        [Self::High, Self::Medium, Self::Low]
    }

    pub fn for_performance(score: f64) -> Self {
        if score >= 4.0 {
            Self::High
        } else if score >= 3.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn for_potential(score: f64) -> Self {
        if score >= 3.0 {
            Self::High
        } else if score >= 2.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }
}

/// Talent category for a performance/potential pairing.
pub const fn category(performance: GridLevel, potential: GridLevel) -> &'static str {
    match (performance, potential) {
        (GridLevel::High, GridLevel::High) => "Future Leader",
        (GridLevel::High, GridLevel::Medium) => "High Performer",
        (GridLevel::High, GridLevel::Low) => "Solid Performer",
        (GridLevel::Medium, GridLevel::High) => "Key Talent",
        (GridLevel::Medium, GridLevel::Medium) => "Growth Potential",
        (GridLevel::Medium, GridLevel::Low) => "Core Employee",
        (GridLevel::Low, GridLevel::High) => "Inconsistent",
        (GridLevel::Low, GridLevel::Medium) => "Development Needed",
        (GridLevel::Low, GridLevel::Low) => "Underperformer",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridEntry {
    pub employee_id: EmployeeId,
    pub name: String,
    pub department: String,
    pub performance: f64,
    pub potential: f64,
    pub manager_rating: Option<f64>,
    pub rating_inflation: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridCell {
    pub performance: GridLevel,
    pub potential: GridLevel,
    pub category: &'static str,
    pub count: usize,
    pub employees: Vec<GridEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridSummary {
    pub high_performers: usize,
    pub core_employees: usize,
    pub development_needed: usize,
    pub total_analyzed: usize,
    pub average_inflation: f64,
}

/// Nine-box placement of active, rated employees.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TalentGrid {
    pub cells: Vec<GridCell>,
    pub summary: GridSummary,
}

impl TalentGrid {
    /// Repeated identifiers are placed once, using their last record.
    pub fn build(employees: &[EmployeeAttributes], ratings: &RatingMap) -> Self {
        let mut cells: Vec<GridCell> = GridLevel::ordered()
            .into_iter()
            .flat_map(|performance| {
                GridLevel::ordered()
                    .into_iter()
                    .map(move |potential| GridCell {
                        performance,
                        potential,
                        category: category(performance, potential),
                        count: 0,
                        employees: Vec::new(),
                    })
            })
            .collect();

        let mut inflation_total = 0.0;
        let mut inflation_count = 0usize;

        let roster = latest_by_id(employees);
        for employee in roster.values().filter(|employee| employee.is_active()) {
            let Some(rating) = ratings.get(&employee.employee_id) else {
                continue;
            };

            let performance = GridLevel::for_performance(rating.performance);
            let potential = GridLevel::for_potential(rating.potential);
            let cell = &mut cells[performance.index() * 3 + potential.index()];

            cell.count += 1;
            cell.employees.push(GridEntry {
                employee_id: employee.employee_id.clone(),
                name: employee.name.clone().unwrap_or_default(),
                department: employee.cohort_key().to_string(),
                performance: rating.performance,
                potential: rating.potential,
                manager_rating: employee.manager_rating,
                rating_inflation: rating.rating_inflation,
            });

            if let Some(inflation) = rating.rating_inflation {
                inflation_total += inflation;
                inflation_count += 1;
            }
        }

        let row_total = |level: GridLevel| -> usize {
            cells
                .iter()
                .filter(|cell| cell.performance == level)
                .map(|cell| cell.count)
                .sum()
        };

        let summary = GridSummary {
            high_performers: row_total(GridLevel::High),
            core_employees: row_total(GridLevel::Medium),
            development_needed: row_total(GridLevel::Low),
            total_analyzed: cells.iter().map(|cell| cell.count).sum(),
            average_inflation: if inflation_count > 0 {
                round2(inflation_total / inflation_count as f64)
            } else {
                0.0
            },
        };

        Self { cells, summary }
    }

    pub fn cell(&self, performance: GridLevel, potential: GridLevel) -> &GridCell {
        &self.cells[performance.index() * 3 + potential.index()]
    }
}
