mod config;
mod rules;

pub use config::ScoringConfig;

use super::domain::{round2, CohortBaseline, EmployeeAttributes, RatingResult};
use rules::{apply_rules, RuleContext};

/// Stateless calculator that applies the scoring rules to one employee.
#[derive(Debug, Clone, Default)]
pub struct RatingEngine {
    config: ScoringConfig,
}

impl RatingEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score an employee, optionally relative to the cohort it belongs to.
    pub fn rate(
        &self,
        employee: &EmployeeAttributes,
        baseline: Option<&CohortBaseline>,
    ) -> RatingResult {
        let config = &self.config;
        let context = RuleContext::new(employee, baseline, config);
        let mut state = apply_rules(&context);

        let performance = state
            .performance
            .max(config.performance_floor)
            .min(config.performance_ceiling);
        let potential = state
            .potential
            .max(config.potential_floor)
            .min(config.potential_ceiling);
        let rating_inflation = employee
            .human_rating()
            .map(|human| round2(human - performance));
        let confidence = state.confidence.clamp(0, 100) as u8;
        state.factors.truncate(config.max_factors);

        RatingResult {
            employee_id: employee.employee_id.clone(),
            performance: round2(performance),
            potential: round2(potential),
            rating_inflation,
            confidence,
            factors: state.factors,
        }
    }
}
