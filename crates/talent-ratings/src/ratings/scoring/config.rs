use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Weights, thresholds, and confidence adjustments driving the rating rules.
///
/// Fields omitted from a JSON override keep their default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub base_performance: f64,
    pub base_potential: f64,
    pub base_confidence: i32,

    pub top_compensation_ratio: f64,
    pub top_compensation_weight: f64,
    pub top_compensation_confidence: i32,
    pub above_average_compensation_ratio: f64,
    pub above_average_compensation_weight: f64,
    pub above_average_compensation_confidence: i32,
    pub below_average_compensation_ratio: f64,
    pub below_average_compensation_penalty: f64,

    pub high_variable_ratio: f64,
    pub high_variable_weight: f64,
    pub high_variable_confidence: i32,
    pub moderate_variable_ratio: f64,
    pub moderate_variable_weight: f64,

    pub senior_hire_max_tenure: f64,
    pub senior_hire_weight: f64,
    pub senior_hire_confidence: i32,
    pub entry_level_max_tenure: f64,
    pub entry_level_penalty: f64,
    pub fast_promotion_velocity: f64,
    pub fast_promotion_weight: f64,
    pub fast_promotion_confidence: i32,
    pub regular_promotion_velocity: f64,
    pub regular_promotion_weight: f64,
    pub regular_promotion_confidence: i32,

    pub pip_penalty: f64,
    pub pip_confidence: i32,
    pub attendance_penalty: f64,
    pub hr_concern_penalty: f64,

    pub aligned_rating_gap: f64,
    pub aligned_rating_confidence: i32,
    pub divergent_rating_gap: f64,
    pub divergent_rating_confidence: i32,
    /// Share of the blended performance kept from the rule-based score.
    pub engine_blend_weight: f64,
    /// Share of the blended performance taken from the human rating.
    pub human_blend_weight: f64,

    pub high_velocity_threshold: f64,
    pub high_velocity_potential: f64,
    pub medium_velocity_threshold: f64,
    pub medium_velocity_potential: f64,
    pub long_time_at_level_years: f64,
    pub long_time_at_level_penalty: f64,
    pub recent_promotion_years: f64,
    pub recent_promotion_bonus: f64,
    pub early_career_max_tenure: f64,
    pub early_career_min_performance: f64,
    pub early_career_bonus: f64,
    pub plateau_min_tenure: f64,
    pub plateau_potential: f64,
    pub cross_functional_min_changes: u32,
    pub cross_functional_bonus: f64,

    pub performance_floor: f64,
    pub performance_ceiling: f64,
    pub potential_floor: f64,
    pub potential_ceiling: f64,
    pub max_factors: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_performance: 3.0,
            base_potential: 2.0,
            base_confidence: 50,

            top_compensation_ratio: 1.3,
            top_compensation_weight: 1.0,
            top_compensation_confidence: 15,
            above_average_compensation_ratio: 1.15,
            above_average_compensation_weight: 0.5,
            above_average_compensation_confidence: 10,
            below_average_compensation_ratio: 0.85,
            below_average_compensation_penalty: 0.5,

            high_variable_ratio: 0.4,
            high_variable_weight: 0.5,
            high_variable_confidence: 10,
            moderate_variable_ratio: 0.2,
            moderate_variable_weight: 0.25,

            senior_hire_max_tenure: 2.0,
            senior_hire_weight: 0.5,
            senior_hire_confidence: 10,
            entry_level_max_tenure: 4.0,
            entry_level_penalty: 0.3,
            fast_promotion_velocity: 0.5,
            fast_promotion_weight: 0.7,
            fast_promotion_confidence: 15,
            regular_promotion_velocity: 0.33,
            regular_promotion_weight: 0.3,
            regular_promotion_confidence: 5,

            pip_penalty: 1.5,
            pip_confidence: 20,
            attendance_penalty: 0.5,
            hr_concern_penalty: 0.3,

            aligned_rating_gap: 0.5,
            aligned_rating_confidence: 20,
            divergent_rating_gap: 1.5,
            divergent_rating_confidence: -10,
            engine_blend_weight: 0.6,
            human_blend_weight: 0.4,

            high_velocity_threshold: 0.5,
            high_velocity_potential: 3.0,
            medium_velocity_threshold: 0.25,
            medium_velocity_potential: 2.5,
            long_time_at_level_years: 4.0,
            long_time_at_level_penalty: 0.5,
            recent_promotion_years: 1.5,
            recent_promotion_bonus: 0.5,
            early_career_max_tenure: 3.0,
            early_career_min_performance: 4.0,
            early_career_bonus: 0.5,
            plateau_min_tenure: 6.0,
            plateau_potential: 1.5,
            cross_functional_min_changes: 2,
            cross_functional_bonus: 0.3,

            performance_floor: 1.0,
            performance_ceiling: 5.0,
            potential_floor: 1.0,
            potential_ceiling: 3.0,
            max_factors: 5,
        }
    }
}

impl ScoringConfig {
    /// Load a JSON override, filling unspecified fields from the defaults.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::ScoringFile {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|source| ConfigError::ScoringFormat { source })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.human_blend_weight)
            || !(0.0..=1.0).contains(&self.engine_blend_weight)
        {
            return Err(ConfigError::InvalidScoring(
                "blend weights must be between 0 and 1",
            ));
        }
        if (self.engine_blend_weight + self.human_blend_weight - 1.0).abs() > 1e-9 {
            return Err(ConfigError::InvalidScoring("blend weights must sum to 1"));
        }
        if self.performance_floor > self.performance_ceiling {
            return Err(ConfigError::InvalidScoring(
                "performance_floor must not exceed performance_ceiling",
            ));
        }
        if self.potential_floor > self.potential_ceiling {
            return Err(ConfigError::InvalidScoring(
                "potential_floor must not exceed potential_ceiling",
            ));
        }
        Ok(())
    }
}
