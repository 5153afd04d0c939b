use std::env;
use std::fmt;

use crate::ratings::{CohortGrouping, DEFAULT_INFLATION_THRESHOLD};

/// Distinguishes runtime behavior for different stages of deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub analysis: AnalysisConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("TALENT_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("TALENT_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let inflation_threshold = match env::var("TALENT_INFLATION_THRESHOLD") {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite() && *value > 0.0)
                .ok_or(ConfigError::InvalidThreshold)?,
            Err(_) => DEFAULT_INFLATION_THRESHOLD,
        };

        let grouping = match env::var("TALENT_GROUP_BY_COHORT") {
            Ok(raw) => {
                let grouped = parse_bool(&raw).ok_or(ConfigError::InvalidGrouping)?;
                CohortGrouping::from_flag(grouped)
            }
            Err(_) => CohortGrouping::Department,
        };

        let manager_min_reports = match env::var("TALENT_MANAGER_MIN_REPORTS") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidMinReports)?,
            Err(_) => 2,
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            analysis: AnalysisConfig {
                inflation_threshold,
                grouping,
                manager_min_reports,
            },
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Defaults for batch rating and inflation analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub inflation_threshold: f64,
    pub grouping: CohortGrouping,
    pub manager_min_reports: usize,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidThreshold,
    InvalidGrouping,
    InvalidMinReports,
    ScoringFile {
        path: String,
        source: std::io::Error,
    },
    ScoringFormat {
        source: serde_json::Error,
    },
    InvalidScoring(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidThreshold => {
                write!(f, "TALENT_INFLATION_THRESHOLD must be a positive number")
            }
            ConfigError::InvalidGrouping => {
                write!(f, "TALENT_GROUP_BY_COHORT must be true or false")
            }
            ConfigError::InvalidMinReports => {
                write!(f, "TALENT_MANAGER_MIN_REPORTS must be a non-negative integer")
            }
            ConfigError::ScoringFile { path, .. } => {
                write!(f, "unable to read scoring config '{}'", path)
            }
            ConfigError::ScoringFormat { source } => {
                write!(f, "scoring config is not valid JSON: {}", source)
            }
            ConfigError::InvalidScoring(reason) => write!(f, "invalid scoring config: {}", reason),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::ScoringFile { source, .. } => Some(source),
            ConfigError::ScoringFormat { source } => Some(source),
            ConfigError::InvalidThreshold
            | ConfigError::InvalidGrouping
            | ConfigError::InvalidMinReports
            | ConfigError::InvalidScoring(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("TALENT_ENV");
        env::remove_var("TALENT_LOG_LEVEL");
        env::remove_var("TALENT_INFLATION_THRESHOLD");
        env::remove_var("TALENT_GROUP_BY_COHORT");
        env::remove_var("TALENT_MANAGER_MIN_REPORTS");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.analysis.inflation_threshold, 1.0);
        assert_eq!(config.analysis.grouping, CohortGrouping::Department);
        assert_eq!(config.analysis.manager_min_reports, 2);
    }

    #[test]
    fn reads_analysis_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("TALENT_ENV", "prod");
        env::set_var("TALENT_INFLATION_THRESHOLD", "0.75");
        env::set_var("TALENT_GROUP_BY_COHORT", "false");
        env::set_var("TALENT_MANAGER_MIN_REPORTS", "4");
        let config = AppConfig::load().expect("config loads");
        reset_env();

        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(config.analysis.inflation_threshold, 0.75);
        assert_eq!(config.analysis.grouping, CohortGrouping::Global);
        assert_eq!(config.analysis.manager_min_reports, 4);
    }

    #[test]
    fn rejects_non_positive_threshold() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("TALENT_INFLATION_THRESHOLD", "-1");
        let result = AppConfig::load();
        reset_env();

        assert!(matches!(result, Err(ConfigError::InvalidThreshold)));
    }

    #[test]
    fn rejects_unrecognized_grouping_flag() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("TALENT_GROUP_BY_COHORT", "sometimes");
        let result = AppConfig::load();
        reset_env();

        assert!(matches!(result, Err(ConfigError::InvalidGrouping)));
    }
}
