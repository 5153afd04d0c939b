use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for employee records.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub String);

impl EmployeeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EmployeeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Raw HR attributes supplied by the caller for a single employee.
///
/// Every signal is optional. A missing value skips the rules that depend on it,
/// so `promotions: Some(0)` and `promotions: None` are not interchangeable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeAttributes {
    pub employee_id: EmployeeId,
    pub name: Option<String>,
    pub department: Option<String>,
    pub job_title: Option<String>,
    pub level: Option<String>,
    pub status: Option<String>,
    pub manager_id: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub tenure_years: Option<f64>,

    pub compensation_base: Option<f64>,
    pub compensation_bonus: Option<f64>,
    pub compensation_equity: Option<f64>,

    pub manager_rating: Option<f64>,
    pub current_performance_rating: Option<f64>,

    pub promotions: Option<u32>,
    pub job_changes: Option<u32>,
    pub tenure_at_level: Option<f64>,
    pub red_flags: Option<String>,
}

impl EmployeeAttributes {
    pub fn new(employee_id: impl Into<String>) -> Self {
        Self {
            employee_id: EmployeeId(employee_id.into()),
            ..Self::default()
        }
    }

    /// Human rating used for blending and inflation: the tracked performance
    /// rating wins over the manager rating. Non-positive values are not ratings.
    pub fn human_rating(&self) -> Option<f64> {
        let usable = |rating: &f64| *rating > 0.0;
        self.current_performance_rating
            .filter(usable)
            .or_else(|| self.manager_rating.filter(usable))
    }

    /// Tenure with absent values treated as zero years.
    pub fn tenure_or_zero(&self) -> f64 {
        self.tenure_years.unwrap_or(0.0)
    }

    /// Department used for cohort partitioning.
    pub fn cohort_key(&self) -> &str {
        match self.department.as_deref().map(str::trim) {
            Some(department) if !department.is_empty() => department,
            _ => UNKNOWN_DEPARTMENT,
        }
    }

    /// Records without a status are treated as active.
    pub fn is_active(&self) -> bool {
        self.status
            .as_deref()
            .map(|status| status.trim().eq_ignore_ascii_case("active"))
            .unwrap_or(true)
    }
}

pub const UNKNOWN_DEPARTMENT: &str = "Unknown";

/// One record per identifier, the last occurrence in `employees` winning.
pub fn latest_by_id(
    employees: &[EmployeeAttributes],
) -> BTreeMap<&EmployeeId, &EmployeeAttributes> {
    employees
        .iter()
        .map(|employee| (&employee.employee_id, employee))
        .collect()
}

/// Normalization baseline for one cohort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CohortBaseline {
    pub mean_compensation: f64,
    pub mean_tenure: f64,
    pub mean_promotion_velocity: f64,
}

/// Label recording that a scoring rule fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RatingFactor {
    #[serde(rename = "Top compensation tier")]
    TopCompensationTier,
    #[serde(rename = "Above-average compensation")]
    AboveAverageCompensation,
    #[serde(rename = "Below-average compensation")]
    BelowAverageCompensation,
    #[serde(rename = "High variable compensation")]
    HighVariableCompensation,
    #[serde(rename = "Moderate variable compensation")]
    ModerateVariableCompensation,
    #[serde(rename = "Senior hire")]
    SeniorHire,
    #[serde(rename = "Long tenure at entry level")]
    LongTenureAtEntryLevel,
    #[serde(rename = "Fast promotion track")]
    FastPromotionTrack,
    #[serde(rename = "Regular promotions")]
    RegularPromotions,
    #[serde(rename = "Performance improvement plan")]
    PerformanceImprovementPlan,
    #[serde(rename = "Attendance issues")]
    AttendanceIssues,
    #[serde(rename = "HR concerns")]
    HrConcerns,
    #[serde(rename = "Manager rating aligned")]
    ManagerRatingAligned,
    #[serde(rename = "Manager rating diverges")]
    ManagerRatingDiverges,
    #[serde(rename = "High career velocity")]
    HighCareerVelocity,
    #[serde(rename = "Long time at level")]
    LongTimeAtLevel,
    #[serde(rename = "Recent promotion")]
    RecentPromotion,
    #[serde(rename = "Early-career high performer")]
    EarlyCareerHighPerformer,
    #[serde(rename = "Senior plateau")]
    SeniorPlateau,
    #[serde(rename = "Cross-functional experience")]
    CrossFunctionalExperience,
}

impl RatingFactor {
    pub const fn label(self) -> &'static str {
        match self {
            Self::TopCompensationTier => "Top compensation tier",
            Self::AboveAverageCompensation => "Above-average compensation",
            Self::BelowAverageCompensation => "Below-average compensation",
            Self::HighVariableCompensation => "High variable compensation",
            Self::ModerateVariableCompensation => "Moderate variable compensation",
            Self::SeniorHire => "Senior hire",
            Self::LongTenureAtEntryLevel => "Long tenure at entry level",
            Self::FastPromotionTrack => "Fast promotion track",
            Self::RegularPromotions => "Regular promotions",
            Self::PerformanceImprovementPlan => "Performance improvement plan",
            Self::AttendanceIssues => "Attendance issues",
            Self::HrConcerns => "HR concerns",
            Self::ManagerRatingAligned => "Manager rating aligned",
            Self::ManagerRatingDiverges => "Manager rating diverges",
            Self::HighCareerVelocity => "High career velocity",
            Self::LongTimeAtLevel => "Long time at level",
            Self::RecentPromotion => "Recent promotion",
            Self::EarlyCareerHighPerformer => "Early-career high performer",
            Self::SeniorPlateau => "Senior plateau",
            Self::CrossFunctionalExperience => "Cross-functional experience",
        }
    }
}

impl fmt::Display for RatingFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inferred scores for one employee. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingResult {
    pub employee_id: EmployeeId,
    pub performance: f64,
    pub potential: f64,
    /// Human rating minus inferred performance; positive means the human was more generous.
    pub rating_inflation: Option<f64>,
    pub confidence: u8,
    pub factors: Vec<RatingFactor>,
}

impl RatingResult {
    pub fn has_factor(&self, factor: RatingFactor) -> bool {
        self.factors.contains(&factor)
    }
}

/// Batch output keyed by employee.
pub type RatingMap = BTreeMap<EmployeeId, RatingResult>;

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
