use super::super::domain::{CohortBaseline, EmployeeAttributes, RatingFactor};
use super::config::ScoringConfig;

const SENIOR_HIRE_LEVELS: [&str; 3] = ["senior", "staff", "principal"];
const ENTRY_LEVELS: [&str; 3] = ["junior", "entry", "associate"];
const PLATEAU_LEVELS: [&str; 2] = ["senior", "staff"];

const PIP_FLAGS: [&str; 2] = ["pip", "performance improvement"];
const ATTENDANCE_FLAGS: [&str; 2] = ["attendance", "late"];
const HR_FLAGS: [&str; 2] = ["complaint", "hr"];

/// Running accumulators threaded through the rule chain.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RatingState {
    pub performance: f64,
    pub potential: f64,
    pub confidence: i32,
    pub factors: Vec<RatingFactor>,
}

impl RatingState {
    pub(crate) fn initial(config: &ScoringConfig) -> Self {
        Self {
            performance: config.base_performance,
            potential: config.base_potential,
            confidence: config.base_confidence,
            factors: Vec::new(),
        }
    }

    fn performance(mut self, delta: f64, factor: RatingFactor, confidence: i32) -> Self {
        self.performance += delta;
        self.confidence += confidence;
        self.factors.push(factor);
        self
    }

    fn potential(mut self, delta: f64, factor: RatingFactor) -> Self {
        self.potential += delta;
        self.factors.push(factor);
        self
    }

    fn reset_potential(mut self, value: f64, factor: Option<RatingFactor>) -> Self {
        self.potential = value;
        self.factors.extend(factor);
        self
    }
}

/// Read-only inputs shared by every rule for one employee.
pub(crate) struct RuleContext<'a> {
    pub employee: &'a EmployeeAttributes,
    pub baseline: Option<&'a CohortBaseline>,
    pub config: &'a ScoringConfig,
    level: String,
    flags: String,
    tenure: f64,
}

impl<'a> RuleContext<'a> {
    pub(crate) fn new(
        employee: &'a EmployeeAttributes,
        baseline: Option<&'a CohortBaseline>,
        config: &'a ScoringConfig,
    ) -> Self {
        Self {
            employee,
            baseline,
            config,
            level: lowercase(employee.level.as_deref()),
            flags: lowercase(employee.red_flags.as_deref()),
            tenure: employee.tenure_or_zero(),
        }
    }

    fn level_matches(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|keyword| self.level.contains(keyword))
    }

    fn flags_match(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|keyword| self.flags.contains(keyword))
    }

    /// Promotions per year of tenure, when both signals are usable.
    fn promotion_velocity(&self) -> Option<f64> {
        match self.employee.promotions {
            Some(promotions) if promotions > 0 && self.tenure > 0.0 => {
                Some(f64::from(promotions) / self.tenure)
            }
            _ => None,
        }
    }
}

fn lowercase(value: Option<&str>) -> String {
    value.map(str::to_lowercase).unwrap_or_default()
}

pub(crate) type Rule = fn(RatingState, &RuleContext<'_>) -> RatingState;

/// Performance rules in evaluation order. The blend must stay last: it reads the
/// score accumulated by every rule before it.
pub(crate) const PERFORMANCE_RULES: [Rule; 5] = [
    compensation_tier,
    variable_compensation,
    tenure_and_level,
    flag_keywords,
    human_rating_blend,
];

/// Potential rules, evaluated after the performance blend.
pub(crate) const POTENTIAL_RULES: [Rule; 5] = [
    career_velocity,
    time_at_level,
    early_career_high_performer,
    senior_plateau,
    cross_functional_breadth,
];

pub(crate) fn apply_rules(context: &RuleContext<'_>) -> RatingState {
    PERFORMANCE_RULES
        .iter()
        .chain(POTENTIAL_RULES.iter())
        .fold(RatingState::initial(context.config), |state, rule| {
            rule(state, context)
        })
}

fn compensation_tier(state: RatingState, ctx: &RuleContext<'_>) -> RatingState {
    let (Some(baseline), Some(base)) = (ctx.baseline, ctx.employee.compensation_base) else {
        return state;
    };
    if base <= 0.0 || baseline.mean_compensation <= 0.0 {
        return state;
    }

    let config = ctx.config;
    let ratio = base / baseline.mean_compensation;
    if ratio >= config.top_compensation_ratio {
        state.performance(
            config.top_compensation_weight,
            RatingFactor::TopCompensationTier,
            config.top_compensation_confidence,
        )
    } else if ratio >= config.above_average_compensation_ratio {
        state.performance(
            config.above_average_compensation_weight,
            RatingFactor::AboveAverageCompensation,
            config.above_average_compensation_confidence,
        )
    } else if ratio <= config.below_average_compensation_ratio {
        state.performance(
            -config.below_average_compensation_penalty,
            RatingFactor::BelowAverageCompensation,
            0,
        )
    } else {
        state
    }
}

fn variable_compensation(state: RatingState, ctx: &RuleContext<'_>) -> RatingState {
    let employee = ctx.employee;
    if employee.compensation_bonus.is_none() && employee.compensation_equity.is_none() {
        return state;
    }

    let config = ctx.config;
    let variable =
        employee.compensation_bonus.unwrap_or(0.0) + employee.compensation_equity.unwrap_or(0.0);
    let ratio = variable / employee.compensation_base.unwrap_or(0.0).max(1.0);

    if ratio >= config.high_variable_ratio {
        state.performance(
            config.high_variable_weight,
            RatingFactor::HighVariableCompensation,
            config.high_variable_confidence,
        )
    } else if ratio >= config.moderate_variable_ratio {
        state.performance(
            config.moderate_variable_weight,
            RatingFactor::ModerateVariableCompensation,
            0,
        )
    } else {
        state
    }
}

fn tenure_and_level(mut state: RatingState, ctx: &RuleContext<'_>) -> RatingState {
    if ctx.tenure <= 0.0 {
        return state;
    }

    let config = ctx.config;
    if ctx.level_matches(&SENIOR_HIRE_LEVELS) && ctx.tenure < config.senior_hire_max_tenure {
        state = state.performance(
            config.senior_hire_weight,
            RatingFactor::SeniorHire,
            config.senior_hire_confidence,
        );
    }

    if ctx.level_matches(&ENTRY_LEVELS) && ctx.tenure > config.entry_level_max_tenure {
        state = state.performance(
            -config.entry_level_penalty,
            RatingFactor::LongTenureAtEntryLevel,
            0,
        );
    }

    match ctx.promotion_velocity() {
        Some(velocity) if velocity >= config.fast_promotion_velocity => state.performance(
            config.fast_promotion_weight,
            RatingFactor::FastPromotionTrack,
            config.fast_promotion_confidence,
        ),
        Some(velocity) if velocity >= config.regular_promotion_velocity => state.performance(
            config.regular_promotion_weight,
            RatingFactor::RegularPromotions,
            config.regular_promotion_confidence,
        ),
        _ => state,
    }
}

fn flag_keywords(state: RatingState, ctx: &RuleContext<'_>) -> RatingState {
    let config = ctx.config;
    if ctx.flags_match(&PIP_FLAGS) {
        state.performance(
            -config.pip_penalty,
            RatingFactor::PerformanceImprovementPlan,
            config.pip_confidence,
        )
    } else if ctx.flags_match(&ATTENDANCE_FLAGS) {
        state.performance(-config.attendance_penalty, RatingFactor::AttendanceIssues, 0)
    } else if ctx.flags_match(&HR_FLAGS) {
        state.performance(-config.hr_concern_penalty, RatingFactor::HrConcerns, 0)
    } else {
        state
    }
}

fn human_rating_blend(mut state: RatingState, ctx: &RuleContext<'_>) -> RatingState {
    let Some(human) = ctx.employee.human_rating() else {
        return state;
    };

    let config = ctx.config;
    // alignment is measured against the pre-blend score
    let alignment = (human - state.performance).abs();
    if alignment < config.aligned_rating_gap {
        state.confidence += config.aligned_rating_confidence;
        state.factors.push(RatingFactor::ManagerRatingAligned);
    } else if alignment > config.divergent_rating_gap {
        state.confidence += config.divergent_rating_confidence;
        state.factors.push(RatingFactor::ManagerRatingDiverges);
    }

    state.performance =
        state.performance * config.engine_blend_weight + human * config.human_blend_weight;
    state
}

fn career_velocity(state: RatingState, ctx: &RuleContext<'_>) -> RatingState {
    let config = ctx.config;
    match ctx.promotion_velocity() {
        Some(velocity) if velocity >= config.high_velocity_threshold => state.reset_potential(
            config.high_velocity_potential,
            Some(RatingFactor::HighCareerVelocity),
        ),
        Some(velocity) if velocity >= config.medium_velocity_threshold => {
            state.reset_potential(config.medium_velocity_potential, None)
        }
        _ => state,
    }
}

fn time_at_level(state: RatingState, ctx: &RuleContext<'_>) -> RatingState {
    let Some(years) = ctx.employee.tenure_at_level else {
        return state;
    };

    let config = ctx.config;
    let promoted = ctx.employee.promotions.unwrap_or(0) > 0;
    if years > config.long_time_at_level_years {
        state.potential(
            -config.long_time_at_level_penalty,
            RatingFactor::LongTimeAtLevel,
        )
    } else if years < config.recent_promotion_years && promoted {
        state.potential(config.recent_promotion_bonus, RatingFactor::RecentPromotion)
    } else {
        state
    }
}

fn early_career_high_performer(state: RatingState, ctx: &RuleContext<'_>) -> RatingState {
    let config = ctx.config;
    if ctx.tenure < config.early_career_max_tenure
        && state.performance >= config.early_career_min_performance
    {
        state.potential(
            config.early_career_bonus,
            RatingFactor::EarlyCareerHighPerformer,
        )
    } else {
        state
    }
}

fn senior_plateau(state: RatingState, ctx: &RuleContext<'_>) -> RatingState {
    let config = ctx.config;
    let never_promoted = ctx.employee.promotions.unwrap_or(0) == 0;
    if ctx.level_matches(&PLATEAU_LEVELS) && ctx.tenure > config.plateau_min_tenure && never_promoted
    {
        state.reset_potential(config.plateau_potential, Some(RatingFactor::SeniorPlateau))
    } else {
        state
    }
}

fn cross_functional_breadth(state: RatingState, ctx: &RuleContext<'_>) -> RatingState {
    let config = ctx.config;
    match ctx.employee.job_changes {
        Some(changes) if changes > 0 && changes >= config.cross_functional_min_changes => state
            .potential(
                config.cross_functional_bonus,
                RatingFactor::CrossFunctionalExperience,
            ),
        _ => state,
    }
}
