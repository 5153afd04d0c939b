use super::common::*;
use crate::ratings::domain::{EmployeeAttributes, RatingFactor};
use crate::ratings::scoring::{RatingEngine, ScoringConfig};

#[test]
fn engine_rewards_top_compensation_tier() {
    let employee = EmployeeAttributes {
        compensation_base: Some(150_000.0),
        tenure_years: Some(5.0),
        promotions: Some(2),
        ..employee("top-comp")
    };

    let result = engine().rate(&employee, Some(&baseline()));

    assert_eq!(result.performance, 4.3);
    assert_eq!(result.potential, 2.5);
    assert_eq!(result.confidence, 70);
    assert_eq!(
        result.factors,
        vec![
            RatingFactor::TopCompensationTier,
            RatingFactor::RegularPromotions
        ]
    );
    assert!(result.rating_inflation.is_none());
}

#[test]
fn engine_detects_generous_manager_for_below_mean_pay() {
    let employee = EmployeeAttributes {
        compensation_base: Some(80_000.0),
        tenure_years: Some(6.0),
        manager_rating: Some(5.0),
        ..employee("inflated")
    };

    let result = engine().rate(&employee, Some(&baseline()));

    assert!(result.performance < 5.0);
    assert_eq!(result.performance, 3.5);
    assert_eq!(result.rating_inflation, Some(1.5));
    assert_eq!(result.confidence, 40);
    assert_eq!(
        result.factors,
        vec![
            RatingFactor::BelowAverageCompensation,
            RatingFactor::ManagerRatingDiverges
        ]
    );
}

#[test]
fn engine_penalizes_performance_improvement_plans() {
    let employee = EmployeeAttributes {
        compensation_base: Some(100_000.0),
        tenure_years: Some(3.0),
        red_flags: Some("PIP, performance concerns".to_string()),
        ..employee("pip")
    };

    let result = engine().rate(&employee, Some(&baseline()));

    assert!(result.performance < 3.0);
    assert_eq!(result.performance, 1.5);
    assert_eq!(result.confidence, 70);
    assert!(result.has_factor(RatingFactor::PerformanceImprovementPlan));
}

#[test]
fn engine_flags_fast_track_and_high_potential() {
    let employee = EmployeeAttributes {
        compensation_base: Some(120_000.0),
        tenure_years: Some(4.0),
        promotions: Some(2),
        tenure_at_level: Some(1.0),
        ..employee("fast-track")
    };

    let result = engine().rate(&employee, Some(&baseline()));

    assert_eq!(result.performance, 4.2);
    assert_eq!(result.potential, 3.0);
    assert_eq!(result.confidence, 75);
    assert_eq!(
        result.factors,
        vec![
            RatingFactor::AboveAverageCompensation,
            RatingFactor::FastPromotionTrack,
            RatingFactor::HighCareerVelocity,
            RatingFactor::RecentPromotion,
        ]
    );
}

#[test]
fn engine_identifies_senior_plateau() {
    let employee = EmployeeAttributes {
        level: Some("Senior Engineer".to_string()),
        compensation_base: Some(140_000.0),
        tenure_years: Some(8.0),
        promotions: Some(0),
        tenure_at_level: Some(5.0),
        ..employee("plateau")
    };

    let result = engine().rate(&employee, Some(&baseline()));

    assert!(result.potential < 2.0);
    assert_eq!(result.potential, 1.5);
    assert_eq!(
        result.factors,
        vec![
            RatingFactor::TopCompensationTier,
            RatingFactor::LongTimeAtLevel,
            RatingFactor::SeniorPlateau,
        ]
    );
}

#[test]
fn engine_defaults_when_only_tenure_is_known() {
    let employee = EmployeeAttributes {
        tenure_years: Some(0.5),
        ..employee("new-hire")
    };

    let result = engine().rate(&employee, None);

    assert_eq!(result.performance, 3.0);
    assert_eq!(result.potential, 2.0);
    assert_eq!(result.confidence, 50);
    assert!(result.rating_inflation.is_none());
    assert!(result.factors.is_empty());
}

#[test]
fn early_career_rule_reads_the_blended_score() {
    let strong = EmployeeAttributes {
        compensation_base: Some(200_000.0),
        tenure_years: Some(1.0),
        ..employee("early")
    };
    let unblended = engine().rate(&strong, Some(&baseline()));
    assert_eq!(unblended.performance, 4.0);
    assert_eq!(unblended.potential, 2.5);
    assert!(unblended.has_factor(RatingFactor::EarlyCareerHighPerformer));

    let reviewed = EmployeeAttributes {
        current_performance_rating: Some(2.0),
        ..strong
    };
    let blended = engine().rate(&reviewed, Some(&baseline()));
    assert_eq!(blended.performance, 3.2);
    assert_eq!(blended.potential, 2.0);
    assert!(!blended.has_factor(RatingFactor::EarlyCareerHighPerformer));
    assert!(blended.has_factor(RatingFactor::ManagerRatingDiverges));
}

#[test]
fn alignment_uses_pre_blend_score_and_tracked_rating_wins() {
    let employee = EmployeeAttributes {
        current_performance_rating: Some(3.4),
        manager_rating: Some(1.0),
        ..employee("aligned")
    };

    let result = engine().rate(&employee, None);

    assert_eq!(result.confidence, 70);
    assert_eq!(result.factors, vec![RatingFactor::ManagerRatingAligned]);
    assert_eq!(result.performance, 3.16);
    assert_eq!(result.rating_inflation, Some(0.24));
}

#[test]
fn factors_truncate_in_evaluation_order_and_confidence_caps() {
    let employee = EmployeeAttributes {
        level: Some("Senior Engineer".to_string()),
        tenure_years: Some(1.0),
        compensation_base: Some(150_000.0),
        compensation_bonus: Some(60_000.0),
        promotions: Some(1),
        red_flags: Some("attendance".to_string()),
        manager_rating: Some(5.0),
        ..employee("busy")
    };

    let result = engine().rate(&employee, Some(&baseline()));

    assert_eq!(result.performance, 5.0);
    assert_eq!(result.potential, 3.0);
    assert_eq!(result.confidence, 100);
    assert_eq!(result.rating_inflation, Some(0.0));
    assert_eq!(
        result.factors,
        vec![
            RatingFactor::TopCompensationTier,
            RatingFactor::HighVariableCompensation,
            RatingFactor::SeniorHire,
            RatingFactor::FastPromotionTrack,
            RatingFactor::AttendanceIssues,
        ]
    );
}

#[test]
fn performance_is_floored_at_one() {
    let employee = EmployeeAttributes {
        level: Some("Junior Analyst".to_string()),
        tenure_years: Some(5.0),
        compensation_base: Some(50_000.0),
        red_flags: Some("pip".to_string()),
        ..employee("floored")
    };

    let result = engine().rate(&employee, Some(&baseline()));

    assert_eq!(result.performance, 1.0);
    assert_eq!(result.confidence, 70);
    assert_eq!(
        result.factors,
        vec![
            RatingFactor::BelowAverageCompensation,
            RatingFactor::LongTenureAtEntryLevel,
            RatingFactor::PerformanceImprovementPlan,
        ]
    );
}

#[test]
fn confidence_is_floored_at_zero() {
    let engine = RatingEngine::new(ScoringConfig {
        divergent_rating_confidence: -80,
        ..ScoringConfig::default()
    });
    let employee = EmployeeAttributes {
        manager_rating: Some(5.0),
        ..employee("distrusted")
    };

    let result = engine.rate(&employee, None);

    assert_eq!(result.confidence, 0);
}

#[test]
fn compensation_tier_needs_a_usable_baseline() {
    let employee = EmployeeAttributes {
        compensation_base: Some(10_000.0),
        ..employee("no-baseline")
    };

    assert_eq!(engine().rate(&employee, None).performance, 3.0);

    let empty = crate::ratings::domain::CohortBaseline::default();
    assert_eq!(engine().rate(&employee, Some(&empty)).performance, 3.0);

    let unpaid = EmployeeAttributes {
        compensation_base: Some(0.0),
        ..super::common::employee("unpaid")
    };
    let result = engine().rate(&unpaid, Some(&baseline()));
    assert_eq!(result.performance, 3.0);
    assert!(result.factors.is_empty());
}

#[test]
fn variable_compensation_without_base_uses_unit_divisor() {
    let employee = EmployeeAttributes {
        compensation_bonus: Some(0.3),
        ..employee("bonus-only")
    };

    let result = engine().rate(&employee, None);

    assert_eq!(result.performance, 3.25);
    assert_eq!(result.confidence, 50);
    assert_eq!(
        result.factors,
        vec![RatingFactor::ModerateVariableCompensation]
    );
}

#[test]
fn first_matching_flag_wins() {
    let cases = [
        ("late attendance, PIP", RatingFactor::PerformanceImprovementPlan, 1.5),
        ("Lateness noted", RatingFactor::AttendanceIssues, 2.5),
        ("HR complaint filed", RatingFactor::HrConcerns, 2.7),
    ];

    for (flags, factor, performance) in cases {
        let employee = EmployeeAttributes {
            red_flags: Some(flags.to_string()),
            ..employee("flagged")
        };

        let result = engine().rate(&employee, None);

        assert_eq!(result.factors, vec![factor], "flags {flags:?}");
        assert_eq!(result.performance, performance, "flags {flags:?}");
    }
}

#[test]
fn medium_velocity_raises_potential_without_a_tag() {
    let employee = EmployeeAttributes {
        tenure_years: Some(3.5),
        promotions: Some(1),
        ..employee("steady")
    };

    let result = engine().rate(&employee, None);

    assert_eq!(result.performance, 3.0);
    assert_eq!(result.potential, 2.5);
    assert!(result.factors.is_empty());
}

#[test]
fn recent_promotion_requires_a_promotion() {
    let employee = EmployeeAttributes {
        tenure_years: Some(4.0),
        tenure_at_level: Some(1.0),
        promotions: Some(0),
        ..employee("new-level")
    };

    let result = engine().rate(&employee, None);

    assert_eq!(result.potential, 2.0);
    assert!(!result.has_factor(RatingFactor::RecentPromotion));
}

#[test]
fn cross_functional_moves_need_two_changes() {
    let mover = EmployeeAttributes {
        tenure_years: Some(4.0),
        job_changes: Some(2),
        ..employee("mover")
    };
    let result = engine().rate(&mover, None);
    assert_eq!(result.potential, 2.3);
    assert!(result.has_factor(RatingFactor::CrossFunctionalExperience));

    let single = EmployeeAttributes {
        job_changes: Some(1),
        ..mover
    };
    assert_eq!(engine().rate(&single, None).potential, 2.0);
}

#[test]
fn scoring_is_deterministic() {
    let employee = EmployeeAttributes {
        level: Some("Staff Engineer".to_string()),
        compensation_base: Some(131_000.0),
        compensation_equity: Some(25_000.0),
        tenure_years: Some(2.7),
        promotions: Some(1),
        job_changes: Some(3),
        manager_rating: Some(4.0),
        red_flags: Some("complaint".to_string()),
        ..employee("repeat")
    };

    let first = engine().rate(&employee, Some(&baseline()));
    let second = engine().rate(&employee, Some(&baseline()));

    assert_eq!(first, second);
}

#[test]
fn blend_weights_come_from_config() {
    let engine = RatingEngine::new(ScoringConfig {
        engine_blend_weight: 0.0,
        human_blend_weight: 1.0,
        ..ScoringConfig::default()
    });
    let employee = EmployeeAttributes {
        manager_rating: Some(4.5),
        ..employee("trusting")
    };

    let result = engine.rate(&employee, None);

    assert_eq!(result.performance, 4.5);
    assert_eq!(result.rating_inflation, Some(0.0));
}

#[test]
fn factors_serialize_as_labels() {
    let json = serde_json::to_string(&RatingFactor::SeniorPlateau).expect("serializes");
    assert_eq!(json, "\"Senior plateau\"");
    assert_eq!(
        RatingFactor::EarlyCareerHighPerformer.to_string(),
        "Early-career high performer"
    );
}

#[test]
fn compensation_tiers_include_their_thresholds() {
    let cases = [
        (130_000.0, 4.0, Some(RatingFactor::TopCompensationTier)),
        (129_999.0, 3.5, Some(RatingFactor::AboveAverageCompensation)),
        (115_000.0, 3.5, Some(RatingFactor::AboveAverageCompensation)),
        (114_999.0, 3.0, None),
        (85_001.0, 3.0, None),
        (85_000.0, 2.5, Some(RatingFactor::BelowAverageCompensation)),
    ];

    for (compensation, performance, factor) in cases {
        let employee = EmployeeAttributes {
            compensation_base: Some(compensation),
            ..employee("tiered")
        };

        let result = engine().rate(&employee, Some(&baseline()));

        assert_eq!(result.performance, performance, "compensation {compensation}");
        assert_eq!(result.factors, Vec::from_iter(factor), "compensation {compensation}");
    }
}

#[test]
fn variable_compensation_includes_its_thresholds() {
    let cases = [
        (40_000.0, 3.5, Some(RatingFactor::HighVariableCompensation)),
        (39_999.0, 3.25, Some(RatingFactor::ModerateVariableCompensation)),
        (20_000.0, 3.25, Some(RatingFactor::ModerateVariableCompensation)),
        (19_999.0, 3.0, None),
    ];

    for (bonus, performance, factor) in cases {
        let employee = EmployeeAttributes {
            compensation_base: Some(100_000.0),
            compensation_bonus: Some(bonus),
            ..employee("variable")
        };

        let result = engine().rate(&employee, None);

        assert_eq!(result.performance, performance, "bonus {bonus}");
        assert_eq!(result.factors, Vec::from_iter(factor), "bonus {bonus}");
    }
}

#[test]
fn alignment_gaps_are_strict() {
    let cases = [
        (3.49, 70, Some(RatingFactor::ManagerRatingAligned)),
        (3.5, 50, None),
        (4.5, 50, None),
        (1.5, 50, None),
        (4.51, 40, Some(RatingFactor::ManagerRatingDiverges)),
    ];

    for (human, confidence, factor) in cases {
        let employee = EmployeeAttributes {
            manager_rating: Some(human),
            ..employee("reviewed")
        };

        let result = engine().rate(&employee, None);

        assert_eq!(result.confidence, confidence, "human rating {human}");
        assert_eq!(result.factors, Vec::from_iter(factor), "human rating {human}");
    }
}

#[test]
fn promotion_velocity_thresholds_are_inclusive() {
    // (promotions, tenure, performance, potential, factors)
    let cases = [
        (
            2,
            4.0,
            3.7,
            3.0,
            vec![
                RatingFactor::FastPromotionTrack,
                RatingFactor::HighCareerVelocity,
            ],
        ),
        (33, 100.0, 3.3, 2.5, vec![RatingFactor::RegularPromotions]),
        (1, 4.0, 3.0, 2.5, vec![]),
        (1, 4.01, 3.0, 2.0, vec![]),
    ];

    for (promotions, tenure, performance, potential, factors) in cases {
        let employee = EmployeeAttributes {
            promotions: Some(promotions),
            tenure_years: Some(tenure),
            ..employee("promoted")
        };

        let result = engine().rate(&employee, None);

        assert_eq!(result.performance, performance, "{promotions} in {tenure} years");
        assert_eq!(result.potential, potential, "{promotions} in {tenure} years");
        assert_eq!(result.factors, factors, "{promotions} in {tenure} years");
    }
}

#[test]
fn time_at_level_thresholds_are_strict() {
    let cases = [
        (4.01, 1.5, Some(RatingFactor::LongTimeAtLevel)),
        (4.0, 2.0, None),
        (1.5, 2.0, None),
        (1.49, 2.5, Some(RatingFactor::RecentPromotion)),
    ];

    for (years, potential, factor) in cases {
        let employee = EmployeeAttributes {
            tenure_years: Some(10.0),
            promotions: Some(1),
            tenure_at_level: Some(years),
            ..employee("leveled")
        };

        let result = engine().rate(&employee, None);

        assert_eq!(result.potential, potential, "{years} years at level");
        assert_eq!(result.factors, Vec::from_iter(factor), "{years} years at level");
    }
}

#[test]
fn level_rules_use_strict_tenure_bounds() {
    let cases = [
        ("Senior Engineer", 1.99, 3.5, Some(RatingFactor::SeniorHire)),
        ("Senior Engineer", 2.0, 3.0, None),
        ("Junior Analyst", 4.0, 3.0, None),
        ("Junior Analyst", 4.01, 2.7, Some(RatingFactor::LongTenureAtEntryLevel)),
    ];

    for (level, tenure, performance, factor) in cases {
        let employee = EmployeeAttributes {
            level: Some(level.to_string()),
            tenure_years: Some(tenure),
            ..employee("leveled")
        };

        let result = engine().rate(&employee, None);

        assert_eq!(result.performance, performance, "{level} at {tenure} years");
        assert_eq!(result.factors, Vec::from_iter(factor), "{level} at {tenure} years");
    }
}

#[test]
fn early_career_bonus_includes_blended_four() {
    let cases = [(4.0, 4.0, 2.5), (3.9, 3.96, 2.0)];

    for (human, performance, potential) in cases {
        let employee = EmployeeAttributes {
            compensation_base: Some(200_000.0),
            tenure_years: Some(1.0),
            current_performance_rating: Some(human),
            ..employee("early")
        };

        let result = engine().rate(&employee, Some(&baseline()));

        assert_eq!(result.performance, performance, "human rating {human}");
        assert_eq!(result.potential, potential, "human rating {human}");
        assert_eq!(
            result.has_factor(RatingFactor::EarlyCareerHighPerformer),
            potential > 2.0,
            "human rating {human}"
        );
    }
}

#[test]
fn zero_ratings_are_not_human_ratings() {
    let unrated = EmployeeAttributes {
        manager_rating: Some(0.0),
        ..employee("zero")
    };
    let result = engine().rate(&unrated, None);
    assert_eq!(result.performance, 3.0);
    assert!(result.rating_inflation.is_none());
    assert!(result.factors.is_empty());

    let fallback = EmployeeAttributes {
        current_performance_rating: Some(0.0),
        manager_rating: Some(4.0),
        ..employee("fallback")
    };
    assert_eq!(fallback.human_rating(), Some(4.0));
    let result = engine().rate(&fallback, None);
    assert_eq!(result.performance, 3.4);
    assert_eq!(result.rating_inflation, Some(0.6));
}
