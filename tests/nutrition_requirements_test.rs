// ABOUTME: Integration tests for the nutrition requirement calculator
// ABOUTME: Covers BMR/TDEE math, goal and BMI adjustments, calorie floor, macros and hydration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use ayurdiet_core::errors::ErrorCode;
use ayurdiet_core::models::{
    ActivityLevel, AdjustmentKind, BiologicalSex, Constitution, DietType, HealthGoal,
    MealFrequency, PlanPreferences,
};
use ayurdiet_intelligence::config::{GoalAdjustmentMode, IntelligenceConfig};
use ayurdiet_intelligence::nutrition_calculator::{calculate_bmr, compute_requirements};

use common::patient;

fn close(actual: f64, expected: f64, tolerance: f64) -> bool {
    (actual - expected).abs() <= tolerance
}

// ============================================================================
// Energy
// ============================================================================

#[test]
fn test_reference_male_scenario() {
    let config = IntelligenceConfig::default();
    let profile = patient("p-1", Constitution::Vata, DietType::NonVegetarian);

    let requirements =
        compute_requirements(&profile, &PlanPreferences::default(), &config).unwrap();

    // 88.362 + 13.397*70 + 4.799*175 - 5.677*30
    assert!(close(requirements.bmr, 1695.667, 0.01));
    assert!(close(requirements.tdee, 2034.8, 0.01));
    assert_eq!(requirements.target_calories, 2035);
    assert!(requirements.adjustments.is_empty());
}

#[test]
fn test_female_bmr_coefficients() {
    let config = IntelligenceConfig::default();
    let mut profile = patient("p-2", Constitution::Pitta, DietType::Vegetarian);
    profile.biological_sex = BiologicalSex::Female;
    profile.age = Some(40);
    profile.weight_kg = Some(60.0);
    profile.height_cm = Some(165.0);

    let vitals = profile.vitals().unwrap();
    let bmr = calculate_bmr(&vitals, BiologicalSex::Female, &config.nutrition.bmr);

    // 447.593 + 9.247*60 + 3.098*165 - 4.330*40
    assert!(close(bmr, 1340.383, 0.01));
}

#[test]
fn test_frequent_meals_nudge_activity_factor() {
    let config = IntelligenceConfig::default();
    let mut profile = patient("p-3", Constitution::Vata, DietType::NonVegetarian);
    profile.meal_frequency = MealFrequency::FourToFive;

    let requirements =
        compute_requirements(&profile, &PlanPreferences::default(), &config).unwrap();

    // 1.2 + 0.1
    assert!(close(requirements.tdee, 1695.667 * 1.3, 0.01));
    assert_eq!(requirements.target_calories, 2204);
}

#[test]
fn test_preference_activity_level_overrides_profile() {
    let config = IntelligenceConfig::default();
    let profile = patient("p-4", Constitution::Vata, DietType::NonVegetarian);
    let preferences = PlanPreferences {
        activity_level: Some(ActivityLevel::VeryActive),
        ..PlanPreferences::default()
    };

    let requirements = compute_requirements(&profile, &preferences, &config).unwrap();
    assert_eq!(requirements.target_calories, 2925);
}

// ============================================================================
// Adjustments
// ============================================================================

#[test]
fn test_goals_apply_in_fixed_order() {
    let config = IntelligenceConfig::default();
    let profile = patient("p-5", Constitution::Vata, DietType::NonVegetarian);
    let preferences = PlanPreferences {
        goals: vec![HealthGoal::MuscleGain, HealthGoal::WeightLoss],
        ..PlanPreferences::default()
    };

    let requirements = compute_requirements(&profile, &preferences, &config).unwrap();

    let kinds: Vec<AdjustmentKind> = requirements
        .adjustments
        .iter()
        .map(|adjustment| adjustment.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![AdjustmentKind::WeightLossGoal, AdjustmentKind::MuscleGainGoal]
    );
    // 2034.8 - 300 + 200
    assert_eq!(requirements.target_calories, 1935);
}

#[test]
fn test_multiplicative_weight_loss() {
    let mut config = IntelligenceConfig::default();
    config.nutrition.goals.mode = GoalAdjustmentMode::Multiplicative;
    let profile = patient("p-6", Constitution::Vata, DietType::NonVegetarian);
    let preferences = PlanPreferences {
        goals: vec![HealthGoal::WeightLoss],
        ..PlanPreferences::default()
    };

    let requirements = compute_requirements(&profile, &preferences, &config).unwrap();
    assert_eq!(
        requirements.target_calories,
        (2034.8004_f64 * 0.85).round() as u32
    );
}

#[test]
fn test_high_bmi_correction_is_additive() {
    let config = IntelligenceConfig::default();
    let mut profile = patient("p-7", Constitution::Kapha, DietType::NonVegetarian);
    profile.weight_kg = Some(100.0);

    let requirements =
        compute_requirements(&profile, &PlanPreferences::default(), &config).unwrap();

    assert!(requirements.bmi > 30.0);
    let last = requirements.adjustments.last().unwrap();
    assert_eq!(last.kind, AdjustmentKind::HighBmi);
    assert!(close(last.after - last.before, -200.0, 1e-9));
}

#[test]
fn test_calorie_floor_applies_after_all_adjustments() {
    let config = IntelligenceConfig::default();
    let mut profile = patient("p-8", Constitution::Vata, DietType::NonVegetarian);
    profile.biological_sex = BiologicalSex::Female;
    profile.age = Some(80);
    profile.weight_kg = Some(40.0);
    profile.height_cm = Some(150.0);
    let preferences = PlanPreferences {
        goals: vec![HealthGoal::WeightLoss],
        ..PlanPreferences::default()
    };

    let requirements = compute_requirements(&profile, &preferences, &config).unwrap();

    assert_eq!(requirements.target_calories, 1200);
    assert_eq!(
        requirements.adjustments.last().map(|a| a.kind),
        Some(AdjustmentKind::CalorieFloor)
    );
}

#[test]
fn test_explicit_target_replaces_computed_but_keeps_floor() {
    let config = IntelligenceConfig::default();
    let profile = patient("p-9", Constitution::Vata, DietType::NonVegetarian);

    let explicit = PlanPreferences {
        target_calories: Some(1800),
        ..PlanPreferences::default()
    };
    let requirements = compute_requirements(&profile, &explicit, &config).unwrap();
    assert_eq!(requirements.target_calories, 1800);

    let too_low = PlanPreferences {
        target_calories: Some(900),
        ..PlanPreferences::default()
    };
    let requirements = compute_requirements(&profile, &too_low, &config).unwrap();
    assert_eq!(requirements.target_calories, 1200);
}

// ============================================================================
// Macros and hydration
// ============================================================================

#[test]
fn test_macro_grams_reconstruct_target_calories() {
    let config = IntelligenceConfig::default();
    for constitution in [
        Constitution::Vata,
        Constitution::Pitta,
        Constitution::Kapha,
        Constitution::VataKapha,
        Constitution::Tridosha,
    ] {
        let profile = patient("p-macro", constitution, DietType::NonVegetarian);
        let requirements =
            compute_requirements(&profile, &PlanPreferences::default(), &config).unwrap();

        let macros = requirements.macros;
        let rebuilt = macros.protein_g * 4 + macros.carbs_g * 4 + macros.fat_g * 9;
        let diff = (i64::from(rebuilt) - i64::from(requirements.target_calories)).abs();
        // Each gram value is off by at most half a gram
        assert!(diff <= 9, "{constitution}: rebuilt {rebuilt} kcal");
    }
}

#[test]
fn test_macro_split_follows_first_dosha() {
    let config = IntelligenceConfig::default();

    let kapha = patient("p-k", Constitution::Kapha, DietType::NonVegetarian);
    let requirements = compute_requirements(&kapha, &PlanPreferences::default(), &config).unwrap();
    assert!(close(requirements.macros.ratios.protein, 0.30, 1e-9));
    assert!(close(requirements.macros.ratios.carbs, 0.40, 1e-9));

    // Dual constitution uses its first-listed dosha
    let dual = patient("p-vk", Constitution::VataKapha, DietType::NonVegetarian);
    let requirements = compute_requirements(&dual, &PlanPreferences::default(), &config).unwrap();
    assert!(close(requirements.macros.ratios.carbs, 0.55, 1e-9));

    let tridosha = patient("p-t", Constitution::Tridosha, DietType::NonVegetarian);
    let requirements =
        compute_requirements(&tridosha, &PlanPreferences::default(), &config).unwrap();
    assert!(close(requirements.macros.ratios.carbs, 0.50, 1e-9));
}

#[test]
fn test_muscle_gain_overrides_dosha_split() {
    let config = IntelligenceConfig::default();
    let profile = patient("p-mg", Constitution::Vata, DietType::NonVegetarian);
    let preferences = PlanPreferences {
        goals: vec![HealthGoal::MuscleGain],
        ..PlanPreferences::default()
    };

    let requirements = compute_requirements(&profile, &preferences, &config).unwrap();
    assert!(close(requirements.macros.ratios.protein, 0.30, 1e-9));
    assert!(close(requirements.macros.ratios.fat, 0.25, 1e-9));
}

#[test]
fn test_hydration_reductions() {
    let config = IntelligenceConfig::default();

    let adult = patient("p-h1", Constitution::Vata, DietType::NonVegetarian);
    let requirements = compute_requirements(&adult, &PlanPreferences::default(), &config).unwrap();
    assert!(close(requirements.hydration.liters, 2.45, 1e-9));
    assert_eq!(requirements.hydration.glasses, 10);

    let mut senior_woman = patient("p-h2", Constitution::Vata, DietType::NonVegetarian);
    senior_woman.biological_sex = BiologicalSex::Female;
    senior_woman.age = Some(70);
    let requirements =
        compute_requirements(&senior_woman, &PlanPreferences::default(), &config).unwrap();
    // 2.45 * 0.9 * 0.9
    assert!(close(requirements.hydration.liters, 1.98, 1e-9));
}

// ============================================================================
// Invalid profiles
// ============================================================================

#[test]
fn test_missing_or_non_positive_vitals_rejected() {
    let config = IntelligenceConfig::default();
    let preferences = PlanPreferences::default();

    let mut no_weight = patient("p-x1", Constitution::Vata, DietType::NonVegetarian);
    no_weight.weight_kg = None;
    let error = compute_requirements(&no_weight, &preferences, &config).unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidProfile);

    let mut zero_height = patient("p-x2", Constitution::Vata, DietType::NonVegetarian);
    zero_height.height_cm = Some(0.0);
    let error = compute_requirements(&zero_height, &preferences, &config).unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidProfile);

    let mut zero_age = patient("p-x3", Constitution::Vata, DietType::NonVegetarian);
    zero_age.age = Some(0);
    let error = compute_requirements(&zero_age, &preferences, &config).unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidProfile);
    assert_eq!(error.http_status(), 422);
}
