// ABOUTME: Nutrition requirement calculation for a patient profile and plan preferences
// ABOUTME: Harris-Benedict BMR, TDEE, goal and BMI adjustments, dosha macro split, hydration and DRI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutrition Requirement Calculator
//!
//! Pure arithmetic: no I/O and no side effects. Every coefficient comes from
//! [`NutritionConfig`](crate::config::NutritionConfig).
//!
//! # Scientific References
//!
//! - Roza, A.M., & Shizgal, H.M. (1984). The Harris Benedict equation reevaluated.
//!   *American Journal of Clinical Nutrition*, 40(1), 168-182.
//!   <https://doi.org/10.1093/ajcn/40.1.168>
//!
//! - Institute of Medicine (2005). Dietary Reference Intakes for Energy,
//!   Carbohydrate, Fiber, Fat, Fatty Acids, Cholesterol, Protein, and Amino Acids.

use ayurdiet_core::constants::energy::{CARBS_KCAL_PER_G, FAT_KCAL_PER_G, PROTEIN_KCAL_PER_G};
use ayurdiet_core::errors::{AppError, AppResult};
use ayurdiet_core::models::{
    ActivityLevel, AdjustmentKind, BiologicalSex, CalorieAdjustment, Constitution, Dosha,
    HealthGoal, HydrationTarget, MacroRatios, MacroTargets, MealFrequency, NutritionRequirements,
    PatientProfile, PlanPreferences, Vitals,
};
use tracing::debug;

use crate::config::{
    ActivityFactorsConfig, BmrConfig, GoalAdjustmentConfig, GoalAdjustmentMode, HydrationConfig,
    IntelligenceConfig, MacroSplitConfig,
};

/// Calculate Basal Metabolic Rate using the revised Harris-Benedict equation
///
/// Formula:
/// - Men: 88.362 + (13.397 x weight) + (4.799 x height) - (5.677 x age)
/// - Women: 447.593 + (9.247 x weight) + (3.098 x height) - (4.330 x age)
#[must_use]
pub fn calculate_bmr(vitals: &Vitals, sex: BiologicalSex, config: &BmrConfig) -> f64 {
    let age = f64::from(vitals.age);
    match sex {
        BiologicalSex::Male => config.male_age_coef.mul_add(
            -age,
            config.male_height_coef.mul_add(
                vitals.height_cm,
                config
                    .male_weight_coef
                    .mul_add(vitals.weight_kg, config.male_constant),
            ),
        ),
        BiologicalSex::Female => config.female_age_coef.mul_add(
            -age,
            config.female_height_coef.mul_add(
                vitals.height_cm,
                config
                    .female_weight_coef
                    .mul_add(vitals.weight_kg, config.female_constant),
            ),
        ),
    }
}

/// Body mass index: weight (kg) / height (m) squared
#[must_use]
pub fn calculate_bmi(vitals: &Vitals) -> f64 {
    let height_m = vitals.height_cm / 100.0;
    vitals.weight_kg / (height_m * height_m)
}

/// Activity factor for a level, nudged upward for frequent eaters
#[must_use]
pub fn activity_factor(
    level: ActivityLevel,
    frequency: MealFrequency,
    config: &ActivityFactorsConfig,
) -> f64 {
    let base = match level {
        ActivityLevel::Sedentary => config.sedentary,
        ActivityLevel::LightlyActive => config.lightly_active,
        ActivityLevel::ModeratelyActive => config.moderately_active,
        ActivityLevel::VeryActive => config.very_active,
        ActivityLevel::ExtremelyActive => config.extremely_active,
    };

    if frequency.is_frequent() {
        base + config.frequent_meal_bonus
    } else {
        base
    }
}

/// Calculate Total Daily Energy Expenditure
///
/// Formula: TDEE = BMR x Activity Factor
///
/// # Errors
///
/// Returns an error if BMR is not positive
pub fn calculate_tdee(
    bmr: f64,
    level: ActivityLevel,
    frequency: MealFrequency,
    config: &ActivityFactorsConfig,
) -> AppResult<f64> {
    if bmr <= 0.0 || !bmr.is_finite() {
        return Err(AppError::invalid_profile(format!(
            "BMR must be positive, got {bmr:.1}"
        )));
    }
    Ok(bmr * activity_factor(level, frequency, config))
}

fn record(
    adjustments: &mut Vec<CalorieAdjustment>,
    kind: AdjustmentKind,
    before: f64,
    after: f64,
) -> f64 {
    adjustments.push(CalorieAdjustment {
        kind,
        before,
        after,
    });
    after
}

/// Apply goal and BMI adjustments to a TDEE
///
/// Goals are applied in a fixed order (weight loss, weight gain, muscle gain)
/// regardless of request order; the BMI correction follows and is additive in
/// both modes. Returns the adjusted calories and the audit trail.
#[must_use]
pub fn apply_adjustments(
    tdee: f64,
    bmi: f64,
    goals: &[HealthGoal],
    config: &GoalAdjustmentConfig,
) -> (f64, Vec<CalorieAdjustment>) {
    let mut adjustments = Vec::new();
    let mut calories = tdee;

    if goals.contains(&HealthGoal::WeightLoss) {
        let after = match config.mode {
            GoalAdjustmentMode::Additive => calories + config.weight_loss_kcal,
            GoalAdjustmentMode::Multiplicative => calories * config.weight_loss_factor,
        };
        calories = record(&mut adjustments, AdjustmentKind::WeightLossGoal, calories, after);
    }
    if goals.contains(&HealthGoal::WeightGain) {
        let after = match config.mode {
            GoalAdjustmentMode::Additive => calories + config.weight_gain_kcal,
            GoalAdjustmentMode::Multiplicative => calories * config.weight_gain_factor,
        };
        calories = record(&mut adjustments, AdjustmentKind::WeightGainGoal, calories, after);
    }
    if goals.contains(&HealthGoal::MuscleGain) {
        let after = calories + config.muscle_gain_kcal;
        calories = record(&mut adjustments, AdjustmentKind::MuscleGainGoal, calories, after);
    }

    if bmi > config.high_bmi_threshold {
        let after = calories + config.high_bmi_kcal;
        calories = record(&mut adjustments, AdjustmentKind::HighBmi, calories, after);
    } else if bmi < config.low_bmi_threshold {
        let after = calories + config.low_bmi_kcal;
        calories = record(&mut adjustments, AdjustmentKind::LowBmi, calories, after);
    }

    (calories, adjustments)
}

/// Macro split for a constitution and goal set
///
/// A muscle-building goal wins over any dosha split. Dual constitutions use
/// their first-listed dosha; Tridosha uses the base split.
#[must_use]
pub fn select_macro_split(
    constitution: Constitution,
    goals: &[HealthGoal],
    config: &MacroSplitConfig,
) -> MacroRatios {
    if goals.contains(&HealthGoal::MuscleGain) {
        return config.muscle_gain;
    }
    match constitution.first_dosha() {
        Some(Dosha::Vata) => config.vata,
        Some(Dosha::Pitta) => config.pitta,
        Some(Dosha::Kapha) => config.kapha,
        None => config.base,
    }
}

/// Macro grams for a calorie target, each rounded to the nearest gram
#[must_use]
pub fn calculate_macros(target_calories: u32, ratios: MacroRatios) -> MacroTargets {
    let calories = f64::from(target_calories);
    let grams = |ratio: f64, kcal_per_g: f64| (calories * ratio / kcal_per_g).round() as u32;

    MacroTargets {
        protein_g: grams(ratios.protein, PROTEIN_KCAL_PER_G),
        carbs_g: grams(ratios.carbs, CARBS_KCAL_PER_G),
        fat_g: grams(ratios.fat, FAT_KCAL_PER_G),
        ratios,
    }
}

/// Daily water target
///
/// Formula: weight x 35 ml, reduced for youth, seniors and women.
#[must_use]
pub fn calculate_hydration(
    vitals: &Vitals,
    sex: BiologicalSex,
    config: &HydrationConfig,
) -> HydrationTarget {
    let mut liters = vitals.weight_kg * config.ml_per_kg / 1000.0;
    if vitals.age < config.youth_age_below {
        liters *= config.youth_factor;
    }
    if vitals.age > config.senior_age_above {
        liters *= config.senior_factor;
    }
    if sex == BiologicalSex::Female {
        liters *= config.female_factor;
    }

    HydrationTarget {
        liters: (liters * 100.0).round() / 100.0,
        glasses: (liters * config.glasses_per_liter).round() as u32,
    }
}

/// Compute the complete nutrition requirements for one generation run
///
/// `preferences.activity_level` overrides the profile's level and an explicit
/// `preferences.target_calories` replaces the computed target. The final
/// target is rounded and never drops below the configured floor.
///
/// # Errors
///
/// Returns `INVALID_PROFILE` when age, weight or height is missing or
/// non-positive, and `CONFIG_ERROR` when no micronutrient bracket applies.
pub fn compute_requirements(
    profile: &PatientProfile,
    preferences: &PlanPreferences,
    config: &IntelligenceConfig,
) -> AppResult<NutritionRequirements> {
    let nutrition = &config.nutrition;
    let vitals = profile.vitals()?;

    let bmr = calculate_bmr(&vitals, profile.biological_sex, &nutrition.bmr);
    let level = preferences.activity_level.unwrap_or(profile.activity_level);
    let tdee = calculate_tdee(
        bmr,
        level,
        profile.meal_frequency,
        &nutrition.activity_factors,
    )?;
    let bmi = calculate_bmi(&vitals);

    let (mut calories, mut adjustments) =
        apply_adjustments(tdee, bmi, &preferences.goals, &nutrition.goals);

    if let Some(explicit) = preferences.target_calories {
        calories = record(
            &mut adjustments,
            AdjustmentKind::ExplicitTarget,
            calories,
            f64::from(explicit),
        );
    }

    let floor = f64::from(nutrition.goals.calorie_floor_kcal);
    let rounded = calories.round();
    if rounded < floor {
        record(
            &mut adjustments,
            AdjustmentKind::CalorieFloor,
            rounded,
            floor,
        );
    }
    let target_calories = rounded.max(floor) as u32;

    let ratios = select_macro_split(
        profile.primary_constitution,
        &preferences.goals,
        &nutrition.macro_splits,
    );
    let macros = calculate_macros(target_calories, ratios);
    let hydration = calculate_hydration(&vitals, profile.biological_sex, &nutrition.hydration);
    let micronutrients = nutrition
        .micronutrients
        .targets_for(vitals.age, profile.biological_sex)
        .ok_or_else(|| {
            AppError::config(format!("No micronutrient bracket for age {}", vitals.age))
        })?;

    debug!(
        patient_id = %profile.id,
        bmr,
        tdee,
        bmi,
        target_calories,
        adjustments = adjustments.len(),
        "Computed nutrition requirements"
    );

    Ok(NutritionRequirements {
        bmr,
        tdee,
        bmi,
        target_calories,
        macros,
        micronutrients,
        hydration,
        adjustments,
    })
}
