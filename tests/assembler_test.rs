// ABOUTME: Integration tests for deterministic meal plan assembly
// ABOUTME: Covers slot targets, closest-calorie selection, wraparound notes, dates and totals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use std::collections::HashSet;

use ayurdiet_core::errors::{AppResult, ErrorCode};
use ayurdiet_core::models::{
    Constitution, DietType, GeneratedPlan, MealType, PatientProfile, PlanPreferences, PlanSource,
    RecipeCandidate,
};
use ayurdiet_intelligence::assembler::assemble;
use ayurdiet_intelligence::config::IntelligenceConfig;
use ayurdiet_intelligence::nutrition_calculator::compute_requirements;
use ayurdiet_intelligence::suitability::score_and_filter;
use chrono::Days;
use serde_json::json;

use common::{full_pool, kapha_patient, patient, recipe, start_date};

fn preferences(duration: u32) -> PlanPreferences {
    PlanPreferences {
        duration: Some(duration),
        start_date: Some(start_date()),
        ..PlanPreferences::default()
    }
}

fn build(
    profile: &PatientProfile,
    recipes: &[RecipeCandidate],
    duration: u32,
) -> AppResult<GeneratedPlan> {
    let config = IntelligenceConfig::default();
    let preferences = preferences(duration);
    let requirements = compute_requirements(profile, &preferences, &config).unwrap();
    let scored = score_and_filter(recipes, profile, &preferences, &config);
    assemble(&scored, profile, &preferences, &requirements, duration, &config)
}

fn ids_for(plan: &GeneratedPlan, day: usize, meal_type: MealType) -> String {
    let meal = plan.daily_plans[day]
        .meals
        .iter()
        .find(|meal| meal.meal_type == meal_type)
        .unwrap();
    meal.recipes[0].recipe_id.clone()
}

fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-9
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn test_meals_follow_serving_order_and_times() {
    let plan = build(&kapha_patient(), &full_pool(), 1).unwrap();

    let slots: Vec<(MealType, &str)> = plan.daily_plans[0]
        .meals
        .iter()
        .map(|meal| (meal.meal_type, meal.time.as_str()))
        .collect();
    assert_eq!(
        slots,
        vec![
            (MealType::Breakfast, "07:30"),
            (MealType::Lunch, "12:30"),
            (MealType::Snack, "16:00"),
            (MealType::Dinner, "19:30"),
        ]
    );
    assert_eq!(plan.source, PlanSource::Deterministic);
}

#[test]
fn test_closest_calorie_recipe_scaled_to_slot_target() {
    // Kapha breakfast: 2035 * 0.20 = 407 kcal, closest is b-2 at 420
    let plan = build(&kapha_patient(), &full_pool(), 1).unwrap();
    let breakfast = &plan.daily_plans[0].meals[0];
    let entry = &breakfast.recipes[0];

    assert_eq!(entry.recipe_id, "b-2");
    assert!(close(entry.quantity, 407.0 / 420.0));
    assert!(close(entry.nutrition.calories, 407.0));
    assert!(close(breakfast.total_nutrition.calories, 407.0));
}

#[test]
fn test_equidistant_candidates_break_ties_by_id() {
    let mut recipes = full_pool();
    recipes.retain(|candidate| !candidate.applies_to(MealType::Breakfast));
    recipes.push(recipe("x-b", &[MealType::Breakfast], 400.0));
    recipes.push(recipe("x-a", &[MealType::Breakfast], 414.0));

    let plan = build(&kapha_patient(), &recipes, 2).unwrap();
    assert_eq!(ids_for(&plan, 0, MealType::Breakfast), "x-a");
    assert_eq!(ids_for(&plan, 1, MealType::Breakfast), "x-b");
}

#[test]
fn test_slot_targets_follow_constitution_ratios() {
    let tridosha = patient("p-t", Constitution::Tridosha, DietType::NonVegetarian);
    let plan = build(&tridosha, &full_pool(), 1).unwrap();

    let calories: Vec<f64> = plan.daily_plans[0]
        .meals
        .iter()
        .map(|meal| meal.total_nutrition.calories)
        .collect();
    // Breakfast, lunch, snack, dinner at 0.25 / 0.40 / 0.10 / 0.25 of 2035
    let expected = [508.75, 814.0, 203.5, 508.75];
    for (actual, expected) in calories.iter().zip(expected) {
        assert!(close(*actual, expected), "{actual} != {expected}");
    }
}

#[test]
fn test_every_recipe_used_before_any_repeat() {
    let plan = build(&kapha_patient(), &full_pool(), 4).unwrap();

    let expected = [
        ["b-2", "l-3", "s-3", "d-1"],
        ["b-1", "l-2", "s-2", "d-2"],
        ["b-3", "l-1", "s-1", "d-3"],
    ];
    for (day, ids) in expected.iter().enumerate() {
        let actual: Vec<String> = plan.daily_plans[day]
            .meals
            .iter()
            .map(|meal| meal.recipes[0].recipe_id.clone())
            .collect();
        assert_eq!(&actual, ids, "day {}", day + 1);
        assert!(plan.daily_plans[day].notes.is_empty());
    }

    // Day 4 wraps around the score-ordered pools by day index
    assert_eq!(ids_for(&plan, 3, MealType::Breakfast), "b-1");
    assert_eq!(ids_for(&plan, 3, MealType::Dinner), "l-3");
    assert!(!plan.daily_plans[3].notes.is_empty());
}

#[test]
fn test_no_repeats_within_pool_size() {
    let plan = build(&kapha_patient(), &full_pool(), 3).unwrap();
    let mut seen = HashSet::new();
    for id in plan.recipe_ids() {
        assert!(seen.insert(id.to_owned()), "{id} repeated");
    }
}

// ============================================================================
// Dates and totals
// ============================================================================

#[test]
fn test_single_day_plan() {
    let plan = build(&kapha_patient(), &full_pool(), 1).unwrap();
    assert_eq!(plan.duration, 1);
    assert_eq!(plan.daily_plans.len(), 1);
    assert_eq!(plan.daily_plans[0].day, 1);
    assert_eq!(plan.daily_plans[0].day_of_week, "Monday");
    assert_eq!(plan.daily_plans[0].date, start_date());
}

#[test]
fn test_year_long_plan_has_consecutive_dates() {
    let plan = build(&kapha_patient(), &full_pool(), 365).unwrap();
    assert_eq!(plan.daily_plans.len(), 365);

    for (index, day) in plan.daily_plans.iter().enumerate() {
        let offset = u64::try_from(index).unwrap();
        assert_eq!(day.day, u32::try_from(index).unwrap() + 1);
        assert_eq!(
            day.date,
            start_date().checked_add_days(Days::new(offset)).unwrap()
        );
        assert_eq!(day.meals.len(), 4);
    }
    assert_eq!(plan.daily_plans[8].day_of_week, "Tuesday");
}

#[test]
fn test_totals_are_bottom_up_sums() {
    let plan = build(&kapha_patient(), &full_pool(), 5).unwrap();

    let mut plan_calories = 0.0;
    for day in &plan.daily_plans {
        let mut day_calories = 0.0;
        for meal in &day.meals {
            let meal_calories: f64 = meal.recipes.iter().map(|e| e.nutrition.calories).sum();
            assert!(close(meal.total_nutrition.calories, meal_calories));
            day_calories += meal.total_nutrition.calories;
        }
        assert!(close(day.total_nutrition.calories, day_calories));
        assert!((day.total_nutrition.calories - 2035.0).abs() < 1e-6);
        plan_calories += day.total_nutrition.calories;
    }
    assert!(close(plan.total_nutrition.calories, plan_calories));
}

#[test]
fn test_plan_metadata() {
    let plan = build(&kapha_patient(), &full_pool(), 7).unwrap();
    assert_eq!(plan.target_calories, 2035);
    assert_eq!(plan.start_date, start_date());
    assert_eq!(plan.requirements.target_calories, 2035);
    assert!(!plan.ayurvedic_recommendations.is_empty());
    assert!(plan.plan_name.contains("Kapha"));
}

// ============================================================================
// Insufficient pools
// ============================================================================

#[test]
fn test_missing_slot_reports_insufficient_candidates() {
    let mut recipes = full_pool();
    recipes.retain(|candidate| !candidate.applies_to(MealType::Snack));

    let error = build(&kapha_patient(), &recipes, 7).unwrap_err();
    assert_eq!(error.code, ErrorCode::InsufficientCandidates);
    assert_eq!(error.context.details, json!({ "slot": "snack" }));
}

#[test]
fn test_zero_calorie_recipes_cannot_fill_a_slot() {
    let mut recipes = full_pool();
    recipes.retain(|candidate| !candidate.applies_to(MealType::Breakfast));
    recipes.push(recipe("b-water", &[MealType::Breakfast], 0.0));

    let error = build(&kapha_patient(), &recipes, 1).unwrap_err();
    assert_eq!(error.code, ErrorCode::InsufficientCandidates);
    assert_eq!(error.context.details, json!({ "slot": "breakfast" }));
}
