// ABOUTME: Validation and repair of plans against the candidate pool of one generation run
// ABOUTME: Recipe reference checks, raw generator output conversion, bottom-up nutrition recompute
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Plan Validator
//!
//! Plans are never trusted on their own totals. Every referenced recipe must
//! exist in the pool supplied to the run, entry snapshots are rederived from
//! the pool, and day and plan totals are summed bottom-up from the entries.

use std::collections::{BTreeSet, HashMap};

use ayurdiet_core::errors::{AppError, AppResult};
use ayurdiet_core::models::{
    DayPlan, GeneratedPlan, MealEntry, MealType, NutritionProfile, PlanSource, PlannedMeal,
    RawGeneratedPlan, RawMeal, RecipeCandidate,
};
use tracing::debug;

use crate::assembler::{serving_order, serving_time, PlanContext};
use crate::config::IntelligenceConfig;
use crate::suitability::ScoredRecipe;

/// Lookup of the recipes a run may reference
#[derive(Debug, Clone, Default)]
pub struct RecipePool<'a> {
    by_id: HashMap<&'a str, &'a RecipeCandidate>,
}

impl<'a> RecipePool<'a> {
    /// Index scored recipes by id
    #[must_use]
    pub fn from_scored(scored: &'a [ScoredRecipe]) -> Self {
        Self {
            by_id: scored
                .iter()
                .map(|entry| (entry.recipe.id.as_str(), &entry.recipe))
                .collect(),
        }
    }

    /// Index plain candidates by id
    #[must_use]
    pub fn from_candidates(candidates: &'a [RecipeCandidate]) -> Self {
        Self {
            by_id: candidates
                .iter()
                .map(|recipe| (recipe.id.as_str(), recipe))
                .collect(),
        }
    }

    /// Recipe by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&'a RecipeCandidate> {
        self.by_id.get(id).copied()
    }

    /// Number of indexed recipes
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether the pool is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

fn check_ids<'i>(ids: impl Iterator<Item = &'i str>, pool: &RecipePool<'_>) -> AppResult<()> {
    let missing: BTreeSet<&str> = ids.filter(|id| pool.get(id).is_none()).collect();
    if missing.is_empty() {
        return Ok(());
    }
    let missing: Vec<String> = missing.into_iter().map(str::to_owned).collect();
    debug!(missing = ?missing, "Plan references recipes outside the candidate pool");
    Err(AppError::unknown_recipe_reference(&missing))
}

/// Reject raw generator output that references recipes outside the pool
///
/// # Errors
///
/// Returns `UNKNOWN_RECIPE_REFERENCE` listing every missing id (sorted, unique)
pub fn validate_references(raw: &RawGeneratedPlan, pool: &RecipePool<'_>) -> AppResult<()> {
    check_ids(raw.recipe_ids(), pool)
}

/// Reject a plan that references recipes outside the pool
///
/// # Errors
///
/// Returns `UNKNOWN_RECIPE_REFERENCE` listing every missing id (sorted, unique)
pub fn validate_plan_references(plan: &GeneratedPlan, pool: &RecipePool<'_>) -> AppResult<()> {
    check_ids(plan.recipe_ids(), pool)
}

/// Recompute every meal, day and plan total from the entry snapshots
pub fn recompute_totals(plan: &mut GeneratedPlan) {
    for day in &mut plan.daily_plans {
        for meal in &mut day.meals {
            meal.total_nutrition = meal.recipes.iter().map(|entry| entry.nutrition).sum();
        }
        day.total_nutrition = day.meals.iter().map(|meal| meal.total_nutrition).sum();
    }
    plan.total_nutrition = plan
        .daily_plans
        .iter()
        .map(|day| day.total_nutrition)
        .sum();
}

/// Rederive entry names and snapshots from the pool, then recompute totals
///
/// # Errors
///
/// Returns `UNKNOWN_RECIPE_REFERENCE` if any entry is outside the pool
pub fn rederive_snapshots(plan: &mut GeneratedPlan, pool: &RecipePool<'_>) -> AppResult<()> {
    validate_plan_references(plan, pool)?;
    for entry in plan
        .daily_plans
        .iter_mut()
        .flat_map(|day| &mut day.meals)
        .flat_map(|meal| &mut meal.recipes)
    {
        if let Some(recipe) = pool.get(&entry.recipe_id) {
            entry.recipe_name.clone_from(&recipe.name);
            entry.nutrition = recipe.nutrition.scaled(entry.quantity);
        }
    }
    recompute_totals(plan);
    Ok(())
}

fn convert_meal(
    raw: &RawMeal,
    day: u32,
    pool: &RecipePool<'_>,
    config: &IntelligenceConfig,
) -> AppResult<PlannedMeal> {
    let meal_type = MealType::from_str_lossy(&raw.meal_type).ok_or_else(|| {
        AppError::generator_malformed(format!(
            "Day {day}: unknown meal type '{}'",
            raw.meal_type
        ))
    })?;
    if raw.recipes.is_empty() {
        return Err(AppError::generator_malformed(format!(
            "Day {day}: {meal_type} has no recipes"
        )));
    }

    let recipes = raw
        .recipes
        .iter()
        .map(|entry| {
            if !entry.quantity.is_finite() || entry.quantity <= 0.0 {
                return Err(AppError::generator_malformed(format!(
                    "Day {day}: quantity {} for recipe '{}' must be positive",
                    entry.quantity, entry.recipe_id
                )));
            }
            let recipe = pool
                .get(&entry.recipe_id)
                .ok_or_else(|| AppError::unknown_recipe_reference(&[entry.recipe_id.clone()]))?;
            if !recipe.applies_to(meal_type) {
                return Err(AppError::generator_malformed(format!(
                    "Day {day}: recipe '{}' is not a {meal_type} recipe",
                    recipe.id
                )));
            }
            Ok(MealEntry {
                recipe_id: recipe.id.clone(),
                recipe_name: recipe.name.clone(),
                quantity: entry.quantity,
                notes: entry.notes.clone(),
                nutrition: recipe.nutrition.scaled(entry.quantity),
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    let time = raw
        .time
        .as_deref()
        .map(str::trim)
        .filter(|time| !time.is_empty())
        .map_or_else(|| serving_time(meal_type, config), str::to_owned);

    Ok(PlannedMeal {
        meal_type,
        time,
        recipes,
        total_nutrition: NutritionProfile::default(),
    })
}

/// Convert untrusted generator output into a validated plan
///
/// Reported totals are ignored. Names, snapshots and every aggregate come from
/// the pool. Missing plan-level text falls back to the context defaults.
///
/// # Errors
///
/// - `UNKNOWN_RECIPE_REFERENCE` when any id is outside the pool
/// - `EXTERNAL_GENERATOR_MALFORMED` when the day count differs from the
///   requested duration, a day misses a slot, a meal is empty or has an
///   unknown type, a recipe does not apply to its slot, or a quantity is not
///   positive
pub fn convert_raw_plan(
    raw: &RawGeneratedPlan,
    pool: &RecipePool<'_>,
    context: &PlanContext<'_>,
    config: &IntelligenceConfig,
) -> AppResult<GeneratedPlan> {
    validate_references(raw, pool)?;

    let reported_days = raw.daily_plans.len();
    if reported_days != context.duration_days as usize {
        return Err(AppError::generator_malformed(format!(
            "Expected {} days, got {reported_days}",
            context.duration_days
        )));
    }

    let slots = serving_order(config);
    let mut daily_plans = Vec::with_capacity(reported_days);
    for (day_index, raw_day) in (0..context.duration_days).zip(&raw.daily_plans) {
        let day = day_index + 1;
        let mut meals = raw_day
            .meals
            .iter()
            .map(|meal| convert_meal(meal, day, pool, config))
            .collect::<AppResult<Vec<_>>>()?;
        if let Some(missing) = slots
            .iter()
            .find(|slot| !meals.iter().any(|meal| meal.meal_type == **slot))
        {
            return Err(AppError::generator_malformed(format!(
                "Day {day}: no {missing} meal"
            )));
        }
        meals.sort_by_key(|meal| config.assembly.meal_times.time(meal.meal_type));

        let date = context.date_of(day_index)?;
        daily_plans.push(DayPlan {
            day,
            day_of_week: date.format("%A").to_string(),
            date,
            meals,
            total_nutrition: NutritionProfile::default(),
            notes: raw_day.notes.clone().unwrap_or_default(),
        });
    }

    let non_blank = |text: &Option<String>| {
        text.as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_owned)
    };

    let ayurvedic_recommendations = if raw.ayurvedic_recommendations.is_empty() {
        config
            .guidelines
            .recommendations(context.profile.primary_constitution)
    } else {
        raw.ayurvedic_recommendations.clone()
    };

    let mut plan = GeneratedPlan {
        plan_name: non_blank(&raw.plan_name).unwrap_or_else(|| context.plan_name()),
        description: non_blank(&raw.description).unwrap_or_else(|| context.description()),
        duration: context.duration_days,
        start_date: context.start_date,
        target_calories: context.requirements.target_calories,
        daily_plans,
        total_nutrition: NutritionProfile::default(),
        ayurvedic_recommendations,
        health_goals: context.health_goals(),
        source: PlanSource::ExternalGenerator,
        requirements: context.requirements.clone(),
    };
    recompute_totals(&mut plan);
    Ok(plan)
}
