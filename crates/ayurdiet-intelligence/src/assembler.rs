// ABOUTME: Deterministic multi-day meal plan assembly from a scored recipe pool
// ABOUTME: Per-dosha slot targets, closest-calorie selection with id tie-break and pool wraparound
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Meal Plan Assembler
//!
//! For every day and slot the assembler picks, among the slot's unused
//! recipes, the one whose calories are closest to the slot target (ties go to
//! the smallest id). Once every applicable recipe has been used, selection
//! wraps around the score-ordered slot pool by day index. The portion
//! multiplier scales the recipe to the slot target exactly.

use std::collections::HashSet;

use ayurdiet_core::errors::{AppError, AppResult};
use ayurdiet_core::models::{
    DayPlan, GeneratedPlan, MealEntry, MealType, NutritionProfile, NutritionRequirements,
    PatientProfile, PlanPreferences, PlanSource, PlannedMeal,
};
use chrono::{Days, NaiveDate, Utc};
use tracing::{debug, info};

use crate::config::IntelligenceConfig;
use crate::plan_validator::recompute_totals;
use crate::suitability::{collect_concerns, ScoredRecipe};

/// Day note attached when the pool is exhausted and recipes repeat
const REPEAT_NOTE: &str = "Some recipes repeat because every suitable option has been used";

/// Everything a plan is built against, shared by assembly and generator output conversion
#[derive(Debug, Clone, Copy)]
pub struct PlanContext<'a> {
    /// Patient the plan is for
    pub profile: &'a PatientProfile,
    /// Effective preferences
    pub preferences: &'a PlanPreferences,
    /// Requirements computed for this run
    pub requirements: &'a NutritionRequirements,
    /// Number of days
    pub duration_days: u32,
    /// First day of the plan
    pub start_date: NaiveDate,
}

impl<'a> PlanContext<'a> {
    /// Build a context, defaulting the start date to today (UTC)
    #[must_use]
    pub fn new(
        profile: &'a PatientProfile,
        preferences: &'a PlanPreferences,
        requirements: &'a NutritionRequirements,
        duration_days: u32,
    ) -> Self {
        Self {
            profile,
            preferences,
            requirements,
            duration_days,
            start_date: preferences
                .start_date
                .unwrap_or_else(|| Utc::now().date_naive()),
        }
    }

    /// Calendar date of a 0-based day index
    ///
    /// # Errors
    ///
    /// Returns an internal error if the date overflows the calendar
    pub fn date_of(&self, day_index: u32) -> AppResult<NaiveDate> {
        self.start_date
            .checked_add_days(Days::new(u64::from(day_index)))
            .ok_or_else(|| AppError::internal("Plan date out of calendar range"))
    }

    /// Default plan title
    #[must_use]
    pub fn plan_name(&self) -> String {
        format!(
            "{} Balancing Plan ({} days)",
            self.profile.primary_constitution, self.duration_days
        )
    }

    /// Default plan summary
    #[must_use]
    pub fn description(&self) -> String {
        format!(
            "{}-day plan for a {} constitution targeting {} kcal per day",
            self.duration_days, self.profile.primary_constitution, self.requirements.target_calories
        )
    }

    /// Requested goals followed by health concerns
    #[must_use]
    pub fn health_goals(&self) -> Vec<String> {
        let mut goals: Vec<String> = self
            .preferences
            .goals
            .iter()
            .map(ToString::to_string)
            .collect();
        for concern in collect_concerns(self.profile, self.preferences) {
            if !goals.contains(&concern) {
                goals.push(concern);
            }
        }
        goals
    }

    /// Slot calorie target for the patient's constitution
    #[must_use]
    pub fn slot_target(&self, meal_type: MealType, config: &IntelligenceConfig) -> f64 {
        let ratios = config
            .assembly
            .ratios_for(self.profile.primary_constitution.first_dosha());
        f64::from(self.requirements.target_calories) * ratios.ratio(meal_type)
    }
}

/// Slots in serving-time order
#[must_use]
pub fn serving_order(config: &IntelligenceConfig) -> Vec<MealType> {
    let mut slots = MealType::ALL.to_vec();
    slots.sort_by_key(|slot| config.assembly.meal_times.time(*slot));
    slots
}

/// Serving time of a slot as HH:MM
#[must_use]
pub fn serving_time(meal_type: MealType, config: &IntelligenceConfig) -> String {
    config
        .assembly
        .meal_times
        .time(meal_type)
        .format("%H:%M")
        .to_string()
}

/// Recipes usable in one slot, in score order
struct SlotPool<'a> {
    meal_type: MealType,
    target: f64,
    recipes: Vec<&'a ScoredRecipe>,
}

impl<'a> SlotPool<'a> {
    fn build(
        meal_type: MealType,
        scored: &'a [ScoredRecipe],
        context: &PlanContext<'_>,
        config: &IntelligenceConfig,
    ) -> AppResult<Self> {
        // Zero-calorie recipes cannot be scaled to a target
        let recipes: Vec<&ScoredRecipe> = scored
            .iter()
            .filter(|entry| {
                !entry.disqualified
                    && entry.recipe.applies_to(meal_type)
                    && entry.recipe.nutrition.calories > 0.0
            })
            .collect();

        if recipes.is_empty() {
            return Err(AppError::insufficient_candidates(meal_type.as_str()));
        }

        Ok(Self {
            meal_type,
            target: context.slot_target(meal_type, config),
            recipes,
        })
    }

    /// Closest-calorie unused recipe, or the wraparound pick; the flag reports a repeat
    fn select(&self, day_index: u32, used: &HashSet<&str>) -> (&'a ScoredRecipe, bool) {
        let closest = self
            .recipes
            .iter()
            .filter(|entry| !used.contains(entry.recipe.id.as_str()))
            .min_by(|a, b| {
                let da = (a.recipe.nutrition.calories - self.target).abs();
                let db = (b.recipe.nutrition.calories - self.target).abs();
                da.total_cmp(&db).then_with(|| a.recipe.id.cmp(&b.recipe.id))
            });

        closest.map_or_else(
            || {
                let index = day_index as usize % self.recipes.len();
                (self.recipes[index], true)
            },
            |entry| (*entry, false),
        )
    }
}

fn meal_entry(recipe: &ScoredRecipe, target: f64) -> MealEntry {
    let quantity = target / recipe.recipe.nutrition.calories;
    MealEntry {
        recipe_id: recipe.recipe.id.clone(),
        recipe_name: recipe.recipe.name.clone(),
        quantity,
        notes: String::new(),
        nutrition: recipe.recipe.nutrition.scaled(quantity),
    }
}

/// Assemble a plan over an explicit context
///
/// # Errors
///
/// Returns `INSUFFICIENT_CANDIDATES` naming the first slot whose pool is empty
pub fn assemble_with_context(
    scored: &[ScoredRecipe],
    context: &PlanContext<'_>,
    config: &IntelligenceConfig,
) -> AppResult<GeneratedPlan> {
    let pools = serving_order(config)
        .into_iter()
        .map(|slot| SlotPool::build(slot, scored, context, config))
        .collect::<AppResult<Vec<_>>>()?;

    let mut used: HashSet<&str> = HashSet::new();
    let mut daily_plans = Vec::with_capacity(context.duration_days as usize);

    for day_index in 0..context.duration_days {
        let mut meals = Vec::with_capacity(pools.len());
        let mut repeated = false;

        for pool in &pools {
            let (choice, is_repeat) = pool.select(day_index, &used);
            used.insert(choice.recipe.id.as_str());
            repeated |= is_repeat;

            debug!(
                day = day_index + 1,
                slot = %pool.meal_type,
                recipe_id = %choice.recipe.id,
                target = pool.target,
                repeat = is_repeat,
                "Selected recipe"
            );

            meals.push(PlannedMeal {
                meal_type: pool.meal_type,
                time: serving_time(pool.meal_type, config),
                recipes: vec![meal_entry(choice, pool.target)],
                total_nutrition: NutritionProfile::default(),
            });
        }

        let date = context.date_of(day_index)?;
        daily_plans.push(DayPlan {
            day: day_index + 1,
            day_of_week: date.format("%A").to_string(),
            date,
            meals,
            total_nutrition: NutritionProfile::default(),
            notes: if repeated {
                REPEAT_NOTE.to_owned()
            } else {
                String::new()
            },
        });
    }

    let mut plan = GeneratedPlan {
        plan_name: context.plan_name(),
        description: context.description(),
        duration: context.duration_days,
        start_date: context.start_date,
        target_calories: context.requirements.target_calories,
        daily_plans,
        total_nutrition: NutritionProfile::default(),
        ayurvedic_recommendations: config
            .guidelines
            .recommendations(context.profile.primary_constitution),
        health_goals: context.health_goals(),
        source: PlanSource::Deterministic,
        requirements: context.requirements.clone(),
    };
    recompute_totals(&mut plan);

    info!(
        patient_id = %context.profile.id,
        duration = context.duration_days,
        distinct_recipes = used.len(),
        "Assembled deterministic meal plan"
    );

    Ok(plan)
}

/// Assemble a deterministic plan from scored recipes
///
/// # Errors
///
/// Returns `INSUFFICIENT_CANDIDATES` naming the first slot whose pool is empty
pub fn assemble(
    scored: &[ScoredRecipe],
    profile: &PatientProfile,
    preferences: &PlanPreferences,
    requirements: &NutritionRequirements,
    duration_days: u32,
    config: &IntelligenceConfig,
) -> AppResult<GeneratedPlan> {
    let context = PlanContext::new(profile, preferences, requirements, duration_days);
    assemble_with_context(scored, &context, config)
}
