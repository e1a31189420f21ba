// ABOUTME: Generated meal plan models and the untrusted raw generator shape
// ABOUTME: GeneratedPlan, DayPlan, PlannedMeal, MealEntry plus stored plan history and modifications
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::preferences::PlanPreferences;
use super::recipe::{MealType, NutritionProfile};
use super::requirements::NutritionRequirements;

/// Which path produced a plan
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlanSource {
    /// Built by the deterministic assembler
    Deterministic,
    /// Produced by the external generator and validated
    ExternalGenerator,
}

/// One recipe served in a meal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MealEntry {
    /// Referenced recipe id
    pub recipe_id: String,
    /// Recipe name
    pub recipe_name: String,
    /// Portion multiplier
    pub quantity: f64,
    /// Serving notes
    #[serde(default)]
    pub notes: String,
    /// Nutrition of this portion
    pub nutrition: NutritionProfile,
}

/// One meal slot within a day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlannedMeal {
    /// Slot
    pub meal_type: MealType,
    /// Serving time (HH:MM)
    pub time: String,
    /// Recipes served
    pub recipes: Vec<MealEntry>,
    /// Sum of the entry snapshots
    pub total_nutrition: NutritionProfile,
}

/// One day of a plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    /// 1-based day index
    pub day: u32,
    /// Weekday name
    pub day_of_week: String,
    /// Calendar date
    pub date: NaiveDate,
    /// Meals in serving order
    pub meals: Vec<PlannedMeal>,
    /// Sum of the meal totals
    pub total_nutrition: NutritionProfile,
    /// Day notes
    #[serde(default)]
    pub notes: String,
}

/// Validated multi-day meal plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPlan {
    /// Plan title
    pub plan_name: String,
    /// Plan summary
    pub description: String,
    /// Number of days
    pub duration: u32,
    /// First day
    pub start_date: NaiveDate,
    /// Daily calorie target
    pub target_calories: u32,
    /// Days in order
    pub daily_plans: Vec<DayPlan>,
    /// Sum of the day totals
    pub total_nutrition: NutritionProfile,
    /// Dosha guidelines
    pub ayurvedic_recommendations: Vec<String>,
    /// Requested goals and concerns
    pub health_goals: Vec<String>,
    /// Producing path
    pub source: PlanSource,
    /// Requirements the plan was built against
    pub requirements: NutritionRequirements,
}

impl GeneratedPlan {
    /// Every recipe id referenced by the plan, in plan order
    pub fn recipe_ids(&self) -> impl Iterator<Item = &str> {
        self.daily_plans
            .iter()
            .flat_map(|day| &day.meals)
            .flat_map(|meal| &meal.recipes)
            .map(|entry| entry.recipe_id.as_str())
    }
}

/// Untrusted entry as produced by the external generator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMealEntry {
    /// Referenced recipe id
    pub recipe_id: String,
    /// Portion multiplier
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    /// Serving notes
    #[serde(default)]
    pub notes: String,
}

const fn default_quantity() -> f64 {
    1.0
}

/// Untrusted meal as produced by the external generator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMeal {
    /// Free-text slot name
    pub meal_type: String,
    /// Serving time
    #[serde(default)]
    pub time: Option<String>,
    /// Entries
    #[serde(default)]
    pub recipes: Vec<RawMealEntry>,
    /// Generator-reported totals, ignored
    #[serde(default)]
    pub total_nutrition: Option<Value>,
}

/// Untrusted day as produced by the external generator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDayPlan {
    /// Reported day index
    #[serde(default)]
    pub day: Option<u32>,
    /// Meals
    #[serde(default)]
    pub meals: Vec<RawMeal>,
    /// Day notes
    #[serde(default)]
    pub notes: Option<String>,
    /// Generator-reported totals, ignored
    #[serde(default)]
    pub total_nutrition: Option<Value>,
}

/// Untrusted plan as produced by the external generator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGeneratedPlan {
    /// Plan title
    #[serde(default)]
    pub plan_name: Option<String>,
    /// Plan summary
    #[serde(default)]
    pub description: Option<String>,
    /// Days
    #[serde(default)]
    pub daily_plans: Vec<RawDayPlan>,
    /// Dosha guidelines
    #[serde(default)]
    pub ayurvedic_recommendations: Vec<String>,
    /// Generator-reported totals, ignored
    #[serde(default)]
    pub total_nutrition: Option<Value>,
}

impl RawGeneratedPlan {
    /// Every recipe id referenced by the raw plan
    pub fn recipe_ids(&self) -> impl Iterator<Item = &str> {
        self.daily_plans
            .iter()
            .flat_map(|day| &day.meals)
            .flat_map(|meal| &meal.recipes)
            .map(|entry| entry.recipe_id.as_str())
    }
}

/// One preference field that changed during regeneration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParameterChange {
    /// Field name (camelCase)
    pub field: String,
    /// Previous value
    pub from: Value,
    /// New value
    pub to: Value,
}

/// Audit record of a regeneration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModificationEntry {
    /// When the regeneration happened
    pub timestamp: DateTime<Utc>,
    /// Caller-supplied reason
    pub reason: String,
    /// Revision produced by this modification
    pub revision: u32,
    /// Changed parameters
    pub changed: Vec<ParameterChange>,
}

/// Superseded plan revision
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanRevision {
    /// Revision number
    pub revision: u32,
    /// Preferences the revision was built with
    pub preferences: PlanPreferences,
    /// The plan itself
    pub plan: GeneratedPlan,
    /// When the revision was superseded
    pub superseded_at: DateTime<Utc>,
}

/// Persisted plan with its revision history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredPlan {
    /// Plan id
    pub id: String,
    /// Owning patient
    pub patient_id: String,
    /// Preferences of the current revision
    pub preferences: PlanPreferences,
    /// Current plan
    pub plan: GeneratedPlan,
    /// Current revision number (starts at 1)
    pub revision: u32,
    /// Earlier revisions, oldest first
    pub history: Vec<PlanRevision>,
    /// Regeneration audit trail
    pub modifications: Vec<ModificationEntry>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
}
