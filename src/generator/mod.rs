// ABOUTME: External meal plan generator seam and the prompt context handed to it
// ABOUTME: PlanGenerator trait, PlanPromptContext builder and JSON extraction from model output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # External Plan Generator
//!
//! A [`PlanGenerator`] receives a [`PlanPromptContext`] (patient summary,
//! requirements, slot targets and the accepted candidate pool) and returns an
//! untrusted JSON document. The service converts that document through the
//! plan validator; anything the validator rejects falls back to deterministic
//! assembly.

mod llm_generator;

pub use llm_generator::LlmPlanGenerator;

use std::collections::BTreeMap;

use async_trait::async_trait;
use ayurdiet_core::models::{
    BiologicalSex, Constitution, DietType, MacroTargets, MealType, NutritionProfile,
};
use ayurdiet_intelligence::assembler::{serving_order, serving_time, PlanContext};
use ayurdiet_intelligence::config::IntelligenceConfig;
use ayurdiet_intelligence::suitability::ScoredRecipe;
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use crate::errors::{AppError, AppResult};

/// Patient facts the generator may use
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptPatient {
    /// Primary constitution
    pub constitution: Constitution,
    /// Diet type
    pub diet_type: DietType,
    /// Age in years
    pub age: Option<u32>,
    /// Biological sex
    pub biological_sex: BiologicalSex,
    /// Health concerns and requested conditions
    pub health_concerns: Vec<String>,
    /// Allergy tags
    pub allergies: Vec<String>,
    /// Preferred cuisines
    pub preferred_cuisines: Vec<String>,
}

/// One candidate the generator may reference
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptRecipe {
    /// Recipe id
    pub id: String,
    /// Recipe name
    pub name: String,
    /// Slots the recipe fits
    pub meal_types: Vec<MealType>,
    /// Nutrition of one portion
    pub nutrition: NutritionProfile,
    /// Prep plus cook minutes
    pub total_minutes: u32,
    /// Suitability score
    pub score: f64,
}

/// Everything the generator sees for one run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanPromptContext {
    /// Patient summary
    pub patient: PromptPatient,
    /// Number of days to plan
    pub duration_days: u32,
    /// First plan day
    pub start_date: NaiveDate,
    /// Daily calorie target
    pub target_calories: u32,
    /// Macro targets
    pub macros: MacroTargets,
    /// Calorie target per slot
    pub slot_targets: BTreeMap<MealType, u32>,
    /// Serving time per slot
    pub meal_times: BTreeMap<MealType, String>,
    /// Requested goals and concerns
    pub health_goals: Vec<String>,
    /// Dosha guidelines
    pub guidelines: Vec<String>,
    /// Accepted candidates, best first
    pub candidates: Vec<PromptRecipe>,
}

impl PlanPromptContext {
    /// Build the prompt context from a plan context and the accepted pool
    #[must_use]
    pub fn build(
        context: &PlanContext<'_>,
        scored: &[ScoredRecipe],
        config: &IntelligenceConfig,
    ) -> Self {
        let profile = context.profile;
        let slots = serving_order(config);

        Self {
            patient: PromptPatient {
                constitution: profile.primary_constitution,
                diet_type: profile.diet_type,
                age: profile.age,
                biological_sex: profile.biological_sex,
                health_concerns: profile.health_concerns.iter().cloned().collect(),
                allergies: profile.allergies.iter().cloned().collect(),
                preferred_cuisines: profile.preferred_cuisines.iter().cloned().collect(),
            },
            duration_days: context.duration_days,
            start_date: context.start_date,
            target_calories: context.requirements.target_calories,
            macros: context.requirements.macros,
            slot_targets: slots
                .iter()
                .map(|slot| (*slot, context.slot_target(*slot, config).round() as u32))
                .collect(),
            meal_times: slots
                .iter()
                .map(|slot| (*slot, serving_time(*slot, config)))
                .collect(),
            health_goals: context.health_goals(),
            guidelines: config
                .guidelines
                .recommendations(profile.primary_constitution),
            candidates: scored
                .iter()
                .map(|entry| PromptRecipe {
                    id: entry.recipe.id.clone(),
                    name: entry.recipe.name.clone(),
                    meal_types: entry.recipe.meal_types.clone(),
                    nutrition: entry.recipe.nutrition,
                    total_minutes: entry.recipe.total_minutes(),
                    score: (entry.score * 1000.0).round() / 1000.0,
                })
                .collect(),
        }
    }
}

/// External plan generator
#[async_trait]
pub trait PlanGenerator: Send + Sync {
    /// Generator identifier for logs
    fn name(&self) -> &str;

    /// Produce an untrusted plan document for the context
    async fn complete(&self, context: &PlanPromptContext) -> AppResult<Value>;
}

/// Strip a surrounding Markdown code fence, if any
#[must_use]
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. "json") up to the first newline
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

/// Parse model output into a JSON object
///
/// # Errors
///
/// Returns `EXTERNAL_GENERATOR_MALFORMED` when the text is not a JSON object
pub fn parse_generator_output(text: &str) -> AppResult<Value> {
    let body = strip_code_fences(text);
    let value: Value = serde_json::from_str(body)
        .map_err(|e| AppError::generator_malformed(format!("Output is not valid JSON: {e}")))?;
    if value.is_object() {
        Ok(value)
    } else {
        Err(AppError::generator_malformed("Output is not a JSON object"))
    }
}
