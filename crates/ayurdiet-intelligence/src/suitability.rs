// ABOUTME: Recipe suitability scoring against a patient profile and plan preferences
// ABOUTME: Hard diet-type and allergy filter, weighted dosha, health, restriction and prep-time score
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Recipe Suitability Scorer
//!
//! Scoring is a pure function of the recipe, profile, preferences and
//! configuration, so re-scoring the same inputs always yields the same result.
//!
//! Recipes that fail the hard filter (diet type or allergy) never appear in
//! the output. The remaining recipes receive a weighted score in `[0, 1]`:
//!
//! | Component | Weight | Full credit |
//! |---|---|---|
//! | Dosha compatibility | 0.40 | recipe decreases the patient's dosha |
//! | Health-condition match | 0.25 | a concern matches a benefit tag |
//! | Restriction compliance | 0.20 | no active restriction is violated |
//! | Preparation time | 0.15 | prep + cook fits the time budget |

use std::cmp::Ordering;

use ayurdiet_core::models::{
    DietType, DietaryRestriction, Dosha, DoshaEffect, PatientProfile, PlanPreferences,
    RecipeCandidate,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{DoshaMultipliers, IntelligenceConfig, ScoringConfig};
use crate::keywords::{IngredientFlags, IngredientMatcher};

/// Contribution of each scoring component
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    /// Dosha compatibility contribution
    pub dosha: f64,
    /// Health-condition match contribution
    pub health: f64,
    /// Dietary-restriction compliance contribution
    pub restriction: f64,
    /// Preparation-time fit contribution
    pub prep_time: f64,
}

impl ScoreBreakdown {
    /// Sum of all contributions, clamped to `[0, 1]`
    #[must_use]
    pub fn total(&self) -> f64 {
        (self.dosha + self.health + self.restriction + self.prep_time).clamp(0.0, 1.0)
    }
}

/// A recipe candidate with its suitability score
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredRecipe {
    /// The candidate
    pub recipe: RecipeCandidate,
    /// Weighted score in `[0, 1]`
    pub score: f64,
    /// Per-component contributions
    pub breakdown: ScoreBreakdown,
    /// Score fell below the acceptance threshold
    pub disqualified: bool,
}

/// Why a recipe was removed before scoring
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exclusion {
    /// Conflicts with the patient's diet type
    DietType(DietType),
    /// Contains an ingredient the patient is allergic to
    Allergy(String),
}

/// Whether ingredient flags conflict with a diet type
#[must_use]
pub const fn violates_diet_type(flags: IngredientFlags, diet_type: DietType) -> bool {
    match diet_type {
        DietType::NonVegetarian => false,
        DietType::Vegetarian => flags.meat || flags.fish || flags.egg,
        DietType::Vegan => flags.meat || flags.fish || flags.egg || flags.dairy,
    }
}

/// Whether ingredient flags violate a dietary restriction
///
/// Custom restrictions carry no keyword table and are never violated.
#[must_use]
pub const fn violates_restriction(
    flags: IngredientFlags,
    restriction: &DietaryRestriction,
) -> bool {
    match restriction {
        DietaryRestriction::Vegetarian => flags.meat || flags.fish,
        DietaryRestriction::Vegan => flags.meat || flags.fish || flags.dairy || flags.egg,
        DietaryRestriction::GlutenFree => flags.gluten,
        DietaryRestriction::Custom(_) => false,
    }
}

/// Apply the hard filter to one recipe
///
/// # Errors
///
/// Returns the exclusion reason when the recipe conflicts with the patient's
/// diet type or allergies
pub fn hard_filter(
    recipe: &RecipeCandidate,
    profile: &PatientProfile,
    matcher: &IngredientMatcher,
) -> Result<IngredientFlags, Exclusion> {
    let flags = matcher.flags(recipe);
    if violates_diet_type(flags, profile.diet_type) {
        return Err(Exclusion::DietType(profile.diet_type));
    }
    if let Some(allergy) = matcher.allergy_conflict(recipe, &profile.allergies) {
        return Err(Exclusion::Allergy(allergy.to_owned()));
    }
    Ok(flags)
}

const fn effect_multiplier(effect: DoshaEffect, multipliers: &DoshaMultipliers) -> f64 {
    match effect {
        DoshaEffect::Decrease => multipliers.decrease,
        DoshaEffect::Neutral => multipliers.neutral,
        DoshaEffect::Increase => multipliers.increase,
    }
}

fn dosha_component(
    recipe: &RecipeCandidate,
    profile: &PatientProfile,
    config: &ScoringConfig,
) -> f64 {
    let multipliers = &config.dosha_multipliers;
    let multiplier = profile.primary_constitution.first_dosha().map_or_else(
        // Tridosha: average of the three effects
        || {
            Dosha::ALL
                .iter()
                .map(|dosha| effect_multiplier(recipe.dosha_effect.effect(*dosha), multipliers))
                .sum::<f64>()
                / 3.0
        },
        |dosha| effect_multiplier(recipe.dosha_effect.effect(dosha), multipliers),
    );
    config.weights.dosha * multiplier
}

fn health_component(recipe: &RecipeCandidate, concerns: &[String], config: &ScoringConfig) -> f64 {
    if concerns.is_empty() {
        return config.baselines.health_no_concerns;
    }

    let matched = recipe.health_benefits.iter().any(|benefit| {
        let benefit = benefit.trim().to_lowercase();
        !benefit.is_empty()
            && concerns
                .iter()
                .any(|concern| benefit.contains(concern.as_str()) || concern.contains(&benefit))
    });

    if matched {
        config.weights.health
    } else {
        config.baselines.health_unmatched
    }
}

fn restriction_component(
    flags: IngredientFlags,
    restrictions: &[DietaryRestriction],
    config: &ScoringConfig,
) -> f64 {
    // Violations never stack below zero
    if restrictions
        .iter()
        .any(|restriction| violates_restriction(flags, restriction))
    {
        (config.weights.restriction - config.baselines.restriction_penalty).max(0.0)
    } else {
        config.weights.restriction
    }
}

fn prep_time_component(recipe: &RecipeCandidate, max_minutes: u32, config: &ScoringConfig) -> f64 {
    if recipe.total_minutes() <= max_minutes {
        config.weights.prep_time
    } else {
        config.baselines.prep_time_exceeded
    }
}

/// Normalized concerns from the profile and the request, deduplicated
#[must_use]
pub fn collect_concerns(profile: &PatientProfile, preferences: &PlanPreferences) -> Vec<String> {
    let mut concerns: Vec<String> = profile
        .health_concerns
        .iter()
        .chain(&preferences.health_conditions)
        .map(|concern| concern.trim().to_lowercase())
        .filter(|concern| !concern.is_empty())
        .collect();
    concerns.sort();
    concerns.dedup();
    concerns
}

/// Restrictions active for a run: the request's plus the diet type's own
#[must_use]
pub fn active_restrictions(
    profile: &PatientProfile,
    preferences: &PlanPreferences,
) -> Vec<DietaryRestriction> {
    let mut restrictions = preferences.dietary_restrictions.clone();
    let implied = match profile.diet_type {
        DietType::Vegetarian => Some(DietaryRestriction::Vegetarian),
        DietType::Vegan => Some(DietaryRestriction::Vegan),
        DietType::NonVegetarian => None,
    };
    if let Some(restriction) = implied {
        if !restrictions.contains(&restriction) {
            restrictions.push(restriction);
        }
    }
    restrictions
}

/// Patient-side scoring inputs, derived once per run
struct PatientContext {
    concerns: Vec<String>,
    restrictions: Vec<DietaryRestriction>,
    max_minutes: u32,
}

impl PatientContext {
    fn new(profile: &PatientProfile, preferences: &PlanPreferences) -> Self {
        Self {
            concerns: collect_concerns(profile, preferences),
            restrictions: active_restrictions(profile, preferences),
            max_minutes: preferences.max_cooking_minutes(),
        }
    }
}

fn score_with(
    recipe: &RecipeCandidate,
    flags: IngredientFlags,
    profile: &PatientProfile,
    context: &PatientContext,
    config: &ScoringConfig,
) -> ScoredRecipe {
    let breakdown = ScoreBreakdown {
        dosha: dosha_component(recipe, profile, config),
        health: health_component(recipe, &context.concerns, config),
        restriction: restriction_component(flags, &context.restrictions, config),
        prep_time: prep_time_component(recipe, context.max_minutes, config),
    };
    let score = breakdown.total();

    ScoredRecipe {
        recipe: recipe.clone(),
        score,
        breakdown,
        disqualified: score < config.acceptance_threshold,
    }
}

/// Descending score, ties by ascending id
fn rank(a: &ScoredRecipe, b: &ScoredRecipe) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.recipe.id.cmp(&b.recipe.id))
}

/// Hard-filter and score every candidate, keeping disqualified entries flagged
#[must_use]
pub fn score_candidates(
    candidates: &[RecipeCandidate],
    profile: &PatientProfile,
    preferences: &PlanPreferences,
    config: &IntelligenceConfig,
) -> Vec<ScoredRecipe> {
    let matcher = IngredientMatcher::new(&config.scoring.keywords);
    let context = PatientContext::new(profile, preferences);

    let mut scored: Vec<ScoredRecipe> = candidates
        .iter()
        .filter_map(|recipe| match hard_filter(recipe, profile, &matcher) {
            Ok(flags) => Some(score_with(
                recipe,
                flags,
                profile,
                &context,
                &config.scoring,
            )),
            Err(reason) => {
                debug!(recipe_id = %recipe.id, ?reason, "Recipe excluded by hard filter");
                None
            }
        })
        .collect();

    scored.sort_by(rank);
    scored
}

/// Hard-filter, score and drop every recipe below the acceptance threshold
#[must_use]
pub fn score_and_filter(
    candidates: &[RecipeCandidate],
    profile: &PatientProfile,
    preferences: &PlanPreferences,
    config: &IntelligenceConfig,
) -> Vec<ScoredRecipe> {
    let mut scored = score_candidates(candidates, profile, preferences, config);
    scored.retain(|entry| !entry.disqualified);

    debug!(
        patient_id = %profile.id,
        candidates = candidates.len(),
        accepted = scored.len(),
        "Scored recipe candidates"
    );
    scored
}
