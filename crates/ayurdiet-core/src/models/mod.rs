// ABOUTME: Core data models for the diet-plan engine
// ABOUTME: Re-exports patient, recipe, preference, requirement and plan types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Plain data structures exchanged at the engine boundary. Patient profiles and
//! recipe candidates come from external stores and are read-only; requirements
//! and plans are computed per invocation.
//!
//! All wire-facing structs serialize with camelCase keys.

mod patient;
mod plan;
mod preferences;
mod recipe;
mod requirements;

// Patient domain
pub use patient::{
    ActivityLevel, BiologicalSex, Constitution, ConstitutionScores, CookingSkill, DietType, Dosha,
    MealFrequency, PatientProfile, Vitals,
};

// Recipe domain
pub use recipe::{
    Difficulty, DoshaEffect, DoshaEffects, Ingredient, MealType, NutritionProfile,
    RecipeCandidate,
};

// Request preferences
pub use preferences::{DietaryRestriction, HealthGoal, PlanPreferences, PlanRequest};

// Derived requirements
pub use requirements::{
    AdjustmentKind, CalorieAdjustment, HydrationTarget, MacroRatios, MacroTargets,
    MicronutrientTargets, NutritionRequirements,
};

// Plans
pub use plan::{
    DayPlan, GeneratedPlan, MealEntry, ModificationEntry, ParameterChange, PlanRevision,
    PlanSource, PlannedMeal, RawDayPlan, RawGeneratedPlan, RawMeal, RawMealEntry, StoredPlan,
};
