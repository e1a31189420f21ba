// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Provides patient and recipe builders, seeded stores, mock generators and failing stores
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `ayurdiet`
//!
//! Fixtures default to the reference patient: male, 30 years, 70 kg,
//! 175 cm, sedentary, three meals a day.

use std::collections::BTreeSet;
use std::env;
use std::io;
use std::sync::{Arc, Once};
use std::time::Duration;

use async_trait::async_trait;
use ayurdiet::config::PlannerConfig;
use ayurdiet::errors::{AppError, AppResult};
use ayurdiet::generator::{PlanGenerator, PlanPromptContext};
use ayurdiet::services::PlanGenerationService;
use ayurdiet::stores::{MemoryStore, PlanStore, SeedData};
use ayurdiet_core::models::{
    ActivityLevel, BiologicalSex, Constitution, ConstitutionScores, CookingSkill, DietType,
    Difficulty, Dosha, DoshaEffect, DoshaEffects, Ingredient, MealFrequency, MealType,
    NutritionProfile, PatientProfile, RecipeCandidate, StoredPlan,
};
use chrono::NaiveDate;
use serde_json::Value;
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // TEST_LOG controls the level; quiet by default
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// A Monday, so day-of-week assertions are stable
pub fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
}

/// Reference patient with the given constitution and diet type
pub fn patient(id: &str, constitution: Constitution, diet_type: DietType) -> PatientProfile {
    PatientProfile {
        id: id.to_owned(),
        name: format!("Patient {id}"),
        age: Some(30),
        biological_sex: BiologicalSex::Male,
        weight_kg: Some(70.0),
        height_cm: Some(175.0),
        primary_constitution: constitution,
        constitution_scores: ConstitutionScores::default(),
        diet_type,
        health_concerns: BTreeSet::new(),
        allergies: BTreeSet::new(),
        activity_level: ActivityLevel::Sedentary,
        meal_frequency: MealFrequency::Three,
        cooking_skill: CookingSkill::Intermediate,
        preferred_cuisines: BTreeSet::new(),
    }
}

/// Reference patient with a Kapha constitution and no diet-type exclusions
pub fn kapha_patient() -> PatientProfile {
    patient("p-kapha", Constitution::Kapha, DietType::NonVegetarian)
}

/// Nutrition with a plausible macro split for a calorie value
pub fn nutrition(calories: f64) -> NutritionProfile {
    NutritionProfile {
        calories,
        protein_g: calories * 0.05,
        carbs_g: calories * 0.12,
        fat_g: calories * 0.03,
        fiber_g: calories * 0.01,
    }
}

/// Active, public recipe that pacifies every dosha and needs 20 minutes
pub fn recipe(id: &str, meal_types: &[MealType], calories: f64) -> RecipeCandidate {
    RecipeCandidate {
        id: id.to_owned(),
        name: format!("Recipe {id}"),
        meal_types: meal_types.to_vec(),
        cuisine_tags: vec!["indian".to_owned()],
        ingredients: vec![ingredient("rice"), ingredient("moong dal")],
        nutrition: nutrition(calories),
        dosha_effect: all_effects(DoshaEffect::Decrease),
        health_benefits: Vec::new(),
        preparation_minutes: 10,
        cooking_minutes: 10,
        difficulty: Difficulty::default(),
        is_active: true,
        is_public: true,
    }
}

/// Ingredient line with a fixed quantity
pub fn ingredient(name: &str) -> Ingredient {
    Ingredient {
        name: name.to_owned(),
        quantity: "1 cup".to_owned(),
    }
}

/// The same effect on every dosha
pub fn all_effects(effect: DoshaEffect) -> DoshaEffects {
    Dosha::ALL
        .iter()
        .fold(DoshaEffects::default(), |effects, dosha| {
            effects.with(*dosha, effect)
        })
}

/// Pool with three recipes per slot
pub fn full_pool() -> Vec<RecipeCandidate> {
    vec![
        recipe("b-1", &[MealType::Breakfast], 300.0),
        recipe("b-2", &[MealType::Breakfast], 420.0),
        recipe("b-3", &[MealType::Breakfast], 520.0),
        recipe("l-1", &[MealType::Lunch], 650.0),
        recipe("l-2", &[MealType::Lunch], 800.0),
        recipe("l-3", &[MealType::Lunch, MealType::Dinner], 950.0),
        recipe("d-1", &[MealType::Dinner], 380.0),
        recipe("d-2", &[MealType::Dinner], 450.0),
        recipe("d-3", &[MealType::Dinner], 500.0),
        recipe("s-1", &[MealType::Snack], 120.0),
        recipe("s-2", &[MealType::Snack], 180.0),
        recipe("s-3", &[MealType::Snack], 220.0),
    ]
}

/// Planner configuration with a short generator timeout
pub fn test_config() -> PlannerConfig {
    let mut config = PlannerConfig::default();
    config.generator.timeout = Duration::from_millis(200);
    config
}

/// In-memory store seeded with patients and recipes
pub fn seeded_store(
    patients: Vec<PatientProfile>,
    recipes: Vec<RecipeCandidate>,
) -> Arc<MemoryStore> {
    Arc::new(MemoryStore::from_seed(SeedData { patients, recipes }).unwrap())
}

/// Service over a seeded in-memory store, without a generator
pub fn service_with(store: &Arc<MemoryStore>) -> PlanGenerationService {
    init_test_logging();
    PlanGenerationService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        Arc::new(test_config()),
    )
}

// ============================================================================
// Mock generators
// ============================================================================

/// Generator returning a fixed document and recording every prompt
pub struct StaticGenerator {
    document: Value,
    prompts: Mutex<Vec<PlanPromptContext>>,
}

impl StaticGenerator {
    pub fn new(document: Value) -> Self {
        Self {
            document,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub async fn prompt_count(&self) -> usize {
        self.prompts.lock().await.len()
    }

    pub async fn last_prompt(&self) -> Option<PlanPromptContext> {
        self.prompts.lock().await.last().cloned()
    }
}

#[async_trait]
impl PlanGenerator for StaticGenerator {
    fn name(&self) -> &str {
        "static"
    }

    async fn complete(&self, context: &PlanPromptContext) -> AppResult<Value> {
        self.prompts.lock().await.push(context.clone());
        Ok(self.document.clone())
    }
}

/// Generator that never answers within the test timeout
pub struct SlowGenerator;

#[async_trait]
impl PlanGenerator for SlowGenerator {
    fn name(&self) -> &str {
        "slow"
    }

    async fn complete(&self, _context: &PlanPromptContext) -> AppResult<Value> {
        sleep(Duration::from_secs(30)).await;
        Ok(Value::Null)
    }
}

/// Generator that fails with a fixed error
pub struct FailingGenerator {
    make_error: fn() -> AppError,
}

impl FailingGenerator {
    pub fn new(make_error: fn() -> AppError) -> Self {
        Self { make_error }
    }
}

#[async_trait]
impl PlanGenerator for FailingGenerator {
    fn name(&self) -> &str {
        "failing"
    }

    async fn complete(&self, _context: &PlanPromptContext) -> AppResult<Value> {
        Err((self.make_error)())
    }
}

// ============================================================================
// Failing stores
// ============================================================================

/// Plan store whose writes always fail
pub struct BrokenPlanStore;

#[async_trait]
impl PlanStore for BrokenPlanStore {
    async fn find_plan(&self, _plan_id: &str) -> AppResult<Option<StoredPlan>> {
        Ok(None)
    }

    async fn save_plan(&self, _plan: &StoredPlan) -> AppResult<()> {
        Err(AppError::persistence(io::Error::other(
            "connection reset by peer at 10.0.0.12:5432",
        )))
    }
}
