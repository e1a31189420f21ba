// ABOUTME: In-memory implementation of the patient, recipe and plan stores
// ABOUTME: Backs the CLI and tests; loads patients and recipes from a JSON seed file
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use async_trait::async_trait;
use ayurdiet_core::models::{PatientProfile, RecipeCandidate, StoredPlan};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::info;

use super::{PatientStore, PlanStore, RecipeFilter, RecipeStore};
use crate::errors::{AppError, AppResult};

/// Seed file contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    /// Patient profiles
    #[serde(default)]
    pub patients: Vec<PatientProfile>,
    /// Recipe corpus
    #[serde(default)]
    pub recipes: Vec<RecipeCandidate>,
}

/// Store holding everything in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    patients: RwLock<HashMap<String, PatientProfile>>,
    // Keyed by id so listing order is stable
    recipes: RwLock<BTreeMap<String, RecipeCandidate>>,
    plans: RwLock<HashMap<String, StoredPlan>>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from seed data
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` if two recipes share an id
    pub fn from_seed(seed: SeedData) -> AppResult<Self> {
        let mut recipes = BTreeMap::new();
        for recipe in seed.recipes {
            let id = recipe.id.clone();
            if recipes.insert(id.clone(), recipe).is_some() {
                return Err(AppError::invalid_input(format!(
                    "Duplicate recipe id '{id}' in seed data"
                ))
                .with_resource_id(id));
            }
        }
        let patients = seed
            .patients
            .into_iter()
            .map(|patient| (patient.id.clone(), patient))
            .collect();

        Ok(Self {
            patients: RwLock::new(patients),
            recipes: RwLock::new(recipes),
            plans: RwLock::new(HashMap::new()),
        })
    }

    /// Load a JSON seed file (`{"patients": [...], "recipes": [...]}`)
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_ERROR` if the file cannot be read and `INVALID_INPUT`
    /// if it does not parse or contains duplicate recipe ids
    pub async fn from_seed_file(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path).await.map_err(|e| {
            AppError::config(format!("Cannot read seed file {}", path.display())).with_source(e)
        })?;
        let seed: SeedData = serde_json::from_str(&contents).map_err(|e| {
            AppError::invalid_input(format!("Invalid seed file {}: {e}", path.display()))
        })?;

        info!(
            path = %path.display(),
            patients = seed.patients.len(),
            recipes = seed.recipes.len(),
            "Loaded seed data"
        );
        Self::from_seed(seed)
    }

    /// Insert or replace a patient
    pub async fn insert_patient(&self, patient: PatientProfile) {
        self.patients
            .write()
            .await
            .insert(patient.id.clone(), patient);
    }

    /// Insert or replace a recipe
    pub async fn insert_recipe(&self, recipe: RecipeCandidate) {
        self.recipes.write().await.insert(recipe.id.clone(), recipe);
    }

    /// Number of stored plans
    pub async fn plan_count(&self) -> usize {
        self.plans.read().await.len()
    }
}

#[async_trait]
impl PatientStore for MemoryStore {
    async fn find_patient(&self, patient_id: &str) -> AppResult<Option<PatientProfile>> {
        Ok(self.patients.read().await.get(patient_id).cloned())
    }
}

#[async_trait]
impl RecipeStore for MemoryStore {
    async fn find_active_recipes(&self, filter: &RecipeFilter) -> AppResult<Vec<RecipeCandidate>> {
        Ok(self
            .recipes
            .read()
            .await
            .values()
            .filter(|recipe| filter.matches(recipe))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl PlanStore for MemoryStore {
    async fn find_plan(&self, plan_id: &str) -> AppResult<Option<StoredPlan>> {
        Ok(self.plans.read().await.get(plan_id).cloned())
    }

    async fn save_plan(&self, plan: &StoredPlan) -> AppResult<()> {
        self.plans
            .write()
            .await
            .insert(plan.id.clone(), plan.clone());
        Ok(())
    }
}
