// ABOUTME: Collaborator contracts for patient profiles, the recipe corpus and stored plans
// ABOUTME: Async store traits, the active-recipe filter and the in-memory implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Stores
//!
//! The engine never owns persistent data. Patient profiles and recipes are
//! read through [`PatientStore`] and [`RecipeStore`]; plans are written
//! through [`PlanStore`] only after they are fully validated. Implementations
//! report their own failures as `PERSISTENCE_ERROR`.

mod memory;

pub use memory::{MemoryStore, SeedData};

use async_trait::async_trait;
use ayurdiet_core::models::{MealType, PatientProfile, RecipeCandidate, StoredPlan};

use crate::errors::AppResult;

/// Selection of recipes eligible for a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    /// Restrict to recipes usable in any of these slots (empty means all)
    pub meal_types: Vec<MealType>,
    /// Restrict to a cuisine tag (case-insensitive)
    pub cuisine: Option<String>,
    /// Also return non-public recipes
    pub include_private: bool,
}

impl RecipeFilter {
    /// Whether a recipe passes the filter; inactive recipes never pass
    #[must_use]
    pub fn matches(&self, recipe: &RecipeCandidate) -> bool {
        if !recipe.is_active || !(recipe.is_public || self.include_private) {
            return false;
        }
        if !self.meal_types.is_empty()
            && !self
                .meal_types
                .iter()
                .any(|meal_type| recipe.applies_to(*meal_type))
        {
            return false;
        }
        self.cuisine.as_deref().is_none_or(|cuisine| {
            recipe
                .cuisine_tags
                .iter()
                .any(|tag| tag.eq_ignore_ascii_case(cuisine))
        })
    }
}

/// Patient profile source
#[async_trait]
pub trait PatientStore: Send + Sync {
    /// Look up a patient profile
    async fn find_patient(&self, patient_id: &str) -> AppResult<Option<PatientProfile>>;
}

/// Recipe corpus source
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Active recipes matching the filter, ordered by id
    async fn find_active_recipes(&self, filter: &RecipeFilter) -> AppResult<Vec<RecipeCandidate>>;
}

/// Plan persistence for regeneration
#[async_trait]
pub trait PlanStore: Send + Sync {
    /// Look up a stored plan
    async fn find_plan(&self, plan_id: &str) -> AppResult<Option<StoredPlan>>;

    /// Insert or replace a stored plan
    async fn save_plan(&self, plan: &StoredPlan) -> AppResult<()>;
}
