// ABOUTME: Plan generation orchestrator: profile and recipe loading, scoring, generation and validation
// ABOUTME: Falls back to deterministic assembly when the external generator fails, and handles regeneration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeSet;
use std::mem;
use std::sync::Arc;

use ayurdiet_core::models::{
    GeneratedPlan, ModificationEntry, ParameterChange, PatientProfile, PlanPreferences,
    PlanRevision, RawGeneratedPlan, StoredPlan,
};
use ayurdiet_intelligence::assembler::{assemble_with_context, PlanContext};
use ayurdiet_intelligence::nutrition_calculator::compute_requirements;
use ayurdiet_intelligence::plan_validator::{
    convert_raw_plan, recompute_totals, validate_plan_references, RecipePool,
};
use ayurdiet_intelligence::suitability::{score_and_filter, ScoredRecipe};
use chrono::Utc;
use serde_json::Value;
use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::config::PlannerConfig;
use crate::errors::{AppError, AppResult};
use crate::generator::{PlanGenerator, PlanPromptContext};
use crate::stores::{PatientStore, PlanStore, RecipeFilter, RecipeStore};

/// Parameters of a regeneration
#[derive(Debug, Clone, Default)]
pub struct RegenerationRequest {
    /// Preferences overlaid on the stored ones
    pub overrides: PlanPreferences,
    /// Free-text reason recorded in the modification log
    pub reason: String,
    /// Keep the stored plan's duration
    pub keep_duration: bool,
    /// Keep the stored plan's daily calorie target
    pub keep_target_calories: bool,
}

/// Orchestrates one plan generation over the store and generator collaborators
pub struct PlanGenerationService {
    patients: Arc<dyn PatientStore>,
    recipes: Arc<dyn RecipeStore>,
    plans: Arc<dyn PlanStore>,
    generator: Option<Arc<dyn PlanGenerator>>,
    config: Arc<PlannerConfig>,
}

impl PlanGenerationService {
    /// Create a service that always assembles deterministically
    #[must_use]
    pub fn new(
        patients: Arc<dyn PatientStore>,
        recipes: Arc<dyn RecipeStore>,
        plans: Arc<dyn PlanStore>,
        config: Arc<PlannerConfig>,
    ) -> Self {
        Self {
            patients,
            recipes,
            plans,
            generator: None,
            config,
        }
    }

    /// Attach an external plan generator
    #[must_use]
    pub fn with_generator(mut self, generator: Arc<dyn PlanGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Load a patient profile
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` for an unknown patient, or the store's error
    pub async fn load_patient(&self, patient_id: &str) -> AppResult<PatientProfile> {
        self.patients
            .find_patient(patient_id)
            .await?
            .ok_or_else(|| AppError::not_found("Patient").with_resource_id(patient_id))
    }

    /// Score the active recipe pool for a patient
    ///
    /// # Errors
    ///
    /// Propagates recipe store failures
    pub async fn score_pool(
        &self,
        profile: &PatientProfile,
        preferences: &PlanPreferences,
    ) -> AppResult<Vec<ScoredRecipe>> {
        let candidates = self
            .recipes
            .find_active_recipes(&RecipeFilter::default())
            .await?;
        Ok(score_and_filter(
            &candidates,
            profile,
            preferences,
            &self.config.intelligence,
        ))
    }

    /// Generate a validated meal plan without storing it
    ///
    /// # Errors
    ///
    /// - `RESOURCE_NOT_FOUND` for an unknown patient
    /// - `INVALID_INPUT` for a duration outside 1..=365
    /// - `INVALID_PROFILE` when the profile lacks usable vitals
    /// - `INSUFFICIENT_CANDIDATES` when a meal slot has no suitable recipe
    /// - store failures as reported by the collaborator
    #[instrument(skip(self, preferences), fields(patient_id = %patient_id))]
    pub async fn generate(
        &self,
        patient_id: &str,
        preferences: &PlanPreferences,
    ) -> AppResult<GeneratedPlan> {
        let profile = self.load_patient(patient_id).await?;

        let mut preferences = preferences.clone();
        preferences.duration = preferences
            .duration
            .or(Some(self.config.default_duration_days));
        let duration_days = preferences.duration_days()?;

        if !preferences.extensions.is_empty() {
            debug!(extensions = ?preferences.extensions, "Ignoring unrecognized preferences");
        }

        let intelligence = &self.config.intelligence;
        let requirements = compute_requirements(&profile, &preferences, intelligence)?;
        let scored = self.score_pool(&profile, &preferences).await?;
        let context = PlanContext::new(&profile, &preferences, &requirements, duration_days);

        let mut plan = match &self.generator {
            Some(generator) => match self
                .generate_external(generator.as_ref(), &context, &scored)
                .await
            {
                Ok(plan) => plan,
                Err(error) if error.code.triggers_fallback() => {
                    warn!(
                        generator = %generator.name(),
                        code = %error.code.kind(),
                        error = %error.message,
                        "External generator failed, falling back to deterministic assembly"
                    );
                    assemble_with_context(&scored, &context, intelligence)?
                }
                Err(error) => return Err(error),
            },
            None => assemble_with_context(&scored, &context, intelligence)?,
        };

        validate_plan_references(&plan, &RecipePool::from_scored(&scored))?;
        recompute_totals(&mut plan);

        info!(
            source = ?plan.source,
            duration = plan.duration,
            target_calories = plan.target_calories,
            "Generated meal plan"
        );
        Ok(plan)
    }

    async fn generate_external(
        &self,
        generator: &dyn PlanGenerator,
        context: &PlanContext<'_>,
        scored: &[ScoredRecipe],
    ) -> AppResult<GeneratedPlan> {
        let intelligence = &self.config.intelligence;
        let prompt = PlanPromptContext::build(context, scored, intelligence);
        let limit = self.config.generator.timeout;

        let document = timeout(limit, generator.complete(&prompt))
            .await
            .map_err(|_| AppError::generator_timeout(limit.as_secs()))??;

        let raw: RawGeneratedPlan = serde_json::from_value(document).map_err(|e| {
            AppError::generator_malformed(format!("Plan document does not match the contract: {e}"))
        })?;

        convert_raw_plan(&raw, &RecipePool::from_scored(scored), context, intelligence)
    }

    /// Generate a plan and store it as revision 1
    ///
    /// # Errors
    ///
    /// Everything [`Self::generate`] returns, plus plan store failures
    pub async fn create_plan(
        &self,
        patient_id: &str,
        preferences: &PlanPreferences,
    ) -> AppResult<StoredPlan> {
        let plan = self.generate(patient_id, preferences).await?;
        let now = Utc::now();

        let stored = StoredPlan {
            id: Uuid::new_v4().to_string(),
            patient_id: patient_id.to_owned(),
            preferences: preferences.clone(),
            plan,
            revision: 1,
            history: Vec::new(),
            modifications: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        self.plans.save_plan(&stored).await?;

        info!(plan_id = %stored.id, "Stored meal plan");
        Ok(stored)
    }

    /// Regenerate a stored plan with overridden preferences
    ///
    /// The superseded plan moves into the history and a modification entry
    /// records the changed parameters.
    ///
    /// # Errors
    ///
    /// `RESOURCE_NOT_FOUND` for an unknown plan, everything
    /// [`Self::generate`] returns, plus plan store failures
    #[instrument(skip(self, request), fields(plan_id = %plan_id))]
    pub async fn regenerate(
        &self,
        plan_id: &str,
        request: &RegenerationRequest,
    ) -> AppResult<StoredPlan> {
        let mut stored = self
            .plans
            .find_plan(plan_id)
            .await?
            .ok_or_else(|| AppError::not_found("Plan").with_resource_id(plan_id))?;

        let mut preferences = stored.preferences.merged_with(&request.overrides);
        if request.keep_duration {
            preferences.duration = Some(stored.plan.duration);
        }
        if request.keep_target_calories {
            preferences.target_calories = Some(stored.plan.target_calories);
        }

        let plan = self.generate(&stored.patient_id, &preferences).await?;
        let changed = diff_preferences(&stored.preferences, &preferences)?;
        let now = Utc::now();

        let previous_preferences = mem::replace(&mut stored.preferences, preferences);
        let previous_plan = mem::replace(&mut stored.plan, plan);
        stored.history.push(PlanRevision {
            revision: stored.revision,
            preferences: previous_preferences,
            plan: previous_plan,
            superseded_at: now,
        });
        stored.revision += 1;
        stored.modifications.push(ModificationEntry {
            timestamp: now,
            reason: request.reason.clone(),
            revision: stored.revision,
            changed,
        });
        stored.updated_at = now;

        self.plans.save_plan(&stored).await?;

        info!(
            revision = stored.revision,
            changes = stored.modifications.last().map_or(0, |entry| entry.changed.len()),
            "Regenerated meal plan"
        );
        Ok(stored)
    }
}

/// Field-level difference between two preference sets
///
/// Fields are compared on their JSON form; a field absent on one side is
/// reported as `null`. Changes are ordered by field name.
///
/// # Errors
///
/// Returns `SERIALIZATION_ERROR` if the preferences cannot be serialized
pub fn diff_preferences(
    from: &PlanPreferences,
    to: &PlanPreferences,
) -> AppResult<Vec<ParameterChange>> {
    let from = serde_json::to_value(from)?;
    let to = serde_json::to_value(to)?;
    let (Some(from), Some(to)) = (from.as_object(), to.as_object()) else {
        return Err(AppError::internal("Preferences did not serialize to objects"));
    };

    let fields: BTreeSet<&String> = from.keys().chain(to.keys()).collect();
    Ok(fields
        .into_iter()
        .filter_map(|field| {
            let old = from.get(field).cloned().unwrap_or(Value::Null);
            let new = to.get(field).cloned().unwrap_or(Value::Null);
            (old != new).then(|| ParameterChange {
                field: field.clone(),
                from: old,
                to: new,
            })
        })
        .collect())
}
