// ABOUTME: Planning commands for ayurdiet-cli
// ABOUTME: Handles requirements, score and generate against a seeded in-memory store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use ayurdiet::config::PlannerConfig;
use ayurdiet::generator::LlmPlanGenerator;
use ayurdiet::services::PlanGenerationService;
use ayurdiet::stores::{MemoryStore, RecipeFilter, RecipeStore};
use ayurdiet_core::models::PlanRequest;
use ayurdiet_intelligence::nutrition_calculator::compute_requirements;
use ayurdiet_intelligence::suitability::score_candidates;
use serde_json::Value;
use tokio::fs;
use tracing::info;

use crate::helpers::display::print_json;
use crate::helpers::parse::preferences_from_args;
use crate::PlanArgs;

async fn build_service(
    seed: &Path,
    config: PlannerConfig,
) -> Result<(PlanGenerationService, Arc<MemoryStore>)> {
    let store = Arc::new(MemoryStore::from_seed_file(seed).await?);
    let generator = if config.generator.enabled {
        Some(LlmPlanGenerator::from_config(&config.generator)?)
    } else {
        None
    };

    let mut service = PlanGenerationService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        Arc::new(config),
    );
    if let Some(generator) = generator {
        info!("External plan generator enabled");
        service = service.with_generator(Arc::new(generator));
    }
    Ok((service, store))
}

/// Print the daily nutrition requirements
pub async fn requirements(seed: &Path, config: PlannerConfig, args: &PlanArgs) -> Result<()> {
    let preferences = preferences_from_args(args)?;
    let (service, _) = build_service(seed, config).await?;

    let profile = service.load_patient(&args.patient).await?;
    let requirements =
        compute_requirements(&profile, &preferences, &service.config().intelligence)?;
    print_json(&requirements)
}

/// Print recipe suitability scores, best first
pub async fn score(seed: &Path, config: PlannerConfig, args: &PlanArgs, all: bool) -> Result<()> {
    let preferences = preferences_from_args(args)?;
    let (service, store) = build_service(seed, config).await?;

    let profile = service.load_patient(&args.patient).await?;
    let scored = if all {
        let candidates = store.find_active_recipes(&RecipeFilter::default()).await?;
        score_candidates(
            &candidates,
            &profile,
            &preferences,
            &service.config().intelligence,
        )
    } else {
        service.score_pool(&profile, &preferences).await?
    };

    info!(recipes = scored.len(), "Scored recipes");
    print_json(&scored)
}

/// Generate and print a meal plan
pub async fn generate(seed: &Path, config: PlannerConfig, args: &PlanArgs) -> Result<()> {
    let preferences = preferences_from_args(args)?;
    let (service, _) = build_service(seed, config).await?;

    let plan = service.generate(&args.patient, &preferences).await?;
    print_json(&plan)
}

/// Generate and print a meal plan described by a JSON request file
pub async fn generate_from_request(seed: &Path, config: PlannerConfig, file: &Path) -> Result<()> {
    let contents = fs::read_to_string(file)
        .await
        .with_context(|| format!("Cannot read request file {}", file.display()))?;
    let document: Value = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid request file {}", file.display()))?;
    let request = PlanRequest::from_json(document)?;
    let (service, _) = build_service(seed, config).await?;

    let plan = service
        .generate(&request.patient_id, &request.preferences)
        .await?;
    print_json(&plan)
}
