// ABOUTME: Integration tests for the in-memory stores and JSON seed loading
// ABOUTME: Covers seed file errors, duplicate ids, recipe filtering and end-to-end generation from seed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ayurdiet::errors::ErrorCode;
use ayurdiet::stores::{MemoryStore, PatientStore, RecipeFilter, RecipeStore, SeedData};
use ayurdiet_core::models::{MealType, PlanPreferences, RecipeCandidate};
use tempfile::TempDir;

use common::{full_pool, kapha_patient, recipe, service_with, start_date};

fn bundled_seed() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data").join("seed.json")
}

#[tokio::test]
async fn test_bundled_seed_loads() {
    let store = MemoryStore::from_seed_file(&bundled_seed()).await.unwrap();

    let patient = store.find_patient("p-tridosha-01").await.unwrap().unwrap();
    assert_eq!(patient.allergies.len(), 1);

    let recipes = store
        .find_active_recipes(&RecipeFilter::default())
        .await
        .unwrap();
    assert_eq!(recipes.len(), 16);
    let ids: Vec<&str> = recipes.iter().map(|r| r.id.as_str()).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
}

#[tokio::test]
async fn test_every_seeded_patient_gets_a_week() {
    let store = Arc::new(MemoryStore::from_seed_file(&bundled_seed()).await.unwrap());
    let service = service_with(&store);
    let preferences = PlanPreferences {
        start_date: Some(start_date()),
        ..PlanPreferences::default()
    };

    for patient_id in ["p-vata-01", "p-pitta-01", "p-tridosha-01"] {
        let plan = service.generate(patient_id, &preferences).await.unwrap();
        assert_eq!(plan.daily_plans.len(), 7, "{patient_id}");
    }
}

#[tokio::test]
async fn test_missing_seed_file_is_config_error() {
    let dir = TempDir::new().unwrap();
    let error = MemoryStore::from_seed_file(&dir.path().join("absent.json"))
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ConfigError);
}

#[tokio::test]
async fn test_unparseable_seed_file_is_invalid_input() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("seed.json");
    fs::write(&path, r#"{"patients": [{"id": 7}]}"#).unwrap();

    let error = MemoryStore::from_seed_file(&path).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
}

#[tokio::test]
async fn test_seed_file_round_trips_through_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("seed.json");
    let seed = SeedData {
        patients: vec![kapha_patient()],
        recipes: full_pool(),
    };
    fs::write(&path, serde_json::to_string_pretty(&seed).unwrap()).unwrap();

    let store = MemoryStore::from_seed_file(&path).await.unwrap();
    assert!(store.find_patient("p-kapha").await.unwrap().is_some());
}

#[test]
fn test_duplicate_recipe_ids_are_rejected() {
    let seed = SeedData {
        patients: Vec::new(),
        recipes: vec![
            recipe("r-1", &[MealType::Lunch], 500.0),
            recipe("r-1", &[MealType::Dinner], 400.0),
        ],
    };

    let error = MemoryStore::from_seed(seed).unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
    assert_eq!(error.context.resource_id.as_deref(), Some("r-1"));
}

#[tokio::test]
async fn test_recipe_filter() {
    let store = MemoryStore::new();
    let mut inactive = recipe("r-inactive", &[MealType::Lunch], 500.0);
    inactive.is_active = false;
    let mut private = recipe("r-private", &[MealType::Lunch], 500.0);
    private.is_public = false;
    let mut thai = recipe("r-thai", &[MealType::Dinner], 500.0);
    thai.cuisine_tags = vec!["Thai".to_owned()];

    for candidate in [inactive, private, thai, recipe("r-snack", &[MealType::Snack], 150.0)] {
        store.insert_recipe(candidate).await;
    }

    let ids = |recipes: Vec<RecipeCandidate>| -> Vec<String> {
        recipes.into_iter().map(|r| r.id).collect()
    };

    let all = store
        .find_active_recipes(&RecipeFilter::default())
        .await
        .unwrap();
    assert_eq!(ids(all), vec!["r-snack", "r-thai"]);

    let with_private = RecipeFilter {
        include_private: true,
        ..RecipeFilter::default()
    };
    let found = store.find_active_recipes(&with_private).await.unwrap();
    assert_eq!(ids(found), vec!["r-private", "r-snack", "r-thai"]);

    let thai_dinners = RecipeFilter {
        meal_types: vec![MealType::Dinner],
        cuisine: Some("thai".to_owned()),
        include_private: false,
    };
    let found = store.find_active_recipes(&thai_dinners).await.unwrap();
    assert_eq!(ids(found), vec!["r-thai"]);
}
