// ABOUTME: Criterion benchmarks for recipe scoring and deterministic plan assembly
// ABOUTME: Measures scoring throughput over synthetic corpora and 7- to 365-day assembly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the plan engine.
//!
//! Scoring runs over synthetic corpora of increasing size; assembly runs over
//! a fixed scored pool for plan lengths from a week to a year.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]

use std::collections::BTreeSet;

use ayurdiet_core::models::{
    ActivityLevel, BiologicalSex, Constitution, ConstitutionScores, CookingSkill, DietType,
    Difficulty, Dosha, DoshaEffect, DoshaEffects, Ingredient, MealFrequency, MealType,
    NutritionProfile, PatientProfile, PlanPreferences, RecipeCandidate,
};
use ayurdiet_intelligence::assembler::assemble;
use ayurdiet_intelligence::config::IntelligenceConfig;
use ayurdiet_intelligence::nutrition_calculator::compute_requirements;
use ayurdiet_intelligence::suitability::{score_and_filter, score_candidates};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

const INGREDIENTS: [&str; 8] = [
    "basmati rice",
    "split moong dal",
    "ghee",
    "whole wheat flour",
    "coconut milk",
    "bottle gourd",
    "paneer",
    "fox nuts",
];

const EFFECTS: [DoshaEffect; 3] = [
    DoshaEffect::Decrease,
    DoshaEffect::Neutral,
    DoshaEffect::Increase,
];

fn bench_patient() -> PatientProfile {
    PatientProfile {
        id: "bench-patient".to_owned(),
        name: "Benchmark Patient".to_owned(),
        age: Some(38),
        biological_sex: BiologicalSex::Female,
        weight_kg: Some(64.0),
        height_cm: Some(165.0),
        primary_constitution: Constitution::PittaKapha,
        constitution_scores: ConstitutionScores {
            vata: 15,
            pitta: 45,
            kapha: 40,
        },
        diet_type: DietType::Vegetarian,
        health_concerns: BTreeSet::from(["diabetes".to_owned(), "acidity".to_owned()]),
        allergies: BTreeSet::from(["peanut".to_owned()]),
        activity_level: ActivityLevel::LightlyActive,
        meal_frequency: MealFrequency::Three,
        cooking_skill: CookingSkill::Intermediate,
        preferred_cuisines: BTreeSet::new(),
    }
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn generate_recipes(count: usize) -> Vec<RecipeCandidate> {
    (0..count)
        .map(|index| {
            let meal_type = MealType::ALL[index % MealType::ALL.len()];
            let calories = 120.0 + ((index * 37) % 700) as f64;
            let dosha_effect = Dosha::ALL
                .iter()
                .enumerate()
                .fold(DoshaEffects::default(), |effects, (offset, dosha)| {
                    effects.with(*dosha, EFFECTS[(index + offset) % EFFECTS.len()])
                });

            RecipeCandidate {
                id: format!("bench-{index:05}"),
                name: format!("Benchmark Recipe {index}"),
                meal_types: vec![meal_type],
                cuisine_tags: vec!["indian".to_owned()],
                ingredients: vec![
                    Ingredient {
                        name: INGREDIENTS[index % INGREDIENTS.len()].to_owned(),
                        quantity: "1 cup".to_owned(),
                    },
                    Ingredient {
                        name: INGREDIENTS[(index * 3 + 1) % INGREDIENTS.len()].to_owned(),
                        quantity: "2 tbsp".to_owned(),
                    },
                ],
                nutrition: NutritionProfile {
                    calories,
                    protein_g: calories * 0.05,
                    carbs_g: calories * 0.12,
                    fat_g: calories * 0.03,
                    fiber_g: calories * 0.01,
                },
                dosha_effect,
                health_benefits: if index % 5 == 0 {
                    vec!["diabetes management".to_owned()]
                } else {
                    Vec::new()
                },
                preparation_minutes: 10,
                cooking_minutes: ((index * 13) % 70) as u32,
                difficulty: Difficulty::default(),
                is_active: true,
                is_public: true,
            }
        })
        .collect()
}

/// Benchmark hard filtering and scoring over corpora of increasing size
fn bench_scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("suitability_scoring");
    let config = IntelligenceConfig::default();
    let profile = bench_patient();
    let preferences = PlanPreferences::default();

    for count in [100_usize, 1_000, 5_000] {
        let recipes = generate_recipes(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &recipes, |b, recipes| {
            b.iter(|| {
                score_candidates(
                    black_box(recipes),
                    black_box(&profile),
                    &preferences,
                    &config,
                )
            });
        });
    }

    group.finish();
}

/// Benchmark deterministic assembly for plan lengths from a week to a year
fn bench_assembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan_assembly");
    let config = IntelligenceConfig::default();
    let profile = bench_patient();
    let preferences = PlanPreferences::default();
    let recipes = generate_recipes(400);
    let scored = score_and_filter(&recipes, &profile, &preferences, &config);
    let Ok(requirements) = compute_requirements(&profile, &preferences, &config) else {
        return;
    };

    for days in [7_u32, 30, 90, 365] {
        group.throughput(Throughput::Elements(u64::from(days)));
        group.bench_with_input(BenchmarkId::from_parameter(days), &days, |b, days| {
            b.iter(|| {
                assemble(
                    black_box(&scored),
                    &profile,
                    &preferences,
                    &requirements,
                    *days,
                    &config,
                )
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_scoring, bench_assembly);
criterion_main!(benches);
