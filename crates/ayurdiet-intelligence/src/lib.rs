// ABOUTME: Diet-plan intelligence engine: requirements math, recipe scoring, plan assembly
// ABOUTME: Pure functions over core models, parameterized by an explicit IntelligenceConfig
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Ayurdiet Intelligence
//!
//! The computational core of plan generation. Nothing in this crate performs
//! I/O or holds state between calls; the orchestrator in the root crate loads
//! inputs and hands them to these functions together with an
//! [`IntelligenceConfig`](config::IntelligenceConfig).
//!
//! ## Modules
//!
//! - **config**: Tunable coefficient tables with environment overrides
//! - **`nutrition_calculator`**: BMR, TDEE, calorie target, macros, hydration
//! - **suitability**: Hard filter and weighted recipe scoring
//! - **assembler**: Deterministic multi-day plan assembly
//! - **`plan_validator`**: Reference checks and bottom-up nutrition recompute

/// Coefficient tables and validation
pub mod config;

/// Word-aware ingredient keyword matching
pub mod keywords;

/// Nutrition requirement calculation
pub mod nutrition_calculator;

/// Recipe suitability scoring
pub mod suitability;

/// Deterministic meal plan assembly
pub mod assembler;

/// Plan reference validation and total recomputation
pub mod plan_validator;

pub use assembler::{assemble, assemble_with_context, PlanContext};
pub use config::IntelligenceConfig;
pub use nutrition_calculator::compute_requirements;
pub use plan_validator::{
    convert_raw_plan, recompute_totals, validate_plan_references, validate_references, RecipePool,
};
pub use suitability::{score_and_filter, score_candidates, ScoreBreakdown, ScoredRecipe};
