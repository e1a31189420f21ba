// ABOUTME: Domain service layer orchestrating the diet plan pipeline over its collaborators
// ABOUTME: Hosts plan generation, persistence and regeneration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Services sit between entry points (the CLI, tests) and the pure engine in
//! `ayurdiet-intelligence`. They own the async collaborator calls and the
//! generator fallback policy; every calculation is delegated to the engine.

/// Plan generation, storage and regeneration
pub mod plan_generation;

pub use plan_generation::{diff_preferences, PlanGenerationService, RegenerationRequest};
