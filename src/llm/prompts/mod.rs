// ABOUTME: System prompts for LLM interactions loaded at compile time
// ABOUTME: Provides the meal plan generator instructions and JSON output contract
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # System Prompts
//!
//! Prompts are loaded at compile time from markdown files for easy maintenance.

/// Meal plan generator system prompt
///
/// Describes the candidate-only rule, the portion arithmetic and the exact
/// JSON shape the generator must return.
pub const PLAN_GENERATOR_SYSTEM_PROMPT: &str = include_str!("plan_generator_system.md");

/// Get the system prompt for the plan generator
#[must_use]
pub const fn plan_generator_system_prompt() -> &'static str {
    PLAN_GENERATOR_SYSTEM_PROMPT
}
