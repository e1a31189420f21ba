// ABOUTME: Configuration management for the plan generation service
// ABOUTME: Environment-driven service settings plus re-exports of the engine configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! - **Environment**: Service settings from environment variables
//! - **Intelligence**: Engine coefficient tables (re-exported from `ayurdiet-intelligence`)

/// Environment and service configuration
pub mod environment;

pub use ayurdiet_intelligence::config::{ConfigError, IntelligenceConfig};
pub use environment::{GeneratorConfig, PlannerConfig};
