// ABOUTME: Integration tests for environment-driven planner and engine configuration
// ABOUTME: Runs serially because each test mutates process environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::env;
use std::time::Duration;

use ayurdiet::config::PlannerConfig;
use ayurdiet_intelligence::config::GoalAdjustmentMode;
use serial_test::serial;

const VARS: [&str; 7] = [
    "AYURDIET_GENERATOR_ENABLED",
    "AYURDIET_GENERATOR_TIMEOUT_SECS",
    "AYURDIET_DEFAULT_DURATION_DAYS",
    "AYURDIET_LLM_API_KEY",
    "AYURDIET_LLM_TEMPERATURE",
    "AYURDIET_GOAL_MODE",
    "AYURDIET_WEIGHT_DOSHA",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();
    let config = PlannerConfig::from_env().unwrap();

    assert!(!config.generator.enabled);
    assert_eq!(config.generator.timeout, Duration::from_secs(30));
    assert!(config.generator.api_key.is_none());
    assert_eq!(config.default_duration_days, 7);
    assert_eq!(
        config.intelligence.nutrition.goals.mode,
        GoalAdjustmentMode::Additive
    );
}

#[test]
#[serial]
fn test_generator_settings_from_environment() {
    clear_env();
    env::set_var("AYURDIET_GENERATOR_ENABLED", "true");
    env::set_var("AYURDIET_GENERATOR_TIMEOUT_SECS", "5");
    env::set_var("AYURDIET_LLM_API_KEY", "");

    let config = PlannerConfig::from_env().unwrap();
    clear_env();

    assert!(config.generator.enabled);
    assert_eq!(config.generator.timeout, Duration::from_secs(5));
    // Empty keys count as absent
    assert!(config.generator.api_key.is_none());
}

#[test]
#[serial]
fn test_engine_overrides_from_environment() {
    clear_env();
    env::set_var("AYURDIET_GOAL_MODE", "Multiplicative");

    let config = PlannerConfig::from_env().unwrap();
    clear_env();

    assert_eq!(
        config.intelligence.nutrition.goals.mode,
        GoalAdjustmentMode::Multiplicative
    );
}

#[test]
#[serial]
fn test_invalid_values_are_rejected() {
    let cases = [
        ("AYURDIET_GENERATOR_TIMEOUT_SECS", "soon"),
        ("AYURDIET_GENERATOR_TIMEOUT_SECS", "0"),
        ("AYURDIET_DEFAULT_DURATION_DAYS", "0"),
        ("AYURDIET_DEFAULT_DURATION_DAYS", "400"),
        ("AYURDIET_LLM_TEMPERATURE", "3.5"),
        ("AYURDIET_GOAL_MODE", "aggressive"),
        // Scoring weights must still sum to 1.0
        ("AYURDIET_WEIGHT_DOSHA", "0.5"),
    ];

    for (var, value) in cases {
        clear_env();
        env::set_var(var, value);
        let result = PlannerConfig::from_env();
        clear_env();
        assert!(result.is_err(), "{var}={value} should be rejected");
    }
}
