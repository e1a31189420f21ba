// ABOUTME: Environment configuration for the plan generation service and its collaborators
// ABOUTME: Generator switch, LLM endpoint settings, timeouts, default duration and engine tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration for the plan generation service

use std::env;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use ayurdiet_core::constants::limits::{
    DEFAULT_PLAN_DURATION_DAYS, MAX_PLAN_DURATION_DAYS, MIN_PLAN_DURATION_DAYS,
};
use ayurdiet_intelligence::config::IntelligenceConfig;
use tracing::info;

use crate::logging::LoggingConfig;

/// Default generator timeout
pub const DEFAULT_GENERATOR_TIMEOUT_SECS: u64 = 30;

/// Default OpenAI-compatible endpoint (local Ollama)
pub const DEFAULT_LLM_BASE_URL: &str = "http://localhost:11434/v1";

/// Default model for plan generation
pub const DEFAULT_LLM_MODEL: &str = "qwen2.5:14b-instruct";

/// External plan generator settings
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Try the external generator before deterministic assembly
    pub enabled: bool,
    /// Base URL of the OpenAI-compatible API
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// Bearer token, if the endpoint needs one
    pub api_key: Option<String>,
    /// Upper bound for one generator call
    pub timeout: Duration,
    /// Sampling temperature
    pub temperature: f32,
    /// Completion token limit
    pub max_tokens: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: DEFAULT_LLM_BASE_URL.to_owned(),
            model: DEFAULT_LLM_MODEL.to_owned(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_GENERATOR_TIMEOUT_SECS),
            temperature: 0.2,
            max_tokens: 8192,
        }
    }
}

/// Top-level service configuration
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Duration used when a request omits it
    pub default_duration_days: u32,
    /// External generator settings
    pub generator: GeneratorConfig,
    /// Engine coefficient tables
    pub intelligence: IntelligenceConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            default_duration_days: DEFAULT_PLAN_DURATION_DAYS,
            generator: GeneratorConfig::default(),
            intelligence: IntelligenceConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl PlannerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable fails to parse or a value is out of range
    pub fn from_env() -> Result<Self> {
        let defaults = GeneratorConfig::default();

        let generator = GeneratorConfig {
            enabled: env_var_or("AYURDIET_GENERATOR_ENABLED", "false")
                .parse()
                .context("Invalid AYURDIET_GENERATOR_ENABLED value")?,
            base_url: env_var_or("AYURDIET_LLM_BASE_URL", DEFAULT_LLM_BASE_URL),
            model: env_var_or("AYURDIET_LLM_MODEL", DEFAULT_LLM_MODEL),
            api_key: env::var("AYURDIET_LLM_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
            timeout: Duration::from_secs(
                env_var_or(
                    "AYURDIET_GENERATOR_TIMEOUT_SECS",
                    &DEFAULT_GENERATOR_TIMEOUT_SECS.to_string(),
                )
                .parse()
                .context("Invalid AYURDIET_GENERATOR_TIMEOUT_SECS value")?,
            ),
            temperature: env_var_or("AYURDIET_LLM_TEMPERATURE", &defaults.temperature.to_string())
                .parse()
                .context("Invalid AYURDIET_LLM_TEMPERATURE value")?,
            max_tokens: env_var_or("AYURDIET_LLM_MAX_TOKENS", &defaults.max_tokens.to_string())
                .parse()
                .context("Invalid AYURDIET_LLM_MAX_TOKENS value")?,
        };

        let config = Self {
            default_duration_days: env_var_or(
                "AYURDIET_DEFAULT_DURATION_DAYS",
                &DEFAULT_PLAN_DURATION_DAYS.to_string(),
            )
            .parse()
            .context("Invalid AYURDIET_DEFAULT_DURATION_DAYS value")?,
            generator,
            intelligence: IntelligenceConfig::load()
                .context("Invalid engine configuration")?,
            logging: LoggingConfig::from_env(),
        };

        config.validate()?;

        info!(
            generator_enabled = config.generator.enabled,
            generator_timeout_secs = config.generator.timeout.as_secs(),
            default_duration_days = config.default_duration_days,
            "Loaded planner configuration"
        );

        Ok(config)
    }

    /// Validate cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid value
    pub fn validate(&self) -> Result<()> {
        if !(MIN_PLAN_DURATION_DAYS..=MAX_PLAN_DURATION_DAYS).contains(&self.default_duration_days)
        {
            bail!(
                "Default duration must be between {MIN_PLAN_DURATION_DAYS} and {MAX_PLAN_DURATION_DAYS} days"
            );
        }
        if self.generator.timeout.is_zero() {
            bail!("Generator timeout must be positive");
        }
        if !(0.0..=2.0).contains(&self.generator.temperature) {
            bail!("LLM temperature must be between 0.0 and 2.0");
        }
        Ok(())
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}
