// ABOUTME: Intelligence configuration for requirement math, recipe scoring and plan assembly
// ABOUTME: Orchestrates domain-specific configs and provides unified validation and loading
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Intelligence Configuration Module
//!
//! Type-safe configuration for every engine component. An [`IntelligenceConfig`]
//! is built once (usually through [`IntelligenceConfig::load`]) and passed by
//! reference into each pure function; there is no process-wide instance.
//!
//! # Module Structure
//!
//! - `nutrition` - Harris-Benedict, activity factors, goal deltas, macros, hydration, DRI
//! - `scoring` - Suitability weights, multipliers, baselines and keyword tables
//! - `assembly` - Slot calorie ratios per dosha and serving times
//! - `guidelines` - Dosha guideline tables for plan recommendations

/// Slot ratios and serving times
pub mod assembly;
/// Configuration loading and validation errors
pub mod error;
/// Dosha guideline tables
pub mod guidelines;
/// Requirement coefficients
pub mod nutrition;
/// Suitability weights, multipliers and keyword tables
pub mod scoring;

pub use assembly::{AssemblyConfig, MealTimes, SlotRatios};
pub use error::ConfigError;
pub use guidelines::{DoshaGuideline, GuidelinesConfig};
pub use nutrition::{
    ActivityFactorsConfig, BmrConfig, GoalAdjustmentConfig, GoalAdjustmentMode, HydrationConfig,
    MacroSplitConfig, MicronutrientBracket, MicronutrientConfig, NutritionConfig,
};
pub use scoring::{
    DoshaMultipliers, IngredientKeywords, ScoringBaselines, ScoringConfig, ScoringWeights,
};

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Tolerance used when checking that weights and ratios sum to 1.0
const SUM_TOLERANCE: f64 = 0.001;

/// Main intelligence configuration container
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntelligenceConfig {
    /// Nutrition requirement settings
    pub nutrition: NutritionConfig,
    /// Recipe suitability scoring settings
    pub scoring: ScoringConfig,
    /// Meal plan assembly settings
    pub assembly: AssemblyConfig,
    /// Dosha guideline tables
    pub guidelines: GuidelinesConfig,
}

impl IntelligenceConfig {
    /// Load configuration from defaults plus `AYURDIET_*` environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Apply environment variable overrides
        config = config.apply_env_overrides()?;

        // Validate the final configuration
        config.validate()?;

        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error when weights or ratios do not sum to 1.0, activity
    /// factors are not ascending, or a coefficient is out of range
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_nutrition()?;
        self.validate_scoring()?;
        self.validate_assembly()
    }

    fn validate_nutrition(&self) -> Result<(), ConfigError> {
        let nutr = &self.nutrition;

        let bmr = &nutr.bmr;
        if [
            bmr.male_constant,
            bmr.male_weight_coef,
            bmr.male_height_coef,
            bmr.male_age_coef,
            bmr.female_constant,
            bmr.female_weight_coef,
            bmr.female_height_coef,
            bmr.female_age_coef,
        ]
        .iter()
        .any(|coef| *coef <= 0.0)
        {
            return Err(ConfigError::ValueOutOfRange(
                "Harris-Benedict coefficients must be positive",
            ));
        }

        let factors = &nutr.activity_factors;
        if factors.sedentary < 1.0 || factors.extremely_active > 2.5 {
            return Err(ConfigError::ValueOutOfRange(
                "Activity factors must be between 1.0 and 2.5",
            ));
        }
        if factors.sedentary >= factors.lightly_active
            || factors.lightly_active >= factors.moderately_active
            || factors.moderately_active >= factors.very_active
            || factors.very_active >= factors.extremely_active
        {
            return Err(ConfigError::InvalidRange(
                "Activity factors must be in ascending order",
            ));
        }
        if !(0.0..=0.5).contains(&factors.frequent_meal_bonus) {
            return Err(ConfigError::ValueOutOfRange(
                "Frequent meal bonus must be between 0.0 and 0.5",
            ));
        }

        let goals = &nutr.goals;
        if goals.weight_loss_factor <= 0.0 || goals.weight_loss_factor >= 1.0 {
            return Err(ConfigError::ValueOutOfRange(
                "Weight-loss factor must be between 0.0 and 1.0",
            ));
        }
        if goals.weight_gain_factor <= 1.0 {
            return Err(ConfigError::ValueOutOfRange(
                "Weight-gain factor must be greater than 1.0",
            ));
        }
        if goals.low_bmi_threshold >= goals.high_bmi_threshold {
            return Err(ConfigError::InvalidRange(
                "low_bmi_threshold must be < high_bmi_threshold",
            ));
        }
        if goals.calorie_floor_kcal == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "Calorie floor must be positive",
            ));
        }

        if nutr
            .macro_splits
            .all()
            .iter()
            .any(|(_, ratios)| (ratios.total() - 1.0).abs() > SUM_TOLERANCE)
        {
            return Err(ConfigError::InvalidWeights("Macro splits must sum to 1.0"));
        }

        let hydration = &nutr.hydration;
        if hydration.ml_per_kg <= 0.0 || hydration.glasses_per_liter <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "Hydration rates must be positive",
            ));
        }
        if hydration.youth_age_below >= hydration.senior_age_above {
            return Err(ConfigError::InvalidRange(
                "youth_age_below must be < senior_age_above",
            ));
        }

        let brackets = &nutr.micronutrients.brackets;
        if brackets.is_empty() {
            return Err(ConfigError::MissingField("micronutrients.brackets"));
        }
        if brackets
            .windows(2)
            .any(|pair| pair[0].max_age.is_none_or(|max| max >= pair[1].min_age))
        {
            return Err(ConfigError::InvalidRange(
                "Micronutrient brackets must be ascending and non-overlapping",
            ));
        }

        Ok(())
    }

    fn validate_scoring(&self) -> Result<(), ConfigError> {
        let scoring = &self.scoring;

        if (scoring.weights.total() - 1.0).abs() > SUM_TOLERANCE {
            return Err(ConfigError::InvalidWeights(
                "Scoring weights must sum to 1.0",
            ));
        }

        let multipliers = &scoring.dosha_multipliers;
        if !(multipliers.increase <= multipliers.neutral
            && multipliers.neutral <= multipliers.decrease
            && multipliers.increase >= 0.0
            && multipliers.decrease <= 1.0)
        {
            return Err(ConfigError::InvalidRange(
                "Dosha multipliers must satisfy 0 <= increase <= neutral <= decrease <= 1",
            ));
        }

        let baselines = &scoring.baselines;
        if baselines.health_unmatched > scoring.weights.health
            || baselines.health_no_concerns > scoring.weights.health
            || baselines.prep_time_exceeded > scoring.weights.prep_time
            || baselines.restriction_penalty < 0.0
        {
            return Err(ConfigError::ValueOutOfRange(
                "Scoring baselines must not exceed their component weight",
            ));
        }

        if !(0.0..=1.0).contains(&scoring.acceptance_threshold) {
            return Err(ConfigError::ValueOutOfRange(
                "Acceptance threshold must be between 0.0 and 1.0",
            ));
        }

        Ok(())
    }

    fn validate_assembly(&self) -> Result<(), ConfigError> {
        for (_, ratios) in self.assembly.all_ratios() {
            if (ratios.total() - 1.0).abs() > SUM_TOLERANCE {
                return Err(ConfigError::InvalidWeights(
                    "Meal slot ratios must sum to 1.0",
                ));
            }
            if [ratios.breakfast, ratios.lunch, ratios.dinner, ratios.snack]
                .iter()
                .any(|ratio| *ratio <= 0.0)
            {
                return Err(ConfigError::ValueOutOfRange(
                    "Meal slot ratios must be positive",
                ));
            }
        }
        Ok(())
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Nutrition overrides
        let goals = &mut self.nutrition.goals;
        Self::apply_env_var("AYURDIET_GOAL_MODE", &mut goals.mode)?;
        Self::apply_env_var("AYURDIET_WEIGHT_LOSS_KCAL", &mut goals.weight_loss_kcal)?;
        Self::apply_env_var("AYURDIET_WEIGHT_GAIN_KCAL", &mut goals.weight_gain_kcal)?;
        Self::apply_env_var("AYURDIET_MUSCLE_GAIN_KCAL", &mut goals.muscle_gain_kcal)?;
        Self::apply_env_var("AYURDIET_WEIGHT_LOSS_FACTOR", &mut goals.weight_loss_factor)?;
        Self::apply_env_var("AYURDIET_WEIGHT_GAIN_FACTOR", &mut goals.weight_gain_factor)?;
        Self::apply_env_var("AYURDIET_CALORIE_FLOOR_KCAL", &mut goals.calorie_floor_kcal)?;

        let factors = &mut self.nutrition.activity_factors;
        Self::apply_env_var("AYURDIET_ACTIVITY_SEDENTARY", &mut factors.sedentary)?;
        Self::apply_env_var("AYURDIET_ACTIVITY_LIGHTLY_ACTIVE", &mut factors.lightly_active)?;
        Self::apply_env_var(
            "AYURDIET_ACTIVITY_MODERATELY_ACTIVE",
            &mut factors.moderately_active,
        )?;
        Self::apply_env_var("AYURDIET_ACTIVITY_VERY_ACTIVE", &mut factors.very_active)?;
        Self::apply_env_var(
            "AYURDIET_ACTIVITY_EXTREMELY_ACTIVE",
            &mut factors.extremely_active,
        )?;
        Self::apply_env_var(
            "AYURDIET_FREQUENT_MEAL_BONUS",
            &mut factors.frequent_meal_bonus,
        )?;

        Self::apply_env_var(
            "AYURDIET_HYDRATION_ML_PER_KG",
            &mut self.nutrition.hydration.ml_per_kg,
        )?;

        // Scoring overrides
        let weights = &mut self.scoring.weights;
        Self::apply_env_var("AYURDIET_WEIGHT_DOSHA", &mut weights.dosha)?;
        Self::apply_env_var("AYURDIET_WEIGHT_HEALTH", &mut weights.health)?;
        Self::apply_env_var("AYURDIET_WEIGHT_RESTRICTION", &mut weights.restriction)?;
        Self::apply_env_var("AYURDIET_WEIGHT_PREP_TIME", &mut weights.prep_time)?;
        Self::apply_env_var(
            "AYURDIET_ACCEPTANCE_THRESHOLD",
            &mut self.scoring.acceptance_threshold,
        )?;

        Ok(self)
    }
}
