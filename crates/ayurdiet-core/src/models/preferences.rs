// ABOUTME: Typed plan-generation preferences with an explicit extension bag
// ABOUTME: Parses loose request JSON into recognized fields and stringified unknown keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::patient::ActivityLevel;
use crate::constants::limits::{
    DEFAULT_MAX_COOKING_MINUTES, DEFAULT_PLAN_DURATION_DAYS, MAX_PLAN_DURATION_DAYS,
    MIN_PLAN_DURATION_DAYS,
};
use crate::errors::{AppError, AppResult};

/// Dietary restriction requested for a plan
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DietaryRestriction {
    /// No meat or fish
    Vegetarian,
    /// No meat, fish, dairy or egg
    Vegan,
    /// No wheat-family grains
    GlutenFree,
    /// Any other restriction, kept verbatim
    Custom(String),
}

impl From<String> for DietaryRestriction {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "vegetarian" => Self::Vegetarian,
            "vegan" => Self::Vegan,
            "gluten-free" | "glutenfree" | "no-gluten" => Self::GlutenFree,
            _ => Self::Custom(value),
        }
    }
}

impl From<DietaryRestriction> for String {
    fn from(value: DietaryRestriction) -> Self {
        value.to_string()
    }
}

impl fmt::Display for DietaryRestriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vegetarian => f.write_str("vegetarian"),
            Self::Vegan => f.write_str("vegan"),
            Self::GlutenFree => f.write_str("gluten-free"),
            Self::Custom(value) => f.write_str(value),
        }
    }
}

/// Health goal requested for a plan
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HealthGoal {
    /// Calorie deficit
    WeightLoss,
    /// Calorie surplus
    WeightGain,
    /// Surplus with a protein-heavy macro split
    MuscleGain,
    /// Keep current weight
    Maintenance,
    /// Any other goal, kept verbatim
    Other(String),
}

impl From<String> for HealthGoal {
    fn from(value: String) -> Self {
        let normalized = value.trim().to_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "weight loss" | "lose weight" | "fat loss" => Self::WeightLoss,
            "weight gain" | "gain weight" => Self::WeightGain,
            "muscle gain" | "muscle building" | "build muscle" => Self::MuscleGain,
            "maintenance" | "maintain weight" | "maintain" => Self::Maintenance,
            _ => Self::Other(value),
        }
    }
}

impl From<HealthGoal> for String {
    fn from(value: HealthGoal) -> Self {
        value.to_string()
    }
}

impl fmt::Display for HealthGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WeightLoss => f.write_str("weight-loss"),
            Self::WeightGain => f.write_str("weight-gain"),
            Self::MuscleGain => f.write_str("muscle-gain"),
            Self::Maintenance => f.write_str("maintenance"),
            Self::Other(value) => f.write_str(value),
        }
    }
}

/// Recognized plan preferences
///
/// Unrecognized request keys land in `extensions`. They are kept for audit and
/// logging and never influence scoring or assembly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanPreferences {
    /// Plan length in days (1..=365, default 7)
    pub duration: Option<u32>,
    /// Explicit daily calorie target, replacing the computed one
    pub target_calories: Option<u32>,
    /// First day of the plan
    pub start_date: Option<NaiveDate>,
    /// Extra health conditions on top of the profile's concerns
    pub health_conditions: Vec<String>,
    /// Active dietary restrictions
    pub dietary_restrictions: Vec<DietaryRestriction>,
    /// Overrides the profile's activity level
    pub activity_level: Option<ActivityLevel>,
    /// Requested goals
    pub goals: Vec<HealthGoal>,
    /// Maximum preparation + cooking time per recipe
    pub max_cooking_minutes: Option<u32>,
    /// Unrecognized keys, stringified
    pub extensions: BTreeMap<String, String>,
}

impl PlanPreferences {
    /// Requested duration, validated against the allowed range
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` when the duration lies outside 1..=365.
    pub fn duration_days(&self) -> AppResult<u32> {
        let duration = self.duration.unwrap_or(DEFAULT_PLAN_DURATION_DAYS);
        if (MIN_PLAN_DURATION_DAYS..=MAX_PLAN_DURATION_DAYS).contains(&duration) {
            Ok(duration)
        } else {
            Err(AppError::invalid_input(format!(
                "Plan duration must be between {MIN_PLAN_DURATION_DAYS} and {MAX_PLAN_DURATION_DAYS} days, got {duration}"
            )))
        }
    }

    /// Maximum cooking time, falling back to the default
    #[must_use]
    pub fn max_cooking_minutes(&self) -> u32 {
        self.max_cooking_minutes.unwrap_or(DEFAULT_MAX_COOKING_MINUTES)
    }

    /// Overlay `overrides` on top of these preferences
    ///
    /// Scalar fields set in `overrides` win; list fields replace when non-empty;
    /// extension keys are merged with override values winning.
    #[must_use]
    pub fn merged_with(&self, overrides: &Self) -> Self {
        let mut extensions = self.extensions.clone();
        extensions.extend(overrides.extensions.clone());

        Self {
            duration: overrides.duration.or(self.duration),
            target_calories: overrides.target_calories.or(self.target_calories),
            start_date: overrides.start_date.or(self.start_date),
            health_conditions: pick_list(&self.health_conditions, &overrides.health_conditions),
            dietary_restrictions: pick_list(
                &self.dietary_restrictions,
                &overrides.dietary_restrictions,
            ),
            activity_level: overrides.activity_level.or(self.activity_level),
            goals: pick_list(&self.goals, &overrides.goals),
            max_cooking_minutes: overrides.max_cooking_minutes.or(self.max_cooking_minutes),
            extensions,
        }
    }
}

fn pick_list<T: Clone>(base: &[T], overrides: &[T]) -> Vec<T> {
    if overrides.is_empty() {
        base.to_vec()
    } else {
        overrides.to_vec()
    }
}

/// Loose wire shape of a plan request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPlanRequest {
    patient_id: String,
    #[serde(default)]
    duration: Option<u32>,
    #[serde(default)]
    target_calories: Option<u32>,
    #[serde(default)]
    start_date: Option<NaiveDate>,
    #[serde(default)]
    health_conditions: Vec<String>,
    #[serde(default)]
    dietary_restrictions: Vec<DietaryRestriction>,
    #[serde(default)]
    activity_level: Option<String>,
    #[serde(default)]
    goals: Vec<HealthGoal>,
    #[serde(default)]
    max_cooking_minutes: Option<u32>,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

/// Plan generation request: the patient plus typed preferences
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRequest {
    /// Patient to plan for
    pub patient_id: String,
    /// Typed preferences
    pub preferences: PlanPreferences,
}

impl PlanRequest {
    /// Parse a loose request document
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` on malformed JSON, an unknown activity level or
    /// a duration outside 1..=365.
    pub fn from_json(value: Value) -> AppResult<Self> {
        let raw: RawPlanRequest = serde_json::from_value(value)
            .map_err(|e| AppError::invalid_input(format!("Malformed plan request: {e}")))?;

        let activity_level = raw
            .activity_level
            .as_deref()
            .map(|level| {
                ActivityLevel::from_str_lossy(level).ok_or_else(|| {
                    AppError::invalid_input(format!("Unknown activity level '{level}'"))
                })
            })
            .transpose()?;

        let extensions = raw
            .extra
            .into_iter()
            .map(|(key, value)| {
                let text = match value {
                    Value::String(text) => text,
                    other => other.to_string(),
                };
                (key, text)
            })
            .collect();

        let preferences = PlanPreferences {
            duration: raw.duration,
            target_calories: raw.target_calories,
            start_date: raw.start_date,
            health_conditions: raw.health_conditions,
            dietary_restrictions: raw.dietary_restrictions,
            activity_level,
            goals: raw.goals,
            max_cooking_minutes: raw.max_cooking_minutes,
            extensions,
        };
        preferences.duration_days()?;

        Ok(Self {
            patient_id: raw.patient_id,
            preferences,
        })
    }
}
