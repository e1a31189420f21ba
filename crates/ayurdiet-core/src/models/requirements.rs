// ABOUTME: Derived nutrition requirement models computed once per generation run
// ABOUTME: Calorie target, macro grams and ratios, micronutrient targets, hydration and audit trail
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Macro split as fractions of daily calories
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct MacroRatios {
    /// Protein fraction
    pub protein: f64,
    /// Carbohydrate fraction
    pub carbs: f64,
    /// Fat fraction
    pub fat: f64,
}

impl MacroRatios {
    /// Construct a split from percentages
    #[must_use]
    pub fn from_percent(protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            protein: protein / 100.0,
            carbs: carbs / 100.0,
            fat: fat / 100.0,
        }
    }

    /// Sum of the three fractions
    #[must_use]
    pub fn total(&self) -> f64 {
        self.protein + self.carbs + self.fat
    }
}

/// Daily macro targets in whole grams
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MacroTargets {
    /// Protein (g)
    pub protein_g: u32,
    /// Carbohydrates (g)
    pub carbs_g: u32,
    /// Fat (g)
    pub fat_g: u32,
    /// Split the grams were derived from
    pub ratios: MacroRatios,
}

/// Daily micronutrient targets for an age and sex bracket
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MicronutrientTargets {
    /// Vitamin A (mcg RAE)
    pub vitamin_a_mcg: f64,
    /// Vitamin C (mg)
    pub vitamin_c_mg: f64,
    /// Vitamin D (IU)
    pub vitamin_d_iu: f64,
    /// Vitamin B12 (mcg)
    pub vitamin_b12_mcg: f64,
    /// Folate (mcg DFE)
    pub folate_mcg: f64,
    /// Calcium (mg)
    pub calcium_mg: f64,
    /// Iron (mg)
    pub iron_mg: f64,
    /// Magnesium (mg)
    pub magnesium_mg: f64,
    /// Zinc (mg)
    pub zinc_mg: f64,
    /// Dietary fiber (g)
    pub fiber_g: f64,
}

/// Daily water intake target
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct HydrationTarget {
    /// Liters per day
    pub liters: f64,
    /// Glasses per day
    pub glasses: u32,
}

/// Source of a calorie adjustment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    /// Requested weight-loss goal
    WeightLossGoal,
    /// Requested weight-gain goal
    WeightGainGoal,
    /// Requested muscle-gain goal
    MuscleGainGoal,
    /// BMI above the obesity threshold
    HighBmi,
    /// BMI below the underweight threshold
    LowBmi,
    /// Explicit target from the request
    ExplicitTarget,
    /// Raised to the calorie floor
    CalorieFloor,
}

/// One step of the calorie target audit trail
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalorieAdjustment {
    /// What caused the adjustment
    pub kind: AdjustmentKind,
    /// Calories before the step
    pub before: f64,
    /// Calories after the step
    pub after: f64,
}

/// Nutrition requirements for one generation run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NutritionRequirements {
    /// Basal metabolic rate (kcal)
    pub bmr: f64,
    /// Total daily energy expenditure (kcal)
    pub tdee: f64,
    /// Body mass index
    pub bmi: f64,
    /// Daily calorie target, never below the floor
    pub target_calories: u32,
    /// Macro targets
    pub macros: MacroTargets,
    /// Micronutrient targets
    pub micronutrients: MicronutrientTargets,
    /// Hydration target
    pub hydration: HydrationTarget,
    /// Audit trail of every calorie adjustment applied
    pub adjustments: Vec<CalorieAdjustment>,
}
