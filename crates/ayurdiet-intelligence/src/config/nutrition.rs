// ABOUTME: Nutrition requirement configuration for calorie, macro, hydration and DRI targets
// ABOUTME: Harris-Benedict coefficients, activity factors, goal deltas, dosha macro splits and DRI table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutrition Requirement Configuration
//!
//! # Scientific References
//!
//! - BMR: Roza & Shizgal (1984), revised Harris-Benedict equations.
//!   DOI: 10.1093/ajcn/40.1.168
//! - Activity factors: `McArdle`, Katch & Katch (2010), Exercise Physiology
//! - Micronutrients: Institute of Medicine Dietary Reference Intakes (1997-2011)

use std::fmt;
use std::str::FromStr;

use ayurdiet_core::constants::limits::CALORIE_FLOOR_KCAL;
use ayurdiet_core::models::{BiologicalSex, MacroRatios, MicronutrientTargets};
use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Nutrition requirement configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NutritionConfig {
    /// Harris-Benedict coefficients
    pub bmr: BmrConfig,
    /// Activity factor multipliers for TDEE
    pub activity_factors: ActivityFactorsConfig,
    /// Goal and BMI calorie adjustments
    pub goals: GoalAdjustmentConfig,
    /// Macro splits per dosha
    pub macro_splits: MacroSplitConfig,
    /// Hydration targets
    pub hydration: HydrationConfig,
    /// DRI micronutrient table
    pub micronutrients: MicronutrientConfig,
}

/// Revised Harris-Benedict coefficients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmrConfig {
    /// Male constant (88.362)
    pub male_constant: f64,
    /// Male weight coefficient (13.397)
    pub male_weight_coef: f64,
    /// Male height coefficient (4.799)
    pub male_height_coef: f64,
    /// Male age coefficient, subtracted (5.677)
    pub male_age_coef: f64,
    /// Female constant (447.593)
    pub female_constant: f64,
    /// Female weight coefficient (9.247)
    pub female_weight_coef: f64,
    /// Female height coefficient (3.098)
    pub female_height_coef: f64,
    /// Female age coefficient, subtracted (4.330)
    pub female_age_coef: f64,
}

impl Default for BmrConfig {
    fn default() -> Self {
        Self {
            male_constant: 88.362,
            male_weight_coef: 13.397,
            male_height_coef: 4.799,
            male_age_coef: 5.677,
            female_constant: 447.593,
            female_weight_coef: 9.247,
            female_height_coef: 3.098,
            female_age_coef: 4.330,
        }
    }
}

/// Activity factor multipliers for TDEE calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityFactorsConfig {
    /// Sedentary (little/no exercise): 1.2
    pub sedentary: f64,
    /// Lightly active (1-3 days/week): 1.375
    pub lightly_active: f64,
    /// Moderately active (3-5 days/week): 1.55
    pub moderately_active: f64,
    /// Very active (6-7 days/week): 1.725
    pub very_active: f64,
    /// Extremely active (physical job or twice-daily training): 1.9
    pub extremely_active: f64,
    /// Added to the factor when the patient eats 4 or more meals a day
    pub frequent_meal_bonus: f64,
}

impl Default for ActivityFactorsConfig {
    fn default() -> Self {
        Self {
            sedentary: 1.2,
            lightly_active: 1.375,
            moderately_active: 1.55,
            very_active: 1.725,
            extremely_active: 1.9,
            frequent_meal_bonus: 0.1,
        }
    }
}

/// How weight goals change the calorie target
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GoalAdjustmentMode {
    /// Fixed kcal deltas
    #[default]
    Additive,
    /// Proportional factors for weight loss and gain
    Multiplicative,
}

impl FromStr for GoalAdjustmentMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "additive" => Ok(Self::Additive),
            "multiplicative" => Ok(Self::Multiplicative),
            other => Err(ConfigError::Parse(format!("Unknown goal mode '{other}'"))),
        }
    }
}

impl fmt::Display for GoalAdjustmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Additive => f.write_str("additive"),
            Self::Multiplicative => f.write_str("multiplicative"),
        }
    }
}

/// Goal and BMI calorie adjustments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalAdjustmentConfig {
    /// Additive or multiplicative weight goals
    pub mode: GoalAdjustmentMode,
    /// Weight-loss delta in additive mode (-300 kcal)
    pub weight_loss_kcal: f64,
    /// Weight-gain delta in additive mode (+300 kcal)
    pub weight_gain_kcal: f64,
    /// Muscle-gain delta, both modes (+200 kcal)
    pub muscle_gain_kcal: f64,
    /// Weight-loss factor in multiplicative mode (0.85)
    pub weight_loss_factor: f64,
    /// Weight-gain factor in multiplicative mode (1.15)
    pub weight_gain_factor: f64,
    /// BMI above which the high-BMI correction applies (30)
    pub high_bmi_threshold: f64,
    /// BMI below which the low-BMI correction applies (18.5)
    pub low_bmi_threshold: f64,
    /// High-BMI correction (-200 kcal)
    pub high_bmi_kcal: f64,
    /// Low-BMI correction (+200 kcal)
    pub low_bmi_kcal: f64,
    /// Daily target never drops below this value (1200 kcal)
    pub calorie_floor_kcal: u32,
}

impl Default for GoalAdjustmentConfig {
    fn default() -> Self {
        Self {
            mode: GoalAdjustmentMode::Additive,
            weight_loss_kcal: -300.0,
            weight_gain_kcal: 300.0,
            muscle_gain_kcal: 200.0,
            weight_loss_factor: 0.85,
            weight_gain_factor: 1.15,
            high_bmi_threshold: 30.0,
            low_bmi_threshold: 18.5,
            high_bmi_kcal: -200.0,
            low_bmi_kcal: 200.0,
            calorie_floor_kcal: CALORIE_FLOOR_KCAL,
        }
    }
}

/// Macro splits keyed by the first-listed dosha
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacroSplitConfig {
    /// Base split, also used for Tridosha (20/50/30)
    pub base: MacroRatios,
    /// Vata split (20/55/25)
    pub vata: MacroRatios,
    /// Pitta split (25/45/30)
    pub pitta: MacroRatios,
    /// Kapha split (30/40/30)
    pub kapha: MacroRatios,
    /// Muscle-building split, wins over any dosha split (30/45/25)
    pub muscle_gain: MacroRatios,
}

impl Default for MacroSplitConfig {
    fn default() -> Self {
        Self {
            base: MacroRatios::from_percent(20.0, 50.0, 30.0),
            vata: MacroRatios::from_percent(20.0, 55.0, 25.0),
            pitta: MacroRatios::from_percent(25.0, 45.0, 30.0),
            kapha: MacroRatios::from_percent(30.0, 40.0, 30.0),
            muscle_gain: MacroRatios::from_percent(30.0, 45.0, 25.0),
        }
    }
}

impl MacroSplitConfig {
    /// Every configured split with its name
    #[must_use]
    pub const fn all(&self) -> [(&'static str, &MacroRatios); 5] {
        [
            ("base", &self.base),
            ("vata", &self.vata),
            ("pitta", &self.pitta),
            ("kapha", &self.kapha),
            ("muscle_gain", &self.muscle_gain),
        ]
    }
}

/// Hydration target configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HydrationConfig {
    /// Water per kg of body weight (35 ml)
    pub ml_per_kg: f64,
    /// Patients younger than this get the youth factor (18)
    pub youth_age_below: u32,
    /// Youth factor (0.8)
    pub youth_factor: f64,
    /// Patients older than this get the senior factor (65)
    pub senior_age_above: u32,
    /// Senior factor (0.9)
    pub senior_factor: f64,
    /// Female factor (0.9)
    pub female_factor: f64,
    /// Glasses per liter (4.2)
    pub glasses_per_liter: f64,
}

impl Default for HydrationConfig {
    fn default() -> Self {
        Self {
            ml_per_kg: 35.0,
            youth_age_below: 18,
            youth_factor: 0.8,
            senior_age_above: 65,
            senior_factor: 0.9,
            female_factor: 0.9,
            glasses_per_liter: 4.2,
        }
    }
}

/// DRI targets for one age bracket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MicronutrientBracket {
    /// Lowest age in the bracket (inclusive)
    pub min_age: u32,
    /// Highest age in the bracket (inclusive), `None` for open-ended
    pub max_age: Option<u32>,
    /// Male targets
    pub male: MicronutrientTargets,
    /// Female targets
    pub female: MicronutrientTargets,
}

impl MicronutrientBracket {
    /// Whether an age falls in this bracket
    #[must_use]
    pub fn contains(&self, age: u32) -> bool {
        age >= self.min_age && self.max_age.is_none_or(|max| age <= max)
    }
}

/// Dietary Reference Intake table keyed by age bracket and sex
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MicronutrientConfig {
    /// Brackets in ascending age order
    pub brackets: Vec<MicronutrientBracket>,
}

impl MicronutrientConfig {
    /// Targets for an age and sex
    ///
    /// Ages below the first bracket use the first bracket.
    #[must_use]
    pub fn targets_for(&self, age: u32, sex: BiologicalSex) -> Option<MicronutrientTargets> {
        let bracket = self
            .brackets
            .iter()
            .find(|bracket| bracket.contains(age))
            .or_else(|| self.brackets.first().filter(|first| age < first.min_age))?;

        Some(match sex {
            BiologicalSex::Male => bracket.male,
            BiologicalSex::Female => bracket.female,
        })
    }
}

#[allow(clippy::too_many_arguments)]
const fn dri(
    vitamin_a_mcg: f64,
    vitamin_c_mg: f64,
    vitamin_d_iu: f64,
    vitamin_b12_mcg: f64,
    folate_mcg: f64,
    calcium_mg: f64,
    iron_mg: f64,
    magnesium_mg: f64,
    zinc_mg: f64,
    fiber_g: f64,
) -> MicronutrientTargets {
    MicronutrientTargets {
        vitamin_a_mcg,
        vitamin_c_mg,
        vitamin_d_iu,
        vitamin_b12_mcg,
        folate_mcg,
        calcium_mg,
        iron_mg,
        magnesium_mg,
        zinc_mg,
        fiber_g,
    }
}

impl Default for MicronutrientConfig {
    fn default() -> Self {
        let child = dri(400.0, 25.0, 600.0, 1.2, 200.0, 1000.0, 10.0, 130.0, 5.0, 25.0);
        Self {
            brackets: vec![
                MicronutrientBracket {
                    min_age: 1,
                    max_age: Some(8),
                    male: child,
                    female: child,
                },
                MicronutrientBracket {
                    min_age: 9,
                    max_age: Some(13),
                    male: dri(600.0, 45.0, 600.0, 1.8, 300.0, 1300.0, 8.0, 240.0, 8.0, 31.0),
                    female: dri(600.0, 45.0, 600.0, 1.8, 300.0, 1300.0, 8.0, 240.0, 8.0, 26.0),
                },
                MicronutrientBracket {
                    min_age: 14,
                    max_age: Some(18),
                    male: dri(900.0, 75.0, 600.0, 2.4, 400.0, 1300.0, 11.0, 410.0, 11.0, 38.0),
                    female: dri(700.0, 65.0, 600.0, 2.4, 400.0, 1300.0, 15.0, 360.0, 9.0, 26.0),
                },
                MicronutrientBracket {
                    min_age: 19,
                    max_age: Some(50),
                    male: dri(900.0, 90.0, 600.0, 2.4, 400.0, 1000.0, 8.0, 420.0, 11.0, 38.0),
                    female: dri(700.0, 75.0, 600.0, 2.4, 400.0, 1000.0, 18.0, 320.0, 8.0, 25.0),
                },
                MicronutrientBracket {
                    min_age: 51,
                    max_age: None,
                    male: dri(900.0, 90.0, 800.0, 2.4, 400.0, 1000.0, 8.0, 420.0, 11.0, 30.0),
                    female: dri(700.0, 75.0, 800.0, 2.4, 400.0, 1200.0, 8.0, 320.0, 8.0, 21.0),
                },
            ],
        }
    }
}
