// ABOUTME: Recipe suitability scoring configuration with component weights and keyword tables
// ABOUTME: Dosha multipliers, health and prep-time baselines, acceptance threshold, ingredient keywords
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use ayurdiet_core::constants::scoring::ACCEPTANCE_THRESHOLD;
use serde::{Deserialize, Serialize};

/// Recipe suitability scoring configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Component weights, summing to 1.0
    pub weights: ScoringWeights,
    /// Fraction of the dosha weight earned per effect
    pub dosha_multipliers: DoshaMultipliers,
    /// Baselines for partial credit
    pub baselines: ScoringBaselines,
    /// Scores below this value are disqualified
    pub acceptance_threshold: f64,
    /// Ingredient keyword tables
    pub keywords: IngredientKeywords,
}

/// Component weights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Dosha compatibility (0.40)
    pub dosha: f64,
    /// Health-condition match (0.25)
    pub health: f64,
    /// Dietary-restriction compliance (0.20)
    pub restriction: f64,
    /// Preparation-time fit (0.15)
    pub prep_time: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            dosha: 0.40,
            health: 0.25,
            restriction: 0.20,
            prep_time: 0.15,
        }
    }
}

impl ScoringWeights {
    /// Sum of all weights
    #[must_use]
    pub fn total(&self) -> f64 {
        self.dosha + self.health + self.restriction + self.prep_time
    }
}

/// Fraction of the dosha weight earned for each effect
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoshaMultipliers {
    /// Recipe pacifies the dosha (1.0)
    pub decrease: f64,
    /// Recipe has no effect (0.70)
    pub neutral: f64,
    /// Recipe aggravates the dosha (0.30)
    pub increase: f64,
}

impl Default for DoshaMultipliers {
    fn default() -> Self {
        Self {
            decrease: 1.0,
            neutral: 0.70,
            increase: 0.30,
        }
    }
}

/// Partial-credit contributions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringBaselines {
    /// Health contribution when no concern matches (0.10)
    pub health_unmatched: f64,
    /// Health contribution when the patient lists no concerns (0.15)
    pub health_no_concerns: f64,
    /// Subtracted from the restriction weight on any violation (0.20)
    pub restriction_penalty: f64,
    /// Prep-time contribution when the recipe takes too long (0.05)
    pub prep_time_exceeded: f64,
}

impl Default for ScoringBaselines {
    fn default() -> Self {
        Self {
            health_unmatched: 0.10,
            health_no_concerns: 0.15,
            restriction_penalty: 0.20,
            prep_time_exceeded: 0.05,
        }
    }
}

/// Ingredient keyword tables for diet-type filtering and restriction checks
///
/// Keywords match whole words of an ingredient name, case-insensitively,
/// allowing a plural suffix. Multi-word keywords must match consecutive words.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientKeywords {
    /// Meat and poultry
    pub meat: Vec<String>,
    /// Fish and shellfish
    pub fish: Vec<String>,
    /// Eggs
    pub egg: Vec<String>,
    /// Dairy products
    pub dairy: Vec<String>,
    /// Plant-based look-alikes that are not dairy
    pub dairy_exceptions: Vec<String>,
    /// Wheat-family grains
    pub gluten: Vec<String>,
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|word| (*word).to_owned()).collect()
}

impl Default for IngredientKeywords {
    fn default() -> Self {
        Self {
            meat: owned(&[
                "meat", "chicken", "beef", "pork", "mutton", "lamb", "veal", "turkey",
                "duck", "bacon", "ham", "sausage", "salami", "pepperoni", "venison", "keema",
                "gelatin",
            ]),
            fish: owned(&[
                "fish", "salmon", "tuna", "cod", "sardine", "anchovy", "mackerel", "tilapia",
                "trout", "pomfret", "shrimp", "prawn", "crab", "lobster", "oyster", "clam",
                "mussel", "squid", "seafood",
            ]),
            egg: owned(&["egg", "omelette", "mayonnaise"]),
            dairy: owned(&[
                "milk",
                "cheese",
                "butter",
                "ghee",
                "yogurt",
                "yoghurt",
                "curd",
                "cream",
                "paneer",
                "whey",
                "buttermilk",
                "khoa",
                "casein",
                "lassi",
                "kefir",
            ]),
            dairy_exceptions: owned(&[
                "coconut milk",
                "almond milk",
                "soy milk",
                "oat milk",
                "rice milk",
                "cashew milk",
                "plant milk",
                "coconut cream",
                "cashew cream",
                "coconut butter",
                "cocoa butter",
                "peanut butter",
                "almond butter",
                "cashew butter",
                "nut butter",
                "soy yogurt",
                "coconut yogurt",
                "vegan cheese",
                "bean curd",
            ]),
            gluten: owned(&[
                "wheat", "barley", "rye", "semolina", "bulgur", "couscous", "spelt", "seitan",
                "atta", "maida", "suji", "sooji", "farro", "durum",
            ]),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            dosha_multipliers: DoshaMultipliers::default(),
            baselines: ScoringBaselines::default(),
            acceptance_threshold: ACCEPTANCE_THRESHOLD,
            keywords: IngredientKeywords::default(),
        }
    }
}
