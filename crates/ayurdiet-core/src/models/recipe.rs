// ABOUTME: Recipe candidate models supplied by the recipe store for plan generation
// ABOUTME: MealType, Ingredient, NutritionProfile with linear scaling, and per-dosha effects
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use super::patient::Dosha;

/// Meal slot within a day
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    /// Breakfast meal
    Breakfast,
    /// Lunch meal
    Lunch,
    /// Dinner meal
    Dinner,
    /// Snack between meals
    Snack,
}

impl MealType {
    /// Slots in serving order
    pub const ALL: [Self; 4] = [Self::Breakfast, Self::Lunch, Self::Dinner, Self::Snack];

    /// Parse meal type from string
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Some(Self::Breakfast),
            "lunch" => Some(Self::Lunch),
            "dinner" => Some(Self::Dinner),
            "snack" | "snacks" => Some(Self::Snack),
            _ => None,
        }
    }

    /// Lowercase slot name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snack => "snack",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ingredient line of a recipe
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ingredient {
    /// Ingredient name
    pub name: String,
    /// Free-text quantity (e.g. "1 cup")
    #[serde(default)]
    pub quantity: String,
}

/// Per-serving nutrition values (all non-negative)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct NutritionProfile {
    /// Energy (kcal)
    pub calories: f64,
    /// Protein (g)
    #[serde(default)]
    pub protein_g: f64,
    /// Carbohydrates (g)
    #[serde(default)]
    pub carbs_g: f64,
    /// Fat (g)
    #[serde(default)]
    pub fat_g: f64,
    /// Fiber (g)
    #[serde(default)]
    pub fiber_g: f64,
}

impl NutritionProfile {
    /// Scale every field by a portion multiplier
    #[must_use]
    pub fn scaled(&self, multiplier: f64) -> Self {
        Self {
            calories: self.calories * multiplier,
            protein_g: self.protein_g * multiplier,
            carbs_g: self.carbs_g * multiplier,
            fat_g: self.fat_g * multiplier,
            fiber_g: self.fiber_g * multiplier,
        }
    }
}

impl Add for NutritionProfile {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            calories: self.calories + rhs.calories,
            protein_g: self.protein_g + rhs.protein_g,
            carbs_g: self.carbs_g + rhs.carbs_g,
            fat_g: self.fat_g + rhs.fat_g,
            fiber_g: self.fiber_g + rhs.fiber_g,
        }
    }
}

impl AddAssign for NutritionProfile {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for NutritionProfile {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Effect a recipe has on a dosha
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum DoshaEffect {
    /// Pacifies the dosha
    Decrease,
    /// Aggravates the dosha
    Increase,
    /// No effect
    #[default]
    Neutral,
}

/// Mapping from dosha to effect; absent entries read as neutral
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct DoshaEffects(BTreeMap<Dosha, DoshaEffect>);

impl DoshaEffects {
    /// Effect on a dosha
    #[must_use]
    pub fn effect(&self, dosha: Dosha) -> DoshaEffect {
        self.0.get(&dosha).copied().unwrap_or_default()
    }

    /// Builder-style setter
    #[must_use]
    pub fn with(mut self, dosha: Dosha, effect: DoshaEffect) -> Self {
        self.0.insert(dosha, effect);
        self
    }
}

/// Recipe difficulty level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Easy
    #[default]
    Easy,
    /// Medium
    Medium,
    /// Hard
    Hard,
}

/// Recipe candidate from the recipe corpus
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeCandidate {
    /// Unique opaque identifier
    pub id: String,
    /// Recipe name
    pub name: String,
    /// Slots the recipe may be served in
    pub meal_types: Vec<MealType>,
    /// Cuisine tags
    #[serde(default)]
    pub cuisine_tags: Vec<String>,
    /// Ingredient list
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    /// Per-serving nutrition
    pub nutrition: NutritionProfile,
    /// Dosha effects
    #[serde(default)]
    pub dosha_effect: DoshaEffects,
    /// Health benefit tags
    #[serde(default)]
    pub health_benefits: Vec<String>,
    /// Preparation time in minutes
    #[serde(default)]
    pub preparation_minutes: u32,
    /// Cooking time in minutes
    #[serde(default)]
    pub cooking_minutes: u32,
    /// Difficulty level
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Whether the recipe is active
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Whether the recipe is visible to every practitioner
    #[serde(default = "default_true")]
    pub is_public: bool,
}

const fn default_true() -> bool {
    true
}

impl RecipeCandidate {
    /// Preparation plus cooking time
    #[must_use]
    pub const fn total_minutes(&self) -> u32 {
        self.preparation_minutes.saturating_add(self.cooking_minutes)
    }

    /// Whether the recipe may be served in a slot
    #[must_use]
    pub fn applies_to(&self, meal_type: MealType) -> bool {
        self.meal_types.contains(&meal_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_dosha_effect_is_neutral() {
        let effects = DoshaEffects::default().with(Dosha::Kapha, DoshaEffect::Decrease);
        assert_eq!(effects.effect(Dosha::Kapha), DoshaEffect::Decrease);
        assert_eq!(effects.effect(Dosha::Vata), DoshaEffect::Neutral);
    }

    #[test]
    fn test_scaled_is_linear() {
        let base = NutritionProfile {
            calories: 200.0,
            protein_g: 10.0,
            carbs_g: 30.0,
            fat_g: 5.0,
            fiber_g: 4.0,
        };
        let half = base.scaled(0.5);
        assert!((half.calories - 100.0).abs() < f64::EPSILON);
        assert!((half.fiber_g - 2.0).abs() < f64::EPSILON);
    }
}
