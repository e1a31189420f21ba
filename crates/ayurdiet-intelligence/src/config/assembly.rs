// ABOUTME: Meal plan assembly configuration with per-dosha slot ratios and serving times
// ABOUTME: Splits the daily calorie target across breakfast, lunch, dinner and snack
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use ayurdiet_core::models::{Dosha, MealType};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Fraction of daily calories per meal slot
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SlotRatios {
    /// Breakfast share
    pub breakfast: f64,
    /// Lunch share
    pub lunch: f64,
    /// Dinner share
    pub dinner: f64,
    /// Snack share
    pub snack: f64,
}

impl SlotRatios {
    /// Share for a slot
    #[must_use]
    pub const fn ratio(&self, meal_type: MealType) -> f64 {
        match meal_type {
            MealType::Breakfast => self.breakfast,
            MealType::Lunch => self.lunch,
            MealType::Dinner => self.dinner,
            MealType::Snack => self.snack,
        }
    }

    /// Sum of all shares
    #[must_use]
    pub fn total(&self) -> f64 {
        self.breakfast + self.lunch + self.dinner + self.snack
    }
}

/// Serving time per meal slot
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MealTimes {
    /// Breakfast (07:30)
    pub breakfast: NaiveTime,
    /// Lunch (12:30)
    pub lunch: NaiveTime,
    /// Snack (16:00)
    pub snack: NaiveTime,
    /// Dinner (19:30)
    pub dinner: NaiveTime,
}

impl MealTimes {
    /// Serving time for a slot
    #[must_use]
    pub const fn time(&self, meal_type: MealType) -> NaiveTime {
        match meal_type {
            MealType::Breakfast => self.breakfast,
            MealType::Lunch => self.lunch,
            MealType::Dinner => self.dinner,
            MealType::Snack => self.snack,
        }
    }
}

impl Default for MealTimes {
    fn default() -> Self {
        let at = |hour, minute| NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default();
        Self {
            breakfast: at(7, 30),
            lunch: at(12, 30),
            snack: at(16, 0),
            dinner: at(19, 30),
        }
    }
}

/// Meal plan assembly configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssemblyConfig {
    /// Vata ratios (0.25 / 0.45 / 0.25 / 0.05)
    pub vata: SlotRatios,
    /// Pitta ratios (0.30 / 0.40 / 0.25 / 0.05)
    pub pitta: SlotRatios,
    /// Kapha ratios (0.20 / 0.50 / 0.20 / 0.10)
    pub kapha: SlotRatios,
    /// Balanced ratios for Tridosha (0.25 / 0.40 / 0.25 / 0.10)
    pub tridosha: SlotRatios,
    /// Serving times
    pub meal_times: MealTimes,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            vata: SlotRatios {
                breakfast: 0.25,
                lunch: 0.45,
                dinner: 0.25,
                snack: 0.05,
            },
            pitta: SlotRatios {
                breakfast: 0.30,
                lunch: 0.40,
                dinner: 0.25,
                snack: 0.05,
            },
            kapha: SlotRatios {
                breakfast: 0.20,
                lunch: 0.50,
                dinner: 0.20,
                snack: 0.10,
            },
            tridosha: SlotRatios {
                breakfast: 0.25,
                lunch: 0.40,
                dinner: 0.25,
                snack: 0.10,
            },
            meal_times: MealTimes::default(),
        }
    }
}

impl AssemblyConfig {
    /// Ratios for a first-listed dosha, `None` meaning Tridosha
    #[must_use]
    pub const fn ratios_for(&self, dosha: Option<Dosha>) -> &SlotRatios {
        match dosha {
            Some(Dosha::Vata) => &self.vata,
            Some(Dosha::Pitta) => &self.pitta,
            Some(Dosha::Kapha) => &self.kapha,
            None => &self.tridosha,
        }
    }

    /// Every ratio set with its name
    #[must_use]
    pub const fn all_ratios(&self) -> [(&'static str, &SlotRatios); 4] {
        [
            ("vata", &self.vata),
            ("pitta", &self.pitta),
            ("kapha", &self.kapha),
            ("tridosha", &self.tridosha),
        ]
    }
}
