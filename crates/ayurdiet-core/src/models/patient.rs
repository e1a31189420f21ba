// ABOUTME: Patient profile models consumed read-only by the plan engine
// ABOUTME: Constitution, dosha scores, vitals, diet type, activity and meal frequency enums
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// One of the three constitutional categories
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dosha {
    /// Air and space
    #[serde(alias = "vata")]
    Vata,
    /// Fire and water
    #[serde(alias = "pitta")]
    Pitta,
    /// Earth and water
    #[serde(alias = "kapha")]
    Kapha,
}

impl Dosha {
    /// All doshas in canonical order
    pub const ALL: [Self; 3] = [Self::Vata, Self::Pitta, Self::Kapha];

    /// Display name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Vata => "Vata",
            Self::Pitta => "Pitta",
            Self::Kapha => "Kapha",
        }
    }
}

impl fmt::Display for Dosha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primary constitution: single, dual or balanced dosha combination
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Constitution {
    /// Vata dominant
    Vata,
    /// Pitta dominant
    Pitta,
    /// Kapha dominant
    Kapha,
    /// Vata and Pitta co-dominant
    #[serde(rename = "Vata-Pitta")]
    VataPitta,
    /// Vata and Kapha co-dominant
    #[serde(rename = "Vata-Kapha")]
    VataKapha,
    /// Pitta and Kapha co-dominant
    #[serde(rename = "Pitta-Kapha")]
    PittaKapha,
    /// All three balanced
    Tridosha,
}

impl Constitution {
    /// Doshas making up this constitution, in listed order
    #[must_use]
    pub const fn doshas(&self) -> &'static [Dosha] {
        match self {
            Self::Vata => &[Dosha::Vata],
            Self::Pitta => &[Dosha::Pitta],
            Self::Kapha => &[Dosha::Kapha],
            Self::VataPitta => &[Dosha::Vata, Dosha::Pitta],
            Self::VataKapha => &[Dosha::Vata, Dosha::Kapha],
            Self::PittaKapha => &[Dosha::Pitta, Dosha::Kapha],
            Self::Tridosha => &[Dosha::Vata, Dosha::Pitta, Dosha::Kapha],
        }
    }

    /// First-listed dosha, or `None` for a balanced Tridosha constitution
    ///
    /// Dual constitutions only ever consult their first component.
    #[must_use]
    pub const fn first_dosha(&self) -> Option<Dosha> {
        match self {
            Self::Vata | Self::VataPitta | Self::VataKapha => Some(Dosha::Vata),
            Self::Pitta | Self::PittaKapha => Some(Dosha::Pitta),
            Self::Kapha => Some(Dosha::Kapha),
            Self::Tridosha => None,
        }
    }

    /// Display name matching the serialized form
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Vata => "Vata",
            Self::Pitta => "Pitta",
            Self::Kapha => "Kapha",
            Self::VataPitta => "Vata-Pitta",
            Self::VataKapha => "Vata-Kapha",
            Self::PittaKapha => "Pitta-Kapha",
            Self::Tridosha => "Tridosha",
        }
    }

    /// Classify dosha scores into a constitution
    ///
    /// All three within `band` points of the top score is Tridosha, the top two
    /// within `band` is the dual type, otherwise the single dominant dosha.
    #[must_use]
    pub fn from_scores(scores: &ConstitutionScores, band: u8) -> Self {
        let mut ranked: Vec<(Dosha, u8)> = Dosha::ALL
            .iter()
            .map(|dosha| (*dosha, scores.get(*dosha)))
            .collect();
        // Stable sort keeps canonical order among equal scores
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        let (top, top_score) = ranked[0];
        let (second, second_score) = ranked[1];
        let (_, third_score) = ranked[2];

        if top_score.saturating_sub(third_score) <= band {
            return Self::Tridosha;
        }
        if top_score.saturating_sub(second_score) <= band {
            return Self::dual(top, second);
        }
        Self::single(top)
    }

    const fn single(dosha: Dosha) -> Self {
        match dosha {
            Dosha::Vata => Self::Vata,
            Dosha::Pitta => Self::Pitta,
            Dosha::Kapha => Self::Kapha,
        }
    }

    const fn dual(a: Dosha, b: Dosha) -> Self {
        match (a, b) {
            (Dosha::Vata, Dosha::Pitta) | (Dosha::Pitta, Dosha::Vata) => Self::VataPitta,
            (Dosha::Vata, Dosha::Kapha) | (Dosha::Kapha, Dosha::Vata) => Self::VataKapha,
            (Dosha::Pitta, Dosha::Kapha) | (Dosha::Kapha, Dosha::Pitta) => Self::PittaKapha,
            (single, _) => Self::single(single),
        }
    }
}

impl fmt::Display for Constitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Percentage score per dosha, summing to 100
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ConstitutionScores {
    /// Vata percentage
    pub vata: u8,
    /// Pitta percentage
    pub pitta: u8,
    /// Kapha percentage
    pub kapha: u8,
}

impl ConstitutionScores {
    /// Score for a single dosha
    #[must_use]
    pub const fn get(&self, dosha: Dosha) -> u8 {
        match dosha {
            Dosha::Vata => self.vata,
            Dosha::Pitta => self.pitta,
            Dosha::Kapha => self.kapha,
        }
    }

    /// Sum of the three scores
    #[must_use]
    pub fn total(&self) -> u16 {
        u16::from(self.vata) + u16::from(self.pitta) + u16::from(self.kapha)
    }

    /// Derive percentages from an assessment answer history
    ///
    /// Each answer counts one vote for its dosha. Percentages are rounded with
    /// the largest-remainder method so they always sum to exactly 100; equal
    /// remainders favour Vata, then Pitta, then Kapha.
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` when the history is empty.
    pub fn from_assessment(answers: &[Dosha]) -> AppResult<Self> {
        if answers.is_empty() {
            return Err(AppError::invalid_input(
                "Constitution assessment requires at least one answer",
            ));
        }

        let total = answers.len();
        let counts = Dosha::ALL.map(|dosha| answers.iter().filter(|a| **a == dosha).count());

        let mut shares = counts.map(|count| (count * 100) / total);
        let mut remainders: Vec<(usize, usize)> = counts
            .iter()
            .enumerate()
            .map(|(idx, count)| (idx, (count * 100) % total))
            .collect();
        remainders.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        let assigned: usize = shares.iter().sum();
        for (idx, _) in remainders.iter().take(100 - assigned) {
            shares[*idx] += 1;
        }

        let to_u8 = |value: usize| {
            u8::try_from(value).map_err(|_| AppError::internal("Constitution share exceeds 100"))
        };
        Ok(Self {
            vata: to_u8(shares[0])?,
            pitta: to_u8(shares[1])?,
            kapha: to_u8(shares[2])?,
        })
    }
}

/// Biological sex used for BMR, hydration and micronutrient brackets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BiologicalSex {
    /// Male
    Male,
    /// Female
    Female,
}

/// Patient diet type, enforced as a hard filter before scoring
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DietType {
    /// No meat, fish or egg
    Vegetarian,
    /// Vegetarian without dairy
    Vegan,
    /// No diet-type exclusions
    #[default]
    NonVegetarian,
}

/// Physical activity level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    #[default]
    Sedentary,
    /// Light exercise 1-3 days/week
    LightlyActive,
    /// Moderate exercise 3-5 days/week
    ModeratelyActive,
    /// Hard exercise 6-7 days/week
    VeryActive,
    /// Very hard exercise or physical job
    ExtremelyActive,
}

impl ActivityLevel {
    /// Parse activity level from a free-text value
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "sedentary" => Some(Self::Sedentary),
            "lightly_active" | "light" | "lightly" => Some(Self::LightlyActive),
            "moderately_active" | "moderate" | "moderately" => Some(Self::ModeratelyActive),
            "very_active" | "very" | "active" => Some(Self::VeryActive),
            "extremely_active" | "extreme" | "extremely" => Some(Self::ExtremelyActive),
            _ => None,
        }
    }
}

/// Number of meals eaten per day
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum MealFrequency {
    /// One or two meals
    #[serde(rename = "1-2")]
    OneToTwo,
    /// Three meals
    #[default]
    #[serde(rename = "3")]
    Three,
    /// Four to five meals
    #[serde(rename = "4-5")]
    FourToFive,
    /// Six or more meals
    #[serde(rename = "6+")]
    SixOrMore,
}

impl MealFrequency {
    /// Whether the bucket indicates frequent eating (4 or more meals)
    #[must_use]
    pub const fn is_frequent(&self) -> bool {
        matches!(self, Self::FourToFive | Self::SixOrMore)
    }
}

/// Self-reported cooking skill
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum CookingSkill {
    /// Simple recipes only
    #[default]
    Beginner,
    /// Comfortable with most recipes
    Intermediate,
    /// Any recipe
    Advanced,
}

/// Patient profile (read-only input to the engine)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientProfile {
    /// Patient identifier
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Age in whole years
    #[serde(default)]
    pub age: Option<u32>,
    /// Biological sex
    pub biological_sex: BiologicalSex,
    /// Body weight in kilograms
    #[serde(default)]
    pub weight_kg: Option<f64>,
    /// Height in centimeters
    #[serde(default)]
    pub height_cm: Option<f64>,
    /// Primary constitution
    pub primary_constitution: Constitution,
    /// Per-dosha percentages
    #[serde(default)]
    pub constitution_scores: ConstitutionScores,
    /// Diet type
    #[serde(default)]
    pub diet_type: DietType,
    /// Health concern tags
    #[serde(default)]
    pub health_concerns: BTreeSet<String>,
    /// Allergy tags
    #[serde(default)]
    pub allergies: BTreeSet<String>,
    /// Activity level
    #[serde(default)]
    pub activity_level: ActivityLevel,
    /// Meal frequency bucket
    #[serde(default)]
    pub meal_frequency: MealFrequency,
    /// Cooking skill
    #[serde(default)]
    pub cooking_skill: CookingSkill,
    /// Preferred cuisines
    #[serde(default)]
    pub preferred_cuisines: BTreeSet<String>,
}

/// Vital statistics that passed validation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vitals {
    /// Age in years (> 0)
    pub age: u32,
    /// Weight in kilograms (> 0)
    pub weight_kg: f64,
    /// Height in centimeters (> 0)
    pub height_cm: f64,
}

impl PatientProfile {
    /// Validated vitals
    ///
    /// # Errors
    ///
    /// Returns `INVALID_PROFILE` when age, weight or height is missing or non-positive.
    pub fn vitals(&self) -> AppResult<Vitals> {
        let age = self
            .age
            .filter(|age| *age > 0)
            .ok_or_else(|| self.invalid("age"))?;
        let weight_kg = self
            .weight_kg
            .filter(|w| w.is_finite() && *w > 0.0)
            .ok_or_else(|| self.invalid("weight"))?;
        let height_cm = self
            .height_cm
            .filter(|h| h.is_finite() && *h > 0.0)
            .ok_or_else(|| self.invalid("height"))?;

        Ok(Vitals {
            age,
            weight_kg,
            height_cm,
        })
    }

    fn invalid(&self, field: &str) -> AppError {
        AppError::invalid_profile(format!("Patient {field} is missing or not positive"))
            .with_resource_id(self.id.clone())
    }
}
