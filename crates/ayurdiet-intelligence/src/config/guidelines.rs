// ABOUTME: Dosha guideline tables used for plan recommendations
// ABOUTME: Favoured tastes, foods to favour and reduce, and lifestyle notes per dosha
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use ayurdiet_core::models::{Constitution, Dosha};
use serde::{Deserialize, Serialize};

/// Dietary and lifestyle guidance for one dosha
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoshaGuideline {
    /// Tastes that pacify the dosha
    pub favoured_tastes: Vec<String>,
    /// Foods to favour
    pub favour: Vec<String>,
    /// Foods to reduce
    pub reduce: Vec<String>,
    /// Lifestyle note
    pub lifestyle: String,
}

impl DoshaGuideline {
    /// Render as recommendation lines prefixed with the dosha name
    #[must_use]
    pub fn render(&self, dosha: Dosha) -> Vec<String> {
        vec![
            format!("{dosha}: favour {} tastes", self.favoured_tastes.join(", ")),
            format!("{dosha}: prefer {}", self.favour.join(", ")),
            format!("{dosha}: reduce {}", self.reduce.join(", ")),
            format!("{dosha}: {}", self.lifestyle),
        ]
    }
}

fn guideline(tastes: &[&str], favour: &[&str], reduce: &[&str], lifestyle: &str) -> DoshaGuideline {
    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| (*item).to_owned()).collect()
    }

    DoshaGuideline {
        favoured_tastes: owned(tastes),
        favour: owned(favour),
        reduce: owned(reduce),
        lifestyle: lifestyle.to_owned(),
    }
}

/// Guideline table for all three doshas
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuidelinesConfig {
    /// Vata guidance
    pub vata: DoshaGuideline,
    /// Pitta guidance
    pub pitta: DoshaGuideline,
    /// Kapha guidance
    pub kapha: DoshaGuideline,
}

impl Default for GuidelinesConfig {
    fn default() -> Self {
        Self {
            vata: guideline(
                &["sweet", "sour", "salty"],
                &["warm cooked meals", "root vegetables", "ghee and healthy oils"],
                &["raw salads", "cold drinks", "dry snacks"],
                "keep regular meal times and favour warm, grounding routines",
            ),
            pitta: guideline(
                &["sweet", "bitter", "astringent"],
                &["cooling foods", "leafy greens", "coconut and cucumber"],
                &["chillies", "fried foods", "fermented and sour foods"],
                "avoid skipping meals and eat the largest meal at midday",
            ),
            kapha: guideline(
                &["pungent", "bitter", "astringent"],
                &["light warm meals", "legumes", "spiced vegetables"],
                &["heavy dairy", "sweets", "deep-fried foods"],
                "keep dinner light and stay active after meals",
            ),
        }
    }
}

impl GuidelinesConfig {
    /// Guidance for a dosha
    #[must_use]
    pub const fn for_dosha(&self, dosha: Dosha) -> &DoshaGuideline {
        match dosha {
            Dosha::Vata => &self.vata,
            Dosha::Pitta => &self.pitta,
            Dosha::Kapha => &self.kapha,
        }
    }

    /// Recommendation lines for every dosha of a constitution, in listed order
    #[must_use]
    pub fn recommendations(&self, constitution: Constitution) -> Vec<String> {
        constitution
            .doshas()
            .iter()
            .flat_map(|dosha| self.for_dosha(*dosha).render(*dosha))
            .collect()
    }
}
