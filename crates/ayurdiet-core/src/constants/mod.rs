// ABOUTME: Application-wide constants for nutrition math and plan limits
// ABOUTME: Atwater energy factors, calorie floor, duration bounds, and acceptance thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants shared by the engine crates.

/// Energy density of macronutrients (Atwater general factors)
pub mod energy {
    /// Protein energy density (kcal per gram)
    pub const PROTEIN_KCAL_PER_G: f64 = 4.0;
    /// Carbohydrate energy density (kcal per gram)
    pub const CARBS_KCAL_PER_G: f64 = 4.0;
    /// Fat energy density (kcal per gram)
    pub const FAT_KCAL_PER_G: f64 = 9.0;
}

/// Plan request limits
pub mod limits {
    /// Shortest plan that can be generated (days)
    pub const MIN_PLAN_DURATION_DAYS: u32 = 1;
    /// Longest plan that can be generated (days)
    pub const MAX_PLAN_DURATION_DAYS: u32 = 365;
    /// Duration used when the request does not specify one
    pub const DEFAULT_PLAN_DURATION_DAYS: u32 = 7;
    /// Daily calorie target never drops below this value
    pub const CALORIE_FLOOR_KCAL: u32 = 1200;
    /// Default maximum preparation + cooking time (minutes)
    pub const DEFAULT_MAX_COOKING_MINUTES: u32 = 60;
}

/// Recipe scoring thresholds
pub mod scoring {
    /// Recipes scoring below this value are excluded from assembly
    pub const ACCEPTANCE_THRESHOLD: f64 = 0.30;
    /// Two constitution scores within this many points are co-dominant
    pub const CO_DOMINANCE_BAND: u8 = 20;
}
