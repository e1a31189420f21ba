// ABOUTME: Argument parsing helpers for ayurdiet-cli
// ABOUTME: Turns command-line flags into doshas and typed plan preferences
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;

use anyhow::{anyhow, Result};
use ayurdiet_core::models::{ActivityLevel, Dosha, PlanPreferences};

use crate::PlanArgs;

/// Parse a dosha name, case-insensitive
pub fn parse_dosha(value: &str) -> Result<Dosha, String> {
    Dosha::ALL
        .into_iter()
        .find(|dosha| dosha.as_str().eq_ignore_ascii_case(value.trim()))
        .ok_or_else(|| format!("unknown dosha '{value}' (expected vata, pitta or kapha)"))
}

/// Build plan preferences from the shared planning flags
pub fn preferences_from_args(args: &PlanArgs) -> Result<PlanPreferences> {
    let activity_level = args
        .activity_level
        .as_deref()
        .map(|level| {
            ActivityLevel::from_str_lossy(level)
                .ok_or_else(|| anyhow!("Unknown activity level '{level}'"))
        })
        .transpose()?;

    let preferences = PlanPreferences {
        duration: args.duration,
        target_calories: args.target_calories,
        start_date: args.start_date,
        health_conditions: args.conditions.clone(),
        dietary_restrictions: args.restrictions.iter().cloned().map(Into::into).collect(),
        activity_level,
        goals: args.goals.iter().cloned().map(Into::into).collect(),
        max_cooking_minutes: args.max_cooking_minutes,
        extensions: BTreeMap::new(),
    };
    preferences.duration_days()?;
    Ok(preferences)
}
