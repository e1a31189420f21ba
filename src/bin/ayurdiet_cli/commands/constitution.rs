// ABOUTME: Constitution assessment command for ayurdiet-cli
// ABOUTME: Turns an answer history into dosha percentages and a classified constitution
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use ayurdiet_core::constants::scoring::CO_DOMINANCE_BAND;
use ayurdiet_core::models::{Constitution, ConstitutionScores, Dosha};
use serde_json::json;
use tracing::info;

use crate::helpers::display::print_json;

/// Score the answers and classify the constitution
pub fn assess(answers: &[Dosha], band: Option<u8>) -> Result<()> {
    let band = band.unwrap_or(CO_DOMINANCE_BAND);
    let scores = ConstitutionScores::from_assessment(answers)?;
    let constitution = Constitution::from_scores(&scores, band);

    info!(answers = answers.len(), %constitution, "Assessed constitution");
    print_json(&json!({
        "scores": scores,
        "constitution": constitution,
        "band": band,
    }))
}
