// ABOUTME: Integration tests for constitution assessment scoring and classification
// ABOUTME: Covers percentage rounding, empty assessments and co-dominance band classification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use ayurdiet_core::constants::scoring::CO_DOMINANCE_BAND;
use ayurdiet_core::errors::ErrorCode;
use ayurdiet_core::models::{Constitution, ConstitutionScores, Dosha};

fn answers(vata: usize, pitta: usize, kapha: usize) -> Vec<Dosha> {
    let mut answers = vec![Dosha::Vata; vata];
    answers.extend(vec![Dosha::Pitta; pitta]);
    answers.extend(vec![Dosha::Kapha; kapha]);
    answers
}

fn scores(vata: u8, pitta: u8, kapha: u8) -> ConstitutionScores {
    ConstitutionScores { vata, pitta, kapha }
}

#[test]
fn test_assessment_percentages_sum_to_100() {
    for (v, p, k) in [(2, 1, 0), (1, 1, 1), (5, 4, 2), (7, 0, 0), (3, 3, 1)] {
        let result = ConstitutionScores::from_assessment(&answers(v, p, k)).unwrap();
        assert_eq!(result.total(), 100, "{v}/{p}/{k}");
    }
}

#[test]
fn test_largest_remainder_favours_canonical_order() {
    let even = ConstitutionScores::from_assessment(&answers(1, 1, 1)).unwrap();
    assert_eq!(even, scores(34, 33, 33));

    let skewed = ConstitutionScores::from_assessment(&answers(2, 1, 0)).unwrap();
    assert_eq!(skewed, scores(67, 33, 0));
}

#[test]
fn test_empty_assessment_is_invalid_input() {
    let error = ConstitutionScores::from_assessment(&[]).unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
}

#[test]
fn test_single_dominant_dosha() {
    let result = ConstitutionScores::from_assessment(&answers(6, 3, 1)).unwrap();
    assert_eq!(
        Constitution::from_scores(&result, CO_DOMINANCE_BAND),
        Constitution::Vata
    );
}

#[test]
fn test_co_dominant_pair_is_dual() {
    assert_eq!(
        Constitution::from_scores(&scores(10, 50, 40), CO_DOMINANCE_BAND),
        Constitution::PittaKapha
    );
    // Pair order does not depend on which score is higher
    assert_eq!(
        Constitution::from_scores(&scores(35, 20, 45), CO_DOMINANCE_BAND),
        Constitution::VataKapha
    );
}

#[test]
fn test_balanced_scores_are_tridosha() {
    assert_eq!(
        Constitution::from_scores(&scores(34, 33, 33), CO_DOMINANCE_BAND),
        Constitution::Tridosha
    );
    assert_eq!(
        Constitution::from_scores(&scores(40, 35, 25), CO_DOMINANCE_BAND),
        Constitution::Tridosha
    );
}

#[test]
fn test_band_width_controls_classification() {
    let result = scores(50, 50, 0);
    assert_eq!(Constitution::from_scores(&result, 0), Constitution::VataPitta);

    let result = scores(50, 45, 5);
    assert_eq!(Constitution::from_scores(&result, 0), Constitution::Vata);
    assert_eq!(Constitution::from_scores(&result, 50), Constitution::Tridosha);
}

#[test]
fn test_classified_constitution_drives_first_dosha() {
    let result = ConstitutionScores::from_assessment(&answers(1, 5, 4)).unwrap();
    let constitution = Constitution::from_scores(&result, CO_DOMINANCE_BAND);
    assert_eq!(constitution, Constitution::PittaKapha);
    assert_eq!(constitution.first_dosha(), Some(Dosha::Pitta));
}
