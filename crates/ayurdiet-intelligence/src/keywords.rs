// ABOUTME: Word-aware ingredient keyword matching for diet filters, restrictions and allergies
// ABOUTME: Tokenizes ingredient names and matches whole words with plural tolerance and exceptions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Ingredient keyword matching.
//!
//! Matching works on lowercase alphanumeric words, so `"egg"` matches
//! `"2 large eggs"` but not `"eggplant"`. Multi-word keywords such as
//! `"coconut milk"` must match consecutive words.

use std::ops::Range;

use ayurdiet_core::models::RecipeCandidate;

use crate::config::IngredientKeywords;

/// Split text into lowercase alphanumeric words
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Whole-word equality allowing a trailing plural suffix on either side
fn word_matches(token: &str, keyword: &str) -> bool {
    if token == keyword {
        return true;
    }
    let plural_of = |long: &str, short: &str| {
        let regular = long
            .strip_prefix(short)
            .is_some_and(|suffix| suffix == "s" || suffix == "es");
        // anchovy -> anchovies
        let y_to_ies = short
            .strip_suffix('y')
            .and_then(|stem| long.strip_prefix(stem))
            .is_some_and(|suffix| suffix == "ies");
        regular || y_to_ies
    };
    plural_of(token, keyword) || plural_of(keyword, token)
}

/// A compiled set of single- or multi-word keywords
#[derive(Debug, Clone, Default)]
pub struct KeywordSet {
    phrases: Vec<Vec<String>>,
}

impl KeywordSet {
    /// Compile keywords, ignoring blank entries
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases = keywords
            .into_iter()
            .map(|keyword| tokenize(keyword.as_ref()))
            .filter(|phrase| !phrase.is_empty())
            .collect();
        Self { phrases }
    }

    /// Token ranges covered by any keyword
    fn spans(&self, tokens: &[String]) -> Vec<Range<usize>> {
        let mut spans = Vec::new();
        for phrase in &self.phrases {
            if phrase.len() > tokens.len() {
                continue;
            }
            for start in 0..=tokens.len() - phrase.len() {
                let hit = phrase
                    .iter()
                    .zip(&tokens[start..])
                    .all(|(keyword, token)| word_matches(token, keyword));
                if hit {
                    spans.push(start..start + phrase.len());
                }
            }
        }
        spans
    }

    /// Whether any keyword occurs in the text
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        !self.spans(&tokenize(text)).is_empty()
    }

    /// Whether any keyword occurs outside the spans excused by `exceptions`
    #[must_use]
    pub fn matches_except(&self, text: &str, exceptions: &Self) -> bool {
        let tokens = tokenize(text);
        let excused = exceptions.spans(&tokens);
        self.spans(&tokens).iter().any(|span| {
            !excused
                .iter()
                .any(|cover| cover.start <= span.start && span.end <= cover.end)
        })
    }
}

/// Ingredient categories found in a recipe
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngredientFlags {
    /// Contains meat or poultry
    pub meat: bool,
    /// Contains fish or shellfish
    pub fish: bool,
    /// Contains egg
    pub egg: bool,
    /// Contains dairy
    pub dairy: bool,
    /// Contains wheat-family grains
    pub gluten: bool,
}

/// Compiled keyword tables for one scoring run
#[derive(Debug, Clone)]
pub struct IngredientMatcher {
    meat: KeywordSet,
    fish: KeywordSet,
    egg: KeywordSet,
    dairy: KeywordSet,
    dairy_exceptions: KeywordSet,
    gluten: KeywordSet,
}

impl IngredientMatcher {
    /// Compile the configured keyword tables
    #[must_use]
    pub fn new(keywords: &IngredientKeywords) -> Self {
        Self {
            meat: KeywordSet::new(&keywords.meat),
            fish: KeywordSet::new(&keywords.fish),
            egg: KeywordSet::new(&keywords.egg),
            dairy: KeywordSet::new(&keywords.dairy),
            dairy_exceptions: KeywordSet::new(&keywords.dairy_exceptions),
            gluten: KeywordSet::new(&keywords.gluten),
        }
    }

    /// Whether an ingredient name is dairy, excusing plant-based look-alikes
    #[must_use]
    pub fn is_dairy(&self, ingredient: &str) -> bool {
        self.dairy.matches_except(ingredient, &self.dairy_exceptions)
    }

    /// Categories present across every ingredient of a recipe
    #[must_use]
    pub fn flags(&self, recipe: &RecipeCandidate) -> IngredientFlags {
        recipe
            .ingredients
            .iter()
            .fold(IngredientFlags::default(), |flags, ingredient| {
                let name = ingredient.name.as_str();
                IngredientFlags {
                    meat: flags.meat || self.meat.matches(name),
                    fish: flags.fish || self.fish.matches(name),
                    egg: flags.egg || self.egg.matches(name),
                    dairy: flags.dairy || self.is_dairy(name),
                    gluten: flags.gluten || self.gluten.matches(name),
                }
            })
    }

    /// Whether an ingredient triggers an allergy tag
    ///
    /// Category tags (dairy, gluten, egg, fish, meat) use the category tables;
    /// any other tag is matched as a literal keyword.
    #[must_use]
    pub fn triggers_allergy(&self, ingredient: &str, allergy: &str) -> bool {
        let tag = allergy.trim().to_lowercase();
        match tag.as_str() {
            "" => false,
            "dairy" | "lactose" | "milk" => self.is_dairy(ingredient),
            "gluten" | "wheat" => self.gluten.matches(ingredient),
            "egg" | "eggs" => self.egg.matches(ingredient),
            "fish" | "seafood" | "shellfish" => self.fish.matches(ingredient),
            "meat" => self.meat.matches(ingredient),
            _ => KeywordSet::new([tag.as_str()]).matches(ingredient),
        }
    }

    /// First allergy tag triggered by any ingredient of a recipe
    pub fn allergy_conflict<'a, I>(&self, recipe: &RecipeCandidate, allergies: I) -> Option<&'a str>
    where
        I: IntoIterator<Item = &'a String>,
    {
        allergies
            .into_iter()
            .find(|allergy| {
                recipe
                    .ingredients
                    .iter()
                    .any(|ingredient| self.triggers_allergy(&ingredient.name, allergy))
            })
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_aware_matching() {
        let eggs = KeywordSet::new(["egg"]);
        assert!(eggs.matches("2 large Eggs"));
        assert!(!eggs.matches("roasted eggplant"));
    }

    #[test]
    fn test_y_plural_matches_ies() {
        let fish = KeywordSet::new(["anchovy"]);
        assert!(fish.matches("Salted Anchovies"));
        assert!(fish.matches("1 anchovy fillet"));

        let berries = KeywordSet::new(["berries"]);
        assert!(berries.matches("a handful of berry"));
    }

    #[test]
    fn test_plant_milk_is_not_dairy() {
        let matcher = IngredientMatcher::new(&IngredientKeywords::default());
        assert!(matcher.is_dairy("whole milk"));
        assert!(!matcher.is_dairy("coconut milk"));
        assert!(!matcher.is_dairy("almond butter"));
        assert!(matcher.is_dairy("coconut milk and butter"));
    }

    #[test]
    fn test_allergy_categories() {
        let matcher = IngredientMatcher::new(&IngredientKeywords::default());
        assert!(matcher.triggers_allergy("paneer cubes", "Dairy"));
        assert!(matcher.triggers_allergy("roasted peanuts", "peanut"));
        assert!(!matcher.triggers_allergy("rice flour", "gluten"));
    }
}
