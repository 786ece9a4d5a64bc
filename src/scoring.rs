//! Deterministic quality scores derived from a [`FeatureSet`].

use serde::{Deserialize, Serialize};

use crate::elements::PromptElement;
use crate::features::FeatureSet;

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 10;

const CLARITY_BASE: f64 = 10.0;
const VAGUE_WORD_PENALTY: f64 = 1.5;
const LONG_SENTENCE_WORDS: f64 = 25.0;
const SHORT_SENTENCE_WORDS: f64 = 5.0;
const PRONOUN_RATIO_LIMIT: f64 = 0.05;

const SPECIFICITY_BASE: f64 = 5.0;
const NUMERIC_BONUS: f64 = 2.0;
const QUANTIFIER_BONUS: f64 = 1.0;
const TECHNICAL_BONUS: f64 = 0.5;
const VAGUE_ADJECTIVE_PENALTY: f64 = 0.5;
const PRECISE_DESCRIPTOR_BONUS: f64 = 1.0;

const STRUCTURE_BASE: f64 = 3.0;
const LIST_BONUS: f64 = 2.0;
const SECTION_BONUS: f64 = 1.0;
const MAX_CONNECTIVE_BONUS: usize = 3;
const ROLE_BONUS: f64 = 2.0;
const FORMAT_BONUS: f64 = 2.0;

const CONFIDENCE_BASE: u32 = 70;
const CONFIDENCE_PER_HIT: u32 = 5;
const MAX_CONFIDENCE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub clarity: u8,
    pub specificity: u8,
    pub structure: u8,
    pub strength: u8,
    pub readability: u8,
}

/// Round half away from zero, then clamp to the bounded score range.
pub fn bounded(raw: f64) -> u8 {
    raw.round().clamp(MIN_SCORE as f64, MAX_SCORE as f64) as u8
}

pub fn clarity(features: &FeatureSet) -> u8 {
    let mut score = CLARITY_BASE - VAGUE_WORD_PENALTY * features.vague_word_count as f64;
    if features.avg_sentence_length > LONG_SENTENCE_WORDS {
        score -= 1.0;
    }
    if features.avg_sentence_length < SHORT_SENTENCE_WORDS {
        score -= 2.0;
    }
    if features.pronoun_ratio > PRONOUN_RATIO_LIMIT {
        score -= 1.0;
    }
    bounded(score)
}

pub fn specificity(features: &FeatureSet) -> u8 {
    let mut score = SPECIFICITY_BASE;
    if features.has_numeric {
        score += NUMERIC_BONUS;
    }
    score += QUANTIFIER_BONUS * features.quantifier_phrases as f64;
    score += TECHNICAL_BONUS * features.technical_categories as f64;
    score -= VAGUE_ADJECTIVE_PENALTY * features.vague_adjectives as f64;
    score += PRECISE_DESCRIPTOR_BONUS * features.precise_descriptors as f64;
    bounded(score)
}

pub fn structure(features: &FeatureSet) -> u8 {
    let mut score = STRUCTURE_BASE;
    if features.has_list_markers {
        score += LIST_BONUS;
    }
    if features.has_sections {
        score += SECTION_BONUS;
    }
    score += features.flow_connectives.min(MAX_CONNECTIVE_BONUS) as f64;
    if features.has(PromptElement::Role) {
        score += ROLE_BONUS;
    }
    if features.has(PromptElement::Format) {
        score += FORMAT_BONUS;
    }
    bounded(score)
}

fn mean(scores: &[u8]) -> f64 {
    scores.iter().map(|s| *s as f64).sum::<f64>() / scores.len() as f64
}

pub fn score(features: &FeatureSet) -> ScoreCard {
    let clarity = clarity(features);
    let specificity = specificity(features);
    let structure = structure(features);

    ScoreCard {
        clarity,
        specificity,
        structure,
        strength: bounded(mean(&[clarity, specificity, structure])),
        readability: mean(&[clarity, structure]).round() as u8,
    }
}

/// Classifier confidence: base 70, +5 per keyword hit, capped at 100.
pub fn confidence(hits: usize) -> u8 {
    (CONFIDENCE_BASE + CONFIDENCE_PER_HIT * hits as u32).min(MAX_CONFIDENCE) as u8
}

/// Crude 4-characters-per-token approximation.
pub fn token_estimate(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}
