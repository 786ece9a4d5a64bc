use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::elements::{self, PromptElement};
use crate::error::Result;
use crate::lexicon;

/// Lexical and structural signals extracted from one prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    pub word_count: usize,
    pub sentence_count: usize,
    pub avg_sentence_length: f64,
    pub vague_word_count: usize,
    pub pronoun_count: usize,
    pub pronoun_ratio: f64,
    pub has_numeric: bool,
    /// Number of technical pattern kinds present (all-caps, dotted, underscored).
    pub technical_categories: usize,
    pub quantifier_phrases: usize,
    pub vague_adjectives: usize,
    pub precise_descriptors: usize,
    pub has_list_markers: bool,
    pub has_sections: bool,
    pub flow_connectives: usize,
    pub detected: BTreeSet<PromptElement>,
}

impl FeatureSet {
    pub fn has(&self, element: PromptElement) -> bool {
        self.detected.contains(&element)
    }
}

#[derive(Clone)]
pub struct FeatureExtractor {
    sentence_split: Regex,
    numeric: Regex,
    technical: Vec<Regex>,
    list_marker: Regex,
    section_break: Regex,
}

impl FeatureExtractor {
    pub fn new() -> Result<Self> {
        let technical = vec![
            Regex::new(r"\b[A-Z]{2,}\b")?,
            // module.item or file.ext; skips "e.g" and "end.Next"
            Regex::new(r"\b[A-Za-z_][A-Za-z0-9_]+\.[a-z_][A-Za-z0-9_]*\b")?,
            Regex::new(r"\b[A-Za-z0-9]+_[A-Za-z0-9_]+\b")?,
        ];

        Ok(Self {
            sentence_split: Regex::new(r"[.!?]+")?,
            numeric: Regex::new(r"\d+(?:\.\d+)?")?,
            technical,
            list_marker: Regex::new(r"(?m)^\s*(?:[-*•]|\d+[.)])\s+")?,
            section_break: Regex::new(r"\n[ \t]*\n")?,
        })
    }

    pub fn extract(&self, text: &str) -> FeatureSet {
        if text.trim().is_empty() {
            return FeatureSet::default();
        }

        let tokens: Vec<String> = text.split_whitespace().map(normalize_token).collect();
        let word_count = tokens.len();
        let sentence_count = self
            .sentence_split
            .split(text)
            .filter(|fragment| !fragment.trim().is_empty())
            .count();
        let avg_sentence_length = word_count as f64 / sentence_count.max(1) as f64;

        let pronoun_count = count_tokens(&tokens, lexicon::PRONOUNS);
        let pronoun_ratio = if word_count == 0 {
            0.0
        } else {
            pronoun_count as f64 / word_count as f64
        };

        let lowercase = text.to_lowercase();
        let quantifier_phrases = lexicon::QUANTIFIER_PHRASES
            .iter()
            .filter(|phrase| lowercase.contains(*phrase))
            .count();

        FeatureSet {
            word_count,
            sentence_count,
            avg_sentence_length,
            vague_word_count: count_tokens(&tokens, lexicon::VAGUE_WORDS),
            pronoun_count,
            pronoun_ratio,
            has_numeric: self.numeric.is_match(text),
            technical_categories: self.technical.iter().filter(|re| re.is_match(text)).count(),
            quantifier_phrases,
            vague_adjectives: count_tokens(&tokens, lexicon::VAGUE_ADJECTIVES),
            precise_descriptors: count_tokens(&tokens, lexicon::PRECISE_DESCRIPTORS),
            has_list_markers: self.list_marker.is_match(text),
            has_sections: self.section_break.is_match(text),
            flow_connectives: count_tokens(&tokens, lexicon::FLOW_CONNECTIVES),
            detected: elements::detected_elements(text),
        }
    }
}

fn normalize_token(raw: &str) -> String {
    raw.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase()
}

fn count_tokens(tokens: &[String], lexicon: &[&str]) -> usize {
    tokens
        .iter()
        .filter(|token| lexicon.contains(&token.as_str()))
        .count()
}
