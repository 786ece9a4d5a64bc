use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::classifier::Category;
use crate::elements::{self, PromptElement};
use crate::intent::{Intent, Platform};
use crate::planner::{self, Tier};
use crate::scoring::MIN_SCORE;

pub const MAX_WEAKNESSES: usize = 3;
pub const MAX_IMPROVEMENT_CANDIDATES: usize = 5;

/// Content fingerprint binding an analysis to the exact text it describes.
pub fn fingerprint(text: &str) -> String {
    format!("{:x}", md5::compute(text.as_bytes()))
}

/// Snapshot of one analysis pass. Superseded, never mutated, by the next pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub fingerprint: String,
    pub intent: Intent,
    pub clarity_score: u8,
    pub specificity_score: u8,
    pub structure_score: u8,
    pub strength_score: u8,
    pub category: Category,
    pub confidence: u8,
    pub token_estimate: usize,
    pub readability_score: u8,
    pub missing_elements: BTreeSet<PromptElement>,
    pub detected_elements: BTreeSet<PromptElement>,
    pub weaknesses: Vec<String>,
    pub improvement_candidates: Vec<String>,
}

impl AnalysisRecord {
    /// Default record for empty or whitespace-only text.
    pub fn empty(text: &str, intent: Intent) -> Self {
        let detected = BTreeSet::new();
        Self {
            fingerprint: fingerprint(text),
            intent,
            clarity_score: MIN_SCORE,
            specificity_score: MIN_SCORE,
            structure_score: MIN_SCORE,
            strength_score: MIN_SCORE,
            category: Category::General,
            confidence: 0,
            token_estimate: 0,
            readability_score: 0,
            missing_elements: elements::missing_elements(&detected, intent),
            detected_elements: detected,
            weaknesses: Vec::new(),
            improvement_candidates: Vec::new(),
        }
    }

    pub fn tier(&self) -> Tier {
        planner::plan_tier(self.strength_score as f64)
    }

    /// True when this record was derived from `text` under `intent`.
    pub fn matches(&self, text: &str, intent: Intent) -> bool {
        self.intent == intent && self.fingerprint == fingerprint(text)
    }

    pub fn is_missing(&self, element: PromptElement) -> bool {
        self.missing_elements.contains(&element)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterCounts {
    pub original: usize,
    pub optimized: usize,
}

/// Result of one optimize invocation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationRecord {
    pub id: String,
    pub original_text: String,
    pub optimized_text: String,
    pub improvements: Vec<String>,
    pub intent: Intent,
    pub platform: Platform,
    pub tone: u8,
    pub tier: Tier,
    pub timestamp: DateTime<Utc>,
    pub character_counts: CharacterCounts,
    pub strength_score: u8,
    pub projected_score: u8,
    pub weaknesses: Vec<String>,
}

impl OptimizationRecord {
    /// Relative length change of the optimized text, in whole percent.
    pub fn growth_percent(&self) -> i64 {
        let original = self.character_counts.original as f64;
        if original == 0.0 {
            return 0;
        }
        let optimized = self.character_counts.optimized as f64;
        ((optimized - original) / original * 100.0).round() as i64
    }

    pub fn short_id(&self) -> &str {
        self.id.get(..8).unwrap_or(&self.id)
    }
}
