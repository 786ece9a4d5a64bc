use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::classifier::{CategoryClassifier, Classification};
use crate::elements::{self, PromptElement};
use crate::error::{PromptLensError, Result};
use crate::features::{FeatureExtractor, FeatureSet};
use crate::intent::{Intent, MAX_TONE};
use crate::planner::{self, Tier};
use crate::records::{
    self, AnalysisRecord, CharacterCounts, OptimizationRecord, MAX_IMPROVEMENT_CANDIDATES, MAX_WEAKNESSES,
};
use crate::scoring::{self, ScoreCard};
use crate::synthesizer::{self, OptimizeOptions, Synthesis};

/// Sub-scores below this are reported as weaknesses.
const WEAKNESS_THRESHOLD: u8 = 7;

/// Entry point to the prompt analysis and optimization engine.
///
/// All operations are synchronous and free of side effects; the analyzer
/// holds only compiled patterns and can be cloned across tasks.
#[derive(Clone)]
pub struct Analyzer {
    extractor: FeatureExtractor,
    classifier: CategoryClassifier,
}

impl Analyzer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            extractor: FeatureExtractor::new()?,
            classifier: CategoryClassifier::new()?,
        })
    }

    pub fn features(&self, text: &str) -> FeatureSet {
        self.extractor.extract(text)
    }

    pub fn analyze(&self, text: &str, intent: Intent) -> AnalysisRecord {
        if text.trim().is_empty() {
            return AnalysisRecord::empty(text, intent);
        }

        let features = self.extractor.extract(text);
        let scores = scoring::score(&features);
        let classification = self.classifier.classify(text);
        let detected = features.detected.clone();
        let missing = elements::missing_elements(&detected, intent);

        let improvement_candidates = missing
            .iter()
            .map(|element| element.suggestion().to_string())
            .take(MAX_IMPROVEMENT_CANDIDATES)
            .collect();

        debug!(
            intent = %intent,
            strength = scores.strength,
            category = %classification.category,
            missing = missing.len(),
            "analyzed prompt"
        );

        AnalysisRecord {
            fingerprint: records::fingerprint(text),
            intent,
            clarity_score: scores.clarity,
            specificity_score: scores.specificity,
            structure_score: scores.structure,
            strength_score: scores.strength,
            category: classification.category,
            confidence: classification.confidence,
            token_estimate: scoring::token_estimate(text),
            readability_score: scores.readability,
            missing_elements: missing,
            detected_elements: detected,
            weaknesses: self.weaknesses(&features, &scores),
            improvement_candidates,
        }
    }

    fn weaknesses(&self, features: &FeatureSet, scores: &ScoreCard) -> Vec<String> {
        let mut weaknesses = Vec::new();

        if scores.clarity < WEAKNESS_THRESHOLD {
            let reason = if features.vague_word_count > 0 {
                format!(
                    "Unclear wording: {} vague term(s) lack concrete meaning",
                    features.vague_word_count
                )
            } else {
                "Unclear wording: sentence length or pronoun use makes the request hard to follow"
                    .to_string()
            };
            weaknesses.push(reason);
        }
        if scores.specificity < WEAKNESS_THRESHOLD {
            weaknesses.push(
                "Lacks specific details such as numbers, names or exact requirements".to_string(),
            );
        }
        if scores.structure < WEAKNESS_THRESHOLD {
            let reason = if features.has(PromptElement::Role) || features.has(PromptElement::Format) {
                "Loosely organized: add steps, lists or sections"
            } else {
                "Loosely organized: no role, format or step-by-step structure"
            };
            weaknesses.push(reason.to_string());
        }

        weaknesses.truncate(MAX_WEAKNESSES);
        weaknesses
    }

    pub fn classify(&self, text: &str) -> Classification {
        self.classifier.classify(text)
    }

    pub fn plan_tier(&self, strength_score: f64) -> Tier {
        planner::plan_tier(strength_score)
    }

    /// Rewrites `text` using an analysis previously produced for it.
    ///
    /// Rejects empty text and analyses that were computed for a different
    /// text or intent.
    pub fn synthesize(
        &self,
        text: &str,
        options: &OptimizeOptions,
        analysis: &AnalysisRecord,
    ) -> Result<Synthesis> {
        if text.trim().is_empty() {
            return Err(PromptLensError::InvalidInput);
        }
        if !analysis.matches(text, options.intent) {
            return Err(PromptLensError::StaleAnalysis {
                expected: format!("{} ({})", records::fingerprint(text), options.intent),
                found: format!("{} ({})", analysis.fingerprint, analysis.intent),
            });
        }

        let options = OptimizeOptions {
            tone: options.tone.min(MAX_TONE),
            ..*options
        };
        Ok(synthesizer::synthesize(text, &options, analysis))
    }

    /// Analyze and synthesize in one step, producing a history-ready record.
    pub fn optimize(&self, text: &str, options: &OptimizeOptions) -> Result<OptimizationRecord> {
        if text.trim().is_empty() {
            return Err(PromptLensError::InvalidInput);
        }

        let analysis = self.analyze(text, options.intent);
        let synthesis = self.synthesize(text, options, &analysis)?;

        info!(
            tier = %synthesis.tier,
            edits = synthesis.edits.len(),
            from = analysis.strength_score,
            to = synthesis.projected_score,
            "optimized prompt"
        );

        let improvements = if synthesis.improvements.is_empty() {
            synthesis.note.iter().cloned().collect()
        } else {
            synthesis.improvements.clone()
        };

        Ok(OptimizationRecord {
            id: Uuid::new_v4().to_string(),
            original_text: text.to_string(),
            character_counts: CharacterCounts {
                original: text.chars().count(),
                optimized: synthesis.optimized_text.chars().count(),
            },
            optimized_text: synthesis.optimized_text,
            improvements,
            intent: options.intent,
            platform: options.platform,
            tone: options.tone.min(MAX_TONE),
            tier: synthesis.tier,
            timestamp: Utc::now(),
            strength_score: analysis.strength_score,
            projected_score: synthesis.projected_score,
            weaknesses: analysis.weaknesses,
        })
    }
}
