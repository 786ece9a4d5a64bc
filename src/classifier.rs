use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;
use crate::lexicon::{CATEGORY_HIT_WEIGHT, CATEGORY_KEYWORDS, GENERAL_BASE_SCORE};
use crate::scoring;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    CodeGeneration,
    DataAnalysis,
    CreativeWriting,
    Summarization,
    Research,
    Marketing,
    #[default]
    General,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::CodeGeneration => "Code Generation",
            Category::DataAnalysis => "Data Analysis",
            Category::CreativeWriting => "Creative Writing",
            Category::Summarization => "Summarization",
            Category::Research => "Research",
            Category::Marketing => "Marketing",
            Category::General => "General",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub category: Category,
    pub confidence: u8,
    /// Keyword hits that decided the category.
    pub hits: usize,
}

#[derive(Clone)]
pub struct CategoryClassifier {
    table: Vec<(Category, Vec<Regex>)>,
}

impl CategoryClassifier {
    pub fn new() -> Result<Self> {
        let mut table = Vec::with_capacity(CATEGORY_KEYWORDS.len());
        for (category, keywords) in CATEGORY_KEYWORDS {
            let patterns = keywords
                .iter()
                .map(|keyword| Regex::new(&format!(r"(?i)\b{}\b", regex::escape(keyword))))
                .collect::<std::result::Result<Vec<_>, _>>()?;
            table.push((*category, patterns));
        }
        Ok(Self { table })
    }

    pub fn classify(&self, text: &str) -> Classification {
        let mut best = Category::General;
        let mut best_score = GENERAL_BASE_SCORE;
        let mut best_hits = 0;

        for (category, patterns) in &self.table {
            let hits = patterns.iter().filter(|re| re.is_match(text)).count();
            let score = hits as u32 * CATEGORY_HIT_WEIGHT;
            if score > best_score {
                best = *category;
                best_score = score;
                best_hits = hits;
            }
        }

        Classification {
            category: best,
            confidence: scoring::confidence(best_hits),
            hits: best_hits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> CategoryClassifier {
        CategoryClassifier::new().unwrap()
    }

    #[test]
    fn defaults_to_general() {
        let result = classifier().classify("Tell me about the weather tomorrow");
        assert_eq!(result.category, Category::General);
        assert_eq!(result.confidence, 70);
    }

    #[test]
    fn earlier_category_wins_ties() {
        // one code keyword, one creative keyword
        let result = classifier().classify("A story about a python");
        assert_eq!(result.category, Category::CodeGeneration);
        assert_eq!(result.hits, 1);
    }

    #[test]
    fn confidence_grows_with_hits_and_caps() {
        let result = classifier().classify(
            "Write a python function and script implementing an algorithm, debug the class and the api in rust with sql code",
        );
        assert_eq!(result.category, Category::CodeGeneration);
        assert_eq!(result.confidence, 100);
    }
}
