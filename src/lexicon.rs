//! Fixed lookup tables for the analysis and optimization engine.
//!
//! Every keyword list, phrase list and sentence bank the engine consults
//! lives here so that each table can be inspected and tested on its own.

use crate::classifier::Category;
use crate::intent::Intent;

/// Subjective words that weaken clarity. Matched against whole tokens.
pub const VAGUE_WORDS: &[&str] = &[
    "something", "stuff", "things", "good", "bad", "nice", "great", "awesome", "terrible",
];

/// Referential pronouns counted for the pronoun ratio.
pub const PRONOUNS: &[&str] = &["it", "this", "that", "these", "those"];

/// Phrases that ask for precise quantities. Substring match.
pub const QUANTIFIER_PHRASES: &[&str] = &[
    "how many",
    "what percentage",
    "exactly",
    "precisely",
    "specifically",
];

pub const VAGUE_ADJECTIVES: &[&str] = &["some", "many", "few", "several", "various", "multiple"];

pub const PRECISE_DESCRIPTORS: &[&str] = &["detailed", "comprehensive", "thorough", "specific", "exact"];

pub const FLOW_CONNECTIVES: &[&str] = &[
    "first", "then", "next", "finally", "therefore", "however", "additionally",
];

pub const CONTEXT_PHRASES: &[&str] = &[
    "background",
    "context",
    "situation",
    "scenario",
    "given that",
    "assuming",
];

pub const ROLE_PHRASES: &[&str] = &[
    "act as",
    "you are a",
    "pretend to be",
    "imagine you're",
    "as a",
    "role of",
];

pub const FORMAT_PHRASES: &[&str] = &[
    "format",
    "structure",
    "organize",
    "list",
    "table",
    "bullet points",
    "numbered",
];

pub const EXAMPLE_PHRASES: &[&str] = &["such as", "like", "for example", "e.g.", "including", "example"];

pub const CONSTRAINT_PHRASES: &[&str] = &[
    "must", "should", "required", "limit", "maximum", "minimum", "within",
];

pub const OUTPUT_PHRASES: &[&str] = &["provide", "generate", "create", "write", "produce", "return"];

/// Category keyword table, in classifier iteration order.
pub const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::CodeGeneration,
        &[
            "code", "function", "program", "script", "algorithm", "debug", "api", "class",
            "python", "javascript", "rust", "sql", "refactor",
        ],
    ),
    (
        Category::DataAnalysis,
        &[
            "analyze", "analysis", "data", "dataset", "statistics", "trend", "trends", "chart",
            "metrics", "insights",
        ],
    ),
    (
        Category::CreativeWriting,
        &[
            "story", "poem", "creative", "character", "characters", "narrative", "fiction",
            "novel", "plot",
        ],
    ),
    (
        Category::Summarization,
        &[
            "summarize", "summary", "tl;dr", "key points", "condense", "overview", "takeaways",
        ],
    ),
    (
        Category::Research,
        &[
            "research", "study", "sources", "evidence", "literature", "investigate", "citations",
        ],
    ),
    (
        Category::Marketing,
        &[
            "marketing", "campaign", "audience", "brand", "seo", "ad copy", "conversion",
            "social media", "product launch",
        ],
    ),
];

pub const CATEGORY_HIT_WEIGHT: u32 = 3;
pub const GENERAL_BASE_SCORE: u32 = 1;

pub const CONTEXT_BANK: &[(Intent, &str)] = &[
    (
        Intent::Creative,
        "Context: You are working on a creative project that calls for original, engaging content.",
    ),
    (
        Intent::Analysis,
        "Context: You are analyzing information to uncover patterns and actionable insights.",
    ),
    (
        Intent::Code,
        "Context: You are writing production software that has to be correct and maintainable.",
    ),
    (
        Intent::Marketing,
        "Context: You are creating marketing material for a defined audience and business goal.",
    ),
    (
        Intent::Research,
        "Context: You are conducting research where accuracy and sourcing matter.",
    ),
];

pub const ROLE_BANK: &[(Intent, &str)] = &[
    (
        Intent::Creative,
        "Act as an accomplished creative writer with a strong narrative voice.",
    ),
    (
        Intent::Analysis,
        "Act as a senior data analyst experienced in statistical reasoning.",
    ),
    (
        Intent::Code,
        "Act as a senior software engineer who follows established best practices.",
    ),
    (
        Intent::Marketing,
        "Act as an experienced marketing strategist who understands audience psychology.",
    ),
    (
        Intent::Research,
        "Act as a meticulous research specialist who verifies every claim.",
    ),
];

pub const FORMAT_BANK: &[(Intent, &str)] = &[
    (
        Intent::Creative,
        "Structure the piece with a clear beginning, middle and end.",
    ),
    (
        Intent::Analysis,
        "Format the response as an executive summary followed by key findings in bullet points and recommendations.",
    ),
    (
        Intent::Code,
        "Format the response as commented code blocks followed by a short usage example.",
    ),
    (
        Intent::Marketing,
        "Organize the content with a headline, the key benefits and a clear call to action.",
    ),
    (
        Intent::Research,
        "Organize the findings into titled sections and cite sources where possible.",
    ),
];

pub const GENERIC_FORMAT: &str =
    "Structure your response with clear sections and bullet points where appropriate.";

pub const OUTPUT_BANK: &[(Intent, &str)] = &[
    (Intent::Creative, "Provide the complete piece, ready to share."),
    (Intent::Analysis, "Provide clear conclusions backed by the data."),
    (
        Intent::Code,
        "Provide complete, runnable code with a brief explanation of how it works.",
    ),
    (
        Intent::Marketing,
        "Provide ready-to-use copy along with a suggested headline.",
    ),
    (
        Intent::Research,
        "Provide a well-organized summary of findings with supporting evidence.",
    ),
];

pub const GENERIC_OUTPUT: &str = "Provide a clear, complete and actionable response.";

pub const EXAMPLES_REQUEST: &str = "Include concrete examples to illustrate the key points.";

/// Fixed output sentence used by the minimal-tier patch.
pub const MINIMAL_OUTPUT_PATCH: &str = "Provide a clear and complete response.";

pub fn constraints_sentence(tone_wording: &str) -> String {
    format!(
        "Keep the tone {} and stay focused on the request.",
        tone_wording
    )
}

fn lookup(bank: &[(Intent, &'static str)], intent: Intent) -> Option<&'static str> {
    bank.iter()
        .find(|(candidate, _)| *candidate == intent)
        .map(|(_, sentence)| *sentence)
}

/// Intent-specific context sentence, empty for intents without one.
pub fn context_sentence(intent: Intent) -> &'static str {
    lookup(CONTEXT_BANK, intent).unwrap_or("")
}

/// Intent-specific persona statement, empty for intents without one.
pub fn role_sentence(intent: Intent) -> &'static str {
    lookup(ROLE_BANK, intent).unwrap_or("")
}

pub fn format_sentence(intent: Intent) -> &'static str {
    lookup(FORMAT_BANK, intent).unwrap_or(GENERIC_FORMAT)
}

pub fn output_sentence(intent: Intent) -> &'static str {
    lookup(OUTPUT_BANK, intent).unwrap_or(GENERIC_OUTPUT)
}
