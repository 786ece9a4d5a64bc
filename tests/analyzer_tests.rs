use promptlens::analyzer::*;
use promptlens::classifier::Category;
use promptlens::elements::PromptElement;
use promptlens::lexicon::{GENERIC_FORMAT, GENERIC_OUTPUT};
use promptlens::synthesizer::{OptimizeOptions, MINOR_ENHANCEMENTS_NOTE, WELL_STRUCTURED_NOTE};
use promptlens::{Intent, Platform, PromptLensError, Tier};

const VAGUE_PROMPT: &str = "Write something good about stuff, some things nice";
const DRAGON_PROMPT: &str = "Write a story about a dragon";
const REVIEW_PROMPT: &str = "First review the quarterly report. Then summarize the key risks.";
const STRONG_PROMPT: &str = "Act as a senior Rust engineer. First, review the parse_config function in config.rs for exactly 3 specific bugs. Then list each bug in a numbered table. Finally, provide a detailed fix for each one.";

fn options(intent: Intent) -> OptimizeOptions {
    OptimizeOptions {
        intent,
        ..Default::default()
    }
}

#[test]
fn test_analyzer_creation() {
    let analyzer = Analyzer::new().unwrap();
    let record = analyzer.analyze("test", Intent::General);
    assert!(record.strength_score >= 1);
}

#[test]
fn test_scores_stay_in_bounds() {
    let analyzer = Analyzer::new().unwrap();
    let samples = [
        "x",
        VAGUE_PROMPT,
        STRONG_PROMPT,
        "it this that these those it this that",
        "good bad nice great awesome terrible stuff things something",
        "1. one\n2. two\n\n- three\n- four",
    ];

    for text in samples {
        for intent in Intent::ALL {
            let record = analyzer.analyze(text, intent);
            for score in [
                record.clarity_score,
                record.specificity_score,
                record.structure_score,
                record.strength_score,
            ] {
                assert!((1..=10).contains(&score), "{} out of range for {:?}", score, text);
            }
            assert!(record.readability_score <= 10);
            assert!((70..=100).contains(&record.confidence));
            assert!(record.weaknesses.len() <= 3);
            assert!(record.improvement_candidates.len() <= 5);
        }
    }
}

#[test]
fn test_analysis_is_deterministic() {
    let analyzer = Analyzer::new().unwrap();
    let first = analyzer.analyze(VAGUE_PROMPT, Intent::Creative);
    let second = analyzer.analyze(VAGUE_PROMPT, Intent::Creative);
    assert_eq!(first, second);
}

#[test]
fn test_empty_text_defaults() {
    let analyzer = Analyzer::new().unwrap();
    let record = analyzer.analyze("", Intent::General);

    assert_eq!(record.strength_score, 1);
    assert_eq!(record.clarity_score, 1);
    assert_eq!(record.confidence, 0);
    assert_eq!(record.token_estimate, 0);
    assert_eq!(record.category, Category::General);
    assert!(record.detected_elements.is_empty());

    // General intent does not ask for a role or examples
    let expected = [
        PromptElement::Context,
        PromptElement::Format,
        PromptElement::Constraints,
        PromptElement::OutputSpecification,
    ];
    assert_eq!(record.missing_elements.iter().copied().collect::<Vec<_>>(), expected);

    let creative = analyzer.analyze("   ", Intent::Creative);
    assert_eq!(creative.missing_elements.len(), 6);
}

#[test]
fn test_vague_prompt_scores() {
    let analyzer = Analyzer::new().unwrap();
    let record = analyzer.analyze(VAGUE_PROMPT, Intent::Creative);

    assert_eq!(record.clarity_score, 3);
    assert_eq!(record.specificity_score, 5);
    assert_eq!(record.structure_score, 3);
    assert_eq!(record.strength_score, 4);
    assert_eq!(record.tier(), Tier::Full);
    assert!(record.detected_elements.contains(&PromptElement::OutputSpecification));
    assert!(!record.weaknesses.is_empty());
}

#[test]
fn test_specificity_rewards_numbers_and_quantifiers() {
    let analyzer = Analyzer::new().unwrap();
    let precise = analyzer.analyze("Reduce churn specifically by 12.5% this quarter", Intent::General);
    let loose = analyzer.analyze("Reduce churn by this quarter", Intent::General);

    assert!(precise.specificity_score > loose.specificity_score);
    assert_eq!(precise.specificity_score, 8);
    assert_eq!(loose.specificity_score, 5);
}

#[test]
fn test_tier_boundaries() {
    let analyzer = Analyzer::new().unwrap();
    assert_eq!(analyzer.plan_tier(10.0), Tier::Minimal);
    assert_eq!(analyzer.plan_tier(7.0), Tier::Minimal);
    assert_eq!(analyzer.plan_tier(6.9), Tier::Targeted);
    assert_eq!(analyzer.plan_tier(5.0), Tier::Targeted);
    assert_eq!(analyzer.plan_tier(4.99), Tier::Full);
    assert_eq!(analyzer.plan_tier(1.0), Tier::Full);
}

#[test]
fn test_role_and_examples_are_intent_gated() {
    let analyzer = Analyzer::new().unwrap();

    let general = analyzer.analyze(DRAGON_PROMPT, Intent::General);
    assert!(!general.missing_elements.contains(&PromptElement::Role));
    assert!(!general.missing_elements.contains(&PromptElement::Examples));

    let creative = analyzer.analyze(DRAGON_PROMPT, Intent::Creative);
    assert!(creative.missing_elements.contains(&PromptElement::Role));
    assert!(creative.missing_elements.contains(&PromptElement::Examples));

    let marketing = analyzer.analyze(DRAGON_PROMPT, Intent::Marketing);
    assert!(!marketing.missing_elements.contains(&PromptElement::Role));
    assert!(marketing.missing_elements.contains(&PromptElement::Examples));
}

#[test]
fn test_classification() {
    let analyzer = Analyzer::new().unwrap();

    let code = analyzer.classify("Write a Python function that parses SQL");
    assert_eq!(code.category, Category::CodeGeneration);
    assert_eq!(code.hits, 3);
    assert_eq!(code.confidence, 85);

    let general = analyzer.classify("Hello there");
    assert_eq!(general.category, Category::General);
    assert_eq!(general.confidence, 70);
}

#[test]
fn test_full_tier_rewrite_order() {
    let analyzer = Analyzer::new().unwrap();
    let options = options(Intent::Creative);
    let analysis = analyzer.analyze(VAGUE_PROMPT, Intent::Creative);
    let synthesis = analyzer.synthesize(VAGUE_PROMPT, &options, &analysis).unwrap();

    assert_eq!(synthesis.tier, Tier::Full);
    assert!(synthesis
        .optimized_text
        .starts_with("Context: You are working on a creative project"));

    let lines: Vec<&str> = synthesis.optimized_text.lines().collect();
    assert!(lines[1].starts_with("Act as an accomplished creative writer"));
    assert!(synthesis.optimized_text.contains(VAGUE_PROMPT));

    let n = lines.len();
    assert_eq!(lines[n - 2], "Keep the tone professional and clear and stay focused on the request.");
    assert_eq!(lines[n - 1], "Provide the complete piece, ready to share.");

    assert_eq!(synthesis.edits.len(), 6);
    assert_eq!(synthesis.improvements.len(), synthesis.edits.len());
    assert!(synthesis.note.is_none());
    assert_eq!(synthesis.projected_score, 9);
}

#[test]
fn test_targeted_tier_rewrite() {
    let analyzer = Analyzer::new().unwrap();
    let options = options(Intent::Creative);
    let analysis = analyzer.analyze(DRAGON_PROMPT, Intent::Creative);
    assert_eq!(analysis.strength_score, 6);

    let synthesis = analyzer.synthesize(DRAGON_PROMPT, &options, &analysis).unwrap();
    assert_eq!(synthesis.tier, Tier::Targeted);
    assert_eq!(
        synthesis.optimized_text,
        "Act as an accomplished creative writer with a strong narrative voice.\n\n\
         Write a story about a dragon\n\n\
         Structure the piece with a clear beginning, middle and end.\n\
         Include concrete examples to illustrate the key points."
    );
    assert_eq!(
        synthesis.improvements,
        vec![
            "Assigned an expert role to guide the response",
            "Specified a clear response structure",
            "Requested concrete examples",
        ]
    );
    assert_eq!(synthesis.projected_score, 8);
}

#[test]
fn test_minimal_tier_patches_output() {
    let analyzer = Analyzer::new().unwrap();
    let options = options(Intent::General);
    let analysis = analyzer.analyze(REVIEW_PROMPT, Intent::General);
    assert_eq!(analysis.strength_score, 7);

    let synthesis = analyzer.synthesize(REVIEW_PROMPT, &options, &analysis).unwrap();
    assert_eq!(synthesis.tier, Tier::Minimal);
    assert_eq!(
        synthesis.optimized_text,
        format!("{}\n\nProvide a clear and complete response.", REVIEW_PROMPT)
    );
    assert_eq!(synthesis.improvements, vec!["Clarified the expected output"]);
    assert_eq!(synthesis.projected_score, 8);
}

#[test]
fn test_minimal_tier_patches_examples_then_output() {
    let analyzer = Analyzer::new().unwrap();
    let options = options(Intent::Creative);
    let analysis = analyzer.analyze(REVIEW_PROMPT, Intent::Creative);
    assert_eq!(analysis.strength_score, 7);
    assert!(analysis.is_missing(PromptElement::Examples));

    let synthesis = analyzer.synthesize(REVIEW_PROMPT, &options, &analysis).unwrap();
    assert_eq!(synthesis.tier, Tier::Minimal);
    assert_eq!(
        synthesis.optimized_text,
        format!(
            "{}\n\nInclude concrete examples to illustrate the key points.\nProvide a clear and complete response.",
            REVIEW_PROMPT
        )
    );
    assert_eq!(
        synthesis.improvements,
        vec!["Requested concrete examples", "Clarified the expected output"]
    );
    assert_eq!(synthesis.edits.len(), 2);
    assert!(synthesis.note.is_none());
    assert_eq!(synthesis.projected_score, analysis.strength_score + 1);
}

#[test]
fn test_full_tier_falls_back_to_generic_sentences() {
    let analyzer = Analyzer::new().unwrap();

    for intent in [Intent::General, Intent::Summary] {
        let analysis = analyzer.analyze(VAGUE_PROMPT, intent);
        let synthesis = analyzer.synthesize(VAGUE_PROMPT, &options(intent), &analysis).unwrap();

        assert_eq!(synthesis.tier, Tier::Full);
        assert!(synthesis.optimized_text.starts_with(VAGUE_PROMPT));
        assert_eq!(
            synthesis.optimized_text,
            format!(
                "{}\n\n{}\n{}\n{}",
                VAGUE_PROMPT,
                GENERIC_FORMAT,
                "Keep the tone professional and clear and stay focused on the request.",
                GENERIC_OUTPUT
            )
        );
        assert_eq!(synthesis.edits.len(), 3);
        assert_eq!(synthesis.improvements.len(), 3);
        assert_eq!(synthesis.projected_score, 6);
    }
}

#[test]
fn test_strong_prompt_is_left_alone() {
    let analyzer = Analyzer::new().unwrap();
    let options = options(Intent::Code);
    let analysis = analyzer.analyze(STRONG_PROMPT, Intent::Code);
    assert_eq!(analysis.strength_score, 10);

    let synthesis = analyzer.synthesize(STRONG_PROMPT, &options, &analysis).unwrap();
    assert_eq!(synthesis.optimized_text, STRONG_PROMPT);
    assert!(synthesis.edits.is_empty());
    assert!(synthesis.improvements.is_empty());
    assert_eq!(synthesis.note.as_deref(), Some(WELL_STRUCTURED_NOTE));
    assert_eq!(synthesis.projected_score, 10);
}

#[test]
fn test_minimal_tier_without_gaps_adds_note() {
    let analyzer = Analyzer::new().unwrap();
    let text = format!("{} Provide the list.", REVIEW_PROMPT);
    let analysis = analyzer.analyze(&text, Intent::General);
    assert_eq!(analysis.strength_score, 7);
    assert!(!analysis.is_missing(PromptElement::OutputSpecification));

    let synthesis = analyzer.synthesize(&text, &options(Intent::General), &analysis).unwrap();
    assert_eq!(synthesis.tier, Tier::Minimal);
    assert_eq!(synthesis.note.as_deref(), Some(MINOR_ENHANCEMENTS_NOTE));
    assert!(synthesis.improvements.is_empty());
    assert_eq!(synthesis.projected_score, 7);
    assert_eq!(synthesis.optimized_text, text);
}

#[test]
fn test_reanalysis_shows_fewer_missing_elements() {
    let analyzer = Analyzer::new().unwrap();
    let before = analyzer.analyze(DRAGON_PROMPT, Intent::Creative);
    let record = analyzer.optimize(DRAGON_PROMPT, &options(Intent::Creative)).unwrap();
    let after = analyzer.analyze(&record.optimized_text, Intent::Creative);

    assert!(after.missing_elements.len() < before.missing_elements.len());
    assert!(after.strength_score >= before.strength_score);
}

#[test]
fn test_synthesize_rejects_stale_analysis() {
    let analyzer = Analyzer::new().unwrap();
    let analysis = analyzer.analyze(DRAGON_PROMPT, Intent::Creative);

    let edited = analyzer.synthesize("Write a poem about a dragon", &options(Intent::Creative), &analysis);
    assert!(matches!(edited, Err(PromptLensError::StaleAnalysis { .. })));

    let other_intent = analyzer.synthesize(DRAGON_PROMPT, &options(Intent::Code), &analysis);
    assert!(matches!(other_intent, Err(PromptLensError::StaleAnalysis { .. })));
}

#[test]
fn test_optimize_rejects_empty_input() {
    let analyzer = Analyzer::new().unwrap();
    let result = analyzer.optimize("  \n ", &OptimizeOptions::default());
    assert!(matches!(result, Err(PromptLensError::InvalidInput)));
}

#[test]
fn test_optimize_builds_record() {
    let analyzer = Analyzer::new().unwrap();
    let options = OptimizeOptions {
        intent: Intent::Creative,
        platform: Platform::Claude,
        tone: 90,
    };
    let record = analyzer.optimize(VAGUE_PROMPT, &options).unwrap();

    assert_eq!(record.original_text, VAGUE_PROMPT);
    assert_eq!(record.platform, Platform::Claude);
    assert_eq!(record.tier, Tier::Full);
    assert_eq!(record.improvements.len(), 6);
    assert!(record
        .optimized_text
        .contains("Keep the tone technical and precise and stay focused on the request."));
    assert_eq!(record.character_counts.original, VAGUE_PROMPT.chars().count());
    assert_eq!(record.character_counts.optimized, record.optimized_text.chars().count());
    assert!(record.growth_percent() > 0);
    assert_eq!(record.strength_score, 4);
    assert_eq!(record.projected_score, 9);
}

#[test]
fn test_note_becomes_the_only_improvement() {
    let analyzer = Analyzer::new().unwrap();
    let record = analyzer.optimize(STRONG_PROMPT, &options(Intent::Code)).unwrap();

    assert_eq!(record.optimized_text, STRONG_PROMPT);
    assert_eq!(record.improvements, vec![WELL_STRUCTURED_NOTE.to_string()]);
    assert_eq!(record.growth_percent(), 0);
}
