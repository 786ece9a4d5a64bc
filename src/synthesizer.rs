//! Tiered prompt rewriting.
//!
//! Every edit is a whole sentence placed before or after the original
//! text, and every edit carries exactly one improvement description.

use serde::{Deserialize, Serialize};

use crate::elements::PromptElement;
use crate::intent::{Intent, Platform, ToneStyle};
use crate::lexicon;
use crate::planner::Tier;
use crate::records::AnalysisRecord;
use crate::scoring::MAX_SCORE;

pub const WELL_STRUCTURED_NOTE: &str = "Prompt is already well-structured; no changes needed.";
pub const MINOR_ENHANCEMENTS_NOTE: &str =
    "Applied minor enhancements only; the prompt already covers the critical elements.";

const NO_OP_THRESHOLD: u8 = 8;
const MINIMAL_DELTA: f64 = 1.0;
const TARGETED_DELTA: f64 = 2.0;
const FULL_DELTA_PER_EDIT: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    Prepend,
    Append,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edit {
    pub element: PromptElement,
    pub placement: Placement,
    pub sentence: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Synthesis {
    pub optimized_text: String,
    /// One description per applied edit, in application order.
    pub improvements: Vec<String>,
    /// Set when no edit was applied.
    pub note: Option<String>,
    pub tier: Tier,
    pub projected_score: u8,
    pub edits: Vec<Edit>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizeOptions {
    pub intent: Intent,
    pub platform: Platform,
    pub tone: u8,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            intent: Intent::General,
            platform: Platform::Generic,
            tone: 50,
        }
    }
}

#[derive(Default)]
struct Draft {
    prepends: Vec<String>,
    appends: Vec<String>,
    improvements: Vec<String>,
    edits: Vec<Edit>,
}

impl Draft {
    fn apply(&mut self, element: PromptElement, placement: Placement, sentence: &str, improvement: String) {
        match placement {
            Placement::Prepend => self.prepends.push(sentence.to_string()),
            Placement::Append => self.appends.push(sentence.to_string()),
        }
        self.improvements.push(improvement);
        self.edits.push(Edit {
            element,
            placement,
            sentence: sentence.to_string(),
        });
    }

    fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    fn render(&self, original: &str) -> String {
        let mut text = String::new();
        if !self.prepends.is_empty() {
            text.push_str(&self.prepends.join("\n"));
            text.push_str("\n\n");
        }
        text.push_str(original.trim());
        if !self.appends.is_empty() {
            text.push_str("\n\n");
            text.push_str(&self.appends.join("\n"));
        }
        text.trim().to_string()
    }
}

fn improvement_for(element: PromptElement, intent: Intent, tone: ToneStyle) -> String {
    match element {
        PromptElement::Context => format!("Added {} context to frame the task", intent),
        PromptElement::Role => "Assigned an expert role to guide the response".to_string(),
        PromptElement::Format => "Specified a clear response structure".to_string(),
        PromptElement::Examples => "Requested concrete examples".to_string(),
        PromptElement::Constraints => format!("Added constraints for a {} tone", tone.wording()),
        PromptElement::OutputSpecification => "Clarified the expected output".to_string(),
    }
}

/// Rewrites `text` according to the tier implied by `analysis`.
///
/// The caller guarantees `analysis` was derived from `text`; see
/// [`crate::analyzer::Analyzer::synthesize`] for the checked entry point.
pub fn synthesize(text: &str, options: &OptimizeOptions, analysis: &AnalysisRecord) -> Synthesis {
    let intent = options.intent;
    let tone = ToneStyle::from_tone(options.tone);
    let score = analysis.strength_score;
    let tier = analysis.tier();
    let mut draft = Draft::default();

    let add = |draft: &mut Draft, element: PromptElement, placement: Placement, sentence: &str| {
        draft.apply(element, placement, sentence, improvement_for(element, intent, tone));
    };

    let (delta, note) = match tier {
        Tier::Minimal if score >= NO_OP_THRESHOLD => (0.0, Some(WELL_STRUCTURED_NOTE)),
        Tier::Minimal => {
            if intent.wants_examples() && analysis.is_missing(PromptElement::Examples) {
                add(&mut draft, PromptElement::Examples, Placement::Append, lexicon::EXAMPLES_REQUEST);
            }
            if analysis.is_missing(PromptElement::OutputSpecification) {
                add(
                    &mut draft,
                    PromptElement::OutputSpecification,
                    Placement::Append,
                    lexicon::MINIMAL_OUTPUT_PATCH,
                );
            }
            if draft.is_empty() {
                (0.0, Some(MINOR_ENHANCEMENTS_NOTE))
            } else {
                (MINIMAL_DELTA, None)
            }
        }
        Tier::Targeted => {
            if intent.wants_role() && analysis.is_missing(PromptElement::Role) {
                add(&mut draft, PromptElement::Role, Placement::Prepend, lexicon::role_sentence(intent));
            }
            if analysis.is_missing(PromptElement::Format) {
                add(&mut draft, PromptElement::Format, Placement::Append, lexicon::format_sentence(intent));
            }
            if intent.wants_examples() && analysis.is_missing(PromptElement::Examples) {
                add(&mut draft, PromptElement::Examples, Placement::Append, lexicon::EXAMPLES_REQUEST);
            }
            if draft.is_empty() {
                (0.0, Some(MINOR_ENHANCEMENTS_NOTE))
            } else {
                (TARGETED_DELTA, None)
            }
        }
        Tier::Full => {
            let context = lexicon::context_sentence(intent);
            if !context.is_empty() && analysis.is_missing(PromptElement::Context) {
                add(&mut draft, PromptElement::Context, Placement::Prepend, context);
            }
            if intent.wants_role() && analysis.is_missing(PromptElement::Role) {
                add(&mut draft, PromptElement::Role, Placement::Prepend, lexicon::role_sentence(intent));
            }
            if analysis.is_missing(PromptElement::Format) {
                add(&mut draft, PromptElement::Format, Placement::Append, lexicon::format_sentence(intent));
            }
            if intent.wants_examples() && analysis.is_missing(PromptElement::Examples) {
                add(&mut draft, PromptElement::Examples, Placement::Append, lexicon::EXAMPLES_REQUEST);
            }
            let constraints = lexicon::constraints_sentence(tone.wording());
            add(&mut draft, PromptElement::Constraints, Placement::Append, &constraints);
            add(
                &mut draft,
                PromptElement::OutputSpecification,
                Placement::Append,
                lexicon::output_sentence(intent),
            );
            (FULL_DELTA_PER_EDIT * draft.edits.len() as f64, None)
        }
    };

    let optimized_text = if draft.is_empty() {
        text.to_string()
    } else {
        draft.render(text)
    };
    let projected_score = (score as f64 + delta).round().min(MAX_SCORE as f64) as u8;

    Synthesis {
        optimized_text,
        improvements: draft.improvements,
        note: note.map(str::to_string),
        tier,
        projected_score,
        edits: draft.edits,
    }
}
