use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::intent::Intent;
use crate::lexicon;

/// The six canonical components of a well-formed prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PromptElement {
    Context,
    Role,
    Format,
    Examples,
    Constraints,
    OutputSpecification,
}

impl PromptElement {
    pub const ALL: [PromptElement; 6] = [
        PromptElement::Context,
        PromptElement::Role,
        PromptElement::Format,
        PromptElement::Examples,
        PromptElement::Constraints,
        PromptElement::OutputSpecification,
    ];

    pub fn phrases(&self) -> &'static [&'static str] {
        match self {
            PromptElement::Context => lexicon::CONTEXT_PHRASES,
            PromptElement::Role => lexicon::ROLE_PHRASES,
            PromptElement::Format => lexicon::FORMAT_PHRASES,
            PromptElement::Examples => lexicon::EXAMPLE_PHRASES,
            PromptElement::Constraints => lexicon::CONSTRAINT_PHRASES,
            PromptElement::OutputSpecification => lexicon::OUTPUT_PHRASES,
        }
    }

    /// `lowercase` must already be lowercased.
    pub fn is_present(&self, lowercase: &str) -> bool {
        self.phrases().iter().any(|phrase| lowercase.contains(phrase))
    }

    /// Whether absence of this element is worth reporting for `intent`.
    pub fn is_relevant(&self, intent: Intent) -> bool {
        match self {
            PromptElement::Role => intent.wants_role(),
            PromptElement::Examples => intent.wants_examples(),
            _ => true,
        }
    }

    pub fn suggestion(&self) -> &'static str {
        match self {
            PromptElement::Context => "Add background context describing the situation",
            PromptElement::Role => "Assign a role or persona for the model to adopt",
            PromptElement::Format => "Specify the desired output format or structure",
            PromptElement::Examples => "Include or request concrete examples",
            PromptElement::Constraints => "State constraints such as length, tone or scope",
            PromptElement::OutputSpecification => "Say exactly what the model should produce",
        }
    }
}

impl fmt::Display for PromptElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PromptElement::Context => "context",
            PromptElement::Role => "role",
            PromptElement::Format => "format",
            PromptElement::Examples => "examples",
            PromptElement::Constraints => "constraints",
            PromptElement::OutputSpecification => "output-specification",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementReport {
    pub missing: BTreeSet<PromptElement>,
    pub detected: BTreeSet<PromptElement>,
}

/// Elements present in `text`, regardless of intent.
pub fn detected_elements(text: &str) -> BTreeSet<PromptElement> {
    let lowercase = text.to_lowercase();
    PromptElement::ALL
        .iter()
        .copied()
        .filter(|element| element.is_present(&lowercase))
        .collect()
}

/// Missing set for an already computed detected set.
pub fn missing_elements(detected: &BTreeSet<PromptElement>, intent: Intent) -> BTreeSet<PromptElement> {
    PromptElement::ALL
        .iter()
        .copied()
        .filter(|element| element.is_relevant(intent) && !detected.contains(element))
        .collect()
}

pub fn detect_elements(text: &str, intent: Intent) -> ElementReport {
    let detected = detected_elements(text);
    let missing = missing_elements(&detected, intent);
    ElementReport { missing, detected }
}
