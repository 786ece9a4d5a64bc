use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Caller-declared task category. Gates which synthesis rules apply.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    #[default]
    General,
    Analysis,
    Creative,
    Code,
    Marketing,
    Research,
    Summary,
    Qa,
    Content,
}

impl Intent {
    pub const ALL: [Intent; 9] = [
        Intent::General,
        Intent::Analysis,
        Intent::Creative,
        Intent::Code,
        Intent::Marketing,
        Intent::Research,
        Intent::Summary,
        Intent::Qa,
        Intent::Content,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::General => "general",
            Intent::Analysis => "analysis",
            Intent::Creative => "creative",
            Intent::Code => "code",
            Intent::Marketing => "marketing",
            Intent::Research => "research",
            Intent::Summary => "summary",
            Intent::Qa => "qa",
            Intent::Content => "content",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Intent::General => "General Purpose",
            Intent::Analysis => "Analyze Data",
            Intent::Creative => "Creative Writing",
            Intent::Code => "Code Generation",
            Intent::Marketing => "Marketing",
            Intent::Research => "Research",
            Intent::Summary => "Summarization",
            Intent::Qa => "Q&A",
            Intent::Content => "Content Creation",
        }
    }

    /// Intents for which a persona statement is meaningful.
    pub fn wants_role(&self) -> bool {
        matches!(self, Intent::Creative | Intent::Analysis | Intent::Code)
    }

    /// Intents for which examples are expected in the prompt.
    pub fn wants_examples(&self) -> bool {
        matches!(self, Intent::Creative | Intent::Marketing)
    }

    pub fn next(&self) -> Intent {
        let index = Self::ALL.iter().position(|i| i == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Intent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "q&a" => return Ok(Intent::Qa),
            "data analysis" | "analyze" => return Ok(Intent::Analysis),
            _ => {}
        }
        Self::ALL
            .iter()
            .copied()
            .find(|intent| intent.as_str() == normalized)
            .ok_or_else(|| format!("Unknown intent: {}", s))
    }
}

/// Target model family. Recorded with each optimization; does not change the rewrite.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Generic,
    #[value(name = "chatgpt")]
    ChatGpt,
    Claude,
    Gemini,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Generic => write!(f, "generic"),
            Platform::ChatGpt => write!(f, "chatgpt"),
            Platform::Claude => write!(f, "claude"),
            Platform::Gemini => write!(f, "gemini"),
        }
    }
}

pub const MAX_TONE: u8 = 100;

/// Tone wording used in the constraints sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneStyle {
    Casual,
    Professional,
    Technical,
}

impl ToneStyle {
    pub fn from_tone(tone: u8) -> Self {
        match tone.min(MAX_TONE) {
            0..=32 => ToneStyle::Casual,
            33..=65 => ToneStyle::Professional,
            _ => ToneStyle::Technical,
        }
    }

    pub fn wording(&self) -> &'static str {
        match self {
            ToneStyle::Casual => "casual and friendly",
            ToneStyle::Professional => "professional and clear",
            ToneStyle::Technical => "technical and precise",
        }
    }
}
