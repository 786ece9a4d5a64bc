pub mod analyzer;
pub mod app;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod elements;
pub mod error;
pub mod features;
pub mod history;
pub mod intent;
pub mod lexicon;
pub mod planner;
pub mod records;
pub mod scoring;
pub mod session;
pub mod synthesizer;
pub mod template_engine;
pub mod ui;

pub use analyzer::Analyzer;
pub use error::{PromptLensError, Result};
pub use intent::{Intent, Platform};
pub use planner::{plan_tier, Tier};
pub use records::{AnalysisRecord, OptimizationRecord};
pub use synthesizer::{OptimizeOptions, Synthesis};
