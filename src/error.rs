use thiserror::Error;

#[derive(Error, Debug)]
pub enum PromptLensError {
    #[error("Invalid input: prompt text is empty")]
    InvalidInput,

    #[error("Stale analysis: record was produced for {found}, current input is {expected}")]
    StaleAnalysis { expected: String, found: String },

    #[error("An optimization is already in progress")]
    OptimizeInProgress,

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("Template error: {0}")]
    Template(#[from] handlebars::TemplateError),

    #[error("Render error: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, PromptLensError>;
