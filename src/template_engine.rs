use handlebars::{
    no_escape, Context, Handlebars, Helper, HelperResult, Output, RenderContext,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

use crate::error::{PromptLensError, Result};
use crate::intent::Intent;
use crate::records::OptimizationRecord;

const REPORT_TEMPLATE: &str = "report";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub intent: Intent,
    pub content: String,
    pub variables: Vec<TemplateVariable>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateVariable {
    pub name: String,
    pub description: String,
    pub default_value: Option<String>,
}

impl TemplateVariable {
    fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            default_value: None,
        }
    }

    /// Bracketed placeholder shown when the caller supplies no value.
    pub fn placeholder(&self) -> String {
        format!("[{}]", self.name.to_uppercase())
    }
}

pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
    templates: Vec<PromptTemplate>,
}

impl TemplateEngine {
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        handlebars.register_escape_fn(no_escape);

        Self::register_helpers(&mut handlebars);
        handlebars.register_template_string(REPORT_TEMPLATE, include_str!("../templates/report.hbs"))?;

        let mut engine = Self {
            handlebars,
            templates: Vec::new(),
        };
        for template in Self::create_built_in_templates() {
            engine.register(template)?;
        }
        Ok(engine)
    }

    fn register_helpers(handlebars: &mut Handlebars) {
        handlebars.register_helper("format_date", Box::new(format_date_helper));
        handlebars.register_helper("uppercase", Box::new(uppercase_helper));
        handlebars.register_helper("pluralize", Box::new(pluralize_helper));
    }

    fn create_built_in_templates() -> Vec<PromptTemplate> {
        vec![
            PromptTemplate {
                id: "analysis".to_string(),
                name: "Data Analysis".to_string(),
                description: "Analyze data and provide insights".to_string(),
                category: "Analysis".to_string(),
                intent: Intent::Analysis,
                content: "Analyze the following data and provide key insights, trends, and actionable recommendations: {{data}}".to_string(),
                variables: vec![TemplateVariable::new("data", "The data to analyze")],
            },
            PromptTemplate {
                id: "blog".to_string(),
                name: "Blog Post".to_string(),
                description: "Create engaging blog content".to_string(),
                category: "Content".to_string(),
                intent: Intent::Content,
                content: "Write a comprehensive and engaging blog post about {{topic}}. Include an attention-grabbing introduction, 3-4 main sections with practical insights, and a compelling conclusion that encourages action.".to_string(),
                variables: vec![TemplateVariable::new("topic", "Subject of the post")],
            },
            PromptTemplate {
                id: "summary".to_string(),
                name: "Text Summary".to_string(),
                description: "Summarize long content".to_string(),
                category: "Summary".to_string(),
                intent: Intent::Summary,
                content: "Provide a concise summary of the following text, highlighting the main points and key takeaways: {{text}}".to_string(),
                variables: vec![TemplateVariable::new("text", "The text to summarize")],
            },
            PromptTemplate {
                id: "code".to_string(),
                name: "Code Generation".to_string(),
                description: "Generate clean, documented code".to_string(),
                category: "Code".to_string(),
                intent: Intent::Code,
                content: "Generate clean, well-documented code for {{functionality}}. Include comments explaining the logic and provide usage examples.".to_string(),
                variables: vec![TemplateVariable::new("functionality", "What the code should do")],
            },
            PromptTemplate {
                id: "creative".to_string(),
                name: "Creative Writing".to_string(),
                description: "Creative content generation".to_string(),
                category: "Creative".to_string(),
                intent: Intent::Creative,
                content: "Create a creative and engaging piece about {{topic}}. Use vivid descriptions, compelling characters (if applicable), and maintain a {{tone}} throughout.".to_string(),
                variables: vec![
                    TemplateVariable::new("topic", "Subject of the piece"),
                    TemplateVariable {
                        name: "tone".to_string(),
                        description: "Voice of the piece".to_string(),
                        default_value: Some("warm, conversational tone".to_string()),
                    },
                ],
            },
            PromptTemplate {
                id: "qa".to_string(),
                name: "Q&A Format".to_string(),
                description: "Question and answer format".to_string(),
                category: "Q&A".to_string(),
                intent: Intent::Qa,
                content: "Provide detailed answers to the following questions about {{topic}}. Structure each answer clearly and include practical examples where relevant: {{questions}}".to_string(),
                variables: vec![
                    TemplateVariable::new("topic", "Subject of the questions"),
                    TemplateVariable::new("questions", "The questions to answer"),
                ],
            },
        ]
    }

    fn register(&mut self, template: PromptTemplate) -> Result<()> {
        self.handlebars
            .register_template_string(&template_key(&template.id), &template.content)?;
        self.templates.retain(|t| t.id != template.id);
        self.templates.push(template);
        Ok(())
    }

    /// Loads every `.hbs` file in `dir` as a general-purpose prompt template.
    /// A custom template replaces a built-in one with the same id.
    pub async fn load_custom_templates(&mut self, dir: &Path) -> Result<usize> {
        if !fs::try_exists(dir).await? {
            warn!("Template directory does not exist: {}", dir.display());
            return Ok(0);
        }

        let variable_pattern = Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}")?;
        let mut loaded = 0;
        let mut entries = fs::read_dir(dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path: PathBuf = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("hbs") {
                continue;
            }
            let id = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| PromptLensError::Store(format!("Invalid template filename: {}", path.display())))?
                .to_string();

            let content = fs::read_to_string(&path).await?;
            let mut variables: Vec<TemplateVariable> = Vec::new();
            for captures in variable_pattern.captures_iter(&content) {
                let name = &captures[1];
                if !variables.iter().any(|v| v.name == name) {
                    variables.push(TemplateVariable::new(name, "Custom template variable"));
                }
            }

            debug!(id = %id, variables = variables.len(), "loaded custom template");
            self.register(PromptTemplate {
                name: id.clone(),
                description: format!("Custom template from {}", path.display()),
                category: "Custom".to_string(),
                intent: Intent::General,
                id,
                content,
                variables,
            })?;
            loaded += 1;
        }

        Ok(loaded)
    }

    pub fn templates(&self) -> &[PromptTemplate] {
        &self.templates
    }

    pub fn get_template(&self, id: &str) -> Option<&PromptTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Fills a prompt template. Variables without a value fall back to their
    /// default, then to a bracketed placeholder such as `[TOPIC]`.
    pub fn render_prompt(&self, id: &str, values: &HashMap<String, String>) -> Result<String> {
        let template = self
            .get_template(id)
            .ok_or_else(|| PromptLensError::Store(format!("Unknown template: {}", id)))?;

        let mut data = serde_json::Map::new();
        for variable in &template.variables {
            let value = values
                .get(&variable.name)
                .cloned()
                .or_else(|| variable.default_value.clone())
                .unwrap_or_else(|| variable.placeholder());
            data.insert(variable.name.clone(), serde_json::Value::String(value));
        }

        Ok(self
            .handlebars
            .render(&template_key(id), &serde_json::Value::Object(data))?)
    }

    pub fn render_report(&self, record: &OptimizationRecord) -> Result<String> {
        let mut data = serde_json::to_value(record)?;
        if let serde_json::Value::Object(map) = &mut data {
            map.insert(
                "improvement_count".to_string(),
                serde_json::Value::from(record.improvements.len()),
            );
        }
        Ok(self.handlebars.render(REPORT_TEMPLATE, &data)?)
    }
}

fn template_key(id: &str) -> String {
    format!("prompt::{}", id)
}

fn format_date_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let raw = h.param(0).and_then(|v| v.value().as_str()).unwrap_or("");
    let format = h.param(1).and_then(|v| v.value().as_str()).unwrap_or("%Y-%m-%d %H:%M:%S");
    let formatted = match chrono::DateTime::parse_from_rfc3339(raw) {
        Ok(timestamp) => timestamp.format(format).to_string(),
        Err(_) => raw.to_string(),
    };
    out.write(&formatted)?;
    Ok(())
}

fn uppercase_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let text = h.param(0).and_then(|v| v.value().as_str()).unwrap_or("");
    out.write(&text.to_uppercase())?;
    Ok(())
}

fn pluralize_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let count = h.param(0).and_then(|v| v.value().as_u64()).unwrap_or(0);
    let singular = h.param(1).and_then(|v| v.value().as_str()).unwrap_or("");
    let fallback = format!("{}s", singular);
    let plural = h.param(2).and_then(|v| v.value().as_str()).unwrap_or(&fallback);

    let result = if count == 1 { singular } else { plural };
    out.write(result)?;
    Ok(())
}
