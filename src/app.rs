use anyhow::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::analyzer::Analyzer;
use crate::classifier::Classification;
use crate::cli::{Commands, OutputFormat};
use crate::config::Config;
use crate::history::{FileStore, History, KeyValueStore};
use crate::intent::Intent;
use crate::records::{AnalysisRecord, OptimizationRecord};
use crate::session::OptimizeGate;
use crate::synthesizer::OptimizeOptions;
use crate::template_engine::TemplateEngine;
use crate::ui::{TemplateEntry, TuiApp};

const PROMPT_EXTENSIONS: &[&str] = &["txt", "md", "prompt"];

pub struct App {
    pub config: Config,
    analyzer: Analyzer,
    templates: TemplateEngine,
    store: Arc<dyn KeyValueStore>,
    history: History,
    gate: OptimizeGate,
}

impl App {
    pub async fn new() -> Result<Self> {
        let config = Config::load().await?;
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(config.store_path()?));
        Self::with_store(config, store).await
    }

    /// Builds an app over an arbitrary store, loading history from it.
    pub async fn with_store(config: Config, store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let analyzer = Analyzer::new()?;
        let mut templates = TemplateEngine::new()?;
        if let Some(dir) = &config.storage.template_dir {
            let loaded = templates.load_custom_templates(dir).await?;
            debug!(loaded, dir = %dir.display(), "custom templates loaded");
        }
        let history = History::load(store.as_ref(), config.storage.history_capacity).await?;

        Ok(Self {
            config,
            analyzer,
            templates,
            store,
            history,
            gate: OptimizeGate::new(),
        })
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    pub fn templates(&self) -> &TemplateEngine {
        &self.templates
    }

    fn print_branded_header(&self) {
        println!("🔎 PromptLens - Prompt Analyzer & Optimizer");
        println!("===========================================");
    }

    pub async fn run_command(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::Analyze {
                text,
                file,
                dir,
                intent,
                format,
                output,
            } => {
                let intent = intent.unwrap_or(self.config.optimizer.default_intent);
                let format = format.unwrap_or(OutputFormat::Plain);

                if let Some(dir_path) = dir {
                    return self.analyze_directory(&dir_path, intent, format, output).await;
                }

                let input_text = self.get_input_text(text, file).await?;
                let record = self.analyzer.analyze(&input_text, intent);
                let content = match format {
                    OutputFormat::Json => serde_json::to_string_pretty(&record)?,
                    OutputFormat::Markdown => format_analysis_markdown(&record, &input_text),
                    OutputFormat::Plain => format_analysis_plain(&record, &input_text),
                };
                self.emit(content, output.as_deref(), "Analysis report").await?;
            }
            Commands::Optimize {
                text,
                file,
                intent,
                platform,
                tone,
                format,
                output,
                export,
                no_history,
            } => {
                let input_text = self.get_input_text(text, file).await?;
                let options = self.config.optimize_options(intent, platform, tone);
                let record = self.optimize_text(&input_text, &options, !no_history).await?;

                let content = match format.unwrap_or(OutputFormat::Plain) {
                    OutputFormat::Json => serde_json::to_string_pretty(&record)?,
                    OutputFormat::Markdown => self.templates.render_report(&record)?,
                    OutputFormat::Plain => format_optimization_plain(&record),
                };
                self.emit(content, output.as_deref(), "Optimization report").await?;

                if export {
                    let path = export_optimized(&record, Path::new(".")).await?;
                    println!("📁 Optimized prompt exported: {}", path.display());
                }
            }
            Commands::Classify { text, file, format } => {
                let input_text = self.get_input_text(text, file).await?;
                let classification = self.analyzer.classify(&input_text);
                let content = match format.unwrap_or(OutputFormat::Plain) {
                    OutputFormat::Json => serde_json::to_string_pretty(&classification)?,
                    OutputFormat::Markdown => format_classification_markdown(&classification),
                    OutputFormat::Plain => format_classification_plain(&classification),
                };
                println!("{}", content);
            }
            Commands::History { show, clear, format } => {
                if clear {
                    let removed = self.history.len();
                    self.history.clear();
                    self.history.save(self.store.as_ref()).await?;
                    println!("🧹 Cleared {} history record(s)", removed);
                    return Ok(());
                }

                if let Some(id) = show {
                    let record = self
                        .history
                        .find(&id)
                        .ok_or_else(|| anyhow::anyhow!("No history record with id starting '{}'", id))?;
                    let content = match format.unwrap_or(OutputFormat::Markdown) {
                        OutputFormat::Json => serde_json::to_string_pretty(record)?,
                        OutputFormat::Markdown => self.templates.render_report(record)?,
                        OutputFormat::Plain => format_optimization_plain(record),
                    };
                    println!("{}", content);
                    return Ok(());
                }

                match format.unwrap_or(OutputFormat::Plain) {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(self.history.records())?)
                    }
                    _ => println!("{}", format_history_plain(&self.history)),
                }
            }
            Commands::Templates {
                use_template,
                vars,
                optimize,
            } => {
                let Some(id) = use_template else {
                    self.list_templates();
                    return Ok(());
                };

                let template = self
                    .templates
                    .get_template(&id)
                    .ok_or_else(|| anyhow::anyhow!("Unknown template '{}'. Run 'promptlens templates' to list them.", id))?;
                let intent = template.intent;
                let values: HashMap<String, String> = vars.into_iter().collect();
                let prompt = self.templates.render_prompt(&id, &values)?;

                if optimize {
                    let options = self.config.optimize_options(Some(intent), None, None);
                    let record = self.optimize_text(&prompt, &options, true).await?;
                    println!("{}", format_optimization_plain(&record));
                } else {
                    println!("{}", prompt);
                }
            }
            Commands::Tui => {
                self.run_tui().await?;
            }
            Commands::Config {
                show,
                debug,
                validate,
                intent,
                platform,
                tone,
                history_capacity,
                debounce_ms,
                template_dir,
            } => {
                if debug {
                    self.show_config_debug().await?;
                    return Ok(());
                }

                if show {
                    self.show_config_status();
                    return Ok(());
                }

                if validate {
                    println!("🔍 Validating configuration...");
                    let result = self.config.validate_all_settings();
                    if result.is_valid {
                        println!("✅ Configuration is valid!");
                    } else {
                        println!("❌ Configuration issues found:");
                        for issue in result.issues {
                            println!("   • {}", issue);
                        }
                    }
                    if !result.warnings.is_empty() {
                        println!("⚠️  Warnings:");
                        for warning in result.warnings {
                            println!("   • {}", warning);
                        }
                    }
                    return Ok(());
                }

                let mut updated = false;
                if let Some(intent) = intent {
                    self.config.set_default_intent(intent);
                    updated = true;
                }
                if let Some(platform) = platform {
                    self.config.set_default_platform(platform);
                    updated = true;
                }
                if let Some(tone) = tone {
                    self.config.set_default_tone(tone);
                    updated = true;
                }
                if let Some(capacity) = history_capacity {
                    self.config.set_history_capacity(capacity);
                    updated = true;
                }
                if let Some(ms) = debounce_ms {
                    self.config.set_debounce_ms(ms);
                    updated = true;
                }
                if let Some(dir) = template_dir {
                    if !dir.is_dir() {
                        return Err(anyhow::anyhow!("Template directory does not exist: {}", dir.display()));
                    }
                    self.config.storage.template_dir = Some(dir);
                    updated = true;
                }

                if updated {
                    self.config.save().await?;
                    println!("✅ Configuration updated successfully!");
                    self.show_config_status();
                } else {
                    println!("🔧 No configuration changes specified. Use --help for options.");
                }
            }
        }

        Ok(())
    }

    /// Optimizes under the session gate and, when asked, records the result.
    pub async fn optimize_text(
        &mut self,
        text: &str,
        options: &OptimizeOptions,
        record_history: bool,
    ) -> Result<OptimizationRecord> {
        if text.trim().is_empty() {
            return Err(anyhow::anyhow!("Please enter a prompt to optimize."));
        }

        let record = self
            .gate
            .run(&self.analyzer, text, options, self.config.optimize_latency())
            .await?;

        if record_history {
            self.history.record(record.clone());
            self.history.save(self.store.as_ref()).await?;
            info!(id = %record.short_id(), usage = self.history.usage_count(), "optimization recorded");
        }

        Ok(record)
    }

    pub async fn run_tui(&mut self) -> Result<()> {
        let no_values = HashMap::new();
        let mut entries = Vec::new();
        for template in self.templates.templates() {
            entries.push(TemplateEntry {
                name: template.name.clone(),
                description: template.description.clone(),
                intent: template.intent,
                prompt: self.templates.render_prompt(&template.id, &no_values)?,
            });
        }

        let mut tui_app = TuiApp::new(
            self.analyzer.clone(),
            self.config.clone(),
            Arc::clone(&self.store),
            self.history.clone(),
            entries,
        );
        tui_app.run().await?;
        self.history = tui_app.into_history();
        Ok(())
    }

    async fn get_input_text(&self, text: Option<String>, file: Option<PathBuf>) -> Result<String> {
        if let Some(text) = text {
            return Ok(text);
        }

        if let Some(file_path) = file {
            return self.read_file(&file_path).await;
        }

        Err(anyhow::anyhow!("No input provided. Pass the prompt text or use --file"))
    }

    async fn read_file(&self, path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(anyhow::anyhow!("File does not exist: {:?}", path));
        }

        let content = fs::read_to_string(path).await?;
        debug!(path = %path.display(), chars = content.len(), "prompt loaded");
        Ok(content)
    }

    async fn analyze_directory(
        &self,
        dir: &Path,
        intent: Intent,
        format: OutputFormat,
        output: Option<PathBuf>,
    ) -> Result<()> {
        if !dir.is_dir() {
            return Err(anyhow::anyhow!("Directory does not exist: {:?}", dir));
        }

        println!("📁 Scanning directory: {}", dir.display());
        let mut results: Vec<(PathBuf, String, AnalysisRecord)> = Vec::new();

        for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            let supported = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| PROMPT_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
                .unwrap_or(false);
            if !path.is_file() || !supported {
                continue;
            }

            match fs::read_to_string(path).await {
                Ok(content) => {
                    let record = self.analyzer.analyze(&content, intent);
                    results.push((path.to_path_buf(), content, record));
                }
                Err(e) => eprintln!("⚠️  Could not read file {:?}: {}", path, e),
            }
        }

        if results.is_empty() {
            return Err(anyhow::anyhow!("No prompt files (.txt, .md, .prompt) found in directory"));
        }
        println!("📊 Analyzed {} prompt file(s)", results.len());

        let content = match format {
            OutputFormat::Json => {
                let entries: Vec<serde_json::Value> = results
                    .iter()
                    .map(|(path, _, record)| {
                        serde_json::json!({
                            "file": path.display().to_string(),
                            "analysis": record,
                        })
                    })
                    .collect();
                serde_json::to_string_pretty(&entries)?
            }
            OutputFormat::Markdown => results
                .iter()
                .map(|(path, text, record)| {
                    format!("<!-- {} -->\n{}", path.display(), format_analysis_markdown(record, text))
                })
                .collect::<Vec<_>>()
                .join("\n---\n\n"),
            OutputFormat::Plain => results
                .iter()
                .map(|(path, text, record)| {
                    format!("=== {} ===\n{}", path.display(), format_analysis_plain(record, text))
                })
                .collect::<Vec<_>>()
                .join("\n"),
        };

        self.emit(content, output.as_deref(), "Batch analysis report").await
    }

    async fn emit(&self, content: String, output: Option<&Path>, label: &str) -> Result<()> {
        match output {
            Some(path) => {
                fs::write(path, content).await?;
                let absolute_path = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
                println!("📁 {} saved: {}", label, absolute_path.display());
            }
            None => println!("{}", content),
        }
        Ok(())
    }

    fn list_templates(&self) {
        self.print_branded_header();
        println!("📋 Starter templates:\n");
        for template in self.templates.templates() {
            println!("  {:<10} {} - {}", template.id, template.name, template.description);
            let variables: Vec<String> = template.variables.iter().map(|v| v.name.clone()).collect();
            if !variables.is_empty() {
                println!("  {:<10} variables: {}", "", variables.join(", "));
            }
        }
        println!("\n💡 Fill one with: promptlens templates --use <id> --var name=value");
    }

    fn show_config_status(&self) {
        self.print_branded_header();
        println!("🎯 Default intent:   {}", self.config.optimizer.default_intent.label());
        println!("🌐 Default platform: {}", self.config.optimizer.default_platform);
        println!("🎚️  Default tone:     {}/100", self.config.optimizer.default_tone);
        println!("⏱️  Debounce:         {} ms", self.config.optimizer.debounce_ms);
        println!("🕘 History capacity: {}", self.config.storage.history_capacity);
        match self.config.store_path() {
            Ok(path) => println!("💾 Store:            {}", path.display()),
            Err(e) => println!("💾 Store:            unavailable ({})", e),
        }
        match &self.config.storage.template_dir {
            Some(dir) => println!("📁 Template dir:     {}", dir.display()),
            None => println!("📁 Template dir:     built-in only"),
        }
        println!("📈 Prompts optimized: {}", self.history.usage_count());
    }

    async fn show_config_debug(&self) -> Result<()> {
        let config_path = Config::config_path()?;
        println!("Configuration file path: {:?}", config_path);
        println!("Config directory exists: {}", config_path.parent().map_or(false, |p| p.exists()));
        println!("Config file exists: {}", config_path.exists());

        if config_path.exists() {
            match fs::read_to_string(&config_path).await {
                Ok(content) => {
                    println!("Config file size: {} bytes", content.len());
                    println!("Config file content:");
                    println!("{}", content);
                }
                Err(e) => println!("Error reading config file: {}", e),
            }
        } else {
            println!("Config file does not exist. Creating default config...");
            self.config.save().await?;
            println!("Default config created at: {:?}", config_path);
        }
        Ok(())
    }
}

/// Writes the optimized text to `optimized-prompt-<millis>.txt` under `dir`.
pub async fn export_optimized(record: &OptimizationRecord, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(format!("optimized-prompt-{}.txt", record.timestamp.timestamp_millis()));
    fs::write(&path, &record.optimized_text).await?;
    Ok(path)
}

fn score_bar(score: u8) -> String {
    let filled = score as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(10usize.saturating_sub(filled)))
}

fn join_elements<'a>(elements: impl Iterator<Item = &'a crate::elements::PromptElement>) -> String {
    let names: Vec<String> = elements.map(|e| e.to_string()).collect();
    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    }
}

pub fn format_analysis_markdown(record: &AnalysisRecord, input_text: &str) -> String {
    let mut output = String::new();

    output.push_str("# 🔎 Prompt Analysis Report\n\n");
    output.push_str("## 📝 Analyzed Prompt\n\n");
    output.push_str(&format!("> {}\n\n", input_text.trim()));

    output.push_str("## 📊 Scores\n\n");
    output.push_str("| Metric | Score |\n|---|---|\n");
    output.push_str(&format!("| **Strength** | {}/10 |\n", record.strength_score));
    output.push_str(&format!("| Clarity | {}/10 |\n", record.clarity_score));
    output.push_str(&format!("| Specificity | {}/10 |\n", record.specificity_score));
    output.push_str(&format!("| Structure | {}/10 |\n", record.structure_score));
    output.push_str(&format!("| Readability | {}/100 |\n\n", record.readability_score));

    output.push_str(&format!(
        "- **Category:** {} ({}% confidence)\n",
        record.category, record.confidence
    ));
    output.push_str(&format!("- **Intent:** {}\n", record.intent.label()));
    output.push_str(&format!("- **Estimated tokens:** {}\n", record.token_estimate));
    output.push_str(&format!("- **Optimization tier:** {}\n\n", record.tier()));

    output.push_str("## 🧩 Elements\n\n");
    output.push_str(&format!("- **Detected:** {}\n", join_elements(record.detected_elements.iter())));
    output.push_str(&format!("- **Missing:** {}\n\n", join_elements(record.missing_elements.iter())));

    if !record.weaknesses.is_empty() {
        output.push_str("## ⚠️ Weaknesses\n\n");
        for weakness in &record.weaknesses {
            output.push_str(&format!("- {}\n", weakness));
        }
        output.push('\n');
    }

    if !record.improvement_candidates.is_empty() {
        output.push_str("## 💡 Suggestions\n\n");
        for suggestion in &record.improvement_candidates {
            output.push_str(&format!("- {}\n", suggestion));
        }
        output.push('\n');
    }

    output
}

pub fn format_analysis_plain(record: &AnalysisRecord, input_text: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("PROMPT: {}\n\n", input_text.trim()));
    output.push_str(&format!("Strength     {} {}/10\n", score_bar(record.strength_score), record.strength_score));
    output.push_str(&format!("Clarity      {} {}/10\n", score_bar(record.clarity_score), record.clarity_score));
    output.push_str(&format!("Specificity  {} {}/10\n", score_bar(record.specificity_score), record.specificity_score));
    output.push_str(&format!("Structure    {} {}/10\n", score_bar(record.structure_score), record.structure_score));
    output.push_str(&format!("Readability  {}/100\n\n", record.readability_score));
    output.push_str(&format!("Category: {} ({}%)\n", record.category, record.confidence));
    output.push_str(&format!("Tokens:   ~{}\n", record.token_estimate));
    output.push_str(&format!("Tier:     {}\n", record.tier()));
    output.push_str(&format!("Detected: {}\n", join_elements(record.detected_elements.iter())));
    output.push_str(&format!("Missing:  {}\n", join_elements(record.missing_elements.iter())));

    for weakness in &record.weaknesses {
        output.push_str(&format!("  ! {}\n", weakness));
    }
    for suggestion in &record.improvement_candidates {
        output.push_str(&format!("  + {}\n", suggestion));
    }

    output
}

pub fn format_optimization_plain(record: &OptimizationRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "✨ Optimized ({} tier, strength {} → {})\n\n",
        record.tier, record.strength_score, record.projected_score
    ));
    output.push_str(&record.optimized_text);
    output.push_str("\n\n");
    output.push_str("Improvements:\n");
    for improvement in &record.improvements {
        output.push_str(&format!("  • {}\n", improvement));
    }
    output.push_str(&format!(
        "\nCharacters: {} → {} ({:+}%)\n",
        record.character_counts.original,
        record.character_counts.optimized,
        record.growth_percent()
    ));

    output
}

fn format_classification_plain(classification: &Classification) -> String {
    format!(
        "Category:   {}\nConfidence: {}%\nKeyword hits: {}",
        classification.category, classification.confidence, classification.hits
    )
}

fn format_classification_markdown(classification: &Classification) -> String {
    format!(
        "## 🏷️ Prompt Category\n\n- **Category:** {}\n- **Confidence:** {}%\n- **Keyword hits:** {}\n",
        classification.category, classification.confidence, classification.hits
    )
}

pub fn format_history_plain(history: &History) -> String {
    if history.is_empty() {
        return format!(
            "🕘 No optimizations yet ({} prompt(s) optimized so far)",
            history.usage_count()
        );
    }

    let mut output = format!(
        "🕘 Recent optimizations ({} of {}, {} total)\n\n",
        history.len(),
        history.capacity(),
        history.usage_count()
    );
    for record in history.records() {
        let preview: String = record.original_text.chars().take(48).collect();
        let ellipsis = if record.original_text.chars().count() > 48 { "…" } else { "" };
        output.push_str(&format!(
            "  {}  {}  {:<9} {:>4}%  {}{}\n",
            record.short_id(),
            record.timestamp.format("%Y-%m-%d %H:%M"),
            record.intent.as_str(),
            format!("{:+}", record.growth_percent()),
            preview.replace('\n', " "),
            ellipsis
        ));
    }
    output
}
