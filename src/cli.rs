use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::intent::{Intent, Platform};

#[derive(Parser)]
#[command(name = "promptlens")]
#[command(about = "🔎 PromptLens - Prompt Analyzer & Optimizer")]
#[command(long_about = "PromptLens scores natural-language AI prompts and rewrites them so models produce better output.
All analysis is local and deterministic; no model API is ever called.

QUICK START:
  promptlens analyze \"Write a story about a dragon\" --intent creative   # Score a prompt
  promptlens optimize \"Write a story about a dragon\" --intent creative  # Rewrite it
  promptlens templates                                                   # Starter templates
  promptlens tui                                                         # Interactive mode

EXAMPLES:
  promptlens analyze --file prompt.txt --format markdown
  promptlens optimize --file prompt.txt --tone 80 --platform claude --export
  promptlens history
  promptlens templates --use blog --var topic=\"remote work\" --optimize")]
#[command(version = "1.0.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Score a prompt and report missing elements")]
    #[command(long_about = "Analyze a prompt for clarity, specificity and structure.

INPUT OPTIONS (choose one):
  <TEXT>     Prompt text in quotes
  --file     File containing one prompt
  --dir      Directory of prompt files (.txt, .md, .prompt), each analyzed separately

OUTPUT OPTIONS:
  --format   Output format: json, markdown, plain
  --output   Save results to file instead of displaying

EXAMPLES:
  promptlens analyze \"Summarize this article in 3 bullet points\" --intent analysis
  promptlens analyze --dir ./prompts --format json --output scores.json")]
    Analyze {
        #[arg(help = "Prompt text to analyze (use quotes for multi-word text)")]
        text: Option<String>,

        #[arg(short, long, help = "File containing the prompt")]
        file: Option<PathBuf>,

        #[arg(short, long, help = "Directory of prompt files to analyze one by one")]
        dir: Option<PathBuf>,

        #[arg(short, long, help = "What the prompt is for", value_enum)]
        intent: Option<Intent>,

        #[arg(long, help = "Output format", value_enum)]
        format: Option<OutputFormat>,

        #[arg(short, long, help = "Save output to file instead of displaying on screen")]
        output: Option<PathBuf>,
    },

    #[command(about = "Rewrite a prompt to fill its gaps")]
    #[command(long_about = "Optimize a prompt. The rewrite intensity depends on the prompt's strength score:
  7-10  Minimal   (only critical gaps are patched)
  5-6   Targeted  (role, format and examples)
  1-4   Full      (context, role, format, examples, constraints, output)

EXAMPLES:
  promptlens optimize \"Make a chart of sales\" --intent analysis
  promptlens optimize --file prompt.txt --tone 10 --export
  promptlens optimize \"Explain recursion\" --no-history --format json")]
    Optimize {
        #[arg(help = "Prompt text to optimize (use quotes for multi-word text)")]
        text: Option<String>,

        #[arg(short, long, help = "File containing the prompt")]
        file: Option<PathBuf>,

        #[arg(short, long, help = "What the prompt is for", value_enum)]
        intent: Option<Intent>,

        #[arg(short, long, help = "Target model platform", value_enum)]
        platform: Option<Platform>,

        #[arg(short, long, help = "Tone from 0 (casual) to 100 (technical)", value_parser = clap::value_parser!(u8).range(0..=100))]
        tone: Option<u8>,

        #[arg(long, help = "Output format", value_enum)]
        format: Option<OutputFormat>,

        #[arg(short, long, help = "Save output to file")]
        output: Option<PathBuf>,

        #[arg(long, help = "Also write the optimized prompt to optimized-prompt-<timestamp>.txt")]
        export: bool,

        #[arg(long, help = "Do not record this run in history")]
        no_history: bool,
    },

    #[command(about = "Classify a prompt into a task category")]
    Classify {
        #[arg(help = "Prompt text to classify")]
        text: Option<String>,

        #[arg(short, long, help = "File containing the prompt")]
        file: Option<PathBuf>,

        #[arg(long, help = "Output format", value_enum)]
        format: Option<OutputFormat>,
    },

    #[command(about = "Show or clear optimization history")]
    #[command(long_about = "List recent optimizations, newest first, or show one in full.

EXAMPLES:
  promptlens history
  promptlens history --show 3f2a9c1d
  promptlens history --clear")]
    History {
        #[arg(long, help = "Show one record in full by id (a prefix is enough)")]
        show: Option<String>,

        #[arg(long, help = "Remove all stored records")]
        clear: bool,

        #[arg(long, help = "Output format", value_enum)]
        format: Option<OutputFormat>,
    },

    #[command(about = "List and fill starter prompt templates")]
    #[command(long_about = "Starter templates cover common tasks. Fill placeholders with --var.

EXAMPLES:
  promptlens templates
  promptlens templates --use code --var functionality=\"a CSV parser\"
  promptlens templates --use blog --var topic=\"remote work\" --optimize")]
    Templates {
        #[arg(long = "use", help = "Template id to fill")]
        use_template: Option<String>,

        #[arg(long = "var", help = "Template variable as key=value", value_parser = parse_key_value)]
        vars: Vec<(String, String)>,

        #[arg(long, help = "Optimize the filled template right away")]
        optimize: bool,
    },

    #[command(about = "Launch interactive terminal interface")]
    #[command(long_about = "Start the interactive TUI with live analysis:
  • 📝 Prompt tab: Enter and edit the prompt; analysis refreshes as you type
  • 📊 Analysis tab: Scores, detected and missing elements
  • ✨ Optimized tab: Rewritten prompt with the list of improvements
  • 🕘 History tab: Recent optimizations
  • 📋 Templates tab: Starter prompts

KEYBOARD SHORTCUTS:
  q     Quit application
  h     Toggle help
  i     Enter editing mode (Esc to leave)
  o     Optimize current prompt
  t     Cycle intent
  +/-   Adjust tone
  Tab   Switch between tabs
  ↑/↓   Navigate lists, Enter to load")]
    Tui,

    #[command(about = "Show and change configuration")]
    #[command(long_about = "Manage PromptLens defaults.

EXAMPLES:
  promptlens config --show
  promptlens config --intent code --tone 80
  promptlens config --history-capacity 10

CONFIGURATION FILE: ~/.promptlens/config.yml")]
    Config {
        #[arg(long, help = "Display current configuration values")]
        show: bool,

        #[arg(long, help = "Show config file location and status")]
        debug: bool,

        #[arg(long, help = "Validate all configuration settings")]
        validate: bool,

        #[arg(long, help = "Set default intent", value_enum)]
        intent: Option<Intent>,

        #[arg(long, help = "Set default platform", value_enum)]
        platform: Option<Platform>,

        #[arg(long, help = "Set default tone (0-100)", value_parser = clap::value_parser!(u8).range(0..=100))]
        tone: Option<u8>,

        #[arg(long, help = "Set how many optimizations history keeps")]
        history_capacity: Option<usize>,

        #[arg(long, help = "Set live-analysis settle delay in milliseconds")]
        debounce_ms: Option<u64>,

        #[arg(long, help = "Set custom template directory")]
        template_dir: Option<PathBuf>,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Plain,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{}'", raw));
    }
    Ok((key.to_string(), value.to_string()))
}
