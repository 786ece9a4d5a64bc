use promptlens::analyzer::Analyzer;
use promptlens::app::{export_optimized, format_history_plain, App};
use promptlens::cli::{Commands, OutputFormat};
use promptlens::config::Config;
use promptlens::history::{FileStore, History, KeyValueStore, MemoryStore, HISTORY_KEY, USAGE_KEY};
use promptlens::session::{AnalysisDebouncer, OptimizeGate};
use promptlens::synthesizer::OptimizeOptions;
use promptlens::template_engine::TemplateEngine;
use promptlens::{Intent, PromptLensError};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::tempdir;
use tokio::fs;

const PROMPT: &str = "Write a story about a dragon";

async fn memory_app() -> (App, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let app = App::with_store(Config::default(), store.clone()).await.unwrap();
    (app, store)
}

fn optimize_command(text: &str) -> Commands {
    Commands::Optimize {
        text: Some(text.to_string()),
        file: None,
        intent: Some(Intent::Creative),
        platform: None,
        tone: None,
        format: Some(OutputFormat::Json),
        output: None,
        export: false,
        no_history: false,
    }
}

#[tokio::test]
async fn test_app_creation() {
    let (app, _) = memory_app().await;
    assert!(app.history().is_empty());
    assert_eq!(app.templates().templates().len(), 6);
}

#[tokio::test]
async fn test_text_analysis_command() {
    let (mut app, _) = memory_app().await;

    let command = Commands::Analyze {
        text: Some(PROMPT.to_string()),
        file: None,
        dir: None,
        intent: Some(Intent::Creative),
        format: Some(OutputFormat::Json),
        output: None,
    };

    let result = app.run_command(command).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_analysis_output_to_file() {
    let (mut app, _) = memory_app().await;
    let dir = tempdir().unwrap();
    let prompt_file = dir.path().join("prompt.txt");
    let output_file = dir.path().join("report.md");
    fs::write(&prompt_file, PROMPT).await.unwrap();

    let command = Commands::Analyze {
        text: None,
        file: Some(prompt_file),
        dir: None,
        intent: Some(Intent::Creative),
        format: Some(OutputFormat::Markdown),
        output: Some(output_file.clone()),
    };
    app.run_command(command).await.unwrap();

    let content = fs::read_to_string(&output_file).await.unwrap();
    assert!(content.contains("# 🔎 Prompt Analysis Report"));
    assert!(content.contains("| **Strength** | 6/10 |"));
    assert!(content.contains("**Missing:** context, role, format, examples, constraints"));
}

#[tokio::test]
async fn test_directory_analysis_command() {
    let (mut app, _) = memory_app().await;
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), PROMPT).await.unwrap();
    fs::write(dir.path().join("b.prompt"), "Summarize this article").await.unwrap();
    fs::write(dir.path().join("ignored.rs"), "fn main() {}").await.unwrap();
    let output_file = dir.path().join("scores.json");

    let command = Commands::Analyze {
        text: None,
        file: None,
        dir: Some(dir.path().to_path_buf()),
        intent: None,
        format: Some(OutputFormat::Json),
        output: Some(output_file.clone()),
    };
    app.run_command(command).await.unwrap();

    let content = fs::read_to_string(&output_file).await.unwrap();
    let entries: Vec<serde_json::Value> = serde_json::from_str(&content).unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|e| e["analysis"]["strength_score"].is_u64()));
}

#[tokio::test]
async fn test_missing_input_is_an_error() {
    let (mut app, _) = memory_app().await;
    let command = Commands::Classify {
        text: None,
        file: None,
        format: None,
    };
    assert!(app.run_command(command).await.is_err());

    let command = Commands::Analyze {
        text: None,
        file: Some(PathBuf::from("does-not-exist.txt")),
        dir: None,
        intent: None,
        format: None,
        output: None,
    };
    assert!(app.run_command(command).await.is_err());
}

#[tokio::test]
async fn test_optimize_records_history() {
    let (mut app, store) = memory_app().await;

    app.run_command(optimize_command(PROMPT)).await.unwrap();

    assert_eq!(app.history().len(), 1);
    assert_eq!(app.history().usage_count(), 1);
    let latest = app.history().latest().unwrap();
    assert_eq!(latest.original_text, PROMPT);
    assert_eq!(latest.improvements.len(), 3);

    assert!(store.get(HISTORY_KEY).await.unwrap().is_some());
    assert_eq!(store.get(USAGE_KEY).await.unwrap().as_deref(), Some("1"));
}

#[tokio::test]
async fn test_optimize_without_history() {
    let (mut app, store) = memory_app().await;

    let command = Commands::Optimize {
        text: Some(PROMPT.to_string()),
        file: None,
        intent: None,
        platform: None,
        tone: Some(10),
        format: Some(OutputFormat::Plain),
        output: None,
        export: false,
        no_history: true,
    };
    app.run_command(command).await.unwrap();

    assert!(app.history().is_empty());
    assert!(store.get(HISTORY_KEY).await.unwrap().is_none());
}

#[tokio::test]
async fn test_optimize_rejects_blank_prompt() {
    let (mut app, _) = memory_app().await;
    let error = app.run_command(optimize_command("   ")).await.unwrap_err();
    assert_eq!(error.to_string(), "Please enter a prompt to optimize.");
    assert_eq!(app.history().usage_count(), 0);
}

#[tokio::test]
async fn test_history_is_bounded_and_newest_first() {
    let (mut app, store) = memory_app().await;

    for n in 1..=7 {
        app.run_command(optimize_command(&format!("Write a story about dragon number {}", n)))
            .await
            .unwrap();
    }

    let history = app.history();
    assert_eq!(history.len(), 5);
    assert_eq!(history.usage_count(), 7);
    assert!(history.records()[0].original_text.ends_with("number 7"));
    assert!(history.records()[4].original_text.ends_with("number 3"));

    let reloaded = History::load(store.as_ref(), 5).await.unwrap();
    assert_eq!(&reloaded, history);

    let listing = format_history_plain(history);
    assert!(listing.contains("5 of 5, 7 total"));
}

#[tokio::test]
async fn test_history_show_and_clear() {
    let (mut app, store) = memory_app().await;
    app.run_command(optimize_command(PROMPT)).await.unwrap();
    let id = app.history().latest().unwrap().short_id().to_string();

    let show = Commands::History {
        show: Some(id),
        clear: false,
        format: Some(OutputFormat::Markdown),
    };
    app.run_command(show).await.unwrap();

    let unknown = Commands::History {
        show: Some("zzzzzzzz".to_string()),
        clear: false,
        format: None,
    };
    assert!(app.run_command(unknown).await.is_err());

    let clear = Commands::History {
        show: None,
        clear: true,
        format: None,
    };
    app.run_command(clear).await.unwrap();
    assert!(app.history().is_empty());
    assert_eq!(app.history().usage_count(), 1);

    let reloaded = History::load(store.as_ref(), 5).await.unwrap();
    assert!(reloaded.is_empty());
    assert_eq!(reloaded.usage_count(), 1);
}

#[tokio::test]
async fn test_templates_command() {
    let (mut app, _) = memory_app().await;

    let list = Commands::Templates {
        use_template: None,
        vars: vec![],
        optimize: false,
    };
    app.run_command(list).await.unwrap();

    let fill = Commands::Templates {
        use_template: Some("blog".to_string()),
        vars: vec![("topic".to_string(), "remote work".to_string())],
        optimize: true,
    };
    app.run_command(fill).await.unwrap();
    let latest = app.history().latest().unwrap();
    assert!(latest.original_text.contains("blog post about remote work"));
    assert_eq!(latest.intent, Intent::Content);

    let unknown = Commands::Templates {
        use_template: Some("nope".to_string()),
        vars: vec![],
        optimize: false,
    };
    assert!(app.run_command(unknown).await.is_err());
}

#[test]
fn test_template_placeholders_and_defaults() {
    let engine = TemplateEngine::new().unwrap();
    let empty = HashMap::new();

    let code = engine.render_prompt("code", &empty).unwrap();
    assert!(code.contains("code for [FUNCTIONALITY]."));

    let creative = engine.render_prompt("creative", &empty).unwrap();
    assert!(creative.contains("about [TOPIC]."));
    assert!(creative.contains("maintain a warm, conversational tone throughout"));

    let mut values = HashMap::new();
    values.insert("data".to_string(), "Q3 sales <EU & US>".to_string());
    let analysis = engine.render_prompt("analysis", &values).unwrap();
    assert!(analysis.ends_with("recommendations: Q3 sales <EU & US>"));

    assert!(engine.render_prompt("missing", &empty).is_err());
}

#[tokio::test]
async fn test_custom_templates_override_built_ins() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("code.hbs"), "Port {{module}} to {{language}}").await.unwrap();
    fs::write(dir.path().join("notes.txt"), "not a template").await.unwrap();

    let mut engine = TemplateEngine::new().unwrap();
    let loaded = engine.load_custom_templates(dir.path()).await.unwrap();
    assert_eq!(loaded, 1);
    assert_eq!(engine.templates().len(), 6);

    let template = engine.get_template("code").unwrap();
    let names: Vec<&str> = template.variables.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["module", "language"]);

    let mut values = HashMap::new();
    values.insert("module".to_string(), "parser".to_string());
    let rendered = engine.render_prompt("code", &values).unwrap();
    assert_eq!(rendered, "Port parser to [LANGUAGE]");
}

#[test]
fn test_report_rendering() {
    let analyzer = Analyzer::new().unwrap();
    let engine = TemplateEngine::new().unwrap();
    let options = OptimizeOptions {
        intent: Intent::Creative,
        ..Default::default()
    };
    let record = analyzer.optimize(PROMPT, &options).unwrap();

    let report = engine.render_report(&record).unwrap();
    assert!(report.starts_with("# Prompt Optimization Report"));
    assert!(report.contains("**Tier:** TARGETED"));
    assert!(report.contains("## Improvements (3)"));
    assert!(report.contains("- Requested concrete examples"));
    assert!(report.contains(&record.optimized_text));
}

#[tokio::test]
async fn test_file_store_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state").join("store.json");
    let store = FileStore::new(&path);

    assert!(store.get(HISTORY_KEY).await.unwrap().is_none());
    store.set(USAGE_KEY, "3".to_string()).await.unwrap();
    store.set("other", "value".to_string()).await.unwrap();

    let reopened = FileStore::new(&path);
    assert_eq!(reopened.get(USAGE_KEY).await.unwrap().as_deref(), Some("3"));
    assert_eq!(reopened.get("other").await.unwrap().as_deref(), Some("value"));

    let history = History::load(&reopened, 5).await.unwrap();
    assert!(history.is_empty());
    assert_eq!(history.usage_count(), 3);
}

#[tokio::test]
async fn test_corrupt_history_starts_fresh() {
    let store = MemoryStore::new();
    store.set(HISTORY_KEY, "{not json".to_string()).await.unwrap();
    store.set(USAGE_KEY, "many".to_string()).await.unwrap();

    let history = History::load(&store, 5).await.unwrap();
    assert!(history.is_empty());
    assert_eq!(history.usage_count(), 0);
}

#[tokio::test]
async fn test_export_writes_timestamped_file() {
    let dir = tempdir().unwrap();
    let analyzer = Analyzer::new().unwrap();
    let record = analyzer.optimize(PROMPT, &OptimizeOptions::default()).unwrap();

    let path = export_optimized(&record, dir.path()).await.unwrap();
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert_eq!(
        name,
        format!("optimized-prompt-{}.txt", record.timestamp.timestamp_millis())
    );
    assert_eq!(fs::read_to_string(&path).await.unwrap(), record.optimized_text);
}

#[tokio::test]
async fn test_debouncer_coalesces_bursts() {
    let analyzer = Analyzer::new().unwrap();
    let mut debouncer = AnalysisDebouncer::new(analyzer, Duration::from_millis(30));

    debouncer.schedule("W".to_string(), Intent::Creative);
    debouncer.schedule("Write a".to_string(), Intent::Creative);
    let last = debouncer.schedule(PROMPT.to_string(), Intent::Creative);

    let result = tokio::time::timeout(Duration::from_secs(2), debouncer.next())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(result.generation, last);
    assert_eq!(result.text, PROMPT);
    assert!(result.record.matches(PROMPT, Intent::Creative));

    tokio::time::sleep(Duration::from_millis(80)).await;
    assert!(debouncer.try_latest().is_none());
}

#[tokio::test]
async fn test_debouncer_cancel_drops_pending() {
    let analyzer = Analyzer::new().unwrap();
    let mut debouncer = AnalysisDebouncer::new(analyzer, Duration::from_millis(20));

    debouncer.schedule(PROMPT.to_string(), Intent::General);
    debouncer.cancel();

    tokio::time::sleep(Duration::from_millis(80)).await;
    assert!(debouncer.try_latest().is_none());
}

#[tokio::test]
async fn test_gate_allows_one_optimize_at_a_time() {
    let analyzer = Analyzer::new().unwrap();
    let gate = OptimizeGate::new();
    let options = OptimizeOptions::default();

    let permit = gate.try_acquire().unwrap();
    assert!(gate.is_busy());
    let rejected = gate.run(&analyzer, PROMPT, &options, Duration::ZERO).await;
    assert!(matches!(rejected, Err(PromptLensError::OptimizeInProgress)));

    drop(permit);
    assert!(!gate.is_busy());
    let record = gate.run(&analyzer, PROMPT, &options, Duration::ZERO).await.unwrap();
    assert_eq!(record.original_text, PROMPT);
    assert!(!gate.is_busy());
}

#[tokio::test]
async fn test_gate_rejects_concurrent_run() {
    let analyzer = Analyzer::new().unwrap();
    let gate = OptimizeGate::new();

    let slow = {
        let gate = gate.clone();
        let analyzer = analyzer.clone();
        tokio::spawn(async move {
            gate.run(&analyzer, PROMPT, &OptimizeOptions::default(), Duration::from_millis(150))
                .await
        })
    };
    tokio::time::sleep(Duration::from_millis(30)).await;

    let second = gate
        .run(&analyzer, PROMPT, &OptimizeOptions::default(), Duration::ZERO)
        .await;
    assert!(matches!(second, Err(PromptLensError::OptimizeInProgress)));
    assert!(slow.await.unwrap().is_ok());
}

#[test]
fn test_blocking_store_access() {
    let store = MemoryStore::new();
    tokio_test::block_on(async {
        store.set(USAGE_KEY, "9".to_string()).await.unwrap();
        let history = History::load(&store, 2).await.unwrap();
        assert_eq!(history.usage_count(), 9);
        assert_eq!(history.capacity(), 2);
    });
}
