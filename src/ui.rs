use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::path::Path;
use std::sync::Arc;
use std::{io, time::Duration};
use tokio::sync::mpsc;
use tracing::warn;
use tui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame, Terminal,
};

use crate::analyzer::Analyzer;
use crate::app::export_optimized;
use crate::config::Config;
use crate::error::PromptLensError;
use crate::history::{History, KeyValueStore};
use crate::intent::{Intent, ToneStyle, MAX_TONE};
use crate::records::{AnalysisRecord, OptimizationRecord};
use crate::session::{AnalysisDebouncer, OptimizeGate};

const TAB_TITLES: [&str; 5] = ["📝 Prompt", "📊 Analysis", "✨ Optimized", "🕘 History", "📋 Templates"];
const TAB_PROMPT: usize = 0;
const TAB_OPTIMIZED: usize = 2;
const TAB_HISTORY: usize = 3;
const TAB_TEMPLATES: usize = 4;
const TONE_STEP: u8 = 10;

/// A starter template with its placeholders already filled in.
#[derive(Debug, Clone)]
pub struct TemplateEntry {
    pub name: String,
    pub description: String,
    pub intent: Intent,
    pub prompt: String,
}

type OptimizeOutcome = std::result::Result<OptimizationRecord, PromptLensError>;

pub struct TuiApp {
    analyzer: Analyzer,
    config: Config,
    store: Arc<dyn KeyValueStore>,
    history: History,
    templates: Vec<TemplateEntry>,
    debouncer: AnalysisDebouncer,
    gate: OptimizeGate,
    optimize_tx: mpsc::UnboundedSender<OptimizeOutcome>,
    optimize_rx: mpsc::UnboundedReceiver<OptimizeOutcome>,
    state: AppState,
}

struct AppState {
    input_text: String,
    /// Cursor position in characters, not bytes.
    cursor_position: usize,
    intent: Intent,
    tone: u8,
    current_tab: usize,
    analysis: Option<AnalysisRecord>,
    is_analyzing: bool,
    optimized: Option<OptimizationRecord>,
    is_optimizing: bool,
    selected_history: usize,
    selected_template: usize,
    status: Option<String>,
    show_help: bool,
    input_mode: InputMode,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Normal,
    Editing,
}

impl TuiApp {
    pub fn new(
        analyzer: Analyzer,
        config: Config,
        store: Arc<dyn KeyValueStore>,
        history: History,
        templates: Vec<TemplateEntry>,
    ) -> Self {
        let debouncer = AnalysisDebouncer::new(analyzer.clone(), config.debounce_delay());
        let (optimize_tx, optimize_rx) = mpsc::unbounded_channel();
        let state = AppState {
            input_text: String::new(),
            cursor_position: 0,
            intent: config.optimizer.default_intent,
            tone: config.optimizer.default_tone,
            current_tab: TAB_PROMPT,
            analysis: None,
            is_analyzing: false,
            optimized: history.latest().cloned(),
            is_optimizing: false,
            selected_history: 0,
            selected_template: 0,
            status: None,
            show_help: false,
            input_mode: InputMode::Normal,
        };

        Self {
            analyzer,
            config,
            store,
            history,
            templates,
            debouncer,
            gate: OptimizeGate::new(),
            optimize_tx,
            optimize_rx,
            state,
        }
    }

    pub fn into_history(self) -> History {
        self.history
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.run_app(&mut terminal).await;

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    async fn run_app<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            self.drain_background().await;
            terminal.draw(|f| self.ui(f))?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    let quit = match self.state.input_mode {
                        InputMode::Normal => self.handle_normal_input(key).await?,
                        InputMode::Editing => self.handle_editing_input(key),
                    };
                    if quit {
                        break;
                    }
                }
            }
        }
        self.debouncer.cancel();
        Ok(())
    }

    /// Applies finished analyses and optimizations.
    async fn drain_background(&mut self) {
        if let Some(result) = self.debouncer.try_latest() {
            if result.text == self.state.input_text {
                self.state.analysis = Some(result.record);
                self.state.is_analyzing = false;
            }
        }

        while let Ok(outcome) = self.optimize_rx.try_recv() {
            self.state.is_optimizing = false;
            match outcome {
                Ok(record) => {
                    self.history.record(record.clone());
                    self.state.status = match self.history.save(self.store.as_ref()).await {
                        Ok(()) => Some(format!(
                            "✅ Optimized: {} improvement(s), {:+}% length",
                            record.improvements.len(),
                            record.growth_percent()
                        )),
                        Err(e) => {
                            warn!("Could not save history: {}", e);
                            Some(format!("⚠️  Optimized, but history was not saved: {}", e))
                        }
                    };
                    self.state.selected_history = 0;
                    self.state.optimized = Some(record);
                    self.state.current_tab = TAB_OPTIMIZED;
                }
                Err(e) => self.state.status = Some(format!("❌ {}", e)),
            }
        }
    }

    fn schedule_analysis(&mut self) {
        if self.state.input_text.trim().is_empty() {
            self.debouncer.cancel();
            self.state.analysis = None;
            self.state.is_analyzing = false;
            return;
        }
        self.debouncer
            .schedule(self.state.input_text.clone(), self.state.intent);
        self.state.is_analyzing = true;
    }

    fn start_optimize(&mut self) {
        if self.state.input_text.trim().is_empty() {
            self.state.status = Some("⚠️  Please enter a prompt to optimize.".to_string());
            return;
        }
        if self.state.is_optimizing || self.gate.is_busy() {
            self.state.status = Some("⏳ An optimization is already running".to_string());
            return;
        }

        let gate = self.gate.clone();
        let analyzer = self.analyzer.clone();
        let text = self.state.input_text.clone();
        let options = self
            .config
            .optimize_options(Some(self.state.intent), None, Some(self.state.tone));
        let latency = self.config.optimize_latency();
        let tx = self.optimize_tx.clone();

        self.state.is_optimizing = true;
        self.state.status = Some("✨ Optimizing...".to_string());
        tokio::spawn(async move {
            let outcome = gate.run(&analyzer, &text, &options, latency).await;
            let _ = tx.send(outcome);
        });
    }

    fn set_input(&mut self, text: String, intent: Intent) {
        self.state.cursor_position = text.chars().count();
        self.state.input_text = text;
        self.state.intent = intent;
        self.state.current_tab = TAB_PROMPT;
        self.schedule_analysis();
    }

    fn byte_index(&self, char_position: usize) -> usize {
        self.state
            .input_text
            .char_indices()
            .nth(char_position)
            .map(|(index, _)| index)
            .unwrap_or(self.state.input_text.len())
    }

    async fn handle_normal_input(&mut self, key: KeyEvent) -> Result<bool> {
        match key.code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Char('h') => self.state.show_help = !self.state.show_help,
            KeyCode::Char('i') => {
                self.state.input_mode = InputMode::Editing;
                self.state.current_tab = TAB_PROMPT;
            }
            KeyCode::Char('o') => self.start_optimize(),
            KeyCode::Char('t') => {
                self.state.intent = self.state.intent.next();
                self.schedule_analysis();
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.state.tone = self.state.tone.saturating_add(TONE_STEP).min(MAX_TONE);
            }
            KeyCode::Char('-') => {
                self.state.tone = self.state.tone.saturating_sub(TONE_STEP);
            }
            KeyCode::Char('e') => {
                if let Some(record) = &self.state.optimized {
                    self.state.status = Some(match export_optimized(record, Path::new(".")).await {
                        Ok(path) => format!("📁 Exported to {}", path.display()),
                        Err(e) => format!("❌ Export failed: {}", e),
                    });
                }
            }
            KeyCode::Tab => {
                self.state.current_tab = (self.state.current_tab + 1) % TAB_TITLES.len();
            }
            KeyCode::Up => match self.state.current_tab {
                TAB_HISTORY => self.state.selected_history = self.state.selected_history.saturating_sub(1),
                TAB_TEMPLATES => self.state.selected_template = self.state.selected_template.saturating_sub(1),
                _ => {}
            },
            KeyCode::Down => match self.state.current_tab {
                TAB_HISTORY => {
                    if self.state.selected_history + 1 < self.history.len() {
                        self.state.selected_history += 1;
                    }
                }
                TAB_TEMPLATES => {
                    if self.state.selected_template + 1 < self.templates.len() {
                        self.state.selected_template += 1;
                    }
                }
                _ => {}
            },
            KeyCode::Enter => match self.state.current_tab {
                TAB_HISTORY => {
                    if let Some(record) = self.history.records().get(self.state.selected_history).cloned() {
                        self.state.tone = record.tone;
                        self.set_input(record.original_text.clone(), record.intent);
                        self.state.optimized = Some(record);
                    }
                }
                TAB_TEMPLATES => {
                    if let Some(entry) = self.templates.get(self.state.selected_template).cloned() {
                        self.set_input(entry.prompt, entry.intent);
                        self.state.status = Some(format!("📋 Loaded template: {}", entry.name));
                    }
                }
                _ => {}
            },
            _ => {}
        }
        Ok(false)
    }

    fn handle_editing_input(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => self.state.input_mode = InputMode::Normal,
            KeyCode::Char(c) => {
                let index = self.byte_index(self.state.cursor_position);
                self.state.input_text.insert(index, c);
                self.state.cursor_position += 1;
                self.schedule_analysis();
            }
            KeyCode::Enter => {
                let index = self.byte_index(self.state.cursor_position);
                self.state.input_text.insert(index, '\n');
                self.state.cursor_position += 1;
                self.schedule_analysis();
            }
            KeyCode::Backspace => {
                if self.state.cursor_position > 0 {
                    self.state.cursor_position -= 1;
                    let index = self.byte_index(self.state.cursor_position);
                    self.state.input_text.remove(index);
                    self.schedule_analysis();
                }
            }
            KeyCode::Left => {
                self.state.cursor_position = self.state.cursor_position.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.state.cursor_position < self.state.input_text.chars().count() {
                    self.state.cursor_position += 1;
                }
            }
            _ => {}
        }
        false
    }

    fn ui<B: Backend>(&self, f: &mut Frame<B>) {
        if self.state.show_help {
            self.render_help_popup(f);
            return;
        }

        let main_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)].as_ref())
            .split(f.size());

        self.render_header(f, main_layout[0]);
        self.render_main_content(f, main_layout[1]);
        self.render_footer(f, main_layout[2]);
    }

    fn render_header<B: Backend>(&self, f: &mut Frame<B>, area: Rect) {
        let title = Spans::from(vec![
            Span::styled(
                "🔎 PromptLens",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                "   Intent: {}  |  Tone: {} ({})  |  Optimized: {}",
                self.state.intent.label(),
                self.state.tone,
                ToneStyle::from_tone(self.state.tone).wording(),
                self.history.usage_count()
            )),
        ]);
        let header = Paragraph::new(title)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(header, area);
    }

    fn render_main_content<B: Backend>(&self, f: &mut Frame<B>, area: Rect) {
        let tabs = TAB_TITLES.iter().cloned().map(Spans::from).collect();

        let tabs_widget = Tabs::new(tabs)
            .block(Block::default().borders(Borders::ALL).title("Tabs"))
            .select(self.state.current_tab)
            .style(Style::default().fg(Color::White))
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

        let content_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)].as_ref())
            .split(area);

        f.render_widget(tabs_widget, content_layout[0]);

        match self.state.current_tab {
            0 => self.render_prompt_tab(f, content_layout[1]),
            1 => self.render_analysis_tab(f, content_layout[1]),
            2 => self.render_optimized_tab(f, content_layout[1]),
            3 => self.render_history_tab(f, content_layout[1]),
            4 => self.render_templates_tab(f, content_layout[1]),
            _ => {}
        }
    }

    fn render_prompt_tab<B: Backend>(&self, f: &mut Frame<B>, area: Rect) {
        let input_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
            .split(area);

        let input_style = match self.state.input_mode {
            InputMode::Editing => Style::default().fg(Color::Green),
            InputMode::Normal => Style::default().fg(Color::White),
        };

        let input_widget = Paragraph::new(self.state.input_text.as_str())
            .style(input_style)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Prompt (Press 'i' to edit, 'o' to optimize)"),
            )
            .wrap(Wrap { trim: false });
        f.render_widget(input_widget, input_layout[0]);

        match (&self.state.analysis, self.state.is_analyzing) {
            (_, true) => {
                let status = Paragraph::new("⏳ Analyzing...")
                    .style(Style::default().fg(Color::Yellow))
                    .alignment(Alignment::Center)
                    .block(Block::default().borders(Borders::ALL).title("Strength"));
                f.render_widget(status, input_layout[1]);
            }
            (Some(analysis), false) => {
                let gauge = Gauge::default()
                    .block(Block::default().borders(Borders::ALL).title("Strength"))
                    .gauge_style(Style::default().fg(score_color(analysis.strength_score)))
                    .label(format!(
                        "{}/10 · {} · ~{} tokens",
                        analysis.strength_score, analysis.category, analysis.token_estimate
                    ))
                    .ratio(f64::from(analysis.strength_score) / 10.0);
                f.render_widget(gauge, input_layout[1]);
            }
            (None, false) => {
                let status = Paragraph::new("Start typing to see a live analysis")
                    .style(Style::default().fg(Color::Gray))
                    .alignment(Alignment::Center)
                    .block(Block::default().borders(Borders::ALL).title("Strength"));
                f.render_widget(status, input_layout[1]);
            }
        }
    }

    fn render_analysis_tab<B: Backend>(&self, f: &mut Frame<B>, area: Rect) {
        let Some(analysis) = &self.state.analysis else {
            self.render_placeholder(f, area, "Analysis", "No analysis yet. Enter a prompt in the Prompt tab!");
            return;
        };

        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)].as_ref())
            .split(area);

        let score_line = |label: &str, score: u8| {
            Spans::from(vec![
                Span::raw(format!("{:<12}", label)),
                Span::styled(format!("{:>2}/10", score), Style::default().fg(score_color(score))),
            ])
        };
        let scores = vec![
            score_line("Strength", analysis.strength_score),
            score_line("Clarity", analysis.clarity_score),
            score_line("Specificity", analysis.specificity_score),
            score_line("Structure", analysis.structure_score),
            Spans::from(format!("{:<12}{:>3}/100", "Readability", analysis.readability_score)),
            Spans::from(""),
            Spans::from(format!("Category:   {} ({}%)", analysis.category, analysis.confidence)),
            Spans::from(format!("Tokens:     ~{}", analysis.token_estimate)),
            Spans::from(format!("Tier:       {}", analysis.tier())),
        ];
        let scores_widget = Paragraph::new(scores)
            .block(Block::default().borders(Borders::ALL).title("Scores"))
            .wrap(Wrap { trim: true });
        f.render_widget(scores_widget, layout[0]);

        let bold = Style::default().add_modifier(Modifier::BOLD);
        let mut details = vec![Spans::from(Span::styled("Detected:", bold))];
        for element in &analysis.detected_elements {
            details.push(Spans::from(Span::styled(format!("  ✓ {}", element), Style::default().fg(Color::Green))));
        }
        details.push(Spans::from(Span::styled("Missing:", bold)));
        for element in &analysis.missing_elements {
            details.push(Spans::from(Span::styled(format!("  ✗ {}", element), Style::default().fg(Color::Red))));
        }
        if !analysis.weaknesses.is_empty() {
            details.push(Spans::from(""));
            details.push(Spans::from(Span::styled("Weaknesses:", bold)));
            for weakness in &analysis.weaknesses {
                details.push(Spans::from(format!("• {}", weakness)));
            }
        }
        if !analysis.improvement_candidates.is_empty() {
            details.push(Spans::from(""));
            details.push(Spans::from(Span::styled("Suggestions:", bold)));
            for suggestion in &analysis.improvement_candidates {
                details.push(Spans::from(format!("• {}", suggestion)));
            }
        }

        let details_widget = Paragraph::new(details)
            .block(Block::default().borders(Borders::ALL).title("Elements"))
            .wrap(Wrap { trim: true });
        f.render_widget(details_widget, layout[1]);
    }

    fn render_optimized_tab<B: Backend>(&self, f: &mut Frame<B>, area: Rect) {
        let Some(record) = &self.state.optimized else {
            self.render_placeholder(f, area, "Optimized", "Nothing optimized yet. Press 'o' to optimize the current prompt!");
            return;
        };

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)].as_ref())
            .split(area);

        let optimized = Paragraph::new(record.optimized_text.as_str())
            .style(Style::default().fg(Color::Cyan))
            .block(Block::default().borders(Borders::ALL).title(format!(
                "✨ Optimized Prompt ({} tier, {} → {}) - 'e' to export",
                record.tier, record.strength_score, record.projected_score
            )))
            .wrap(Wrap { trim: false });
        f.render_widget(optimized, layout[0]);

        let mut items: Vec<ListItem> = record
            .improvements
            .iter()
            .map(|improvement| ListItem::new(format!("• {}", improvement)))
            .collect();
        items.push(ListItem::new(format!(
            "Characters: {} → {} ({:+}%)",
            record.character_counts.original,
            record.character_counts.optimized,
            record.growth_percent()
        )));
        let improvements = List::new(items).block(Block::default().borders(Borders::ALL).title("Improvements"));
        f.render_widget(improvements, layout[1]);
    }

    fn render_history_tab<B: Backend>(&self, f: &mut Frame<B>, area: Rect) {
        if self.history.is_empty() {
            self.render_placeholder(f, area, "History", "No optimizations yet.");
            return;
        }

        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)].as_ref())
            .split(area);

        let items: Vec<ListItem> = self
            .history
            .records()
            .iter()
            .map(|record| {
                let preview: String = record.original_text.chars().take(32).collect();
                ListItem::new(Spans::from(vec![
                    Span::styled(
                        record.timestamp.format("%m-%d %H:%M ").to_string(),
                        Style::default().fg(Color::Gray),
                    ),
                    Span::raw(preview.replace('\n', " ")),
                ]))
            })
            .collect();

        let mut list_state = ListState::default();
        list_state.select(Some(self.state.selected_history));

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(format!(
                "Recent ({}/{}) - Enter to load",
                self.history.len(),
                self.history.capacity()
            )))
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("▶ ");
        f.render_stateful_widget(list, layout[0], &mut list_state);

        if let Some(record) = self.history.records().get(self.state.selected_history) {
            let details = Paragraph::new(format!(
                "Intent: {}  Tone: {}  Tier: {}\nGrowth: {:+}%\n\n{}",
                record.intent.label(),
                record.tone,
                record.tier,
                record.growth_percent(),
                record.optimized_text
            ))
            .block(Block::default().borders(Borders::ALL).title("Details"))
            .wrap(Wrap { trim: false });
            f.render_widget(details, layout[1]);
        }
    }

    fn render_templates_tab<B: Backend>(&self, f: &mut Frame<B>, area: Rect) {
        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)].as_ref())
            .split(area);

        let items: Vec<ListItem> = self
            .templates
            .iter()
            .map(|entry| ListItem::new(entry.name.clone()))
            .collect();

        let mut list_state = ListState::default();
        list_state.select(Some(self.state.selected_template));

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Templates - Enter to load"))
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("▶ ");
        f.render_stateful_widget(list, layout[0], &mut list_state);

        if let Some(entry) = self.templates.get(self.state.selected_template) {
            let preview = Paragraph::new(format!("{}\n\n{}", entry.description, entry.prompt))
                .block(Block::default().borders(Borders::ALL).title("Preview"))
                .wrap(Wrap { trim: false });
            f.render_widget(preview, layout[1]);
        }
    }

    fn render_placeholder<B: Backend>(&self, f: &mut Frame<B>, area: Rect, title: &str, message: &str) {
        let widget = Paragraph::new(message)
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(title.to_string()));
        f.render_widget(widget, area);
    }

    fn render_footer<B: Backend>(&self, f: &mut Frame<B>, area: Rect) {
        let help_text = match (&self.state.status, self.state.input_mode) {
            (_, InputMode::Editing) => "Esc: Normal mode | Type to edit, analysis refreshes as you type".to_string(),
            (Some(status), InputMode::Normal) => status.clone(),
            (None, InputMode::Normal) => {
                "q: Quit | h: Help | i: Edit | o: Optimize | t: Intent | +/-: Tone | Tab: Switch tabs".to_string()
            }
        };

        let footer = Paragraph::new(help_text)
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(footer, area);
    }

    fn render_help_popup<B: Backend>(&self, f: &mut Frame<B>) {
        let popup_area = centered_rect(80, 60, f.size());

        f.render_widget(Clear, popup_area);

        let bold = Style::default().add_modifier(Modifier::BOLD);
        let help_text = vec![
            Spans::from(Span::styled(
                "PromptLens - Prompt Analyzer & Optimizer",
                bold.fg(Color::Cyan),
            )),
            Spans::from(""),
            Spans::from(Span::styled("Navigation:", bold)),
            Spans::from("q - Quit application"),
            Spans::from("h - Toggle this help"),
            Spans::from("Tab - Switch between tabs"),
            Spans::from("↑/↓ - Navigate lists, Enter - Load selection"),
            Spans::from(""),
            Spans::from(Span::styled("Editing:", bold)),
            Spans::from("i - Enter edit mode"),
            Spans::from("Esc - Exit edit mode"),
            Spans::from(""),
            Spans::from(Span::styled("Optimizing:", bold)),
            Spans::from("o - Optimize current prompt"),
            Spans::from("t - Cycle intent"),
            Spans::from("+/- - Adjust tone"),
            Spans::from("e - Export optimized prompt to a file"),
        ];

        let help_widget = Paragraph::new(help_text)
            .block(Block::default().borders(Borders::ALL).title("Help (Press 'h' to close)"))
            .wrap(Wrap { trim: true });

        f.render_widget(help_widget, popup_area);
    }
}

fn score_color(score: u8) -> Color {
    match score {
        8..=10 => Color::Green,
        5..=7 => Color::Yellow,
        _ => Color::Red,
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
