// src/tui.rs
use crate::animation::AnimationController;
use crate::commands::{CommandHandler, SITE_PLACEHOLDER};
use crate::config::Config;
use crate::error::{AppError, AppResult, TuiError};
use crate::feedback::{FeedbackEvent, FeedbackSink};
use crate::models::PasswordCollection;
use crate::stats::Dashboard;
use crate::store::SlotStorage;
use crate::strength::{self, MeterTier};

use arboard;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph, Wrap},
};
use std::io::{stdout, Stdout};
use std::time::{Duration, Instant};
use log;

const NUM_FORM_FIELDS: usize = 3; // Website, Username, Password
const VOICE_STATUS_DURATION: Duration = Duration::from_secs(2);
const VOICE_IDLE: &str = "Ready";
const BASE_KEYS: &str = "(q) Quit | (j/k) Nav | (a) Add | (s) Strength | (v) Verify | (x) Copy | (d) Del | (C) Clear all | (b/B) Bg on/off";

#[derive(PartialEq, Debug, Clone, Copy)]
pub enum InputMode {
    Normal,
    Adding,
    CheckingStrength,
    Verifying,
    ConfirmDelete { index: usize },
    ConfirmClear,
}

#[derive(Clone, Default, Debug)]
struct FormData {
    website: String,
    username: String,
    password: String,
}

#[derive(Clone, Default, Debug)]
struct VerifyForm {
    /// Index into the saved website list; `None` is the placeholder.
    site_index: Option<usize>,
    password: String,
}

pub fn copy_to_clipboard(content: &str) -> Result<(), TuiError> {
    let mut clipboard = arboard::Clipboard::new().map_err(|e| {
        log::error!("Error initializing clipboard: {}", e);
        TuiError::Clipboard(e.to_string())
    })?;
    clipboard.set_text(content.to_string()).map_err(|e| {
        log::error!("Error setting clipboard text: {}", e);
        TuiError::Clipboard(e.to_string())
    })
}

type ClipboardWriter = fn(&str) -> Result<(), TuiError>;

pub struct App<S: SlotStorage, F: FeedbackSink> {
    should_quit: bool,
    handler: CommandHandler<S, F>,
    collection: PasswordCollection,
    dashboard: Dashboard,
    selected_entry_index: Option<usize>,
    list_state: ListState,
    app_status: String,
    voice_status: String,
    voice_shown_at: Option<Instant>,
    clipboard: ClipboardWriter,
    input_mode: InputMode,
    editing_field_index: usize,
    form: FormData,
    strength_input: String,
    verify_form: VerifyForm,
    verify_result: Option<(bool, Instant)>,
    verify_result_timeout: Duration,
    animation: AnimationController,
}

impl<S: SlotStorage, F: FeedbackSink> App<S, F> {
    pub fn new(handler: CommandHandler<S, F>, config: &Config) -> Self {
        let collection = handler.snapshot();
        let dashboard = Dashboard::compute(&collection);
        let mut app = App {
            should_quit: false,
            handler,
            collection,
            dashboard,
            selected_entry_index: None,
            list_state: ListState::default(),
            app_status: String::new(),
            voice_status: VOICE_IDLE.to_string(),
            voice_shown_at: None,
            clipboard: copy_to_clipboard,
            input_mode: InputMode::Normal,
            editing_field_index: 0,
            form: FormData::default(),
            strength_input: String::new(),
            verify_form: VerifyForm::default(),
            verify_result: None,
            verify_result_timeout: config.verify_result_timeout(),
            animation: AnimationController::new(config.animation_interval()),
        };
        app.select_first_or_none();
        app.app_status = if app.collection.is_empty() {
            "Store empty.".to_string()
        } else {
            format!("Loaded {} entries.", app.collection.len())
        };
        app
    }

    /// Reloads the snapshot and dashboard after a mutation.
    fn refresh(&mut self) {
        self.collection = self.handler.snapshot();
        self.dashboard = Dashboard::compute(&self.collection);
        match self.selected_entry_index {
            _ if self.collection.is_empty() => {
                self.selected_entry_index = None;
            }
            Some(idx) if idx >= self.collection.len() => {
                self.selected_entry_index = Some(self.collection.len() - 1);
            }
            None => self.selected_entry_index = Some(0),
            Some(_) => {}
        }
        self.list_state.select(self.selected_entry_index);
    }

    fn select_first_or_none(&mut self) {
        self.selected_entry_index = if self.collection.is_empty() { None } else { Some(0) };
        self.list_state.select(self.selected_entry_index);
    }

    fn announce(&mut self, event: FeedbackEvent) {
        self.voice_status = event.phrase();
        self.voice_shown_at = Some(Instant::now());
    }

    /// Advances time-driven state: background colour, pulse, voice line and
    /// verify result expiry.
    pub fn tick(&mut self, now: Instant) {
        self.animation.tick(now);
        if let Some(shown_at) = self.voice_shown_at {
            if now.saturating_duration_since(shown_at) >= VOICE_STATUS_DURATION {
                self.voice_status = VOICE_IDLE.to_string();
                self.voice_shown_at = None;
            }
        }
        if let Some((_, shown_at)) = self.verify_result {
            if now.saturating_duration_since(shown_at) >= self.verify_result_timeout {
                self.verify_result = None;
            }
        }
    }

    pub fn on_key(&mut self, key_event: KeyEvent) {
        log::debug!("Key event received: {:?}", key_event);
        let key_code = key_event.code;

        match self.input_mode {
            InputMode::Normal => self.on_normal_key(key_code),
            InputMode::Adding => self.on_adding_key(key_code),
            InputMode::CheckingStrength => self.on_strength_key(key_code),
            InputMode::Verifying => self.on_verify_key(key_code),
            InputMode::ConfirmDelete { index } => {
                if key_code == KeyCode::Char('y') {
                    match self.handler.on_delete(index) {
                        Ok(true) => {
                            self.app_status = "Entry deleted.".to_string();
                            self.announce(FeedbackEvent::Deleted);
                        }
                        Ok(false) => self.app_status = "Nothing to delete.".to_string(),
                        Err(e) => self.report_error("delete", &e),
                    }
                    self.refresh();
                } else {
                    self.app_status = "Delete cancelled.".to_string();
                }
                self.input_mode = InputMode::Normal;
            }
            InputMode::ConfirmClear => {
                if key_code == KeyCode::Char('y') {
                    match self.handler.on_clear() {
                        Ok(()) => {
                            self.app_status = "All passwords cleared.".to_string();
                            self.announce(FeedbackEvent::Cleared);
                        }
                        Err(e) => self.report_error("clear", &e),
                    }
                    self.refresh();
                } else {
                    self.app_status = "Clear cancelled.".to_string();
                }
                self.input_mode = InputMode::Normal;
            }
        }
    }

    fn on_normal_key(&mut self, key_code: KeyCode) {
        match key_code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(-1),
            KeyCode::Char('a') => {
                self.form = FormData::default();
                self.editing_field_index = 0;
                self.input_mode = InputMode::Adding;
                self.app_status = "Adding new entry... (Esc to cancel)".to_string();
            }
            KeyCode::Char('s') => {
                self.strength_input.clear();
                self.input_mode = InputMode::CheckingStrength;
                self.app_status = "Type a password, Enter to check. (Esc to close)".to_string();
            }
            KeyCode::Char('v') => {
                if self.collection.is_empty() {
                    self.app_status = "No saved sites to verify.".to_string();
                    return;
                }
                self.verify_form = VerifyForm::default();
                self.input_mode = InputMode::Verifying;
                self.app_status = "Select a site with Left/Right, type the password, Enter to verify.".to_string();
            }
            KeyCode::Char('d') => match self.selected_entry_index {
                Some(index) => {
                    self.input_mode = InputMode::ConfirmDelete { index };
                    self.app_status = "Delete this password? (y/n)".to_string();
                }
                None => self.app_status = "No entry selected to delete.".to_string(),
            },
            KeyCode::Char('C') => {
                if self.collection.is_empty() {
                    self.app_status = "Nothing to clear.".to_string();
                } else {
                    self.input_mode = InputMode::ConfirmClear;
                    self.app_status = "Clear all saved passwords? (y/n)".to_string();
                }
            }
            KeyCode::Char('x') => match self.selected_entry_index {
                Some(index) => match self.handler.on_copy(index, self.clipboard) {
                    Ok(true) => {
                        self.app_status = "Password copied to clipboard!".to_string();
                        self.announce(FeedbackEvent::Copied);
                    }
                    Ok(false) => self.app_status = "No entry selected to copy password.".to_string(),
                    Err(e) => self.app_status = format!("Error copying password: {}", e),
                },
                None => self.app_status = "No entry selected to copy password.".to_string(),
            },
            KeyCode::Char('b') => {
                self.animation.start(Instant::now());
                self.app_status = "Background animation started.".to_string();
            }
            KeyCode::Char('B') => {
                self.animation.stop();
                self.app_status = "Background animation stopped.".to_string();
            }
            _ => {}
        }
    }

    fn current_field_mut(&mut self) -> &mut String {
        match self.editing_field_index {
            0 => &mut self.form.website,
            1 => &mut self.form.username,
            _ => &mut self.form.password,
        }
    }

    fn on_adding_key(&mut self, key_code: KeyCode) {
        match key_code {
            KeyCode::Char(c) => self.current_field_mut().push(c),
            KeyCode::Backspace => {
                self.current_field_mut().pop();
            }
            KeyCode::Tab => {
                self.editing_field_index = (self.editing_field_index + 1) % NUM_FORM_FIELDS;
            }
            KeyCode::BackTab => {
                self.editing_field_index = (self.editing_field_index + NUM_FORM_FIELDS - 1) % NUM_FORM_FIELDS;
            }
            KeyCode::Enter if self.editing_field_index < NUM_FORM_FIELDS - 1 => {
                self.editing_field_index += 1;
            }
            KeyCode::Enter => {
                let form = self.form.clone();
                match self.handler.on_save(&form.website, &form.username, &form.password) {
                    Ok(record) => {
                        self.app_status = format!("Entry for '{}' added.", record.website);
                        self.announce(FeedbackEvent::Saved);
                        self.form = FormData::default();
                        self.input_mode = InputMode::Normal;
                        self.refresh();
                        self.selected_entry_index = self.collection.len().checked_sub(1);
                        self.list_state.select(self.selected_entry_index);
                    }
                    Err(AppError::Validation(e)) => {
                        self.app_status = format!("Please fill all fields: {}. (Esc to cancel)", e);
                        self.editing_field_index = if form.website.trim().is_empty() {
                            0
                        } else if form.username.trim().is_empty() {
                            1
                        } else {
                            2
                        };
                    }
                    Err(e) => {
                        self.report_error("save", &e);
                        self.input_mode = InputMode::Normal;
                    }
                }
            }
            KeyCode::Esc => {
                self.form = FormData::default();
                self.input_mode = InputMode::Normal;
                self.app_status = "Add new entry cancelled.".to_string();
            }
            _ => {}
        }
    }

    fn on_strength_key(&mut self, key_code: KeyCode) {
        match key_code {
            KeyCode::Char(c) => self.strength_input.push(c),
            KeyCode::Backspace => {
                self.strength_input.pop();
            }
            KeyCode::Enter => {
                let score = self.handler.on_check_strength(&self.strength_input);
                self.animation.pulse(strength::meter_tier(score), Instant::now());
                self.app_status = format!("Password strength is {}/100 ({}).", score, strength::classify(score));
                self.announce(FeedbackEvent::StrengthChecked(score));
            }
            KeyCode::Esc => {
                self.strength_input.clear();
                self.input_mode = InputMode::Normal;
                self.app_status = String::new();
            }
            _ => {}
        }
    }

    fn selected_site(&self) -> Option<&str> {
        self.verify_form
            .site_index
            .and_then(|i| self.collection.get(i))
            .map(|r| r.website.as_str())
    }

    fn cycle_site(&mut self, forward: bool) {
        let len = self.collection.len();
        if len == 0 {
            self.verify_form.site_index = None;
            return;
        }
        // positions 0..=len, where 0 is the placeholder
        let pos = self.verify_form.site_index.map_or(0, |i| i + 1);
        let next = if forward { (pos + 1) % (len + 1) } else { (pos + len) % (len + 1) };
        self.verify_form.site_index = next.checked_sub(1);
    }

    fn on_verify_key(&mut self, key_code: KeyCode) {
        match key_code {
            KeyCode::Left | KeyCode::Up => self.cycle_site(false),
            KeyCode::Right | KeyCode::Down => self.cycle_site(true),
            KeyCode::Char(c) => self.verify_form.password.push(c),
            KeyCode::Backspace => {
                self.verify_form.password.pop();
            }
            KeyCode::Enter => {
                let site = self.selected_site().map(str::to_string);
                match self.handler.on_verify(site.as_deref(), &self.verify_form.password) {
                    Ok(matched) => {
                        self.verify_result = Some((matched, Instant::now()));
                        self.announce(if matched { FeedbackEvent::Verified } else { FeedbackEvent::Incorrect });
                        self.verify_form.password.clear();
                    }
                    Err(AppError::Validation(e)) => self.app_status = format!("{}.", e),
                    Err(e) => self.report_error("verify", &e),
                }
            }
            KeyCode::Esc => {
                self.verify_form = VerifyForm::default();
                self.input_mode = InputMode::Normal;
                self.app_status = String::new();
            }
            _ => {}
        }
    }

    fn report_error(&mut self, action: &str, e: &AppError) {
        log::error!("Failed to {}: {}", action, e);
        self.app_status = format!("Failed to {}: {}", action, e);
    }

    fn move_selection(&mut self, delta: i32) {
        if self.collection.is_empty() {
            self.selected_entry_index = None;
            self.list_state.select(None);
            return;
        }
        let current_index = self.selected_entry_index.unwrap_or(0) as i32;
        let last = self.collection.len() as i32 - 1;
        let new_index = (current_index + delta).clamp(0, last);
        self.selected_entry_index = Some(new_index as usize);
        self.list_state.select(self.selected_entry_index);
    }
}

pub fn run_tui<S: SlotStorage, F: FeedbackSink>(handler: CommandHandler<S, F>, config: &Config) -> AppResult<()> {
    log::info!("Initializing TUI...");
    enable_raw_mode().map_err(|e| { log::error!("Failed to enable raw mode: {}", e); TuiError::Io(e) })?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .map_err(|e| { log::error!("Failed to setup terminal screen: {}", e); TuiError::Io(e) })?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| { log::error!("Failed to create terminal: {}", e); TuiError::Io(e) })?;

    let mut app = App::new(handler, config);

    log::info!("Starting TUI application loop.");
    let res = run_app_loop(&mut terminal, &mut app);
    log::info!("TUI application loop finished.");

    disable_raw_mode().map_err(|e| { log::error!("Failed to disable raw mode: {}", e); TuiError::Io(e) })?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)
        .map_err(|e| { log::error!("Failed to restore terminal screen: {}", e); TuiError::Io(e) })?;

    res?;
    log::info!("TUI shutdown complete.");
    Ok(())
}

fn run_app_loop<S: SlotStorage, F: FeedbackSink>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<S, F>,
) -> Result<(), TuiError> {
    while !app.should_quit {
        app.tick(Instant::now());
        terminal.draw(|f| ui(f, app)).map_err(|e| { log::error!("Terminal draw error: {}", e); TuiError::Io(e) })?;

        if event::poll(Duration::from_millis(100)).map_err(|e| { log::error!("Event poll error: {}", e); TuiError::Io(e) })? {
            if let Event::Key(key_event) = event::read().map_err(|e| { log::error!("Event read error: {}", e); TuiError::Io(e) })? {
                if key_event.kind == KeyEventKind::Press {
                    app.on_key(key_event);
                }
            }
        }
    }
    Ok(())
}

fn tier_color(tier: MeterTier) -> Color {
    match tier {
        MeterTier::Low => Color::Rgb(0xff, 0x47, 0x57),
        MeterTier::Medium => Color::Rgb(0xff, 0xa5, 0x02),
        MeterTier::High => Color::Rgb(0x2e, 0xd5, 0x73),
    }
}

fn strength_gauge<'a>(title: &'a str, password: &str) -> Gauge<'a> {
    let score = strength::score(password);
    Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .gauge_style(Style::default().fg(tier_color(strength::meter_tier(score))))
        .percent(u16::from(score))
        .label(format!("{}/100", score))
}

fn draw_main_ui<S: SlotStorage, F: FeedbackSink>(f: &mut Frame, app: &mut App<S, F>) {
    let now = Instant::now();
    let ((r1, g1, b1), (r2, g2, b2)) = app.animation.colors();
    let border_color = match app.animation.active_pulse(now) {
        Some(tier) => tier_color(tier),
        None => Color::Rgb(r2, g2, b2),
    };
    let background = Block::default().style(Style::default().bg(Color::Rgb(r1, g1, b1)));
    f.render_widget(background, f.size());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(f.size());

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)].as_ref())
        .split(chunks[0]);

    let list_area = main_chunks[0];
    let dashboard_area = main_chunks[1];
    let status_bar_area = chunks[1];

    // Entry list
    let entries_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!("Saved Passwords ({})", app.collection.len()));
    if app.collection.is_empty() {
        let text = Paragraph::new("No passwords saved.")
            .block(entries_block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(text, list_area);
    } else {
        let list_items: Vec<ListItem> = app
            .collection
            .iter()
            .map(|record| {
                let score = strength::score(&record.password);
                let label_style = Style::default().fg(tier_color(strength::meter_tier(score))).bold();
                ListItem::new(Line::from(vec![
                    Span::styled(record.website.clone(), Style::default().bold()),
                    Span::raw(format!("  {}  ", record.username)),
                    Span::styled(format!("{} • {}", strength::classify(score), score), label_style),
                ]))
            })
            .collect();
        let list = List::new(list_items)
            .block(entries_block)
            .highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::Gray))
            .highlight_symbol("> ");
        f.render_stateful_widget(list, list_area, &mut app.list_state);
    }

    // Dashboard
    let stats = &app.dashboard.stats;
    let dashboard_text = vec![
        Line::from(vec![Span::styled("Total passwords: ", Style::default().bold()), Span::raw(stats.total.to_string())]),
        Line::from(vec![Span::styled("Weak passwords: ", Style::default().bold()), Span::raw(stats.weak_count.to_string())]),
        Line::from(vec![Span::styled("Strong passwords: ", Style::default().bold()), Span::raw(stats.strong_count().to_string())]),
        Line::from(vec![Span::styled("Average score: ", Style::default().bold()), Span::raw(app.dashboard.average_label())]),
        Line::from(vec![Span::styled("Last check: ", Style::default().bold()), Span::raw(app.dashboard.last_check_label())]),
        Line::from(""),
        Line::from(vec![Span::styled("Voice: ", Style::default().bold()), Span::raw(app.voice_status.clone())]),
        Line::from(vec![
            Span::styled("Background: ", Style::default().bold()),
            Span::raw(if app.animation.is_running() { "cycling" } else { "still" }),
        ]),
    ];
    let dashboard = Paragraph::new(dashboard_text)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(border_color)).title("Dashboard"))
        .wrap(Wrap { trim: true });
    f.render_widget(dashboard, dashboard_area);

    // Status bar
    let status_text = if app.input_mode == InputMode::Normal {
        format!("{} | {}", app.app_status, BASE_KEYS)
    } else {
        app.app_status.clone()
    };
    let status_paragraph = Paragraph::new(status_text).block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(status_paragraph, status_bar_area);
}

fn draw_add_form<S: SlotStorage, F: FeedbackSink>(f: &mut Frame, app: &App<S, F>) {
    let form_area = centered_rect(60, 40, f.size());
    f.render_widget(Clear, form_area);
    f.render_widget(Block::default().title("Add New Password").borders(Borders::ALL), form_area);

    let form_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ].as_ref())
        .split(form_area);

    let field_labels = ["Website:", "Username:", "Password:"];
    for (i, label) in field_labels.iter().enumerate() {
        let value = match i {
            0 => app.form.website.clone(),
            1 => app.form.username.clone(),
            _ => "*".repeat(app.form.password.chars().count()),
        };
        let text = if app.editing_field_index == i { format!("{}▋", value) } else { value };
        let paragraph = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title(*label))
            .style(if app.editing_field_index == i { Style::default().fg(Color::Yellow) } else { Style::default() });
        f.render_widget(paragraph, form_chunks[i]);
    }
    f.render_widget(strength_gauge("Strength", &app.form.password), form_chunks[NUM_FORM_FIELDS]);

    let help = Paragraph::new("(Tab) Next | (Enter) Next/Save | (Esc) Cancel").alignment(Alignment::Center);
    f.render_widget(help, form_chunks[NUM_FORM_FIELDS + 2]);
}

fn draw_strength_form<S: SlotStorage, F: FeedbackSink>(f: &mut Frame, app: &App<S, F>) {
    let area = centered_rect(50, 25, f.size());
    f.render_widget(Clear, area);
    f.render_widget(Block::default().title("Password Strength").borders(Borders::ALL), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(0)].as_ref())
        .split(area);
    let input = Paragraph::new(format!("{}▋", "*".repeat(app.strength_input.chars().count())))
        .block(Block::default().borders(Borders::ALL).title("Password:"))
        .style(Style::default().fg(Color::Yellow));
    f.render_widget(input, chunks[0]);
    f.render_widget(strength_gauge("Score", &app.strength_input), chunks[1]);
}

fn draw_verify_form<S: SlotStorage, F: FeedbackSink>(f: &mut Frame, app: &App<S, F>) {
    let area = centered_rect(50, 30, f.size());
    f.render_widget(Clear, area);
    f.render_widget(Block::default().title("Verify Password").borders(Borders::ALL), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Length(1), Constraint::Min(0)].as_ref())
        .split(area);

    let site = app.selected_site().unwrap_or(SITE_PLACEHOLDER);
    let selector = Paragraph::new(format!("< {} >", site))
        .block(Block::default().borders(Borders::ALL).title("Site:"))
        .alignment(Alignment::Center);
    f.render_widget(selector, chunks[0]);

    let input = Paragraph::new(format!("{}▋", "*".repeat(app.verify_form.password.chars().count())))
        .block(Block::default().borders(Borders::ALL).title("Password:"))
        .style(Style::default().fg(Color::Yellow));
    f.render_widget(input, chunks[1]);

    let result = match app.verify_result {
        Some((true, _)) => Span::styled("✅ Password Verified", Style::default().fg(tier_color(MeterTier::High))),
        Some((false, _)) => Span::styled("❌ Incorrect Password", Style::default().fg(tier_color(MeterTier::Low))),
        None => Span::raw(""),
    };
    f.render_widget(Paragraph::new(Line::from(result)).alignment(Alignment::Center), chunks[2]);
}

/// Renders the UI widgets based on the application mode.
fn ui<S: SlotStorage, F: FeedbackSink>(f: &mut Frame, app: &mut App<S, F>) {
    draw_main_ui(f, app);
    match app.input_mode {
        InputMode::Adding => draw_add_form(f, app),
        InputMode::CheckingStrength => draw_strength_form(f, app),
        InputMode::Verifying => draw_verify_form(f, app),
        InputMode::Normal | InputMode::ConfirmDelete { .. } | InputMode::ConfirmClear => {}
    }
}

/// Helper to create a centered rect for popups.
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
