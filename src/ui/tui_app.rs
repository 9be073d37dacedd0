use crate::api_client::{name_or_default, ApiClient, GreetingSource, HelloResponse};
use crate::config::config::Config;
use crate::history::RequestHistory;
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::time::Instant;
use tui_input::{backend::crossterm::EventHandler, Input};

/// Result of the last greet call, as shown in the output region.
#[derive(Debug, Clone, PartialEq)]
pub enum CallOutcome {
    Success(HelloResponse),
    Failure(String),
}

pub struct HelloApp {
    source: Box<dyn GreetingSource>,
    config: Config,
    input: Input,
    outcome: Option<CallOutcome>,
    status_message: String,
    show_help: bool,
    history: RequestHistory,
    recall_offset: usize,
    should_quit: bool,
}

impl HelloApp {
    pub fn new(source: Box<dyn GreetingSource>, config: Config, history: RequestHistory) -> Self {
        Self {
            source,
            config,
            input: Input::default(),
            outcome: None,
            status_message: "Ready - type a name and press Enter".to_string(),
            show_help: false,
            history,
            recall_offset: 0,
            should_quit: false,
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            terminal.draw(|f| self.ui(f))?;

            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
            if self.should_quit {
                break;
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Esc => {
                if self.show_help {
                    self.show_help = false;
                } else {
                    self.should_quit = true;
                }
            }
            KeyCode::F(1) => {
                self.show_help = !self.show_help;
            }
            KeyCode::Enter => self.call_api(),
            KeyCode::Up => self.recall_previous(),
            KeyCode::Down => self.recall_next(),
            _ => {
                self.recall_offset = 0;
                self.input.handle_event(&Event::Key(key));
            }
        }
    }

    /// The one operation: read the input, call the server, overwrite the
    /// output region with whichever branch resulted. Failures stop here.
    pub fn call_api(&mut self) {
        let name = name_or_default(self.input.value(), &self.config.behavior.default_name);
        tracing::info!(target: "api", "requesting greeting for {:?}", name);
        self.status_message = format!(
            "{} Requesting greeting for {}...",
            self.config.display.icons.api, name
        );

        let started = Instant::now();
        let result = self.source.greet(&name);
        let elapsed = started.elapsed().as_millis() as u64;

        match result {
            Ok(response) => {
                self.status_message = format!(
                    "{} Greeting received ({} ms)",
                    self.config.display.icons.success, elapsed
                );
                self.outcome = Some(CallOutcome::Success(response));
                self.record(name, true, elapsed);
            }
            Err(e) => {
                tracing::warn!(target: "api", "greet failed: {:#}", e);
                self.status_message =
                    format!("{} Request failed", self.config.display.icons.error);
                self.outcome = Some(CallOutcome::Failure(format!("{:#}", e)));
                self.record(name, false, elapsed);
            }
        }
        self.recall_offset = 0;
    }

    fn record(&mut self, name: String, success: bool, duration_ms: u64) {
        if !self.config.behavior.enable_history {
            return;
        }
        if let Err(e) = self.history.add_entry(name, success, Some(duration_ms)) {
            tracing::warn!(target: "history", "failed to save history: {}", e);
        }
    }

    fn recall_previous(&mut self) {
        if self.recall_offset < self.history.len() {
            self.recall_offset += 1;
            self.set_input_from_recall();
        }
    }

    fn recall_next(&mut self) {
        if self.recall_offset > 1 {
            self.recall_offset -= 1;
            self.set_input_from_recall();
        } else if self.recall_offset == 1 {
            self.recall_offset = 0;
            self.input = Input::default();
        }
    }

    fn set_input_from_recall(&mut self) {
        if let Some(name) = self.history.recall(self.recall_offset) {
            self.input = Input::from(name.to_string());
        }
    }

    pub fn outcome(&self) -> Option<&CallOutcome> {
        self.outcome.as_ref()
    }

    /// Text of the output region; message and status are embedded verbatim.
    pub fn outcome_text(&self) -> String {
        match &self.outcome {
            Some(CallOutcome::Success(response)) => {
                format!(
                    "Response:\n{}\nStatus: {}",
                    response.message, response.status
                )
            }
            Some(CallOutcome::Failure(description)) => format!("Error: {}", description),
            None => String::new(),
        }
    }

    pub fn outcome_color(&self) -> Color {
        match &self.outcome {
            Some(CallOutcome::Success(_)) => color_from_name(&self.config.theme.success_color),
            Some(CallOutcome::Failure(_)) => color_from_name(&self.config.theme.error_color),
            None => Color::Gray,
        }
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn input_value(&self) -> &str {
        self.input.value()
    }

    fn ui(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // name input
                Constraint::Min(5),    // response area
                Constraint::Length(1), // status bar
            ])
            .split(f.area());

        let input_paragraph = Paragraph::new(self.input.value())
            .block(Block::default().borders(Borders::ALL).title("Name"))
            .style(Style::default().fg(Color::Yellow));
        f.render_widget(input_paragraph, chunks[0]);
        f.set_cursor_position((
            chunks[0].x + self.input.visual_cursor() as u16 + 1,
            chunks[0].y + 1,
        ));

        if self.outcome.is_some() {
            let text: Vec<Line> = self
                .outcome_text()
                .lines()
                .map(|l| Line::from(l.to_string()))
                .collect();
            let response = Paragraph::new(text)
                .style(Style::default().fg(self.outcome_color()))
                .block(Block::default().borders(Borders::ALL).title("Response"))
                .wrap(Wrap { trim: true });
            f.render_widget(response, chunks[1]);
        } else {
            let placeholder = vec![
                Line::from("Type a name above and press Enter to greet it"),
                Line::from(""),
                Line::from(format!(
                    "An empty input sends \"{}\"",
                    self.config.behavior.default_name
                )),
                Line::from(""),
                Line::from("Controls:"),
                Line::from("  Enter   - Call the API"),
                Line::from("  Up/Down - Recall previous names"),
                Line::from("  F1      - Toggle help"),
                Line::from("  Esc     - Exit"),
            ];
            let placeholder = Paragraph::new(placeholder)
                .block(Block::default().borders(Borders::ALL).title("Response"))
                .wrap(Wrap { trim: true });
            f.render_widget(placeholder, chunks[1]);
        }

        let status_line = Line::from(vec![
            Span::styled(&self.status_message, Style::default().fg(Color::White)),
            Span::raw(" | F1=Help | Esc=Exit"),
        ]);
        let status = Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray));
        f.render_widget(status, chunks[2]);

        if self.show_help {
            self.render_help_popup(f);
        }
    }

    fn render_help_popup(&self, f: &mut Frame) {
        let area = centered_rect(60, 50, f.area());
        f.render_widget(Clear, area);

        let help_text = vec![
            Line::from(vec![Span::styled(
                "Hello CLI Help",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from("  Enter     - Send the name to the server"),
            Line::from("  Up/Down   - Recall previous names"),
            Line::from("  F1        - Toggle this help"),
            Line::from("  Esc       - Close help / exit"),
            Line::from(""),
            Line::from("The server answers GET /api/hello?name=<value>"),
            Line::from("with a JSON greeting and a status."),
        ];

        let help_popup = Paragraph::new(help_text)
            .block(Block::default().borders(Borders::ALL).title("Help"))
            .wrap(Wrap { trim: true });

        f.render_widget(help_popup, area);
    }
}

/// Map a configured color name onto a terminal color.
pub fn color_from_name(name: &str) -> Color {
    match name.to_ascii_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        _ => Color::White,
    }
}

// Helper function to create a centered rect
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

pub fn run_tui_app(config: Config, api_url: &str) -> Result<()> {
    let history = RequestHistory::new(config.behavior.max_history_entries)?;
    let source = Box::new(ApiClient::new(api_url));
    let mut app = HelloApp::new(source, config, history);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}
