//! TUI (Terminal User Interface) viewer for solver sessions
//!
//! Replays each session on a Ratatui board, one attempt per key press.
//!
//! # State Machine
//! - `Stepping` → (key) → `Stepping` ... → `GameOver` → (N) → next session
//! - `Q`/`Esc` switches to `FastForward`: the remaining attempts are drawn
//!   without pausing and no further sessions are started.

use crate::cli::describe_selection;
use crate::config::{DisplayMode, PresentationConfig};
use crate::feedback::LetterStatus;
use crate::session::{Anomaly, AttemptReport, Outcome, SessionInterface, SessionStart};
use crate::word::Word;
use crate::{WORD_LENGTH, debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const MAX_CANDIDATES_DISPLAY: usize = 10;
const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ROW_SPACING: u16 = 2;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

fn status_colors(status: LetterStatus) -> (Color, Color) {
    match status {
        LetterStatus::Correct => (Color::Green, Color::Black),
        LetterStatus::Present => (Color::Yellow, Color::Black),
        LetterStatus::Absent => (Color::Gray, Color::White),
    }
}

fn status_symbol(status: LetterStatus) -> &'static str {
    match status {
        LetterStatus::Correct => "🟩",
        LetterStatus::Present => "🟨",
        LetterStatus::Absent => "⬜",
    }
}

#[derive(Debug)]
struct GuessRow {
    letters: [char; WORD_LENGTH],
    states: [LetterStatus; WORD_LENGTH],
    note: String,
}

impl GuessRow {
    fn from_report(report: &AttemptReport) -> Self {
        let mut letters = [' '; WORD_LENGTH];
        for (position, letter, _) in report.feedback.iter() {
            letters[position] = char::from(letter).to_ascii_uppercase();
        }
        Self {
            letters,
            states: *report.feedback.statuses(),
            note: format!(
                "{} → {} left",
                describe_selection(&report.selection),
                report.remaining
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiState {
    Stepping,
    FastForward,
    /// Session ended - message stored in interface.message
    GameOver,
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    rows: &'a [GuessRow],
    max_attempts: usize,
    mode: DisplayMode,
    state: TuiState,
    remaining: &'a [Word],
    remaining_count: Option<usize>,
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
}

/// Full-screen session viewer.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    config: PresentationConfig,
    rows: Vec<GuessRow>,
    max_attempts: usize,
    state: TuiState,
    remaining: Vec<Word>,
    remaining_count: Option<usize>,
    message: String,
    error_message: String,
    status: String,
    games_started: usize,
    quit: bool,
}

impl TuiInterface {
    pub fn new(config: PresentationConfig) -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal backend created");

        Ok(Self {
            terminal,
            config,
            rows: Vec::new(),
            max_attempts: 0,
            state: TuiState::Stepping,
            remaining: Vec::new(),
            remaining_count: None,
            message: String::new(),
            error_message: String::new(),
            status: "Ready to start".to_string(),
            games_started: 0,
            quit: false,
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            rows: &self.rows,
            max_attempts: self.max_attempts,
            mode: self.config.mode,
            state: self.state,
            remaining: &self.remaining,
            remaining_count: self.remaining_count,
            message: &self.message,
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    /// Log and handle draw errors appropriately
    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            log::warn!("Draw error: {e}");
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Title
                Constraint::Length(14), // Board
                Constraint::Min(6),     // Info panel
                Constraint::Length(3),  // Status line
                Constraint::Length(3),  // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        Self::render_board(f, chunks[1], ctx);
        Self::render_info(f, chunks[2], ctx);
        Self::render_status(f, chunks[3], ctx.status);
        Self::render_instructions(f, chunks[4], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("TERMO SOLVER")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_board(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let block = Block::default()
            .title(format!("Attempts ({}/{})", ctx.rows.len(), ctx.max_attempts))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        f.render_widget(block, area);

        // Keep the most recent rows when the board is too short
        let available_rows = (inner.height / ROW_SPACING) as usize;
        let skip_count = ctx.rows.len().saturating_sub(available_rows);
        for (display_index, row) in ctx.rows.iter().skip(skip_count).enumerate() {
            Self::render_guess_row(f, row, display_index, inner, ctx.mode);
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_guess_row(f: &mut Frame, row: &GuessRow, row_index: usize, area: Rect, mode: DisplayMode) {
        let y = area.y + (row_index as u16 * ROW_SPACING);
        if y >= area.y + area.height {
            return;
        }

        let mut spans = vec![Span::raw("  ")];
        for i in 0..WORD_LENGTH {
            let letter = row.letters[i];
            match mode {
                DisplayMode::Colors => {
                    let (bg_color, fg_color) = status_colors(row.states[i]);
                    spans.push(Span::styled(
                        format!(" {letter} "),
                        Style::default().fg(fg_color).bg(bg_color),
                    ));
                }
                DisplayMode::Symbols => {
                    spans.push(Span::raw(format!("{}{letter}", status_symbol(row.states[i]))));
                }
            }
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(format!("  {}", row.note), MESSAGE_STYLE));

        let paragraph = Paragraph::new(Line::from(spans));
        f.render_widget(
            paragraph,
            Rect {
                x: area.x,
                y,
                width: area.width,
                height: 1,
            },
        );
    }

    fn render_info(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = Vec::new();

        if let Some(count) = ctx.remaining_count {
            lines.push(Line::from(vec![Span::styled(
                format!("Possible words remaining: {count}"),
                INFO_STYLE,
            )]));
        }

        if !ctx.remaining.is_empty() {
            for word in ctx.remaining.iter().take(MAX_CANDIDATES_DISPLAY) {
                lines.push(Line::from(format!("  {}", word.to_uppercase())));
            }
            if ctx.remaining.len() > MAX_CANDIDATES_DISPLAY {
                lines.push(Line::from(format!(
                    "  ... and {} more",
                    ctx.remaining.len() - MAX_CANDIDATES_DISPLAY
                )));
            }
        }
        lines.push(Line::from(""));

        if !ctx.message.is_empty() {
            let style = if ctx.state == TuiState::GameOver {
                SUCCESS_STYLE
            } else {
                MESSAGE_STYLE
            };
            lines.push(Line::from(vec![Span::styled(ctx.message, style)]));
        }

        if !ctx.error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.error_message, ERROR_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
        let text = match state {
            TuiState::Stepping => "Any key: Next attempt | Q/ESC: Finish without pausing",
            TuiState::FastForward => "Finishing...",
            TuiState::GameOver => "N/ENTER: Next game | Q/ESC: Quit",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    /// Block until a key press arrives.
    fn read_key() -> Result<KeyEvent, io::Error> {
        loop {
            if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
                continue;
            }
            match event::read()? {
                Event::Key(key) if key.kind == event::KeyEventKind::Press => return Ok(key),
                _other => {
                    debug_log!("read_key() - Ignoring event: {:?}", _other);
                }
            }
        }
    }

    fn is_quit_key(key: &KeyEvent) -> bool {
        matches!(
            key.code,
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q')
        )
    }

    fn wait_for_step(&mut self) {
        if self.state != TuiState::Stepping {
            return;
        }
        match Self::read_key() {
            Ok(key) if Self::is_quit_key(&key) => {
                info_log!("wait_for_step() - Quit requested, fast-forwarding");
                self.quit = true;
                self.state = TuiState::FastForward;
            }
            Ok(_) => {}
            Err(e) => {
                log::warn!("Input error: {e}");
                self.quit = true;
                self.state = TuiState::FastForward;
            }
        }
    }

    fn wait_for_next_game(&mut self) {
        if self.quit {
            return;
        }
        loop {
            match Self::read_key() {
                Ok(key) if Self::is_quit_key(&key) => {
                    self.quit = true;
                    return;
                }
                Ok(key) if matches!(key.code, KeyCode::Enter | KeyCode::Char('n' | 'N')) => {
                    return;
                }
                Ok(_key) => {
                    debug_log!("wait_for_next_game() - Ignoring key: {:?}", _key.code);
                }
                Err(e) => {
                    log::warn!("Input error: {e}");
                    self.quit = true;
                    return;
                }
            }
        }
    }
}

impl SessionInterface for TuiInterface {
    fn session_started(&mut self, start: &SessionStart) {
        self.games_started += 1;
        self.rows.clear();
        self.remaining.clear();
        self.remaining_count = Some(start.corpus_size);
        self.max_attempts = start.max_attempts;
        self.error_message.clear();
        self.state = TuiState::Stepping;
        self.message = if self.config.show_secret {
            format!("Secret word: {}", start.secret.to_uppercase())
        } else {
            format!(
                "Openers: {} {} | tie-break: {}",
                start.openers[0].to_uppercase(),
                start.openers[1].to_uppercase(),
                start.strategy
            )
        };
        self.status = format!(
            "Game {} - {} words loaded",
            self.games_started, start.corpus_size
        );
        self.draw_or_log();
        self.wait_for_step();
    }

    fn attempt_made(&mut self, report: &AttemptReport) {
        self.rows.push(GuessRow::from_report(report));
        self.remaining_count = Some(report.remaining);
        self.status = format!(
            "Game {} - attempt {} of {}: {}",
            self.games_started,
            report.attempt,
            self.max_attempts,
            report.feedback.pattern()
        );
        self.draw_or_log();
        if !report.feedback.is_solved() && report.attempt < self.max_attempts {
            self.wait_for_step();
        }
    }

    fn anomaly(&mut self, anomaly: &Anomaly) {
        let Anomaly::EmptyCandidateSet { attempt, fallback } = anomaly;
        self.error_message = format!(
            "No candidates remain at attempt {attempt}; falling back to {}. Check the secret word.",
            fallback.to_uppercase()
        );
    }

    fn session_finished(&mut self, outcome: &Outcome, secret: &Word) {
        self.state = TuiState::GameOver;
        match outcome {
            Outcome::Solved { attempts } => {
                self.message = format!("✓ Solved {} in {attempts} attempts", secret.to_uppercase());
                self.status = format!("Game {} - Solved", self.games_started);
            }
            Outcome::Exhausted { remaining } => {
                self.message = format!("Out of attempts. The secret was {}", secret.to_uppercase());
                self.status = format!("Game {} - Attempts exhausted", self.games_started);
                self.remaining.clone_from(remaining);
            }
        }
        self.draw_or_log();
        self.wait_for_next_game();
    }

    fn wants_to_stop(&self) -> bool {
        self.quit
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
