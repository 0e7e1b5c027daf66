use crate::config::{DEFAULT_MAX_ATTEMPTS, DisplayMode, PresentationConfig, SolverConfig};
use crate::corpus::normalize_word;
use crate::debug_log;
use crate::error::Result;
use crate::feedback::{Feedback, LetterStatus};
use crate::selector::{DEFAULT_FIRST_OPENER, DEFAULT_SECOND_OPENER, Selection, StrategyKind};
use crate::session::{Anomaly, AttemptReport, Outcome, SessionInterface, SessionStart};
use crate::word::Word;
use clap::Parser;
use crossterm::style::Stylize;
use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;

const MAX_REMAINING_DISPLAY: usize = 10;
const SEPARATOR_WIDTH: usize = 30;

/// Termo solver CLI options
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited word list
    #[arg(short = 'i', long = "input")]
    pub wordlist_path: Option<PathBuf>,

    /// Fixed secret word (case and accents are normalized)
    #[arg(short, long)]
    pub secret: Option<String>,

    /// Seed for secret sampling and tie-breaking
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of games to play; more than one prints a summary
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub games: u32,

    /// Attempts allowed per game
    #[arg(short, long, default_value_t = DEFAULT_MAX_ATTEMPTS as u32, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_attempts: u32,

    /// First opening probe
    #[arg(long, value_name = "WORD", default_value = DEFAULT_FIRST_OPENER)]
    pub first_opener: String,

    /// Second opening probe
    #[arg(long, value_name = "WORD", default_value = DEFAULT_SECOND_OPENER)]
    pub second_opener: String,

    /// Always guess the first remaining candidate instead of a random one
    #[arg(long)]
    pub first: bool,

    /// Show emoji squares instead of colored letters
    #[arg(long)]
    pub symbols: bool,

    /// Print the secret word before solving
    #[arg(long)]
    pub reveal: bool,

    /// Step through each game on a full-screen board
    #[arg(long)]
    pub tui: bool,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

impl Cli {
    pub fn solver_config(&self) -> Result<SolverConfig> {
        let first = normalize_word(&self.first_opener);
        let second = normalize_word(&self.second_opener);
        let mut config = SolverConfig::new(
            [first.as_str(), second.as_str()],
            self.max_attempts as usize,
            self.seed,
        )?;
        if self.first {
            config.strategy = StrategyKind::First;
        }
        Ok(config)
    }

    #[must_use]
    pub fn presentation(&self) -> PresentationConfig {
        PresentationConfig {
            mode: if self.symbols {
                DisplayMode::Symbols
            } else {
                DisplayMode::Colors
            },
            show_secret: self.reveal,
        }
    }

    pub fn secret_word(&self) -> Result<Option<Word>> {
        self.secret
            .as_deref()
            .map(|s| Word::parse(&normalize_word(s)))
            .transpose()
    }
}

fn symbol(status: LetterStatus) -> &'static str {
    match status {
        LetterStatus::Correct => "🟩",
        LetterStatus::Present => "🟨",
        LetterStatus::Absent => "⬜",
    }
}

/// One history line for `feedback`, e.g. `P O R T A` in color.
#[must_use]
pub fn render_feedback(feedback: &Feedback, mode: DisplayMode) -> String {
    feedback
        .iter()
        .map(|(_, letter, status)| {
            let letter = char::from(letter).to_ascii_uppercase().to_string();
            match mode {
                DisplayMode::Colors => match status {
                    LetterStatus::Correct => letter.green().to_string(),
                    LetterStatus::Present => letter.yellow().to_string(),
                    LetterStatus::Absent => letter.dark_grey().to_string(),
                },
                DisplayMode::Symbols => format!("{} {letter}", symbol(status)),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[must_use]
pub fn describe_selection(selection: &Selection) -> &'static str {
    match selection {
        Selection::Opening(_) => "opening probe",
        Selection::Deduced(_) => "only candidate left",
        Selection::Candidate(_) => "picked among candidates",
        Selection::Fallback(_) => "fallback from full corpus",
    }
}

/// Line-oriented session output.
pub struct CliInterface<W: Write> {
    out: W,
    config: PresentationConfig,
    max_attempts: usize,
    history: Vec<String>,
}

impl CliInterface<io::Stdout> {
    #[must_use]
    pub fn stdout(config: PresentationConfig) -> Self {
        Self::new(io::stdout(), config)
    }
}

impl<W: Write> CliInterface<W> {
    pub fn new(out: W, config: PresentationConfig) -> Self {
        Self {
            out,
            config,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            history: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: impl fmt::Display) {
        if let Err(e) = writeln!(self.out, "{text}") {
            debug_log!("Write error: {}", e);
        }
    }

    fn separator(&mut self, ch: char) {
        self.line(ch.to_string().repeat(SEPARATOR_WIDTH));
    }

    fn banner(&mut self, text: String) {
        match self.config.mode {
            DisplayMode::Colors => self.line(text.bold()),
            DisplayMode::Symbols => self.line(text),
        }
    }
}

impl<W: Write> SessionInterface for CliInterface<W> {
    fn session_started(&mut self, start: &SessionStart) {
        self.history.clear();
        self.max_attempts = start.max_attempts;
        self.line(format!(
            "\n{} words loaded. The solver has {} attempts.",
            start.corpus_size, start.max_attempts
        ));
        if self.config.show_secret {
            self.line(format!("(The secret word is '{}')", start.secret.to_uppercase()));
        }
        if self.config.mode == DisplayMode::Symbols {
            self.line(format!(
                "Feedback: {}=Correct Position, {}=Letter Exists, {}=Letter Absent",
                symbol(LetterStatus::Correct),
                symbol(LetterStatus::Present),
                symbol(LetterStatus::Absent)
            ));
        }
    }

    fn attempt_made(&mut self, report: &AttemptReport) {
        self.separator('-');
        self.line(format!("Attempt {} of {}", report.attempt, self.max_attempts));
        self.line(format!(
            "Solver guessed: {} ({})",
            report.selection.word().to_uppercase(),
            describe_selection(&report.selection)
        ));
        self.history
            .push(render_feedback(&report.feedback, self.config.mode));
        let history = self.history.join("\n");
        self.line(format!("\nHistory:\n{history}"));
        self.line(format!("Possible words remaining: {}", report.remaining));
    }

    fn anomaly(&mut self, anomaly: &Anomaly) {
        match anomaly {
            Anomaly::EmptyCandidateSet { attempt, fallback } => {
                self.line(format!(
                    "Warning: no possible words remain at attempt {attempt}; trying {} from the full list. Check the secret word.",
                    fallback.to_uppercase()
                ));
            }
        }
    }

    fn session_finished(&mut self, outcome: &Outcome, secret: &Word) {
        self.line("");
        self.separator('=');
        match outcome {
            Outcome::Solved { attempts } => {
                self.banner(format!("SOLVER GUESSED THE WORD IN {attempts}!"));
                self.line(format!("The word was: {}", secret.to_uppercase()));
            }
            Outcome::Exhausted { remaining } => {
                self.banner("Solver used all attempts!".to_string());
                self.line(format!("The secret word was: {}", secret.to_uppercase()));
                self.line(format!(
                    "Words remaining as possibilities: {}",
                    remaining.len()
                ));
                if !remaining.is_empty() && remaining.len() < MAX_REMAINING_DISPLAY {
                    let words: Vec<String> = remaining.iter().map(Word::to_uppercase).collect();
                    self.line(format!("Remaining possibilities: {}", words.join(", ")));
                }
            }
        }
        self.separator('=');
    }
}
