use crate::error::Result;
use crate::selector::{DEFAULT_FIRST_OPENER, DEFAULT_SECOND_OPENER, StrategyKind};
use crate::word::Word;

pub const DEFAULT_MAX_ATTEMPTS: usize = 6;

/// Knobs read by the session driver and the guess selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    pub openers: [Word; 2],
    pub max_attempts: usize,
    /// Seed for secret sampling and tie-breaking; `None` uses entropy.
    pub seed: Option<u64>,
    pub strategy: StrategyKind,
}

impl SolverConfig {
    pub fn new(openers: [&str; 2], max_attempts: usize, seed: Option<u64>) -> Result<Self> {
        Ok(Self {
            openers: [Word::parse(openers[0])?, Word::parse(openers[1])?],
            max_attempts,
            seed,
            strategy: StrategyKind::default(),
        })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(
            [DEFAULT_FIRST_OPENER, DEFAULT_SECOND_OPENER],
            DEFAULT_MAX_ATTEMPTS,
            None,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// ANSI-colored letters
    #[default]
    Colors,
    /// Emoji squares next to each letter, for terminals without color
    Symbols,
}

/// Presentation settings. Only `cli` and `tui` read these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PresentationConfig {
    pub mode: DisplayMode,
    pub show_secret: bool,
}
