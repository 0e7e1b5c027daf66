// Library interface for termo-solver
// This allows integration tests to access internal modules

pub mod cli;
pub mod config;
pub mod constraints;
pub mod corpus;
pub mod error;
pub mod feedback;
pub mod filter;
pub mod logging;
pub mod selector;
pub mod session;
pub mod stats;
pub mod tui;
pub mod word;

/// Letters per word.
pub const WORD_LENGTH: usize = 5;

// Re-export commonly used items for easier testing
pub use config::{DisplayMode, PresentationConfig, SolverConfig};
pub use constraints::ConstraintModel;
pub use corpus::{Corpus, EMBEDDED_WORDLIST, normalize_word};
pub use error::{Result, SolverError};
pub use feedback::{Feedback, LetterStatus};
pub use filter::{CandidateFilter, filter_candidates, is_consistent};
pub use selector::{FirstCandidate, GuessSelector, RandomPick, RankingStrategy, Selection, StrategyKind};
pub use session::{Anomaly, AttemptReport, Outcome, Session, SessionInterface, SessionStart, play_games};
pub use stats::BatchSummary;
pub use word::Word;
