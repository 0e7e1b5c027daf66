use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the solver and its word-list loader.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("'{word}' has {found} letters, expected {expected}")]
    LengthMismatch {
        word: String,
        expected: usize,
        found: usize,
    },

    #[error("'{word}' contains '{letter}', which is outside a-z")]
    InvalidLetter { word: String, letter: char },

    #[error("invalid feedback '{0}': expected 5 characters using G, Y or X")]
    InvalidFeedback(String),

    /// Two guesses in the history imply different exact counts for one letter.
    #[error("letter '{letter}' was pinned to exactly {previous} occurrences but a later guess implies {derived}")]
    ExactCountConflict {
        letter: char,
        previous: usize,
        derived: usize,
    },

    #[error("no valid 5-letter words found in {origin}")]
    EmptyCorpus { origin: String },

    #[error("failed to read word list '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, SolverError>;
