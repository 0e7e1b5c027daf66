//! Fixed-length words over the lowercase ASCII alphabet.

use crate::WORD_LENGTH;
use crate::error::{Result, SolverError};
use std::fmt;
use std::str::FromStr;

/// A validated word of exactly [`WORD_LENGTH`] letters in `a..=z`.
///
/// Normalization (accents, case) is the loader's job; `parse` only accepts
/// words that are already normalized.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word([u8; WORD_LENGTH]);

impl Word {
    pub fn parse(text: &str) -> Result<Self> {
        let found = text.chars().count();
        if found != WORD_LENGTH {
            return Err(SolverError::LengthMismatch {
                word: text.to_string(),
                expected: WORD_LENGTH,
                found,
            });
        }
        if let Some(letter) = text.chars().find(|c| !c.is_ascii_lowercase()) {
            return Err(SolverError::InvalidLetter {
                word: text.to_string(),
                letter,
            });
        }
        let mut letters = [0u8; WORD_LENGTH];
        letters.copy_from_slice(text.as_bytes());
        Ok(Self(letters))
    }

    #[must_use]
    pub fn letters(&self) -> &[u8; WORD_LENGTH] {
        &self.0
    }

    #[must_use]
    pub fn letter(&self, position: usize) -> u8 {
        self.0[position]
    }

    /// Number of occurrences of `letter` in this word.
    #[must_use]
    pub fn count(&self, letter: u8) -> usize {
        self.0.iter().filter(|&&l| l == letter).count()
    }

    #[must_use]
    pub fn contains(&self, letter: u8) -> bool {
        self.0.contains(&letter)
    }

    /// Per-letter occurrence table indexed by `letter - b'a'`.
    #[must_use]
    pub fn letter_counts(&self) -> [u8; 26] {
        let mut counts = [0u8; 26];
        for &letter in &self.0 {
            counts[usize::from(letter - b'a')] += 1;
        }
        counts
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        // Only ASCII lowercase bytes are ever stored.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    #[must_use]
    pub fn to_uppercase(&self) -> String {
        self.as_str().to_ascii_uppercase()
    }
}

impl FromStr for Word {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word({:?})", self.as_str())
    }
}
