//! Feedback evaluation for a guess against the secret word.
//!
//! Uses the standard two-pass rule so repeated letters are never marked
//! more often than they occur in the secret:
//! - Pass 1 marks exact positions as Correct (green)
//! - Pass 2 marks remaining letters Present (yellow) while the secret still
//!   has unclaimed copies, Absent (gray) otherwise

use crate::WORD_LENGTH;
use crate::error::{Result, SolverError};
use crate::word::Word;

/// Status of a single guessed letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LetterStatus {
    /// Right letter, right position (green)
    Correct,
    /// Letter occurs elsewhere in the secret (yellow)
    Present,
    /// No unclaimed occurrence left in the secret (gray)
    Absent,
}

impl LetterStatus {
    /// Parse from a pattern character (G=green, Y=yellow, X=gray).
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'G' => Some(Self::Correct),
            'Y' => Some(Self::Present),
            'X' => Some(Self::Absent),
            _ => None,
        }
    }

    #[must_use]
    pub fn to_char(self) -> char {
        match self {
            Self::Correct => 'G',
            Self::Present => 'Y',
            Self::Absent => 'X',
        }
    }

    /// Correct and Present both prove the letter is in the secret.
    #[must_use]
    pub fn is_positive(self) -> bool {
        matches!(self, Self::Correct | Self::Present)
    }
}

/// The per-position outcome of one guess. Immutable once produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Feedback {
    guess: Word,
    statuses: [LetterStatus; WORD_LENGTH],
}

impl Feedback {
    /// Evaluate `guess` against `secret`.
    #[must_use]
    pub fn evaluate(guess: &Word, secret: &Word) -> Self {
        let mut remaining = secret.letter_counts();
        let mut statuses = [LetterStatus::Absent; WORD_LENGTH];

        for i in 0..WORD_LENGTH {
            let letter = guess.letter(i);
            if letter == secret.letter(i) {
                statuses[i] = LetterStatus::Correct;
                remaining[usize::from(letter - b'a')] -= 1;
            }
        }

        for i in 0..WORD_LENGTH {
            if statuses[i] == LetterStatus::Correct {
                continue;
            }
            let idx = usize::from(guess.letter(i) - b'a');
            if remaining[idx] > 0 {
                statuses[i] = LetterStatus::Present;
                remaining[idx] -= 1;
            }
        }

        Self {
            guess: *guess,
            statuses,
        }
    }

    /// String entry point: both words must already be normalized.
    ///
    /// Fails with `LengthMismatch` when either side is not 5 letters long.
    pub fn evaluate_str(guess: &str, secret: &str) -> Result<Self> {
        let guess = Word::parse(guess)?;
        let secret = Word::parse(secret)?;
        Ok(Self::evaluate(&guess, &secret))
    }

    /// Build feedback for `guess` from a pattern such as `GYXXG`.
    pub fn from_pattern(guess: Word, pattern: &str) -> Result<Self> {
        let trimmed = pattern.trim();
        let parsed: Option<Vec<LetterStatus>> =
            trimmed.chars().map(LetterStatus::from_char).collect();
        let statuses: [LetterStatus; WORD_LENGTH] = parsed
            .and_then(|s| s.try_into().ok())
            .ok_or_else(|| SolverError::InvalidFeedback(trimmed.to_string()))?;
        Ok(Self { guess, statuses })
    }

    #[must_use]
    pub fn guess(&self) -> &Word {
        &self.guess
    }

    #[must_use]
    pub fn status(&self, position: usize) -> LetterStatus {
        self.statuses[position]
    }

    #[must_use]
    pub fn statuses(&self) -> &[LetterStatus; WORD_LENGTH] {
        &self.statuses
    }

    /// `(position, letter, status)` triples in position order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u8, LetterStatus)> + '_ {
        self.guess
            .letters()
            .iter()
            .zip(self.statuses.iter())
            .enumerate()
            .map(|(i, (&letter, &status))| (i, letter, status))
    }

    /// Number of Correct/Present markings of `letter`.
    #[must_use]
    pub fn positive_count(&self, letter: u8) -> usize {
        self.iter()
            .filter(|&(_, l, status)| l == letter && status.is_positive())
            .count()
    }

    /// Whether some occurrence of `letter` was marked Absent.
    #[must_use]
    pub fn has_absent(&self, letter: u8) -> bool {
        self.iter()
            .any(|(_, l, status)| l == letter && status == LetterStatus::Absent)
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.statuses.iter().all(|&s| s == LetterStatus::Correct)
    }

    /// The G/Y/X pattern, e.g. `GYXXG`.
    #[must_use]
    pub fn pattern(&self) -> String {
        self.statuses.iter().map(|s| s.to_char()).collect()
    }
}
