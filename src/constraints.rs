//! Accumulated knowledge about the secret word.
//!
//! The model is append-only for the lifetime of a session: greens, yellow
//! exclusions, grays and the history only ever grow, and minimum counts never
//! decrease. Exact counts are not stored; they are re-derived from the full
//! history on every filter pass (see [`ConstraintModel::exact_counts`]).

use crate::WORD_LENGTH;
use crate::debug_log;
use crate::error::{Result, SolverError};
use crate::feedback::{Feedback, LetterStatus};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default)]
pub struct ConstraintModel {
    green: [Option<u8>; WORD_LENGTH],
    yellow_exclusions: [BTreeSet<u8>; WORD_LENGTH],
    gray: BTreeSet<u8>,
    min_count: BTreeMap<u8, usize>,
    history: Vec<Feedback>,
}

impl ConstraintModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one evaluated guess into the model.
    pub fn update(&mut self, feedback: &Feedback) {
        for (position, letter, status) in feedback.iter() {
            match status {
                LetterStatus::Correct => {
                    if let Some(previous) = self.green[position]
                        && previous != letter
                    {
                        log::warn!(
                            "Position {} was green '{}' and is now green '{}'",
                            position,
                            char::from(previous),
                            char::from(letter)
                        );
                    }
                    self.green[position] = Some(letter);
                    self.yellow_exclusions[position].remove(&letter);
                }
                LetterStatus::Present => {
                    self.yellow_exclusions[position].insert(letter);
                }
                LetterStatus::Absent => {
                    // Gray only when no other occurrence in this guess was positive
                    if feedback.positive_count(letter) == 0 {
                        self.gray.insert(letter);
                    }
                }
            }
        }

        for &letter in feedback.guess().letters() {
            let positive = feedback.positive_count(letter);
            if positive > 0 {
                let current = self.min_count.entry(letter).or_insert(0);
                *current = (*current).max(positive);
            }
        }

        self.history.push(*feedback);
        debug_log!(
            "Model updated with {} ({}): greens={:?} gray={:?} min={:?}",
            feedback.guess(),
            feedback.pattern(),
            self.green,
            self.gray,
            self.min_count
        );
    }

    /// Derive exact letter counts from the whole history.
    ///
    /// A guess in which a letter has both positive and Absent markings pins
    /// that letter to exactly its positive count. Two guesses pinning the
    /// same letter to different counts is reported as
    /// [`SolverError::ExactCountConflict`].
    pub fn exact_counts(&self) -> Result<BTreeMap<u8, usize>> {
        let mut exact = BTreeMap::new();
        for feedback in &self.history {
            let guess = feedback.guess();
            for (position, &letter) in guess.letters().iter().enumerate() {
                // Visit each distinct letter once per guess
                if guess.letters()[..position].contains(&letter) {
                    continue;
                }
                let positive = feedback.positive_count(letter);
                if positive == 0 || !feedback.has_absent(letter) {
                    continue;
                }
                match exact.entry(letter) {
                    Entry::Vacant(slot) => {
                        slot.insert(positive);
                    }
                    Entry::Occupied(slot) if *slot.get() == positive => {}
                    Entry::Occupied(slot) => {
                        return Err(SolverError::ExactCountConflict {
                            letter: char::from(letter),
                            previous: *slot.get(),
                            derived: positive,
                        });
                    }
                }
            }
        }
        Ok(exact)
    }

    #[must_use]
    pub fn green(&self) -> &[Option<u8>; WORD_LENGTH] {
        &self.green
    }

    #[must_use]
    pub fn yellow_exclusions(&self) -> &[BTreeSet<u8>; WORD_LENGTH] {
        &self.yellow_exclusions
    }

    #[must_use]
    pub fn gray(&self) -> &BTreeSet<u8> {
        &self.gray
    }

    #[must_use]
    pub fn min_count(&self, letter: u8) -> usize {
        self.min_count.get(&letter).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn min_counts(&self) -> &BTreeMap<u8, usize> {
        &self.min_count
    }

    #[must_use]
    pub fn history(&self) -> &[Feedback] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::word::Word;

    fn word(s: &str) -> Word {
        Word::parse(s).unwrap()
    }

    fn evaluated(guess: &str, secret: &str) -> Feedback {
        Feedback::evaluate(&word(guess), &word(secret))
    }

    #[test]
    fn test_update_records_each_status() {
        let mut model = ConstraintModel::new();
        model.update(&evaluated("acelo", "porta"));

        assert_eq!(model.green(), &[None; WORD_LENGTH]);
        assert!(model.yellow_exclusions()[0].contains(&b'a'));
        assert!(model.yellow_exclusions()[4].contains(&b'o'));
        assert_eq!(
            model.gray().iter().copied().collect::<Vec<_>>(),
            vec![b'c', b'e', b'l']
        );
        assert_eq!(model.min_count(b'a'), 1);
        assert_eq!(model.min_count(b'o'), 1);
        assert_eq!(model.min_count(b'c'), 0);
        assert_eq!(model.history().len(), 1);
    }

    #[test]
    fn test_green_clears_yellow_exclusion_at_position() {
        let mut model = ConstraintModel::new();
        // 'a' yellow at position 1, later green at position 1 is impossible
        // in a real game, but the model must still drop the exclusion
        model.update(&Feedback::from_pattern(word("manta"), "XYXXX").unwrap());
        assert!(model.yellow_exclusions()[1].contains(&b'a'));
        model.update(&Feedback::from_pattern(word("carta"), "XGXXX").unwrap());
        assert_eq!(model.green()[1], Some(b'a'));
        assert!(!model.yellow_exclusions()[1].contains(&b'a'));
    }

    #[test]
    fn test_absent_duplicate_is_not_gray() {
        let mut model = ConstraintModel::new();
        model.update(&evaluated("sassy", "glass"));
        assert!(!model.gray().contains(&b's'));
        assert!(model.gray().contains(&b'y'));
        assert_eq!(model.min_count(b's'), 2);
    }

    #[test]
    fn test_min_count_is_non_decreasing() {
        let mut model = ConstraintModel::new();
        model.update(&evaluated("roraz", "carro"));
        assert_eq!(model.min_count(b'r'), 2);
        // A later guess with a single 'r' cannot lower the bound
        model.update(&evaluated("sumir", "carro"));
        assert_eq!(model.min_count(b'r'), 2);
    }

    #[test]
    fn test_exact_count_from_over_guessed_letter() {
        let mut model = ConstraintModel::new();
        model.update(&evaluated("roraz", "carta"));
        let exact = model.exact_counts().unwrap();
        assert_eq!(exact.get(&b'r'), Some(&1));
        // 'a' was only Present, 'o' and 'z' only Absent
        assert_eq!(exact.get(&b'a'), None);
        assert_eq!(exact.get(&b'z'), None);
    }

    #[test]
    fn test_no_exact_count_when_secret_holds_every_copy() {
        let mut model = ConstraintModel::new();
        model.update(&evaluated("roraz", "carro"));
        let exact = model.exact_counts().unwrap();
        assert!(exact.is_empty());
    }

    #[test]
    fn test_exact_count_rederivation_is_stable() {
        let mut model = ConstraintModel::new();
        model.update(&evaluated("roraz", "carta"));
        model.update(&evaluated("errar", "carta"));
        let exact = model.exact_counts().unwrap();
        assert_eq!(exact.get(&b'r'), Some(&1));
        assert_eq!(model.exact_counts().unwrap(), exact);
    }

    #[test]
    fn test_conflicting_exact_counts_are_reported() {
        let mut model = ConstraintModel::new();
        model.update(&Feedback::from_pattern(word("roraz"), "XXGXX").unwrap());
        model.update(&Feedback::from_pattern(word("errar"), "XGGXX").unwrap());
        match model.exact_counts() {
            Err(SolverError::ExactCountConflict {
                letter,
                previous,
                derived,
            }) => {
                assert_eq!(letter, 'r');
                assert_eq!(previous, 1);
                assert_eq!(derived, 2);
            }
            other => panic!("Expected ExactCountConflict, got {other:?}"),
        }
    }
}
