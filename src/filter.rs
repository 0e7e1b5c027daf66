use crate::constraints::ConstraintModel;
use crate::debug_log;
use crate::error::Result;
use crate::word::Word;
use std::collections::BTreeMap;

/// One filter pass over a [`ConstraintModel`].
///
/// Exact counts are derived from the model's history when the pass is built
/// and reused for every word tested by it.
#[derive(Debug)]
pub struct CandidateFilter<'m> {
    model: &'m ConstraintModel,
    exact_counts: BTreeMap<u8, usize>,
}

impl<'m> CandidateFilter<'m> {
    pub fn new(model: &'m ConstraintModel) -> Result<Self> {
        Ok(Self {
            model,
            exact_counts: model.exact_counts()?,
        })
    }

    /// Whether `word` agrees with every constraint gathered so far.
    #[must_use]
    pub fn is_consistent(&self, word: &Word) -> bool {
        let model = self.model;

        let greens_match = model
            .green()
            .iter()
            .enumerate()
            .all(|(i, green)| green.is_none_or(|letter| word.letter(i) == letter));
        if !greens_match {
            return false;
        }

        let yellow_hit = model
            .yellow_exclusions()
            .iter()
            .enumerate()
            .any(|(i, excluded)| excluded.contains(&word.letter(i)));
        if yellow_hit {
            return false;
        }

        // A gray letter may still appear when another guess proved it present
        let gray_hit = model
            .gray()
            .iter()
            .any(|&letter| word.contains(letter) && model.min_count(letter) == 0);
        if gray_hit {
            return false;
        }

        let below_min = model
            .min_counts()
            .iter()
            .any(|(&letter, &min)| word.count(letter) < min);
        if below_min {
            return false;
        }

        self.exact_counts
            .iter()
            .all(|(&letter, &exact)| word.count(letter) == exact)
    }

    /// Keep the candidates that pass [`Self::is_consistent`], in order.
    #[must_use]
    pub fn apply(&self, candidates: &[Word]) -> Vec<Word> {
        let filtered: Vec<Word> = candidates
            .iter()
            .filter(|word| self.is_consistent(word))
            .copied()
            .collect();
        debug_log!(
            "Filter pass: {} -> {} candidates (exact counts {:?})",
            candidates.len(),
            filtered.len(),
            self.exact_counts
        );
        filtered
    }
}

/// Test a single word against `model`.
pub fn is_consistent(word: &Word, model: &ConstraintModel) -> Result<bool> {
    Ok(CandidateFilter::new(model)?.is_consistent(word))
}

/// Shrink `candidates` to the words consistent with `model`.
pub fn filter_candidates(candidates: &[Word], model: &ConstraintModel) -> Result<Vec<Word>> {
    Ok(CandidateFilter::new(model)?.apply(candidates))
}
