//! Guess selection: two fixed opening probes, then a pick from the
//! surviving candidates.

use crate::corpus::Corpus;
use crate::word::Word;
use crate::{debug_log, info_log};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Default first probe: common vowels plus `c` and `l`.
pub const DEFAULT_FIRST_OPENER: &str = "acelo";
/// Default second probe, disjoint from the first.
pub const DEFAULT_SECOND_OPENER: &str = "sumir";

/// Chooses one word among equally valid candidates.
///
/// Every candidate already satisfies all known constraints, so any pick is
/// correct; implementations only decide how ties are broken.
pub trait RankingStrategy {
    fn pick<'a>(&mut self, candidates: &'a [Word]) -> Option<&'a Word>;

    fn name(&self) -> &'static str;
}

/// Uniform random pick from a seedable RNG.
#[derive(Debug, Clone)]
pub struct RandomPick {
    rng: StdRng,
}

impl RandomPick {
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl RankingStrategy for RandomPick {
    fn pick<'a>(&mut self, candidates: &'a [Word]) -> Option<&'a Word> {
        candidates.choose(&mut self.rng)
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

/// Always the first candidate in corpus order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstCandidate;

impl RankingStrategy for FirstCandidate {
    fn pick<'a>(&mut self, candidates: &'a [Word]) -> Option<&'a Word> {
        candidates.first()
    }

    fn name(&self) -> &'static str {
        "first"
    }
}

impl<S: RankingStrategy + ?Sized> RankingStrategy for Box<S> {
    fn pick<'a>(&mut self, candidates: &'a [Word]) -> Option<&'a Word> {
        (**self).pick(candidates)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Which [`RankingStrategy`] a session should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrategyKind {
    #[default]
    Random,
    First,
}

impl StrategyKind {
    #[must_use]
    pub fn build(self, seed: Option<u64>) -> Box<dyn RankingStrategy> {
        match self {
            Self::Random => Box::new(RandomPick::new(seed)),
            Self::First => Box::new(FirstCandidate),
        }
    }
}

/// Where a guess came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// One of the two fixed probes
    Opening(Word),
    /// The only remaining candidate
    Deduced(Word),
    /// Picked among several remaining candidates
    Candidate(Word),
    /// No candidate left; drawn from the full corpus instead
    Fallback(Word),
}

impl Selection {
    #[must_use]
    pub fn word(&self) -> Word {
        match *self {
            Self::Opening(w) | Self::Deduced(w) | Self::Candidate(w) | Self::Fallback(w) => w,
        }
    }

    /// The fallback path means feedback and model disagree.
    #[must_use]
    pub fn is_anomaly(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

pub struct GuessSelector<S> {
    openers: [Word; 2],
    strategy: S,
}

impl<S: RankingStrategy> GuessSelector<S> {
    pub fn new(openers: [Word; 2], strategy: S) -> Self {
        Self { openers, strategy }
    }

    #[must_use]
    pub fn openers(&self) -> &[Word; 2] {
        &self.openers
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Pick the guess for 0-based `attempt`.
    pub fn select(&mut self, attempt: usize, candidates: &[Word], corpus: &Corpus) -> Selection {
        if let Some(&opener) = self.openers.get(attempt) {
            return Selection::Opening(opener);
        }

        match candidates {
            [] => {
                let fallback = self
                    .strategy
                    .pick(corpus.words())
                    .copied()
                    .unwrap_or_else(|| corpus.first());
                log::error!(
                    "No candidates remain at attempt {}; falling back to corpus word '{}'",
                    attempt + 1,
                    fallback
                );
                Selection::Fallback(fallback)
            }
            [only] => {
                info_log!("Deduced '{}' at attempt {}", only, attempt + 1);
                Selection::Deduced(*only)
            }
            _ => {
                let guess = self
                    .strategy
                    .pick(candidates)
                    .copied()
                    .unwrap_or(candidates[0]);
                debug_log!(
                    "Picked '{}' among {} candidates ({})",
                    guess,
                    candidates.len(),
                    self.strategy.name()
                );
                Selection::Candidate(guess)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(s: &str) -> Word {
        Word::parse(s).unwrap()
    }

    fn corpus(list: &[&str]) -> Corpus {
        Corpus::from_words(list.iter().map(|s| word(s))).unwrap()
    }

    fn default_openers() -> [Word; 2] {
        [word(DEFAULT_FIRST_OPENER), word(DEFAULT_SECOND_OPENER)]
    }

    #[test]
    fn test_openers_ignore_candidates() {
        let corpus = corpus(&["bater", "carta"]);
        let mut selector = GuessSelector::new(default_openers(), FirstCandidate);
        assert_eq!(
            selector.select(0, corpus.words(), &corpus),
            Selection::Opening(word("acelo"))
        );
        assert_eq!(
            selector.select(1, &[], &corpus),
            Selection::Opening(word("sumir"))
        );
    }

    #[test]
    fn test_openers_with_random_strategy() {
        let corpus = corpus(&["porta"]);
        for seed in 0..5 {
            let mut selector = GuessSelector::new(default_openers(), RandomPick::new(Some(seed)));
            assert_eq!(selector.select(0, corpus.words(), &corpus).word(), word("acelo"));
            assert_eq!(selector.select(1, corpus.words(), &corpus).word(), word("sumir"));
        }
    }

    #[test]
    fn test_single_candidate_is_deduced() {
        let corpus = corpus(&["bater", "carta", "porta"]);
        let mut selector = GuessSelector::new(default_openers(), RandomPick::new(Some(7)));
        let selection = selector.select(2, &[word("porta")], &corpus);
        assert_eq!(selection, Selection::Deduced(word("porta")));
        assert!(!selection.is_anomaly());
    }

    #[test]
    fn test_candidate_pick_comes_from_set() {
        let corpus = corpus(&["bater", "carta", "porta", "festa", "manta"]);
        let candidates = vec![word("carta"), word("manta")];
        let mut selector = GuessSelector::new(default_openers(), RandomPick::new(Some(42)));
        for attempt in 2..6 {
            match selector.select(attempt, &candidates, &corpus) {
                Selection::Candidate(w) => assert!(candidates.contains(&w)),
                other => panic!("Expected Candidate, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_first_candidate_strategy_is_deterministic() {
        let corpus = corpus(&["bater", "carta", "porta"]);
        let mut selector = GuessSelector::new(default_openers(), FirstCandidate);
        let candidates = vec![word("carta"), word("porta")];
        assert_eq!(
            selector.select(3, &candidates, &corpus),
            Selection::Candidate(word("carta"))
        );
    }

    #[test]
    fn test_empty_candidates_fall_back_to_corpus() {
        let corpus = corpus(&["bater", "carta"]);
        let mut selector = GuessSelector::new(default_openers(), RandomPick::new(Some(1)));
        let selection = selector.select(2, &[], &corpus);
        assert!(selection.is_anomaly());
        assert!(corpus.contains(&selection.word()));
    }

    #[test]
    fn test_boxed_strategy_delegates() {
        let corpus = corpus(&["bater", "carta", "porta"]);
        let mut selector = GuessSelector::new(default_openers(), StrategyKind::First.build(None));
        assert_eq!(selector.strategy().name(), "first");
        assert_eq!(
            selector.select(2, corpus.words(), &corpus),
            Selection::Candidate(word("bater"))
        );
        assert_eq!(StrategyKind::Random.build(Some(1)).name(), "random");
    }

    #[test]
    fn test_seeded_random_pick_is_reproducible() {
        let candidates: Vec<Word> = ["bater", "carta", "porta", "festa", "manta"]
            .iter()
            .map(|s| word(s))
            .collect();
        let mut first = RandomPick::new(Some(99));
        let mut second = RandomPick::new(Some(99));
        for _ in 0..10 {
            assert_eq!(first.pick(&candidates), second.pick(&candidates));
        }
    }
}
