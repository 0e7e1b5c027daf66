//! Session driver: one secret, a bounded number of attempts.
//!
//! Each attempt runs selector → evaluator → model update → filter to
//! completion before the next one starts. Everything the driver mutates is
//! owned by the [`Session`]; the corpus is only borrowed.

use crate::config::SolverConfig;
use crate::constraints::ConstraintModel;
use crate::corpus::Corpus;
use crate::error::Result;
use crate::feedback::Feedback;
use crate::filter::filter_candidates;
use crate::selector::{GuessSelector, RankingStrategy, Selection};
use crate::word::Word;
use crate::{debug_log, info_log};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// What the interface learns before the first attempt.
#[derive(Debug, Clone)]
pub struct SessionStart {
    pub secret: Word,
    pub corpus_size: usize,
    pub max_attempts: usize,
    pub openers: [Word; 2],
    pub strategy: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptReport {
    /// 1-based attempt number
    pub attempt: usize,
    pub selection: Selection,
    pub feedback: Feedback,
    /// Candidate set size after filtering with this feedback
    pub remaining: usize,
}

/// Conditions that should never happen with a consistent evaluator and model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anomaly {
    /// Filtering removed every candidate; `fallback` was drawn from the corpus.
    EmptyCandidateSet { attempt: usize, fallback: Word },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Solved { attempts: usize },
    Exhausted { remaining: Vec<Word> },
}

impl Outcome {
    #[must_use]
    pub fn is_solved(&self) -> bool {
        matches!(self, Self::Solved { .. })
    }
}

/// Receives progress from a running session.
pub trait SessionInterface {
    fn session_started(&mut self, start: &SessionStart);
    fn attempt_made(&mut self, report: &AttemptReport);
    fn anomaly(&mut self, anomaly: &Anomaly);
    fn session_finished(&mut self, outcome: &Outcome, secret: &Word);

    /// Checked between sessions; `true` ends a multi-game run early.
    fn wants_to_stop(&self) -> bool {
        false
    }
}

pub struct Session<'c, S> {
    corpus: &'c Corpus,
    secret: Word,
    model: ConstraintModel,
    candidates: Vec<Word>,
    selector: GuessSelector<S>,
    max_attempts: usize,
    attempts: usize,
    outcome: Option<Outcome>,
}

impl<'c, S: RankingStrategy> Session<'c, S> {
    pub fn new(
        corpus: &'c Corpus,
        secret: Word,
        selector: GuessSelector<S>,
        max_attempts: usize,
    ) -> Self {
        if !corpus.contains(&secret) {
            log::warn!("Secret '{secret}' is not in the corpus; deduction cannot converge");
        }
        for opener in selector.openers() {
            if !corpus.contains(opener) {
                debug_log!("Opening probe '{}' is not in the corpus", opener);
            }
        }
        let outcome = (max_attempts == 0).then(|| Outcome::Exhausted {
            remaining: corpus.words().to_vec(),
        });
        Self {
            corpus,
            secret,
            model: ConstraintModel::new(),
            candidates: corpus.words().to_vec(),
            selector,
            max_attempts,
            attempts: 0,
            outcome,
        }
    }

    #[must_use]
    pub fn start_info(&self) -> SessionStart {
        SessionStart {
            secret: self.secret,
            corpus_size: self.corpus.len(),
            max_attempts: self.max_attempts,
            openers: *self.selector.openers(),
            strategy: self.selector.strategy().name(),
        }
    }

    /// Play one attempt. Returns `None` once the session has an outcome.
    pub fn step(&mut self) -> Result<Option<AttemptReport>> {
        if self.outcome.is_some() {
            return Ok(None);
        }

        let selection = self
            .selector
            .select(self.attempts, &self.candidates, self.corpus);
        let guess = selection.word();
        let feedback = Feedback::evaluate(&guess, &self.secret);
        self.model.update(&feedback);
        self.candidates = filter_candidates(&self.candidates, &self.model)?;
        self.attempts += 1;

        info_log!(
            "Attempt {}: {} -> {} ({} candidates left)",
            self.attempts,
            guess,
            feedback.pattern(),
            self.candidates.len()
        );

        if feedback.is_solved() {
            self.outcome = Some(Outcome::Solved {
                attempts: self.attempts,
            });
        } else if self.attempts >= self.max_attempts {
            self.outcome = Some(Outcome::Exhausted {
                remaining: self.candidates.clone(),
            });
        }

        Ok(Some(AttemptReport {
            attempt: self.attempts,
            selection,
            feedback,
            remaining: self.candidates.len(),
        }))
    }

    /// Play to the end, reporting every attempt to `interface`.
    pub fn run<I: SessionInterface + ?Sized>(mut self, interface: &mut I) -> Result<Outcome> {
        interface.session_started(&self.start_info());
        while let Some(report) = self.step()? {
            if let Selection::Fallback(fallback) = report.selection {
                interface.anomaly(&Anomaly::EmptyCandidateSet {
                    attempt: report.attempt,
                    fallback,
                });
            }
            interface.attempt_made(&report);
        }
        let outcome = self.outcome.take().unwrap_or_else(|| Outcome::Exhausted {
            remaining: self.candidates.clone(),
        });
        interface.session_finished(&outcome, &self.secret);
        Ok(outcome)
    }

    #[must_use]
    pub fn candidates(&self) -> &[Word] {
        &self.candidates
    }

    #[must_use]
    pub fn model(&self) -> &ConstraintModel {
        &self.model
    }

    #[must_use]
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    #[must_use]
    pub fn secret(&self) -> &Word {
        &self.secret
    }
}

/// Play up to `games` sessions against `corpus`.
///
/// Each session draws its secret from a seeded RNG unless `secret` is fixed,
/// and gets a fresh model, candidate set and selector.
pub fn play_games<I: SessionInterface + ?Sized>(
    corpus: &Corpus,
    config: &SolverConfig,
    secret: Option<Word>,
    games: usize,
    interface: &mut I,
) -> Result<Vec<Outcome>> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut outcomes = Vec::with_capacity(games);
    for game in 0..games {
        if interface.wants_to_stop() {
            info_log!("Stopping after {} of {} games", game, games);
            break;
        }
        let secret = secret.unwrap_or_else(|| corpus.choose_secret(&mut rng));
        let strategy = config
            .strategy
            .build(config.seed.map(|seed| seed.wrapping_add(game as u64 + 1)));
        let selector = GuessSelector::new(config.openers, strategy);
        let session = Session::new(corpus, secret, selector, config.max_attempts);
        outcomes.push(session.run(interface)?);
    }
    Ok(outcomes)
}
