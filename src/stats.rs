use crate::session::{Anomaly, AttemptReport, Outcome, SessionInterface, SessionStart};
use crate::word::Word;
use std::collections::BTreeMap;
use std::fmt;

/// Aggregated results of many sessions, fed as a silent [`SessionInterface`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub games: usize,
    pub solved: usize,
    pub exhausted: usize,
    pub anomalies: usize,
    /// attempts needed → number of solved games
    pub histogram: BTreeMap<usize, usize>,
    /// Secrets the solver failed to find
    pub failures: Vec<Word>,
}

impl BatchSummary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: &Outcome, secret: &Word) {
        self.games += 1;
        match outcome {
            Outcome::Solved { attempts } => {
                self.solved += 1;
                *self.histogram.entry(*attempts).or_insert(0) += 1;
            }
            Outcome::Exhausted { .. } => {
                self.exhausted += 1;
                self.failures.push(*secret);
            }
        }
    }

    /// Mean attempts over solved games.
    #[must_use]
    pub fn average_attempts(&self) -> Option<f64> {
        if self.solved == 0 {
            return None;
        }
        let total: usize = self.histogram.iter().map(|(a, n)| a * n).sum();
        Some(total as f64 / self.solved as f64)
    }

    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.solved as f64 / self.games as f64
        }
    }
}

impl SessionInterface for BatchSummary {
    fn session_started(&mut self, _start: &SessionStart) {}

    fn attempt_made(&mut self, _report: &AttemptReport) {}

    fn anomaly(&mut self, _anomaly: &Anomaly) {
        self.anomalies += 1;
    }

    fn session_finished(&mut self, outcome: &Outcome, secret: &Word) {
        self.record(outcome, secret);
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Games played: {}", self.games)?;
        writeln!(
            f,
            "Solved: {} ({:.1}%)",
            self.solved,
            self.win_rate() * 100.0
        )?;
        writeln!(f, "Attempts exhausted: {}", self.exhausted)?;
        if let Some(avg) = self.average_attempts() {
            writeln!(f, "Average attempts (solved): {avg:.2}")?;
        }
        let widest = self.histogram.values().copied().max().unwrap_or(0);
        for (attempts, count) in &self.histogram {
            let bar_len = if widest == 0 { 0 } else { count * 40 / widest };
            writeln!(f, "  {attempts}: {} {count}", "#".repeat(bar_len.max(1)))?;
        }
        if self.anomalies > 0 {
            writeln!(f, "Anomalies (empty candidate set): {}", self.anomalies)?;
        }
        if !self.failures.is_empty() {
            let shown: Vec<String> = self.failures.iter().take(10).map(Word::to_uppercase).collect();
            writeln!(f, "Missed secrets: {}", shown.join(", "))?;
        }
        Ok(())
    }
}
