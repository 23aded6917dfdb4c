//! Reproducible sampling of utterances for expensive scoring.
//!
//! When a transcript exceeds the configured budget, a subset is drawn so that
//! the external classifier calls stay bounded. The draw is stratified over
//! the message sequence: the sequence is divided into equal-span buckets and
//! one utterance is drawn uniformly from each, preserving temporal spread
//! instead of truncating to a prefix.

use super::Utterance;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

/// How the sample budget is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum SampleStrategy {
    /// Keep at most `count` utterances.
    FixedCount { count: usize },
    /// Keep at most `ratio` of the utterances (0.0 to 1.0).
    Percentage { ratio: f64 },
}

impl SampleStrategy {
    fn target(&self, total: usize) -> usize {
        match *self {
            SampleStrategy::FixedCount { count } => count,
            SampleStrategy::Percentage { ratio } => {
                (total as f64 * ratio.clamp(0.0, 1.0)).ceil() as usize
            }
        }
    }
}

/// Seeded, order-preserving utterance sampler.
#[derive(Debug, Clone)]
pub struct Sampler {
    strategy: SampleStrategy,
    seed: u64,
}

impl Sampler {
    pub fn new(strategy: SampleStrategy, seed: u64) -> Self {
        Self { strategy, seed }
    }

    /// Draw the sample. Identity when the input already fits the budget.
    ///
    /// The output is ordered by ascending sequence index and is always a
    /// subsequence of the input. Equal seeds produce equal output.
    pub fn sample(&self, utterances: Vec<Utterance>) -> Vec<Utterance> {
        let total = utterances.len();
        let target = self.strategy.target(total);
        if total <= target || target == 0 {
            // target == 0 would mean an empty report; treat it as "no limit"
            // rather than silently discarding everything.
            return utterances;
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut picked = Vec::with_capacity(target);
        for i in 0..target {
            let start = i * total / target;
            let end = (i + 1) * total / target;
            let choice = rng.random_range(start..end);
            picked.push(utterances[choice].clone());
        }
        picked
    }
}
