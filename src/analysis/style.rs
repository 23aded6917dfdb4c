//! Aggregate style metrics over a set of utterances.
//!
//! All rates are computed over the given set only; values are comparable
//! within one run, not across corpora.

use super::lexicon::Lexicons;
use super::tokenizer::{sentence_endings, tokenize, SentenceEnding};
use crate::scoring::UtteranceScore;
use crate::transcript::Utterance;
use serde::Serialize;
use std::collections::HashSet;

/// Frequency of sentence-final marker categories.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SentenceEndingDistribution {
    pub declarative: usize,
    pub interrogative: usize,
    pub exclamatory: usize,
    pub unmarked: usize,
}

impl SentenceEndingDistribution {
    pub fn total(&self) -> usize {
        self.declarative + self.interrogative + self.exclamatory + self.unmarked
    }

    /// Fraction of sentences ending in a question mark.
    pub fn interrogative_ratio(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.interrogative as f64 / total as f64,
        }
    }
}

/// Sentiment distribution over the scored subset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentSummary {
    pub positive_ratio: f64,
    pub negative_ratio: f64,
    pub neutral_ratio: f64,
    /// Mean of per-utterance polarity (+1 positive, 0 neutral, -1 negative).
    pub mean_polarity: f64,
}

impl Default for SentimentSummary {
    /// The degraded default when no score is available: everything neutral.
    fn default() -> Self {
        Self {
            positive_ratio: 0.0,
            negative_ratio: 0.0,
            neutral_ratio: 1.0,
            mean_polarity: 0.0,
        }
    }
}

/// Aggregate stylistic and affective metrics for one utterance set.
#[derive(Debug, Clone, Serialize)]
pub struct StyleMetrics {
    pub utterance_count: usize,
    pub token_count: usize,
    /// Unique / total tokens. None for a tokenless set (no divide-by-zero).
    pub type_token_ratio: Option<f64>,
    pub avg_tokens_per_utterance: f64,
    /// Fraction of utterances containing a first-person marker.
    pub self_reference_rate: f64,
    /// Fraction of utterances containing a hedge marker.
    pub hedge_rate: f64,
    /// Fraction of utterances containing a certainty marker.
    pub certainty_rate: f64,
    pub sentence_endings: SentenceEndingDistribution,
    /// Distinct-message ratio mapped into [0.5, 1.0]; crude proxy for how
    /// much the speaker repeats themselves.
    pub topic_diversity: f64,
    pub sentiment: SentimentSummary,
    /// Mean toxicity over utterances with an available toxicity score.
    pub avg_toxicity: f64,
    /// Fraction of the set with an available sentiment score. 1.0 on a fully
    /// scored run, 0.0 when scoring was skipped or exhausted everywhere.
    pub scored_fraction: f64,
}

impl StyleMetrics {
    /// Compute metrics over `utterances`, merging in whatever scores exist.
    ///
    /// Works with an empty score slice: affective fields fall back to
    /// neutral/zero and `scored_fraction` records the degradation.
    pub fn compute(
        utterances: &[Utterance],
        scores: &[UtteranceScore],
        lexicons: &Lexicons,
    ) -> Self {
        let utterance_count = utterances.len();

        let mut token_count = 0usize;
        let mut unique_tokens: HashSet<String> = HashSet::new();
        let mut self_reference_hits = 0usize;
        let mut hedge_hits = 0usize;
        let mut certainty_hits = 0usize;
        let mut endings = SentenceEndingDistribution::default();
        let mut distinct_texts: HashSet<&str> = HashSet::new();

        for utterance in utterances {
            let tokens = tokenize(&utterance.text);
            token_count += tokens.len();

            let mut has_self_reference = false;
            let mut has_hedge = false;
            let mut has_certainty = false;
            for token in tokens {
                has_self_reference |= lexicons.self_reference.contains(&token);
                has_hedge |= lexicons.hedges.contains(&token);
                has_certainty |= lexicons.certainty.contains(&token);
                unique_tokens.insert(token);
            }
            self_reference_hits += has_self_reference as usize;
            hedge_hits += has_hedge as usize;
            certainty_hits += has_certainty as usize;

            for ending in sentence_endings(&utterance.text) {
                match ending {
                    SentenceEnding::Declarative => endings.declarative += 1,
                    SentenceEnding::Interrogative => endings.interrogative += 1,
                    SentenceEnding::Exclamatory => endings.exclamatory += 1,
                    SentenceEnding::Unmarked => endings.unmarked += 1,
                }
            }

            distinct_texts.insert(utterance.text.as_str());
        }

        let rate = |hits: usize| match utterance_count {
            0 => 0.0,
            n => hits as f64 / n as f64,
        };

        let type_token_ratio = if token_count > 0 {
            Some(unique_tokens.len() as f64 / token_count as f64)
        } else {
            None
        };

        let topic_diversity = match utterance_count {
            0 => 0.0,
            n => (0.5 + 0.5 * distinct_texts.len() as f64 / n as f64).min(1.0),
        };

        let (sentiment, avg_toxicity, scored_fraction) =
            summarize_scores(scores, utterance_count);

        Self {
            utterance_count,
            token_count,
            type_token_ratio,
            avg_tokens_per_utterance: match utterance_count {
                0 => 0.0,
                n => token_count as f64 / n as f64,
            },
            self_reference_rate: rate(self_reference_hits),
            hedge_rate: rate(hedge_hits),
            certainty_rate: rate(certainty_hits),
            sentence_endings: endings,
            topic_diversity,
            sentiment,
            avg_toxicity,
            scored_fraction,
        }
    }
}

fn summarize_scores(
    scores: &[UtteranceScore],
    utterance_count: usize,
) -> (SentimentSummary, f64, f64) {
    let sentiments: Vec<_> = scores.iter().filter_map(|s| s.sentiment).collect();
    let toxicities: Vec<f64> = scores.iter().filter_map(|s| s.toxicity).collect();

    let sentiment = if sentiments.is_empty() {
        SentimentSummary::default()
    } else {
        let n = sentiments.len() as f64;
        let positive = sentiments
            .iter()
            .filter(|s| s.label == crate::scoring::SentimentLabel::Positive)
            .count() as f64;
        let negative = sentiments
            .iter()
            .filter(|s| s.label == crate::scoring::SentimentLabel::Negative)
            .count() as f64;
        let mean_polarity = sentiments.iter().map(|s| s.label.polarity()).sum::<f64>() / n;
        SentimentSummary {
            positive_ratio: positive / n,
            negative_ratio: negative / n,
            neutral_ratio: (n - positive - negative) / n,
            mean_polarity,
        }
    };

    let avg_toxicity = if toxicities.is_empty() {
        0.0
    } else {
        toxicities.iter().sum::<f64>() / toxicities.len() as f64
    };

    let scored_fraction = match utterance_count {
        0 => 0.0,
        n => sentiments.len() as f64 / n as f64,
    };

    (sentiment, avg_toxicity, scored_fraction)
}
