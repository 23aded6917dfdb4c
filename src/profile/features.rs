//! Normalized feature vector feeding trait inference.
//!
//! Each feature is mapped into [0, 1] so the weight table stays readable:
//! a weight is simply the number of points (out of 100) the feature can
//! contribute to a trait at full strength.

use crate::analysis::StyleMetrics;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Utterances longer than this many tokens on average count as maximally
/// verbose.
const VERBOSITY_CEILING_TOKENS: f64 = 30.0;

/// The observable features the trait model draws on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Type-token ratio of the utterance set.
    LexicalDiversity,
    /// Distinct-message ratio proxy.
    TopicDiversity,
    /// Mean utterance length against a fixed ceiling.
    Verbosity,
    /// Rate of utterances with first-person markers.
    SelfReference,
    /// Rate of utterances with hedge markers.
    Hedging,
    /// Rate of utterances with certainty markers.
    Certainty,
    /// Share of scored utterances classified positive.
    Positivity,
    /// Share of scored utterances classified negative.
    Negativity,
    /// Mean toxicity over scored utterances.
    Toxicity,
}

impl Feature {
    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::LexicalDiversity => "lexical_diversity",
            Feature::TopicDiversity => "topic_diversity",
            Feature::Verbosity => "verbosity",
            Feature::SelfReference => "self_reference",
            Feature::Hedging => "hedging",
            Feature::Certainty => "certainty",
            Feature::Positivity => "positivity",
            Feature::Negativity => "negativity",
            Feature::Toxicity => "toxicity",
        }
    }
}

/// All features of one run, each in [0, 1].
#[derive(Debug, Clone)]
pub struct FeatureVector(BTreeMap<Feature, f64>);

impl FeatureVector {
    pub fn from_metrics(metrics: &StyleMetrics) -> Self {
        let mut features = BTreeMap::new();
        features.insert(
            Feature::LexicalDiversity,
            metrics.type_token_ratio.unwrap_or(0.0),
        );
        features.insert(Feature::TopicDiversity, metrics.topic_diversity);
        features.insert(
            Feature::Verbosity,
            (metrics.avg_tokens_per_utterance / VERBOSITY_CEILING_TOKENS).min(1.0),
        );
        features.insert(Feature::SelfReference, metrics.self_reference_rate);
        features.insert(Feature::Hedging, metrics.hedge_rate);
        features.insert(Feature::Certainty, metrics.certainty_rate);
        features.insert(Feature::Positivity, metrics.sentiment.positive_ratio);
        features.insert(Feature::Negativity, metrics.sentiment.negative_ratio);
        features.insert(Feature::Toxicity, metrics.avg_toxicity);
        Self(features)
    }

    pub fn get(&self, feature: Feature) -> f64 {
        self.0.get(&feature).copied().unwrap_or(0.0)
    }
}
