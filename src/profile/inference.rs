//! Weighted trait inference from aggregate style metrics.
//!
//! An exploratory estimate, not a psychometric instrument. The model is a
//! transparent linear combination so every score can be traced back to its
//! inputs; each trait carries a full contribution breakdown.

use super::features::{Feature, FeatureVector};
use super::weights::{TraitWeights, WeightTable};
use crate::analysis::StyleMetrics;
use serde::Serialize;

/// Runs with less than this fraction of utterances scored are flagged as
/// low confidence.
const LOW_CONFIDENCE_SCORED_FRACTION: f64 = 0.5;

/// One feature's part in a trait score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureContribution {
    pub feature: Feature,
    /// Normalized feature value in [0, 1].
    pub value: f64,
    /// Points per unit of feature value.
    pub weight: f64,
    /// `value * weight`, the points actually contributed.
    pub points: f64,
}

/// A single trait estimate with its provenance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraitScore {
    /// Final score on the 0-100 scale.
    pub value: f64,
    pub baseline: f64,
    /// Largest contributions first.
    pub contributions: Vec<FeatureContribution>,
}

impl TraitScore {
    fn compute(weights: &TraitWeights, features: &FeatureVector) -> Self {
        let mut contributions: Vec<FeatureContribution> = weights
            .weights
            .iter()
            .map(|(&feature, &weight)| {
                let value = features.get(feature);
                FeatureContribution {
                    feature,
                    value,
                    weight,
                    points: value * weight,
                }
            })
            .collect();
        contributions.sort_by(|a, b| {
            b.points
                .abs()
                .partial_cmp(&a.points.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let raw: f64 = weights.baseline + contributions.iter().map(|c| c.points).sum::<f64>();
        Self {
            value: raw.clamp(0.0, 100.0),
            baseline: weights.baseline,
            contributions,
        }
    }
}

/// The Big-Five estimate for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraitProfile {
    pub openness: TraitScore,
    pub conscientiousness: TraitScore,
    pub extraversion: TraitScore,
    pub agreeableness: TraitScore,
    pub neuroticism: TraitScore,
    /// Always true: this is a text-based exploratory estimate.
    pub exploratory: bool,
    /// Set when too few utterances had sentiment/toxicity scores available.
    pub low_confidence: bool,
}

impl TraitProfile {
    /// Deterministically derive the profile from aggregate metrics.
    pub fn infer(metrics: &StyleMetrics, table: &WeightTable) -> Self {
        let features = FeatureVector::from_metrics(metrics);
        Self {
            openness: TraitScore::compute(&table.openness, &features),
            conscientiousness: TraitScore::compute(&table.conscientiousness, &features),
            extraversion: TraitScore::compute(&table.extraversion, &features),
            agreeableness: TraitScore::compute(&table.agreeableness, &features),
            neuroticism: TraitScore::compute(&table.neuroticism, &features),
            exploratory: true,
            low_confidence: metrics.scored_fraction < LOW_CONFIDENCE_SCORED_FRACTION,
        }
    }

    /// Traits with their display names, in canonical order.
    pub fn iter(&self) -> [(&'static str, &TraitScore); 5] {
        [
            ("openness", &self.openness),
            ("conscientiousness", &self.conscientiousness),
            ("extraversion", &self.extraversion),
            ("agreeableness", &self.agreeableness),
            ("neuroticism", &self.neuroticism),
        ]
    }
}
