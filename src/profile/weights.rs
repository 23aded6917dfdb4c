//! The trait weight table.
//!
//! Hand-tuned heuristic constants, deliberately kept as configuration data
//! rather than arithmetic so they can be audited and swapped per run. A
//! trait score is `baseline + Σ weight × feature`, clamped to [0, 100];
//! negative weights express "less of this feature reads as more of the
//! trait".

use super::features::Feature;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Weighted model for a single trait.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitWeights {
    /// Points granted before any feature is considered.
    pub baseline: f64,
    /// Points per feature at full strength (feature value 1.0).
    pub weights: BTreeMap<Feature, f64>,
}

impl TraitWeights {
    fn new(baseline: f64, weights: &[(Feature, f64)]) -> Self {
        Self {
            baseline,
            weights: weights.iter().copied().collect(),
        }
    }
}

/// Weight tables for all five traits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightTable {
    pub openness: TraitWeights,
    pub conscientiousness: TraitWeights,
    pub extraversion: TraitWeights,
    pub agreeableness: TraitWeights,
    pub neuroticism: TraitWeights,
}

impl Default for WeightTable {
    fn default() -> Self {
        Self {
            openness: TraitWeights::new(
                0.0,
                &[
                    (Feature::LexicalDiversity, 45.0),
                    (Feature::TopicDiversity, 35.0),
                    (Feature::Verbosity, 20.0),
                ],
            ),
            conscientiousness: TraitWeights::new(
                30.0,
                &[
                    (Feature::Certainty, 50.0),
                    (Feature::Toxicity, -30.0),
                    (Feature::Positivity, 20.0),
                ],
            ),
            extraversion: TraitWeights::new(
                0.0,
                &[
                    (Feature::SelfReference, 50.0),
                    (Feature::Positivity, 30.0),
                    (Feature::Verbosity, 20.0),
                ],
            ),
            agreeableness: TraitWeights::new(
                75.0,
                &[
                    (Feature::Toxicity, -55.0),
                    (Feature::Positivity, 25.0),
                    (Feature::Hedging, -20.0),
                ],
            ),
            neuroticism: TraitWeights::new(
                20.0,
                &[
                    (Feature::Negativity, 60.0),
                    (Feature::Hedging, 20.0),
                    (Feature::Certainty, -20.0),
                ],
            ),
        }
    }
}
