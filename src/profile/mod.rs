//! Trait inference: normalized features, weight tables, Big-Five estimate
//! and the optional categorical type mapping.

mod features;
mod inference;
mod type_map;
mod weights;

pub use features::{Feature, FeatureVector};
pub use inference::{FeatureContribution, TraitProfile, TraitScore};
pub use type_map::{map_type, DimensionRationale, TypeMapping};
pub use weights::{TraitWeights, WeightTable};
