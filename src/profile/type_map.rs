//! Threshold mapping from the Big-Five estimate to an MBTI-style label.
//!
//! Each dimension thresholds one trait at the 0-100 midpoint. This is a
//! folk-psychology convenience on top of an already exploratory estimate —
//! not validated against any typed instrument — and is clearly labeled as
//! such in the report.

use super::inference::TraitProfile;
use serde::Serialize;

const MIDPOINT: f64 = 50.0;

/// Why one dimension landed on its letter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionRationale {
    /// E.g. "E/I".
    pub dimension: &'static str,
    pub letter: char,
    /// Trait the dimension thresholds on.
    pub trait_name: &'static str,
    /// Distance from the midpoint; small margins mean a coin-flip call.
    pub margin: f64,
    pub explanation: String,
}

/// Categorical type label with per-dimension provenance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeMapping {
    pub label: String,
    pub rationale: Vec<DimensionRationale>,
}

fn decide(
    dimension: &'static str,
    trait_name: &'static str,
    value: f64,
    above: char,
    below: char,
    above_reads_as: &str,
    below_reads_as: &str,
) -> DimensionRationale {
    let letter = if value >= MIDPOINT { above } else { below };
    let margin = (value - MIDPOINT).abs();
    let side = if value >= MIDPOINT { "above" } else { "below" };
    let reads_as = if value >= MIDPOINT {
        above_reads_as
    } else {
        below_reads_as
    };
    DimensionRationale {
        dimension,
        letter,
        trait_name,
        margin,
        explanation: format!(
            "{} {:.1} is {:.1} points {} the midpoint: {}",
            trait_name, value, margin, side, reads_as
        ),
    }
}

/// Map a trait profile onto the four-letter label.
pub fn map_type(profile: &TraitProfile) -> TypeMapping {
    let rationale = vec![
        decide(
            "E/I",
            "extraversion",
            profile.extraversion.value,
            'E',
            'I',
            "talkative, self-referential messaging reads extraverted",
            "sparser, less self-referential messaging reads introverted",
        ),
        decide(
            "N/S",
            "openness",
            profile.openness.value,
            'N',
            'S',
            "varied vocabulary and topics read intuitive",
            "repeated, familiar wording reads sensing",
        ),
        decide(
            "F/T",
            "agreeableness",
            profile.agreeableness.value,
            'F',
            'T',
            "warm, low-toxicity messaging reads feeling",
            "blunter, less accommodating messaging reads thinking",
        ),
        decide(
            "J/P",
            "conscientiousness",
            profile.conscientiousness.value,
            'J',
            'P',
            "assertive, certain phrasing reads judging",
            "hedged, open-ended phrasing reads perceiving",
        ),
    ];

    TypeMapping {
        label: rationale.iter().map(|r| r.letter).collect(),
        rationale,
    }
}
