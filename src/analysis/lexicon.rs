//! Marker-word lexicons used by the style metrics.
//!
//! The lexicons are configuration data: built-in Korean and English surface
//! forms by default, each overridable from a plain text file (one entry per
//! line, `#` comments). Matching is exact token equality against the
//! lowercased token stream, so entries must be surface forms as they appear
//! after tokenization.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;

const SELF_REFERENCE: &[&str] = &[
    "나", "나는", "나도", "내", "내가", "저", "저는", "제", "제가", "우리", "우린", "i", "i'm",
    "im", "me", "my", "mine", "myself",
];

const HEDGES: &[&str] = &[
    "아마", "아마도", "같다", "같아", "같은데", "듯", "글쎄", "일지도", "혹시", "maybe", "might",
    "could", "perhaps", "probably", "seems", "seem", "possibly",
];

const CERTAINTY: &[&str] = &[
    "반드시", "확실히", "틀림없이", "분명히", "분명", "정말", "진짜", "완전", "절대",
    "definitely", "always", "never", "certainly", "absolutely", "surely", "obviously",
];

/// The three marker lexicons consumed by the style metrics.
#[derive(Debug, Clone)]
pub struct Lexicons {
    pub self_reference: HashSet<String>,
    pub hedges: HashSet<String>,
    pub certainty: HashSet<String>,
}

impl Default for Lexicons {
    fn default() -> Self {
        let to_set = |words: &[&str]| words.iter().map(|w| w.to_string()).collect();
        Self {
            self_reference: to_set(SELF_REFERENCE),
            hedges: to_set(HEDGES),
            certainty: to_set(CERTAINTY),
        }
    }
}

fn load_word_list(path: &Path) -> Result<HashSet<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read lexicon file: {:?}", path))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.to_lowercase())
        .collect())
}

impl Lexicons {
    /// Replace individual lexicons from files; `None` keeps the built-in set.
    pub fn with_overrides(
        self_reference: Option<&Path>,
        hedges: Option<&Path>,
        certainty: Option<&Path>,
    ) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            self_reference: match self_reference {
                Some(path) => load_word_list(path)?,
                None => defaults.self_reference,
            },
            hedges: match hedges {
                Some(path) => load_word_list(path)?,
                None => defaults.hedges,
            },
            certainty: match certainty {
                Some(path) => load_word_list(path)?,
                None => defaults.certainty,
            },
        })
    }
}
