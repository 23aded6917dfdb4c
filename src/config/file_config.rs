use crate::profile::WeightTable;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Core settings (can override CLI)
    pub target_speaker: Option<String>,
    pub out_dir: Option<String>,
    pub language: Option<String>,
    pub type_mapping: Option<bool>,

    // Sampling
    pub sample_size: Option<usize>,
    /// Takes precedence over sample_size when set (0.0 to 1.0).
    pub sample_percentage: Option<f64>,
    pub sample_seed: Option<u64>,

    // Scoring
    pub retry_limit: Option<u32>,
    pub initial_backoff_ms: Option<u64>,
    pub max_backoff_ms: Option<u64>,
    pub backoff_multiplier: Option<f64>,
    pub concurrency_limit: Option<usize>,
    pub request_timeout_sec: Option<u64>,

    // Backends
    pub hf_token: Option<String>,
    pub sentiment_endpoint: Option<String>,
    pub perspective_api_key: Option<String>,
    pub toxicity_endpoint: Option<String>,

    // Feature configs
    pub lexicons: Option<LexiconPathsConfig>,
    pub trait_weights: Option<WeightTable>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct LexiconPathsConfig {
    pub self_reference: Option<String>,
    pub hedges: Option<String>,
    pub certainty: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
