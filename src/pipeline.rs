//! The analysis pipeline: raw transcript in, profile report out.
//!
//! Data flows strictly one way: raw text → utterances → speaker-filtered →
//! sampled → per-utterance scores → aggregate metrics → trait profile →
//! optional type mapping. Each run owns its collections; nothing is shared
//! across runs.

use crate::analysis::{Lexicons, StyleMetrics};
use crate::profile::{map_type, TraitProfile, TypeMapping, WeightTable};
use crate::scoring::{Classifier, ClassifierError, Scorer, ScorerConfig, UtteranceScore};
use crate::transcript::{
    filter_speaker, parse_transcript, EmptySelectionError, ParseError, SampleStrategy, Sampler,
    Utterance,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that abort an analysis run.
///
/// Per-utterance scoring failures are not in here: those degrade the
/// affected scores and surface through `StyleMetrics::scored_fraction`.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    EmptySelection(#[from] EmptySelectionError),

    /// A classifier backend failed in a way retrying cannot fix, e.g. a
    /// rejected credential.
    #[error("external classifier failure: {0}")]
    ExternalService(#[from] ClassifierError),
}

/// Per-run settings for the pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub target_speaker: String,
    pub sample_strategy: SampleStrategy,
    pub sample_seed: u64,
    pub scorer: ScorerConfig,
    pub lexicons: Lexicons,
    pub trait_weights: WeightTable,
    /// Derive the categorical type label on top of the Big-Five estimate.
    pub type_mapping: bool,
}

impl PipelineConfig {
    pub fn new(target_speaker: impl Into<String>) -> Self {
        Self {
            target_speaker: target_speaker.into(),
            sample_strategy: SampleStrategy::FixedCount { count: 200 },
            sample_seed: 42,
            scorer: ScorerConfig::default(),
            lexicons: Lexicons::default(),
            trait_weights: WeightTable::default(),
            type_mapping: true,
        }
    }
}

/// Everything one run produces, ready for serialization.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub target_speaker: String,
    /// Utterances parsed from the whole transcript.
    pub parsed_count: usize,
    /// Utterances attributed to the target speaker.
    pub selected_count: usize,
    /// The sampled utterances the analysis actually ran on.
    pub utterances: Vec<Utterance>,
    pub scores: Vec<UtteranceScore>,
    pub style: StyleMetrics,
    pub profile: TraitProfile,
    pub type_mapping: Option<TypeMapping>,
}

/// One configured analysis run.
///
/// `classifier` is `None` for offline runs: scoring is skipped entirely and
/// the profile is derived from style metrics alone.
pub struct AnalysisPipeline {
    config: PipelineConfig,
    classifier: Option<Arc<dyn Classifier>>,
}

impl AnalysisPipeline {
    pub fn new(config: PipelineConfig, classifier: Option<Arc<dyn Classifier>>) -> Self {
        Self { config, classifier }
    }

    /// Run the full pipeline over a raw transcript.
    pub async fn analyze(&self, transcript: &str) -> Result<AnalysisReport, AnalysisError> {
        self.analyze_with_progress(transcript, |_, _| {}).await
    }

    /// Like [`analyze`](Self::analyze), reporting scoring progress as
    /// `(scored_so_far, total_to_score)`.
    pub async fn analyze_with_progress(
        &self,
        transcript: &str,
        on_progress: impl Fn(usize, usize),
    ) -> Result<AnalysisReport, AnalysisError> {
        let parsed = parse_transcript(transcript)?;
        info!("Parsed {} utterances", parsed.len());

        let selected = filter_speaker(&parsed, &self.config.target_speaker)?;
        info!(
            "Selected {} utterances for speaker '{}'",
            selected.len(),
            self.config.target_speaker
        );

        let sampler = Sampler::new(self.config.sample_strategy, self.config.sample_seed);
        let parsed_count = parsed.len();
        let selected_count = selected.len();
        let sampled = sampler.sample(selected);
        if sampled.len() < selected_count {
            info!(
                "Sampled {} of {} utterances for scoring",
                sampled.len(),
                selected_count
            );
        }

        let scores = match &self.classifier {
            Some(classifier) => {
                let scorer = Scorer::new(classifier.clone(), self.config.scorer.clone());
                let total = sampled.len();
                scorer
                    .score_all_with(&sampled, |done| on_progress(done, total))
                    .await?
            }
            None => {
                info!("Scoring disabled; style metrics only");
                Vec::new()
            }
        };

        let style = StyleMetrics::compute(&sampled, &scores, &self.config.lexicons);
        if style.scored_fraction < 1.0 && self.classifier.is_some() {
            warn!(
                "Only {:.0}% of sampled utterances were scored; profile confidence is reduced",
                style.scored_fraction * 100.0
            );
        }

        let profile = TraitProfile::infer(&style, &self.config.trait_weights);
        let type_mapping = self.config.type_mapping.then(|| map_type(&profile));

        Ok(AnalysisReport {
            target_speaker: self.config.target_speaker.clone(),
            parsed_count,
            selected_count,
            utterances: sampled,
            scores,
            style,
            profile,
            type_mapping,
        })
    }
}
