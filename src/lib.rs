//! EchoMind library
//!
//! Exploratory personality profiling from exported chat transcripts. This
//! library exposes the internal modules for testing and potential reuse.

pub mod analysis;
pub mod config;
pub mod pipeline;
pub mod profile;
pub mod report;
pub mod scoring;
pub mod transcript;

// Re-export commonly used types for convenience
pub use analysis::{Lexicons, StyleMetrics};
pub use config::{AppConfig, CliConfig, FileConfig};
pub use pipeline::{AnalysisError, AnalysisPipeline, AnalysisReport, PipelineConfig};
pub use profile::{TraitProfile, TypeMapping, WeightTable};
pub use report::ReportWriter;
pub use scoring::{Classifier, ClassifierError, RetryPolicy, Scorer, ScorerConfig};
pub use transcript::{SampleStrategy, Sampler, Utterance};
