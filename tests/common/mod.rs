//! Common test infrastructure
//!
//! Fixture transcripts and deterministic classifier fakes shared by the
//! end-to-end tests. Tests should only import from this module, not from
//! internal submodules.

mod classifiers;
mod fixtures;

// Public API - this is what tests import
pub use classifiers::{DeterministicClassifier, RejectedCredentialClassifier, UnreachableClassifier};
pub use fixtures::{PARSED_COUNT, SAMPLE_TRANSCRIPT, TARGET_COUNT, TARGET_SPEAKER};

use echomind::pipeline::PipelineConfig;
use echomind::scoring::{RetryPolicy, ScorerConfig};

/// Pipeline config pointed at the fixture speaker, with retry backoff
/// zeroed out so failure-path tests run instantly.
pub fn fixture_pipeline_config() -> PipelineConfig {
    let mut config = PipelineConfig::new(TARGET_SPEAKER);
    config.scorer = ScorerConfig {
        concurrency_limit: 4,
        retry: RetryPolicy {
            max_attempts: 3,
            initial_backoff_ms: 0,
            max_backoff_ms: 0,
            backoff_multiplier: 1.0,
        },
        toxicity_enabled: true,
    };
    config
}
