//! Concurrent scoring of sampled utterances.
//!
//! Each utterance needs one call per capability. Calls run concurrently up
//! to a configured limit; every call retries transient failures with
//! exponential backoff and degrades to an unavailable score on exhaustion.
//! Fatal errors (bad credential) abort the whole scoring phase immediately.

use super::{Classifier, ClassifierError, ClassifierErrorKind, RetryPolicy, UtteranceScore};
use crate::transcript::Utterance;
use futures::stream::{self, StreamExt};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

/// Settings for one scoring phase.
#[derive(Debug, Clone)]
pub struct ScorerConfig {
    /// Maximum classifier calls in flight at once.
    pub concurrency_limit: usize,
    pub retry: RetryPolicy,
    /// Disable to skip toxicity calls entirely (backend not configured).
    pub toxicity_enabled: bool,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            concurrency_limit: 4,
            retry: RetryPolicy::default(),
            toxicity_enabled: true,
        }
    }
}

/// Drives the classifier over an utterance set.
pub struct Scorer {
    classifier: Arc<dyn Classifier>,
    config: ScorerConfig,
}

/// Retry `call` per the policy. `Ok(None)` means the capability degraded to
/// unavailable after exhausting its attempts; only fatal errors propagate.
async fn with_retry<T, F, Fut>(
    retry: &RetryPolicy,
    what: &str,
    index: usize,
    mut call: F,
) -> Result<Option<T>, ClassifierError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ClassifierError>>,
{
    let mut attempts = 0u32;
    loop {
        match call().await {
            Ok(value) => return Ok(Some(value)),
            Err(error) if error.kind == ClassifierErrorKind::Fatal => return Err(error),
            Err(error) => {
                attempts += 1;
                if !retry.should_retry(&error, attempts) {
                    warn!(
                        "{} for utterance {} unavailable after {} attempts: {}",
                        what, index, attempts, error
                    );
                    return Ok(None);
                }
                let backoff = retry.backoff(attempts - 1);
                debug!(
                    "{} for utterance {} failed (attempt {}), retrying in {:?}: {}",
                    what, index, attempts, backoff, error
                );
                tokio::time::sleep(backoff).await;
            }
        }
    }
}

impl Scorer {
    pub fn new(classifier: Arc<dyn Classifier>, config: ScorerConfig) -> Self {
        Self { classifier, config }
    }

    /// Score every utterance, waiting for all outstanding calls (or their
    /// bounded-retry failures) before returning. Results are ordered by
    /// utterance index regardless of completion order.
    pub async fn score_all(
        &self,
        utterances: &[Utterance],
    ) -> Result<Vec<UtteranceScore>, ClassifierError> {
        self.score_all_with(utterances, |_| {}).await
    }

    /// Like [`score_all`](Self::score_all) but invoking `on_progress` with
    /// the completed count after each utterance finishes.
    pub async fn score_all_with(
        &self,
        utterances: &[Utterance],
        on_progress: impl Fn(usize),
    ) -> Result<Vec<UtteranceScore>, ClassifierError> {
        let concurrency = self.config.concurrency_limit.max(1);

        let tasks = utterances.iter().map(|utterance| {
            let classifier = self.classifier.clone();
            let retry = self.config.retry.clone();
            let toxicity_enabled = self.config.toxicity_enabled;
            let index = utterance.index;
            let text = utterance.text.clone();
            async move {
                let sentiment = with_retry(&retry, "sentiment", index, || {
                    classifier.classify_sentiment(&text)
                })
                .await?;

                let toxicity = if toxicity_enabled {
                    with_retry(&retry, "toxicity", index, || {
                        classifier.classify_toxicity(&text)
                    })
                    .await?
                } else {
                    None
                };

                Ok::<UtteranceScore, ClassifierError>(UtteranceScore {
                    utterance_index: index,
                    sentiment,
                    toxicity,
                })
            }
        });

        let mut in_flight = stream::iter(tasks).buffer_unordered(concurrency);
        let mut scores = Vec::with_capacity(utterances.len());
        while let Some(result) = in_flight.next().await {
            // A fatal error drops the stream here, cancelling whatever is
            // still in flight; partial scores are discarded with it.
            scores.push(result?);
            on_progress(scores.len());
        }

        scores.sort_by_key(|s| s.utterance_index);
        Ok(scores)
    }
}
