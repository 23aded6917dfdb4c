//! Sentiment and toxicity scoring against external classifiers.
//!
//! The two capabilities are behind the [`Classifier`] trait so tests can run
//! against a deterministic in-process implementation while production uses
//! the remote adapters.

mod huggingface;
mod perspective;
mod retry_policy;
mod scorer;

pub use huggingface::HuggingFaceSentimentClient;
pub use perspective::PerspectiveToxicityClient;
pub use retry_policy::RetryPolicy;
pub use scorer::{Scorer, ScorerConfig};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sentiment polarity classes the backends are normalized into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Map a backend label to the common scale. Handles both spelled-out
    /// labels (any casing) and the `LABEL_{0,1,2}` convention of sentiment
    /// models that publish unnamed classes.
    pub fn from_api_label(label: &str) -> Option<Self> {
        match label.to_uppercase().as_str() {
            "POSITIVE" | "POS" | "LABEL_2" => Some(SentimentLabel::Positive),
            "NEGATIVE" | "NEG" | "LABEL_0" => Some(SentimentLabel::Negative),
            "NEUTRAL" | "NEU" | "LABEL_1" => Some(SentimentLabel::Neutral),
            _ => None,
        }
    }

    /// Polarity on a [-1, 1] scale.
    pub fn polarity(&self) -> f64 {
        match self {
            SentimentLabel::Positive => 1.0,
            SentimentLabel::Neutral => 0.0,
            SentimentLabel::Negative => -1.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }
}

/// A sentiment classification with the winning class confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentScore {
    pub label: SentimentLabel,
    pub confidence: f64,
}

/// Classifier outputs for one sampled utterance.
///
/// `None` for a capability means it degraded to unavailable after retry
/// exhaustion (or was never configured); the run continues without it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UtteranceScore {
    pub utterance_index: usize,
    pub sentiment: Option<SentimentScore>,
    pub toxicity: Option<f64>,
}

/// Whether a classifier failure is worth retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierErrorKind {
    /// Network hiccup, timeout, rate limit, 5xx. Retried with backoff.
    Transient,
    /// Invalid credential or request the service will never accept.
    /// Never retried, surfaced to the caller immediately.
    Fatal,
}

/// Error from a classifier capability.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClassifierError {
    pub kind: ClassifierErrorKind,
    pub message: String,
}

impl ClassifierError {
    pub fn transient(message: impl Into<String>) -> Self {
        Self {
            kind: ClassifierErrorKind::Transient,
            message: message.into(),
        }
    }

    pub fn fatal(message: impl Into<String>) -> Self {
        Self {
            kind: ClassifierErrorKind::Fatal,
            message: message.into(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.kind == ClassifierErrorKind::Transient
    }
}

/// The external classification capabilities the pipeline consumes.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify_sentiment(&self, text: &str) -> Result<SentimentScore, ClassifierError>;

    /// Toxicity score in [0, 1].
    async fn classify_toxicity(&self, text: &str) -> Result<f64, ClassifierError>;
}

/// Production classifier: Hugging Face for sentiment, Perspective for
/// toxicity. The toxicity backend is optional; when absent the scorer must
/// be configured with toxicity disabled so the capability is never called.
pub struct RemoteClassifier {
    sentiment: HuggingFaceSentimentClient,
    toxicity: Option<PerspectiveToxicityClient>,
}

impl RemoteClassifier {
    pub fn new(
        sentiment: HuggingFaceSentimentClient,
        toxicity: Option<PerspectiveToxicityClient>,
    ) -> Self {
        Self { sentiment, toxicity }
    }

    pub fn has_toxicity_backend(&self) -> bool {
        self.toxicity.is_some()
    }
}

#[async_trait]
impl Classifier for RemoteClassifier {
    async fn classify_sentiment(&self, text: &str) -> Result<SentimentScore, ClassifierError> {
        self.sentiment.classify(text).await
    }

    async fn classify_toxicity(&self, text: &str) -> Result<f64, ClassifierError> {
        match &self.toxicity {
            Some(client) => client.classify(text).await,
            None => Err(ClassifierError::fatal(
                "toxicity backend not configured".to_string(),
            )),
        }
    }
}
