//! Deterministic classifier fakes for end-to-end tests.

use async_trait::async_trait;
use echomind::scoring::{Classifier, ClassifierError, SentimentLabel, SentimentScore};
use std::sync::atomic::{AtomicUsize, Ordering};

const POSITIVE_MARKERS: &[&str] = &["좋", "최고", "고마", "반갑", "만족", "축하"];
const NEGATIVE_MARKERS: &[&str] = &["싫", "짜증", "최악", "긴장"];
const TOXIC_MARKERS: &[&str] = &["바보", "멍청"];

/// Keyword-rule classifier: same text, same score, every time.
pub struct DeterministicClassifier;

#[async_trait]
impl Classifier for DeterministicClassifier {
    async fn classify_sentiment(&self, text: &str) -> Result<SentimentScore, ClassifierError> {
        let label = if POSITIVE_MARKERS.iter().any(|m| text.contains(m)) {
            SentimentLabel::Positive
        } else if NEGATIVE_MARKERS.iter().any(|m| text.contains(m)) {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        };
        Ok(SentimentScore {
            label,
            confidence: 0.9,
        })
    }

    async fn classify_toxicity(&self, text: &str) -> Result<f64, ClassifierError> {
        if TOXIC_MARKERS.iter().any(|m| text.contains(m)) {
            Ok(0.82)
        } else {
            Ok(0.03)
        }
    }
}

/// Simulates a backend that is down: every call fails with a transient
/// error. Counts calls so tests can assert on retry behavior.
pub struct UnreachableClassifier {
    pub calls: AtomicUsize,
}

impl UnreachableClassifier {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Classifier for UnreachableClassifier {
    async fn classify_sentiment(&self, _: &str) -> Result<SentimentScore, ClassifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ClassifierError::transient("connection timed out"))
    }

    async fn classify_toxicity(&self, _: &str) -> Result<f64, ClassifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ClassifierError::transient("connection timed out"))
    }
}

/// Simulates a rejected credential: fatal on the first call.
pub struct RejectedCredentialClassifier;

#[async_trait]
impl Classifier for RejectedCredentialClassifier {
    async fn classify_sentiment(&self, _: &str) -> Result<SentimentScore, ClassifierError> {
        Err(ClassifierError::fatal("invalid credential (status 401)"))
    }

    async fn classify_toxicity(&self, _: &str) -> Result<f64, ClassifierError> {
        Err(ClassifierError::fatal("invalid credential (status 401)"))
    }
}
