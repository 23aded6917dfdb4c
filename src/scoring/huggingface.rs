//! Sentiment adapter for the Hugging Face Inference API.
//!
//! Posts each text to a hosted multilingual sentiment model and normalizes
//! the best-scoring class into [`SentimentScore`]. Requests are spaced by a
//! minimum interval to stay inside the free-tier quota.

use super::{ClassifierError, SentimentLabel, SentimentScore};
use anyhow::Result;
use serde_json::{json, Value};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

const DEFAULT_ENDPOINT: &str =
    "https://router.huggingface.co/hf-inference/models/cardiffnlp/twitter-xlm-roberta-base-sentiment";
/// The hosted model rejects very long inputs; the tail adds little signal.
const MAX_INPUT_CHARS: usize = 800;
const MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(200);

pub struct HuggingFaceSentimentClient {
    client: reqwest::Client,
    endpoint: String,
    token: String,
    last_request: Mutex<Option<Instant>>,
}

impl HuggingFaceSentimentClient {
    pub fn new(token: String, endpoint: Option<String>, timeout_sec: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_sec))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            token,
            last_request: Mutex::new(None),
        })
    }

    async fn rate_limit(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < MIN_REQUEST_INTERVAL {
                tokio::time::sleep(MIN_REQUEST_INTERVAL - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }

    pub async fn classify(&self, text: &str) -> Result<SentimentScore, ClassifierError> {
        self.rate_limit().await;

        let truncated: String = text.chars().take(MAX_INPUT_CHARS).collect();
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&json!({ "inputs": truncated }))
            .send()
            .await
            .map_err(|e| ClassifierError::transient(format!("sentiment request failed: {e}")))?;

        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(ClassifierError::fatal(format!(
                "sentiment backend rejected credentials (status {status})"
            )));
        }
        if !status.is_success() {
            return Err(ClassifierError::transient(format!(
                "sentiment backend returned status {status}"
            )));
        }

        let body: Value = response.json().await.map_err(|e| {
            ClassifierError::transient(format!("sentiment response was not JSON: {e}"))
        })?;
        parse_response(&body).ok_or_else(|| {
            ClassifierError::transient("unrecognized sentiment response shape".to_string())
        })
    }
}

/// The API returns either `[{label, score}, ...]` or that list wrapped in
/// one more array level. Pick the best-scoring recognized class.
fn parse_response(body: &Value) -> Option<SentimentScore> {
    let outer = body.as_array()?;
    let classes = match outer.first()? {
        Value::Array(inner) => inner,
        _ => outer,
    };

    let mut best: Option<SentimentScore> = None;
    for class in classes {
        let label = class.get("label")?.as_str()?;
        let score = class.get("score")?.as_f64()?;
        let Some(label) = SentimentLabel::from_api_label(label) else {
            continue;
        };
        if best.map_or(true, |b| score > b.confidence) {
            best = Some(SentimentScore {
                label,
                confidence: score,
            });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flat_response() {
        let body = json!([
            {"label": "negative", "score": 0.1},
            {"label": "neutral", "score": 0.2},
            {"label": "positive", "score": 0.7}
        ]);

        let score = parse_response(&body).unwrap();
        assert_eq!(score.label, SentimentLabel::Positive);
        assert!((score.confidence - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_parse_nested_response() {
        let body = json!([[
            {"label": "NEGATIVE", "score": 0.8},
            {"label": "POSITIVE", "score": 0.2}
        ]]);

        let score = parse_response(&body).unwrap();
        assert_eq!(score.label, SentimentLabel::Negative);
    }

    #[test]
    fn test_parse_label_convention() {
        let body = json!([
            {"label": "LABEL_0", "score": 0.15},
            {"label": "LABEL_1", "score": 0.6},
            {"label": "LABEL_2", "score": 0.25}
        ]);

        let score = parse_response(&body).unwrap();
        assert_eq!(score.label, SentimentLabel::Neutral);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_response(&json!({"error": "loading"})).is_none());
        assert!(parse_response(&json!([])).is_none());
        assert!(parse_response(&json!([{"label": "confused", "score": 1.0}])).is_none());
    }
}
