//! Toxicity adapter for the Google Perspective API.
//!
//! One request per text, asking for the TOXICITY attribute summary score.
//! The free tier allows roughly 1 QPS, so requests are spaced accordingly.

use super::ClassifierError;
use anyhow::Result;
use serde_json::{json, Value};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

const DEFAULT_ENDPOINT: &str =
    "https://commentanalyzer.googleapis.com/v1alpha1/comments:analyze";
const MAX_INPUT_CHARS: usize = 2000;
const MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(1_050);

pub struct PerspectiveToxicityClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    language: String,
    last_request: Mutex<Option<Instant>>,
}

impl PerspectiveToxicityClient {
    pub fn new(
        api_key: String,
        language: String,
        endpoint: Option<String>,
        timeout_sec: u64,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_sec))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            api_key,
            language,
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

    pub async fn classify(&self, text: &str) -> Result<f64, ClassifierError> {
        self.rate_limit().await;

        let truncated: String = text.chars().take(MAX_INPUT_CHARS).collect();
        let body = json!({
            "comment": { "text": truncated },
            "languages": [self.language],
            "requestedAttributes": { "TOXICITY": {} }
        });

        let url = format!("{}?key={}", self.endpoint, self.api_key);
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ClassifierError::transient(format!("toxicity request failed: {e}")))?;

        let status = response.status();
        if status.as_u16() == 400 || status.as_u16() == 401 || status.as_u16() == 403 {
            // Perspective reports an invalid key as 400 with an error body.
            return Err(ClassifierError::fatal(format!(
                "toxicity backend rejected the request (status {status})"
            )));
        }
        if !status.is_success() {
            return Err(ClassifierError::transient(format!(
                "toxicity backend returned status {status}"
            )));
        }

        let body: Value = response.json().await.map_err(|e| {
            ClassifierError::transient(format!("toxicity response was not JSON: {e}"))
        })?;
        parse_response(&body).ok_or_else(|| {
            ClassifierError::transient("toxicity response missing summary score".to_string())
        })
    }
}

fn parse_response(body: &Value) -> Option<f64> {
    let value = body
        .get("attributeScores")?
        .get("TOXICITY")?
        .get("summaryScore")?
        .get("value")?
        .as_f64()?;
    Some(value.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_summary_score() {
        let body = json!({
            "attributeScores": {
                "TOXICITY": {
                    "summaryScore": { "value": 0.42, "type": "PROBABILITY" }
                }
            },
            "languages": ["ko"]
        });

        assert_eq!(parse_response(&body), Some(0.42));
    }

    #[test]
    fn test_parse_clamps_out_of_range() {
        let body = json!({
            "attributeScores": {
                "TOXICITY": { "summaryScore": { "value": 1.7 } }
            }
        });
        assert_eq!(parse_response(&body), Some(1.0));
    }

    #[test]
    fn test_parse_missing_attribute() {
        assert_eq!(parse_response(&json!({})), None);
        assert_eq!(
            parse_response(&json!({"attributeScores": {"INSULT": {}}})),
            None
        );
    }
}
