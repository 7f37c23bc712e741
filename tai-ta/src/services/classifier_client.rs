//! Vision classifier API client
//!
//! Adapter over a hosted open-vocabulary image classification endpoint
//! (Hugging Face inference style: POST raw image bytes, optional Bearer
//! token, JSON reply of `[{label, score}, ...]` ordered by descending
//! score). The adapter returns candidates untouched; interpretation
//! belongs to the resolution engine.

use std::time::Duration;
use tai_common::ClassificationCandidate;
use thiserror::Error;

const USER_AGENT: &str = "TerrainAI/0.1.0 (https://github.com/terrain-ai/terrain-ai)";

/// Classifier client errors
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Classifier returned no candidates")]
    NoCandidates,

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid API key")]
    InvalidApiKey,
}

/// Vision classifier API client
pub struct ClassifierClient {
    http_client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl ClassifierClient {
    pub fn new(
        endpoint: String,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ClassifierError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ClassifierError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            endpoint,
            api_key,
        })
    }

    /// Classify an image, returning (label, score) candidates ordered by
    /// descending score.
    ///
    /// An empty candidate list is reported as an error so callers can
    /// apply the degraded-fallback policy uniformly with network and API
    /// failures.
    pub async fn classify(
        &self,
        image: Vec<u8>,
    ) -> Result<Vec<ClassificationCandidate>, ClassifierError> {
        tracing::debug!(bytes = image.len(), "Querying vision classifier");

        let mut request = self.http_client.post(&self.endpoint).body(image);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClassifierError::NetworkError(e.to_string()))?;

        let status = response.status();

        if status == 401 {
            return Err(ClassifierError::InvalidApiKey);
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ClassifierError::ApiError(status.as_u16(), error_text));
        }

        let candidates: Vec<ClassificationCandidate> = response
            .json()
            .await
            .map_err(|e| ClassifierError::ParseError(e.to_string()))?;

        if candidates.is_empty() {
            return Err(ClassifierError::NoCandidates);
        }

        if let Some(top) = candidates.first() {
            tracing::info!(
                label = %top.label,
                score = top.score,
                candidates = candidates.len(),
                "Classification complete"
            );
        }

        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation_succeeds() {
        let client = ClassifierClient::new(
            "https://api-inference.example.com/models/vit".to_string(),
            Some("test_key".to_string()),
            Duration::from_secs(30),
        );
        assert!(client.is_ok());
    }

    #[test]
    fn client_creation_without_api_key_succeeds() {
        let client = ClassifierClient::new(
            "http://127.0.0.1:9090/classify".to_string(),
            None,
            Duration::from_secs(5),
        );
        assert!(client.is_ok());
    }

    #[test]
    fn candidate_wire_shape_parses() {
        let body = r#"[
            {"label": "alp", "score": 0.83},
            {"label": "valley, vale", "score": 0.09}
        ]"#;

        let candidates: Vec<ClassificationCandidate> = serde_json::from_str(body).unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].label, "alp");
        assert!(candidates[0].score > candidates[1].score);
    }
}
