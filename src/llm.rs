//! Language-model client
//!
//! [`ModelClient`] is the seam between trip planning and the generative
//! endpoint; [`GeminiClient`] talks to the Gemini `generateContent` API
//! through a retrying HTTP client.

use async_trait::async_trait;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::RetryTransientMiddleware;
use reqwest_retry::policies::ExponentialBackoff;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::config::ModelConfig;
use crate::error::TripError;

/// Anything that turns a prompt into raw model text
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Completion expected to carry a JSON payload
    async fn generate(&self, prompt: &str) -> crate::Result<String>;

    /// Plain-text completion, for conversational answers
    async fn answer(&self, prompt: &str) -> crate::Result<String> {
        self.generate(prompt).await
    }
}

const JSON_MIME: &str = "application/json";
const TEXT_MIME: &str = "text/plain";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    role: &'static str,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
    response_mime_type: &'static str,
}

impl GenerationConfig {
    fn with_mime_type(response_mime_type: &'static str) -> Self {
        Self {
            temperature: 1.0,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 8192,
            response_mime_type,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiResponseContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

impl GeminiRequest {
    fn for_prompt(prompt: &str, response_mime_type: &'static str) -> Self {
        Self {
            contents: vec![GeminiContent {
                role: "user",
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig::with_mime_type(response_mime_type),
        }
    }
}

impl GeminiResponse {
    /// Text of the first part of the first candidate
    fn into_text(self) -> crate::Result<String> {
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| TripError::api("Model returned no candidates"))?;
        let finish_reason = candidate.finish_reason;
        candidate
            .content
            .and_then(|content| content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| {
                TripError::api(format!(
                    "Model returned an empty candidate (finish reason: {})",
                    finish_reason.as_deref().unwrap_or("unknown")
                ))
            })
    }
}

/// Gemini `generateContent` client
pub struct GeminiClient {
    client: ClientWithMiddleware,
    api_key: String,
    url: String,
}

impl GeminiClient {
    /// Build a client from the model configuration.
    ///
    /// # Errors
    ///
    /// Fails when no API key is configured or the HTTP client cannot be built.
    pub fn new(config: &ModelConfig) -> crate::Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| TripError::config("No model API key configured"))?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("TripWeaver/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TripError::config(format!("Failed to create HTTP client: {e}")))?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let client = ClientBuilder::new(http)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            api_key,
            url: format!(
                "{}/models/{}:generateContent",
                config.endpoint.trim_end_matches('/'),
                config.model
            ),
        })
    }

    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    async fn complete(&self, prompt: &str, mime_type: &'static str) -> crate::Result<String> {
        info!("Requesting model completion");

        let response = self
            .client
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&GeminiRequest::for_prompt(prompt, mime_type))
            .send()
            .await
            .map_err(|e| TripError::api(format!("Model request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            warn!(%status, "Model endpoint returned an error");

            return Err(match status.as_u16() {
                401 | 403 => TripError::config("Model API key was rejected"),
                429 => TripError::api("Model API rate limit exceeded"),
                _ => TripError::api(format!("Model API error {status}: {error_text}")),
            });
        }

        let body: GeminiResponse = response
            .json()
            .await
            .map_err(|e| TripError::api(format!("Failed to parse model response: {e}")))?;

        let text = body.into_text()?;
        debug!(len = text.len(), "Received model completion");
        Ok(text)
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> crate::Result<String> {
        self.complete(prompt, JSON_MIME).await
    }

    async fn answer(&self, prompt: &str) -> crate::Result<String> {
        self.complete(prompt, TEXT_MIME).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_shape() {
        let body =
            serde_json::to_value(GeminiRequest::for_prompt("Plan Goa", JSON_MIME)).unwrap();
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Plan Goa");
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 8192);

        let body =
            serde_json::to_value(GeminiRequest::for_prompt("Best beaches?", TEXT_MIME)).unwrap();
        assert_eq!(body["generationConfig"]["responseMimeType"], "text/plain");
    }

    #[test]
    fn test_response_text() {
        let body: GeminiResponse = serde_json::from_value(json!({
            "candidates": [
                {"content": {"parts": [{"text": "{\"hotels\": []}"}], "role": "model"}, "finishReason": "STOP"},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }))
        .unwrap();
        assert_eq!(body.into_text().unwrap(), "{\"hotels\": []}");
    }

    #[test]
    fn test_response_without_candidates() {
        let body: GeminiResponse =
            serde_json::from_value(json!({"promptFeedback": {"blockReason": "SAFETY"}})).unwrap();
        assert!(matches!(body.into_text(), Err(TripError::Api { .. })));

        let body: GeminiResponse =
            serde_json::from_value(json!({"candidates": [{"finishReason": "SAFETY"}]})).unwrap();
        let err = body.into_text().unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn test_client_requires_api_key() {
        let config = ModelConfig::default();
        assert!(matches!(GeminiClient::new(&config), Err(TripError::Config { .. })));
    }

    #[test]
    fn test_client_url() {
        let config = ModelConfig {
            endpoint: "https://example.test/v1beta/".to_string(),
            api_key: Some("valid_api_key_123".to_string()),
            ..ModelConfig::default()
        };
        let client = GeminiClient::new(&config).unwrap();
        assert_eq!(
            client.url,
            "https://example.test/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }
}
