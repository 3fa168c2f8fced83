use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, error, info, instrument, trace};

use crate::backend::{Oracle, OracleRequest, check_response_status, handle_http_error};
use crate::error::PredictionError;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini models available for classification.
///
/// Any other model name can be used through `Custom` or `FromStr`:
///
/// ```rust
/// use ckdscreen::GeminiModel;
/// use std::str::FromStr;
///
/// let model = GeminiModel::from_str("gemini-2.5-flash").unwrap();
/// assert_eq!(model, GeminiModel::Gemini25Flash);
///
/// let model = GeminiModel::from_string("gemini-exp-1206");
/// assert_eq!(model, GeminiModel::Custom("gemini-exp-1206".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Model {
    /// Gemini 2.5 Pro
    Gemini25Pro,
    /// Gemini 2.5 Flash (default)
    #[default]
    Gemini25Flash,
    /// Gemini 2.5 Flash Lite
    Gemini25FlashLite,
    /// Gemini 2.0 Flash
    Gemini20Flash,
    /// Any other model id, passed through verbatim
    Custom(String),
}

impl Model {
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gemini25Pro => "gemini-2.5-pro",
            Model::Gemini25Flash => "gemini-2.5-flash",
            Model::Gemini25FlashLite => "gemini-2.5-flash-lite",
            Model::Gemini20Flash => "gemini-2.0-flash",
            Model::Custom(name) => name,
        }
    }

    /// Create a model from a string. Unknown names become `Custom(name)`.
    pub fn from_string(name: impl Into<String>) -> Self {
        let name = name.into();
        match name.as_str() {
            "gemini-2.5-pro" => Model::Gemini25Pro,
            "gemini-2.5-flash" => Model::Gemini25Flash,
            "gemini-2.5-flash-lite" => Model::Gemini25FlashLite,
            "gemini-2.0-flash" => Model::Gemini20Flash,
            _ => Model::Custom(name),
        }
    }
}

impl FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Model::from_string(s))
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        Model::from_string(s)
    }
}

/// Settings for [`GeminiClient`], adjusted through its builder methods.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: Model,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    pub timeout: Option<Duration>,
    /// API root; `None` means the public v1beta endpoint
    pub base_url: Option<String>,
}

impl GeminiConfig {
    fn with_key(api_key: String) -> Self {
        Self {
            api_key,
            model: Model::default(),
            temperature: 0.0,
            max_tokens: None,
            timeout: None,
            base_url: None,
        }
    }
}

/// Gemini-backed classification oracle
pub struct GeminiClient {
    config: GeminiConfig,
    client: reqwest::Client,
}

// generateContent wire format
#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentRequest {
    fn structured(request: &OracleRequest, config: &GeminiConfig) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: request.prompt.clone(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: config.temperature,
                max_output_tokens: config.max_tokens,
                response_mime_type: "application/json".to_string(),
                response_schema: request.response_schema.to_json().clone(),
            },
        }
    }
}

/// Text of the first candidate, all text parts concatenated.
fn first_candidate_text(completion: GenerateContentResponse) -> Result<String, PredictionError> {
    let Some(candidate) = completion.candidates.into_iter().next() else {
        error!("Gemini API returned empty candidates array");
        return Err(PredictionError::EmptyResponse);
    };
    trace!(finish_reason = ?candidate.finish_reason, "Completion finish reason");

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        error!(finish_reason = ?candidate.finish_reason, "No text content in Gemini response");
        return Err(PredictionError::EmptyResponse);
    }
    Ok(text)
}

impl GeminiClient {
    /// Client for `api_key` using the default model.
    ///
    /// ```no_run
    /// # use ckdscreen::GeminiClient;
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = GeminiClient::new("your-gemini-api-key")?.temperature(0.0);
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(name = "gemini_client_new", skip(api_key))]
    pub fn new(api_key: impl Into<String>) -> Result<Self, PredictionError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(PredictionError::Api(
                "Gemini API key is empty; set GEMINI_API_KEY or pass a key to GeminiClient::new".to_string(),
            ));
        }

        let config = GeminiConfig::with_key(api_key);
        info!(model = %config.model.as_str(), "Created Gemini client");

        Ok(Self {
            config,
            client: reqwest::Client::new(),
        })
    }

    /// Client keyed from `GEMINI_API_KEY`.
    #[instrument(name = "gemini_client_from_env")]
    pub fn from_env() -> Result<Self, PredictionError> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| {
            PredictionError::Api("GEMINI_API_KEY environment variable is not set".to_string())
        })?;
        Self::new(api_key)
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    pub fn model(mut self, model: impl Into<Model>) -> Self {
        let model = model.into();
        debug!(previous_model = ?self.config.model, new_model = ?model, "Setting Gemini model");
        self.config.model = model;
        self
    }

    /// Sampling temperature; `0.0` (the default) is the most repeatable.
    pub fn temperature(mut self, temp: f32) -> Self {
        debug!(previous_temp = self.config.temperature, new_temp = temp, "Setting temperature");
        self.config.temperature = temp;
        self
    }

    /// Cap on output tokens, at least 1.
    pub fn max_tokens(mut self, max: u32) -> Self {
        debug!(previous_max = ?self.config.max_tokens, new_max = max, "Setting max_tokens");
        self.config.max_tokens = Some(max.max(1));
        self
    }

    /// Per-request HTTP timeout.
    ///
    /// This bounds the transport only; the
    /// [`Predictor`](crate::Predictor) applies its own overall timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        debug!(previous_timeout = ?self.config.timeout, new_timeout = ?timeout, "Setting timeout");
        self.config.timeout = Some(timeout);

        self.client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(
                    error = %e,
                    "Failed to build reqwest client with timeout, using default"
                );
                reqwest::Client::new()
            });

        self
    }

    /// Point the client at another API root, e.g. a local mock server.
    /// A trailing slash is ignored.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        debug!(previous_base_url = ?self.config.base_url, new_base_url = %base_url, "Setting custom base URL");
        self.config.base_url = Some(base_url);
        self
    }

    fn endpoint(&self) -> String {
        let base_url = self.config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        format!(
            "{}/models/{}:generateContent",
            base_url.trim_end_matches('/'),
            self.config.model.as_str()
        )
    }
}

#[async_trait]
impl Oracle for GeminiClient {
    #[instrument(
        name = "gemini_generate",
        skip(self, request),
        fields(
            model = %self.config.model.as_str(),
            prompt_len = request.prompt.len()
        )
    )]
    async fn generate(&self, request: &OracleRequest) -> Result<String, PredictionError> {
        info!("Requesting structured verdict from Gemini");

        let body = GenerateContentRequest::structured(request, &self.config);
        let url = self.endpoint();
        debug!(url = %url, "Sending request to Gemini API");

        let response = self
            .client
            .post(&url)
            .query(&[("key", &self.config.api_key)])
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| handle_http_error(e, "Gemini"))?;

        let response = check_response_status(response, "Gemini").await?;

        debug!(status = %response.status(), "Gemini API answered");
        let completion: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| handle_http_error(e, "Gemini"))?;

        let text = first_candidate_text(completion)?;
        debug!(content_len = text.len(), "Extracted text content from response");
        Ok(text)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OracleVerdict;
    use serde_json::json;

    #[test]
    fn empty_api_key_rejected() {
        assert!(GeminiClient::new("  ").is_err());
    }

    #[test]
    fn builder_updates_config() {
        let client = GeminiClient::new("key")
            .unwrap()
            .model("gemini-2.5-pro")
            .temperature(0.2)
            .max_tokens(0)
            .base_url("http://localhost:9999/v1beta/");
        assert_eq!(client.config().model, Model::Gemini25Pro);
        assert_eq!(client.config().temperature, 0.2);
        assert_eq!(client.config().max_tokens, Some(1));
        assert_eq!(
            client.endpoint(),
            "http://localhost:9999/v1beta/models/gemini-2.5-pro:generateContent"
        );
    }

    #[test]
    fn default_model_is_flash() {
        let client = GeminiClient::new("key").unwrap();
        assert_eq!(
            client.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn request_body_uses_camel_case() {
        let request = OracleRequest::for_output::<OracleVerdict>("classify");
        let config = GeminiConfig::with_key("key".into());
        let body = serde_json::to_value(GenerateContentRequest::structured(&request, &config)).unwrap();

        assert_eq!(body["contents"][0]["parts"][0]["text"], "classify");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(
            body["generationConfig"]["responseSchema"]["properties"]["riskLevel"]["type"],
            "string"
        );
        assert!(body["generationConfig"].get("maxOutputTokens").is_none());
    }

    #[test]
    fn candidate_parts_are_joined() {
        let completion: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "{\"a\":" }, { "text": "1}" }] },
                "finishReason": "STOP"
            }]
        }))
        .unwrap();
        assert_eq!(first_candidate_text(completion).unwrap(), "{\"a\":1}");
    }

    #[test]
    fn blocked_candidate_is_empty_response() {
        let completion: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        }))
        .unwrap();
        assert_eq!(
            first_candidate_text(completion).unwrap_err(),
            PredictionError::EmptyResponse
        );

        let completion: GenerateContentResponse =
            serde_json::from_value(json!({})).unwrap();
        assert_eq!(
            first_candidate_text(completion).unwrap_err(),
            PredictionError::EmptyResponse
        );
    }
}
