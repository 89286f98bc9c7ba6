//! Gemini `generateContent` client (feature `gemini`).

use std::time::Duration;

use crate::generate::{GenerationError, GenerationRequest, TextGenerator};

/// Public API base.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";
/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateBody {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.8,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 2048,
        }
    }
}

#[derive(Debug, serde::Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, serde::Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, serde::Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorBody>,
}

#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Blocking Gemini client. One POST per call.
pub struct GeminiGenerator {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiGenerator {
    /// Client for `model` authenticated with `api_key`.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, GenerationError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| GenerationError::new(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            model: model.into(),
            api_key: api_key.into(),
        })
    }

    /// Client for [`DEFAULT_MODEL`] with the key from `GEMINI_API_KEY`.
    pub fn from_env() -> Result<Self, GenerationError> {
        let key = std::env::var(API_KEY_ENV)
            .map_err(|_| GenerationError::new(format!("{API_KEY_ENV} is not set")))?;
        Self::new(key, DEFAULT_MODEL)
    }

    /// Point at a different API base (proxies, tests).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

impl TextGenerator for GeminiGenerator {
    fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let body = GenerateBody {
            contents: vec![Content {
                parts: vec![Part {
                    text: request.build_instruction(),
                }],
            }],
            generation_config: GenerationConfig::default(),
        };
        tracing::debug!(model = %self.model, kind = ?request.kind, "requesting generation");

        let response = self
            .client
            .post(self.url())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .map_err(|e| GenerationError::new(format!("Failed to generate content: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| GenerationError::new(format!("Failed to generate content: {e}")))?;
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("");
            return Err(error_from_body(status.as_u16(), reason, &text));
        }
        parse_generated_text(&text)
    }
}

fn error_from_body(status: u16, reason: &str, body: &str) -> GenerationError {
    let api_message = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|e| e.error)
        .and_then(|e| e.message);
    let message = api_message.unwrap_or_else(|| format!("{status} {reason}").trim().to_owned());
    GenerationError::new(format!("Failed to generate content: {message}"))
}

fn parse_generated_text(body: &str) -> Result<String, GenerationError> {
    let parsed: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| GenerationError::new(format!("Failed to generate content: {e}")))?;
    parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .map(|p| p.text)
        .ok_or_else(|| GenerationError::new("No content generated - invalid response structure"))
}

#[cfg(test)]
#[path = "../../tests/unit/generate/gemini.rs"]
mod tests;
