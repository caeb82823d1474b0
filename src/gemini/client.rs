/// HTTP client for the Gemini `generateContent` REST endpoint.
///
/// Every request enables the Google Search and Google Maps tools. When a
/// location is known it is passed as the maps retrieval position.
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info};

use super::{GenerateRequest, ModelClient, ModelResponse};
use crate::config::{Config, FALLBACK_API_KEY_ENV};
use crate::error::VerifyError;
use crate::models::GroundingChunk;

// ── Wire types ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize, Default)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize, Default)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
    /// Thought summaries are not part of the answer.
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

impl GenerateContentResponse {
    fn into_model_response(self) -> Result<ModelResponse, VerifyError> {
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or(VerifyError::EmptyResponse)?;

        let text = candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter(|p| !p.thought)
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        let grounding_chunks = candidate
            .grounding_metadata
            .map(|m| m.grounding_chunks)
            .unwrap_or_default();

        Ok(ModelResponse {
            text,
            grounding_chunks,
        })
    }
}

/// Build the JSON body of a `generateContent` call.
#[must_use]
pub fn build_request_body(request: &GenerateRequest, temperature: f32) -> serde_json::Value {
    let mut body = serde_json::json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": request.prompt }],
        }],
        "tools": [
            { "googleSearch": {} },
            { "googleMaps": {} },
        ],
        "generationConfig": {
            "temperature": temperature,
        },
    });

    if let Some(loc) = request.location {
        body["toolConfig"] = serde_json::json!({
            "retrievalConfig": {
                "latLng": {
                    "latitude": loc.latitude,
                    "longitude": loc.longitude,
                }
            }
        });
    }

    body
}

// ── Client ───────────────────────────────────────────────────────────

/// Gemini REST client.
pub struct GeminiClient {
    http: reqwest::Client,
    api_base: String,
    model: String,
    api_key: String,
    temperature: f32,
}

impl GeminiClient {
    /// Build a client from the config, reading the API key from the
    /// environment.
    pub fn from_config(config: &Config) -> Result<Self, VerifyError> {
        let api_key = config.api_key().ok_or_else(|| {
            VerifyError::MissingApiKey(format!("{}, {FALLBACK_API_KEY_ENV}", config.api_key_env))
        })?;
        Self::new(config, api_key)
    }

    /// Build a client with an explicit API key.
    pub fn new(config: &Config, api_key: String) -> Result<Self, VerifyError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("truthverify/", env!("CARGO_PKG_VERSION")))
            .build()?;

        info!("Using model {} via {}", config.model, config.api_base);

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            temperature: config.temperature,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }
}

impl ModelClient for GeminiClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<ModelResponse, VerifyError> {
        let body = build_request_body(request, self.temperature);
        debug!(
            "POST {} (prompt {} chars, location: {:?})",
            self.endpoint(),
            request.prompt.len(),
            request.location
        );

        let resp = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(VerifyError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = resp.json().await?;
        let response = parsed.into_model_response()?;
        debug!(
            "Model returned {} chars and {} grounding chunks",
            response.text.len(),
            response.grounding_chunks.len()
        );
        Ok(response)
    }
}
