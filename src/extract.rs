/// Recovery of the JSON verdict from a markdown-fenced model response.
use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;

use crate::error::ExtractError;
use crate::models::{UrlVerificationResponse, VerificationResult};

static JSON_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```json\s*([\s\S]*?)\s*```").unwrap());

/// Return the JSON text of a response: the content of the first ```` ```json ````
/// block, or the whole text when there is none. Always trimmed.
#[must_use]
pub fn json_payload(text: &str) -> &str {
    JSON_FENCE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(text)
        .trim()
}

/// Extract and deserialize the JSON payload of a response.
pub fn extract_json<T: DeserializeOwned>(text: &str) -> Result<T, ExtractError> {
    let payload = json_payload(text);
    if payload.is_empty() {
        return Err(ExtractError::Empty);
    }
    Ok(serde_json::from_str(payload)?)
}

/// Parse a single-claim verification response.
pub fn parse_claim_response(text: &str) -> Result<VerificationResult, ExtractError> {
    extract_json(text)
}

/// Parse a URL-mode response into its per-claim results.
pub fn parse_url_response(text: &str) -> Result<Vec<VerificationResult>, ExtractError> {
    let response: UrlVerificationResponse = extract_json(text)?;
    Ok(response.claims_analyses)
}
