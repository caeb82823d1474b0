/// Mock model client for testing purposes.
///
/// Returns a canned response (or a canned API failure) and records every
/// request it receives.
use std::sync::Mutex;

use super::{GenerateRequest, ModelClient, ModelResponse};
use crate::error::VerifyError;
use crate::models::GroundingChunk;

/// A mock client that answers every prompt with the same response.
pub struct MockClient {
    response: Result<ModelResponse, (u16, String)>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl MockClient {
    /// Respond with `text` and no grounding chunks.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_grounding(text, Vec::new())
    }

    /// Respond with `text` and the given grounding chunks.
    #[must_use]
    pub fn with_grounding(text: impl Into<String>, chunks: Vec<GroundingChunk>) -> Self {
        Self {
            response: Ok(ModelResponse {
                text: text.into(),
                grounding_chunks: chunks,
            }),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fail every call with an API error.
    #[must_use]
    pub fn failing(status: u16, body: impl Into<String>) -> Self {
        Self {
            response: Err((status, body.into())),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl ModelClient for MockClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<ModelResponse, VerifyError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        match &self.response {
            Ok(resp) => Ok(resp.clone()),
            Err((status, body)) => Err(VerifyError::Api {
                status: *status,
                body: body.clone(),
            }),
        }
    }
}
