/// One verification round trip: prompt → model → extracted verdict.
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::VerifyError;
use crate::extract;
use crate::gemini::{GenerateRequest, ModelClient, prompt};
use crate::geo::{Coordinates, Geolocation};
use crate::models::{GroundingChunk, VerificationResult};

/// What the user submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// A claim typed by the user.
    #[default]
    Text,
    /// An article URL whose key claims are extracted and checked.
    Url,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Url => f.write_str("url"),
        }
    }
}

/// Outcome of a successful verification.
#[derive(Debug, Clone, Serialize)]
pub struct Verification {
    pub mode: Mode,
    pub input: String,
    /// One entry in text mode, one per extracted claim in URL mode.
    pub results: Vec<VerificationResult>,
    /// Raw grounding citations, not yet deduplicated.
    pub sources: Vec<GroundingChunk>,
    pub generated_at: DateTime<Utc>,
}

pub struct Verifier<C> {
    client: C,
}

impl<C: ModelClient> Verifier<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Verify `input`, honouring the geolocation toggle.
    ///
    /// Refuses empty input, and refuses to send while the location is still
    /// pending.
    pub async fn verify_with_geo(
        &self,
        mode: Mode,
        input: &str,
        geo: &Geolocation,
    ) -> Result<Verification, VerifyError> {
        if input.trim().is_empty() {
            return Err(VerifyError::EmptyInput(mode));
        }
        let location = geo.gate()?;
        self.verify(mode, input, location).await
    }

    /// Verify `input` with an optional location bias.
    ///
    /// Failures of the call or of the parse are logged here in full.
    pub async fn verify(
        &self,
        mode: Mode,
        input: &str,
        location: Option<Coordinates>,
    ) -> Result<Verification, VerifyError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(VerifyError::EmptyInput(mode));
        }

        let result = self.round_trip(mode, input, location).await;
        if let Err(e) = &result {
            error!("Verification process failed: {e:?}");
        }
        result
    }

    async fn round_trip(
        &self,
        mode: Mode,
        input: &str,
        location: Option<Coordinates>,
    ) -> Result<Verification, VerifyError> {
        info!("Verifying {mode} input ({} chars)", input.len());

        let prompt = match mode {
            Mode::Text => prompt::claim_prompt(input),
            Mode::Url => prompt::url_prompt(input),
        };
        let response = self
            .client
            .generate(&GenerateRequest { prompt, location })
            .await?;

        let results = match mode {
            Mode::Text => vec![extract::parse_claim_response(&response.text)?],
            Mode::Url => extract::parse_url_response(&response.text)?,
        };

        info!(
            "Received {} result(s) with {} grounding chunk(s)",
            results.len(),
            response.grounding_chunks.len()
        );

        Ok(Verification {
            mode,
            input: input.to_string(),
            results,
            sources: response.grounding_chunks,
            generated_at: Utc::now(),
        })
    }
}
