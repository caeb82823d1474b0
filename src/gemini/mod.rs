/// Model client trait and shared request/response types.
///
/// The external model does all of the verification work; this module only
/// carries a prompt out and the response text plus grounding citations back.
pub mod client;
pub mod mock;
pub mod prompt;

use std::future::Future;

use crate::error::VerifyError;
use crate::geo::Coordinates;
use crate::models::GroundingChunk;

/// One outbound generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub prompt: String,
    /// Biases maps search results towards the user's position.
    pub location: Option<Coordinates>,
}

/// What the rest of the crate needs from a model response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelResponse {
    /// Concatenated text parts of the first candidate.
    pub text: String,
    /// Citations reported in the first candidate's grounding metadata.
    pub grounding_chunks: Vec<GroundingChunk>,
}

/// Trait for search-grounded model clients.
///
/// Implementations must be `Send + Sync` so one client can be shared behind
/// `Arc` by the web and MCP front-ends.
pub trait ModelClient: Send + Sync {
    /// Send one prompt and return the response.
    fn generate(
        &self,
        request: &GenerateRequest,
    ) -> impl Future<Output = Result<ModelResponse, VerifyError>> + Send;
}
