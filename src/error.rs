/// Error types shared by the verification pipeline.
///
/// Every failure of the outbound call or of the response parse surfaces to
/// the user as one generic message (see [`VerifyError::user_message`]); the
/// full error is logged for diagnosis.
use thiserror::Error;

use crate::verifier::Mode;

/// Errors raised while recovering JSON from a model response.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("model returned an empty response")]
    Empty,

    #[error("invalid JSON in model response: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Errors raised while resolving the user's location.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeoError {
    #[error("location lookup failed: {0}")]
    Lookup(String),

    #[error("location service returned no coordinates")]
    NoCoordinates,

    #[error("coordinates out of range ({latitude}, {longitude})")]
    OutOfRange { latitude: f64, longitude: f64 },
}

/// Errors that can occur during a verification round trip.
#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("Please enter a {0} to verify.")]
    EmptyInput(Mode),

    #[error("Waiting for location data. Please wait or disable location services to proceed.")]
    LocationPending,

    #[error("API key not set (checked {0})")]
    MissingApiKey(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model API returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("model response contained no candidates")]
    EmptyResponse,

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

impl VerifyError {
    /// Whether the error is an input problem the user can fix directly,
    /// as opposed to a failure of the remote call.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::EmptyInput(_) | Self::LocationPending)
    }

    /// The message shown to the user.
    ///
    /// Input errors are shown verbatim. Everything else collapses into the
    /// generic "invalid response" message.
    #[must_use]
    pub fn user_message(&self) -> String {
        if self.is_input_error() {
            return self.to_string();
        }
        format!(
            "An error occurred: {self}. The model may have returned an invalid response. Check the console for details."
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_message() {
        let err = VerifyError::EmptyInput(Mode::Url);
        assert!(err.is_input_error());
        assert_eq!(err.user_message(), "Please enter a url to verify.");
    }

    #[test]
    fn test_generic_message_wraps_detail() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err = VerifyError::from(ExtractError::from(parse_err));
        assert!(!err.is_input_error());

        let msg = err.user_message();
        assert!(msg.starts_with("An error occurred: invalid JSON in model response"));
        assert!(msg.ends_with("Check the console for details."));
    }

    #[test]
    fn test_api_error_message() {
        let err = VerifyError::Api {
            status: 403,
            body: "forbidden".to_string(),
        };
        assert!(err.user_message().contains("status 403: forbidden"));
    }
}
