/// Records describing the model's verdict payload and grounding metadata.
///
/// These are pass-through values produced by the external model. Every field
/// carries a serde default so a partially filled payload still renders.
use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit `null` like a missing key.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceAnalysis {
    #[serde(default, deserialize_with = "null_default")]
    pub bias: String,
    #[serde(default, deserialize_with = "null_default")]
    pub sentiment: String,
    #[serde(default, deserialize_with = "null_default")]
    pub tone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefinitiveSource {
    #[serde(default, deserialize_with = "null_default")]
    pub uri: String,
    #[serde(default, deserialize_with = "null_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_default")]
    pub analysis: SourceAnalysis,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubClaimAnalysis {
    #[serde(default, deserialize_with = "null_default")]
    pub sub_claim: String,
    #[serde(default, deserialize_with = "null_default")]
    pub verdict: String,
    #[serde(default, deserialize_with = "null_default")]
    pub confidence_score: f64,
    /// Markdown.
    #[serde(default, deserialize_with = "null_default")]
    pub explanation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    #[serde(default, deserialize_with = "null_default")]
    pub overall_verdict: String,
    /// 0–100, as reported by the model (not clamped here).
    #[serde(default, deserialize_with = "null_default")]
    pub overall_confidence_score: f64,
    /// Markdown.
    #[serde(default, deserialize_with = "null_default")]
    pub overall_explanation: String,
    #[serde(default, deserialize_with = "null_default")]
    pub is_complex_claim: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub sub_claim_analyses: Vec<SubClaimAnalysis>,
    #[serde(default, deserialize_with = "null_default")]
    pub definitive_sources: Vec<DefinitiveSource>,
}

impl VerificationResult {
    /// Text of the first sub-claim, used as the card's claim title.
    #[must_use]
    pub fn claim_title(&self) -> Option<&str> {
        self.sub_claim_analyses
            .first()
            .map(|s| s.sub_claim.as_str())
            .filter(|s| !s.is_empty())
    }
}

/// Payload shape returned in URL mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UrlVerificationResponse {
    #[serde(default, deserialize_with = "null_default")]
    pub claims_analyses: Vec<VerificationResult>,
}

// ── Grounding metadata ───────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebSource {
    #[serde(default, deserialize_with = "null_default")]
    pub uri: String,
    #[serde(default, deserialize_with = "null_default")]
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewSnippet {
    #[serde(default, deserialize_with = "null_default")]
    pub uri: String,
    #[serde(default, deserialize_with = "null_default")]
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceAnswerSources {
    #[serde(default, deserialize_with = "null_default")]
    pub review_snippets: Vec<ReviewSnippet>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSource {
    #[serde(default, deserialize_with = "null_default")]
    pub uri: String,
    #[serde(default, deserialize_with = "null_default")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_answer_sources: Option<PlaceAnswerSources>,
}

/// A citation the model reports having consulted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroundingChunk {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web: Option<WebSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maps: Option<MapSource>,
}

impl GroundingChunk {
    /// The chunk's primary URI: the web URI when set, else the maps URI.
    #[must_use]
    pub fn uri(&self) -> Option<&str> {
        let web = self.web.as_ref().map(|w| w.uri.as_str());
        let maps = self.maps.as_ref().map(|m| m.uri.as_str());
        web.filter(|u| !u.is_empty())
            .or_else(|| maps.filter(|u| !u.is_empty()))
    }

    /// Display title, falling back to the URI.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        let web = self.web.as_ref().map(|w| w.title.as_str());
        let maps = self.maps.as_ref().map(|m| m.title.as_str());
        web.filter(|t| !t.is_empty())
            .or_else(|| maps.filter(|t| !t.is_empty()))
            .or_else(|| self.uri())
    }

    /// Review snippets attached to a maps chunk.
    #[must_use]
    pub fn review_snippets(&self) -> &[ReviewSnippet] {
        self.maps
            .as_ref()
            .and_then(|m| m.place_answer_sources.as_ref())
            .map(|p| p.review_snippets.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_payload_uses_defaults() {
        let json = r#"{"overall_verdict": "True", "overall_confidence_score": 92}"#;
        let result: VerificationResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.overall_verdict, "True");
        assert_eq!(result.overall_confidence_score, 92.0);
        assert!(!result.is_complex_claim);
        assert!(result.sub_claim_analyses.is_empty());
        assert!(result.definitive_sources.is_empty());
        assert_eq!(result.claim_title(), None);
    }

    #[test]
    fn test_claim_title_uses_first_sub_claim() {
        let result = VerificationResult {
            sub_claim_analyses: vec![
                SubClaimAnalysis {
                    sub_claim: "The Eiffel Tower is in Paris".to_string(),
                    ..Default::default()
                },
                SubClaimAnalysis {
                    sub_claim: "It is 330 m tall".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        assert_eq!(result.claim_title(), Some("The Eiffel Tower is in Paris"));
    }

    #[test]
    fn test_grounding_chunk_camel_case() {
        let json = r#"{
            "maps": {
                "uri": "https://maps.google.com/?cid=1",
                "title": "Cafe Central",
                "placeAnswerSources": {
                    "reviewSnippets": [{"uri": "https://maps.google.com/r/1", "title": "Great coffee"}]
                }
            }
        }"#;
        let chunk: GroundingChunk = serde_json::from_str(json).unwrap();
        assert_eq!(chunk.uri(), Some("https://maps.google.com/?cid=1"));
        assert_eq!(chunk.title(), Some("Cafe Central"));
        assert_eq!(chunk.review_snippets().len(), 1);
        assert_eq!(chunk.review_snippets()[0].title, "Great coffee");
    }

    #[test]
    fn test_grounding_chunk_prefers_web_and_falls_back_to_uri() {
        let chunk = GroundingChunk {
            web: Some(WebSource {
                uri: "https://example.org/a".to_string(),
                title: String::new(),
            }),
            maps: Some(MapSource {
                uri: "https://maps.example/b".to_string(),
                ..Default::default()
            }),
        };
        assert_eq!(chunk.uri(), Some("https://example.org/a"));
        assert_eq!(chunk.title(), Some("https://example.org/a"));
        assert!(GroundingChunk::default().uri().is_none());
    }
}
