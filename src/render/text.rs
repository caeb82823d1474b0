use super::meter::TruthMeter;
use super::sources::dedupe;
use crate::verifier::Verification;

/// Plain-text summary for the terminal.
#[must_use]
pub fn render_summary(verification: &Verification) -> String {
    let mut out = String::new();

    for (i, result) in verification.results.iter().enumerate() {
        if verification.results.len() > 1 {
            out.push_str(&format!("── Claim {} of {} ──\n", i + 1, verification.results.len()));
        }
        if let Some(title) = result.claim_title() {
            out.push_str(&format!("Claim:      \"{title}\"\n"));
        }
        let meter = TruthMeter::new(result.overall_confidence_score);
        out.push_str(&format!("Verdict:    {}\n", result.overall_verdict));
        out.push_str(&format!("Confidence: {}%\n", meter.display_score()));

        let explanation = result.overall_explanation.trim();
        if !explanation.is_empty() {
            out.push_str(&format!("\n{explanation}\n"));
        }

        if result.is_complex_claim && !result.sub_claim_analyses.is_empty() {
            out.push_str("\nSub-claims:\n");
            for sub in &result.sub_claim_analyses {
                out.push_str(&format!(
                    "  • {} → {} ({}%)\n",
                    sub.sub_claim,
                    sub.verdict,
                    TruthMeter::new(sub.confidence_score).display_score()
                ));
            }
        }

        if !result.definitive_sources.is_empty() {
            out.push_str("\nDefinitive sources:\n");
            for (n, s) in result.definitive_sources.iter().enumerate() {
                out.push_str(&format!(
                    "  {}. {} <{}>\n     bias: {} · sentiment: {} · tone: {}\n",
                    n + 1,
                    s.title,
                    s.uri,
                    s.analysis.bias,
                    s.analysis.sentiment,
                    s.analysis.tone
                ));
            }
        }
        out.push('\n');
    }

    let consulted = dedupe(&verification.sources);
    if !consulted.is_empty() {
        out.push_str(&format!("Sources consulted ({}):\n", consulted.len()));
        for chunk in consulted {
            if let (Some(title), Some(uri)) = (chunk.title(), chunk.uri()) {
                out.push_str(&format!("  - {title} <{uri}>\n"));
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GroundingChunk, SubClaimAnalysis, VerificationResult, WebSource};
    use crate::verifier::Mode;

    #[test]
    fn test_summary() {
        let chunk = GroundingChunk {
            web: Some(WebSource {
                uri: "https://a.example".to_string(),
                title: "A".to_string(),
            }),
            maps: None,
        };
        let verification = Verification {
            mode: Mode::Text,
            input: "x".to_string(),
            results: vec![VerificationResult {
                overall_verdict: "False".to_string(),
                overall_confidence_score: 87.6,
                is_complex_claim: true,
                sub_claim_analyses: vec![SubClaimAnalysis {
                    sub_claim: "Part one".to_string(),
                    verdict: "False".to_string(),
                    confidence_score: 90.0,
                    explanation: String::new(),
                }],
                ..Default::default()
            }],
            sources: vec![chunk.clone(), chunk],
            generated_at: chrono::Utc::now(),
        };

        let text = render_summary(&verification);
        assert!(text.contains("Claim:      \"Part one\""));
        assert!(text.contains("Verdict:    False"));
        assert!(text.contains("Confidence: 88%"));
        assert!(text.contains("  • Part one → False (90%)"));
        assert!(text.contains("Sources consulted (1):"));
        assert!(!text.contains("── Claim"));
    }
}
