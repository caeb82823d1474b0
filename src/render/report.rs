/// Result cards and the standalone HTML report page.
use super::markdown::markdown_to_html;
use super::meter::TruthMeter;
use super::{escape, landscape, sources};
use crate::labels::VerdictClass;
use crate::models::{GroundingChunk, SubClaimAnalysis, VerificationResult};
use crate::verifier::Verification;

/// Stylesheet shared by the report page and the web front-end.
pub const STYLE: &str = r#"
body { background: #0f172a; color: #cbd5e1; font-family: system-ui, sans-serif; margin: 0; padding: 2rem 1rem; }
main { max-width: 56rem; margin: 0 auto; }
h1.title { text-align: center; font-size: 2.5rem; color: #22d3ee; margin-bottom: .25rem; }
p.tagline { text-align: center; color: #94a3b8; margin-top: 0; }
a { color: #22d3ee; }
.card { background: #1e293b; border: 1px solid #334155; border-radius: 1rem; margin: 2rem 0; overflow: hidden; }
.card-claim { background: #0f172a80; border-bottom: 1px solid #334155; padding: 1rem; text-align: center; }
.card-claim .claim { color: #67e8f9; font-weight: 600; }
.card-body { padding: 1.5rem 2rem; }
.card h2, .card h3.section { text-align: center; color: #e2e8f0; }
.verdict { text-align: center; font-size: 1.5rem; font-weight: 700; color: #f1f5f9; }
.summary { background: #0f172a80; border: 1px solid #334155; border-radius: .5rem; padding: 1rem 1.5rem; }
.meter { display: flex; flex-direction: column; align-items: center; }
.meter-gauge { width: 16rem; }
.meter-label { text-align: center; }
.meter-score { font-size: 2.25rem; font-weight: 700; }
.meter-label p { margin: 0; font-size: .8rem; font-weight: 600; text-transform: uppercase; letter-spacing: .1em; }
.meter-low { color: #ef4444; } .meter-medium { color: #facc15; } .meter-high { color: #22c55e; }
details { border: 1px solid #334155; border-radius: .5rem; margin: .75rem 0; }
details > summary { cursor: pointer; padding: 1rem; display: flex; justify-content: space-between; gap: 1rem; background: #0f172a80; }
details > div { padding: 1rem; border-top: 1px solid #334155; }
.sub-verdict { font-weight: 700; }
.verdict-true { color: #4ade80; } .verdict-false { color: #f87171; } .verdict-misleading { color: #facc15; } .verdict-unknown { color: #cbd5e1; }
.source { background: #0f172a80; border: 1px solid #334155; border-radius: .5rem; padding: 1rem; margin: .75rem 0; }
.tags { display: flex; flex-wrap: wrap; gap: .5rem; margin-top: .5rem; }
.tag { font-size: .75rem; font-weight: 600; padding: .25rem .6rem; border-radius: 999px; border: 1px solid; }
.bias-left { color: #93c5fd; fill: #60a5fa; } .bias-right { color: #fca5a5; fill: #f87171; }
.bias-neutral { color: #cbd5e1; fill: #94a3b8; } .bias-other { color: #d8b4fe; fill: #c084fc; }
.sentiment-positive { color: #86efac; } .sentiment-negative { color: #fca5a5; } .sentiment-neutral { color: #cbd5e1; }
.tone-objective { color: #67e8f9; } .tone-opinionated { color: #fde047; } .tone-other { color: #a5b4fc; }
.landscape-chart { width: 100%; height: auto; }
.axis-title { font-size: 12px; fill: #94a3b8; font-weight: 600; } .axis-hint { font-size: 11px; fill: #64748b; }
.point-label { font-size: 10px; font-weight: 700; fill: #fff; pointer-events: none; }
.all-sources { list-style: none; padding: 0; } .all-sources > li { background: #0f172a80; border: 1px solid #334155; border-radius: .5rem; padding: .75rem; margin: .5rem 0; }
.muted { color: #64748b; }
.error { background: #ef44441a; border: 1px solid #ef4444; color: #f87171; padding: 1rem; border-radius: .5rem; }
.md-h1 { font-size: 1.8rem; } .md-h2 { font-size: 1.5rem; } .md-h3 { font-size: 1.25rem; }
code { background: #334155; color: #67e8f9; border-radius: .25rem; padding: 0 .25rem; }
"#;

fn render_sub_claim(sub: &SubClaimAnalysis) -> String {
    let class = VerdictClass::classify(&sub.verdict).css_class();
    let confidence = TruthMeter::new(sub.confidence_score).display_score();
    format!(
        "<details><summary><span>{claim}</span><span class=\"sub-verdict {class}\">{verdict} <span class=\"muted\">({confidence}%)</span></span></summary><div>{body}</div></details>",
        claim = escape(&sub.sub_claim),
        verdict = escape(&sub.verdict),
        body = markdown_to_html(&sub.explanation),
    )
}

/// One result card. Sections are emitted only when their data is present.
#[must_use]
pub fn render_card(result: &VerificationResult, grounding: &[GroundingChunk]) -> String {
    let mut html = String::from("<section class=\"card\">");

    if let Some(title) = result.claim_title() {
        html.push_str(&format!(
            "<div class=\"card-claim\"><p class=\"muted\">Analysis for Claim:</p><p class=\"claim\">\"{}\"</p></div>",
            escape(title)
        ));
    }

    html.push_str("<div class=\"card-body\">");

    // Overall analysis
    html.push_str("<div><h2>Overall Analysis</h2>");
    html.push_str(&TruthMeter::new(result.overall_confidence_score).to_html());
    html.push_str(&format!(
        "<p class=\"verdict\">{}</p>",
        escape(&result.overall_verdict)
    ));
    html.push_str(&format!(
        "<div class=\"summary\"><h3>Summary</h3>{}</div></div>",
        markdown_to_html(&result.overall_explanation)
    ));

    if result.is_complex_claim && !result.sub_claim_analyses.is_empty() {
        html.push_str("<div><h2>Claim Deconstruction</h2>");
        for sub in &result.sub_claim_analyses {
            html.push_str(&render_sub_claim(sub));
        }
        html.push_str("</div>");
    }

    if !result.definitive_sources.is_empty() {
        html.push_str("<div><h3 class=\"section\">Source Credibility</h3>");
        html.push_str("<details open><summary><span>Source Landscape</span></summary><div>");
        html.push_str(&landscape::render(&result.definitive_sources));
        html.push_str("</div></details>");
        for source in &result.definitive_sources {
            html.push_str(&sources::render_definitive_source(source));
        }
        html.push_str("</div>");
    }

    let all_sources = sources::render_all_sources(grounding);
    if !all_sources.is_empty() {
        html.push_str("<div><h3 class=\"section\">All Sources Consulted</h3>");
        html.push_str(&all_sources);
        html.push_str("</div>");
    }

    html.push_str("</div></section>");
    html
}

/// Wrap `body` in a complete HTML document with the shared stylesheet.
#[must_use]
pub fn page_shell(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n<title>{}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n<main>\n{body}\n</main>\n</body>\n</html>\n",
        escape(title)
    )
}

/// Cards for every result of a verification, without the page wrapper.
#[must_use]
pub fn render_results(verification: &Verification) -> String {
    verification
        .results
        .iter()
        .map(|r| render_card(r, &verification.sources))
        .collect()
}

/// Standalone report page for a verification.
#[must_use]
pub fn render_page(verification: &Verification) -> String {
    let kind = match verification.mode {
        crate::verifier::Mode::Text => "Claim",
        crate::verifier::Mode::Url => "URL",
    };
    let mut body = String::from("<h1 class=\"title\">Truth Verifier</h1>");
    body.push_str(&format!(
        "<p class=\"tagline\">{kind}: {input}<br/><span class=\"muted\">Generated {at}</span></p>",
        input = escape(&verification.input),
        at = verification.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
    ));
    if verification.results.is_empty() {
        body.push_str("<p class=\"muted\">The model returned no claim analyses.</p>");
    }
    body.push_str(&render_results(verification));
    page_shell("Truth Verifier Report", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DefinitiveSource, SourceAnalysis, WebSource};
    use crate::verifier::Mode;

    fn complex_result() -> VerificationResult {
        VerificationResult {
            overall_verdict: "Misleading".to_string(),
            overall_confidence_score: 55.0,
            overall_explanation: "The tower is **not** taller.".to_string(),
            is_complex_claim: true,
            sub_claim_analyses: vec![
                SubClaimAnalysis {
                    sub_claim: "The Eiffel Tower is taller than the Empire State Building".to_string(),
                    verdict: "False".to_string(),
                    confidence_score: 98.0,
                    explanation: "330 m vs 443 m.".to_string(),
                },
                SubClaimAnalysis {
                    sub_claim: "It is the most visited monument".to_string(),
                    verdict: "Mostly True".to_string(),
                    confidence_score: 70.0,
                    explanation: "Among paid monuments.".to_string(),
                },
            ],
            definitive_sources: vec![DefinitiveSource {
                uri: "https://www.toureiffel.paris".to_string(),
                title: "Official site".to_string(),
                analysis: SourceAnalysis {
                    bias: "Corporate".to_string(),
                    sentiment: "Positive".to_string(),
                    tone: "Promotional".to_string(),
                },
            }],
        }
    }

    #[test]
    fn test_card_full_sections() {
        let grounding = vec![GroundingChunk {
            web: Some(WebSource {
                uri: "https://en.wikipedia.org/wiki/Eiffel_Tower".to_string(),
                title: "Eiffel Tower".to_string(),
            }),
            maps: None,
        }];
        let html = render_card(&complex_result(), &grounding);

        assert!(html.contains("Analysis for Claim:"));
        assert!(html.contains("\"The Eiffel Tower is taller than the Empire State Building\""));
        assert!(html.contains("<p class=\"verdict\">Misleading</p>"));
        assert!(html.contains("<strong>not</strong>"));
        assert!(html.contains("Claim Deconstruction"));
        assert_eq!(html.matches("<details>").count(), 2);
        assert!(html.contains("sub-verdict verdict-false"));
        assert!(html.contains("sub-verdict verdict-true"));
        assert!(html.contains("<details open><summary><span>Source Landscape"));
        assert!(html.contains("All Sources Consulted"));
    }

    #[test]
    fn test_card_omits_empty_sections() {
        let result = VerificationResult {
            overall_verdict: "True".to_string(),
            overall_confidence_score: 90.0,
            is_complex_claim: false,
            sub_claim_analyses: vec![SubClaimAnalysis {
                sub_claim: "Water is wet".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let html = render_card(&result, &[]);
        assert!(html.contains("Overall Analysis"));
        assert!(!html.contains("Claim Deconstruction"));
        assert!(!html.contains("Source Credibility"));
        assert!(!html.contains("All Sources Consulted"));
    }

    #[test]
    fn test_page() {
        let verification = Verification {
            mode: Mode::Url,
            input: "https://example.com/<x>".to_string(),
            results: vec![complex_result(), VerificationResult::default()],
            sources: Vec::new(),
            generated_at: chrono::Utc::now(),
        };
        let page = render_page(&verification);
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("URL: https://example.com/&lt;x&gt;"));
        assert_eq!(page.matches("<section class=\"card\">").count(), 2);
        assert!(page.contains("<style>"));
    }
}
