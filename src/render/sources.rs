/// Source lists: credibility tags for definitive sources and the
/// deduplicated list of every grounding citation.
use std::collections::HashMap;

use super::{escape, safe_href};
use crate::labels::{Bias, Sentiment, Tone};
use crate::models::{DefinitiveSource, GroundingChunk};

/// Deduplicate grounding chunks by URI.
///
/// Chunks without a URI are dropped. For repeated URIs the last chunk wins
/// but keeps the position of the first occurrence.
#[must_use]
pub fn dedupe(chunks: &[GroundingChunk]) -> Vec<&GroundingChunk> {
    let mut order: Vec<&str> = Vec::new();
    let mut latest: HashMap<&str, &GroundingChunk> = HashMap::new();

    for chunk in chunks {
        if let Some(uri) = chunk.uri() {
            if latest.insert(uri, chunk).is_none() {
                order.push(uri);
            }
        }
    }

    order
        .into_iter()
        .filter_map(|uri| latest.get(uri).copied())
        .collect()
}

fn tag(class: &str, value: &str) -> String {
    format!(
        "<span class=\"tag {class}\">{}</span>",
        escape(value)
    )
}

/// One definitive source with its bias, sentiment and tone tags.
#[must_use]
pub fn render_definitive_source(source: &DefinitiveSource) -> String {
    let a = &source.analysis;
    let label = if source.title.is_empty() {
        &source.uri
    } else {
        &source.title
    };
    format!(
        "<div class=\"source\"><a href=\"{href}\" target=\"_blank\" rel=\"noopener noreferrer\">{label}</a><div class=\"tags\">{bias}{sentiment}{tone}</div></div>",
        href = safe_href(&source.uri),
        label = escape(label),
        bias = tag(Bias::classify(&a.bias).css_class(), &a.bias),
        sentiment = tag(Sentiment::classify(&a.sentiment).css_class(), &a.sentiment),
        tone = tag(Tone::tag_class(&a.tone), &a.tone),
    )
}

/// "All Sources Consulted" list. Empty string when nothing has a URI.
#[must_use]
pub fn render_all_sources(chunks: &[GroundingChunk]) -> String {
    let unique = dedupe(chunks);
    if unique.is_empty() {
        return String::new();
    }

    let mut html = String::from("<ul class=\"all-sources\">");
    for chunk in unique {
        let (Some(uri), Some(title)) = (chunk.uri(), chunk.title()) else {
            continue;
        };
        html.push_str(&format!(
            "<li><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
            safe_href(uri),
            escape(title)
        ));

        let snippets = chunk.review_snippets();
        if !snippets.is_empty() {
            html.push_str("<ul class=\"snippets\">");
            for s in snippets {
                let label = if s.title.is_empty() { &s.uri } else { &s.title };
                html.push_str(&format!(
                    "<li><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a> <span class=\"muted\">(review snippet)</span></li>",
                    safe_href(&s.uri),
                    escape(label)
                ));
            }
            html.push_str("</ul>");
        }
        html.push_str("</li>");
    }
    html.push_str("</ul>");
    html
}
