//! Presentation of verification results.
//!
//! Everything here is pure: it takes parsed model output and returns markup
//! or text. HTML produced by this module is self-contained (inline SVG, one
//! embedded stylesheet, no scripts) so it can be written to a file, served by
//! the web front-end, or embedded elsewhere.

pub mod landscape;
pub mod markdown;
pub mod meter;
pub mod report;
pub mod sources;
pub mod text;

pub use markdown::markdown_to_html;
pub use report::{render_card, render_page};
pub use text::render_summary;

/// Escape text for HTML element content and attribute values.
#[must_use]
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape a URL for an `href`, replacing anything that is not http(s) or
/// mailto with `#`.
#[must_use]
pub fn safe_href(url: &str) -> String {
    let lower = url.trim_start().to_lowercase();
    let allowed = ["http://", "https://", "mailto:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme));
    if allowed {
        escape(url.trim())
    } else {
        "#".to_string()
    }
}
