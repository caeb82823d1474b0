use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use super::{escape, safe_href};

/// Converts the model's markdown explanations to HTML.
///
/// Headings clamp to `h1`–`h3` and carry an `md-hN` class. Blank lines
/// separate paragraphs, single newlines become `<br/>`. All text is escaped;
/// raw HTML in the input is shown as text.
pub fn markdown_to_html(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let mut out = String::with_capacity(text.len() * 2);
    let parser = Parser::new_ext(text, Options::ENABLE_STRIKETHROUGH);

    for event in parser {
        match event {
            Event::Start(tag) => open_tag(&mut out, tag),
            Event::End(tag) => close_tag(&mut out, tag),
            Event::Text(t) => out.push_str(&escape(&t)),
            Event::Code(c) => {
                out.push_str("<code>");
                out.push_str(&escape(&c));
                out.push_str("</code>");
            }
            Event::Html(h) | Event::InlineHtml(h) => out.push_str(&escape(&h)),
            Event::SoftBreak | Event::HardBreak => out.push_str("<br/>"),
            Event::Rule => out.push_str("<hr/>"),
            _ => {}
        }
    }

    out
}

fn heading_number(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        _ => 3,
    }
}

fn open_tag(out: &mut String, tag: Tag<'_>) {
    match tag {
        Tag::Paragraph => out.push_str("<p>"),
        Tag::Heading { level, .. } => {
            let n = heading_number(level);
            out.push_str(&format!("<h{n} class=\"md-h{n}\">"));
        }
        Tag::Strong => out.push_str("<strong>"),
        Tag::Emphasis => out.push_str("<em>"),
        Tag::Strikethrough => out.push_str("<del>"),
        Tag::List(None) => out.push_str("<ul>"),
        Tag::List(Some(_)) => out.push_str("<ol>"),
        Tag::Item => out.push_str("<li>"),
        Tag::CodeBlock(_) => out.push_str("<pre><code>"),
        Tag::Link { dest_url, .. } => {
            out.push_str(&format!(
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">",
                safe_href(&dest_url)
            ));
        }
        // Images render as their alt text, block quotes as their content
        _ => {}
    }
}

fn close_tag(out: &mut String, tag: TagEnd) {
    match tag {
        TagEnd::Paragraph => out.push_str("</p>"),
        TagEnd::Heading(level) => {
            let n = heading_number(level);
            out.push_str(&format!("</h{n}>"));
        }
        TagEnd::Strong => out.push_str("</strong>"),
        TagEnd::Emphasis => out.push_str("</em>"),
        TagEnd::Strikethrough => out.push_str("</del>"),
        TagEnd::List(false) => out.push_str("</ul>"),
        TagEnd::List(true) => out.push_str("</ol>"),
        TagEnd::Item => out.push_str("</li>"),
        TagEnd::CodeBlock => out.push_str("</code></pre>"),
        TagEnd::Link => out.push_str("</a>"),
        _ => {}
    }
}
