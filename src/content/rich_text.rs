//! Rich-text rendering
//!
//! Turns the content API's structured rich-text blocks into HTML. All text
//! and attribute values are escaped and link targets are restricted to safe
//! schemes, so the output can be wrapped in [`TrustedHtml`].

use super::document::{RichTextBlock, Span};
use super::post::TrustedHtml;
use crate::helpers::html_escape;

/// Converts rich-text blocks to sanitized HTML. Must be total.
pub trait RichTextRenderer {
    fn render_to_html(&self, blocks: &[RichTextBlock]) -> TrustedHtml;
}

/// Plain text of a block sequence, one block per line
pub fn as_text(blocks: &[RichTextBlock]) -> String {
    blocks
        .iter()
        .map(|b| b.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Default renderer for the content API's rich-text format
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl RichTextRenderer for HtmlRenderer {
    fn render_to_html(&self, blocks: &[RichTextBlock]) -> TrustedHtml {
        let mut html = String::new();
        // Currently open list wrapper, if any
        let mut list: Option<&'static str> = None;

        for block in blocks {
            let wrapper = match block.block_type.as_str() {
                "list-item" => Some("ul"),
                "o-list-item" => Some("ol"),
                _ => None,
            };

            if list != wrapper {
                if let Some(tag) = list {
                    html.push_str(&format!("</{}>", tag));
                }
                if let Some(tag) = wrapper {
                    html.push_str(&format!("<{}>", tag));
                }
                list = wrapper;
            }

            render_block(&mut html, block);
        }

        if let Some(tag) = list {
            html.push_str(&format!("</{}>", tag));
        }

        TrustedHtml::new(html)
    }
}

fn render_block(html: &mut String, block: &RichTextBlock) {
    match block.block_type.as_str() {
        "paragraph" => {
            html.push_str(&format!("<p>{}</p>", render_spans(&block.text, &block.spans)));
        }
        "heading1" | "heading2" | "heading3" | "heading4" | "heading5" | "heading6" => {
            let level = &block.block_type["heading".len()..];
            html.push_str(&format!(
                "<h{}>{}</h{}>",
                level,
                render_spans(&block.text, &block.spans),
                level
            ));
        }
        "list-item" | "o-list-item" => {
            html.push_str(&format!(
                "<li>{}</li>",
                render_spans(&block.text, &block.spans)
            ));
        }
        "preformatted" => {
            html.push_str(&format!("<pre>{}</pre>", html_escape(&block.text)));
        }
        "image" => {
            if let Some(src) = block.url.as_deref().and_then(safe_url) {
                html.push_str(&format!(
                    r#"<p class="block-img"><img src="{}" alt="{}"></p>"#,
                    html_escape(src),
                    html_escape(block.alt.as_deref().unwrap_or(""))
                ));
            }
        }
        "embed" => {
            // Third-party embed markup is not injected; link to the source.
            if let Some(url) = block
                .oembed
                .as_ref()
                .and_then(|o| o.embed_url.as_deref())
                .and_then(safe_url)
            {
                let url = html_escape(url);
                html.push_str(&format!(
                    r#"<div data-oembed="{}"><a href="{}" target="_blank" rel="noopener">{}</a></div>"#,
                    url, url, url
                ));
            }
        }
        other => {
            tracing::debug!("Rendering unknown rich-text block type {:?} as paragraph", other);
            html.push_str(&format!("<p>{}</p>", render_spans(&block.text, &block.spans)));
        }
    }
}

/// Render text with inline spans. Overlapping spans are closed and reopened
/// so the output stays well nested.
fn render_spans(text: &str, spans: &[Span]) -> String {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();

    let mut spans: Vec<&Span> = spans
        .iter()
        .filter(|s| s.start < s.end && s.start < len && open_tag(s).is_some())
        .collect();
    // Outer (longer) spans open first
    spans.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let end_of = |s: &Span| s.end.min(len);
    let mut out = String::with_capacity(text.len());
    let mut open: Vec<&Span> = Vec::new();
    let mut next = 0;

    for i in 0..=len {
        if open.iter().any(|s| end_of(s) == i) {
            let mut reopen = Vec::new();
            while let Some(s) = open.pop() {
                out.push_str(close_tag(s));
                if end_of(s) != i {
                    reopen.push(s);
                }
                if !open.iter().any(|s| end_of(s) == i) {
                    break;
                }
            }
            for s in reopen.into_iter().rev() {
                if let Some(tag) = open_tag(s) {
                    out.push_str(&tag);
                }
                open.push(s);
            }
        }

        if i == len {
            break;
        }

        while next < spans.len() && spans[next].start == i {
            if let Some(tag) = open_tag(spans[next]) {
                out.push_str(&tag);
            }
            open.push(spans[next]);
            next += 1;
        }

        match chars[i] {
            '\n' => out.push_str("<br />"),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }

    out
}

fn open_tag(span: &Span) -> Option<String> {
    match span.span_type.as_str() {
        "strong" => Some("<strong>".to_string()),
        "em" => Some("<em>".to_string()),
        "hyperlink" => {
            let data = span.data.as_ref()?;
            let url = data.url.as_deref().and_then(safe_url)?;
            let target = match data.target.as_deref() {
                Some("_blank") => r#" target="_blank" rel="noopener""#,
                _ => "",
            };
            Some(format!(r#"<a href="{}"{}>"#, html_escape(url), target))
        }
        _ => None,
    }
}

fn close_tag(span: &Span) -> &'static str {
    match span.span_type.as_str() {
        "strong" => "</strong>",
        "em" => "</em>",
        "hyperlink" => "</a>",
        _ => "",
    }
}

/// Allow only web, mail and site-relative links
fn safe_url(url: &str) -> Option<&str> {
    let url = url.trim();
    let lower = url.to_ascii_lowercase();
    let allowed = lower.starts_with("https://")
        || lower.starts_with("http://")
        || lower.starts_with("mailto:")
        || (url.starts_with('/') && !url.starts_with("//"));
    allowed.then_some(url)
}
