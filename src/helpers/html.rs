//! HTML helper functions

use crate::config::CommentsConfig;
use crate::content::TrustedHtml;

/// Id of the element the comment widget script is injected into
pub const COMMENTS_ANCHOR_ID: &str = "inject-comments-for-uterances";

const UTTERANCES_CLIENT: &str = "https://utteranc.es/client.js";

/// Generate the utterances comment widget script tag.
///
/// Returns `None` when no comment repository is configured.
///
/// # Examples
/// ```ignore
/// comments_script(&config) // -> <script src="https://utteranc.es/client.js" ...></script>
/// ```
pub fn comments_script(config: &CommentsConfig) -> Option<TrustedHtml> {
    if !config.enabled() {
        return None;
    }

    Some(TrustedHtml::new(format!(
        r#"<script src="{}" repo="{}" issue-term="{}" theme="{}" crossorigin="anonymous" async></script>"#,
        UTTERANCES_CLIENT,
        html_escape(&config.repo),
        html_escape(&config.issue_term),
        html_escape(&config.theme)
    )))
}

/// Anchor element plus script, ready to place below a post
pub fn comments_block(config: &CommentsConfig) -> Option<TrustedHtml> {
    let script = comments_script(config)?;
    Some(TrustedHtml::new(format!(
        r#"<div id="{}">{}</div>"#,
        COMMENTS_ANCHOR_ID, script
    )))
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Truncate a string to a specified length
pub fn truncate(s: &str, length: usize, omission: Option<&str>) -> String {
    let omission = omission.unwrap_or("...");

    if s.chars().count() <= length {
        s.to_string()
    } else {
        let truncated: String = s
            .chars()
            .take(length.saturating_sub(omission.chars().count()))
            .collect();
        format!("{}{}", truncated.trim_end(), omission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comments() -> CommentsConfig {
        CommentsConfig {
            repo: "someone/blog-comments".to_string(),
            ..CommentsConfig::default()
        }
    }

    #[test]
    fn test_comments_script() {
        let html = comments_script(&comments()).unwrap();
        assert!(html.as_str().contains(r#"src="https://utteranc.es/client.js""#));
        assert!(html.as_str().contains(r#"repo="someone/blog-comments""#));
        assert!(html.as_str().contains(r#"issue-term="pathname""#));
        assert!(html.as_str().contains(r#"theme="photon-dark""#));
        assert!(html.as_str().contains("crossorigin=\"anonymous\" async"));
    }

    #[test]
    fn test_comments_disabled_without_repo() {
        assert!(comments_script(&CommentsConfig::default()).is_none());
        assert!(comments_block(&CommentsConfig::default()).is_none());
    }

    #[test]
    fn test_comments_block_wraps_anchor() {
        let html = comments_block(&comments()).unwrap();
        assert!(html
            .as_str()
            .starts_with(r#"<div id="inject-comments-for-uterances"><script"#));
        assert!(html.as_str().ends_with("</script></div>"));
    }

    #[test]
    fn test_comments_attributes_escaped() {
        let config = CommentsConfig {
            repo: "a\"><script>".to_string(),
            ..CommentsConfig::default()
        };
        let html = comments_script(&config).unwrap();
        assert!(!html.as_str().contains("\"><script>"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 8, None), "Hello...");
        assert_eq!(truncate("Hi", 10, None), "Hi");
        assert_eq!(truncate("Sincronização total", 10, Some("…")), "Sincroniz…");
    }
}
