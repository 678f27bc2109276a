//! Raw content API documents
//!
//! These mirror the JSON the content API returns. Everything is optional or
//! defaulted at this layer; required fields are checked when a document is
//! turned into a view model.

use serde::{Deserialize, Serialize};

/// One document as returned by the content API
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawContentDocument {
    #[serde(default)]
    pub uid: Option<String>,

    #[serde(default)]
    pub first_publication_date: Option<String>,

    #[serde(default)]
    pub last_publication_date: Option<String>,

    #[serde(default)]
    pub data: RawPostData,
}

/// The `data` map of a post document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPostData {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub subtitle: Option<String>,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub banner: Option<Banner>,

    #[serde(default)]
    pub content: Vec<RawContentBlock>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Banner {
    #[serde(default)]
    pub url: Option<String>,
}

/// A heading with its rich-text body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawContentBlock {
    #[serde(default)]
    pub heading: String,

    #[serde(default)]
    pub body: Vec<RichTextBlock>,
}

/// One paragraph-level rich-text unit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RichTextBlock {
    #[serde(rename = "type", default = "default_block_type")]
    pub block_type: String,

    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub spans: Vec<Span>,

    /// Image source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Image alt text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,

    /// Embed payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oembed: Option<Oembed>,
}

fn default_block_type() -> String {
    "paragraph".to_string()
}

impl RichTextBlock {
    pub fn paragraph(text: &str) -> Self {
        Self {
            block_type: default_block_type(),
            text: text.to_string(),
            ..Default::default()
        }
    }
}

/// Inline formatting over a character range of a block's text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    #[serde(rename = "type")]
    pub span_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<SpanData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpanData {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Oembed {
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub embed_url: Option<String>,
}
