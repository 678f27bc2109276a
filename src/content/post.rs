//! Post view models

use serde::{Deserialize, Serialize};
use std::fmt;

use super::document::RawContentDocument;
use crate::error::{Error, Result};

/// HTML that has already been sanitized and may be injected as-is.
///
/// Only the rich-text renderer and the comment widget construct these, so the
/// sanitization boundary is visible in the types handed to the rendering host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TrustedHtml(String);

impl TrustedHtml {
    pub(crate) fn new(html: String) -> Self {
        Self(html)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TrustedHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A display-ready post
#[derive(Debug, Clone, Serialize)]
pub struct PostViewModel {
    /// Document uid, also the `/post/{uid}` path segment
    pub uid: String,

    /// First publication date, e.g. `15 mar 2021`
    pub first_publication_date: Option<String>,

    /// Edit notice, only when the post changed after publication
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_publication_date: Option<String>,

    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub banner_url: Option<String>,

    /// Heading + rendered body pairs, in document order
    pub content: Vec<ContentSection>,

    /// Whole minutes, at least one
    pub estimated_reading_minutes: u32,

    /// The post published just before this one
    pub predecessor: Option<AdjacentPostRef>,

    /// The post published just after this one
    pub successor: Option<AdjacentPostRef>,
}

impl PostViewModel {
    /// Site-relative path of the post page
    pub fn path(&self) -> String {
        post_path(&self.uid)
    }
}

/// One heading with its rendered body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentSection {
    pub heading: String,
    pub body: TrustedHtml,
}

/// Link target for previous/next navigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjacentPostRef {
    pub uid: String,
    pub title: String,
}

impl AdjacentPostRef {
    pub fn path(&self) -> String {
        post_path(&self.uid)
    }

    /// Build a reference from a raw document, requiring uid and title.
    pub fn from_document(doc: &RawContentDocument) -> Result<Self> {
        let summary = PostSummary::from_document(doc)?;
        Ok(Self {
            uid: summary.uid,
            title: summary.title,
        })
    }
}

/// A listing entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub uid: String,
    /// Raw ISO-8601 timestamp, formatted by the caller
    pub first_publication_date: Option<String>,
    pub title: String,
    pub subtitle: String,
    pub author: String,
}

impl PostSummary {
    /// Extract the listing fields of a raw document
    pub fn from_document(doc: &RawContentDocument) -> Result<Self> {
        let uid = doc
            .uid
            .clone()
            .filter(|u| !u.is_empty())
            .ok_or_else(|| Error::malformed(None, "missing uid"))?;
        let title = doc
            .data
            .title
            .clone()
            .ok_or_else(|| Error::malformed(Some(&uid), "missing title"))?;

        Ok(Self {
            first_publication_date: doc.first_publication_date.clone(),
            subtitle: doc.data.subtitle.clone().unwrap_or_default(),
            author: doc.data.author.clone().unwrap_or_default(),
            uid,
            title,
        })
    }

    pub fn path(&self) -> String {
        post_path(&self.uid)
    }
}

/// `/post/{uid}`
pub fn post_path(uid: &str) -> String {
    format!("/post/{}", uid)
}
