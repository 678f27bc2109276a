//! Local content source - documents stored as JSON files
//!
//! Every `*.json` file under the content directory holds one document in the
//! content API's own shape. Useful for fixtures and offline builds.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use std::cmp;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{ContentSource, Ordering, QueryOptions};
use crate::content::{AdjacentPostRef, Cursor, ListingPage, PostSummary, RawContentDocument};
use crate::error::{Error, Result};
use crate::helpers::parse_timestamp;

const CURSOR_PREFIX: &str = "local";

/// Serves documents loaded from a directory
#[derive(Debug, Clone)]
pub struct LocalSource {
    dir: PathBuf,
    documents: Vec<RawContentDocument>,
}

impl LocalSource {
    /// Load all documents under `dir`. Files that fail to parse or lack a
    /// uid/title are skipped with a warning.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        if !dir.is_dir() {
            return Err(Error::Config(format!(
                "Content directory {:?} does not exist",
                dir
            )));
        }

        let mut documents = Vec::new();

        for entry in WalkDir::new(&dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_json_file(path) {
                match load_document(path) {
                    Ok(doc) => documents.push(doc),
                    Err(e) => {
                        tracing::warn!("Failed to load document {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::debug!("Loaded {} documents from {:?}", documents.len(), dir);

        Ok(Self { dir, documents })
    }

    pub fn from_documents(documents: Vec<RawContentDocument>) -> Self {
        Self {
            dir: PathBuf::new(),
            documents,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    fn sorted(&self, ordering: Ordering) -> Vec<&RawContentDocument> {
        let mut docs: Vec<_> = self.documents.iter().collect();
        let (key, descending): (fn(&RawContentDocument) -> Option<&str>, bool) = match ordering {
            Ordering::FirstPublicationAsc => (first_date, false),
            Ordering::FirstPublicationDesc => (first_date, true),
            Ordering::LastPublicationAsc => (last_date, false),
            Ordering::LastPublicationDesc => (last_date, true),
        };
        // Stable sort; undated documents go last either way
        docs.sort_by(|a, b| {
            let a = key(a).and_then(|s| parse_timestamp(s).ok());
            let b = key(b).and_then(|s| parse_timestamp(s).ok());
            compare_dates(a, b, descending)
        });
        docs
    }

    fn page(&self, ordering: Ordering, offset: usize, page_size: usize) -> ListingPage {
        let page_size = page_size.max(1);
        let docs = self.sorted(ordering);

        let results = docs
            .iter()
            .skip(offset)
            .take(page_size)
            .filter_map(|d| PostSummary::from_document(d).ok())
            .collect();

        let next_offset = offset.saturating_add(page_size);
        let next_page = (next_offset < docs.len())
            .then(|| encode_cursor(ordering, next_offset, page_size));

        ListingPage { results, next_page }
    }
}

#[async_trait]
impl ContentSource for LocalSource {
    async fn query(&self, options: &QueryOptions) -> Result<ListingPage> {
        Ok(self.page(options.ordering, 0, options.page_size))
    }

    async fn fetch_page(&self, cursor: &Cursor) -> Result<ListingPage> {
        let (ordering, offset, page_size) = decode_cursor(cursor)
            .ok_or_else(|| Error::NotFound(format!("page for cursor {}", cursor)))?;
        Ok(self.page(ordering, offset, page_size))
    }

    async fn get_by_uid(&self, uid: &str) -> Result<RawContentDocument> {
        self.documents
            .iter()
            .find(|d| d.uid.as_deref() == Some(uid))
            .cloned()
            .ok_or_else(|| Error::NotFound(uid.to_string()))
    }

    async fn neighbors(
        &self,
        doc: &RawContentDocument,
    ) -> Result<(Option<AdjacentPostRef>, Option<AdjacentPostRef>)> {
        let docs = self.sorted(Ordering::FirstPublicationAsc);
        let Some(pos) = docs.iter().position(|d| d.uid.is_some() && d.uid == doc.uid) else {
            return Ok((None, None));
        };

        let prev = pos
            .checked_sub(1)
            .and_then(|i| docs.get(i))
            .map(|d| AdjacentPostRef::from_document(d))
            .transpose()?;
        let next = docs
            .get(pos + 1)
            .map(|d| AdjacentPostRef::from_document(d))
            .transpose()?;

        Ok((prev, next))
    }
}

fn first_date(doc: &RawContentDocument) -> Option<&str> {
    doc.first_publication_date.as_deref()
}

fn last_date(doc: &RawContentDocument) -> Option<&str> {
    doc.last_publication_date.as_deref()
}

fn compare_dates(
    a: Option<DateTime<FixedOffset>>,
    b: Option<DateTime<FixedOffset>>,
    descending: bool,
) -> cmp::Ordering {
    match (a, b) {
        (Some(a), Some(b)) if descending => b.cmp(&a),
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => cmp::Ordering::Less,
        (None, Some(_)) => cmp::Ordering::Greater,
        (None, None) => cmp::Ordering::Equal,
    }
}

fn encode_cursor(ordering: Ordering, offset: usize, page_size: usize) -> Cursor {
    Cursor::new(format!(
        "{}:{}:{}:{}",
        CURSOR_PREFIX,
        ordering.as_api_param(),
        offset,
        page_size
    ))
}

fn decode_cursor(cursor: &Cursor) -> Option<(Ordering, usize, usize)> {
    let rest = cursor.as_str().strip_prefix(CURSOR_PREFIX)?.strip_prefix(':')?;
    let mut parts = rest.rsplitn(3, ':');
    let page_size: usize = parts.next()?.parse().ok()?;
    let offset: usize = parts.next()?.parse().ok()?;
    // The next page's offset must stay representable
    offset.checked_add(cmp::max(page_size, 1))?;
    let param = parts.next()?;
    let ordering = [
        Ordering::FirstPublicationAsc,
        Ordering::FirstPublicationDesc,
        Ordering::LastPublicationAsc,
        Ordering::LastPublicationDesc,
    ]
    .into_iter()
    .find(|o| o.as_api_param() == param)?;
    Some((ordering, offset, page_size))
}

fn load_document(path: &Path) -> Result<RawContentDocument> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Cannot read {:?}: {}", path, e)))?;
    let doc: RawContentDocument = serde_json::from_str(&content)
        .map_err(|e| Error::malformed(None, format!("{:?}: {}", path, e)))?;
    // Listing entries need a uid and a title
    PostSummary::from_document(&doc)?;
    Ok(doc)
}

/// Check if a file is a JSON file
fn is_json_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}
