//! Content sources - where raw documents and listing pages come from

mod local;
mod prismic;

pub use local::LocalSource;
pub use prismic::PrismicSource;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::content::{AdjacentPostRef, Cursor, ListingPage, RawContentDocument};
use crate::error::Result;

/// Listing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ordering {
    FirstPublicationAsc,
    FirstPublicationDesc,
    LastPublicationAsc,
    /// Most recently edited first
    #[default]
    LastPublicationDesc,
}

impl Ordering {
    /// Orderings parameter understood by the content API
    pub fn as_api_param(self) -> &'static str {
        match self {
            Ordering::FirstPublicationAsc => "[document.first_publication_date]",
            Ordering::FirstPublicationDesc => "[document.first_publication_date desc]",
            Ordering::LastPublicationAsc => "[document.last_publication_date]",
            Ordering::LastPublicationDesc => "[document.last_publication_date desc]",
        }
    }
}

/// Options for the initial listing query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    pub page_size: usize,
    pub ordering: Ordering,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            page_size: 3,
            ordering: Ordering::default(),
        }
    }
}

/// Read access to the content API.
///
/// Failures surface as [`Error::NotFound`](crate::Error::NotFound) or
/// [`Error::TransientFetch`](crate::Error::TransientFetch); sources never
/// retry.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// First page of the post listing
    async fn query(&self, options: &QueryOptions) -> Result<ListingPage>;

    /// The page a cursor points at ("load more")
    async fn fetch_page(&self, cursor: &Cursor) -> Result<ListingPage>;

    /// One post document
    async fn get_by_uid(&self, uid: &str) -> Result<RawContentDocument>;

    /// Previous and next posts by first publication date
    async fn neighbors(
        &self,
        doc: &RawContentDocument,
    ) -> Result<(Option<AdjacentPostRef>, Option<AdjacentPostRef>)>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_config_names() {
        let ordering: Ordering = serde_yaml::from_str("first_publication_desc").unwrap();
        assert_eq!(ordering, Ordering::FirstPublicationDesc);
        assert_eq!(
            Ordering::default().as_api_param(),
            "[document.last_publication_date desc]"
        );
    }
}
