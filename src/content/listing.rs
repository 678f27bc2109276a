//! Incremental listing pagination
//!
//! The home page shows one page of summaries and a "load more" control.
//! [`ListingState`] accumulates every page fetched so far and remembers the
//! cursor of the next one.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::post::PostSummary;
use crate::error::{Error, Result};

/// Opaque position in a paged listing
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One page of listing results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingPage {
    pub results: Vec<PostSummary>,
    pub next_page: Option<Cursor>,
}

/// Summaries accumulated over one page view
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListingState {
    results: Vec<PostSummary>,
    next_page: Option<Cursor>,
}

impl ListingState {
    /// Start from the first page
    pub fn initialize(first_page: ListingPage) -> Self {
        Self {
            results: first_page.results,
            next_page: first_page.next_page,
        }
    }

    /// Append the page fetched with the current cursor and advance to the
    /// page's own cursor.
    ///
    /// Fails with [`Error::NoMorePages`], leaving the state untouched, when
    /// the cursor is already exhausted.
    pub fn append_page(&mut self, next_page: ListingPage) -> Result<()> {
        if self.next_page.is_none() {
            return Err(Error::NoMorePages);
        }
        tracing::debug!(
            "Appending {} posts to listing of {}",
            next_page.results.len(),
            self.results.len()
        );
        self.results.extend(next_page.results);
        self.next_page = next_page.next_page;
        Ok(())
    }

    /// Whether "load more" should be offered
    pub fn has_more(&self) -> bool {
        self.next_page.is_some()
    }

    pub fn results(&self) -> &[PostSummary] {
        &self.results
    }

    pub fn next_page(&self) -> Option<&Cursor> {
        self.next_page.as_ref()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn into_results(self) -> Vec<PostSummary> {
        self.results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(uid: &str) -> PostSummary {
        PostSummary {
            uid: uid.to_string(),
            first_publication_date: None,
            title: uid.to_uppercase(),
            subtitle: String::new(),
            author: String::new(),
        }
    }

    fn page(uids: &[&str], next: Option<&str>) -> ListingPage {
        ListingPage {
            results: uids.iter().map(|u| summary(u)).collect(),
            next_page: next.map(Cursor::new),
        }
    }

    fn uids(state: &ListingState) -> Vec<&str> {
        state.results().iter().map(|p| p.uid.as_str()).collect()
    }

    #[test]
    fn test_initialize_copies_first_page() {
        let state = ListingState::initialize(page(&["a", "b"], Some("p2")));
        assert_eq!(uids(&state), ["a", "b"]);
        assert_eq!(state.next_page(), Some(&Cursor::new("p2")));
        assert!(state.has_more());
    }

    #[test]
    fn test_append_pages_in_arrival_order() {
        let mut state = ListingState::initialize(page(&["a", "b", "c"], Some("p2")));
        state.append_page(page(&["d", "e", "f"], Some("p3"))).unwrap();
        state.append_page(page(&["g"], None)).unwrap();

        assert_eq!(state.len(), 7);
        assert_eq!(uids(&state), ["a", "b", "c", "d", "e", "f", "g"]);
        assert_eq!(state.next_page(), None);
        assert!(!state.has_more());
    }

    #[test]
    fn test_append_after_exhausted_cursor_fails() {
        let mut state = ListingState::initialize(page(&["a"], None));
        let before = state.clone();

        let err = state.append_page(page(&["b"], Some("p9"))).unwrap_err();
        assert!(matches!(err, Error::NoMorePages));
        assert_eq!(state, before);
    }

    #[test]
    fn test_empty_pages() {
        let mut state = ListingState::initialize(ListingPage::default());
        assert!(state.is_empty());
        assert!(!state.has_more());

        let mut state2 = ListingState::initialize(page(&[], Some("p2")));
        state2.append_page(page(&[], None)).unwrap();
        assert!(state2.is_empty());
        assert!(state.append_page(page(&[], None)).is_err());
    }

    #[test]
    fn test_no_dedup_or_sorting() {
        let mut state = ListingState::initialize(page(&["z", "a"], Some("p2")));
        state.append_page(page(&["a"], None)).unwrap();
        assert_eq!(uids(&state), ["z", "a", "a"]);
    }
}
