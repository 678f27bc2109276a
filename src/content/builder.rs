//! Post view-model builder
//!
//! Turns one raw content API document into a [`PostViewModel`]: formatted
//! publication and edit dates, rendered content sections and a reading-time
//! estimate. Neighbor resolution happens elsewhere; the builder only attaches
//! the references it is given.

use super::document::RawContentDocument;
use super::post::{AdjacentPostRef, ContentSection, PostViewModel};
use super::rich_text::{as_text, HtmlRenderer, RichTextRenderer};
use crate::error::{Error, Result};
use crate::helpers::{count_words, parse_timestamp, reading_minutes, DateFormatter};

/// Default reading speed
pub const WORDS_PER_MINUTE: u32 = 200;

/// Builds post view models
pub struct PostViewModelBuilder<R = HtmlRenderer> {
    renderer: R,
    dates: DateFormatter,
    words_per_minute: u32,
}

impl PostViewModelBuilder<HtmlRenderer> {
    /// Builder with the default renderer, pt-BR dates in UTC and 200 wpm
    pub fn new() -> Self {
        Self::with_renderer(HtmlRenderer::new(), DateFormatter::default())
    }
}

impl Default for PostViewModelBuilder<HtmlRenderer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RichTextRenderer> PostViewModelBuilder<R> {
    pub fn with_renderer(renderer: R, dates: DateFormatter) -> Self {
        Self {
            renderer,
            dates,
            words_per_minute: WORDS_PER_MINUTE,
        }
    }

    pub fn words_per_minute(mut self, wpm: u32) -> Self {
        self.words_per_minute = wpm;
        self
    }

    pub fn dates(&self) -> &DateFormatter {
        &self.dates
    }

    /// Build the view model for `raw`.
    ///
    /// Fails with [`Error::MalformedDocument`] when the uid or title is
    /// missing or a timestamp does not parse.
    pub fn build(
        &self,
        raw: &RawContentDocument,
        predecessor: Option<AdjacentPostRef>,
        successor: Option<AdjacentPostRef>,
    ) -> Result<PostViewModel> {
        let uid = raw
            .uid
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or_else(|| Error::malformed(None, "missing uid"))?;
        let title = raw
            .data
            .title
            .as_deref()
            .ok_or_else(|| Error::malformed(Some(uid), "missing title"))?;

        let parse = |field: &str, value: &Option<String>| {
            value
                .as_deref()
                .map(|s| {
                    parse_timestamp(s).map_err(|e| {
                        Error::malformed(Some(uid), format!("invalid {} {:?}: {}", field, s, e))
                    })
                })
                .transpose()
        };
        let first = parse("first_publication_date", &raw.first_publication_date)?;
        let last = parse("last_publication_date", &raw.last_publication_date)?;

        let first_publication_date = first.as_ref().map(|d| self.dates.publication_date(d));
        let last_publication_date = match (&first, &last) {
            (Some(first), Some(last)) if first != last => Some(self.dates.edited_on(last)),
            _ => None,
        };

        let mut words = 0;
        let content: Vec<ContentSection> = raw
            .data
            .content
            .iter()
            .map(|block| {
                words += count_words(&block.heading) + count_words(&as_text(&block.body));
                ContentSection {
                    heading: block.heading.clone(),
                    body: self.renderer.render_to_html(&block.body),
                }
            })
            .collect();

        let estimated_reading_minutes = reading_minutes(words, self.words_per_minute);

        tracing::debug!(
            "Built post {} ({} words, {} min)",
            uid,
            words,
            estimated_reading_minutes
        );

        Ok(PostViewModel {
            uid: uid.to_string(),
            first_publication_date,
            last_publication_date,
            title: title.to_string(),
            subtitle: raw.data.subtitle.clone().unwrap_or_default(),
            author: raw.data.author.clone().unwrap_or_default(),
            banner_url: raw.data.banner.as_ref().and_then(|b| b.url.clone()),
            content,
            estimated_reading_minutes,
            predecessor,
            successor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::document::{Banner, RawContentBlock, RawPostData, RichTextBlock};

    fn words(n: usize) -> String {
        vec!["lorem"; n].join(" ")
    }

    fn document(first: Option<&str>, last: Option<&str>) -> RawContentDocument {
        RawContentDocument {
            uid: Some("como-utilizar-hooks".to_string()),
            first_publication_date: first.map(str::to_string),
            last_publication_date: last.map(str::to_string),
            data: RawPostData {
                title: Some("Como utilizar Hooks".to_string()),
                subtitle: Some("Pensando em sincronização".to_string()),
                author: Some("Joseph Oliveira".to_string()),
                banner: Some(Banner {
                    url: Some("https://images.prismic.io/banner.png".to_string()),
                }),
                content: vec![RawContentBlock {
                    heading: "Hi there".to_string(),
                    body: vec![RichTextBlock::paragraph(&words(398))],
                }],
            },
        }
    }

    #[test]
    fn test_build_full_document() {
        let raw = document(Some("2021-03-15T19:25:28+0000"), Some("2021-03-15T19:25:28+0000"));
        let post = PostViewModelBuilder::new().build(&raw, None, None).unwrap();

        assert_eq!(post.uid, "como-utilizar-hooks");
        assert_eq!(post.first_publication_date.as_deref(), Some("15 mar 2021"));
        assert_eq!(post.last_publication_date, None);
        assert_eq!(post.title, "Como utilizar Hooks");
        assert_eq!(post.author, "Joseph Oliveira");
        assert_eq!(
            post.banner_url.as_deref(),
            Some("https://images.prismic.io/banner.png")
        );
        assert_eq!(post.content.len(), 1);
        assert_eq!(post.content[0].heading, "Hi there");
        assert!(post.content[0].body.as_str().starts_with("<p>lorem"));
        assert_eq!(post.estimated_reading_minutes, 2);
    }

    #[test]
    fn test_edit_date_present_when_timestamps_differ() {
        let raw = document(Some("2021-03-15T19:25:28+0000"), Some("2021-03-19T15:49:00+0000"));
        let post = PostViewModelBuilder::new().build(&raw, None, None).unwrap();
        assert_eq!(
            post.last_publication_date.as_deref(),
            Some("* editado em 19 mar 2021, às 15:49")
        );
    }

    #[test]
    fn test_same_instant_different_encoding_has_no_edit_date() {
        let raw = document(Some("2021-03-15T19:25:28+0000"), Some("2021-03-15T16:25:28-03:00"));
        let post = PostViewModelBuilder::new().build(&raw, None, None).unwrap();
        assert!(post.last_publication_date.is_none());

        let json = serde_json::to_value(&post).unwrap();
        assert!(json.get("last_publication_date").is_none());
    }

    #[test]
    fn test_null_dates() {
        let raw = document(None, Some("2021-03-19T15:49:00+0000"));
        let post = PostViewModelBuilder::new().build(&raw, None, None).unwrap();
        assert!(post.first_publication_date.is_none());
        assert!(post.last_publication_date.is_none());
    }

    #[test]
    fn test_malformed_timestamp() {
        let raw = document(Some("yesterday"), None);
        let err = PostViewModelBuilder::new().build(&raw, None, None).unwrap_err();
        assert!(matches!(err, Error::MalformedDocument { uid: Some(ref u), .. } if u == "como-utilizar-hooks"));

        let raw = document(Some("2021-03-15T19:25:28+0000"), Some("not a date"));
        assert!(PostViewModelBuilder::new().build(&raw, None, None).is_err());
    }

    #[test]
    fn test_missing_required_fields() {
        let mut raw = document(None, None);
        raw.uid = None;
        assert!(matches!(
            PostViewModelBuilder::new().build(&raw, None, None),
            Err(Error::MalformedDocument { .. })
        ));

        let mut raw = document(None, None);
        raw.data.title = None;
        assert!(matches!(
            PostViewModelBuilder::new().build(&raw, None, None),
            Err(Error::MalformedDocument { .. })
        ));
    }

    #[test]
    fn test_empty_content() {
        let mut raw = document(Some("2021-03-15T19:25:28+0000"), None);
        raw.data.content.clear();
        let post = PostViewModelBuilder::new().build(&raw, None, None).unwrap();
        assert!(post.content.is_empty());
        assert_eq!(post.estimated_reading_minutes, 1);
    }

    #[test]
    fn test_single_word_floors_at_one_minute() {
        let mut raw = document(None, None);
        raw.data.content = vec![RawContentBlock {
            heading: "Hello".to_string(),
            body: Vec::new(),
        }];
        let post = PostViewModelBuilder::new().build(&raw, None, None).unwrap();
        assert_eq!(post.estimated_reading_minutes, 1);
    }

    #[test]
    fn test_title_and_subtitle_not_counted() {
        let mut raw = document(None, None);
        raw.data.title = Some(words(500));
        raw.data.subtitle = Some(words(500));
        raw.data.content = vec![RawContentBlock {
            heading: String::new(),
            body: vec![RichTextBlock::paragraph(&words(200))],
        }];
        let post = PostViewModelBuilder::new().build(&raw, None, None).unwrap();
        assert_eq!(post.estimated_reading_minutes, 1);
    }

    #[test]
    fn test_words_counted_across_sections_and_blocks() {
        let mut raw = document(None, None);
        raw.data.content = vec![
            RawContentBlock {
                heading: "one two".to_string(),
                body: vec![
                    RichTextBlock::paragraph(&words(100)),
                    RichTextBlock::paragraph(&words(100)),
                ],
            },
            RawContentBlock {
                heading: "three".to_string(),
                body: vec![RichTextBlock::paragraph(&words(197))],
            },
        ];
        // 2 + 200 + 1 + 197 = 400 words
        let post = PostViewModelBuilder::new().build(&raw, None, None).unwrap();
        assert_eq!(post.estimated_reading_minutes, 2);

        let post = PostViewModelBuilder::new()
            .words_per_minute(100)
            .build(&raw, None, None)
            .unwrap();
        assert_eq!(post.estimated_reading_minutes, 4);
    }

    #[test]
    fn test_adjacent_refs_attached() {
        let raw = document(None, None);
        let prev = AdjacentPostRef {
            uid: "older".to_string(),
            title: "Older".to_string(),
        };
        let next = AdjacentPostRef {
            uid: "newer".to_string(),
            title: "Newer".to_string(),
        };
        let post = PostViewModelBuilder::new()
            .build(&raw, Some(prev.clone()), Some(next.clone()))
            .unwrap();
        assert_eq!(post.predecessor, Some(prev));
        assert_eq!(post.successor, Some(next));
        assert_eq!(post.successor.unwrap().path(), "/post/newer");
    }
}
