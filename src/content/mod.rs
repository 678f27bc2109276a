//! Content module - raw documents, view models and listing pagination

mod builder;
mod document;
mod listing;
mod post;
mod rich_text;

pub use builder::{PostViewModelBuilder, WORDS_PER_MINUTE};
pub use document::{
    Banner, Oembed, RawContentBlock, RawContentDocument, RawPostData, RichTextBlock, Span,
    SpanData,
};
pub use listing::{Cursor, ListingPage, ListingState};
pub use post::{post_path, AdjacentPostRef, ContentSection, PostSummary, PostViewModel, TrustedHtml};
pub use rich_text::{as_text, HtmlRenderer, RichTextRenderer};
