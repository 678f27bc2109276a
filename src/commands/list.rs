//! List posts, following "load more" cursors

use anyhow::Result;

use crate::content::ListingState;
use crate::helpers::{parse_timestamp, truncate, DateFormatter};
use crate::source::{ContentSource, QueryOptions};
use crate::Blog;

/// Fetch the first listing page, then up to `more` further pages.
///
/// Each fetch is awaited before its page is appended, so cursors are
/// consumed in order.
pub async fn load_listing(
    source: &dyn ContentSource,
    options: &QueryOptions,
    more: usize,
) -> crate::Result<ListingState> {
    let first = source.query(options).await?;
    let mut state = ListingState::initialize(first);

    for _ in 0..more {
        let Some(cursor) = state.next_page().cloned() else {
            tracing::debug!("Listing exhausted after {} posts", state.len());
            break;
        };
        let page = source.fetch_page(&cursor).await?;
        state.append_page(page)?;
    }

    Ok(state)
}

/// List posts: the first page plus `more` "load more" steps
pub async fn run(blog: &Blog, source: &dyn ContentSource, more: usize, json: bool) -> Result<()> {
    let state = load_listing(source, &blog.config.query_options(), more).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
        return Ok(());
    }

    let dates = blog.config.date_formatter()?;
    println!("Posts ({}):", state.len());
    for post in state.results() {
        println!(
            "  {} - {} [{}]",
            display_date(&dates, post.first_publication_date.as_deref()),
            post.title,
            post.path()
        );
        if !post.subtitle.is_empty() {
            println!("      {}", truncate(&post.subtitle, 72, None));
        }
        if !post.author.is_empty() {
            println!("      by {}", post.author);
        }
    }
    if state.has_more() {
        println!("(more posts available)");
    }

    Ok(())
}

fn display_date(dates: &DateFormatter, raw: Option<&str>) -> String {
    match raw.map(parse_timestamp) {
        Some(Ok(date)) => dates.publication_date(&date),
        Some(Err(_)) => raw.unwrap_or_default().to_string(),
        None => "-".to_string(),
    }
}
