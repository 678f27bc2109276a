//! Build a single post page

use anyhow::Result;
use serde::Serialize;

use crate::content::{PostViewModel, TrustedHtml};
use crate::helpers::comments_block;
use crate::source::ContentSource;
use crate::Blog;

/// Everything the rendering host needs for `/post/{uid}`
#[derive(Debug, Clone, Serialize)]
pub struct PostPage {
    pub path: String,
    #[serde(flatten)]
    pub post: PostViewModel,
    /// Comment widget anchor and script
    pub comments: Option<TrustedHtml>,
}

/// Fetch a post and its neighbors, then build the page
pub async fn load_post(
    blog: &Blog,
    source: &dyn ContentSource,
    uid: &str,
) -> crate::Result<PostPage> {
    let raw = source.get_by_uid(uid).await?;
    let (predecessor, successor) = source.neighbors(&raw).await?;
    let post = blog.builder()?.build(&raw, predecessor, successor)?;

    Ok(PostPage {
        path: post.path(),
        comments: comments_block(&blog.config.comments),
        post,
    })
}

/// Print a post page as JSON
pub async fn run(blog: &Blog, source: &dyn ContentSource, uid: &str) -> Result<()> {
    let page = load_post(blog, source, uid).await?;
    println!("{}", serde_json::to_string_pretty(&page)?);
    Ok(())
}
