//! Post classification: content kind and primary content field

use super::model::{Post, PostKind};
use url::Url;

const REDDIT_ORIGIN: &str = "https://www.reddit.com";

/// Determine a post's kind; first matching rule wins
pub fn classify(post: &Post) -> PostKind {
    if post.is_self || post.kind_hint == Some(PostKind::Text) {
        PostKind::Text
    } else if post.is_video || post.kind_hint == Some(PostKind::Video) {
        PostKind::Video
    } else if post.kind_hint == Some(PostKind::Gallery) || is_gallery_url(&post.url) {
        PostKind::Gallery
    } else if !post.url.trim().is_empty() {
        PostKind::Link
    } else {
        PostKind::Unknown
    }
}

/// Extract the field that carries the post's content for its kind
pub fn extract_content(post: &Post) -> Option<String> {
    match classify(post) {
        PostKind::Text => Some(post.body.clone()),
        PostKind::Video | PostKind::Link => Some(post.url.clone()),
        PostKind::Gallery => Some(gallery_reference(post)),
        PostKind::Unknown => None,
    }
}

fn gallery_reference(post: &Post) -> String {
    if post.permalink.is_empty() {
        post.url.clone()
    } else if post.permalink.starts_with('/') {
        format!("{}{}", REDDIT_ORIGIN, post.permalink)
    } else {
        post.permalink.clone()
    }
}

/// True when a path segment of the URL is `gallery` (e.g. `reddit.com/gallery/<id>`)
fn is_gallery_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => parsed
            .path_segments()
            .map(|mut segments| segments.any(|s| s.eq_ignore_ascii_case("gallery")))
            .unwrap_or(false),
        Err(_) => url.contains("/gallery/"),
    }
}
