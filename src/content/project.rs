//! Projection of posts and comments into the summaries returned to tool callers

use super::model::{Comment, Post, SavedItem};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSummary {
    pub title: String,
    pub url: String,
    pub author: String,
    pub subreddit: String,
    pub created_utc: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentSummary {
    pub id: String,
    pub author: String,
    pub body: String,
    pub score: i64,
    pub created_utc: f64,
}

impl From<&Post> for PostSummary {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            url: post.url.clone(),
            author: post.author_name().to_string(),
            subreddit: post.subreddit.clone(),
            created_utc: post.created_utc,
        }
    }
}

impl From<&Comment> for CommentSummary {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id.clone(),
            author: comment.author_name().to_string(),
            body: comment.body.clone(),
            score: comment.score,
            created_utc: comment.created_utc,
        }
    }
}

/// Summarize saved submissions, skipping saved comments.
///
/// `limit` was already applied upstream to the raw saved listing; filtered-out
/// items do not count, so the result can be shorter than `limit`.
pub fn project_saved(items: &[SavedItem], limit: usize, subreddit: Option<&str>) -> Vec<PostSummary> {
    let wanted = subreddit
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    items
        .iter()
        .filter_map(|item| match item {
            SavedItem::Post(post) => Some(post),
            SavedItem::Comment(_) => None,
        })
        .filter(|post| match &wanted {
            Some(name) => post.subreddit.to_lowercase() == *name,
            None => true,
        })
        .take(limit)
        .map(PostSummary::from)
        .collect()
}

pub fn project_search(posts: &[Post], limit: usize) -> Vec<PostSummary> {
    posts.iter().take(limit).map(PostSummary::from).collect()
}

pub fn project_comments<'a, I>(comments: I, limit: usize) -> Vec<CommentSummary>
where
    I: IntoIterator<Item = &'a Comment>,
{
    comments
        .into_iter()
        .take(limit)
        .map(CommentSummary::from)
        .collect()
}
