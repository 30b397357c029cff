//! Reddit provider: the remote API collaborator and its wire adapters

pub mod client;
pub mod listing;

#[cfg(test)]
pub mod fake;

use crate::content::model::{Comment, CommentNode, Continuation, Forest, Post, SavedItem};
use crate::error::AppError;

pub use client::RedditClient;

/// Remote API operations the tools depend on.
///
/// Implemented by [`RedditClient`] against the live API and by `fake::FakeReddit` in tests.
#[allow(async_fn_in_trait)]
pub trait RedditApi {
    /// Name of the authenticated user, `None` when the session has no user
    async fn current_user(&self) -> Result<Option<String>, AppError>;

    async fn fetch_submission(&self, id: &str) -> Result<Post, AppError>;

    /// Top-level comment listing of a submission, markers left unexpanded
    async fn fetch_comments(&self, submission_id: &str) -> Result<Vec<CommentNode>, AppError>;

    /// Replace one continuation marker by the nodes it stands for, in provider order
    async fn expand_continuation(
        &self,
        submission_id: &str,
        marker: &Continuation,
    ) -> Result<Vec<CommentNode>, AppError>;

    /// Nested comment tree bounded upstream by `limit` and `depth`
    async fn fetch_comment_tree(
        &self,
        post_id: &str,
        sort: &str,
        limit: u32,
        depth: u32,
    ) -> Result<Forest, AppError>;

    async fn post_reply(&self, comment_id: &str, body: &str) -> Result<Comment, AppError>;

    async fn list_saved_items(&self, user: &str, limit: u32) -> Result<Vec<SavedItem>, AppError>;

    /// Search posts; `scope` restricts to one subreddit
    async fn search_posts(&self, query: &SearchQuery<'_>) -> Result<Vec<Post>, AppError>;
}

/// Parameters of a post search
#[derive(Debug, Clone, Copy)]
pub struct SearchQuery<'a> {
    pub query: &'a str,
    pub scope: Option<&'a str>,
    pub sort: &'a str,
    pub time_filter: Option<&'a str>,
    pub limit: u32,
}
