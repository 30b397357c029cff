//! In-memory `RedditApi` used by unit tests

use super::{RedditApi, SearchQuery};
use crate::content::model::{
    Comment, CommentNode, Continuation, Forest, Post, RawComment, SavedItem,
};
use crate::error::AppError;
use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Default)]
pub struct FakeReddit {
    user: Option<String>,
    posts: HashMap<String, Post>,
    comments: Vec<CommentNode>,
    expansions: HashMap<String, Vec<CommentNode>>,
    expansion_delays: HashMap<String, Duration>,
    tree: Forest,
    saved: Vec<SavedItem>,
    search_results: Vec<Post>,
    reply_id: Option<String>,
    fail: bool,
    expanded: RefCell<Vec<String>>,
    saved_limits: RefCell<Vec<u32>>,
    tree_requests: RefCell<Vec<(String, u32, u32)>>,
    searches: RefCell<Vec<(String, Option<String>, String)>>,
}

impl FakeReddit {
    pub fn new() -> Self {
        Self {
            user: Some("tester".to_string()),
            ..Default::default()
        }
    }

    /// Every call fails with a provider error
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn without_user(mut self) -> Self {
        self.user = None;
        self
    }

    pub fn with_post(mut self, post: Post) -> Self {
        self.posts.insert(post.id.clone(), post);
        self
    }

    pub fn with_comments(mut self, comments: Vec<CommentNode>) -> Self {
        self.comments = comments;
        self
    }

    pub fn with_expansion(mut self, marker_id: &str, nodes: Vec<CommentNode>) -> Self {
        self.expansions.insert(marker_id.to_string(), nodes);
        self
    }

    /// Hold back one marker's expansion so siblings can finish first
    pub fn with_expansion_delay(mut self, marker_id: &str, delay: Duration) -> Self {
        self.expansion_delays.insert(marker_id.to_string(), delay);
        self
    }

    pub fn with_tree(mut self, tree: Forest) -> Self {
        self.tree = tree;
        self
    }

    pub fn with_saved(mut self, saved: Vec<SavedItem>) -> Self {
        self.saved = saved;
        self
    }

    pub fn with_search_results(mut self, posts: Vec<Post>) -> Self {
        self.search_results = posts;
        self
    }

    pub fn with_reply_id(mut self, id: &str) -> Self {
        self.reply_id = Some(id.to_string());
        self
    }

    /// Marker ids in the order their expansions completed
    pub fn expanded_markers(&self) -> Vec<String> {
        self.expanded.borrow().clone()
    }

    pub fn saved_limits(&self) -> Vec<u32> {
        self.saved_limits.borrow().clone()
    }

    pub fn tree_requests(&self) -> Vec<(String, u32, u32)> {
        self.tree_requests.borrow().clone()
    }

    pub fn searches(&self) -> Vec<(String, Option<String>, String)> {
        self.searches.borrow().clone()
    }

    fn check(&self) -> Result<(), AppError> {
        if self.fail {
            Err(AppError::Provider("503 Service Unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

impl RedditApi for FakeReddit {
    async fn current_user(&self) -> Result<Option<String>, AppError> {
        self.check()?;
        Ok(self.user.clone())
    }

    async fn fetch_submission(&self, id: &str) -> Result<Post, AppError> {
        self.check()?;
        self.posts
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("post {}", id)))
    }

    async fn fetch_comments(&self, _submission_id: &str) -> Result<Vec<CommentNode>, AppError> {
        self.check()?;
        Ok(self.comments.clone())
    }

    async fn expand_continuation(
        &self,
        _submission_id: &str,
        marker: &Continuation,
    ) -> Result<Vec<CommentNode>, AppError> {
        self.check()?;
        if let Some(delay) = self.expansion_delays.get(&marker.id) {
            tokio::time::sleep(*delay).await;
        }
        self.expanded.borrow_mut().push(marker.id.clone());
        Ok(self.expansions.get(&marker.id).cloned().unwrap_or_default())
    }

    async fn fetch_comment_tree(
        &self,
        post_id: &str,
        _sort: &str,
        limit: u32,
        depth: u32,
    ) -> Result<Forest, AppError> {
        self.check()?;
        self.tree_requests
            .borrow_mut()
            .push((post_id.to_string(), limit, depth));
        Ok(self.tree.clone())
    }

    async fn post_reply(&self, comment_id: &str, body: &str) -> Result<Comment, AppError> {
        self.check()?;
        let id = self
            .reply_id
            .clone()
            .ok_or_else(|| AppError::NotFound(format!("comment {}", comment_id)))?;
        Ok(Comment {
            id,
            author: self.user.clone(),
            body: body.to_string(),
            score: 1,
            created_utc: 1_700_000_000.0,
            replies: Vec::new(),
        })
    }

    async fn list_saved_items(&self, _user: &str, limit: u32) -> Result<Vec<SavedItem>, AppError> {
        self.check()?;
        self.saved_limits.borrow_mut().push(limit);
        Ok(self.saved.iter().take(limit as usize).cloned().collect())
    }

    async fn search_posts(&self, query: &SearchQuery<'_>) -> Result<Vec<Post>, AppError> {
        self.check()?;
        self.searches.borrow_mut().push((
            query.query.to_string(),
            query.scope.map(str::to_string),
            query.sort.to_string(),
        ));
        Ok(self
            .search_results
            .iter()
            .take(query.limit as usize)
            .cloned()
            .collect())
    }
}

/// Raw comment with a reply collection
pub fn comment_node(id: &str, author: Option<&str>, replies: Vec<CommentNode>) -> CommentNode {
    CommentNode::Comment(RawComment {
        id: id.to_string(),
        author: author.map(str::to_string),
        body: format!("body of {}", id),
        score: 1,
        created_utc: 1_700_000_000.0,
        replies: Some(replies),
    })
}

/// Raw comment whose reply collection is absent
pub fn leaf(id: &str) -> RawComment {
    RawComment {
        id: id.to_string(),
        author: Some("someone".to_string()),
        body: format!("body of {}", id),
        score: 1,
        created_utc: 1_700_000_000.0,
        replies: None,
    }
}

/// Post fixture in `subreddit`
pub fn post(id: &str, subreddit: &str, author: Option<&str>) -> Post {
    Post {
        id: id.to_string(),
        title: format!("Title {}", id),
        author: author.map(str::to_string),
        score: 42,
        subreddit: subreddit.to_string(),
        created_utc: 1_700_000_000.0,
        url: format!("https://example.com/{}", id),
        permalink: format!("/r/{}/comments/{}/title/", subreddit, id),
        ..Default::default()
    }
}

impl Comment {
    pub fn test_leaf(id: &str) -> Comment {
        Comment {
            id: id.to_string(),
            author: Some("someone".to_string()),
            body: format!("body of {}", id),
            score: 1,
            created_utc: 1_700_000_000.0,
            replies: Vec::new(),
        }
    }
}
