//! Provider-agnostic post and comment records
//!
//! Adapters in `crate::reddit` fill these from wire data. The core only reads them.

use std::fmt;

/// Literal substituted wherever an author is absent or removed
pub const DELETED_AUTHOR: &str = "[deleted]";

/// Content kind of a post, derived by [`crate::content::classify::classify`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostKind {
    Text,
    Link,
    Video,
    Gallery,
    Unknown,
}

impl PostKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostKind::Text => "text",
            PostKind::Link => "link",
            PostKind::Video => "video",
            PostKind::Gallery => "gallery",
            PostKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized submission snapshot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub author: Option<String>,
    pub score: i64,
    pub subreddit: String,
    pub created_utc: f64,
    pub url: String,
    /// Site-relative permalink (`/r/<sub>/comments/<id>/...`)
    pub permalink: String,
    pub is_self: bool,
    pub is_video: bool,
    /// Explicit type tag when the provider exposes one
    pub kind_hint: Option<PostKind>,
    pub body: String,
}

/// Placeholder for an omitted branch of a comment tree
#[derive(Debug, Clone, PartialEq)]
pub struct Continuation {
    pub id: String,
    /// Fullname of the node the omitted comments hang off (`t3_…` or `t1_…`)
    pub parent_id: String,
    /// Ids of the omitted comments; empty for a "continue this thread" marker
    pub children: Vec<String>,
    pub count: u64,
}

/// A comment as delivered by the provider, possibly with unexpanded branches
#[derive(Debug, Clone, PartialEq)]
pub struct RawComment {
    pub id: String,
    pub author: Option<String>,
    pub body: String,
    pub score: i64,
    pub created_utc: f64,
    /// `None` when the provider sent no reply collection at all
    pub replies: Option<Vec<CommentNode>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommentNode {
    Comment(RawComment),
    More(Continuation),
}

/// A fully resolved comment; its subtree holds no continuation markers
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: String,
    pub author: Option<String>,
    pub body: String,
    pub score: i64,
    pub created_utc: f64,
    pub replies: Vec<Comment>,
}

impl Comment {
    pub fn author_name(&self) -> &str {
        self.author.as_deref().unwrap_or(DELETED_AUTHOR)
    }
}

impl Post {
    pub fn author_name(&self) -> &str {
        self.author.as_deref().unwrap_or(DELETED_AUTHOR)
    }
}

/// Ordered root comments of one post
pub type Forest = Vec<Comment>;

/// Entry of a user's saved list
#[derive(Debug, Clone, PartialEq)]
pub enum SavedItem {
    Post(Post),
    Comment(Comment),
}
