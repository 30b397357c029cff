//! Reddit wire format and adapters into the core model
//!
//! Reddit wraps every object in a "thing" envelope (`{"kind": "t1", "data": {...}}`).
//! Comment trees arrive in two shapes:
//! - nested: `/comments/{id}` returns comments with `replies` listings populated
//! - flat: `/api/morechildren` returns a flat `things` array linked by `parent_id`

use crate::content::model::{
    Comment, CommentNode, Continuation, Forest, Post, PostKind, RawComment, SavedItem,
};
use crate::error::AppError;
use serde::de::IgnoredAny;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

pub const KIND_COMMENT: &str = "t1";
pub const KIND_LINK: &str = "t3";
pub const KIND_MORE: &str = "more";

/// Generic thing envelope; `data` is decoded per kind
#[derive(Debug, Deserialize)]
pub struct Thing {
    pub kind: String,
    #[serde(default)]
    pub data: Value,
}

#[derive(Debug, Deserialize)]
pub struct Listing {
    pub data: ListingData,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub children: Vec<Thing>,
    pub after: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LinkData {
    id: String,
    #[serde(default)]
    title: String,
    author: Option<String>,
    #[serde(default)]
    score: i64,
    #[serde(default)]
    subreddit: String,
    #[serde(default)]
    created_utc: f64,
    url: Option<String>,
    #[serde(default)]
    permalink: String,
    #[serde(default)]
    is_self: bool,
    #[serde(default)]
    is_video: bool,
    is_gallery: Option<bool>,
    #[serde(default)]
    selftext: String,
}

#[derive(Debug, Deserialize)]
struct CommentData {
    id: String,
    author: Option<String>,
    #[serde(default)]
    body: String,
    #[serde(default)]
    score: i64,
    #[serde(default)]
    created_utc: f64,
    #[serde(default)]
    parent_id: String,
    #[serde(default)]
    replies: Option<Replies>,
}

/// Reddit sends `""` instead of a listing when a comment has no replies
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Replies {
    Listing(Listing),
    Empty(IgnoredAny),
}

#[derive(Debug, Deserialize)]
struct MoreData {
    id: String,
    #[serde(default)]
    parent_id: String,
    #[serde(default)]
    children: Vec<String>,
    #[serde(default)]
    count: u64,
}

/// `{"json": {"errors": [...], "data": {"things": [...]}}}` from `api_type=json` endpoints
#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    pub json: ApiResponseBody,
}

#[derive(Debug, Deserialize)]
pub struct ApiResponseBody {
    #[serde(default)]
    pub errors: Vec<Value>,
    pub data: Option<ApiThings>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiThings {
    #[serde(default)]
    pub things: Vec<Thing>,
}

impl ApiResponse {
    /// Returned things, or a provider error when Reddit reported API errors
    pub fn into_things(self) -> Result<Vec<Thing>, AppError> {
        if !self.json.errors.is_empty() {
            let errors: Vec<String> = self
                .json
                .errors
                .iter()
                .map(|e| match e {
                    Value::Array(parts) => parts
                        .iter()
                        .filter_map(Value::as_str)
                        .collect::<Vec<_>>()
                        .join(": "),
                    other => other.to_string(),
                })
                .collect();
            return Err(AppError::Provider(errors.join("; ")));
        }
        Ok(self.json.data.unwrap_or_default().things)
    }
}

/// Reddit reports removed accounts as the literal `[deleted]`
fn normalize_author(author: Option<String>) -> Option<String> {
    author.filter(|name| !name.is_empty() && name != "[deleted]")
}

fn decode<T: for<'de> Deserialize<'de>>(kind: &str, data: Value) -> Result<T, AppError> {
    serde_json::from_value(data).map_err(|e| AppError::Parse(format!("{} thing: {}", kind, e)))
}

impl Thing {
    pub fn into_post(self) -> Result<Option<Post>, AppError> {
        if self.kind != KIND_LINK {
            return Ok(None);
        }
        let link: LinkData = decode(KIND_LINK, self.data)?;
        Ok(Some(Post {
            id: link.id,
            title: link.title,
            author: normalize_author(link.author),
            score: link.score,
            subreddit: link.subreddit,
            created_utc: link.created_utc,
            url: link.url.unwrap_or_default(),
            permalink: link.permalink,
            is_self: link.is_self,
            is_video: link.is_video,
            kind_hint: link.is_gallery.filter(|g| *g).map(|_| PostKind::Gallery),
            body: link.selftext,
        }))
    }

    /// Comment or continuation marker; other kinds yield `None`
    pub fn into_node(self) -> Result<Option<CommentNode>, AppError> {
        Ok(self.into_linked_node()?.map(|(_, node)| node))
    }

    /// Node together with the fullname of its parent
    fn into_linked_node(self) -> Result<Option<(String, CommentNode)>, AppError> {
        match self.kind.as_str() {
            KIND_COMMENT => {
                let data: CommentData = decode(KIND_COMMENT, self.data)?;
                let replies = match data.replies {
                    Some(Replies::Listing(listing)) => Some(comment_nodes(listing)?),
                    Some(Replies::Empty(_)) | None => None,
                };
                let node = CommentNode::Comment(RawComment {
                    id: data.id,
                    author: normalize_author(data.author),
                    body: data.body,
                    score: data.score,
                    created_utc: data.created_utc,
                    replies,
                });
                Ok(Some((data.parent_id, node)))
            }
            KIND_MORE => {
                let data: MoreData = decode(KIND_MORE, self.data)?;
                let node = CommentNode::More(Continuation {
                    id: data.id,
                    parent_id: data.parent_id.clone(),
                    children: data.children,
                    count: data.count,
                });
                Ok(Some((data.parent_id, node)))
            }
            _ => Ok(None),
        }
    }

    pub fn into_saved_item(self) -> Result<Option<SavedItem>, AppError> {
        match self.kind.as_str() {
            KIND_LINK => Ok(self.into_post()?.map(SavedItem::Post)),
            KIND_COMMENT => Ok(self.into_comment()?.map(SavedItem::Comment)),
            _ => Ok(None),
        }
    }

    /// A single comment with its replies dropped
    pub fn into_comment(self) -> Result<Option<Comment>, AppError> {
        match self.into_node()? {
            Some(CommentNode::Comment(raw)) => Ok(Some(Comment {
                id: raw.id,
                author: raw.author,
                body: raw.body,
                score: raw.score,
                created_utc: raw.created_utc,
                replies: Vec::new(),
            })),
            _ => Ok(None),
        }
    }
}

/// Nested listing into comment nodes, preserving order
pub fn comment_nodes(listing: Listing) -> Result<Vec<CommentNode>, AppError> {
    let mut nodes = Vec::with_capacity(listing.data.children.len());
    for thing in listing.data.children {
        if let Some(node) = thing.into_node()? {
            nodes.push(node);
        }
    }
    Ok(nodes)
}

/// Posts of a listing, skipping any other kind
pub fn posts(things: Vec<Thing>) -> Result<Vec<Post>, AppError> {
    let mut posts = Vec::with_capacity(things.len());
    for thing in things {
        if let Some(post) = thing.into_post()? {
            posts.push(post);
        }
    }
    Ok(posts)
}

/// Nested tree into a forest, dropping the provider's truncation markers
pub fn into_forest(nodes: Vec<CommentNode>) -> Forest {
    nodes
        .into_iter()
        .filter_map(|node| match node {
            CommentNode::Comment(raw) => Some(Comment {
                id: raw.id,
                author: raw.author,
                body: raw.body,
                score: raw.score,
                created_utc: raw.created_utc,
                replies: into_forest(raw.replies.unwrap_or_default()),
            }),
            CommentNode::More(_) => None,
        })
        .collect()
}

/// Rebuild a subtree from a flat thing list linked by `parent_id`.
///
/// Nodes whose parent is `root_parent` become the roots. Sibling order follows the
/// order of the flat list.
pub fn assemble_flat(things: Vec<Thing>, root_parent: &str) -> Result<Vec<CommentNode>, AppError> {
    let mut order: Vec<String> = Vec::new();
    let mut by_parent: HashMap<String, Vec<CommentNode>> = HashMap::new();

    for thing in things {
        if let Some((parent, node)) = thing.into_linked_node()? {
            if !by_parent.contains_key(&parent) {
                order.push(parent.clone());
            }
            by_parent.entry(parent).or_default().push(node);
        }
    }

    let roots = by_parent.remove(root_parent).unwrap_or_default();
    let mut assembled = attach_children(roots, &mut by_parent);

    // Parents missing from the batch: keep their comments rather than lose them
    for parent in order {
        if let Some(orphans) = by_parent.remove(&parent) {
            debug!("{} comments with unknown parent {}", orphans.len(), parent);
            let orphans = attach_children(orphans, &mut by_parent);
            assembled.extend(orphans);
        }
    }

    Ok(assembled)
}

fn attach_children(
    nodes: Vec<CommentNode>,
    by_parent: &mut HashMap<String, Vec<CommentNode>>,
) -> Vec<CommentNode> {
    nodes
        .into_iter()
        .map(|node| match node {
            CommentNode::Comment(mut raw) => {
                let fullname = format!("{}_{}", KIND_COMMENT, raw.id);
                if let Some(children) = by_parent.remove(&fullname) {
                    let children = attach_children(children, by_parent);
                    raw.replies.get_or_insert_with(Vec::new).extend(children);
                }
                CommentNode::Comment(raw)
            }
            more => more,
        })
        .collect()
}
