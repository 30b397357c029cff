//! Continuation resolution
//!
//! Expands every "more comments" marker in a comment listing into real comments,
//! recursively and without a cap. Sibling markers are fetched concurrently and the
//! results are reassembled by original position.

use super::model::{Comment, CommentNode, RawComment};
use crate::error::AppError;
use crate::reddit::RedditApi;
use futures::future::{try_join_all, FutureExt, LocalBoxFuture};
use std::collections::VecDeque;
use tracing::debug;

/// Resolve a listing of comments and markers into a marker-free forest
pub async fn resolve<A: RedditApi>(
    api: &A,
    submission_id: &str,
    nodes: Vec<CommentNode>,
) -> Result<Vec<Comment>, AppError> {
    resolve_nodes(api, submission_id, nodes).await
}

fn resolve_nodes<'a, A: RedditApi>(
    api: &'a A,
    submission_id: &'a str,
    nodes: Vec<CommentNode>,
) -> LocalBoxFuture<'a, Result<Vec<Comment>, AppError>> {
    async move {
        if nodes.is_empty() {
            return Ok(Vec::new());
        }

        let groups = try_join_all(
            nodes
                .into_iter()
                .map(|node| resolve_node(api, submission_id, node)),
        )
        .await?;

        Ok(groups.into_iter().flatten().collect())
    }
    .boxed_local()
}

/// A comment resolves to itself, a marker to zero or more comments
fn resolve_node<'a, A: RedditApi>(
    api: &'a A,
    submission_id: &'a str,
    node: CommentNode,
) -> LocalBoxFuture<'a, Result<Vec<Comment>, AppError>> {
    async move {
        match node {
            CommentNode::Comment(raw) => {
                let comment = resolve_comment(api, submission_id, raw).await?;
                Ok(vec![comment])
            }
            CommentNode::More(marker) => {
                debug!(
                    "Expanding continuation {} under {} ({} comments)",
                    marker.id, marker.parent_id, marker.count
                );
                let expanded = api.expand_continuation(submission_id, &marker).await?;
                resolve_nodes(api, submission_id, expanded).await
            }
        }
    }
    .boxed_local()
}

async fn resolve_comment<A: RedditApi>(
    api: &A,
    submission_id: &str,
    raw: RawComment,
) -> Result<Comment, AppError> {
    let replies = resolve_nodes(api, submission_id, raw.replies.unwrap_or_default()).await?;
    Ok(Comment {
        id: raw.id,
        author: raw.author,
        body: raw.body,
        score: raw.score,
        created_utc: raw.created_utc,
        replies,
    })
}

/// Breadth-first flattening: roots in order, then their replies level by level
pub fn flatten(forest: &[Comment]) -> Vec<&Comment> {
    let mut queue: VecDeque<&Comment> = forest.iter().collect();
    let mut flat = Vec::new();
    while let Some(comment) = queue.pop_front() {
        flat.push(comment);
        queue.extend(comment.replies.iter());
    }
    flat
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::model::Continuation;
    use crate::reddit::fake::{comment_node, leaf, FakeReddit};
    use std::time::Duration;

    fn ids(comments: &[Comment]) -> Vec<&str> {
        comments.iter().map(|c| c.id.as_str()).collect()
    }

    fn marker(id: &str, parent: &str, children: &[&str]) -> CommentNode {
        CommentNode::More(Continuation {
            id: id.to_string(),
            parent_id: parent.to_string(),
            children: children.iter().map(|c| c.to_string()).collect(),
            count: children.len() as u64,
        })
    }

    #[tokio::test]
    async fn test_resolve_without_markers_is_identity() {
        let api = FakeReddit::new();
        let nodes = vec![
            comment_node("a", Some("alice"), vec![comment_node("b", None, vec![])]),
            comment_node("c", Some("bob"), vec![]),
        ];

        let forest = resolve(&api, "post1", nodes).await.unwrap();

        assert_eq!(ids(&forest), vec!["a", "c"]);
        assert_eq!(ids(&forest[0].replies), vec!["b"]);
        assert_eq!(forest[0].author.as_deref(), Some("alice"));
        assert_eq!(forest[0].replies[0].author, None);
        assert!(api.expanded_markers().is_empty());
    }

    #[tokio::test]
    async fn test_absent_reply_collection_is_a_leaf() {
        let api = FakeReddit::new();
        let forest = resolve(&api, "post1", vec![CommentNode::Comment(leaf("solo"))])
            .await
            .unwrap();
        assert_eq!(forest.len(), 1);
        assert!(forest[0].replies.is_empty());
    }

    #[tokio::test]
    async fn test_markers_expand_in_place_preserving_sibling_order() {
        let api = FakeReddit::new()
            .with_expansion("more1", vec![comment_node("b", Some("bea"), vec![])])
            .with_expansion(
                "more2",
                vec![
                    comment_node("d", Some("dan"), vec![]),
                    comment_node("e", Some("eve"), vec![]),
                ],
            );
        let nodes = vec![
            comment_node("a", Some("ann"), vec![]),
            marker("more1", "t3_post1", &["b"]),
            comment_node("c", Some("cid"), vec![]),
            marker("more2", "t3_post1", &["d", "e"]),
        ];

        let forest = resolve(&api, "post1", nodes).await.unwrap();

        assert_eq!(ids(&forest), vec!["a", "b", "c", "d", "e"]);
    }

    #[tokio::test]
    async fn test_out_of_order_expansions_keep_source_order() {
        let api = FakeReddit::new()
            .with_expansion("m1", vec![comment_node("from-m1", Some("one"), vec![])])
            .with_expansion("m2", vec![comment_node("from-m2", Some("two"), vec![])])
            .with_expansion_delay("m1", Duration::from_millis(50))
            .with_expansion_delay("m2", Duration::from_millis(1));
        let nodes = vec![
            marker("m1", "t3_post1", &["from-m1"]),
            marker("m2", "t3_post1", &["from-m2"]),
        ];

        let forest = resolve(&api, "post1", nodes).await.unwrap();

        assert_eq!(api.expanded_markers(), vec!["m2", "m1"]);
        assert_eq!(ids(&forest), vec!["from-m1", "from-m2"]);
    }

    #[tokio::test]
    async fn test_nested_and_chained_markers_resolve_fully() {
        let api = FakeReddit::new()
            .with_expansion(
                "more-deep",
                vec![
                    comment_node("y", Some("yan"), vec![]),
                    marker("more-chain", "t1_x", &["z"]),
                ],
            )
            .with_expansion("more-chain", vec![comment_node("z", Some("zoe"), vec![])]);
        let nodes = vec![comment_node(
            "x",
            Some("xia"),
            vec![marker("more-deep", "t1_x", &["y", "z"])],
        )];

        let forest = resolve(&api, "post1", nodes).await.unwrap();

        assert_eq!(ids(&forest), vec!["x"]);
        assert_eq!(ids(&forest[0].replies), vec!["y", "z"]);
        assert_eq!(api.expanded_markers(), vec!["more-deep", "more-chain"]);
    }

    #[tokio::test]
    async fn test_expansion_failure_aborts_resolution() {
        let api = FakeReddit::new().failing();
        let nodes = vec![
            comment_node("a", Some("ann"), vec![]),
            marker("more1", "t3_post1", &["b"]),
        ];

        let result = resolve(&api, "post1", nodes).await;
        assert!(matches!(result, Err(AppError::Provider(_))));
    }

    #[test]
    fn test_flatten_is_breadth_first() {
        let tree = vec![
            Comment {
                replies: vec![Comment {
                    replies: vec![Comment::test_leaf("a11")],
                    ..Comment::test_leaf("a1")
                }],
                ..Comment::test_leaf("a")
            },
            Comment {
                replies: vec![Comment::test_leaf("b1")],
                ..Comment::test_leaf("b")
            },
        ];

        let flat: Vec<&str> = flatten(&tree).iter().map(|c| c.id.as_str()).collect();
        assert_eq!(flat, vec!["a", "b", "a1", "b1", "a11"]);
    }
}
