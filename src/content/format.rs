//! Comment tree rendering
//!
//! Renders a resolved forest into one indented text document:
//! - Only the first `max_visible` root comments are shown
//! - A comment at depth `d` is prefixed by `d` copies of [`INDENT_MARKER`]
//! - Multi-line bodies keep every line under the comment's marker
//! - Nodes at depth `>= max_depth` are omitted without a truncation note

use super::model::{Comment, Post};
use super::classify::{classify, extract_content};

/// Returned when nothing is left to render
pub const NO_COMMENTS: &str = "No comments found.";

/// Per-level indentation
pub const INDENT_MARKER: &str = "-- ";

/// Render the forest, never returning an empty string
pub fn format_forest(forest: &[Comment], max_visible: usize, max_depth: usize) -> String {
    if max_depth == 0 {
        return NO_COMMENTS.to_string();
    }

    let blocks: Vec<String> = forest
        .iter()
        .take(max_visible)
        .map(|comment| format_comment(comment, 0, max_depth))
        .collect();

    if blocks.is_empty() {
        return NO_COMMENTS.to_string();
    }

    format!("Comments:\n\n{}", blocks.join("\n"))
}

/// Render one comment and, while below `max_depth`, its replies
fn format_comment(comment: &Comment, depth: usize, max_depth: usize) -> String {
    let indent = INDENT_MARKER.repeat(depth);
    let mut block = format!(
        "{indent}* Author: {}\n{indent}  Score: {}\n",
        comment.author_name(),
        comment.score,
    );
    block.push_str(&indent_body(&comment.body, &indent));

    if depth + 1 < max_depth {
        for reply in &comment.replies {
            block.push('\n');
            block.push_str(&format_comment(reply, depth + 1, max_depth));
        }
    }

    block
}

/// Re-indent each body line to align under the `* ` marker
fn indent_body(body: &str, indent: &str) -> String {
    if body.is_empty() {
        return format!("{}  \n", indent);
    }

    body.lines()
        .map(|line| format!("{}  {}\n", indent, line))
        .collect()
}

/// Header block for a post: title, score, author, kind and content
pub fn format_post_header(post: &Post) -> String {
    let kind = classify(post);
    let content = extract_content(post).unwrap_or_default();
    format!(
        "Title: {}\nScore: {}\nAuthor: {}\nType: {}\nContent: {}\n",
        post.title,
        post.score,
        post.author_name(),
        kind,
        content,
    )
}
