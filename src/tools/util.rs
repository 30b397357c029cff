//! Utility functions for tools

use crate::error::{validate_id, AppError};
use crate::mcp::ToolResult;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Matches `.../comments/<id>` and `redd.it/<id>` post URLs
fn post_url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^https?://(?:[a-z0-9-]+\.)?(?:reddit\.com/(?:r/[^/]+/)?comments|redd\.it)/([A-Za-z0-9]+)")
            .expect("post URL pattern is valid")
    })
}

/// Normalize a post reference to a bare id
///
/// Accepts `1abcde`, `t3_1abcde`, `https://www.reddit.com/r/rust/comments/1abcde/title/`
/// and `https://redd.it/1abcde`.
pub fn normalize_post_id(input: &str) -> Result<String, AppError> {
    let trimmed = input.trim();

    let id = if let Some(captures) = post_url_pattern().captures(trimmed) {
        captures[1].to_string()
    } else if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        return Err(AppError::InvalidInput(format!(
            "Invalid post URL: {}. Expected reddit.com/.../comments/<id> or redd.it/<id>",
            input
        )));
    } else {
        trimmed.strip_prefix("t3_").unwrap_or(trimmed).to_string()
    };

    validate_id("post", &id)?;
    Ok(id)
}

/// Subreddit names as Reddit allows them
fn subreddit_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("subreddit pattern is valid"))
}

/// Normalize an optional subreddit scope (`rust`, `r/rust`, `/r/rust/`).
///
/// Blank means no scope. Anything else must be a plain subreddit name, since it ends up
/// as a URL path segment.
pub fn normalize_subreddit(input: Option<&str>) -> Result<Option<String>, AppError> {
    let Some(trimmed) = input.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    let name = trimmed.trim_start_matches('/');
    let name = name.strip_prefix("r/").unwrap_or(name).trim_end_matches('/');

    if !subreddit_pattern().is_match(name) {
        return Err(AppError::InvalidInput(format!("Invalid subreddit: {}", input.unwrap_or_default())));
    }
    Ok(Some(name.to_string()))
}

/// Normalize a comment reference (`abc123` or `t1_abc123`) to a bare id
pub fn normalize_comment_id(input: &str) -> Result<String, AppError> {
    let trimmed = input.trim();
    let id = trimmed.strip_prefix("t1_").unwrap_or(trimmed);
    validate_id("comment", id)?;
    Ok(id.to_string())
}

/// Serialize a list result as pretty JSON text content
pub fn json_result<T: Serialize>(value: &T) -> Result<ToolResult, AppError> {
    Ok(ToolResult::text(serde_json::to_string_pretty(value)?))
}
