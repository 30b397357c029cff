//! Post content tool implementation
//!
//! Implements the `fetch_reddit_post_content(post_id, comment_limit, comment_depth)`
//! MCP tool: a post header followed by the rendered comment tree.

use crate::cli::PostContentArgs;
use crate::content::format::{format_forest, format_post_header};
use crate::error::AppError;
use crate::mcp::{McpResponse, ToolResult};
use crate::reddit::RedditApi;
use crate::tools::util::normalize_post_id;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Comment tree ordering requested from the provider
const COMMENT_SORT: &str = "top";

/// Handle fetch_reddit_post_content tool call
pub async fn handle_post_content<A: RedditApi>(api: &A, id: Option<Value>, args: Value) -> McpResponse {
    match handle_post_content_impl(api, args).await {
        Ok(result) => McpResponse::tool_result(id, result),
        Err(e) => McpResponse::error(id, e.error_code(), &e.message()),
    }
}

async fn handle_post_content_impl<A: RedditApi>(api: &A, args: Value) -> Result<ToolResult, AppError> {
    let content_args: PostContentArgs = serde_json::from_value(args)
        .map_err(|e| AppError::InvalidInput(format!("Invalid arguments: {}", e)))?;

    execute_post_content(api, content_args).await
}

/// Execute fetch_reddit_post_content (shared implementation for MCP and CLI)
pub async fn execute_post_content<A: RedditApi>(
    api: &A,
    args: PostContentArgs,
) -> Result<ToolResult, AppError> {
    let document = match normalize_post_id(&args.post_id) {
        Ok(post_id) => post_content(api, &post_id, args.comment_limit, args.comment_depth).await,
        Err(e) => {
            warn!("Rejected post reference {:?}: {}", args.post_id, e);
            format!("Failed to fetch post content: {}", e)
        }
    };
    Ok(ToolResult::text(document))
}

/// Render the post and its comment tree, or describe why that failed
pub async fn post_content<A: RedditApi>(
    api: &A,
    post_id: &str,
    comment_limit: u32,
    comment_depth: u32,
) -> String {
    info!(
        "Fetching post {} with {} comments to depth {}",
        post_id, comment_limit, comment_depth
    );

    match render_post(api, post_id, comment_limit, comment_depth).await {
        Ok(document) => document,
        Err(e) => {
            warn!("Failed to fetch post content for {}: {}", post_id, e);
            format!("Failed to fetch post content: {}", e)
        }
    }
}

async fn render_post<A: RedditApi>(
    api: &A,
    post_id: &str,
    comment_limit: u32,
    comment_depth: u32,
) -> Result<String, AppError> {
    let (post, forest) = futures::try_join!(
        api.fetch_submission(post_id),
        api.fetch_comment_tree(post_id, COMMENT_SORT, comment_limit, comment_depth),
    )?;
    debug!("Post {} has {} top-level comments", post_id, forest.len());

    Ok(format!(
        "{}\n{}",
        format_post_header(&post),
        format_forest(&forest, comment_limit as usize, comment_depth as usize)
    ))
}
