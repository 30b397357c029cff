//! Saved posts tool implementation
//!
//! Implements the `get_saved_posts(limit, subreddit)` MCP tool

use crate::cli::SavedPostsArgs;
use crate::content::project::{project_saved, PostSummary};
use crate::error::AppError;
use crate::mcp::{McpResponse, ToolResult};
use crate::reddit::RedditApi;
use crate::tools::util::json_result;
use serde_json::Value;
use tracing::{info, warn};

/// Handle get_saved_posts tool call
pub async fn handle_saved_posts<A: RedditApi>(api: &A, id: Option<Value>, args: Value) -> McpResponse {
    match handle_saved_posts_impl(api, args).await {
        Ok(result) => McpResponse::tool_result(id, result),
        Err(e) => McpResponse::error(id, e.error_code(), &e.message()),
    }
}

async fn handle_saved_posts_impl<A: RedditApi>(api: &A, args: Value) -> Result<ToolResult, AppError> {
    let saved_args: SavedPostsArgs = serde_json::from_value(args)
        .map_err(|e| AppError::InvalidInput(format!("Invalid arguments: {}", e)))?;

    execute_saved_posts(api, saved_args).await
}

/// Execute get_saved_posts (shared implementation for MCP and CLI)
pub async fn execute_saved_posts<A: RedditApi>(
    api: &A,
    args: SavedPostsArgs,
) -> Result<ToolResult, AppError> {
    let posts = saved_posts(api, &args).await;
    json_result(&posts)
}

/// Saved posts of the authenticated user. Failures degrade to an empty list.
pub async fn saved_posts<A: RedditApi>(api: &A, args: &SavedPostsArgs) -> Vec<PostSummary> {
    info!(
        "Fetching {} saved items. Subreddit filter: {}",
        args.limit,
        args.subreddit.as_deref().unwrap_or("None")
    );

    match fetch_saved_posts(api, args).await {
        Ok(posts) => {
            if posts.is_empty() {
                info!("No saved posts found or fetched");
            }
            posts
        }
        Err(e) => {
            warn!("Failed to fetch saved posts: {}", e);
            Vec::new()
        }
    }
}

async fn fetch_saved_posts<A: RedditApi>(
    api: &A,
    args: &SavedPostsArgs,
) -> Result<Vec<PostSummary>, AppError> {
    let user = api
        .current_user()
        .await?
        .ok_or_else(|| AppError::Auth("no authenticated user for saved posts".to_string()))?;

    let items = api.list_saved_items(&user, args.limit).await?;
    Ok(project_saved(&items, args.limit as usize, args.subreddit.as_deref()))
}
