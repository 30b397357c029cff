//! Comments tool implementation
//!
//! Implements the `get_comments(submission_id, limit)` MCP tool. Every continuation
//! marker is expanded before the forest is flattened breadth-first and cut at `limit`.

use crate::cli::CommentsArgs;
use crate::content::project::{project_comments, CommentSummary};
use crate::content::resolve::{flatten, resolve};
use crate::error::AppError;
use crate::mcp::{McpResponse, ToolResult};
use crate::reddit::RedditApi;
use crate::tools::util::{json_result, normalize_post_id};
use serde_json::Value;
use tracing::{info, warn};

/// Handle get_comments tool call
pub async fn handle_comments<A: RedditApi>(api: &A, id: Option<Value>, args: Value) -> McpResponse {
    match handle_comments_impl(api, args).await {
        Ok(result) => McpResponse::tool_result(id, result),
        Err(e) => McpResponse::error(id, e.error_code(), &e.message()),
    }
}

async fn handle_comments_impl<A: RedditApi>(api: &A, args: Value) -> Result<ToolResult, AppError> {
    let comments_args: CommentsArgs = serde_json::from_value(args)
        .map_err(|e| AppError::InvalidInput(format!("Invalid arguments: {}", e)))?;

    execute_comments(api, comments_args).await
}

/// Execute get_comments (shared implementation for MCP and CLI)
///
/// An unusable submission reference yields an empty list, like a provider failure.
pub async fn execute_comments<A: RedditApi>(api: &A, args: CommentsArgs) -> Result<ToolResult, AppError> {
    let comments = match normalize_post_id(&args.submission_id) {
        Ok(submission_id) => submission_comments(api, &submission_id, args.limit).await,
        Err(e) => {
            warn!("Rejected submission reference {:?}: {}", args.submission_id, e);
            Vec::new()
        }
    };
    json_result(&comments)
}

/// First `limit` comments of a submission. Failures degrade to an empty list.
pub async fn submission_comments<A: RedditApi>(
    api: &A,
    submission_id: &str,
    limit: u32,
) -> Vec<CommentSummary> {
    info!("Fetching {} comments for submission {}", limit, submission_id);

    match fetch_comment_summaries(api, submission_id, limit).await {
        Ok(comments) => {
            if comments.is_empty() {
                info!("No comments found for submission {}", submission_id);
            }
            comments
        }
        Err(e) => {
            warn!("Failed to fetch comments for {}: {}", submission_id, e);
            Vec::new()
        }
    }
}

async fn fetch_comment_summaries<A: RedditApi>(
    api: &A,
    submission_id: &str,
    limit: u32,
) -> Result<Vec<CommentSummary>, AppError> {
    let nodes = api.fetch_comments(submission_id).await?;
    let forest = resolve(api, submission_id, nodes).await?;
    Ok(project_comments(flatten(&forest), limit as usize))
}
