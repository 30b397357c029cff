//! Search tool implementation
//!
//! Implements the `search_reddit(query, subreddit, sort, limit)` MCP tool

use crate::cli::SearchArgs;
use crate::content::project::{project_search, PostSummary};
use crate::error::{validate_query, AppError};
use crate::mcp::{McpResponse, ToolResult};
use crate::reddit::{RedditApi, SearchQuery};
use crate::tools::util::{json_result, normalize_subreddit};
use serde_json::Value;
use tracing::{info, warn};

/// Handle search_reddit tool call
pub async fn handle_search<A: RedditApi>(api: &A, id: Option<Value>, args: Value) -> McpResponse {
    match handle_search_impl(api, args).await {
        Ok(result) => McpResponse::tool_result(id, result),
        Err(e) => McpResponse::error(id, e.error_code(), &e.message()),
    }
}

async fn handle_search_impl<A: RedditApi>(api: &A, args: Value) -> Result<ToolResult, AppError> {
    let search_args: SearchArgs = serde_json::from_value(args)
        .map_err(|e| AppError::InvalidInput(format!("Invalid arguments: {}", e)))?;

    execute_search(api, search_args).await
}

/// Execute search_reddit (shared implementation for MCP and CLI)
///
/// An unusable query yields an empty list, like a provider failure.
pub async fn execute_search<A: RedditApi>(api: &A, args: SearchArgs) -> Result<ToolResult, AppError> {
    let posts = match validate_query(&args.query) {
        Ok(()) => search_posts(api, &args).await,
        Err(e) => {
            warn!("Search skipped: {}", e);
            Vec::new()
        }
    };
    json_result(&posts)
}

/// Search results. Failures degrade to an empty list.
pub async fn search_posts<A: RedditApi>(api: &A, args: &SearchArgs) -> Vec<PostSummary> {
    let scope = match normalize_subreddit(args.subreddit.as_deref()) {
        Ok(scope) => scope,
        Err(e) => {
            warn!("Search skipped: {}", e);
            return Vec::new();
        }
    };
    let scope = scope.as_deref();

    info!(
        "Searching Reddit for '{}' in {}, sorted by {}, limit {}",
        args.query,
        scope.unwrap_or("all of Reddit"),
        args.sort.as_str(),
        args.limit
    );

    let query = SearchQuery {
        query: args.query.trim(),
        scope,
        sort: args.sort.as_str(),
        time_filter: args.time_filter.as_ref().map(|t| t.as_str()),
        limit: args.limit,
    };

    match api.search_posts(&query).await {
        Ok(posts) => {
            if posts.is_empty() {
                info!("No search results found");
            }
            project_search(&posts, args.limit as usize)
        }
        Err(e) => {
            warn!("Search failed: {}", e);
            Vec::new()
        }
    }
}
