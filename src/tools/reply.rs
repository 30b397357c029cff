//! Reply tool implementation
//!
//! Implements the `reply_to_comment(comment_id, text)` MCP tool. Provider failures
//! come back as a descriptive result string, not as an error response.

use crate::cli::ReplyArgs;
use crate::error::{validate_reply_text, AppError};
use crate::mcp::{McpResponse, ToolResult};
use crate::reddit::RedditApi;
use crate::tools::util::normalize_comment_id;
use serde_json::Value;
use tracing::{info, warn};

/// Handle reply_to_comment tool call
pub async fn handle_reply<A: RedditApi>(api: &A, id: Option<Value>, args: Value) -> McpResponse {
    match handle_reply_impl(api, args).await {
        Ok(result) => McpResponse::tool_result(id, result),
        Err(e) => McpResponse::error(id, e.error_code(), &e.message()),
    }
}

async fn handle_reply_impl<A: RedditApi>(api: &A, args: Value) -> Result<ToolResult, AppError> {
    let reply_args: ReplyArgs = serde_json::from_value(args)
        .map_err(|e| AppError::InvalidInput(format!("Invalid arguments: {}", e)))?;

    execute_reply(api, reply_args).await
}

/// Execute reply_to_comment (shared implementation for MCP and CLI)
///
/// Unusable ids and empty text are reported in the result text like provider failures.
pub async fn execute_reply<A: RedditApi>(api: &A, args: ReplyArgs) -> Result<ToolResult, AppError> {
    let outcome = match checked_reply_target(&args) {
        Ok(comment_id) => reply_to_comment(api, &comment_id, &args.text).await,
        Err(e) => {
            warn!("Rejected reply to {:?}: {}", args.comment_id, e);
            format!("Failed to reply to comment: {}", e)
        }
    };
    Ok(ToolResult::text(outcome))
}

fn checked_reply_target(args: &ReplyArgs) -> Result<String, AppError> {
    let comment_id = normalize_comment_id(&args.comment_id)?;
    validate_reply_text(&args.text)?;
    Ok(comment_id)
}

/// Post a reply and describe the outcome
pub async fn reply_to_comment<A: RedditApi>(api: &A, comment_id: &str, text: &str) -> String {
    info!("Replying to comment {}", comment_id);

    match api.post_reply(comment_id, text).await {
        Ok(reply) => {
            info!("Replied to comment {}. New comment ID: {}", comment_id, reply.id);
            format!("Successfully replied to comment. New comment ID: {}", reply.id)
        }
        Err(e) => {
            warn!("Failed to reply to comment {}: {}", comment_id, e);
            format!("Failed to reply to comment: {}", e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reddit::fake::FakeReddit;
    use serde_json::json;

    #[tokio::test]
    async fn test_successful_reply_reports_new_id() {
        let api = FakeReddit::new().with_reply_id("kx91zz");
        let result = reply_to_comment(&api, "abc123", "Nice write-up").await;
        assert_eq!(result, "Successfully replied to comment. New comment ID: kx91zz");
    }

    #[tokio::test]
    async fn test_failed_reply_is_described_not_raised() {
        let api = FakeReddit::new().with_reply_id("kx91zz").failing();
        let result = reply_to_comment(&api, "abc123", "Nice write-up").await;
        assert!(result.starts_with("Failed to reply to comment:"));
        assert!(result.contains("503"));
    }

    #[tokio::test]
    async fn test_handle_failure_is_a_successful_response() {
        let api = FakeReddit::new().failing();
        let resp = handle_reply(
            &api,
            Some(json!(3)),
            json!({ "comment_id": "t1_abc123", "text": "hello" }),
        )
        .await;

        assert!(resp.error.is_none());
        let result = resp.result.expect("result present");
        let text = result["content"][0]["text"].as_str().unwrap();
        assert!(text.starts_with("Failed to reply to comment:"));
    }

    fn result_text(resp: &McpResponse) -> String {
        let result = resp.result.as_ref().expect("result present");
        result["content"][0]["text"].as_str().expect("text content").to_string()
    }

    #[tokio::test]
    async fn test_empty_text_is_described_not_raised() {
        let api = FakeReddit::new().with_reply_id("new1");
        let resp = handle_reply(&api, Some(json!(4)), json!({ "comment_id": "abc", "text": "" })).await;

        assert!(resp.error.is_none());
        assert_eq!(
            result_text(&resp),
            "Failed to reply to comment: Invalid input: Reply text cannot be empty"
        );
    }

    #[tokio::test]
    async fn test_bad_comment_id_is_described_not_raised() {
        let api = FakeReddit::new().with_reply_id("new1");
        let resp = handle_reply(
            &api,
            Some(json!(5)),
            json!({ "comment_id": "bad id!", "text": "hi" }),
        )
        .await;

        assert!(resp.error.is_none());
        assert_eq!(
            result_text(&resp),
            "Failed to reply to comment: Invalid input: Invalid comment id: bad id!"
        );
    }

    #[tokio::test]
    async fn test_missing_text_field_is_invalid_input() {
        let api = FakeReddit::new().with_reply_id("new1");
        let resp = handle_reply(&api, Some(json!(6)), json!({ "comment_id": "abc" })).await;
        assert_eq!(resp.error.expect("error present").code, "invalid_input");
    }
}
