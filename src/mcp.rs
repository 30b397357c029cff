//! MCP (Model Context Protocol) handling module
//!
//! This module implements the JSON-RPC 2.0 protocol for MCP communication.

use crate::reddit::RedditApi;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader as AsyncBufReader};
use tracing::{debug, error, info, warn};

/// MCP protocol revision announced on initialize
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Upper bound for a single tool call
const TOOL_TIMEOUT: Duration = Duration::from_secs(120);

/// Server context for tracking client information
#[derive(Clone, Default)]
pub struct ServerContext {
    pub client_info: Option<ClientInfo>,
}

impl ServerContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_client_name(&self) -> String {
        self.client_info
            .as_ref()
            .and_then(|info| info.name.as_ref())
            .cloned()
            .unwrap_or_else(|| "Unknown Client".to_string())
    }
}

/// MCP JSON-RPC 2.0 request structure
#[derive(Debug, Deserialize)]
pub struct McpRequest {
    /// JSON-RPC version field - required by the protocol but not accessed in code
    #[allow(dead_code)]
    pub jsonrpc: String,
    pub id: Option<Value>,
    pub method: String,
    pub params: Option<Value>,
}

/// Initialize request parameters
#[derive(Debug, Deserialize)]
pub struct InitializeParams {
    #[serde(rename = "clientInfo")]
    pub client_info: Option<ClientInfo>,
}

/// Client information
#[derive(Debug, Deserialize, Clone)]
pub struct ClientInfo {
    pub name: Option<String>,
    #[allow(dead_code)]
    pub version: Option<String>,
}

/// MCP JSON-RPC 2.0 response structure
#[derive(Debug, Serialize)]
pub struct McpResponse {
    pub jsonrpc: String,
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

/// MCP Error structure
#[derive(Debug, Serialize)]
pub struct McpError {
    pub code: String,
    pub message: String,
}

/// MCP Tool call arguments
#[derive(Debug, Deserialize)]
pub struct ToolCallArgs {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

/// MCP Content item
#[derive(Debug, Serialize)]
pub struct ContentItem {
    pub r#type: String,
    pub text: String,
}

/// MCP Tool result
#[derive(Debug, Serialize)]
pub struct ToolResult {
    pub content: Vec<ContentItem>,
}

impl McpResponse {
    /// Create a successful response
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(id: Option<Value>, code: &str, message: &str) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(McpError {
                code: code.to_string(),
                message: message.to_string(),
            }),
        }
    }

    /// Wrap a tool result as a successful response
    pub fn tool_result(id: Option<Value>, result: ToolResult) -> Self {
        match serde_json::to_value(result) {
            Ok(value) => Self::success(id, value),
            Err(e) => Self::error(id, "internal_error", &format!("Failed to encode result: {}", e)),
        }
    }
}

impl ToolResult {
    /// Create a text result
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: vec![ContentItem::text(content)],
        }
    }

    /// Text of the first content item
    pub fn first_text(&self) -> &str {
        self.content.first().map(|c| c.text.as_str()).unwrap_or_default()
    }
}

impl ContentItem {
    /// Helper to create plain text content
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            r#type: "text".to_string(),
            text: content.into(),
        }
    }
}

/// Parse MCP request from JSON string
pub fn parse_request(json: &str) -> Result<McpRequest> {
    let request: McpRequest = serde_json::from_str(json)?;
    Ok(request)
}

/// Serialize MCP response to JSON string
pub fn serialize_response(response: &McpResponse) -> Result<String> {
    Ok(serde_json::to_string(response)?)
}

/// Handle stdio MCP communication
pub async fn handle_stdio<A: RedditApi>(api: &A) -> Result<()> {
    info!("Starting reddit-mcp MCP server on stdio");

    let stdin = tokio::io::stdin();
    let mut reader = AsyncBufReader::new(stdin).lines();
    let mut stdout = tokio::io::stdout();

    // Track server context
    let mut context = ServerContext::new();

    while let Some(line) = reader.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        debug!("Received request: {}", line);

        let response = match parse_request(&line) {
            Ok(request) => handle_request(request, &mut context, api).await,
            Err(e) => {
                error!("Failed to parse request: {}", e);
                Some(McpResponse::error(None, "parse_error", &format!("Invalid JSON: {}", e)))
            }
        };

        let Some(response) = response else {
            continue;
        };

        let response_json = serialize_response(&response)?;
        debug!("Sending response: {}", response_json);

        stdout.write_all(response_json.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    info!("stdin closed, shutting down");
    Ok(())
}

/// Handle a single MCP request. Notifications (no `id`) produce no response.
async fn handle_request<A: RedditApi>(
    request: McpRequest,
    context: &mut ServerContext,
    api: &A,
) -> Option<McpResponse> {
    if request.id.is_none() {
        debug!("Notification received: {}", request.method);
        return None;
    }

    let response = match request.method.as_str() {
        "initialize" => handle_initialize(request, context),
        "tools/call" => handle_tool_call(request, api).await,
        "tools/list" => handle_tools_list(request),
        _ => McpResponse::error(
            request.id,
            "method_not_found",
            &format!("Method '{}' not found", request.method),
        ),
    };
    Some(response)
}

/// Handle tools/call method
async fn handle_tool_call<A: RedditApi>(request: McpRequest, api: &A) -> McpResponse {
    let args: ToolCallArgs = match serde_json::from_value(request.params.unwrap_or_default()) {
        Ok(args) => args,
        Err(e) => {
            return McpResponse::error(
                request.id.clone(),
                "invalid_params",
                &format!("Invalid parameters: {}", e),
            )
        }
    };

    let id = request.id;
    let arguments = match args.arguments {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };

    info!("Tool call: {}", args.name);
    let call = dispatch_tool(api, id.clone(), &args.name, arguments);
    match tokio::time::timeout(TOOL_TIMEOUT, call).await {
        Ok(response) => response,
        Err(_) => {
            warn!("Tool '{}' exceeded {}s timeout", args.name, TOOL_TIMEOUT.as_secs());
            McpResponse::error(
                id,
                "timeout",
                &format!("Request exceeded {} second timeout", TOOL_TIMEOUT.as_secs()),
            )
        }
    }
}

async fn dispatch_tool<A: RedditApi>(
    api: &A,
    id: Option<Value>,
    name: &str,
    arguments: Value,
) -> McpResponse {
    use crate::tools::{comments, post_content, reply, saved, search};

    match name {
        "get_saved_posts" => saved::handle_saved_posts(api, id, arguments).await,
        "search_reddit" => search::handle_search(api, id, arguments).await,
        "get_comments" => comments::handle_comments(api, id, arguments).await,
        "reply_to_comment" => reply::handle_reply(api, id, arguments).await,
        "fetch_reddit_post_content" => post_content::handle_post_content(api, id, arguments).await,
        _ => McpResponse::error(id, "tool_not_found", &format!("Tool '{}' not found", name)),
    }
}

/// Handle tools/list method
fn handle_tools_list(request: McpRequest) -> McpResponse {
    let tools = build_tools_array();

    McpResponse::success(request.id, serde_json::json!({ "tools": tools }))
}

/// Handle initialize method
fn handle_initialize(request: McpRequest, context: &mut ServerContext) -> McpResponse {
    if let Some(params) = request.params {
        if let Ok(init_params) = serde_json::from_value::<InitializeParams>(params) {
            context.client_info = init_params.client_info;
        }
    }
    info!("Initialized by {}", context.get_client_name());

    let tools = build_tools_array();
    let result = serde_json::json!({
        "protocolVersion": PROTOCOL_VERSION,
        "serverInfo": {
            "name": "reddit-mcp",
            "version": env!("CARGO_PKG_VERSION"),
        },
        "capabilities": {
            "tools": { "list": true, "call": true }
        },
        "tools": tools
    });
    McpResponse::success(request.id, result)
}

/// Build the tools array returned from tools/list and initialize
fn build_tools_array() -> serde_json::Value {
    use crate::cli::{CommentsArgs, PostContentArgs, ReplyArgs, SavedPostsArgs, SearchArgs};
    use schemars::schema_for;

    // Generate JSON schemas from the CLI argument structs
    let saved_schema = schema_for!(SavedPostsArgs);
    let search_schema = schema_for!(SearchArgs);
    let comments_schema = schema_for!(CommentsArgs);
    let reply_schema = schema_for!(ReplyArgs);
    let post_content_schema = schema_for!(PostContentArgs);

    serde_json::json!([
        {
            "name": "get_saved_posts",
            "description": "Get saved posts of the authenticated Reddit user, optionally filtered by subreddit",
            "inputSchema": saved_schema
        },
        {
            "name": "search_reddit",
            "description": "Search Reddit posts, optionally within one subreddit",
            "inputSchema": search_schema
        },
        {
            "name": "get_comments",
            "description": "Get comments of a Reddit submission, expanding collapsed threads",
            "inputSchema": comments_schema
        },
        {
            "name": "reply_to_comment",
            "description": "Reply to a Reddit comment as the authenticated user",
            "inputSchema": reply_schema
        },
        {
            "name": "fetch_reddit_post_content",
            "description": "Fetch a Reddit post with its comment tree rendered as text",
            "inputSchema": post_content_schema
        }
    ])
}
