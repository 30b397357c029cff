//! reddit-mcp MCP Server & CLI (Rust)
//!
//! Dual-mode application:
//! - MCP Server Mode (default): Model Context Protocol server using stdio
//! - CLI Mode: Command-line utility for direct tool execution
//!
//! Implements five tools:
//! - `get_saved_posts(limit, subreddit)` - Saved posts of the authenticated user
//! - `search_reddit(query, subreddit, sort, limit)` - Search Reddit posts
//! - `get_comments(submission_id, limit)` - Comments of a submission
//! - `reply_to_comment(comment_id, text)` - Reply to a comment
//! - `fetch_reddit_post_content(post_id, comment_limit, comment_depth)` - Post with comment tree

mod mcp;
mod error;
mod config;
mod content;
mod reddit;
mod tools;
mod http;
mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use error::AppError;
use mcp::ToolResult;
use reddit::RedditClient;
use std::future::Future;
use tokio::time::{timeout, Duration};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real environment variables take precedence
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(&cli);

    let client = RedditClient::connect(&cli.reddit).await?;

    match cli.command {
        Some(command) => run_cli_mode(&client, command).await,
        None => run_mcp_mode(&client).await,
    }
}

/// Log to stderr in both modes to keep stdout clean
fn init_logging(cli: &Cli) {
    let filter = if cli.command.is_some() {
        let log_level = if cli.quiet {
            "error"
        } else if cli.verbose {
            "debug"
        } else {
            "info"
        };
        EnvFilter::new(log_level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run in CLI mode
async fn run_cli_mode(client: &RedditClient, command: Commands) -> Result<()> {
    let result = match command {
        Commands::SavedPosts(args) => {
            run_tool(tools::saved::execute_saved_posts(client, args)).await
        }
        Commands::Search(args) => run_tool(tools::search::execute_search(client, args)).await,
        Commands::Comments(args) => {
            run_tool(tools::comments::execute_comments(client, args)).await
        }
        Commands::Reply(args) => run_tool(tools::reply::execute_reply(client, args)).await,
        Commands::Post(args) => {
            run_tool(tools::post_content::execute_post_content(client, args)).await
        }
    };

    // Handle result and exit with appropriate code
    match result {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

/// Run one tool under the 120 second limit and extract its text
async fn run_tool<F>(call: F) -> Result<String, AppError>
where
    F: Future<Output = Result<ToolResult, AppError>>,
{
    match timeout(Duration::from_secs(120), call).await {
        Ok(Ok(tool_result)) => Ok(tool_result.first_text().to_string()),
        Ok(Err(e)) => Err(e),
        Err(_) => Err(AppError::Timeout(
            "Request exceeded 120 second timeout".to_string(),
        )),
    }
}

/// Run in MCP server mode
async fn run_mcp_mode(client: &RedditClient) -> Result<()> {
    info!("Starting reddit-mcp MCP Server");

    // Handle stdio MCP communication
    mcp::handle_stdio(client).await?;

    Ok(())
}
