//! CLI mode implementation
//!
//! Provides the command-line interface and the argument structs shared with the MCP
//! tool schemas.

use crate::config::RedditConfig;
use clap::{Parser, Subcommand, ValueEnum};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// reddit-mcp CLI
#[derive(Parser)]
#[command(name = "reddit-mcp")]
#[command(about = "Reddit saved posts, search and comment thread utility", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub reddit: RedditConfig,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output (no short flag to avoid conflicts)
    #[arg(long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List saved posts of the authenticated user
    SavedPosts(SavedPostsArgs),
    /// Search Reddit posts
    Search(SearchArgs),
    /// List comments of a submission
    Comments(CommentsArgs),
    /// Reply to a comment
    Reply(ReplyArgs),
    /// Fetch a post with its comment tree
    Post(PostContentArgs),
}

fn default_saved_limit() -> u32 {
    25
}

fn default_search_limit() -> u32 {
    10
}

fn default_comments_limit() -> u32 {
    25
}

fn default_comment_limit() -> u32 {
    20
}

fn default_comment_depth() -> u32 {
    3
}

/// get_saved_posts tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
pub struct SavedPostsArgs {
    /// Number of saved items to request (default 25)
    #[arg(short = 'l', long, default_value_t = default_saved_limit())]
    #[serde(default = "default_saved_limit")]
    #[schemars(description = "Number of saved items to request (default 25)")]
    pub limit: u32,

    /// Only return posts from this subreddit (case-insensitive)
    #[arg(short = 's', long)]
    #[serde(default)]
    #[schemars(description = "Only return posts from this subreddit (case-insensitive)")]
    pub subreddit: Option<String>,
}

/// Search result ordering
#[derive(ValueEnum, JsonSchema, Deserialize, Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SearchSort {
    #[default]
    Relevance,
    Hot,
    Top,
    New,
    Comments,
}

impl SearchSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchSort::Relevance => "relevance",
            SearchSort::Hot => "hot",
            SearchSort::Top => "top",
            SearchSort::New => "new",
            SearchSort::Comments => "comments",
        }
    }
}

/// Search time window
#[derive(ValueEnum, JsonSchema, Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimeFilter {
    Hour,
    Day,
    Week,
    Month,
    Year,
    All,
}

impl TimeFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeFilter::Hour => "hour",
            TimeFilter::Day => "day",
            TimeFilter::Week => "week",
            TimeFilter::Month => "month",
            TimeFilter::Year => "year",
            TimeFilter::All => "all",
        }
    }
}

/// search_reddit tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
pub struct SearchArgs {
    /// Search query
    #[arg(short = 'q', long)]
    #[schemars(description = "Search query")]
    pub query: String,

    /// Restrict the search to this subreddit
    #[arg(short = 's', long)]
    #[serde(default)]
    #[schemars(description = "Restrict the search to this subreddit (default: all of Reddit)")]
    pub subreddit: Option<String>,

    /// Result ordering
    #[arg(long, value_enum, default_value_t = SearchSort::Relevance)]
    #[serde(default)]
    #[schemars(description = "Result ordering: relevance, hot, top, new or comments")]
    pub sort: SearchSort,

    /// Time window for top/relevance sorting
    #[arg(short = 't', long, value_enum)]
    #[serde(default)]
    #[schemars(description = "Time window: hour, day, week, month, year or all")]
    pub time_filter: Option<TimeFilter>,

    /// Maximum number of results (default 10)
    #[arg(short = 'l', long, default_value_t = default_search_limit())]
    #[serde(default = "default_search_limit")]
    #[schemars(description = "Maximum number of results (default 10)")]
    pub limit: u32,
}

/// get_comments tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
pub struct CommentsArgs {
    /// Submission id, t3_ fullname or post URL
    #[arg(short = 'i', long)]
    #[schemars(description = "Submission id, t3_ fullname or post URL")]
    pub submission_id: String,

    /// Maximum number of comments (default 25)
    #[arg(short = 'l', long, default_value_t = default_comments_limit())]
    #[serde(default = "default_comments_limit")]
    #[schemars(description = "Maximum number of comments, breadth-first (default 25)")]
    pub limit: u32,
}

/// reply_to_comment tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
pub struct ReplyArgs {
    /// Comment id or t1_ fullname
    #[arg(short = 'i', long)]
    #[schemars(description = "Comment id or t1_ fullname")]
    pub comment_id: String,

    /// Reply text (markdown)
    #[arg(short = 't', long)]
    #[schemars(description = "Reply text (markdown)")]
    pub text: String,
}

/// fetch_reddit_post_content tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
pub struct PostContentArgs {
    /// Post id, t3_ fullname or post URL
    #[arg(short = 'i', long)]
    #[schemars(description = "Post id, t3_ fullname or post URL")]
    pub post_id: String,

    /// Number of top-level comments (default 20)
    #[arg(short = 'l', long, default_value_t = default_comment_limit())]
    #[serde(default = "default_comment_limit")]
    #[schemars(description = "Number of top-level comments to show (default 20)")]
    pub comment_limit: u32,

    /// Maximum comment depth (default 3)
    #[arg(short = 'd', long, default_value_t = default_comment_depth())]
    #[serde(default = "default_comment_depth")]
    #[schemars(description = "Maximum comment depth to show (default 3)")]
    pub comment_depth: u32,
}
