//! Reddit connection settings
//!
//! Read from the environment (a `.env` file is loaded first when present) or from
//! global command-line flags.

use clap::Args;

pub const DEFAULT_USER_AGENT: &str = "reddit-mcp-server";
pub const DEFAULT_API_BASE: &str = "https://oauth.reddit.com";
pub const DEFAULT_AUTH_URL: &str = "https://www.reddit.com/api/v1/access_token";

#[derive(Args, Debug, Clone)]
pub struct RedditConfig {
    /// Reddit app client id
    #[arg(long, env = "REDDIT_CLIENT_ID", global = true)]
    pub client_id: Option<String>,

    /// Reddit app client secret
    #[arg(long, env = "REDDIT_CLIENT_SECRET", hide_env_values = true, global = true)]
    pub client_secret: Option<String>,

    /// Account username (script apps)
    #[arg(long, env = "REDDIT_USERNAME", global = true)]
    pub username: Option<String>,

    /// Account password (script apps)
    #[arg(long, env = "REDDIT_PASSWORD", hide_env_values = true, global = true)]
    pub password: Option<String>,

    /// User agent sent with every request
    #[arg(long, env = "REDDIT_USER_AGENT", default_value = DEFAULT_USER_AGENT, global = true)]
    pub user_agent: String,

    /// Authenticated API base URL
    #[arg(long, env = "REDDIT_API_BASE", default_value = DEFAULT_API_BASE, global = true)]
    pub api_base: String,

    /// Token endpoint
    #[arg(long, env = "REDDIT_AUTH_URL", default_value = DEFAULT_AUTH_URL, global = true)]
    pub auth_url: String,
}

impl RedditConfig {
    /// Username and password, when both are configured
    pub fn user_credentials(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => Some((user, pass)),
            _ => None,
        }
    }
}

impl Default for RedditConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            username: None,
            password: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
        }
    }
}
