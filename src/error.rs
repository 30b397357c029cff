//! Error types and handling for the Reddit MCP server

use thiserror::Error;

/// Application error kinds shared by the provider client, the core and the tools
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Reddit API error: {0}")]
    Provider(String),
    #[error("Failed to parse Reddit response: {0}")]
    Parse(String),
    #[error("Not authenticated: {0}")]
    Auth(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the error code for MCP responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "invalid_input",
            AppError::Provider(_) => "provider_error",
            AppError::Parse(_) => "parse_error",
            AppError::Auth(_) => "auth_error",
            AppError::NotFound(_) => "not_found",
            AppError::Timeout(_) => "timeout",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Process exit code used in CLI mode
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::InvalidInput(_) => 1,
            AppError::Provider(_) | AppError::Parse(_) => 2,
            AppError::NotFound(_) => 3,
            AppError::Timeout(_) => 4,
            AppError::Auth(_) | AppError::Internal(_) => 5,
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Timeout(err.to_string())
        } else if err.is_decode() {
            AppError::Parse(err.to_string())
        } else if err.is_connect() || err.is_request() {
            AppError::Provider(err.to_string())
        } else {
            AppError::Internal(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Parse(err.to_string())
    }
}

/// Validate a bare Reddit id (base36, as in `t3_<id>`)
pub fn validate_id(kind: &str, id: &str) -> Result<(), AppError> {
    if id.is_empty() {
        return Err(AppError::InvalidInput(format!("{} id cannot be empty", kind)));
    }

    if !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::InvalidInput(format!("Invalid {} id: {}", kind, id)));
    }

    Ok(())
}

pub fn validate_query(query: &str) -> Result<(), AppError> {
    if query.trim().is_empty() {
        return Err(AppError::InvalidInput("Query cannot be empty".to_string()));
    }

    if query.chars().count() > 512 {
        return Err(AppError::InvalidInput(
            "Query too long, maximum 512 characters".to_string(),
        ));
    }

    Ok(())
}

pub fn validate_reply_text(text: &str) -> Result<(), AppError> {
    if text.trim().is_empty() {
        return Err(AppError::InvalidInput("Reply text cannot be empty".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = AppError::NotFound("post abc".to_string());
        assert_eq!(error.to_string(), "Not found: post abc");

        let error = AppError::Provider("503 Service Unavailable".to_string());
        assert_eq!(error.to_string(), "Reddit API error: 503 Service Unavailable");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::InvalidInput(String::new()).error_code(), "invalid_input");
        assert_eq!(AppError::Auth(String::new()).error_code(), "auth_error");
        assert_eq!(AppError::Timeout(String::new()).exit_code(), 4);
        assert_eq!(AppError::Parse(String::new()).exit_code(), 2);
    }

    #[test]
    fn test_validate_id() {
        assert!(validate_id("post", "1abc9z").is_ok());
        assert!(validate_id("post", "").is_err());
        assert!(validate_id("post", "abc/def").is_err());
        assert!(validate_id("comment", "t1_abc").is_err());
    }

    #[test]
    fn test_validate_query() {
        assert!(validate_query("rust async").is_ok());
        assert!(validate_query("   ").is_err());
        assert!(validate_query(&"a".repeat(513)).is_err());
    }

    #[test]
    fn test_validate_reply_text() {
        assert!(validate_reply_text("thanks!").is_ok());
        assert!(validate_reply_text("\n").is_err());
    }
}
