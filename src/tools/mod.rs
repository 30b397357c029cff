//! MCP tools implementation

pub mod comments;
pub mod post_content;
pub mod reply;
pub mod saved;
pub mod search;
pub mod util;

#[cfg(test)]
mod tools_argument_tests;
