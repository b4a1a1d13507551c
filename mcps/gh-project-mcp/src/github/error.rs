//! Error types for GitHub API calls
//!
//! Every failure coming back from GitHub is classified into one of these
//! variants at the client layer, so handlers never inspect raw responses.

use mcp_common::{ErrorKind, ToolError};
use thiserror::Error;

/// Errors that can occur when talking to GitHub's GraphQL API
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GitHubError {
    /// Token missing, invalid or expired
    #[error("GitHub authentication failed: {0}")]
    Authentication(String),

    /// Token lacks scope or the caller lacks access to the resource
    #[error("GitHub denied access: {0}")]
    Authorization(String),

    /// Unknown project, item, owner or content id
    #[error("{0}")]
    NotFound(String),

    /// Primary or secondary rate limit hit
    #[error("GitHub rate limit exceeded: {message}")]
    RateLimited {
        message: String,
        /// Unix timestamp at which the limit resets, when GitHub reports it
        reset_at: Option<u64>,
    },

    /// Connection failure or timeout
    #[error("request to GitHub failed: {0}")]
    Transport(String),

    /// Malformed or unexpected response, or an error GitHub did not categorise
    #[error("unexpected response from GitHub: {0}")]
    Upstream(String),
}

impl GitHubError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GitHubError::Authentication(_) => ErrorKind::Authentication,
            GitHubError::Authorization(_) => ErrorKind::Authorization,
            GitHubError::NotFound(_) => ErrorKind::NotFound,
            GitHubError::RateLimited { .. } => ErrorKind::RateLimited,
            GitHubError::Transport(_) => ErrorKind::Transport,
            GitHubError::Upstream(_) => ErrorKind::Upstream,
        }
    }
}

impl From<reqwest::Error> for GitHubError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GitHubError::Transport(format!("request timed out: {}", e))
        } else if e.is_decode() {
            GitHubError::Upstream(format!("could not decode response body: {}", e))
        } else {
            GitHubError::Transport(e.to_string())
        }
    }
}

impl From<GitHubError> for ToolError {
    fn from(e: GitHubError) -> Self {
        ToolError::new(e.kind(), e.to_string())
    }
}

/// Result type alias for GitHub operations
pub type GitHubResult<T> = Result<T, GitHubError>;
