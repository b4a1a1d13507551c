//! GitHub Projects v2 MCP Library
//!
//! MCP tools for GitHub Projects v2 over the GraphQL API.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use gh_project_mcp::{config::Config, GhProjectMcpServer, GitHubClient};
//!
//! let config = Config::load(None)?;
//! let client = GitHubClient::new(&config.github)?;
//! let server = GhProjectMcpServer::new(Arc::new(client));
//! // Serve via stdio, or call tools by name through `mcp_common::ToolDispatch`
//! ```
//!
//! # Tools
//! - Projects: list (by owner or repository), get
//! - Items: list, create (issue, pull request, draft issue), update fields, delete
//!
//! # Requirements
//! - A GitHub token with the `project` scope (`read:project` for read-only use)

pub mod config;
pub mod github;
pub mod handlers;
pub mod params;
pub mod server;
pub mod types;

// Re-export main server type
pub use server::GhProjectMcpServer;

pub use github::{GitHubClient, GitHubError, GraphQlExecutor};

// Re-export parameter types for direct API usage
pub use params::*;
