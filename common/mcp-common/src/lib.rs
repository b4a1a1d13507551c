//! MCP Common - shared plumbing for MCP servers
//!
//! - **Errors**: [`ToolError`] envelope (`kind` + `message`) and its
//!   conversion into rmcp protocol errors
//! - **Results**: helpers for building `CallToolResult` payloads
//! - **Tracing**: [`init_tracing`] writing to stderr, text or JSON
//! - **Dispatch**: [`ToolDispatch`] for calling tools by name in-process
//!
//! # Example
//!
//! ```rust,ignore
//! use mcp_common::{json_success, McpError, ToolError};
//!
//! async fn get_thing(&self) -> Result<CallToolResult, McpError> {
//!     let thing = fetch().await.map_err(ToolError::from)?;
//!     Ok(json_success(&thing)?)
//! }
//! ```

pub mod dispatch;
pub mod error;
pub mod init;
pub mod result;

pub use dispatch::{parse_arguments, ToolDispatch};
pub use error::{non_empty, require_non_empty, ErrorKind, ToolError, ToolResult};
pub use init::{init_tracing, LogFormat};
pub use result::json_success;

// Re-export rmcp types that are commonly needed
pub use rmcp::{
    model::{CallToolResult, Content, Tool},
    ErrorData as McpError,
};

// Re-export async_trait for implementing ToolDispatch
pub use async_trait::async_trait;
