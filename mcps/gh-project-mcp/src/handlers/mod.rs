//! Handler implementations for Projects v2 tools
//!
//! Organized by domain: project, item. Field-update resolution lives in
//! `fields`. Every handler validates its arguments before touching the
//! network and returns typed output or a [`ToolError`](mcp_common::ToolError).

mod fields;
mod item;
mod project;

pub use item::*;
pub use project::*;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::github::{GitHubError, GitHubResult};

/// Decode a `node(id:)` result, treating null or a node of another type as
/// not found
pub(crate) fn typed_node<T: DeserializeOwned>(
    node: Option<Value>,
    typename: &str,
    missing: impl FnOnce() -> String,
) -> GitHubResult<T> {
    let node = match node {
        Some(node) if node.get("__typename").and_then(Value::as_str) == Some(typename) => node,
        _ => return Err(GitHubError::NotFound(missing())),
    };
    serde_json::from_value(node)
        .map_err(|e| GitHubError::Upstream(format!("unexpected {} shape: {}", typename, e)))
}
