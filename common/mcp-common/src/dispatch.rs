//! In-process tool dispatch
//!
//! [`ToolDispatch`] lets a host call a server's tools by name with a raw
//! JSON argument object, without going through the stdio transport. It has
//! the same contract as the MCP path: unknown names are
//! [`ErrorKind::UnsupportedOperation`](crate::ErrorKind::UnsupportedOperation)
//! and arguments that do not match the tool's schema are
//! [`ErrorKind::Validation`](crate::ErrorKind::Validation).

use async_trait::async_trait;
use rmcp::model::{CallToolResult, Tool};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ToolError, ToolResult};

/// Trait for MCP servers callable by tool name
#[async_trait]
pub trait ToolDispatch: Send + Sync {
    /// Server name, as used in MCP host configuration
    fn server_name(&self) -> &str;

    /// All declared tools with their input schemas
    fn list_tools(&self) -> Vec<Tool>;

    /// Run a tool by name
    async fn call_tool(&self, name: &str, arguments: Value) -> ToolResult<CallToolResult>;
}

/// Decode a tool's argument object into its parameter type
///
/// A missing argument object is treated as `{}` so that required-field
/// errors name the field rather than the whole payload.
pub fn parse_arguments<T: DeserializeOwned>(arguments: Value) -> ToolResult<T> {
    let arguments = match arguments {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };
    serde_json::from_value(arguments).map_err(|e| {
        let message = e.to_string();
        match missing_field(&message) {
            Some(field) => ToolError::missing_argument(field),
            None => ToolError::validation(format!("invalid arguments: {}", message)),
        }
    })
}

fn missing_field(message: &str) -> Option<&str> {
    message
        .strip_prefix("missing field `")
        .and_then(|rest| rest.split('`').next())
}
