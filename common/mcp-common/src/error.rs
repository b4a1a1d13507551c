//! Error envelope shared by MCP tools
//!
//! Every tool failure is reported as a [`ToolError`]: a machine-readable
//! [`ErrorKind`] plus a human-readable message, optionally naming the
//! argument or field that caused it. At the protocol boundary the envelope
//! becomes an rmcp `ErrorData` whose `data` carries `{kind, message, field}`.

use std::fmt;

use rmcp::{model::ErrorCode, ErrorData as McpError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Type alias for tool results
pub type ToolResult<T> = Result<T, ToolError>;

/// Category of a tool failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Missing or malformed arguments; resolved locally, never sent upstream
    Validation,
    /// Missing, invalid or expired credentials
    Authentication,
    /// Credentials lack the scope or access required
    Authorization,
    /// The referenced object does not exist
    NotFound,
    /// The upstream API is throttling requests
    RateLimited,
    /// Network failure or timeout
    Transport,
    /// Upstream answered with something we could not interpret
    Upstream,
    /// No tool with the requested name
    UnsupportedOperation,
    /// Failure inside the server itself
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Authentication => "authentication",
            ErrorKind::Authorization => "authorization",
            ErrorKind::NotFound => "not_found",
            ErrorKind::RateLimited => "rate_limited",
            ErrorKind::Transport => "transport",
            ErrorKind::Upstream => "upstream",
            ErrorKind::UnsupportedOperation => "unsupported_operation",
            ErrorKind::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured tool error: kind + message (+ offending field)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ToolError {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ToolError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            field: None,
        }
    }

    /// Attach the name of the argument or field the error refers to
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    pub fn unsupported(tool: &str) -> Self {
        Self::new(
            ErrorKind::UnsupportedOperation,
            format!("unsupported operation: {}", tool),
        )
    }

    /// Error for an argument that is absent or blank
    pub fn missing_argument(name: &str) -> Self {
        Self::validation(format!("missing required argument '{}'", name)).with_field(name)
    }

    /// The `{kind, message, field}` envelope as JSON
    pub fn envelope(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| {
            serde_json::json!({ "kind": self.kind.as_str(), "message": self.message })
        })
    }
}

impl From<ToolError> for McpError {
    fn from(err: ToolError) -> Self {
        let data = Some(err.envelope());
        match err.kind {
            ErrorKind::Validation => McpError::invalid_params(err.message, data),
            ErrorKind::UnsupportedOperation => {
                McpError::new(ErrorCode::METHOD_NOT_FOUND, err.message, data)
            }
            _ => McpError::internal_error(err.message, data),
        }
    }
}

/// Reject absent or whitespace-only required string arguments
pub fn require_non_empty<'a>(value: &'a str, name: &str) -> ToolResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ToolError::missing_argument(name));
    }
    Ok(trimmed)
}

/// Like [`require_non_empty`] for optional arguments; blank counts as absent
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
