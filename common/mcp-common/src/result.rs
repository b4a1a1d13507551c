//! Result helpers for MCP tool responses

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;

use crate::error::{ToolError, ToolResult};

/// Serialize tool output as pretty JSON text content
///
/// Serialization failures are reported as [`ErrorKind::Internal`](crate::ErrorKind::Internal).
pub fn json_success<T: Serialize>(data: &T) -> ToolResult<CallToolResult> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| ToolError::internal(format!("failed to serialize tool output: {}", e)))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Deleted {
        deleted_item_id: String,
    }

    #[test]
    fn test_json_success() {
        let result = json_success(&Deleted {
            deleted_item_id: "PVTI_1".to_string(),
        })
        .unwrap();
        assert!(!result.is_error.unwrap_or(false));
        assert_eq!(result.content.len(), 1);
    }

    #[test]
    fn test_json_success_empty_list() {
        let items: Vec<Deleted> = Vec::new();
        let result = json_success(&items).unwrap();
        assert_eq!(result.content.len(), 1);
    }
}
