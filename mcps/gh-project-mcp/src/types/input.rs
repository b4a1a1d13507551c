//! Validated inputs for item mutations

use mcp_common::{non_empty, ToolError, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Kind of content to add to a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentType {
    Issue,
    PullRequest,
    DraftIssue,
}

/// Existing repository content that can be linked into a project
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkedKind {
    Issue,
    PullRequest,
}

/// A new project item, with the fields its variant requires
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewItem {
    /// Link an existing issue or pull request by node id
    Existing { kind: LinkedKind, content_id: String },
    /// Create a draft issue inside the project
    Draft { title: String, body: Option<String> },
}

impl NewItem {
    /// Build from loose tool arguments
    ///
    /// ISSUE and PULL_REQUEST need `content_id`; DRAFT_ISSUE needs `title`.
    /// Blank strings count as missing.
    pub fn new(
        content_type: ContentType,
        content_id: Option<&str>,
        title: Option<&str>,
        body: Option<&str>,
    ) -> ToolResult<Self> {
        let linked = |kind: LinkedKind| match non_empty(content_id) {
            Some(id) => Ok(NewItem::Existing {
                kind,
                content_id: id.to_string(),
            }),
            None => Err(ToolError::validation(format!(
                "content_id is required when content_type is {}",
                content_type.as_str()
            ))
            .with_field("content_id")),
        };

        match content_type {
            ContentType::Issue => linked(LinkedKind::Issue),
            ContentType::PullRequest => linked(LinkedKind::PullRequest),
            ContentType::DraftIssue => match non_empty(title) {
                Some(title) => Ok(NewItem::Draft {
                    title: title.to_string(),
                    body: body.filter(|b| !b.is_empty()).map(str::to_string),
                }),
                None => Err(ToolError::validation(
                    "title is required when content_type is DRAFT_ISSUE",
                )
                .with_field("title")),
            },
        }
    }
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Issue => "ISSUE",
            ContentType::PullRequest => "PULL_REQUEST",
            ContentType::DraftIssue => "DRAFT_ISSUE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcp_common::ErrorKind;

    #[test]
    fn test_issue_requires_content_id() {
        let err = NewItem::new(ContentType::Issue, None, Some("ignored"), None).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.field.as_deref(), Some("content_id"));
    }

    #[test]
    fn test_pull_request_blank_content_id() {
        let err = NewItem::new(ContentType::PullRequest, Some("  "), None, None).unwrap_err();
        assert_eq!(err.field.as_deref(), Some("content_id"));
        assert!(err.message.contains("PULL_REQUEST"));
    }

    #[test]
    fn test_issue_ok() {
        let item = NewItem::new(ContentType::Issue, Some("I_kwDO1"), None, None).unwrap();
        assert_eq!(
            item,
            NewItem::Existing {
                kind: LinkedKind::Issue,
                content_id: "I_kwDO1".into()
            }
        );
    }

    #[test]
    fn test_draft_requires_title() {
        let err = NewItem::new(ContentType::DraftIssue, Some("I_1"), None, Some("body")).unwrap_err();
        assert_eq!(err.field.as_deref(), Some("title"));
    }

    #[test]
    fn test_draft_body_optional() {
        let item = NewItem::new(ContentType::DraftIssue, None, Some("X"), None).unwrap();
        assert_eq!(
            item,
            NewItem::Draft {
                title: "X".into(),
                body: None
            }
        );
    }

    #[test]
    fn test_content_type_wire_names() {
        let parsed: ContentType = serde_json::from_str("\"PULL_REQUEST\"").unwrap();
        assert_eq!(parsed, ContentType::PullRequest);
        assert!(serde_json::from_str::<ContentType>("\"EPIC\"").is_err());
    }
}
