//! Scripted GraphQL executor shared by the integration tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use gh_project_mcp::github::{GitHubError, GitHubResult, GraphQlExecutor};
use gh_project_mcp::GhProjectMcpServer;
use serde_json::{json, Value};

/// One recorded request
#[derive(Debug, Clone)]
pub struct Call {
    pub document: String,
    pub variables: Value,
}

impl Call {
    /// `true` if the document declares this operation
    pub fn is(&self, operation: &str) -> bool {
        self.document.contains(&format!(" {}(", operation))
    }
}

/// Replays queued responses in order and records every request
#[derive(Default)]
pub struct MockGitHub {
    responses: Mutex<VecDeque<GitHubResult<Value>>>,
    calls: Mutex<Vec<Call>>,
}

impl MockGitHub {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, data: Value) -> &Self {
        self.responses.lock().unwrap().push_back(Ok(data));
        self
    }

    pub fn fail(&self, err: GitHubError) -> &Self {
        self.responses.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl GraphQlExecutor for MockGitHub {
    async fn execute(&self, document: &str, variables: Value) -> GitHubResult<Value> {
        self.calls.lock().unwrap().push(Call {
            document: document.to_string(),
            variables,
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GitHubError::Upstream("no scripted response left".into())))
    }
}

pub fn server(mock: &Arc<MockGitHub>) -> GhProjectMcpServer {
    GhProjectMcpServer::new(mock.clone())
}

/// Decode the JSON text of a successful tool result
pub fn output(result: &rmcp::model::CallToolResult) -> Value {
    let text = result
        .content
        .first()
        .and_then(|c| c.as_text())
        .map(|t| t.text.clone())
        .expect("text content");
    serde_json::from_str(&text).expect("json output")
}

// ============================================================================
// Fixtures
// ============================================================================

pub fn project_node(id: &str, title: &str, owner: &str) -> Value {
    json!({
        "__typename": "ProjectV2",
        "id": id,
        "number": 7,
        "title": title,
        "shortDescription": "",
        "public": false,
        "closed": false,
        "url": format!("https://github.com/orgs/{}/projects/7", owner),
        "owner": { "__typename": "Organization", "login": owner }
    })
}

pub fn draft_item(id: &str, project_id: &str, title: &str) -> Value {
    json!({
        "__typename": "ProjectV2Item",
        "id": id,
        "type": "DRAFT_ISSUE",
        "isArchived": false,
        "project": { "id": project_id },
        "content": { "__typename": "DraftIssue", "id": "DI_1", "title": title, "body": "" },
        "fieldValues": { "nodes": [] }
    })
}

pub fn page(nodes: Vec<Value>, next: Option<&str>) -> Value {
    json!({
        "nodes": nodes,
        "pageInfo": { "hasNextPage": next.is_some(), "endCursor": next }
    })
}

pub fn fields_node() -> Value {
    json!({
        "node": {
            "__typename": "ProjectV2",
            "fields": { "nodes": [
                { "__typename": "ProjectV2Field", "id": "F_est", "name": "Estimate", "dataType": "NUMBER" },
                {
                    "__typename": "ProjectV2SingleSelectField",
                    "id": "F_status", "name": "Status", "dataType": "SINGLE_SELECT",
                    "options": [{ "id": "opt_todo", "name": "Todo" }, { "id": "opt_done", "name": "Done" }]
                }
            ]}
        }
    })
}

pub fn field_updated(item_id: &str) -> Value {
    json!({ "updateProjectV2ItemFieldValue": { "projectV2Item": { "id": item_id } } })
}
