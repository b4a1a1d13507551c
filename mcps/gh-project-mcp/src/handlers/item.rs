//! Project item handler implementations

use std::collections::BTreeMap;

use mcp_common::{require_non_empty, ToolError, ToolResult};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::github::queries::{
    ADD_DRAFT_ISSUE, ADD_ITEM_BY_ID, CLEAR_ITEM_FIELD, DELETE_ITEM, GET_PROJECT_ITEM,
    LIST_PROJECT_FIELDS, LIST_PROJECT_ITEMS, PAGE_SIZE, UPDATE_ITEM_FIELD,
};
use crate::github::{execute_typed, GitHubError, GitHubResult, GraphQlExecutor};
use crate::params::{
    CreateProjectItemParams, DeleteProjectItemParams, ListProjectItemsParams,
    UpdateProjectItemParams,
};
use crate::types::common::Connection;
use crate::types::item::RawItem;
use crate::types::{DeletedItem, ItemType, LinkedKind, NewItem, ProjectField, ProjectItem};

use super::fields::{resolve_updates, FieldChange, ResolvedUpdate};
use super::typed_node;

#[derive(Debug, Deserialize)]
struct NodeData {
    node: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ItemsNode {
    items: Connection<RawItem>,
}

#[derive(Debug, Deserialize)]
struct FieldsNode {
    fields: Connection<ProjectField>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddItemByIdData {
    add_project_v2_item_by_id: Option<AddItemPayload>,
}

#[derive(Debug, Deserialize)]
struct AddItemPayload {
    item: Option<RawItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddDraftIssueData {
    add_project_v2_draft_issue: Option<AddDraftPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddDraftPayload {
    project_item: Option<RawItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldMutationPayload {
    project_v2_item: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateFieldData {
    update_project_v2_item_field_value: Option<FieldMutationPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClearFieldData {
    clear_project_v2_item_field_value: Option<FieldMutationPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteItemData {
    delete_project_v2_item: Option<DeletePayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeletePayload {
    deleted_item_id: Option<String>,
}

fn project_not_found(project_id: &str) -> String {
    format!("no project with id {}", project_id)
}

/// List every item of a project with its content and field values
pub async fn list_project_items(
    api: &dyn GraphQlExecutor,
    params: ListProjectItemsParams,
) -> ToolResult<Vec<ProjectItem>> {
    let project_id = require_non_empty(&params.project_id, "project_id")?;

    info!(project_id, "listing project items");

    let mut items = Vec::new();
    let mut after: Option<String> = None;

    loop {
        let data: NodeData = execute_typed(
            api,
            LIST_PROJECT_ITEMS,
            json!({ "projectId": project_id, "first": PAGE_SIZE, "after": after }),
        )
        .await?;
        let node: ItemsNode =
            typed_node(data.node, "ProjectV2", || project_not_found(project_id))?;
        let (page, page_info) = node.items.into_parts();

        debug!(count = page.len(), "received item page");
        items.extend(page.into_iter().map(|raw| raw.into_item(project_id)));

        match page_info.next_cursor() {
            Some(cursor) if after.as_deref() != Some(cursor) => after = Some(cursor.to_string()),
            _ => break,
        }
    }

    Ok(items)
}

/// Link an existing issue or pull request, or create a draft issue
pub async fn create_project_item(
    api: &dyn GraphQlExecutor,
    params: CreateProjectItemParams,
) -> ToolResult<ProjectItem> {
    let project_id = require_non_empty(&params.project_id, "project_id")?;
    let new_item = NewItem::new(
        params.content_type,
        params.content_id.as_deref(),
        params.title.as_deref(),
        params.body.as_deref(),
    )?;

    info!(project_id, content_type = params.content_type.as_str(), "creating project item");

    let (raw, expected) = match new_item {
        NewItem::Existing { kind, content_id } => {
            let data: AddItemByIdData = execute_typed(
                api,
                ADD_ITEM_BY_ID,
                json!({ "projectId": project_id, "contentId": content_id }),
            )
            .await?;
            let expected = match kind {
                LinkedKind::Issue => ItemType::Issue,
                LinkedKind::PullRequest => ItemType::PullRequest,
            };
            (data.add_project_v2_item_by_id.and_then(|p| p.item), expected)
        }
        NewItem::Draft { title, body } => {
            let data: AddDraftIssueData = execute_typed(
                api,
                ADD_DRAFT_ISSUE,
                json!({ "projectId": project_id, "title": title, "body": body }),
            )
            .await?;
            (
                data.add_project_v2_draft_issue.and_then(|p| p.project_item),
                ItemType::DraftIssue,
            )
        }
    };

    let item = raw
        .ok_or_else(|| GitHubError::Upstream("GitHub did not return the created item".into()))?
        .into_item(project_id);

    if item.item_type != expected {
        warn!(
            item_id = %item.id,
            expected = ?expected,
            actual = ?item.item_type,
            "created item has a different content type than requested"
        );
    }

    Ok(item)
}

/// Apply field updates to an item, one mutation per field
///
/// Every update is resolved against the project's field definitions before
/// anything is sent. Mutations are independent: a rejected field does not
/// undo the ones already applied. Authentication, rate-limit and transport
/// failures stop the remaining mutations.
pub async fn update_project_item(
    api: &dyn GraphQlExecutor,
    params: UpdateProjectItemParams,
) -> ToolResult<ProjectItem> {
    let project_id = require_non_empty(&params.project_id, "project_id")?;
    let item_id = require_non_empty(&params.item_id, "item_id")?;
    let updates: BTreeMap<String, Value> = params.field_updates.unwrap_or_default();

    if updates.is_empty() {
        debug!(project_id, item_id, "no field updates, returning current item");
        return Ok(fetch_item(api, project_id, item_id).await?);
    }

    info!(project_id, item_id, count = updates.len(), "updating project item");

    let data: NodeData =
        execute_typed(api, LIST_PROJECT_FIELDS, json!({ "projectId": project_id })).await?;
    let node: FieldsNode = typed_node(data.node, "ProjectV2", || project_not_found(project_id))?;
    let (fields, _) = node.fields.into_parts();

    let resolved = resolve_updates(&fields, &updates)?;
    let total = resolved.len();

    let mut rejected: Vec<(String, GitHubError)> = Vec::new();
    let mut not_attempted: &[ResolvedUpdate] = &[];
    for (index, update) in resolved.iter().enumerate() {
        if let Err(err) = apply_update(api, project_id, item_id, update).await {
            warn!(field = %update.field_name, error = %err, "field update rejected");
            let halt = halts_remaining(&err);
            rejected.push((update.field_name.clone(), err));
            if halt {
                not_attempted = &resolved[index + 1..];
                break;
            }
        }
    }

    if let Some((field, first)) = rejected.first() {
        let applied = total - rejected.len() - not_attempted.len();
        let names: Vec<&str> = rejected.iter().map(|(name, _)| name.as_str()).collect();
        let mut message = format!(
            "update of field '{}' failed: {}; {} of {} field updates applied; rejected: {}",
            field,
            first,
            applied,
            total,
            names.join(", ")
        );
        if !not_attempted.is_empty() {
            let skipped: Vec<&str> = not_attempted.iter().map(|u| u.field_name.as_str()).collect();
            message.push_str(&format!("; not attempted: {}", skipped.join(", ")));
        }
        return Err(ToolError::new(first.kind(), message).with_field(field.clone()));
    }

    Ok(fetch_item(api, project_id, item_id).await?)
}

/// Failures that would repeat for every remaining field
fn halts_remaining(err: &GitHubError) -> bool {
    matches!(
        err,
        GitHubError::Authentication(_) | GitHubError::RateLimited { .. } | GitHubError::Transport(_)
    )
}

async fn apply_update(
    api: &dyn GraphQlExecutor,
    project_id: &str,
    item_id: &str,
    update: &ResolvedUpdate,
) -> GitHubResult<()> {
    let payload = match &update.change {
        FieldChange::Set(value) => {
            let data: UpdateFieldData = execute_typed(
                api,
                UPDATE_ITEM_FIELD,
                json!({
                    "projectId": project_id,
                    "itemId": item_id,
                    "fieldId": update.field_id,
                    "value": value,
                }),
            )
            .await?;
            data.update_project_v2_item_field_value
        }
        FieldChange::Clear => {
            let data: ClearFieldData = execute_typed(
                api,
                CLEAR_ITEM_FIELD,
                json!({
                    "projectId": project_id,
                    "itemId": item_id,
                    "fieldId": update.field_id,
                }),
            )
            .await?;
            data.clear_project_v2_item_field_value
        }
    };

    match payload.and_then(|p| p.project_v2_item) {
        Some(_) => Ok(()),
        None => Err(GitHubError::NotFound(format!(
            "no item {} in project {}",
            item_id, project_id
        ))),
    }
}

/// Remove an item from a project
pub async fn delete_project_item(
    api: &dyn GraphQlExecutor,
    params: DeleteProjectItemParams,
) -> ToolResult<DeletedItem> {
    let project_id = require_non_empty(&params.project_id, "project_id")?;
    let item_id = require_non_empty(&params.item_id, "item_id")?;

    info!(project_id, item_id, "deleting project item");

    let data: DeleteItemData = execute_typed(
        api,
        DELETE_ITEM,
        json!({ "projectId": project_id, "itemId": item_id }),
    )
    .await?;

    let deleted_item_id = data
        .delete_project_v2_item
        .and_then(|p| p.deleted_item_id)
        .ok_or_else(|| {
            GitHubError::NotFound(format!("no item {} in project {}", item_id, project_id))
        })?;

    Ok(DeletedItem { deleted_item_id })
}

/// Fetch one item, treating an item of another project as missing
async fn fetch_item(
    api: &dyn GraphQlExecutor,
    project_id: &str,
    item_id: &str,
) -> GitHubResult<ProjectItem> {
    let data: NodeData =
        execute_typed(api, GET_PROJECT_ITEM, json!({ "itemId": item_id })).await?;
    let missing = || format!("no item {} in project {}", item_id, project_id);
    let raw: RawItem = typed_node(data.node, "ProjectV2Item", missing)?;

    match raw.project_id() {
        Some(parent) if parent != project_id => Err(GitHubError::NotFound(missing())),
        _ => Ok(raw.into_item(project_id)),
    }
}
