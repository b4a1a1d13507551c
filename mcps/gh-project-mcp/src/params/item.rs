//! Item-related parameter types

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::ContentType;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ListProjectItemsParams {
    #[schemars(description = "Node ID of the project whose items to list")]
    pub project_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateProjectItemParams {
    #[schemars(description = "Node ID of the project to add the item to")]
    pub project_id: String,
    #[schemars(description = "Kind of content: ISSUE, PULL_REQUEST or DRAFT_ISSUE")]
    pub content_type: ContentType,
    #[schemars(
        description = "Node ID of the existing issue or pull request (required for ISSUE and PULL_REQUEST)"
    )]
    pub content_id: Option<String>,
    #[schemars(description = "Title of the draft issue (required for DRAFT_ISSUE)")]
    pub title: Option<String>,
    #[schemars(description = "Body of the draft issue in markdown")]
    pub body: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateProjectItemParams {
    #[schemars(description = "Node ID of the project containing the item")]
    pub project_id: String,
    #[schemars(description = "Node ID of the project item (PVTI_...)")]
    pub item_id: String,
    #[schemars(
        description = "Field name to new value. Text and date fields take strings (dates as YYYY-MM-DD), number fields take numbers, single-select fields take the option name, iteration fields take the iteration title. null clears the field."
    )]
    pub field_updates: Option<BTreeMap<String, Value>>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DeleteProjectItemParams {
    #[schemars(description = "Node ID of the project containing the item")]
    pub project_id: String,
    #[schemars(description = "Node ID of the project item to delete")]
    pub item_id: String,
}
