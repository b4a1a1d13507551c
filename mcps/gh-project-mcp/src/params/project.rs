//! Project-related parameter types

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ListProjectsParams {
    #[schemars(description = "Login of the user or organization owning the projects")]
    pub owner: String,
    #[schemars(
        description = "Repository name; when given, lists projects linked to OWNER/REPO instead of all of the owner's projects"
    )]
    pub repo: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetProjectParams {
    #[schemars(description = "Node ID of the project (e.g. PVT_kwDO...)")]
    pub project_id: String,
}
