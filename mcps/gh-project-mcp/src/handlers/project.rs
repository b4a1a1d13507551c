//! Project handler implementations

use mcp_common::{non_empty, require_non_empty, ToolResult};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::github::queries::{GET_PROJECT, LIST_OWNER_PROJECTS, LIST_REPOSITORY_PROJECTS, PAGE_SIZE};
use crate::github::{execute_typed, GitHubError, GraphQlExecutor};
use crate::params::{GetProjectParams, ListProjectsParams};
use crate::types::common::{Connection, PageInfo};
use crate::types::project::RawProject;
use crate::types::Project;

use super::typed_node;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectsHolder {
    #[serde(default)]
    projects_v2: Option<Connection<RawProject>>,
}

#[derive(Debug, Deserialize)]
struct RepositoryProjectsData {
    repository: Option<ProjectsHolder>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OwnerProjectsData {
    repository_owner: Option<ProjectsHolder>,
}

#[derive(Debug, Deserialize)]
struct NodeData {
    node: Option<Value>,
}

/// List projects of a user or organization, or those linked to a repository
///
/// Order is GitHub's; every page is followed.
pub async fn list_projects(
    api: &dyn GraphQlExecutor,
    params: ListProjectsParams,
) -> ToolResult<Vec<Project>> {
    let owner = require_non_empty(&params.owner, "owner")?;
    let repo = non_empty(params.repo.as_deref());

    info!(owner, ?repo, "listing projects");

    let mut projects = Vec::new();
    let mut after: Option<String> = None;

    loop {
        let (page, page_info) = match repo {
            Some(repo) => {
                let data: RepositoryProjectsData = execute_typed(
                    api,
                    LIST_REPOSITORY_PROJECTS,
                    json!({ "owner": owner, "repo": repo, "first": PAGE_SIZE, "after": after }),
                )
                .await?;
                let holder = data.repository.ok_or_else(|| {
                    GitHubError::NotFound(format!("repository {}/{} not found", owner, repo))
                })?;
                split_page(holder)
            }
            None => {
                let data: OwnerProjectsData = execute_typed(
                    api,
                    LIST_OWNER_PROJECTS,
                    json!({ "owner": owner, "first": PAGE_SIZE, "after": after }),
                )
                .await?;
                let holder = data.repository_owner.ok_or_else(|| {
                    GitHubError::NotFound(format!("no user or organization named {}", owner))
                })?;
                split_page(holder)
            }
        };

        debug!(count = page.len(), "received project page");
        projects.extend(page.into_iter().map(Project::from));

        match page_info.next_cursor() {
            Some(cursor) if after.as_deref() != Some(cursor) => after = Some(cursor.to_string()),
            _ => break,
        }
    }

    Ok(projects)
}

fn split_page(holder: ProjectsHolder) -> (Vec<RawProject>, PageInfo) {
    holder
        .projects_v2
        .map(Connection::into_parts)
        .unwrap_or_default()
}

/// Fetch a single project by node id
pub async fn get_project(api: &dyn GraphQlExecutor, params: GetProjectParams) -> ToolResult<Project> {
    let project_id = require_non_empty(&params.project_id, "project_id")?;

    info!(project_id, "fetching project");

    let data: NodeData =
        execute_typed(api, GET_PROJECT, json!({ "projectId": project_id })).await?;

    let raw: RawProject = typed_node(data.node, "ProjectV2", || {
        format!("no project with id {}", project_id)
    })?;

    Ok(raw.into())
}
