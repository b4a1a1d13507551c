//! MCP Server implementation for GitHub Projects v2
//!
//! Each tool method is a thin shim: decode parameters, call the handler,
//! serialize the typed result. Calls arriving over MCP are routed through
//! [`ToolDispatch`], so the transport and in-process callers share one
//! error contract.

use mcp_common::{
    async_trait, json_success, parse_arguments, McpError, ToolDispatch, ToolError, ToolResult,
};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolRequestParam, CallToolResult, ListToolsResult, PaginatedRequestParam,
        ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
    tool, tool_router, RoleServer,
};
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;

use crate::github::GraphQlExecutor;
use crate::handlers;
use crate::params::*;

const INSTRUCTIONS: &str = "GitHub Projects v2 MCP Server - list and inspect projects, and \
     create, update and delete project items. Projects and items are addressed by \
     GraphQL node id (PVT_..., PVTI_...).";

/// The main GitHub Projects MCP Server
#[derive(Clone)]
pub struct GhProjectMcpServer {
    api: Arc<dyn GraphQlExecutor>,
    tool_router: ToolRouter<Self>,
}

fn respond<T: Serialize>(result: ToolResult<T>) -> ToolResult<CallToolResult> {
    json_success(&result?)
}

// ============================================================================
// Tool Router Implementation
// ============================================================================

#[tool_router]
impl GhProjectMcpServer {
    pub fn new(api: Arc<dyn GraphQlExecutor>) -> Self {
        Self {
            api,
            tool_router: Self::tool_router(),
        }
    }

    // ========================================================================
    // Project Tools
    // ========================================================================

    #[tool(
        description = "List GitHub Projects v2 owned by a user or organization, or linked to a repository when `repo` is given"
    )]
    async fn list_projects(
        &self,
        Parameters(params): Parameters<ListProjectsParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(handlers::list_projects(self.api.as_ref(), params).await).map_err(McpError::from)
    }

    #[tool(description = "Get a GitHub Project v2 by node id")]
    async fn get_project(
        &self,
        Parameters(params): Parameters<GetProjectParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(handlers::get_project(self.api.as_ref(), params).await).map_err(McpError::from)
    }

    // ========================================================================
    // Item Tools
    // ========================================================================

    #[tool(
        description = "List all items of a project with their content (issue, pull request or draft issue) and field values"
    )]
    async fn list_project_items(
        &self,
        Parameters(params): Parameters<ListProjectItemsParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(handlers::list_project_items(self.api.as_ref(), params).await)
            .map_err(McpError::from)
    }

    #[tool(
        description = "Add an item to a project: link an existing issue or pull request by node id, or create a draft issue"
    )]
    async fn create_project_item(
        &self,
        Parameters(params): Parameters<CreateProjectItemParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(handlers::create_project_item(self.api.as_ref(), params).await)
            .map_err(McpError::from)
    }

    #[tool(
        description = "Update field values of a project item. Each field is updated independently; a rejected field is reported by name and earlier updates stay applied"
    )]
    async fn update_project_item(
        &self,
        Parameters(params): Parameters<UpdateProjectItemParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(handlers::update_project_item(self.api.as_ref(), params).await)
            .map_err(McpError::from)
    }

    #[tool(description = "Delete an item from a project")]
    async fn delete_project_item(
        &self,
        Parameters(params): Parameters<DeleteProjectItemParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(handlers::delete_project_item(self.api.as_ref(), params).await)
            .map_err(McpError::from)
    }
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

impl rmcp::ServerHandler for GhProjectMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        async move { Ok(ListToolsResult::with_all_items(self.tool_router.list_all())) }
    }

    fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        async move {
            let arguments = request.arguments.map(Value::Object).unwrap_or(Value::Null);
            tracing::debug!(tool = %request.name, "call_tool");
            <Self as ToolDispatch>::call_tool(self, &request.name, arguments)
                .await
                .map_err(McpError::from)
        }
    }
}

// ============================================================================
// ToolDispatch Implementation
// ============================================================================

#[async_trait]
impl ToolDispatch for GhProjectMcpServer {
    fn server_name(&self) -> &str {
        "gh-project"
    }

    fn list_tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    async fn call_tool(&self, name: &str, arguments: Value) -> ToolResult<CallToolResult> {
        let api = self.api.as_ref();
        match name {
            "list_projects" => respond(handlers::list_projects(api, parse_arguments(arguments)?).await),
            "get_project" => respond(handlers::get_project(api, parse_arguments(arguments)?).await),
            "list_project_items" => {
                respond(handlers::list_project_items(api, parse_arguments(arguments)?).await)
            }
            "create_project_item" => {
                respond(handlers::create_project_item(api, parse_arguments(arguments)?).await)
            }
            "update_project_item" => {
                respond(handlers::update_project_item(api, parse_arguments(arguments)?).await)
            }
            "delete_project_item" => {
                respond(handlers::delete_project_item(api, parse_arguments(arguments)?).await)
            }
            _ => Err(ToolError::unsupported(name)),
        }
    }
}
