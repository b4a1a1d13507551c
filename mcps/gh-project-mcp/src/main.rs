//! GitHub Projects v2 MCP Server
//!
//! Exposes GitHub Projects v2 over MCP on stdio.
//!
//! # Configuration
//! Set `GITHUB_TOKEN` (or `GITHUB_PERSONAL_ACCESS_TOKEN`), optionally
//! `GITHUB_GRAPHQL_URL` for GitHub Enterprise, or configure in
//! `~/.config/gh-project-mcp.toml`.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use mcp_common::LogFormat;
use rmcp::{transport::stdio, ServiceExt};

use gh_project_mcp::config::Config;
use gh_project_mcp::{GhProjectMcpServer, GitHubClient};

#[derive(Parser)]
#[command(name = "gh-project-mcp")]
#[command(version, about = "MCP server for GitHub Projects v2")]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, env = "GH_PROJECT_CONFIG_PATH")]
    config: Option<PathBuf>,

    /// GraphQL endpoint (default: https://api.github.com/graphql)
    #[arg(long)]
    graphql_url: Option<String>,

    /// Log level for this server (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_overrides(cli.graphql_url, cli.log_level);

    mcp_common::init_tracing(
        "gh_project_mcp",
        &config.logging.level,
        LogFormat::parse(&config.logging.format),
    )?;

    config.validate()?;

    tracing::info!("Starting GitHub Projects MCP Server");
    match &config.source {
        Some(path) => tracing::info!("Loaded config from: {}", path.display()),
        None => tracing::info!("No config file found, using defaults"),
    }
    tracing::debug!(?config, "loaded configuration");

    let client = GitHubClient::new(&config.github)?;
    tracing::info!("GraphQL endpoint: {}", client.endpoint());

    let server = GhProjectMcpServer::new(Arc::new(client));
    let service = server.serve(stdio()).await?;

    tracing::info!("Server running, waiting for requests...");
    service.waiting().await?;

    tracing::info!("Server shutting down");
    Ok(())
}
