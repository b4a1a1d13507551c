//! Tracing setup for MCP servers
//!
//! Logs always go to stderr; stdout carries the MCP protocol frames.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// Parse a format name; anything other than `json` means text
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

/// Build the filter: `RUST_LOG` wins, otherwise `<crate_name>=<level>`
fn build_filter(crate_name: &str, level: &str) -> anyhow::Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    let directive = format!("{}={}", crate_name, level);
    Ok(EnvFilter::new("warn").add_directive(directive.parse()?))
}

/// Initialize tracing for an MCP server
///
/// * `crate_name` - target of the server crate (e.g. `gh_project_mcp`)
/// * `level` - default verbosity for that target when `RUST_LOG` is unset
/// * `format` - text or JSON lines; `LOG_FORMAT=json` forces JSON
pub fn init_tracing(crate_name: &str, level: &str, format: LogFormat) -> anyhow::Result<()> {
    let filter = build_filter(crate_name, level)?;

    let format = match std::env::var("LOG_FORMAT") {
        Ok(v) => LogFormat::parse(&v),
        Err(_) => format,
    };

    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?,
    }

    Ok(())
}
