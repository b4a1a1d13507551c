//! Configuration loading for gh-project-mcp
//!
//! Sources, lowest priority first:
//! 1. Default values
//! 2. TOML file: `--config`, GH_PROJECT_CONFIG_PATH, or
//!    ~/.config/gh-project-mcp.toml when it exists
//! 3. Environment: GITHUB_TOKEN (or GITHUB_PERSONAL_ACCESS_TOKEN),
//!    GITHUB_GRAPHQL_URL, GH_PROJECT_LOG
//! 4. Command-line flags, applied by `main` through [`Config::apply_overrides`]

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_CONFIG_FILE: &str = "gh-project-mcp.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no GitHub token configured; set GITHUB_TOKEN or github.token in the config file")]
    MissingToken,

    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid GraphQL endpoint '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub github: GitHubSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    /// File the settings were read from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// GitHub API settings
#[derive(Clone, Serialize, Deserialize)]
pub struct GitHubSettings {
    /// Personal access token or app token with `project` scope
    #[serde(default, skip_serializing)]
    pub token: String,
    #[serde(default = "default_graphql_url")]
    pub graphql_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// `text` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_graphql_url() -> String {
    "https://api.github.com/graphql".to_string()
}

fn default_user_agent() -> String {
    concat!("gh-project-mcp/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self {
            token: String::new(),
            graphql_url: default_graphql_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl fmt::Debug for GitHubSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.token.is_empty() { "<unset>" } else { "<redacted>" };
        f.debug_struct("GitHubSettings")
            .field("token", &token)
            .field("graphql_url", &self.graphql_url)
            .field("user_agent", &self.user_agent)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Config {
    /// Load from the config file (if any) and the process environment
    ///
    /// Does not validate; call [`Config::validate`] after applying flags.
    pub fn load(path_override: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match Self::find_config_path(path_override) {
            Some(path) => {
                let contents = std::fs::read_to_string(&path)
                    .map_err(|source| ConfigError::Io { path: path.clone(), source })?;
                let mut config: Self = toml::from_str(&contents)
                    .map_err(|source| ConfigError::Parse { path: path.clone(), source })?;
                config.source = Some(path);
                config
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse file contents and layer environment values on top
    pub fn from_sources(
        file_contents: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = match file_contents {
            Some(contents) => toml::from_str(contents).map_err(|source| ConfigError::Parse {
                path: PathBuf::from("<inline>"),
                source,
            })?,
            None => Self::default(),
        };
        config.apply_env(env);
        Ok(config)
    }

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) {
        let var = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = var("GITHUB_TOKEN").or_else(|| var("GITHUB_PERSONAL_ACCESS_TOKEN")) {
            self.github.token = token.trim().to_string();
        }
        if let Some(url) = var("GITHUB_GRAPHQL_URL") {
            self.github.graphql_url = url;
        }
        if let Some(level) = var("GH_PROJECT_LOG") {
            self.logging.level = level;
        }
    }

    /// Apply command-line flags (highest priority)
    pub fn apply_overrides(&mut self, graphql_url: Option<String>, log_level: Option<String>) {
        if let Some(url) = graphql_url {
            self.github.graphql_url = url;
        }
        if let Some(level) = log_level {
            self.logging.level = level;
        }
    }

    /// Check the settings the server cannot start without
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.github.token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }

        let invalid = |reason: String| ConfigError::InvalidUrl {
            url: self.github.graphql_url.clone(),
            reason,
        };
        let url = url::Url::parse(&self.github.graphql_url).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }

        Ok(())
    }

    /// Find the configuration file path
    fn find_config_path(path_override: Option<&Path>) -> Option<PathBuf> {
        // Explicit paths must exist; the default location is optional
        if let Some(path) = path_override {
            return Some(path.to_path_buf());
        }
        if let Ok(path) = std::env::var("GH_PROJECT_CONFIG_PATH") {
            return Some(PathBuf::from(path));
        }

        std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".config").join(DEFAULT_CONFIG_FILE))
            .filter(|path| path.exists())
    }
}
