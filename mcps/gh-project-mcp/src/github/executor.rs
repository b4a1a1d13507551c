//! GraphQL execution seam
//!
//! Handlers depend on [`GraphQlExecutor`] rather than on the HTTP client, so
//! the whole tool layer can run against a scripted executor in tests.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::{GitHubError, GitHubResult};

/// Anything that can run a GraphQL document against GitHub
#[async_trait]
pub trait GraphQlExecutor: Send + Sync {
    /// Execute one document and return the response's `data` object
    async fn execute(&self, document: &str, variables: Value) -> GitHubResult<Value>;
}

/// Execute a document and decode `data` into `T`
pub async fn execute_typed<T: DeserializeOwned>(
    executor: &dyn GraphQlExecutor,
    document: &str,
    variables: Value,
) -> GitHubResult<T> {
    let data = executor.execute(document, variables).await?;
    serde_json::from_value(data).map_err(|e| {
        GitHubError::Upstream(format!(
            "{} returned an unexpected shape: {}",
            operation_name(document),
            e
        ))
    })
}

/// Name of the first operation in a GraphQL document, or `anonymous`
pub fn operation_name(document: &str) -> &str {
    let trimmed = document.trim_start();
    let rest = trimmed
        .strip_prefix("query")
        .or_else(|| trimmed.strip_prefix("mutation"));
    rest.map(str::trim_start)
        .and_then(|r| {
            let end = r
                .find(|c: char| !(c.is_alphanumeric() || c == '_'))
                .unwrap_or(r.len());
            (end > 0).then(|| &r[..end])
        })
        .unwrap_or("anonymous")
}
