//! reqwest-backed GraphQL client for GitHub
//!
//! One POST per call, bearer token on every request, no retries. Responses
//! are classified into [`GitHubError`] here so the tool layer only ever sees
//! typed failures.

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, RETRY_AFTER},
    Client, StatusCode,
};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::error::{GitHubError, GitHubResult};
use super::executor::{operation_name, GraphQlExecutor};
use crate::config::GitHubSettings;

const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";
const RATE_LIMIT_RESET: &str = "x-ratelimit-reset";

/// GitHub GraphQL client
pub struct GitHubClient {
    client: Client,
    endpoint: String,
}

/// One entry of a GraphQL `errors` array
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
}

/// REST-style error body GitHub sends with 4xx statuses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl GitHubClient {
    /// Build a client from settings
    ///
    /// The token is only ever stored inside the default headers.
    pub fn new(settings: &GitHubSettings) -> GitHubResult<Self> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", settings.token))
            .map_err(|_| {
                GitHubError::Authentication("token contains invalid header characters".into())
            })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

        let client = Client::builder()
            .user_agent(settings.user_agent.clone())
            .default_headers(headers)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| GitHubError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: settings.graphql_url.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[instrument(skip(self, document, variables), fields(operation = operation_name(document)))]
    async fn post_graphql(&self, document: &str, variables: Value) -> GitHubResult<Value> {
        let body = serde_json::json!({
            "query": document,
            "variables": variables,
        });

        debug!("sending GraphQL request");

        let response = self.client.post(&self.endpoint).json(&body).send().await?;

        let status = response.status();
        let headers = response.headers().clone();
        let text = response.text().await?;

        if !status.is_success() {
            let err = classify_status(status, &headers, &text);
            warn!(%status, error = %err, "GitHub request failed");
            return Err(err);
        }

        let parsed: GraphQlResponse = serde_json::from_str(&text)
            .map_err(|e| GitHubError::Upstream(format!("response is not valid JSON: {}", e)))?;

        if let Some(errors) = parsed.errors.filter(|e| !e.is_empty()) {
            let err = classify_graphql_errors(&errors, &headers);
            warn!(error = %err, "GraphQL errors in response");
            return Err(err);
        }

        match parsed.data {
            Some(Value::Null) | None => Err(GitHubError::Upstream(
                "response contained neither data nor errors".into(),
            )),
            Some(data) => Ok(data),
        }
    }
}

#[async_trait]
impl GraphQlExecutor for GitHubClient {
    async fn execute(&self, document: &str, variables: Value) -> GitHubResult<Value> {
        self.post_graphql(document, variables).await
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn reset_at(headers: &HeaderMap) -> Option<u64> {
    header_str(headers, RATE_LIMIT_RESET).and_then(|v| v.trim().parse().ok())
}

fn is_rate_limited(headers: &HeaderMap, message: &str) -> bool {
    header_str(headers, RATE_LIMIT_REMAINING).map(str::trim) == Some("0")
        || headers.contains_key(RETRY_AFTER)
        || message.to_ascii_lowercase().contains("rate limit")
}

fn error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(b) => b.message,
        Err(_) if body.trim().is_empty() => status.to_string(),
        Err(_) => {
            let snippet: String = body.chars().take(200).collect();
            format!("{}: {}", status, snippet)
        }
    }
}

/// Classify a non-2xx HTTP response
pub fn classify_status(status: StatusCode, headers: &HeaderMap, body: &str) -> GitHubError {
    let message = error_message(status, body);
    match status {
        StatusCode::UNAUTHORIZED => GitHubError::Authentication(message),
        StatusCode::TOO_MANY_REQUESTS => GitHubError::RateLimited {
            message,
            reset_at: reset_at(headers),
        },
        StatusCode::FORBIDDEN if is_rate_limited(headers, &message) => GitHubError::RateLimited {
            message,
            reset_at: reset_at(headers),
        },
        StatusCode::FORBIDDEN => GitHubError::Authorization(message),
        StatusCode::NOT_FOUND => GitHubError::NotFound(message),
        _ => GitHubError::Upstream(format!("HTTP {}: {}", status.as_u16(), message)),
    }
}

/// Classify a GraphQL `errors` array; the first categorised entry decides
pub fn classify_graphql_errors(errors: &[GraphQlError], headers: &HeaderMap) -> GitHubError {
    let message = errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");

    let kind = errors
        .iter()
        .find_map(|e| e.error_type.as_deref())
        .unwrap_or_default();

    match kind {
        "NOT_FOUND" => GitHubError::NotFound(message),
        "FORBIDDEN" | "INSUFFICIENT_SCOPES" => GitHubError::Authorization(message),
        "RATE_LIMITED" => GitHubError::RateLimited {
            message,
            reset_at: reset_at(headers),
        },
        "UNAUTHORIZED" => GitHubError::Authentication(message),
        _ => GitHubError::Upstream(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gql(message: &str, kind: Option<&str>) -> GraphQlError {
        GraphQlError {
            message: message.to_string(),
            error_type: kind.map(str::to_string),
        }
    }

    #[test]
    fn test_unauthorized_is_authentication() {
        let err = classify_status(
            StatusCode::UNAUTHORIZED,
            &HeaderMap::new(),
            r#"{"message":"Bad credentials","documentation_url":"https://docs.github.com"}"#,
        );
        assert_eq!(err, GitHubError::Authentication("Bad credentials".into()));
    }

    #[test]
    fn test_forbidden_with_exhausted_quota_is_rate_limit() {
        let mut headers = HeaderMap::new();
        headers.insert(RATE_LIMIT_REMAINING, HeaderValue::from_static("0"));
        headers.insert(RATE_LIMIT_RESET, HeaderValue::from_static("1700000000"));
        let err = classify_status(StatusCode::FORBIDDEN, &headers, "");
        assert_eq!(
            err,
            GitHubError::RateLimited {
                message: "403 Forbidden".into(),
                reset_at: Some(1_700_000_000)
            }
        );
    }

    #[test]
    fn test_secondary_rate_limit_message() {
        let err = classify_status(
            StatusCode::FORBIDDEN,
            &HeaderMap::new(),
            r#"{"message":"You have exceeded a secondary rate limit."}"#,
        );
        assert!(matches!(err, GitHubError::RateLimited { .. }));
    }

    #[test]
    fn test_plain_forbidden_is_authorization() {
        let err = classify_status(
            StatusCode::FORBIDDEN,
            &HeaderMap::new(),
            r#"{"message":"Resource not accessible by integration"}"#,
        );
        assert!(matches!(err, GitHubError::Authorization(_)));
    }

    #[test]
    fn test_server_error_is_upstream() {
        let err = classify_status(StatusCode::BAD_GATEWAY, &HeaderMap::new(), "<html>oops</html>");
        match err {
            GitHubError::Upstream(msg) => assert!(msg.starts_with("HTTP 502")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_graphql_not_found() {
        let err = classify_graphql_errors(
            &[gql(
                "Could not resolve to a node with the global id of 'PVT_x'",
                Some("NOT_FOUND"),
            )],
            &HeaderMap::new(),
        );
        assert!(matches!(err, GitHubError::NotFound(m) if m.contains("PVT_x")));
    }

    #[test]
    fn test_graphql_insufficient_scopes() {
        let err = classify_graphql_errors(
            &[gql("Your token has not been granted the required scopes", Some("INSUFFICIENT_SCOPES"))],
            &HeaderMap::new(),
        );
        assert!(matches!(err, GitHubError::Authorization(_)));
    }

    #[test]
    fn test_graphql_untyped_errors_are_upstream_and_joined() {
        let err = classify_graphql_errors(
            &[gql("first", None), gql("second", None)],
            &HeaderMap::new(),
        );
        assert_eq!(err, GitHubError::Upstream("first; second".into()));
    }
}
