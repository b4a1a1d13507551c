//! HTTP client tests against a local mock of the GraphQL endpoint

use gh_project_mcp::config::GitHubSettings;
use gh_project_mcp::github::{GitHubClient, GitHubError, GraphQlExecutor};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings(server: &MockServer) -> GitHubSettings {
    GitHubSettings {
        token: "ghp_test".into(),
        graphql_url: format!("{}/graphql", server.uri()),
        timeout_secs: 5,
        ..Default::default()
    }
}

async fn client(server: &MockServer) -> GitHubClient {
    GitHubClient::new(&settings(server)).unwrap()
}

const QUERY: &str = "query GetProject($projectId: ID!) { node(id: $projectId) { id } }";

#[tokio::test]
async fn sends_bearer_token_and_returns_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("authorization", "Bearer ghp_test"))
        .and(body_partial_json(json!({ "variables": { "projectId": "PVT_1" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "node": { "id": "PVT_1" } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let data = client(&server)
        .await
        .execute(QUERY, json!({ "projectId": "PVT_1" }))
        .await
        .unwrap();

    assert_eq!(data, json!({ "node": { "id": "PVT_1" } }));
}

#[tokio::test]
async fn unauthorized_is_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Bad credentials"
        })))
        .mount(&server)
        .await;

    let err = client(&server).await.execute(QUERY, json!({})).await.unwrap_err();
    assert_eq!(err, GitHubError::Authentication("Bad credentials".into()));
}

#[tokio::test]
async fn too_many_requests_is_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("x-ratelimit-reset", "1700000000")
                .set_body_json(json!({ "message": "API rate limit exceeded" })),
        )
        .mount(&server)
        .await;

    let err = client(&server).await.execute(QUERY, json!({})).await.unwrap_err();
    assert!(matches!(
        err,
        GitHubError::RateLimited {
            reset_at: Some(1_700_000_000),
            ..
        }
    ));
}

#[tokio::test]
async fn graphql_not_found_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "node": null },
            "errors": [{
                "type": "NOT_FOUND",
                "path": ["node"],
                "message": "Could not resolve to a node with the global id of 'PVT_x'"
            }]
        })))
        .mount(&server)
        .await;

    let err = client(&server).await.execute(QUERY, json!({})).await.unwrap_err();
    assert!(matches!(err, GitHubError::NotFound(ref m) if m.contains("PVT_x")));
}

#[tokio::test]
async fn graphql_insufficient_scopes_is_authorization() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [{
                "type": "INSUFFICIENT_SCOPES",
                "message": "Your token has not been granted the required scopes"
            }]
        })))
        .mount(&server)
        .await;

    let err = client(&server).await.execute(QUERY, json!({})).await.unwrap_err();
    assert!(matches!(err, GitHubError::Authorization(_)));
}

#[tokio::test]
async fn invalid_json_is_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client(&server).await.execute(QUERY, json!({})).await.unwrap_err();
    assert!(matches!(err, GitHubError::Upstream(_)));
}

#[tokio::test]
async fn unreachable_endpoint_is_transport_error() {
    let settings = GitHubSettings {
        token: "ghp_test".into(),
        graphql_url: "http://127.0.0.1:1/graphql".into(),
        timeout_secs: 5,
        ..Default::default()
    };

    let err = GitHubClient::new(&settings)
        .unwrap()
        .execute(QUERY, json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, GitHubError::Transport(_)));
}
