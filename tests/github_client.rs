mod common;

use axum::http::StatusCode;
use common::{repo, user, MockGitHub};
use portfolio_site::error::PortfolioError;
use portfolio_site::github::GitHubClient;
use serde_json::json;

fn get_test_token() -> Option<String> {
    std::env::var("GITHUB_TOKEN").ok()
}

#[tokio::test]
async fn test_github_client_creation() {
    let client = GitHubClient::new(Some("test_token".to_string()));
    assert!(client.is_ok());
    assert_eq!(client.unwrap().endpoint().as_str(), "https://api.github.com/graphql");
}

#[tokio::test]
async fn test_missing_token_fails_before_network() {
    let mock = MockGitHub::with_user(user(vec![], &[])).await;

    let result = GitHubClient::with_endpoint(None, mock.url.clone());
    assert!(matches!(result, Err(PortfolioError::MissingToken)));
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_fetch_user_sends_query_and_token() {
    let mock = MockGitHub::with_user(user(vec![repo("A", 1, "2024-01-01T00:00:00Z")], &["A"])).await;

    let fetched = mock.client().fetch_user("octocat").await.expect("Failed to fetch user");

    assert_eq!(fetched.id, common::USER_ID);
    assert_eq!(mock.request_count(), 1);
    assert_eq!(
        mock.last_authorization.lock().unwrap().as_deref(),
        Some("Bearer test_token")
    );
    let body = mock.last_body.lock().unwrap().clone().unwrap();
    assert_eq!(body["variables"]["login"], "octocat");
    assert!(body["query"].as_str().unwrap().contains("topRepositories"));
}

#[tokio::test]
async fn test_non_success_status_is_api_error() {
    let mock = MockGitHub::start(StatusCode::BAD_GATEWAY, json!({ "message": "upstream down" })).await;

    let result = mock.client().fetch_user("octocat").await;

    match result {
        Err(PortfolioError::ApiError(message)) => assert!(message.contains("502")),
        other => panic!("Expected ApiError, got: {:?}", other),
    }
    // No retries
    assert_eq!(mock.request_count(), 1);
}

#[tokio::test]
async fn test_graphql_errors_are_fatal() {
    let mock = MockGitHub::start(
        StatusCode::OK,
        json!({
            "data": null,
            "errors": [{ "type": "RATE_LIMITED", "message": "API rate limit exceeded" }],
        }),
    )
    .await;

    let result = mock.client().fetch_user("octocat").await;

    match result {
        Err(PortfolioError::GraphQl(messages)) => {
            assert_eq!(messages, vec!["API rate limit exceeded".to_string()]);
        }
        other => panic!("Expected GraphQl error, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_user_not_found() {
    let mock = MockGitHub::start(StatusCode::OK, json!({ "data": { "user": null } })).await;

    let result = mock.client().fetch_user("ghost").await;

    assert!(matches!(result, Err(PortfolioError::NotFound(_))));
}

#[tokio::test]
async fn test_malformed_body_is_json_error() {
    let mock = MockGitHub::start(StatusCode::OK, json!({ "data": { "user": { "id": 5 } } })).await;

    let result = mock.client().fetch_user("octocat").await;

    match result {
        Err(error @ PortfolioError::JsonError(_)) => {
            assert_eq!(error.kind(), "malformed_response");
        }
        other => panic!("Expected JsonError, got: {:?}", other),
    }
}

#[tokio::test]
#[ignore = "Requires valid GitHub token"]
async fn test_fetch_real_user() {
    let token = get_test_token().expect("GITHUB_TOKEN not set");
    let client = GitHubClient::new(Some(token)).expect("Failed to create client");

    let user = client.fetch_user("octocat").await.expect("Failed to fetch user");

    assert!(!user.id.is_empty());
    assert_eq!(user.login.as_deref(), Some("octocat"));
}
