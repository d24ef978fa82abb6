use crate::error::{PortfolioError, Result};
use crate::query::user_query;
use crate::types::{GitHubUser, GraphQlResponse, UserQueryData};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

pub const GRAPHQL_URL: &str = "https://api.github.com/graphql";
const USER_AGENT: &str = concat!("portfolio-site/", env!("CARGO_PKG_VERSION"));

/// GraphQL client for the GitHub API. Requests are never retried.
pub struct GitHubClient {
    client: Client,
    token: String,
    endpoint: Url,
}

impl GitHubClient {
    /// Build a client. A missing or blank token is rejected here, before
    /// anything touches the network.
    pub fn new(token: Option<String>) -> Result<Self> {
        let endpoint = Url::parse(GRAPHQL_URL)
            .map_err(|e| PortfolioError::InvalidUrl(format!("{}: {}", GRAPHQL_URL, e)))?;
        Self::with_endpoint(token, endpoint)
    }

    pub fn with_endpoint(token: Option<String>, endpoint: Url) -> Result<Self> {
        let token = match token {
            Some(token) if !token.trim().is_empty() => token.trim().to_string(),
            _ => return Err(PortfolioError::MissingToken),
        };

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(GitHubClient { client, token, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetch the raw profile and repositories for `login`.
    pub async fn fetch_user(&self, login: &str) -> Result<GitHubUser> {
        debug!(login, endpoint = %self.endpoint, "Querying GitHub GraphQL API");

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.token)
            .json(&user_query(login))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::UNAUTHORIZED => PortfolioError::ApiError(format!(
                    "Unauthorized (check GITHUB_TOKEN): {}",
                    error_text
                )),
                status => PortfolioError::ApiError(format!(
                    "API request failed with status {}: {}",
                    status, error_text
                )),
            });
        }

        // A body that does not match the query shape is a JSON error, not a transport one.
        let text = response.text().await?;
        let body: GraphQlResponse<UserQueryData> = serde_json::from_str(&text)?;
        let user = extract_user(body, login)?;

        info!(
            login,
            repositories = user
                .top_repositories
                .as_ref()
                .and_then(|repos| repos.total_count)
                .unwrap_or(0),
            "Fetched GitHub user"
        );
        Ok(user)
    }
}

/// Unwrap a GraphQL envelope. Any reported error fails the whole request.
pub fn extract_user(body: GraphQlResponse<UserQueryData>, login: &str) -> Result<GitHubUser> {
    if let Some(errors) = body.errors.filter(|errors| !errors.is_empty()) {
        return Err(PortfolioError::GraphQl(
            errors.into_iter().map(|e| e.message).collect(),
        ));
    }

    body.data
        .and_then(|data| data.user)
        .ok_or_else(|| PortfolioError::NotFound(format!("GitHub user {}", login)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GraphQlError;

    #[test]
    fn test_blank_token_is_missing() {
        assert!(matches!(
            GitHubClient::new(Some("   ".to_string())),
            Err(PortfolioError::MissingToken)
        ));
    }

    #[test]
    fn test_extract_user_prefers_errors() {
        let body = GraphQlResponse {
            data: Some(UserQueryData { user: None }),
            errors: Some(vec![GraphQlError {
                message: "Could not resolve to a User".to_string(),
                kind: Some("NOT_FOUND".to_string()),
            }]),
        };

        match extract_user(body, "ghost") {
            Err(PortfolioError::GraphQl(messages)) => {
                assert_eq!(messages, vec!["Could not resolve to a User".to_string()]);
            }
            other => panic!("Expected GraphQl error, got: {:?}", other),
        }
    }

    #[test]
    fn test_extract_user_null_user() {
        let body = GraphQlResponse {
            data: Some(UserQueryData { user: None }),
            errors: Some(vec![]),
        };
        assert!(matches!(extract_user(body, "ghost"), Err(PortfolioError::NotFound(_))));
    }
}
