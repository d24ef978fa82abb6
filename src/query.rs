use serde::Serialize;
use serde_json::json;

/// Maximum number of pinned items, repositories, topics and languages
/// requested per connection.
pub const PAGE_SIZE: u32 = 100;

const USER_QUERY: &str = r#"
query($login: String!, $first: Int!) {
  user(login: $login) {
    id
    login
    name
    avatarUrl
    bio
    url
    email
    pinnedItems(first: $first) {
      nodes {
        ... on Repository {
          id
          name
        }
      }
    }
    topRepositories(orderBy: { field: PUSHED_AT, direction: DESC }, first: $first) {
      totalCount
      pageInfo {
        hasNextPage
      }
      edges {
        node {
          id
          owner {
            id
          }
          name
          url
          description
          isArchived
          isPrivate
          stargazerCount
          homepageUrl
          updatedAt
          pushedAt
          repositoryTopics(first: $first) {
            totalCount
            edges {
              node {
                id
                topic {
                  id
                  name
                }
              }
            }
          }
          primaryLanguage {
            id
            color
            name
          }
          languages(first: $first) {
            totalCount
            edges {
              node {
                id
                color
                name
              }
            }
          }
        }
      }
    }
  }
}
"#;

/// Body of a GraphQL POST request
#[derive(Debug, Serialize)]
pub struct GraphQlRequest {
    pub query: &'static str,
    pub variables: serde_json::Value,
}

/// Build the profile query for `login`.
pub fn user_query(login: &str) -> GraphQlRequest {
    GraphQlRequest {
        query: USER_QUERY,
        variables: json!({
            "login": login,
            "first": PAGE_SIZE,
        }),
    }
}
