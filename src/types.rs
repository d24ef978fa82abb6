use serde::Deserialize;

// GitHub GraphQL response structures. Nullable fields in the GitHub schema
// are `Option` here; shape checks happen after normalization.

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UserQueryData {
    pub user: Option<GitHubUser>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitHubUser {
    pub id: String,
    pub login: Option<String>,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub url: Option<String>,
    pub email: Option<String>,
    pub pinned_items: Option<PinnedItems>,
    pub top_repositories: Option<Connection<Repository>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PinnedItems {
    pub nodes: Option<Vec<Option<PinnedItem>>>,
}

/// A pinned item. Gists are pinnable too and come back without fields.
#[derive(Debug, Clone, Deserialize)]
pub struct PinnedItem {
    pub id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    pub total_count: Option<u32>,
    pub page_info: Option<PageInfo>,
    pub edges: Option<Vec<Option<Edge<T>>>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Edge<T> {
    pub node: Option<T>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub id: String,
    pub owner: RepositoryOwner,
    pub name: String,
    pub url: String,
    pub description: Option<String>,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub is_private: bool,
    pub stargazer_count: i64,
    /// Kept untyped: anything other than a non-empty string means "no homepage".
    #[serde(default)]
    pub homepage_url: serde_json::Value,
    pub updated_at: String,
    pub pushed_at: Option<String>,
    pub repository_topics: Option<Connection<RepositoryTopic>>,
    pub primary_language: Option<Language>,
    pub languages: Option<Connection<Language>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryOwner {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryTopic {
    pub id: String,
    pub topic: Topic,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Topic {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Language {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
}
