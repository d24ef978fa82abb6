use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of repositories shown on the page
pub const MAX_REPOSITORIES: usize = 40;

/// Everything the page needs, derived from one GitHub response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataResult {
    pub name: Option<String>,
    pub login: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub github_url: Option<String>,
    pub email: Option<String>,
    pub repositories: Vec<DataRepository>,
}

/// A repository card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataRepository {
    pub id: String,
    pub name: String,
    pub url: String,
    pub pinned: bool,
    pub description: Option<String>,
    pub homepage_url: Option<String>,
    pub updated_at: DateTime<Utc>,
    pub pushed_at: Option<DateTime<Utc>>,
    pub stargazer_count: u32,
    pub languages: Vec<DataLanguage>,
    pub topics: Vec<DataTopic>,
}

impl DataRepository {
    pub fn has_topic_key(&self, key: &str) -> bool {
        self.topics.iter().any(|topic| topic.key() == key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataLanguage {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
}

/// A repository topic. `id` is the repository-topic link, `topic` the
/// topic itself, shared between repositories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataTopic {
    pub id: String,
    pub topic: TopicRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicRef {
    pub id: String,
    pub name: String,
}

impl DataTopic {
    /// Key used by the topic filter
    pub fn key(&self) -> String {
        format!("topic#{}", self.topic.id)
    }
}
