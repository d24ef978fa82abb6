#![allow(dead_code)]

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use portfolio_site::cache::{DataLoader, RevalidatingCache};
use portfolio_site::github::GitHubClient;
use portfolio_site::types::GitHubUser;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

pub const USER_ID: &str = "U_owner";

/// Canned GraphQL endpoint running on a random local port.
pub struct MockGitHub {
    pub url: Url,
    pub response: Arc<Mutex<(StatusCode, Value)>>,
    pub requests: Arc<AtomicUsize>,
    pub last_authorization: Arc<Mutex<Option<String>>>,
    pub last_body: Arc<Mutex<Option<Value>>>,
}

#[derive(Clone)]
struct MockState {
    response: Arc<Mutex<(StatusCode, Value)>>,
    requests: Arc<AtomicUsize>,
    last_authorization: Arc<Mutex<Option<String>>>,
    last_body: Arc<Mutex<Option<Value>>>,
}

async fn graphql(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(request): Json<Value>,
) -> impl IntoResponse {
    state.requests.fetch_add(1, Ordering::SeqCst);
    *state.last_authorization.lock().unwrap() = headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);
    *state.last_body.lock().unwrap() = Some(request);
    let (status, body) = state.response.lock().unwrap().clone();
    (status, Json(body))
}

impl MockGitHub {
    pub async fn start(status: StatusCode, body: Value) -> Self {
        let requests = Arc::new(AtomicUsize::new(0));
        let last_authorization = Arc::new(Mutex::new(None));
        let last_body = Arc::new(Mutex::new(None));
        let response = Arc::new(Mutex::new((status, body)));
        let state = MockState {
            response: response.clone(),
            requests: requests.clone(),
            last_authorization: last_authorization.clone(),
            last_body: last_body.clone(),
        };

        let app = Router::new().route("/graphql", post(graphql)).with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        MockGitHub {
            url: Url::parse(&format!("http://{}/graphql", addr)).unwrap(),
            response,
            requests,
            last_authorization,
            last_body,
        }
    }

    pub async fn with_user(user: Value) -> Self {
        Self::start(StatusCode::OK, json!({ "data": { "user": user } })).await
    }

    /// Replace what the endpoint answers from now on.
    pub fn respond_with(&self, status: StatusCode, body: Value) {
        *self.response.lock().unwrap() = (status, body);
    }

    pub fn client(&self) -> GitHubClient {
        GitHubClient::with_endpoint(Some("test_token".to_string()), self.url.clone()).unwrap()
    }

    pub fn cache(&self, ttl: Duration) -> RevalidatingCache {
        RevalidatingCache::new(DataLoader::new(self.client(), "octocat".to_string()), ttl)
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

/// Raw repository node with sensible defaults.
pub fn repo(id: &str, stars: i64, pushed_at: &str) -> Value {
    json!({
        "id": id,
        "owner": { "id": USER_ID },
        "name": format!("repo-{}", id),
        "url": format!("https://github.com/octocat/repo-{}", id),
        "description": format!("Description of {}", id),
        "isArchived": false,
        "isPrivate": false,
        "stargazerCount": stars,
        "homepageUrl": null,
        "updatedAt": "2024-01-01T00:00:00Z",
        "pushedAt": pushed_at,
        "repositoryTopics": { "totalCount": 0, "edges": [] },
        "primaryLanguage": null,
        "languages": { "totalCount": 0, "edges": [] },
    })
}

/// Raw user wrapping the given repository nodes.
pub fn user(repos: Vec<Value>, pinned: &[&str]) -> Value {
    let pinned_nodes: Vec<Value> = pinned.iter().map(|id| json!({ "id": id, "name": id })).collect();
    let edges: Vec<Value> = repos.into_iter().map(|node| json!({ "node": node })).collect();
    json!({
        "id": USER_ID,
        "login": "octocat",
        "name": "The Octocat",
        "avatarUrl": "https://avatars.githubusercontent.com/u/583231",
        "bio": "Mascot",
        "url": "https://github.com/octocat",
        "email": "octocat@github.com",
        "pinnedItems": { "nodes": pinned_nodes },
        "topRepositories": {
            "totalCount": edges.len(),
            "pageInfo": { "hasNextPage": false },
            "edges": edges,
        },
    })
}

pub fn parse_user(value: Value) -> GitHubUser {
    serde_json::from_value(value).unwrap()
}

pub fn topic(link_id: &str, topic_id: &str, name: &str) -> Value {
    json!({ "node": { "id": link_id, "topic": { "id": topic_id, "name": name } } })
}

pub fn language(id: &str, name: &str) -> Value {
    json!({ "id": id, "name": name, "color": "#dea584" })
}
