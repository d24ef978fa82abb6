use crate::error::{report, Result};
use crate::github::GitHubClient;
use crate::models::DataResult;
use crate::normalize::normalize_user;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Fetches and normalizes the profile of one GitHub login.
pub struct DataLoader {
    client: GitHubClient,
    login: String,
}

impl DataLoader {
    pub fn new(client: GitHubClient, login: String) -> Self {
        Self { client, login }
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    /// One fetch, no retries. Failures are reported, then returned.
    pub async fn load(&self) -> Result<DataResult> {
        let result = match self.client.fetch_user(&self.login).await {
            Ok(user) => normalize_user(user),
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            report(e);
        }
        result
    }
}

struct Entry {
    data: Arc<DataResult>,
    fetched_at: Instant,
}

/// Time-based revalidation: data younger than `ttl` is served from memory,
/// the first request after that refetches. A failed refetch is an error;
/// stale data is never served in its place.
pub struct RevalidatingCache {
    loader: DataLoader,
    ttl: Duration,
    entry: Mutex<Option<Entry>>,
}

impl RevalidatingCache {
    pub fn new(loader: DataLoader, ttl: Duration) -> Self {
        Self {
            loader,
            ttl,
            entry: Mutex::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn get(&self) -> Result<Arc<DataResult>> {
        // Held across the fetch so concurrent requests wait for one refetch.
        let mut entry = self.entry.lock().await;

        if let Some(cached) = entry.as_ref() {
            if cached.fetched_at.elapsed() < self.ttl {
                debug!(age_secs = cached.fetched_at.elapsed().as_secs(), "Serving cached data");
                return Ok(cached.data.clone());
            }
        }

        let data = Arc::new(self.loader.load().await?);
        info!(
            login = self.loader.login(),
            repositories = data.repositories.len(),
            "Revalidated GitHub data"
        );
        *entry = Some(Entry {
            data: data.clone(),
            fetched_at: Instant::now(),
        });
        Ok(data)
    }

    /// Drop the cached value so the next `get` refetches.
    pub async fn invalidate(&self) {
        *self.entry.lock().await = None;
    }
}
