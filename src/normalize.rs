use crate::error::Result;
use crate::models::{
    DataLanguage, DataRepository, DataResult, DataTopic, TopicRef, MAX_REPOSITORIES,
};
use crate::schema::{parse_timestamp, star_count, validate_data};
use crate::types::{Connection, GitHubUser, Language, Repository};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tracing::debug;

/// Turn a raw GitHub user into the validated data rendered on the page.
pub fn normalize_user(user: GitHubUser) -> Result<DataResult> {
    let pinned_ids = pinned_ids(&user);

    let mut ranked = Vec::new();
    let mut skipped = 0usize;
    for repo in edge_nodes(user.top_repositories) {
        if repo.is_private || repo.is_archived || repo.owner.id != user.id {
            skipped += 1;
            continue;
        }
        let rank = pinned_ids.iter().position(|id| *id == repo.id);
        ranked.push(Ranked::new(rank, repo));
    }

    // Stable sort: equal keys keep the order GitHub returned them in.
    ranked.sort_by(|a, b| {
        pinned_rank(a.rank)
            .cmp(&pinned_rank(b.rank))
            .then_with(|| b.stars.cmp(&a.stars))
            .then_with(|| b.pushed_at.cmp(&a.pushed_at))
    });
    ranked.truncate(MAX_REPOSITORIES);

    // Only repositories that made the cut are checked strictly.
    let repositories = ranked
        .into_iter()
        .map(|r| to_data_repository(r.repo, r.rank.is_some()))
        .collect::<Result<Vec<DataRepository>>>()?;

    debug!(
        kept = repositories.len(),
        skipped,
        pinned = pinned_ids.len(),
        "Normalized repositories"
    );

    let data = DataResult {
        name: non_blank(user.name),
        login: non_blank(user.login),
        avatar_url: non_blank(user.avatar_url),
        bio: non_blank(user.bio),
        github_url: non_blank(user.url),
        email: non_blank(user.email),
        repositories,
    };

    validate_data(&data)?;
    Ok(data)
}

/// Sort keys of a raw repository. Unparseable values sort last here and
/// are rejected later if the repository survives truncation.
struct Ranked {
    rank: Option<usize>,
    stars: i64,
    pushed_at: Option<DateTime<Utc>>,
    repo: Repository,
}

impl Ranked {
    fn new(rank: Option<usize>, repo: Repository) -> Self {
        let pushed_at = repo
            .pushed_at
            .as_deref()
            .and_then(|value| DateTime::parse_from_rfc3339(value).ok())
            .map(|dt| dt.with_timezone(&Utc));
        Self {
            rank,
            stars: repo.stargazer_count,
            pushed_at,
            repo,
        }
    }
}

/// Unpinned repositories sort after every pinned one.
fn pinned_rank(rank: Option<usize>) -> usize {
    rank.unwrap_or(usize::MAX)
}

fn pinned_ids(user: &GitHubUser) -> Vec<String> {
    user.pinned_items
        .as_ref()
        .and_then(|items| items.nodes.as_ref())
        .map(|nodes| {
            nodes
                .iter()
                .flatten()
                .filter_map(|item| item.id.clone())
                .collect()
        })
        .unwrap_or_default()
}

fn edge_nodes<T>(connection: Option<Connection<T>>) -> impl Iterator<Item = T> {
    connection
        .and_then(|c| c.edges)
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .filter_map(|edge| edge.node)
}

fn to_data_repository(repo: Repository, pinned: bool) -> Result<DataRepository> {
    let stargazer_count = star_count(&repo.name, repo.stargazer_count)?;
    let updated_at = parse_timestamp("updatedAt", &repo.updated_at)?;
    let pushed_at = repo
        .pushed_at
        .as_deref()
        .map(|value| parse_timestamp("pushedAt", value))
        .transpose()?;

    let languages = unique_languages(repo.primary_language, edge_nodes(repo.languages));
    let topics = edge_nodes(repo.repository_topics)
        .map(|node| DataTopic {
            id: node.id,
            topic: TopicRef {
                id: node.topic.id,
                name: node.topic.name,
            },
        })
        .collect();

    Ok(DataRepository {
        id: repo.id,
        name: repo.name,
        url: repo.url,
        pinned,
        description: non_blank(repo.description),
        homepage_url: normalize_homepage_url(&repo.homepage_url),
        updated_at,
        pushed_at,
        stargazer_count,
        languages,
        topics,
    })
}

/// Primary language first, then the rest, keeping the first of each id.
pub fn unique_languages(
    primary: Option<Language>,
    others: impl IntoIterator<Item = Language>,
) -> Vec<DataLanguage> {
    let mut seen = HashSet::new();
    primary
        .into_iter()
        .chain(others)
        .filter(|language| seen.insert(language.id.clone()))
        .map(|language| DataLanguage {
            id: language.id,
            name: language.name,
            color: language.color,
        })
        .collect()
}

/// Non-strings and empty strings mean no homepage; a missing scheme gets `https://`.
pub fn normalize_homepage_url(value: &serde_json::Value) -> Option<String> {
    match value.as_str() {
        Some("") | None => None,
        Some(url) if has_web_scheme(url) => Some(url.to_string()),
        Some(url) => Some(format!("https://{}", url)),
    }
}

fn has_web_scheme(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_homepage_normalization() {
        assert_eq!(
            normalize_homepage_url(&json!("example.com")),
            Some("https://example.com".to_string())
        );
        assert_eq!(
            normalize_homepage_url(&json!("http://example.com")),
            Some("http://example.com".to_string())
        );
        assert_eq!(
            normalize_homepage_url(&json!("httpie.io")),
            Some("https://httpie.io".to_string())
        );
        assert_eq!(normalize_homepage_url(&json!("")), None);
        assert_eq!(normalize_homepage_url(&json!(null)), None);
        assert_eq!(normalize_homepage_url(&json!(42)), None);
    }

    #[test]
    fn test_unique_languages_keeps_primary_first() {
        let lang = |id: &str, name: &str| Language {
            id: id.to_string(),
            name: name.to_string(),
            color: None,
        };
        let languages = unique_languages(
            Some(lang("L_rs", "Rust")),
            vec![lang("L_sh", "Shell"), lang("L_rs", "Rust"), lang("L_sh", "Shell")],
        );
        let names: Vec<_> = languages.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Rust", "Shell"]);
    }

    #[test]
    fn test_pinned_rank_orders_unranked_last() {
        assert!(pinned_rank(Some(0)) < pinned_rank(Some(3)));
        assert!(pinned_rank(Some(3)) < pinned_rank(None));
    }
}
