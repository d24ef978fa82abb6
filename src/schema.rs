//! Shape checks for normalized data. Any violation fails the request.

use crate::error::{PortfolioError, Result};
use crate::models::{DataRepository, DataResult, MAX_REPOSITORIES};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use url::Url;

pub fn validate_data(data: &DataResult) -> Result<()> {
    if data.repositories.len() > MAX_REPOSITORIES {
        return Err(invalid(format!(
            "expected at most {} repositories, got {}",
            MAX_REPOSITORIES,
            data.repositories.len()
        )));
    }

    if let Some(avatar_url) = &data.avatar_url {
        web_url("avatarUrl", avatar_url)?;
    }
    if let Some(github_url) = &data.github_url {
        web_url("githubUrl", github_url)?;
    }
    if let Some(email) = &data.email {
        if !email.contains('@') {
            return Err(invalid(format!("email is not an address: {:?}", email)));
        }
    }

    for repo in &data.repositories {
        validate_repository(repo)?;
    }

    Ok(())
}

fn validate_repository(repo: &DataRepository) -> Result<()> {
    non_empty("repository id", &repo.id)?;
    non_empty("repository name", &repo.name)?;
    web_url("repository url", &repo.url)?;

    if let Some(homepage_url) = &repo.homepage_url {
        web_url("homepageUrl", homepage_url)?;
    }

    let mut seen = HashSet::new();
    for language in &repo.languages {
        non_empty("language id", &language.id)?;
        non_empty("language name", &language.name)?;
        if !seen.insert(language.id.as_str()) {
            return Err(invalid(format!(
                "duplicate language {} on {}",
                language.id, repo.name
            )));
        }
    }

    for topic in &repo.topics {
        non_empty("topic id", &topic.topic.id)?;
        non_empty("topic name", &topic.topic.name)?;
    }

    Ok(())
}

/// Parse an ISO-8601 timestamp as sent by GitHub (`2024-01-31T12:00:00Z`).
pub fn parse_timestamp(field: &str, value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| invalid(format!("{} is not a timestamp ({:?}): {}", field, value, e)))
}

pub fn star_count(repo_name: &str, value: i64) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| invalid(format!("{} has an invalid star count: {}", repo_name, value)))
}

fn non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(format!("{} is empty", field)));
    }
    Ok(())
}

fn web_url(field: &str, value: &str) -> Result<()> {
    let url = Url::parse(value)
        .map_err(|e| invalid(format!("{} is not a URL ({:?}): {}", field, value, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(invalid(format!("{} has unsupported scheme {}", field, scheme))),
    }
}

fn invalid(message: String) -> PortfolioError {
    PortfolioError::Validation(message)
}
