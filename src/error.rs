use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum PortfolioError {
    #[error("Missing GitHub access token (set GITHUB_TOKEN)")]
    MissingToken,

    #[error("GitHub API error: {0}")]
    ApiError(String),

    #[error("GraphQL error: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl PortfolioError {
    /// Short machine-readable label used when reporting the error.
    pub fn kind(&self) -> &'static str {
        match self {
            PortfolioError::MissingToken => "configuration",
            PortfolioError::ApiError(_) => "upstream_http",
            PortfolioError::GraphQl(_) => "upstream_graphql",
            PortfolioError::NotFound(_) => "not_found",
            PortfolioError::Validation(_) => "validation",
            PortfolioError::InvalidUrl(_) => "configuration",
            PortfolioError::NetworkError(_) => "network",
            PortfolioError::JsonError(_) => "malformed_response",
            PortfolioError::IoError(_) => "io",
        }
    }
}

/// Report a failure to the error tracker. Callers still propagate the error.
pub fn report(err: &PortfolioError) {
    error!(kind = err.kind(), error = %err, "Failed to load portfolio data");
}

pub type Result<T> = std::result::Result<T, PortfolioError>;
