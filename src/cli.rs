use clap::{Parser, Subcommand};
use std::net::SocketAddr;

#[derive(Parser, Debug)]
#[command(name = "portfolio-site")]
#[command(about = "Personal portfolio website backed by the GitHub GraphQL API")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// GitHub access token used for the GraphQL API
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// GitHub login whose profile is shown
    #[arg(long, env = "GITHUB_LOGIN", default_value = "dhedegaard")]
    pub login: String,

    /// GitHub GraphQL endpoint
    #[arg(long, env = "GITHUB_GRAPHQL_URL", default_value = crate::github::GRAPHQL_URL)]
    pub graphql_url: String,

    /// Address the HTTP server listens on
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    /// Seconds before cached GitHub data is fetched again
    #[arg(long, env = "REVALIDATE_SECONDS", default_value_t = 3600)]
    pub revalidate_seconds: u64,

    /// Page title and name shown in the heading
    #[arg(long, env = "SITE_TITLE", default_value = "Dennis Hedegaard")]
    pub site_title: String,

    /// Meta description
    #[arg(
        long,
        env = "SITE_DESCRIPTION",
        default_value = "The personal website of Dennis Hedegaard"
    )]
    pub site_description: String,

    /// Canonical URL of the site
    #[arg(long, env = "SITE_URL", default_value = "https://www.dhedegaard.dk/")]
    pub site_url: String,

    /// Meta keywords
    #[arg(
        long,
        env = "SITE_KEYWORDS",
        default_value = "Dennis Hedegaard, Dennis Elsborg Heick Hedegaard, dhedegaard"
    )]
    pub keywords: String,

    /// Avatar image, without size parameter
    #[arg(
        long,
        env = "AVATAR_URL",
        default_value = "https://gravatar.com/avatar/d3fc3961d888b6792ee5b869bc64094527509d6ee9eb1e60bde5854009eb640f"
    )]
    pub avatar_url: String,

    /// LinkedIn profile link
    #[arg(
        long,
        env = "LINKEDIN_URL",
        default_value = "https://www.linkedin.com/in/dennis-hedegaard-39a02a22/"
    )]
    pub linkedin_url: String,

    /// Theme color meta tag
    #[arg(long, env = "THEME_COLOR", default_value = "#fff")]
    pub theme_color: String,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Fetch once and write the HTML page to stdout
    Render,
    /// Fetch once and print the normalized data as JSON
    Data,
}
