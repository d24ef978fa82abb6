use anyhow::Context;
use clap::Parser;
use colored::*;
use portfolio_site::cache::{DataLoader, RevalidatingCache};
use portfolio_site::cli::{Cli, Command};
use portfolio_site::github::GitHubClient;
use portfolio_site::filter::TopicFilter;
use portfolio_site::render::render_page;
use portfolio_site::server::{start_server, AppState};
use portfolio_site::site::SiteConfig;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use url::Url;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let site = SiteConfig::from_cli(&cli);

    let endpoint = Url::parse(&cli.graphql_url)
        .with_context(|| format!("Invalid GraphQL URL: {}", cli.graphql_url))?;
    let client = GitHubClient::with_endpoint(cli.github_token.clone(), endpoint)?;
    let loader = DataLoader::new(client, cli.login.clone());

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            eprintln!("{}", "Portfolio Site".bold().green());
            eprintln!("{}\n", "=".repeat(50).dimmed());
            eprintln!("👤 GitHub login: {}", cli.login);
            eprintln!("🔁 Revalidating every {}s", cli.revalidate_seconds);
            eprintln!("🌐 Listening on http://{}\n", cli.bind);

            let cache = RevalidatingCache::new(loader, Duration::from_secs(cli.revalidate_seconds));
            let state = AppState::new(cache, site);

            tokio::select! {
                result = start_server(state, cli.bind) => {
                    result.context("HTTP server failed")?;
                }
                _ = tokio::signal::ctrl_c() => {
                    eprintln!("\n🛑 Shutting down server...");
                }
            }
        }
        Command::Render => {
            let data = loader.load().await?;
            print!("{}", render_page(&site, &data, &TopicFilter::new()));
        }
        Command::Data => {
            let data = loader.load().await?;
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
    }

    Ok(())
}
