use crate::cli::Cli;

/// Identity of the site: everything in the page that does not come from GitHub.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub title: String,
    pub description: String,
    pub keywords: String,
    /// Canonical URL, with trailing slash
    pub url: String,
    pub avatar_url: String,
    pub linkedin_url: String,
    pub theme_color: String,
}

impl SiteConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        let mut url = cli.site_url.clone();
        if !url.ends_with('/') {
            url.push('/');
        }

        Self {
            title: cli.site_title.clone(),
            description: cli.site_description.clone(),
            keywords: cli.keywords.clone(),
            url,
            avatar_url: cli.avatar_url.clone(),
            linkedin_url: cli.linkedin_url.clone(),
            theme_color: cli.theme_color.clone(),
        }
    }

    /// Avatar URL at a given pixel size (gravatar style `?s=`)
    pub fn avatar_sized(&self, size: u32) -> String {
        let separator = if self.avatar_url.contains('?') { '&' } else { '?' };
        format!("{}{}s={}", self.avatar_url, separator, size)
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Dennis Hedegaard".to_string(),
            description: "The personal website of Dennis Hedegaard".to_string(),
            keywords: "Dennis Hedegaard, Dennis Elsborg Heick Hedegaard, dhedegaard".to_string(),
            url: "https://www.dhedegaard.dk/".to_string(),
            avatar_url: "https://gravatar.com/avatar/d3fc3961d888b6792ee5b869bc64094527509d6ee9eb1e60bde5854009eb640f".to_string(),
            linkedin_url: "https://www.linkedin.com/in/dennis-hedegaard-39a02a22/".to_string(),
            theme_color: "#fff".to_string(),
        }
    }
}
