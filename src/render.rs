//! Server-side HTML for the profile page, the 404 page and the failure page.

use crate::filter::TopicFilter;
use crate::models::{DataRepository, DataResult, DataTopic};
use crate::site::SiteConfig;
use std::fmt::Write;
use url::form_urlencoded;

const STYLE: &str = r#"
body{margin:0;font-family:system-ui,-apple-system,sans-serif;color:#111;background:#fff}
a{color:#2563eb;text-decoration:none}
.container{max-width:56rem;margin:0 auto;padding:0 1.5rem}
.profile{display:flex;gap:1rem;margin:2rem 0 4rem}
.profile-text{flex:1 1 auto;display:flex;flex-direction:column;gap:1.5rem}
.profile h1{font-size:3rem;font-weight:400;margin:0}
.avatar{flex:none;width:90px;height:90px;border-radius:50%;object-fit:cover}
.repos-header{display:flex;justify-content:space-between;align-items:center}
.repos-header h2{font-size:1.25rem;font-weight:400;margin:0 0 1rem}
.clear-filters{border:1px solid #000;border-radius:1rem;padding:.25rem .5rem;font-size:.75rem;background:#000;color:#fff}
.grid{display:grid;grid-template-columns:repeat(2,1fr);gap:1.5rem;margin-bottom:2.25rem}
.repo{border:1px solid #e5e7eb;border-radius:.25rem;padding:1rem;display:flex;flex-direction:column;gap:.5rem}
.repo-head{display:flex;justify-content:space-between;align-items:flex-start}
.repo-name{font-weight:700;color:inherit}
.repo-meta{display:flex;gap:.5rem;align-items:center;font-size:.875rem}
.description{flex:1 1 auto;font-size:.875rem}
.homepage{font-size:.75rem;overflow:hidden;text-overflow:ellipsis}
.topics{display:inline-flex;flex-wrap:wrap;gap:.25rem;width:100%}
.topic{border:1px solid #9ca3af;border-radius:1rem;padding:.375rem .5rem;font-size:.75rem;color:inherit;user-select:none}
.topic.selected{background:#000;color:#fff;border-color:#000}
.languages{font-size:.75rem}
.empty{color:#6b7280}
@media (max-width:767px){.container{padding:0 1rem}.grid{grid-template-columns:1fr}.avatar{width:60px;height:60px}}
"#;

/// Escape text for use in HTML content and double-quoted attributes.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Full profile page. `filter` selects which repository cards are shown.
pub fn render_page(site: &SiteConfig, data: &DataResult, filter: &TopicFilter) -> String {
    let mut body = String::new();
    render_profile(&mut body, site, data);
    render_repositories(&mut body, data, filter);
    document(site, &site.title, &body)
}

pub fn render_not_found(site: &SiteConfig) -> String {
    let body = "<h1>404: Not found</h1>\n\
                <p>The page does not exist. <a href=\"/\">Go to the main page</a>.</p>\n";
    document(site, &format!("404: Not found | {}", site.title), body)
}

/// Generic failure page. The error itself is logged, never shown.
pub fn render_error(site: &SiteConfig) -> String {
    let body = "<h1>500: Internal server error</h1>\n\
                <p>Something went wrong while loading this page. Please try again later.</p>\n";
    document(site, &format!("Error | {}", site.title), body)
}

fn document(site: &SiteConfig, title: &str, body: &str) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    render_head(&mut html, site, title);
    html.push_str("</head>\n<body>\n<div class=\"container\">\n");
    html.push_str(body);
    html.push_str("</div>\n</body>\n</html>\n");
    html
}

fn render_head(out: &mut String, site: &SiteConfig, title: &str) {
    let title = escape(title);
    let name = escape(&site.title);
    let description = escape(&site.description);
    let url = escape(&site.url);
    let image = escape(&site.avatar_sized(512));

    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(out, "<title>{}</title>", title);
    let _ = writeln!(out, "<meta name=\"description\" content=\"{}\">", description);
    let _ = writeln!(out, "<meta name=\"keywords\" content=\"{}\">", escape(&site.keywords));
    out.push_str("<meta name=\"robots\" content=\"index, follow\">\n");
    let _ = writeln!(out, "<meta name=\"theme-color\" content=\"{}\">", escape(&site.theme_color));
    let _ = writeln!(out, "<link rel=\"canonical\" href=\"{}\">", url);
    out.push_str("<link rel=\"manifest\" href=\"/manifest.json\">\n");
    let _ = writeln!(out, "<link rel=\"icon\" href=\"{}\">", escape(&site.avatar_url));
    let _ = writeln!(out, "<link rel=\"apple-touch-icon\" href=\"{}\">", escape(&site.avatar_sized(180)));
    out.push_str("<meta name=\"apple-mobile-web-app-capable\" content=\"yes\">\n");
    let _ = writeln!(out, "<meta name=\"apple-mobile-web-app-title\" content=\"{}\">", name);

    out.push_str("<meta property=\"og:type\" content=\"website\">\n");
    let _ = writeln!(out, "<meta property=\"og:title\" content=\"{}\">", name);
    let _ = writeln!(out, "<meta property=\"og:site_name\" content=\"{}\">", name);
    let _ = writeln!(out, "<meta property=\"og:url\" content=\"{}\">", url);
    let _ = writeln!(out, "<meta property=\"og:description\" content=\"{}\">", description);
    let _ = writeln!(out, "<meta property=\"og:image\" content=\"{}\">", image);
    out.push_str("<meta property=\"og:image:width\" content=\"512\">\n");
    out.push_str("<meta property=\"og:image:height\" content=\"512\">\n");

    out.push_str("<meta name=\"twitter:card\" content=\"summary\">\n");
    let _ = writeln!(out, "<meta name=\"twitter:title\" content=\"{}\">", name);
    let _ = writeln!(out, "<meta name=\"twitter:description\" content=\"{}\">", description);
    let _ = writeln!(out, "<meta name=\"twitter:image\" content=\"{}\">", image);

    let _ = writeln!(out, "<style>{}</style>", STYLE.trim());
}

fn render_profile(out: &mut String, site: &SiteConfig, data: &DataResult) {
    out.push_str("<div class=\"profile\">\n<div class=\"profile-text\">\n");
    let _ = writeln!(out, "<h1>{}</h1>", escape(&site.title));
    if let Some(bio) = &data.bio {
        let _ = writeln!(out, "<p class=\"bio\">{}</p>", escape(bio));
    }
    render_find_me(out, site, data);
    out.push_str("</div>\n");
    let _ = writeln!(
        out,
        "<img class=\"avatar\" src=\"{}\" alt=\"Me\" width=\"90\" height=\"90\" crossorigin=\"anonymous\">",
        escape(&site.avatar_sized(360))
    );
    out.push_str("</div>\n");
}

fn render_find_me(out: &mut String, site: &SiteConfig, data: &DataResult) {
    let mut links = Vec::new();
    if let Some(github_url) = &data.github_url {
        links.push(format!("<a href=\"{}\">Github</a>", escape(github_url)));
    }
    links.push(format!("<a href=\"{}\">LinkedIn</a>", escape(&site.linkedin_url)));

    out.push_str("<p class=\"find-me\">Find me on ");
    out.push_str(&links.join(", "));
    if let Some(email) = &data.email {
        let _ = write!(
            out,
            " or send me a <a href=\"mailto:{}\">mail</a>",
            escape(email)
        );
    }
    out.push_str(".</p>\n");
}

fn render_repositories(out: &mut String, data: &DataResult, filter: &TopicFilter) {
    let shown = filter.apply(&data.repositories);

    out.push_str("<section class=\"repositories\">\n<div class=\"repos-header\">\n");
    out.push_str("<h2>Interesting Github projects</h2>\n");
    if !filter.is_empty() {
        out.push_str("<a class=\"clear-filters\" href=\"/\">Clear filters</a>\n");
    }
    out.push_str("</div>\n");

    if shown.is_empty() && !data.repositories.is_empty() {
        out.push_str("<p class=\"empty\">No repositories match the selected topics.</p>\n");
    }

    out.push_str("<div class=\"grid\">\n");
    for repo in shown {
        render_repository(out, repo, filter);
    }
    out.push_str("</div>\n</section>\n");
}

fn render_repository(out: &mut String, repo: &DataRepository, filter: &TopicFilter) {
    out.push_str("<article class=\"repo\">\n<div class=\"repo-head\">\n");
    let _ = writeln!(
        out,
        "<a class=\"repo-name\" role=\"heading\" aria-level=\"3\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
        escape(&repo.url),
        escape(&repo.name)
    );
    out.push_str("<div class=\"repo-meta\">");
    if repo.stargazer_count > 0 {
        let _ = write!(
            out,
            "<span title=\"Stargazers\">{} &#9733;</span>",
            repo.stargazer_count
        );
    }
    if repo.pinned {
        out.push_str("<span title=\"Pinned\">&#128204;</span>");
    }
    out.push_str("</div>\n</div>\n");

    let _ = writeln!(
        out,
        "<span class=\"description\">{}</span>",
        escape(repo.description.as_deref().unwrap_or_default())
    );

    if let Some(homepage_url) = &repo.homepage_url {
        let label = homepage_url
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(homepage_url);
        let _ = writeln!(
            out,
            "<div class=\"homepage\">&#128279; <a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a></div>",
            escape(homepage_url),
            escape(label)
        );
    }

    if !repo.topics.is_empty() {
        out.push_str("<div class=\"topics\">\n");
        for topic in &repo.topics {
            render_topic(out, topic, filter);
        }
        out.push_str("</div>\n");
    }

    if !repo.languages.is_empty() {
        let names: Vec<String> = repo
            .languages
            .iter()
            .map(|language| format!("<b>{}</b>", escape(&language.name)))
            .collect();
        let _ = writeln!(
            out,
            "<span class=\"languages\">Language(s): {}</span>",
            names.join(", ")
        );
    }

    out.push_str("</article>\n");
}

fn render_topic(out: &mut String, topic: &DataTopic, filter: &TopicFilter) {
    let key = topic.key();
    let selected = filter.is_selected(&key);
    let _ = writeln!(
        out,
        "<a class=\"topic{}\" role=\"switch\" aria-checked=\"{}\" href=\"{}\">{}</a>",
        if selected { " selected" } else { "" },
        selected,
        escape(&filter_href(&filter.toggled(&key))),
        escape(&topic.topic.name)
    );
}

/// Link to the page with the given selection.
pub fn filter_href(filter: &TopicFilter) -> String {
    if filter.is_empty() {
        return "/".to_string();
    }
    let encoded: String = form_urlencoded::byte_serialize(filter.to_query().as_bytes()).collect();
    format!("/?topics={}", encoded)
}
