use crate::cache::RevalidatingCache;
use crate::error::Result;
use crate::filter::TopicFilter;
use crate::render::{render_error, render_not_found, render_page};
use crate::security::security_headers_middleware;
use crate::site::SiteConfig;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    middleware,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Body of the `/api/data` error response
pub const DATA_UNAVAILABLE: &str = "Failed to load portfolio data";

/// Shared state of the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<RevalidatingCache>,
    pub site: Arc<SiteConfig>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(cache: RevalidatingCache, site: SiteConfig) -> Self {
        Self {
            cache: Arc::new(cache),
            site: Arc::new(site),
            start_time: Instant::now(),
        }
    }
}

/// Query parameters of the index page
#[derive(Debug, Deserialize)]
pub struct IndexParams {
    pub topics: Option<String>,
}

/// Liveness probe response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivenessResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/data", get(data_json))
        .route("/sitemap.xml", get(sitemap))
        .route("/robots.txt", get(robots))
        .route("/manifest.json", get(manifest))
        .route("/healthz", get(liveness_check))
        .route("/livez", get(liveness_check))
        .fallback(not_found)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server and run until the process is stopped
pub async fn start_server(state: AppState, addr: SocketAddr) -> Result<()> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Portfolio server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

fn cache_control(state: &AppState) -> String {
    format!(
        "public, s-maxage={}, stale-while-revalidate",
        state.cache.ttl().as_secs()
    )
}

async fn index(State(state): State<AppState>, Query(params): Query<IndexParams>) -> Response {
    match state.cache.get().await {
        Ok(data) => {
            let filter = TopicFilter::from_query(params.topics.as_deref());
            (
                [(header::CACHE_CONTROL, cache_control(&state))],
                Html(render_page(&state.site, &data, &filter)),
            )
                .into_response()
        }
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CACHE_CONTROL, "no-store".to_string())],
            Html(render_error(&state.site)),
        )
            .into_response(),
    }
}

async fn data_json(State(state): State<AppState>) -> Response {
    match state.cache.get().await {
        Ok(data) => (
            [(header::CACHE_CONTROL, cache_control(&state))],
            Json(data.as_ref().clone()),
        )
            .into_response(),
        // Details are in the error report; upstream bodies stay server-side.
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CACHE_CONTROL, "no-store".to_string())],
            Json(json!({ "error": DATA_UNAVAILABLE })),
        )
            .into_response(),
    }
}

async fn sitemap(State(state): State<AppState>) -> impl IntoResponse {
    let body = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n\
         <url>\n<loc>{}</loc>\n<lastmod>{}</lastmod>\n<changefreq>daily</changefreq>\n<priority>1</priority>\n</url>\n\
         </urlset>\n",
        crate::render::escape(&state.site.url),
        Utc::now().format("%Y-%m-%d"),
    );
    ([(header::CONTENT_TYPE, "application/xml")], body)
}

async fn robots(State(state): State<AppState>) -> impl IntoResponse {
    let body = format!(
        "User-agent: *\nAllow: /\n\nSitemap: {}sitemap.xml\n",
        state.site.url
    );
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body)
}

async fn manifest(State(state): State<AppState>) -> impl IntoResponse {
    let site = &state.site;
    (
        [(header::CONTENT_TYPE, "application/manifest+json")],
        Json(json!({
            "name": site.title,
            "short_name": site.title,
            "description": site.description,
            "start_url": "/",
            "display": "standalone",
            "theme_color": site.theme_color,
            "background_color": site.theme_color,
            "icons": [
                {
                    "src": site.avatar_sized(512),
                    "sizes": "512x512",
                    "type": "image/png",
                },
            ],
        })),
    )
}

async fn liveness_check(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(LivenessResponse {
            status: "alive".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: state.start_time.elapsed().as_secs(),
        }),
    )
}

async fn not_found(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Html(render_not_found(&state.site)))
}
