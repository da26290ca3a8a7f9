//! HTTP server rendering pages straight from the content store
//!
//! Nothing is cached: every request reads the content directory again,
//! so edits show up on the next page load.

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::content::Lookup;
use crate::templates::{self, SitePages};
use crate::Blog;

/// Server state
pub struct ServerState {
    blog: Blog,
    pages: SitePages,
}

impl ServerState {
    pub fn new(blog: &Blog) -> Result<Self> {
        Ok(Self {
            blog: blog.clone(),
            pages: SitePages::new(&blog.config)?,
        })
    }
}

/// Build the router for a blog
///
/// Every route carries the configured `root` prefix. The home page answers
/// both with and without the trailing slash.
pub fn router(blog: &Blog) -> Result<Router> {
    let state = Arc::new(ServerState::new(blog)?);

    let root = blog.config.root.trim_end_matches('/');
    let blog_dir = blog.config.blog_dir.trim_matches('/');
    let post_route = if blog_dir.is_empty() {
        format!("{}/:slug", root)
    } else {
        format!("{}/{}/:slug", root, blog_dir)
    };

    let mut app = Router::new()
        .route(&format!("{}/", root), get(index_handler))
        .route(&post_route, get(post_handler))
        .route(&format!("{}/", post_route), get(post_handler))
        .route(&format!("{}/assets/:name", root), get(asset_handler));

    if !root.is_empty() {
        app = app.route(root, get(index_handler));
    }

    Ok(app
        .fallback(not_found_handler)
        .with_state(state)
        .layer(TraceLayer::new_for_http()))
}

/// Start the server
pub async fn start(blog: &Blog, ip: &str, port: u16, open: bool) -> Result<()> {
    let app = router(blog)?;

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}{}", ip, port, crate::helpers::url_for(&blog.config, "/"));
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Home page listing every post
pub async fn index_handler(State(state): State<Arc<ServerState>>) -> Response {
    let store = state.blog.store();

    match tokio::task::spawn_blocking(move || store.list_all()).await {
        Ok(Ok(posts)) => html_response(StatusCode::OK, state.pages.render_index(&posts)),
        Ok(Err(e)) => {
            tracing::error!("{}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Content store unavailable").into_response()
        }
        Err(e) => {
            tracing::error!("Listing task failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Detail page for one post; unknown slugs get the not-found page
pub async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Response {
    let store = state.blog.store();

    match tokio::task::spawn_blocking(move || store.get(&slug)).await {
        Ok(Lookup::Found(post)) => html_response(StatusCode::OK, state.pages.render_post(&post)),
        Ok(Lookup::NotFound) => not_found(&state),
        Err(e) => {
            tracing::error!("Lookup task failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Embedded stylesheet and script
pub async fn asset_handler(Path(name): Path<String>) -> Response {
    match templates::asset(&name) {
        Some(asset) => ([(header::CONTENT_TYPE, asset.content_type)], asset.body).into_response(),
        None => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

pub async fn not_found_handler(State(state): State<Arc<ServerState>>) -> Response {
    not_found(&state)
}

fn not_found(state: &ServerState) -> Response {
    html_response(StatusCode::NOT_FOUND, state.pages.render_not_found())
}

fn html_response(status: StatusCode, rendered: Result<String>) -> Response {
    match rendered {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Template error: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
        }
    }
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
