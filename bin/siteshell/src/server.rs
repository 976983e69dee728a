//! HTTP server wrapping page fragments in the site shell.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use axum::{
    Router,
    extract::State,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use axum_extra::extract::cookie::CookieJar;
use siteshell_core::Config;
use siteshell_render::{PageContent, SiteShell};
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

/// Cookie carrying the content ref of an active preview session.
pub const PREVIEW_COOKIE: &str = "io.prismic.preview";

/// Server state shared by all requests.
#[derive(Debug)]
pub struct ServerState {
    /// Shell over the process-wide content repository.
    pub shell: SiteShell,
    /// Directory holding page fragments.
    pub pages_dir: PathBuf,
}

impl ServerState {
    /// Create server state.
    pub fn new(shell: SiteShell, pages_dir: impl Into<PathBuf>) -> Self {
        Self {
            shell,
            pages_dir: pages_dir.into(),
        }
    }
}

/// Create the site router.
///
/// Pages are served from the fragments directory; `/assets` and the social
/// image come straight from the public directory.
pub fn create_router(config: &Config, state: Arc<ServerState>) -> Router {
    let public_dir = Path::new(&config.server.public_dir);
    let mut router = Router::new()
        .route("/", get(page_handler))
        .route("/{*path}", get(page_handler))
        .nest_service("/assets", ServeDir::new(public_dir.join("assets")));

    let og_image = config.site.og_image.as_str();
    if og_image.starts_with('/') && og_image.len() > 1 && !og_image.starts_with("/assets/") {
        router = router.route_service(
            og_image,
            ServeFile::new(public_dir.join(og_image.trim_start_matches('/'))),
        );
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Render the requested page inside the shell.
async fn page_handler(
    State(state): State<Arc<ServerState>>,
    uri: Uri,
    cookies: CookieJar,
) -> Response {
    let Some(candidates) = page_candidates(&state.pages_dir, uri.path()) else {
        return (StatusCode::NOT_FOUND, "Page not found.").into_response();
    };

    let mut body = None;
    for candidate in &candidates {
        if let Ok(content) = tokio::fs::read_to_string(candidate).await {
            tracing::debug!(path = %candidate.display(), "serving page fragment");
            body = Some(content);
            break;
        }
    }
    let Some(body) = body else {
        return (StatusCode::NOT_FOUND, "Page not found.").into_response();
    };

    let preview = cookies
        .get(PREVIEW_COOKIE)
        .and_then(|cookie| state.shell.at_preview_ref(cookie.value().trim_matches('"')));
    let shell = match preview {
        Some(shell) => {
            tracing::debug!("rendering with preview ref");
            shell
        }
        None => state.shell.clone(),
    };

    match shell.render_page(&PageContent::new(body)).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(path = uri.path(), "page render failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

/// Fragment files that may hold the page for a request path, in lookup order.
///
/// Segments are percent-decoded first. Returns `None` for paths that try to
/// leave the pages directory or name hidden files.
fn page_candidates(pages_dir: &Path, request_path: &str) -> Option<Vec<PathBuf>> {
    let trimmed = request_path.trim_matches('/');
    if trimmed.is_empty() {
        return Some(vec![pages_dir.join("index.html")]);
    }

    let mut segments = Vec::new();
    for raw in trimmed.split('/') {
        let segment = urlencoding::decode(raw).ok()?;
        if segment.is_empty()
            || segment.starts_with('.')
            || segment.contains(['/', '\\', '\0'])
        {
            return None;
        }
        segments.push(segment.into_owned());
    }

    let (page, parents) = segments.split_last()?;
    let mut dir = pages_dir.to_path_buf();
    dir.extend(parents);

    Some(vec![
        dir.join(format!("{page}.html")),
        dir.join(page).join("index.html"),
    ])
}
