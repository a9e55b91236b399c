//! Non-API pages: the unlock page, robots.txt and the site shell fallback.

use super::error_response;
use crate::api::state::AppState;
use askama::Template;
use axum::{
    extract::Extension,
    http::{Method, StatusCode, Uri, header::CONTENT_TYPE},
    response::{Html, IntoResponse, Response},
};
use std::{io::ErrorKind, sync::Arc};
use tracing::{debug, error};

#[derive(Template)]
#[template(path = "pages/vault.html")]
struct VaultPage<'a> {
    site_name: &'a str,
}

#[derive(Template)]
#[template(path = "pages/shell.html")]
struct ShellPage<'a> {
    site_name: &'a str,
    site_url: &'a str,
    path: &'a str,
}

fn render_html(template: &impl Template) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            error!("Failed to render page: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// `GET /vault`
pub async fn vault_page(state: Extension<Arc<AppState>>) -> Response {
    render_html(&VaultPage {
        site_name: state.site().site_name(),
    })
}

#[must_use]
pub fn robots_txt(site_url: &str) -> String {
    format!(
        "User-Agent: *\nAllow: /\nDisallow: /api/\nDisallow: /preview/\n\nSitemap: {}/sitemap.xml\n",
        site_url.trim_end_matches('/')
    )
}

/// `GET /robots.txt`
pub async fn robots(state: Extension<Arc<AppState>>) -> impl IntoResponse {
    (
        [(CONTENT_TYPE, "text/plain; charset=utf-8")],
        robots_txt(state.site().site_url()),
    )
}

/// Fallback for every page path: the built single-page site, or a placeholder
/// shell until one is published. Unknown `/api/*` paths get a JSON 404.
pub async fn site(method: Method, uri: Uri, state: Extension<Arc<AppState>>) -> Response {
    if uri.path() == "/api" || uri.path().starts_with("/api/") {
        return api_not_found();
    }
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let site = state.site();
    let index = site.site_dir().join("index.html");
    match tokio::fs::read_to_string(&index).await {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            if err.kind() == ErrorKind::NotFound {
                debug!("No site build at {}, serving shell", index.display());
            } else {
                error!("Failed to read {}: {err}", index.display());
            }
            render_html(&ShellPage {
                site_name: site.site_name(),
                site_url: site.site_url(),
                path: uri.path(),
            })
        }
    }
}

fn api_not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}
