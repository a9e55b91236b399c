//! Edge gate: every request without the access grant is sent to `/vault`.
//!
//! The decision itself is [`decide`], a pure function of the request path and
//! headers; [`enforce`] is the axum middleware wrapping it. Paths are compared
//! in normal form only, so traversal variants of an open prefix
//! (`/api/../story`, `/media/%2e%2e/story`, `/assets\..\story`) are gated like
//! any other page.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue, header::COOKIE, header::InvalidHeaderValue},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;
use url::Url;

pub const ACCESS_COOKIE_NAME: &str = "vault_access";
pub const ACCESS_COOKIE_VALUE: &str = "granted";
pub const ACCESS_COOKIE_MAX_AGE_SECONDS: u64 = 60 * 60 * 24 * 30;
pub const UNLOCK_PATH: &str = "/vault";

const OPEN_PATHS: &[&str] = &[UNLOCK_PATH, "/favicon.ico", "/robots.txt"];
const OPEN_PREFIXES: &[&str] = &["/api/", "/assets/", "/media/", "/preview/"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Forward,
    Redirect,
}

/// Decide whether a request may reach the router.
#[must_use]
pub fn decide(path: &str, headers: &HeaderMap) -> Decision {
    if is_open_path(path) || has_access_grant(headers) {
        Decision::Forward
    } else {
        Decision::Redirect
    }
}

/// True when `path` is already in normal form and on the allowlist.
#[must_use]
pub fn is_open_path(path: &str) -> bool {
    if normalize(path).as_deref() != Some(path) {
        return false;
    }
    OPEN_PATHS.contains(&path) || OPEN_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

/// Resolve dot segments (including percent-encoded ones) and backslashes the
/// way a browser or proxy would.
fn normalize(path: &str) -> Option<String> {
    if !path.starts_with('/') || path.starts_with("//") {
        return None;
    }
    let base = Url::parse("http://gate.invalid/").ok()?;
    let joined = base.join(path).ok()?;
    if joined.host_str() != Some("gate.invalid") {
        return None;
    }
    Some(joined.path().to_string())
}

/// True when any `vault_access` cookie carries exactly `granted`.
#[must_use]
pub fn has_access_grant(headers: &HeaderMap) -> bool {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .any(|(name, value)| name.trim() == ACCESS_COOKIE_NAME && value.trim() == ACCESS_COOKIE_VALUE)
}

/// `Set-Cookie` value for the access grant.
///
/// # Errors
/// Returns an error if the header value cannot be built.
pub fn access_grant_cookie(secure: bool) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie = format!(
        "{ACCESS_COOKIE_NAME}={ACCESS_COOKIE_VALUE}; Path=/; Max-Age={ACCESS_COOKIE_MAX_AGE_SECONDS}; HttpOnly; SameSite=Lax"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

/// axum middleware applying [`decide`] to every request.
pub async fn enforce(request: Request, next: Next) -> Response {
    match decide(request.uri().path(), request.headers()) {
        Decision::Forward => next.run(request).await,
        Decision::Redirect => {
            debug!(path = %request.uri().path(), "no vault grant, redirecting");
            Redirect::temporary(UNLOCK_PATH).into_response()
        }
    }
}
