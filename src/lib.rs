//! # Sitegate (Vault-Gated Athlete Site)
//!
//! `sitegate` serves a single-page athlete portfolio site and keeps the whole
//! site behind a passphrase "vault". Visitors without the access cookie are
//! redirected to `/vault`; submitting the passphrase to `/api/vault` sets a
//! 30 day `vault_access=granted` cookie that the edge gate accepts from then on.
//!
//! ## Edge Gate
//!
//! Every request passes through [`api::gate`] before routing. The unlock page,
//! API routes, static assets (`/assets/`, `/media/`, `/preview/`), `favicon.ico`
//! and `robots.txt` are always reachable. Everything else requires the grant
//! cookie. Paths are only exempted when they are already in normal form, so
//! `/api/../story` is treated like `/story`.
//!
//! The gate is a preview curtain, not a security boundary. There is no rate
//! limiting or lockout on `/api/vault`, and the cookie is a plain flag.
//!
//! ## Email
//!
//! The contact and newsletter endpoints validate required fields and hand
//! rendered messages to an [`email::EmailProvider`]. Production uses the Resend
//! HTTP API; `--email-dry-run` swaps in a provider that only logs. Provider
//! failures surface as a generic `500` and are never retried.

pub mod api;
pub mod cli;
pub mod email;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with("sitegate/"));
        assert!(APP_USER_AGENT.ends_with(env!("CARGO_PKG_VERSION")));
    }
}
