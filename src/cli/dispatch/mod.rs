//! Maps parsed CLI arguments to the action the binary runs.

use crate::cli::actions::{Action, server::Args};
use crate::cli::commands::{ARG_PORT, email, site, vault};
use anyhow::Result;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or invalid.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080);

    let site_opts = site::Options::parse(matches)?;
    let vault_opts = vault::Options::parse(matches)?;
    let email_opts = email::Options::parse(matches)?;

    Ok(Action::Server(Args {
        port,
        site_dir: site_opts.dir,
        site_url: site_opts.url,
        site_name: site_opts.name,
        environment: site_opts.environment,
        vault_key: vault_opts.key,
        resend_api_key: email_opts.api_key,
        resend_audience_id: email_opts.audience_id,
        resend_url: email_opts.api_url,
        from_email: email_opts.from,
        contact_inbox: email_opts.contact_inbox,
        newsletter_inbox: email_opts.newsletter_inbox,
        email_dry_run: email_opts.dry_run,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::state::Environment;
    use secrecy::ExposeSecret;

    const ENV: [(&str, Option<&str>); 9] = [
        ("SITEGATE_SITE_URL", Some("https://danielrajstoican.com")),
        ("SITEGATE_VAULT_KEY", Some("Mafooz")),
        ("SITEGATE_FROM_EMAIL", Some("Site <news@example.com>")),
        ("SITEGATE_CONTACT_INBOX", Some("contact@example.com")),
        ("SITEGATE_NEWSLETTER_INBOX", Some("newsletter@example.com")),
        ("SITEGATE_ENV", Some("development")),
        ("SITEGATE_RESEND_API_KEY", Some("  ")),
        ("SITEGATE_RESEND_AUDIENCE_ID", None),
        ("SITEGATE_EMAIL_DRY_RUN", None),
    ];

    #[test]
    fn builds_server_args_from_env() {
        temp_env::with_vars(ENV, || {
            let matches = crate::cli::commands::new().get_matches_from(vec!["sitegate"]);
            let result = handler(&matches);
            assert!(result.is_ok(), "{result:?}");
            if let Ok(Action::Server(args)) = result {
                assert_eq!(args.site_url, "https://danielrajstoican.com");
                assert_eq!(args.environment, Environment::Development);
                assert_eq!(args.vault_key.expose_secret(), "Mafooz");
                assert!(args.resend_api_key.is_none());
                assert!(args.resend_audience_id.is_none());
                assert!(!args.email_dry_run);
            }
        });
    }

    #[test]
    fn blank_site_url_is_rejected() {
        let mut env = ENV;
        env[0] = ("SITEGATE_SITE_URL", Some("   "));
        temp_env::with_vars(env, || {
            let matches = crate::cli::commands::new().get_matches_from(vec!["sitegate"]);
            let result = handler(&matches);
            assert!(result.is_err());
            if let Err(err) = result {
                assert!(
                    err.to_string()
                        .contains("missing required argument: --site-url")
                );
            }
        });
    }

    #[test]
    fn non_http_site_url_is_rejected() {
        let mut env = ENV;
        env[0] = ("SITEGATE_SITE_URL", Some("ftp://example.com"));
        temp_env::with_vars(env, || {
            let matches = crate::cli::commands::new().get_matches_from(vec!["sitegate"]);
            assert!(handler(&matches).is_err());
        });
    }
}
