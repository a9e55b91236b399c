pub mod email;
pub mod logging;
pub mod site;
pub mod vault;

use clap::{
    Arg, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

pub const ARG_PORT: &str = "port";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("sitegate")
        .about("Vault-gated athlete site server")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new(ARG_PORT)
                .short('p')
                .long(ARG_PORT)
                .help("Port to listen on")
                .default_value("8080")
                .env("SITEGATE_PORT")
                .value_parser(clap::value_parser!(u16)),
        );

    let command = site::with_args(command);
    let command = vault::with_args(command);
    let command = email::with_args(command);
    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::{
        email::{ARG_EMAIL_DRY_RUN, ARG_RESEND_API_KEY, ARG_RESEND_AUDIENCE_ID, ARG_RESEND_URL},
        logging::ARG_VERBOSITY,
        site::{ARG_ENVIRONMENT, ARG_SITE_DIR, ARG_SITE_NAME, DEFAULT_SITE_NAME},
        vault::ARG_VAULT_KEY,
    };

    const REQUIRED_ARGS: [&str; 11] = [
        "sitegate",
        "--site-url",
        "https://example.com",
        "--vault-key",
        "mafooz",
        "--from-email",
        "Site <news@example.com>",
        "--contact-inbox",
        "contact@example.com",
        "--newsletter-inbox",
        "newsletter@example.com",
    ];

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "sitegate");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some("Vault-gated athlete site server".to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    const OPTIONAL_ENV: [&str; 8] = [
        "SITEGATE_PORT",
        "SITEGATE_SITE_DIR",
        "SITEGATE_SITE_NAME",
        "SITEGATE_ENV",
        "SITEGATE_RESEND_API_KEY",
        "SITEGATE_RESEND_URL",
        "SITEGATE_EMAIL_DRY_RUN",
        "SITEGATE_LOG_LEVEL",
    ];

    #[test]
    fn test_defaults() {
        temp_env::with_vars_unset(OPTIONAL_ENV, || {
            let matches = new().get_matches_from(REQUIRED_ARGS);

            assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(8080));
            assert_eq!(
                matches.get_one::<String>(ARG_SITE_DIR).cloned(),
                Some("public".to_string())
            );
            assert_eq!(
                matches.get_one::<String>(ARG_SITE_NAME).cloned(),
                Some(DEFAULT_SITE_NAME.to_string())
            );
            assert_eq!(
                matches.get_one::<String>(ARG_ENVIRONMENT).cloned(),
                Some("production".to_string())
            );
            assert_eq!(
                matches.get_one::<String>(ARG_RESEND_URL).cloned(),
                Some("https://api.resend.com".to_string())
            );
            assert!(!matches.get_flag(ARG_EMAIL_DRY_RUN));
            assert_eq!(matches.get_one::<String>(ARG_RESEND_API_KEY), None);
        });
    }

    #[test]
    fn test_missing_vault_key_is_rejected() {
        temp_env::with_vars([("SITEGATE_VAULT_KEY", None::<&str>)], || {
            let args: Vec<&str> = REQUIRED_ARGS
                .iter()
                .copied()
                .filter(|arg| *arg != "--vault-key" && *arg != "mafooz")
                .collect();
            let result = new().try_get_matches_from(args);
            assert!(result.is_err());
        });
    }

    #[test]
    fn test_invalid_environment_is_rejected() {
        temp_env::with_vars_unset(OPTIONAL_ENV, || {
            let mut args = REQUIRED_ARGS.to_vec();
            args.extend(["--environment", "staging"]);
            assert!(new().try_get_matches_from(args).is_err());
        });
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("SITEGATE_PORT", Some("443")),
                ("SITEGATE_SITE_DIR", Some("/srv/site")),
                ("SITEGATE_SITE_URL", Some("https://danielrajstoican.com")),
                ("SITEGATE_ENV", Some("development")),
                ("SITEGATE_VAULT_KEY", Some("mafooz")),
                ("SITEGATE_RESEND_API_KEY", Some("re_123")),
                ("SITEGATE_RESEND_AUDIENCE_ID", Some("aud_1")),
                ("SITEGATE_FROM_EMAIL", Some("Site <news@example.com>")),
                ("SITEGATE_CONTACT_INBOX", Some("contact@example.com")),
                ("SITEGATE_NEWSLETTER_INBOX", Some("newsletter@example.com")),
                ("SITEGATE_EMAIL_DRY_RUN", Some("true")),
                ("SITEGATE_LOG_LEVEL", Some("info")),
            ],
            || {
                let matches = new().get_matches_from(vec!["sitegate"]);
                assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(443));
                assert_eq!(
                    matches.get_one::<String>(ARG_SITE_DIR).cloned(),
                    Some("/srv/site".to_string())
                );
                assert_eq!(
                    matches.get_one::<String>(ARG_ENVIRONMENT).cloned(),
                    Some("development".to_string())
                );
                assert_eq!(
                    matches.get_one::<String>(ARG_VAULT_KEY).cloned(),
                    Some("mafooz".to_string())
                );
                assert_eq!(
                    matches.get_one::<String>(ARG_RESEND_AUDIENCE_ID).cloned(),
                    Some("aud_1".to_string())
                );
                assert!(matches.get_flag(ARG_EMAIL_DRY_RUN));
                assert_eq!(matches.get_one::<u8>(ARG_VERBOSITY).copied(), Some(2));
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars([("SITEGATE_LOG_LEVEL", Some(level))], || {
                let matches = new().get_matches_from(REQUIRED_ARGS);
                assert_eq!(
                    matches.get_one::<u8>(ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }
}
