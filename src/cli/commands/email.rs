use crate::email::DEFAULT_RESEND_URL;
use anyhow::{Result, anyhow};
use clap::{Arg, ArgAction, ArgMatches, Command};
use secrecy::SecretString;

pub const ARG_RESEND_API_KEY: &str = "resend-api-key";
pub const ARG_RESEND_AUDIENCE_ID: &str = "resend-audience-id";
pub const ARG_RESEND_URL: &str = "resend-url";
pub const ARG_FROM_EMAIL: &str = "from-email";
pub const ARG_CONTACT_INBOX: &str = "contact-inbox";
pub const ARG_NEWSLETTER_INBOX: &str = "newsletter-inbox";
pub const ARG_EMAIL_DRY_RUN: &str = "email-dry-run";

#[derive(Debug)]
pub struct Options {
    pub api_key: Option<SecretString>,
    pub audience_id: Option<String>,
    pub api_url: String,
    pub from: String,
    pub contact_inbox: String,
    pub newsletter_inbox: String,
    pub dry_run: bool,
}

impl Options {
    /// Parse email provider arguments from matches.
    ///
    /// # Errors
    /// Returns an error if a sender or inbox address is missing.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let get_non_empty = |id: &str| {
            matches
                .get_one::<String>(id)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let required = |id: &str| {
            get_non_empty(id).ok_or_else(|| anyhow!("missing required argument: --{id}"))
        };

        Ok(Self {
            api_key: get_non_empty(ARG_RESEND_API_KEY).map(SecretString::from),
            audience_id: get_non_empty(ARG_RESEND_AUDIENCE_ID),
            api_url: get_non_empty(ARG_RESEND_URL).unwrap_or_else(|| DEFAULT_RESEND_URL.to_string()),
            from: required(ARG_FROM_EMAIL)?,
            contact_inbox: required(ARG_CONTACT_INBOX)?,
            newsletter_inbox: required(ARG_NEWSLETTER_INBOX)?,
            dry_run: matches.get_flag(ARG_EMAIL_DRY_RUN),
        })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_RESEND_API_KEY)
                .long(ARG_RESEND_API_KEY)
                .help("Resend API key; without it contact and newsletter requests fail with 500")
                .env("SITEGATE_RESEND_API_KEY")
                .hide_env_values(true),
        )
        .arg(
            Arg::new(ARG_RESEND_AUDIENCE_ID)
                .long(ARG_RESEND_AUDIENCE_ID)
                .help("Resend audience that newsletter signups are added to")
                .env("SITEGATE_RESEND_AUDIENCE_ID"),
        )
        .arg(
            Arg::new(ARG_RESEND_URL)
                .long(ARG_RESEND_URL)
                .help("Resend API base URL")
                .env("SITEGATE_RESEND_URL")
                .default_value(DEFAULT_RESEND_URL),
        )
        .arg(
            Arg::new(ARG_FROM_EMAIL)
                .long(ARG_FROM_EMAIL)
                .help("Sender address, example: \"Daniel-raj Stoican <newsletter@danielrajstoican.com>\"")
                .env("SITEGATE_FROM_EMAIL")
                .required(true),
        )
        .arg(
            Arg::new(ARG_CONTACT_INBOX)
                .long(ARG_CONTACT_INBOX)
                .help("Inbox receiving contact form inquiries")
                .env("SITEGATE_CONTACT_INBOX")
                .required(true),
        )
        .arg(
            Arg::new(ARG_NEWSLETTER_INBOX)
                .long(ARG_NEWSLETTER_INBOX)
                .help("Inbox notified about newsletter signups")
                .env("SITEGATE_NEWSLETTER_INBOX")
                .required(true),
        )
        .arg(
            Arg::new(ARG_EMAIL_DRY_RUN)
                .long(ARG_EMAIL_DRY_RUN)
                .help("Log outgoing email instead of calling Resend")
                .env("SITEGATE_EMAIL_DRY_RUN")
                .action(ArgAction::SetTrue),
        )
}
