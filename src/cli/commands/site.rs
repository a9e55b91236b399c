use crate::api::state::Environment;
use anyhow::{Context, Result, anyhow};
use clap::{Arg, ArgMatches, Command, builder::PossibleValuesParser};
use std::path::PathBuf;
use url::Url;

pub const ARG_SITE_DIR: &str = "site-dir";
pub const ARG_SITE_URL: &str = "site-url";
pub const ARG_SITE_NAME: &str = "site-name";
pub const ARG_ENVIRONMENT: &str = "environment";

pub const DEFAULT_SITE_NAME: &str = "Daniel-raj Stoican";

#[derive(Debug)]
pub struct Options {
    pub dir: PathBuf,
    pub url: String,
    pub name: String,
    pub environment: Environment,
}

impl Options {
    /// Parse site arguments from matches.
    ///
    /// # Errors
    /// Returns an error if the site URL is missing or not an absolute http(s) URL.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let url = matches
            .get_one::<String>(ARG_SITE_URL)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| anyhow!("missing required argument: --{ARG_SITE_URL}"))?;
        let parsed = Url::parse(&url).with_context(|| format!("invalid --{ARG_SITE_URL}: {url}"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            anyhow::bail!("--{ARG_SITE_URL} must be an http(s) URL: {url}");
        }

        let environment = matches
            .get_one::<String>(ARG_ENVIRONMENT)
            .map_or(Ok(Environment::default()), |value| value.parse())
            .map_err(|err: String| anyhow!(err))?;

        Ok(Self {
            dir: matches
                .get_one::<String>(ARG_SITE_DIR)
                .map_or_else(|| PathBuf::from("public"), PathBuf::from),
            url,
            name: matches
                .get_one::<String>(ARG_SITE_NAME)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .unwrap_or(DEFAULT_SITE_NAME)
                .to_string(),
            environment,
        })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_SITE_DIR)
                .long(ARG_SITE_DIR)
                .help("Directory holding the built site (index.html, assets/, media/, preview/)")
                .env("SITEGATE_SITE_DIR")
                .default_value("public"),
        )
        .arg(
            Arg::new(ARG_SITE_URL)
                .long(ARG_SITE_URL)
                .help("Public site URL, used for email links, robots.txt and CORS, example: https://danielrajstoican.com")
                .env("SITEGATE_SITE_URL")
                .required(true),
        )
        .arg(
            Arg::new(ARG_SITE_NAME)
                .long(ARG_SITE_NAME)
                .help("Display name used in page titles and email subjects")
                .env("SITEGATE_SITE_NAME")
                .default_value(DEFAULT_SITE_NAME),
        )
        .arg(
            Arg::new(ARG_ENVIRONMENT)
                .long(ARG_ENVIRONMENT)
                .help("Deployment environment; production marks the vault cookie Secure")
                .env("SITEGATE_ENV")
                .default_value("production")
                .value_parser(PossibleValuesParser::new(["production", "development"])),
        )
}
