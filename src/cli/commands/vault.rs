use anyhow::{Result, anyhow};
use clap::{Arg, ArgMatches, Command};
use secrecy::SecretString;

pub const ARG_VAULT_KEY: &str = "vault-key";

#[derive(Debug)]
pub struct Options {
    pub key: SecretString,
}

impl Options {
    /// Parse the vault passphrase from matches.
    ///
    /// # Errors
    /// Returns an error if the passphrase is missing or blank.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let key = matches
            .get_one::<String>(ARG_VAULT_KEY)
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| anyhow!("missing required argument: --{ARG_VAULT_KEY}"))?;

        Ok(Self {
            key: SecretString::from(key.clone()),
        })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VAULT_KEY)
            .long(ARG_VAULT_KEY)
            .help("Vault passphrase (compared trimmed and case-insensitive)")
            .env("SITEGATE_VAULT_KEY")
            .hide_env_values(true)
            .required(true),
    )
}
