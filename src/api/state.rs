//! Read-only application state shared by every request.

use crate::email::{EmailProvider, templates};
use secrecy::{ExposeSecret, SecretString};
use std::{fmt, path::PathBuf, str::FromStr, sync::Arc};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Production,
    Development,
}

impl Environment {
    /// Production cookies carry the `Secure` attribute.
    #[must_use]
    pub const fn cookie_secure(self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Development => "development",
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "development" | "dev" => Ok(Self::Development),
            other => Err(format!("unknown environment: {other}")),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vault passphrase, kept normalized (trimmed, lowercased).
#[derive(Clone)]
pub struct VaultConfig {
    passphrase: SecretString,
    environment: Environment,
}

impl VaultConfig {
    #[must_use]
    pub fn new(passphrase: &SecretString, environment: Environment) -> Self {
        Self {
            passphrase: SecretString::from(normalize_key(passphrase.expose_secret())),
            environment,
        }
    }

    /// Compare a submitted key against the configured passphrase.
    ///
    /// Both sides are normalized the same way; an empty submission or an empty
    /// configured passphrase never matches.
    #[must_use]
    pub fn matches(&self, submitted: &str) -> bool {
        let submitted = normalize_key(submitted);
        let expected = self.passphrase.expose_secret();
        !submitted.is_empty() && !expected.is_empty() && submitted == expected
    }

    #[must_use]
    pub const fn cookie_secure(&self) -> bool {
        self.environment.cookie_secure()
    }

    #[must_use]
    pub const fn environment(&self) -> Environment {
        self.environment
    }
}

impl fmt::Debug for VaultConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaultConfig")
            .field("passphrase", &"[REDACTED]")
            .field("environment", &self.environment)
            .finish()
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

/// Addresses used by the contact and newsletter flows.
#[derive(Clone, Debug)]
pub struct MailConfig {
    pub from: String,
    pub contact_inbox: String,
    pub newsletter_inbox: String,
    pub audience_id: Option<String>,
}

#[derive(Clone, Debug)]
pub struct SiteConfig {
    site_url: String,
    site_name: String,
    site_dir: PathBuf,
    site_host: String,
}

impl SiteConfig {
    #[must_use]
    pub fn new(site_url: &str, site_name: &str, site_dir: PathBuf) -> Self {
        let site_url = site_url.trim_end_matches('/').to_string();
        Self {
            site_host: templates::site_host(&site_url),
            site_url,
            site_name: site_name.to_string(),
            site_dir,
        }
    }

    /// Public URL without a trailing slash.
    #[must_use]
    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    #[must_use]
    pub fn site_name(&self) -> &str {
        &self.site_name
    }

    #[must_use]
    pub fn site_dir(&self) -> &PathBuf {
        &self.site_dir
    }

    #[must_use]
    pub fn site_host(&self) -> &str {
        &self.site_host
    }
}

pub struct AppState {
    site: SiteConfig,
    vault: VaultConfig,
    mail: MailConfig,
    email: Arc<dyn EmailProvider>,
}

impl AppState {
    #[must_use]
    pub fn new(
        site: SiteConfig,
        vault: VaultConfig,
        mail: MailConfig,
        email: Arc<dyn EmailProvider>,
    ) -> Self {
        Self {
            site,
            vault,
            mail,
            email,
        }
    }

    #[must_use]
    pub const fn site(&self) -> &SiteConfig {
        &self.site
    }

    #[must_use]
    pub const fn vault(&self) -> &VaultConfig {
        &self.vault
    }

    #[must_use]
    pub const fn mail(&self) -> &MailConfig {
        &self.mail
    }

    #[must_use]
    pub fn email(&self) -> &dyn EmailProvider {
        self.email.as_ref()
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("site", &self.site)
            .field("vault", &self.vault)
            .field("mail", &self.mail)
            .field("email", &self.email.status())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vault(key: &str) -> VaultConfig {
        VaultConfig::new(&SecretString::from(key), Environment::Production)
    }

    #[test]
    fn vault_key_is_case_and_whitespace_insensitive() {
        let config = vault("  Mafooz ");
        assert!(config.matches("mafooz"));
        assert!(config.matches("MAFOOZ"));
        assert!(config.matches("\tmafooz\n"));
        assert!(!config.matches("mafoo"));
        assert!(!config.matches("mafooz!"));
    }

    #[test]
    fn empty_keys_never_match() {
        assert!(!vault("mafooz").matches(""));
        assert!(!vault("mafooz").matches("   "));
        assert!(!vault("   ").matches(""));
    }

    #[test]
    fn debug_redacts_passphrase() {
        let rendered = format!("{:?}", vault("mafooz"));
        assert!(!rendered.contains("mafooz"));
        assert!(rendered.contains("REDACTED"));
    }

    #[test]
    fn environment_parses_and_drives_secure_flag() {
        assert_eq!("production".parse::<Environment>(), Ok(Environment::Production));
        assert_eq!("Dev".parse::<Environment>(), Ok(Environment::Development));
        assert!("staging".parse::<Environment>().is_err());
        assert!(Environment::Production.cookie_secure());
        assert!(!Environment::Development.cookie_secure());
    }

    #[test]
    fn site_config_trims_trailing_slash() {
        let site = SiteConfig::new("https://www.example.com/", "Fighter", PathBuf::from("public"));
        assert_eq!(site.site_url(), "https://www.example.com");
        assert_eq!(site.site_host(), "example.com");
    }
}
