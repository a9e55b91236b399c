use crate::{
    api::{
        self,
        state::{AppState, Environment, MailConfig, SiteConfig, VaultConfig},
    },
    cli::telemetry,
    email::{EmailProvider, LogEmailProvider, ResendClient},
};
use anyhow::{Context, Result};
use secrecy::SecretString;
use std::{path::PathBuf, sync::Arc};
use tracing::{info, warn};

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub site_dir: PathBuf,
    pub site_url: String,
    pub site_name: String,
    pub environment: Environment,
    pub vault_key: SecretString,
    pub resend_api_key: Option<SecretString>,
    pub resend_audience_id: Option<String>,
    pub resend_url: String,
    pub from_email: String,
    pub contact_inbox: String,
    pub newsletter_inbox: String,
    pub email_dry_run: bool,
}

/// Build the shared state for the server.
///
/// # Errors
/// Returns an error if the email client cannot be built.
pub fn build_state(args: Args) -> Result<AppState> {
    let email: Arc<dyn EmailProvider> = if args.email_dry_run {
        warn!("Email dry-run enabled: messages are logged, not sent");
        Arc::new(LogEmailProvider)
    } else {
        let client = ResendClient::new(&args.resend_url, args.resend_api_key)
            .context("Failed to build Resend client")?;
        if client.status() != "configured" {
            warn!("No Resend API key configured: contact and newsletter requests will fail");
        }
        Arc::new(client)
    };

    if !args.site_dir.join("index.html").is_file() {
        warn!(
            "No index.html in {}, pages fall back to the placeholder shell",
            args.site_dir.display()
        );
    }

    Ok(AppState::new(
        SiteConfig::new(&args.site_url, &args.site_name, args.site_dir),
        VaultConfig::new(&args.vault_key, args.environment),
        MailConfig {
            from: args.from_email,
            contact_inbox: args.contact_inbox,
            newsletter_inbox: args.newsletter_inbox,
            audience_id: args.resend_audience_id,
        },
        email,
    ))
}

/// Execute the server action.
/// # Errors
/// Returns an error if the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    let port = args.port;
    let state = build_state(args)?;

    info!(
        site_url = state.site().site_url(),
        site_dir = %state.site().site_dir().display(),
        environment = %state.vault().environment(),
        email = state.email().status(),
        "Starting {} {} ({})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        crate::GIT_COMMIT_HASH
    );

    let result = api::new(port, Arc::new(state)).await;

    telemetry::shutdown_tracer();

    result
}
