//! Outbound email delivery.
//!
//! Handlers build an [`OutboundEmail`] (already rendered HTML) and hand it to an
//! [`EmailProvider`]. The provider decides how to deliver it and returns `Ok`/`Err`.
//! Nothing is queued or retried: a failed send fails the request that triggered it.
//!
//! - [`ResendClient`] talks to the Resend HTTP API.
//! - [`LogEmailProvider`] logs the message and succeeds, for local dev (`--email-dry-run`).

mod resend;
pub mod templates;

pub use resend::{DEFAULT_RESEND_URL, ResendClient};

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

impl OutboundEmail {
    #[must_use]
    pub fn new(from: &str, to: &str, subject: String, html: String) -> Self {
        Self {
            from: from.to_string(),
            to: vec![to.to_string()],
            subject,
            html,
        }
    }
}

/// Mailing-list entry registered on newsletter signup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AudienceContact {
    #[serde(skip)]
    pub audience_id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    pub unsubscribed: bool,
}

#[derive(Debug, Error)]
pub enum EmailError {
    #[error("email provider API key is not configured")]
    MissingApiKey,
    #[error("email provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("email provider rejected request with {status}: {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("failed to render email template: {0}")]
    Template(#[from] askama::Error),
}

/// Delivery seam used by the contact and newsletter handlers.
#[async_trait]
pub trait EmailProvider: Send + Sync {
    /// Deliver a single message.
    async fn send_email(&self, email: &OutboundEmail) -> Result<(), EmailError>;

    /// Add an address to a mailing list.
    async fn create_contact(&self, contact: &AudienceContact) -> Result<(), EmailError>;

    /// Short label reported by `/api/health`.
    fn status(&self) -> &'static str;
}

/// Local dev provider that logs instead of sending.
#[derive(Clone, Debug, Default)]
pub struct LogEmailProvider;

#[async_trait]
impl EmailProvider for LogEmailProvider {
    async fn send_email(&self, email: &OutboundEmail) -> Result<(), EmailError> {
        info!(
            from = %email.from,
            to = ?email.to,
            subject = %email.subject,
            html_bytes = email.html.len(),
            "email dry-run send"
        );
        Ok(())
    }

    async fn create_contact(&self, contact: &AudienceContact) -> Result<(), EmailError> {
        info!(
            audience_id = %contact.audience_id,
            email = %contact.email,
            "email dry-run audience contact"
        );
        Ok(())
    }

    fn status(&self) -> &'static str {
        "dry-run"
    }
}
