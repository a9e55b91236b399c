use super::{AudienceContact, EmailError, EmailProvider, OutboundEmail};
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::time::Duration;
use tracing::{Instrument, debug, info_span};

pub const DEFAULT_RESEND_URL: &str = "https://api.resend.com";

const REQUEST_TIMEOUT_SECONDS: u64 = 10;

/// Resend HTTP API client.
///
/// A missing API key is not a startup error: every call fails with
/// [`EmailError::MissingApiKey`] so the affected request gets a `500` while the
/// rest of the site keeps serving.
#[derive(Debug, Clone)]
pub struct ResendClient {
    client: Client,
    base_url: String,
    api_key: Option<SecretString>,
}

impl ResendClient {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str, api_key: Option<SecretString>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(crate::APP_USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECONDS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|key| !key.expose_secret().trim().is_empty()),
        })
    }

    fn api_key(&self) -> Result<&SecretString, EmailError> {
        self.api_key.as_ref().ok_or(EmailError::MissingApiKey)
    }

    async fn post_json<T: Serialize + Sync>(&self, path: &str, body: &T) -> Result<(), EmailError> {
        let api_key = self.api_key()?;
        let url = format!("{}{path}", self.base_url);

        let span = info_span!("resend.request", http.method = "POST", http.url = %url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key.expose_secret())
            .json(body)
            .send()
            .instrument(span)
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmailError::Rejected { status, body });
        }

        debug!("resend accepted {path} with {status}");
        Ok(())
    }
}

#[async_trait]
impl EmailProvider for ResendClient {
    async fn send_email(&self, email: &OutboundEmail) -> Result<(), EmailError> {
        self.post_json("/emails", email).await
    }

    async fn create_contact(&self, contact: &AudienceContact) -> Result<(), EmailError> {
        let audience = contact.audience_id.trim_matches('/');
        self.post_json(&format!("/audiences/{audience}/contacts"), contact)
            .await
    }

    fn status(&self) -> &'static str {
        if self.api_key.is_some() {
            "configured"
        } else {
            "missing-api-key"
        }
    }
}
