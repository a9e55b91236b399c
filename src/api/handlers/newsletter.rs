use super::{ApiError, INVALID_BODY, Success, error_response, non_empty, success};
use crate::{
    api::state::AppState,
    email::{
        AudienceContact, EmailError, OutboundEmail,
        templates::{SignupNotification, WelcomeEmail, signup_subject, welcome_subject},
    },
};
use askama::Template;
use axum::{
    Json,
    extract::{Extension, rejection::JsonRejection},
    http::StatusCode,
    response::Response,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};
use utoipa::ToSchema;

const MISSING_EMAIL: &str = "Email is required";
const SUBSCRIBE_FAILED: &str = "Failed to subscribe. Please try again.";

#[derive(ToSchema, Serialize, Deserialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct NewsletterRequest {
    email: Option<String>,
    first_name: Option<String>,
}

#[utoipa::path(
    post,
    path= "/api/newsletter",
    request_body = NewsletterRequest,
    responses (
        (status = 200, description = "Subscribed, team notified and welcome email sent", body = Success),
        (status = 400, description = "Missing email or invalid body", body = ApiError),
        (status = 500, description = "Email provider failure", body = ApiError),
    ),
    tag= "newsletter"
)]
#[instrument(skip_all)]
pub async fn subscribe(
    state: Extension<Arc<AppState>>,
    payload: Result<Json<NewsletterRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(err) => {
            debug!("Rejected newsletter body: {err}");
            return error_response(StatusCode::BAD_REQUEST, INVALID_BODY);
        }
    };

    let Some(email) = non_empty(request.email.as_ref()) else {
        return error_response(StatusCode::BAD_REQUEST, MISSING_EMAIL);
    };
    let first_name = non_empty(request.first_name.as_ref());

    match run_signup(&state, email, first_name).await {
        Ok(()) => {
            info!("newsletter signup completed");
            success()
        }
        Err(err) => {
            error!("Failed to complete newsletter signup: {err}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, SUBSCRIBE_FAILED)
        }
    }
}

/// Audience registration, team notification, then the welcome email.
/// Stops at the first failure; earlier steps are not undone.
async fn run_signup(
    state: &AppState,
    email: &str,
    first_name: Option<&str>,
) -> Result<(), EmailError> {
    let mail = state.mail();
    let site = state.site();
    let provider = state.email();

    if let Some(audience_id) = mail.audience_id.as_deref() {
        let contact = AudienceContact {
            audience_id: audience_id.to_string(),
            email: email.to_string(),
            first_name: first_name.map(str::to_string),
            unsubscribed: false,
        };
        provider.create_contact(&contact).await?;
        debug!("audience contact registered");
    }

    let notification = SignupNotification::new(email, first_name, Utc::now(), site.site_host());
    let notification = OutboundEmail::new(
        &mail.from,
        &mail.newsletter_inbox,
        signup_subject(first_name, email),
        notification.render()?,
    );
    provider.send_email(&notification).await?;

    let welcome = WelcomeEmail::new(first_name, site.site_url(), site.site_name());
    let welcome = OutboundEmail::new(
        &mail.from,
        email,
        welcome_subject(site.site_name()),
        welcome.render()?,
    );
    provider.send_email(&welcome).await
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{RecordingProvider, app_with, body_json, json_post};
    use anyhow::Result;
    use axum::http::StatusCode;
    use serde_json::json;
    use std::sync::Arc;
    use tower::ServiceExt;

    #[tokio::test]
    async fn signup_registers_contact_and_sends_two_emails() -> Result<()> {
        let provider = Arc::new(RecordingProvider::default());
        let app = app_with(provider.clone(), Some("aud_1"));
        let response = app
            .oneshot(json_post(
                "/api/newsletter",
                r#"{"email":"fan@example.com","firstName":"Sam"}"#,
            )?)
            .await?;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await?, json!({ "success": true }));

        let contacts = provider.contacts();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].audience_id, "aud_1");
        assert_eq!(contacts[0].email, "fan@example.com");
        assert_eq!(contacts[0].first_name.as_deref(), Some("Sam"));

        let sent = provider.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, vec!["newsletter@example.com".to_string()]);
        assert_eq!(
            sent[0].subject,
            "New Newsletter Signup — Sam (fan@example.com)"
        );
        assert_eq!(sent[1].to, vec!["fan@example.com".to_string()]);
        assert_eq!(sent[1].subject, "Welcome to the Inner Circle — Test Fighter");
        assert!(sent[1].html.contains("https://example.com/media/"));
        Ok(())
    }

    #[tokio::test]
    async fn no_audience_skips_contact_registration() -> Result<()> {
        let provider = Arc::new(RecordingProvider::default());
        let app = app_with(provider.clone(), None);
        let response = app
            .oneshot(json_post("/api/newsletter", r#"{"email":"fan@example.com"}"#)?)
            .await?;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(provider.contacts().is_empty());
        let sent = provider.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(
            sent[0].subject,
            "New Newsletter Signup — Anonymous (fan@example.com)"
        );
        Ok(())
    }

    #[tokio::test]
    async fn missing_email_skips_the_provider() -> Result<()> {
        for body in [r#"{"firstName":"Sam"}"#, r#"{"email":"   "}"#, "{}"] {
            let provider = Arc::new(RecordingProvider::default());
            let app = app_with(provider.clone(), Some("aud_1"));
            let response = app.oneshot(json_post("/api/newsletter", body)?).await?;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(
                body_json(response).await?,
                json!({ "error": "Email is required" })
            );
            assert!(provider.sent().is_empty());
            assert!(provider.contacts().is_empty());
        }
        Ok(())
    }

    #[tokio::test]
    async fn unparseable_body_is_bad_request() -> Result<()> {
        let app = app_with(Arc::new(RecordingProvider::default()), None);
        let response = app.oneshot(json_post("/api/newsletter", "[")?).await?;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await?,
            json!({ "error": "Invalid request body" })
        );
        Ok(())
    }

    #[tokio::test]
    async fn provider_failure_is_generic_500() -> Result<()> {
        let app = app_with(Arc::new(RecordingProvider::failing()), Some("aud_1"));
        let response = app
            .oneshot(json_post("/api/newsletter", r#"{"email":"fan@example.com"}"#)?)
            .await?;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await?,
            json!({ "error": "Failed to subscribe. Please try again." })
        );
        Ok(())
    }

    #[tokio::test]
    async fn failed_team_notice_keeps_audience_contact() -> Result<()> {
        let provider = Arc::new(RecordingProvider {
            fail_sends: true,
            ..RecordingProvider::default()
        });
        let app = app_with(provider.clone(), Some("aud_1"));
        let response = app
            .oneshot(json_post("/api/newsletter", r#"{"email":"fan@example.com"}"#)?)
            .await?;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await?,
            json!({ "error": "Failed to subscribe. Please try again." })
        );
        assert_eq!(provider.contacts().len(), 1);
        assert!(provider.sent().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn failed_welcome_keeps_earlier_steps() -> Result<()> {
        let provider = Arc::new(RecordingProvider::failing_send_at(1));
        let app = app_with(provider.clone(), Some("aud_1"));
        let response = app
            .oneshot(json_post(
                "/api/newsletter",
                r#"{"email":"fan@example.com","firstName":"Sam"}"#,
            )?)
            .await?;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await?,
            json!({ "error": "Failed to subscribe. Please try again." })
        );
        assert_eq!(provider.contacts().len(), 1);
        let sent = provider.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, vec!["newsletter@example.com".to_string()]);
        Ok(())
    }
}
