use super::{ApiError, INVALID_BODY, Success, error_response, non_empty, success};
use crate::{
    api::state::AppState,
    email::{
        EmailError, OutboundEmail,
        templates::{ContactNotification, contact_subject},
    },
};
use askama::Template;
use axum::{
    Json,
    extract::{Extension, rejection::JsonRejection},
    http::StatusCode,
    response::Response,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};
use utoipa::ToSchema;

const MISSING_FIELDS: &str = "Name, email, and message are required";
const SEND_FAILED: &str = "Failed to send message. Please try again.";

#[derive(ToSchema, Serialize, Deserialize, Debug, Default)]
#[serde(default)]
pub struct ContactRequest {
    name: Option<String>,
    organization: Option<String>,
    role: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    message: Option<String>,
}

#[utoipa::path(
    post,
    path= "/api/contact",
    request_body = ContactRequest,
    responses (
        (status = 200, description = "Inquiry forwarded to the team", body = Success),
        (status = 400, description = "Missing required field or invalid body", body = ApiError),
        (status = 500, description = "Email provider failure", body = ApiError),
    ),
    tag= "contact"
)]
#[instrument(skip_all)]
pub async fn contact(
    state: Extension<Arc<AppState>>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(err) => {
            debug!("Rejected contact body: {err}");
            return error_response(StatusCode::BAD_REQUEST, INVALID_BODY);
        }
    };

    let (Some(name), Some(email), Some(message)) = (
        non_empty(request.name.as_ref()),
        non_empty(request.email.as_ref()),
        non_empty(request.message.as_ref()),
    ) else {
        return error_response(StatusCode::BAD_REQUEST, MISSING_FIELDS);
    };

    let role = non_empty(request.role.as_ref());
    let notification = ContactNotification::new(
        name,
        email,
        message,
        non_empty(request.organization.as_ref()),
        role,
        non_empty(request.phone.as_ref()),
        state.site().site_host(),
    );

    match deliver(&state, &notification, contact_subject(role, name)).await {
        Ok(()) => {
            info!("contact inquiry forwarded");
            success()
        }
        Err(err) => {
            error!("Failed to send contact inquiry: {err}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, SEND_FAILED)
        }
    }
}

async fn deliver(
    state: &AppState,
    notification: &ContactNotification<'_>,
    subject: String,
) -> Result<(), EmailError> {
    let mail = state.mail();
    let email = OutboundEmail::new(
        &mail.from,
        &mail.contact_inbox,
        subject,
        notification.render()?,
    );
    state.email().send_email(&email).await
}
