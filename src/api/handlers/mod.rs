//! API handlers and the JSON response shapes they share.

pub mod contact;
pub mod health;
pub mod newsletter;
pub mod pages;
pub mod vault;

use axum::{Json, http::StatusCode, response::IntoResponse, response::Response};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const INVALID_BODY: &str = "Invalid request body";

/// `{"success": true}`
#[derive(ToSchema, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Success {
    success: bool,
}

/// `{"error": "..."}`
#[derive(ToSchema, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ApiError {
    error: String,
}

pub(crate) fn success() -> Response {
    (StatusCode::OK, Json(Success { success: true })).into_response()
}

pub(crate) fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ApiError {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// Trimmed value, or `None` when missing or blank.
pub(crate) fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(|value| value.trim()).filter(|value| !value.is_empty())
}
