use super::{ApiError, Success, error_response, success};
use crate::api::{gate, state::AppState};
use axum::{
    Json,
    extract::{Extension, rejection::JsonRejection},
    http::{StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument};
use utoipa::ToSchema;

const INVALID_KEY: &str = "Invalid conviction key";

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct UnlockRequest {
    key: Option<String>,
}

#[utoipa::path(
    post,
    path= "/api/vault",
    request_body = UnlockRequest,
    responses (
        (status = 200, description = "Passphrase accepted, access cookie set", body = Success),
        (status = 401, description = "Wrong, missing or unparseable passphrase", body = ApiError),
    ),
    tag= "vault"
)]
#[instrument(skip_all)]
pub async fn unlock(
    state: Extension<Arc<AppState>>,
    payload: Result<Json<UnlockRequest>, JsonRejection>,
) -> Response {
    // A malformed body is reported the same way as a wrong key.
    let key = payload.ok().and_then(|Json(request)| request.key);

    let accepted = key
        .as_deref()
        .is_some_and(|key| state.vault().matches(key));
    if !accepted {
        info!("vault unlock rejected");
        return error_response(StatusCode::UNAUTHORIZED, INVALID_KEY);
    }

    match gate::access_grant_cookie(state.vault().cookie_secure()) {
        Ok(cookie) => {
            info!("vault unlocked");
            let mut response = success();
            response.headers_mut().insert(SET_COOKIE, cookie);
            response
        }
        Err(err) => {
            error!("Failed to build access cookie: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
