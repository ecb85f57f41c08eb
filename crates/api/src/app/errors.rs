use axum::http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use gatekeeper_auth::{AuthError, Denial};

/// 401 for failed logins and unresolvable tokens.
pub fn unauthorized(err: AuthError) -> Response {
    let mut response = json_error(StatusCode::UNAUTHORIZED, "unauthorized", err.to_string());
    response
        .headers_mut()
        .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
    response
}

/// 403 carrying the unmet requirement.
pub fn forbidden(denial: Denial) -> Response {
    (
        StatusCode::FORBIDDEN,
        axum::Json(json!({
            "error": "forbidden",
            "message": denial.to_string(),
            "denial": denial,
        })),
    )
        .into_response()
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
