use axum::{Extension, Json, http::StatusCode, response::IntoResponse};

use crate::app::dto::MessageResponse;
use crate::context::PrincipalContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new("Welcome to the gatekeeper RBAC API"))
}

pub async fn whoami(Extension(principal): Extension<PrincipalContext>) -> impl IntoResponse {
    Json(serde_json::json!({
        "principal_id": principal.principal_id(),
        "role": principal.role(),
    }))
}
