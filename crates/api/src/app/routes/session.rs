use std::sync::Arc;

use axum::{Extension, Json, response::Response};

use crate::app::dto::{LoginRequest, TokenResponse};
use crate::app::{errors, services::AppServices};

/// POST /token - exchange username/password for a bearer token
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, Response> {
    let token = services
        .authenticator
        .authenticate(&body.username, &body.password)
        .map_err(errors::unauthorized)?;

    Ok(Json(TokenResponse::bearer(token.into_string())))
}
