//! Handlers behind declared access requirements (see `routes::router`).
//!
//! By the time these run the guard has already allowed the request, so they
//! only produce the operation's result.

use axum::{Extension, Json, extract::Path};

use crate::app::dto::MessageResponse;
use crate::context::PrincipalContext;

pub async fn admin_dashboard(Extension(ctx): Extension<PrincipalContext>) -> Json<MessageResponse> {
    Json(MessageResponse::new(format!(
        "Hello, Admin {}! Welcome to the admin dashboard.",
        ctx.principal_id()
    )))
}

pub async fn user_profile(Extension(ctx): Extension<PrincipalContext>) -> Json<MessageResponse> {
    Json(MessageResponse::new(format!(
        "Hello, {}! This is your profile.",
        ctx.principal_id()
    )))
}

pub async fn list_products(Extension(ctx): Extension<PrincipalContext>) -> Json<MessageResponse> {
    Json(MessageResponse::new(format!(
        "Hello, {}! Here are the products.",
        ctx.principal_id()
    )))
}

pub async fn create_product(Extension(ctx): Extension<PrincipalContext>) -> Json<MessageResponse> {
    tracing::info!(principal_id = %ctx.principal_id(), "product created");
    Json(MessageResponse::new(format!(
        "Hello, {}! You can create products.",
        ctx.principal_id()
    )))
}

pub async fn dev_tools(Extension(ctx): Extension<PrincipalContext>) -> Json<MessageResponse> {
    Json(MessageResponse::new(format!(
        "Hello, {}! Accessing developer tools.",
        ctx.principal_id()
    )))
}

pub async fn system_logs(Extension(ctx): Extension<PrincipalContext>) -> Json<MessageResponse> {
    Json(MessageResponse::new(format!(
        "Hello, {}! Viewing system logs.",
        ctx.principal_id()
    )))
}

pub async fn delete_user(
    Extension(ctx): Extension<PrincipalContext>,
    Path(username): Path<String>,
) -> Json<MessageResponse> {
    tracing::info!(principal_id = %ctx.principal_id(), target = %username, "user deletion requested");
    Json(MessageResponse::new(format!(
        "Hello, {}! Deleting user {}.",
        ctx.principal_id(),
        username
    )))
}
