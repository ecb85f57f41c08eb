//! RBAC audit endpoints for authorization debugging.

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use gatekeeper_auth::RbacRegistry;

use crate::app::{dto::ExplainQuery, services::AppServices};
use crate::context::PrincipalContext;

/// GET /rbac/roles - List all roles with their permissions, and all permissions
pub async fn list_roles(Extension(services): Extension<Arc<AppServices>>) -> Response {
    let registry = RbacRegistry::from_map(services.guard.role_permissions());
    (StatusCode::OK, Json(registry)).into_response()
}

/// GET /rbac/explain?roles=a,b&permissions=x,y - Explain a decision for the caller
pub async fn explain(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Query(query): Query<ExplainQuery>,
) -> Response {
    let requirement = match query.to_requirement() {
        Ok(r) => r,
        Err(response) => return response,
    };

    let explanation = services.guard.explain(ctx.principal(), &requirement);
    (StatusCode::OK, Json(serde_json::json!({ "explanation": explanation }))).into_response()
}
