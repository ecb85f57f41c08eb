//! Route-level authorization.
//!
//! Each protected route declares its [`AccessRequirement`] when it is
//! registered; the guard evaluates it after the auth middleware has attached
//! a [`PrincipalContext`] to the request.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::{Next, from_fn_with_state},
    response::Response,
    routing::MethodRouter,
};

use gatekeeper_auth::{AccessRequirement, AuthError, AuthorizationGuard};

use crate::app::errors;
use crate::context::PrincipalContext;

#[derive(Clone)]
struct RequirementState {
    guard: AuthorizationGuard,
    requirement: Arc<AccessRequirement>,
}

/// Attach `requirement` to `route`.
pub fn protect(
    route: MethodRouter,
    guard: &AuthorizationGuard,
    requirement: AccessRequirement,
) -> MethodRouter {
    if requirement.is_unconstrained() {
        tracing::warn!("route registered with an empty access requirement; all authenticated principals are allowed");
    }

    let state = RequirementState {
        guard: guard.clone(),
        requirement: Arc::new(requirement),
    };
    route.layer(from_fn_with_state(state, enforce))
}

async fn enforce(State(state): State<RequirementState>, req: Request, next: Next) -> Response {
    // Without an authenticated principal there is nothing to authorize.
    let Some(ctx) = req.extensions().get::<PrincipalContext>() else {
        return errors::unauthorized(AuthError::InvalidToken);
    };

    if let Err(denial) = state.guard.authorize(ctx.principal(), &state.requirement) {
        return errors::forbidden(denial);
    }

    next.run(req).await
}
