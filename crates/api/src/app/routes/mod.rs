use axum::{
    Router,
    routing::{delete, get, post},
};

use gatekeeper_auth::{AccessRequirement, AuthorizationGuard, Permission, Role};

use crate::authz::protect;

pub mod protected;
pub mod rbac;
pub mod session;
pub mod system;

fn require(roles: &[Role], permissions: &[Permission]) -> AccessRequirement {
    AccessRequirement::new()
        .roles(roles.iter().copied())
        .permissions(permissions.iter().copied())
}

/// Router for all authenticated endpoints, each with its declared requirement.
pub fn router(guard: &AuthorizationGuard) -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .route(
            "/admin_dashboard",
            protect(get(protected::admin_dashboard), guard, require(&[Role::Admin], &[])),
        )
        .route(
            "/user_profile",
            protect(
                get(protected::user_profile),
                guard,
                require(&[Role::User, Role::Admin], &[]),
            ),
        )
        .route(
            "/products",
            protect(get(protected::list_products), guard, require(&Role::ALL, &[])).merge(
                protect(
                    post(protected::create_product),
                    guard,
                    require(&[], &[Permission::WriteProducts]),
                ),
            ),
        )
        .route(
            "/dev_tools",
            protect(
                get(protected::dev_tools),
                guard,
                require(&[], &[Permission::AccessDevTools]),
            ),
        )
        .route(
            "/system_logs",
            protect(
                get(protected::system_logs),
                guard,
                require(&[], &[Permission::ViewLogs]),
            ),
        )
        .route(
            "/delete_user/:username",
            protect(
                delete(protected::delete_user),
                guard,
                require(&[], &[Permission::DeleteUsers]),
            ),
        )
        .route(
            "/rbac/roles",
            protect(get(rbac::list_roles), guard, require(&[], &[Permission::ReadUsers])),
        )
        .route("/rbac/explain", get(rbac::explain))
}
