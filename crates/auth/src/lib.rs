//! `gatekeeper-auth` — role-based access control core.
//!
//! This crate is intentionally decoupled from HTTP and storage: identities
//! and tokens come from injected stores, and the authorization guard is a
//! pure function of (principal, requirement, role mapping).

pub mod authenticator;
pub mod authorize;
pub mod identity;
pub mod permissions;
pub mod principal;
pub mod registry;
pub mod requirement;
pub mod resolver;
pub mod roles;
pub mod token;

pub use authenticator::{AuthError, Authenticator};
pub use authorize::{
    AuthorizationExplanation, AuthorizationGuard, Denial, PrincipalState, authorize,
    explain_authorization,
};
pub use identity::{IdentityStore, InMemoryIdentityStore};
pub use permissions::{Permission, UnknownPermission};
pub use principal::{Credential, Principal, PrincipalId};
pub use registry::{PolicyLoadError, RbacRegistry, RolePermissionMap};
pub use requirement::AccessRequirement;
pub use resolver::effective_permissions;
pub use roles::{Role, UnknownRole};
pub use token::{InMemoryTokenStore, SymbolicTokenStore, Token, TokenError, TokenStore};
