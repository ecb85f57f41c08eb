//! Service wiring: identity store, token store, role mapping, guard.

use std::sync::Arc;

use thiserror::Error;

use gatekeeper_auth::{
    Authenticator, AuthorizationGuard, IdentityStore, InMemoryIdentityStore, InMemoryTokenStore,
    PolicyLoadError, RolePermissionMap, SymbolicTokenStore, TokenStore,
};

use crate::config::{ApiConfig, TokenMode};

/// Type-erased authenticator shared by the login route and auth middleware.
pub type SharedAuthenticator = Arc<Authenticator<Arc<dyn IdentityStore>, Arc<dyn TokenStore>>>;

#[derive(Clone)]
pub struct AppServices {
    pub authenticator: SharedAuthenticator,
    pub guard: AuthorizationGuard,
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("failed to read policy file {path}: {source}")]
    PolicyRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Policy(#[from] PolicyLoadError),
}

impl AppServices {
    pub fn new(
        identities: Arc<dyn IdentityStore>,
        tokens: Arc<dyn TokenStore>,
        role_permissions: RolePermissionMap,
    ) -> Self {
        Self {
            authenticator: Arc::new(Authenticator::new(identities, tokens)),
            guard: AuthorizationGuard::new(role_permissions),
        }
    }
}

/// Build services from configuration, seeded with the demo principals.
pub fn build_services(config: &ApiConfig) -> Result<AppServices, ServiceError> {
    let role_permissions = match &config.policy_path {
        Some(path) => {
            let raw = std::fs::read_to_string(path).map_err(|source| ServiceError::PolicyRead {
                path: path.display().to_string(),
                source,
            })?;
            tracing::info!(path = %path.display(), "loaded role-permission policy");
            RolePermissionMap::from_json(&raw)?
        }
        None => RolePermissionMap::default(),
    };

    let tokens: Arc<dyn TokenStore> = match (config.token_mode, config.token_ttl) {
        (TokenMode::Symbolic, _) => {
            tracing::warn!("symbolic tokens enabled: bearer value equals the username");
            Arc::new(SymbolicTokenStore)
        }
        (TokenMode::Opaque, Some(ttl)) => Arc::new(InMemoryTokenStore::with_ttl(ttl)),
        (TokenMode::Opaque, None) => Arc::new(InMemoryTokenStore::new()),
    };

    let identities: Arc<dyn IdentityStore> = Arc::new(InMemoryIdentityStore::with_demo_principals());

    Ok(AppServices::new(identities, tokens, role_permissions))
}
