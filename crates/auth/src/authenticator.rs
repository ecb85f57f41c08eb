//! Credential verification and token resolution.

use thiserror::Error;

use crate::{IdentityStore, Principal, PrincipalId, Token, TokenStore};

/// Failures surfaced to the transport layer as "unauthorized".
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown identifier or wrong credential; the two are indistinguishable.
    #[error("invalid identifier or credential")]
    AuthenticationFailure,

    /// Token is unknown, malformed, expired, or no longer maps to a principal.
    #[error("invalid authentication token")]
    InvalidToken,
}

/// Verifies credentials against an [`IdentityStore`] and issues tokens from a
/// [`TokenStore`].
#[derive(Debug, Clone)]
pub struct Authenticator<I, T> {
    identities: I,
    tokens: T,
}

impl<I, T> Authenticator<I, T>
where
    I: IdentityStore,
    T: TokenStore,
{
    pub fn new(identities: I, tokens: T) -> Self {
        Self { identities, tokens }
    }

    /// Verify `credential` for `identifier` and issue a fresh token.
    pub fn authenticate(&self, identifier: &str, credential: &str) -> Result<Token, AuthError> {
        let id = PrincipalId::from(identifier);

        let principal = self
            .identities
            .lookup(&id)
            .filter(|p| p.verify_credential(credential));

        let Some(principal) = principal else {
            tracing::warn!(principal_id = %id, "authentication failed");
            return Err(AuthError::AuthenticationFailure);
        };

        let token = self.tokens.issue(&principal.id);
        tracing::debug!(principal_id = %principal.id, role = %principal.role, "token issued");
        Ok(token)
    }

    /// Map a token back to the identifier it was issued for.
    pub fn resolve(&self, token: &Token) -> Result<PrincipalId, AuthError> {
        self.tokens.resolve(token).map_err(|e| {
            tracing::debug!(reason = %e, "token rejected");
            AuthError::InvalidToken
        })
    }

    /// Resolve a token and load the current principal record.
    ///
    /// A token whose principal has since disappeared from the identity store
    /// is treated as invalid rather than authorizing a ghost.
    pub fn resolve_principal(&self, token: &Token) -> Result<Principal, AuthError> {
        let id = self.resolve(token)?;
        self.identities.lookup(&id).ok_or_else(|| {
            tracing::debug!(principal_id = %id, "token refers to unknown principal");
            AuthError::InvalidToken
        })
    }
}
