//! Opaque bearer tokens and their backing stores.
//!
//! A [`TokenStore`] is both the issuer (on successful login) and the resolver
//! (on every protected request). Resolving a token issued for identifier `X`
//! yields `X` for as long as the token is valid.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::PrincipalId;

/// Opaque bearer value.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl core::fmt::Debug for Token {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let prefix: String = self.0.chars().take(4).collect();
        write!(f, "Token({prefix}…)")
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,

    #[error("token is not recognised")]
    Unknown,

    #[error("token has expired")]
    Expired,
}

/// Issues tokens and resolves them back to the principal they were issued for.
pub trait TokenStore: Send + Sync {
    fn issue(&self, principal_id: &PrincipalId) -> Token;
    fn resolve(&self, token: &Token) -> Result<PrincipalId, TokenError>;
}

impl<S> TokenStore for std::sync::Arc<S>
where
    S: TokenStore + ?Sized,
{
    fn issue(&self, principal_id: &PrincipalId) -> Token {
        (**self).issue(principal_id)
    }

    fn resolve(&self, token: &Token) -> Result<PrincipalId, TokenError> {
        (**self).resolve(token)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Opaque in-memory tokens
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct TokenRecord {
    principal_id: PrincipalId,
    issued_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
}

impl TokenRecord {
    fn validate(&self, now: DateTime<Utc>) -> Result<(), TokenError> {
        match self.expires_at {
            Some(expires_at) if now >= expires_at || expires_at <= self.issued_at => {
                Err(TokenError::Expired)
            }
            _ => Ok(()),
        }
    }
}

/// Random (UUIDv4) tokens kept in a process-local table.
///
/// All access goes through one mutex: insert on issue, read on resolve.
#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    ttl: Option<Duration>,
    inner: Mutex<HashMap<Token, TokenRecord>>,
}

impl InMemoryTokenStore {
    /// Tokens never expire.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokens expire `ttl` after issuance.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl: Some(ttl),
            inner: Mutex::new(HashMap::new()),
        }
    }

    pub fn issue_at(&self, principal_id: &PrincipalId, now: DateTime<Utc>) -> Token {
        let token = Token(Uuid::new_v4().simple().to_string());
        let record = TokenRecord {
            principal_id: principal_id.clone(),
            issued_at: now,
            expires_at: self.ttl.map(|ttl| now + ttl),
        };

        let mut map = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        map.retain(|_, r| r.validate(now).is_ok());
        map.insert(token.clone(), record);
        token
    }

    pub fn resolve_at(&self, token: &Token, now: DateTime<Utc>) -> Result<PrincipalId, TokenError> {
        if Uuid::try_parse(token.as_str()).is_err() {
            return Err(TokenError::Malformed);
        }

        let mut map = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let resolved = match map.get(token) {
            Some(record) => record.validate(now).map(|()| record.principal_id.clone()),
            None => Err(TokenError::Unknown),
        };

        // An expired record can never become valid again.
        if resolved == Err(TokenError::Expired) {
            map.remove(token);
        }
        resolved
    }

    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .map(|m| m.len())
            .unwrap_or_else(|poisoned| poisoned.into_inner().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TokenStore for InMemoryTokenStore {
    fn issue(&self, principal_id: &PrincipalId) -> Token {
        self.issue_at(principal_id, Utc::now())
    }

    fn resolve(&self, token: &Token) -> Result<PrincipalId, TokenError> {
        self.resolve_at(token, Utc::now())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Symbolic tokens
// ─────────────────────────────────────────────────────────────────────────────

/// Placeholder scheme: the token *is* the principal identifier.
///
/// Offers no tamper resistance whatsoever. Useful for local demos and tests
/// only; the principal lookup that follows resolution is what rejects
/// identifiers that do not exist.
#[derive(Debug, Default, Clone, Copy)]
pub struct SymbolicTokenStore;

impl TokenStore for SymbolicTokenStore {
    fn issue(&self, principal_id: &PrincipalId) -> Token {
        Token(principal_id.as_str().to_string())
    }

    fn resolve(&self, token: &Token) -> Result<PrincipalId, TokenError> {
        let raw = token.as_str();
        if raw.is_empty() {
            return Err(TokenError::Malformed);
        }
        Ok(PrincipalId::new(raw))
    }
}
