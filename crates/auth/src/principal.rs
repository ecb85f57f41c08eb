use serde::{Deserialize, Serialize};

use crate::Role;

/// Identity of a principal (the login identifier, e.g. a username).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(String);

impl PrincipalId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PrincipalId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PrincipalId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Stored secret of a principal.
///
/// Never serialized and redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Exact-match comparison against a submitted secret.
    pub fn matches(&self, submitted: &str) -> bool {
        self.0 == submitted
    }
}

impl core::fmt::Debug for Credential {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// An entity known to the identity store.
///
/// Effective permissions are deliberately not stored here; they are derived
/// from `role` on every check (see [`crate::effective_permissions`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: PrincipalId,
    pub role: Role,
    credential: Credential,
}

impl Principal {
    pub fn new(id: impl Into<PrincipalId>, role: Role, credential: Credential) -> Self {
        Self {
            id: id.into(),
            role,
            credential,
        }
    }

    pub fn verify_credential(&self, submitted: &str) -> bool {
        self.credential.matches(submitted)
    }
}
