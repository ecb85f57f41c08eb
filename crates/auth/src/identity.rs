//! Identity store abstraction (principal lookup by identifier).

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::{Credential, Principal, PrincipalId, Role};

/// Source of principals. Backing storage is up to the implementor.
pub trait IdentityStore: Send + Sync {
    fn lookup(&self, id: &PrincipalId) -> Option<Principal>;
}

impl<S> IdentityStore for Arc<S>
where
    S: IdentityStore + ?Sized,
{
    fn lookup(&self, id: &PrincipalId) -> Option<Principal> {
        (**self).lookup(id)
    }
}

/// In-memory identity store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryIdentityStore {
    inner: RwLock<HashMap<PrincipalId, Principal>>,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with one account per stock role.
    pub fn with_demo_principals() -> Self {
        let store = Self::new();
        for (id, secret, role) in [
            ("admin_user", "admin_password", Role::Admin),
            ("normal_user", "user_password", Role::User),
            ("guest_user", "guest_password", Role::Guest),
            ("developer_user", "dev_password", Role::Developer),
        ] {
            store.insert(Principal::new(id, role, Credential::new(secret)));
        }
        store
    }

    pub fn insert(&self, principal: Principal) {
        let mut map = self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        map.insert(principal.id.clone(), principal);
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .map(|m| m.len())
            .unwrap_or_else(|poisoned| poisoned.into_inner().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl IdentityStore for InMemoryIdentityStore {
    fn lookup(&self, id: &PrincipalId) -> Option<Principal> {
        let map = self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        map.get(id).cloned()
    }
}
